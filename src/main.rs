use anyhow::Result;

fn main() -> Result<()> {
    bitewrite::cli::run()
}
