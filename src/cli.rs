use crate::compose::{self, ComposedReview, TemplateBank};
use crate::config::{self, AppConfig};
use crate::session::interactive::{self, WizardOptions};
use crate::session::SelectionState;
use crate::store::{self, Persistence, ReviewStore};
use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bitewrite", version)]
#[command(
    about = "Guided restaurant-review writer",
    long_about = "bitewrite walks you through a short interview about a restaurant visit, composes prose review text from a randomized template bank, and keeps drafts and finished reviews in a local database."
)]
#[command(arg_required_else_help = true)]
#[command(after_long_help = "Examples:
  bitewrite wizard
  bitewrite wizard --edit <REVIEW_ID>
  bitewrite compose --answers answers.toml --seed 7
  bitewrite list
  bitewrite show <REVIEW_ID>
  bitewrite delete <REVIEW_ID>
  bitewrite completion zsh > ~/.zsh/completions/_bitewrite
  bitewrite man > bitewrite.1")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Run the review interview",
        long_about = "Run the interactive interview. Answers autosave to the draft slot; finishing the interview composes the review text and offers to save it."
    )]
    #[command(after_long_help = "Examples:
  bitewrite wizard
  bitewrite wizard --seed 7 --log events.ndjson
  bitewrite wizard --edit <REVIEW_ID>
  bitewrite wizard --discard-draft")]
    Wizard {
        #[arg(
            long,
            value_name = "PATH",
            help = "Path to review DB (default: $XDG_STATE_HOME/bitewrite/reviews.db)"
        )]
        db: Option<PathBuf>,
        #[arg(long, value_name = "PATH", help = "Path to config file")]
        config: Option<PathBuf>,
        #[arg(long, value_name = "PATH", help = "Write NDJSON session log to file")]
        log: Option<PathBuf>,
        #[arg(long, value_name = "N", help = "Seed the template randomizer for repeatable text")]
        seed: Option<u64>,
        #[arg(long, help = "Start fresh, dropping any stored draft")]
        discard_draft: bool,
        #[arg(
            long,
            value_name = "REVIEW_ID",
            help = "Re-open a saved review for editing"
        )]
        edit: Option<String>,
    },
    #[command(
        about = "Compose review text from an answers file",
        long_about = "Compose review text without the interview: read selections from a TOML answers file keyed by the option ids, render once, and print the result."
    )]
    #[command(arg_required_else_help = true)]
    #[command(after_long_help = "Example answers.toml:
  restaurantName = \"Joe's Diner\"
  dishName = \"Burger\"
  price = \"$10\"
  overallRating = \"5stars\"
  restaurantStyle = \"fastFood\"

Example:
  bitewrite compose --answers answers.toml --seed 7")]
    Compose {
        #[arg(long, value_name = "FILE", help = "TOML file of selections")]
        answers: PathBuf,
        #[arg(long, value_name = "N", help = "Seed the template randomizer for repeatable text")]
        seed: Option<u64>,
        #[arg(long, help = "Also save the composed review to the DB")]
        save: bool,
        #[arg(long, value_name = "PATH", help = "Path to review DB")]
        db: Option<PathBuf>,
        #[arg(long, value_name = "PATH", help = "Path to config file")]
        config: Option<PathBuf>,
    },
    #[command(about = "List saved reviews")]
    List {
        #[arg(long, value_name = "PATH", help = "Path to review DB")]
        db: Option<PathBuf>,
        #[arg(long, value_name = "PATH", help = "Path to config file")]
        config: Option<PathBuf>,
    },
    #[command(about = "Print a saved review")]
    #[command(arg_required_else_help = true)]
    Show {
        #[arg(value_name = "REVIEW_ID", help = "Review ID to print")]
        id: String,
        #[arg(long, value_name = "PATH", help = "Path to review DB")]
        db: Option<PathBuf>,
        #[arg(long, value_name = "PATH", help = "Path to config file")]
        config: Option<PathBuf>,
    },
    #[command(about = "Delete a saved review and its stored photos")]
    #[command(arg_required_else_help = true)]
    Delete {
        #[arg(value_name = "REVIEW_ID", help = "Review ID to delete")]
        id: String,
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
        #[arg(long, value_name = "PATH", help = "Path to review DB")]
        db: Option<PathBuf>,
        #[arg(long, value_name = "PATH", help = "Path to config file")]
        config: Option<PathBuf>,
    },
    #[command(about = "Show storage usage against the configured quota")]
    Storage {
        #[arg(long, value_name = "PATH", help = "Path to review DB")]
        db: Option<PathBuf>,
        #[arg(long, value_name = "PATH", help = "Path to config file")]
        config: Option<PathBuf>,
    },
    #[command(
        about = "Generate shell completion script",
        long_about = "Generate shell completion script for your shell. Redirect output to your shell completion directory."
    )]
    #[command(arg_required_else_help = true)]
    #[command(after_long_help = "Examples:
  bitewrite completion bash > ~/.local/share/bash-completion/completions/bitewrite
  bitewrite completion zsh > ~/.zsh/completions/_bitewrite
  bitewrite completion fish > ~/.config/fish/completions/bitewrite.fish")]
    Completion {
        #[arg(value_enum, value_name = "SHELL", help = "Target shell")]
        shell: Shell,
    },
    #[command(
        about = "Generate a man page",
        long_about = "Generate a roff man page for bitewrite."
    )]
    #[command(after_long_help = "Examples:
  bitewrite man > bitewrite.1
  bitewrite man --output docs/bitewrite.1")]
    Man {
        #[arg(
            long,
            value_name = "PATH",
            help = "Write man page to file (stdout when omitted)"
        )]
        output: Option<PathBuf>,
    },
}

fn load_app_config(path: Option<PathBuf>) -> Result<AppConfig> {
    let path = path.unwrap_or_else(config::default_config_path);
    config::load_config(&path)
}

fn resolve_db_path(cfg: &AppConfig, db: Option<PathBuf>) -> PathBuf {
    db.or_else(|| cfg.storage.path.clone())
        .unwrap_or_else(config::default_state_db)
}

fn open_store(cfg: &AppConfig, db: Option<PathBuf>) -> Result<(ReviewStore, PathBuf)> {
    let path = resolve_db_path(cfg, db);
    let store = ReviewStore::open(&path, cfg.storage.quota_bytes)?;
    Ok((store, path))
}

fn run_compose(
    answers: PathBuf,
    seed: Option<u64>,
    save: bool,
    db: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<()> {
    let raw = fs::read_to_string(&answers)
        .with_context(|| format!("read answers file {}", answers.display()))?;
    let selections: SelectionState =
        toml::from_str(&raw).with_context(|| format!("parse {}", answers.display()))?;

    let bank = TemplateBank::builtin().context("load built-in template bank")?;
    let mut rng: StdRng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    if save {
        let cfg = load_app_config(config)?;
        let (store, _) = open_store(&cfg, db)?;
        let review = ComposedReview::new(&selections, &[], &bank, &mut rng);
        store.upsert_review(&review)?;
        println!("{}", review.body);
        eprintln!("saved review {}", review.id);
    } else {
        println!("{}", compose::compose(&selections, &bank, &mut rng));
    }
    Ok(())
}

fn run_list(db: Option<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    let cfg = load_app_config(config)?;
    let (store, _) = open_store(&cfg, db)?;
    let reviews = store.list_reviews()?;
    if reviews.is_empty() {
        println!("No saved reviews.");
        return Ok(());
    }
    for review in reviews {
        println!(
            "{}  {}  {}",
            review.id, review.created_at, review.restaurant_name
        );
    }
    Ok(())
}

fn run_show(id: &str, db: Option<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    let cfg = load_app_config(config)?;
    let (store, _) = open_store(&cfg, db)?;
    let review = store
        .get_review(id)?
        .ok_or_else(|| anyhow!("no saved review with id {id}"))?;
    println!("{} ({})", review.restaurant_name, review.created_at);
    println!();
    println!("{}", review.body);
    if !review.images.is_empty() {
        println!();
        for image in &review.images {
            println!("photo: {image}");
        }
    }
    Ok(())
}

fn run_delete(id: &str, yes: bool, db: Option<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    let cfg = load_app_config(config)?;
    let (store, db_path) = open_store(&cfg, db)?;
    let review = store
        .get_review(id)?
        .ok_or_else(|| anyhow!("no saved review with id {id}"))?;

    if !yes {
        print!(
            "Delete review of {} from {}? [y/N] ",
            review.restaurant_name, review.created_at
        );
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            println!("Not deleted.");
            return Ok(());
        }
    }

    if store.delete_review(id)? {
        let images_dir = config::images_dir(&db_path);
        for image in &review.images {
            let _ = fs::remove_file(images_dir.join(image));
        }
        println!("Deleted review {id}.");
    }
    Ok(())
}

fn run_storage(db: Option<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    let cfg = load_app_config(config)?;
    let (store, db_path) = open_store(&cfg, db)?;
    let usage = store.usage_estimate()?;
    let quota = store.quota();
    let status = match store::classify_usage(usage, quota) {
        store::StorageStatus::Normal => "normal",
        store::StorageStatus::Warning => "warning",
        store::StorageStatus::Critical => "critical",
    };
    println!("db:     {}", db_path.display());
    println!("usage:  {usage} bytes");
    println!("quota:  {quota} bytes");
    println!("status: {status}");
    Ok(())
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Wizard {
            db,
            config: config_path,
            log,
            seed,
            discard_draft,
            edit,
        } => {
            let cfg = load_app_config(config_path)?;
            let (store, db_path) = open_store(&cfg, db)?;
            let opts = WizardOptions {
                images_dir: config::images_dir(&db_path),
                log,
                seed,
                discard_draft,
                edit_id: edit,
            };
            interactive::run_wizard(&cfg, &store, &opts)
        }
        Commands::Compose {
            answers,
            seed,
            save,
            db,
            config: config_path,
        } => run_compose(answers, seed, save, db, config_path),
        Commands::List {
            db,
            config: config_path,
        } => run_list(db, config_path),
        Commands::Show {
            id,
            db,
            config: config_path,
        } => run_show(&id, db, config_path),
        Commands::Delete {
            id,
            yes,
            db,
            config: config_path,
        } => run_delete(&id, yes, db, config_path),
        Commands::Storage {
            db,
            config: config_path,
        } => run_storage(db, config_path),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Commands::Man { output } => {
            let man = clap_mangen::Man::new(Cli::command());
            match output {
                Some(path) => {
                    let mut bytes = Vec::new();
                    man.render(&mut bytes)?;
                    fs::write(path, bytes)?;
                }
                None => {
                    man.render(&mut io::stdout())?;
                }
            }
            Ok(())
        }
    }
}
