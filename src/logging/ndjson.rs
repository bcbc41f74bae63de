use crate::logging::SessionEvent;
use anyhow::Result;
use serde_json::json;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

pub fn mirror_event(path: &Path, ev: &SessionEvent) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut f = OpenOptions::new().create(true).append(true).open(path)?;
    let line = json!({
        "ts": ev.ts,
        "event": ev.event,
        "step": ev.step,
        "payload": ev.payload
    });
    writeln!(f, "{}", line)?;
    Ok(())
}
