use crate::media;
use crate::store;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_AUTOSAVE_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub version: u32,
    pub storage: StorageConfig,
    pub images: ImagesConfig,
    pub autosave: AutosaveConfig,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub quota_bytes: u64,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ImagesConfig {
    pub max_width: u32,
    pub quality: u8,
}

#[derive(Debug, Clone)]
pub struct AutosaveConfig {
    pub interval_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            version: 1,
            storage: StorageConfig {
                quota_bytes: store::DEFAULT_QUOTA_BYTES,
                path: None,
            },
            images: ImagesConfig {
                max_width: media::DEFAULT_MAX_WIDTH,
                quality: media::DEFAULT_QUALITY,
            },
            autosave: AutosaveConfig {
                interval_secs: DEFAULT_AUTOSAVE_SECS,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawAppConfig {
    version: Option<u32>,
    storage: Option<RawStorageConfig>,
    images: Option<RawImagesConfig>,
    autosave: Option<RawAutosaveConfig>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawStorageConfig {
    quota_bytes: Option<u64>,
    path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawImagesConfig {
    max_width: Option<u32>,
    quality: Option<u8>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawAutosaveConfig {
    interval_secs: Option<u64>,
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("bitewrite").join(CONFIG_FILE);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join("bitewrite")
            .join(CONFIG_FILE);
    }
    PathBuf::from(".bitewrite").join(CONFIG_FILE)
}

pub fn default_state_db() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return PathBuf::from(xdg).join("bitewrite").join("reviews.db");
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("state")
            .join("bitewrite")
            .join("reviews.db");
    }
    PathBuf::from(".bitewrite/reviews.db")
}

// Stored photos live next to the database.
pub fn images_dir(db_path: &Path) -> PathBuf {
    db_path
        .parent()
        .map(|p| p.join("images"))
        .unwrap_or_else(|| PathBuf::from("images"))
}

// A missing file is not an error; every key has a default.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let parsed: RawAppConfig =
        toml::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    validate_config(parsed, path)
}

fn validate_config(raw: RawAppConfig, path: &Path) -> Result<AppConfig> {
    let defaults = AppConfig::default();

    let version = raw.version.unwrap_or(1);
    if version != 1 {
        bail!(
            "{} has unsupported version {version}; expected version = 1",
            path.display()
        );
    }

    let storage = match raw.storage {
        Some(storage) => {
            let quota_bytes = storage.quota_bytes.unwrap_or(defaults.storage.quota_bytes);
            if quota_bytes == 0 {
                bail!("{} has zero `[storage].quota_bytes`", path.display());
            }
            StorageConfig {
                quota_bytes,
                path: storage
                    .path
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .map(PathBuf::from),
            }
        }
        None => defaults.storage,
    };

    let images = match raw.images {
        Some(images) => {
            let max_width = images.max_width.unwrap_or(defaults.images.max_width);
            if max_width == 0 {
                bail!("{} has zero `[images].max_width`", path.display());
            }
            let quality = images.quality.unwrap_or(defaults.images.quality);
            if !(1..=100).contains(&quality) {
                bail!(
                    "{} has `[images].quality` outside 1..=100",
                    path.display()
                );
            }
            ImagesConfig { max_width, quality }
        }
        None => defaults.images,
    };

    let autosave = match raw.autosave {
        Some(autosave) => {
            let interval_secs = autosave
                .interval_secs
                .unwrap_or(defaults.autosave.interval_secs);
            if interval_secs == 0 {
                bail!("{} has zero `[autosave].interval_secs`", path.display());
            }
            AutosaveConfig { interval_secs }
        }
        None => defaults.autosave,
    };

    Ok(AppConfig {
        version,
        storage,
        images,
        autosave,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = tempdir().unwrap();
        let cfg = load_config(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(cfg.storage.quota_bytes, store::DEFAULT_QUOTA_BYTES);
        assert_eq!(cfg.images.max_width, media::DEFAULT_MAX_WIDTH);
        assert_eq!(cfg.autosave.interval_secs, DEFAULT_AUTOSAVE_SECS);
    }

    #[test]
    fn parses_partial_config() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
version = 1
[images]
max_width = 640
"#,
        )
        .unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.images.max_width, 640);
        assert_eq!(cfg.images.quality, media::DEFAULT_QUALITY);
        assert_eq!(cfg.storage.quota_bytes, store::DEFAULT_QUOTA_BYTES);
    }

    #[test]
    fn rejects_unsupported_version() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "version = 2").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(format!("{err}").contains("unsupported version"));
    }

    #[test]
    fn rejects_out_of_range_quality() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[images]
quality = 0
"#,
        )
        .unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(format!("{err}").contains("quality"));
    }

    #[test]
    fn storage_path_override_is_trimmed() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[storage]
path = "  /tmp/custom.db  "
"#,
        )
        .unwrap();
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.storage.path, Some(PathBuf::from("/tmp/custom.db")));
    }
}
