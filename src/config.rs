//! On-disk layout and user-tunable settings. Everything lives beneath a single
//! folder in the user's home so the catalog, the log and the optional settings
//! file travel together.

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use serde::Deserialize;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".bookshelf";
/// SQLite file holding the key-value storage table.
const DB_FILE_NAME: &str = "bookshelf.sqlite";
/// Log file written by the tracing subscriber.
const LOG_FILE_NAME: &str = "bookshelf.log";
/// Optional JSON file overriding [`Settings`] defaults.
const SETTINGS_FILE_NAME: &str = "settings.json";

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_SEED_COUNT: usize = 100;
pub const DEFAULT_LOOKUP_ENDPOINT: &str = "https://www.googleapis.com/books/v1/volumes";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Absolute paths of every file the application touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub root: PathBuf,
    pub database: PathBuf,
    pub log: PathBuf,
    pub settings: PathBuf,
}

impl DataPaths {
    /// Resolve the data folder inside the user's home.
    pub fn resolve() -> Result<Self> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
        Ok(Self::under(base_dirs.home_dir().join(DATA_DIR_NAME)))
    }

    /// Same layout rooted at an arbitrary directory.
    pub fn under(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            database: root.join(DB_FILE_NAME),
            log: root.join(LOG_FILE_NAME),
            settings: root.join(SETTINGS_FILE_NAME),
            root,
        }
    }

    pub fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).with_context(|| {
            format!("failed to create data directory {}", self.root.display())
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Books shown per page.
    pub page_size: NonZeroUsize,
    /// Size of the generated collection when no snapshot exists.
    pub seed_count: usize,
    /// Volumes search endpoint queried during enrichment.
    pub lookup_endpoint: String,
    /// `tracing_subscriber::EnvFilter` directive string.
    pub log_level: String,
    /// Start cover/date lookups as soon as the catalog is shown.
    pub enrich_on_start: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN),
            seed_count: DEFAULT_SEED_COUNT,
            lookup_endpoint: DEFAULT_LOOKUP_ENDPOINT.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            enrich_on_start: true,
        }
    }
}

impl Settings {
    /// Read the settings file if present. A missing file yields the defaults;
    /// a malformed one is a startup error so typos do not go unnoticed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid settings in {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("failed to parse settings JSON")
    }
}
