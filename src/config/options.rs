// src/config/options.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;
use super::consts::*;

/// Everything a run needs. Every field has a default, so an empty or missing
/// config file is valid.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    pub sheets: Vec<SheetOptions>,
    pub fetch: FetchOptions,
    pub log: LogOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            sheets: DEFAULT_SHEETS
                .iter()
                .map(|(name, file)| SheetOptions {
                    name: s!(*name),
                    path: PathBuf::from(DEFAULT_SHEET_DIR).join(file),
                })
                .collect(),
            fetch: FetchOptions::default(),
            log: LogOptions::default(),
        }
    }
}

impl AppOptions {
    /// Read a TOML config. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Keep only the named sheets (case-insensitive). Empty filter keeps all.
    pub fn retain_sheets(&mut self, names: &[String]) {
        if names.is_empty() { return; }
        self.sheets.retain(|s| names.iter().any(|n| n.eq_ignore_ascii_case(&s.name)));
    }
}

/// One worksheet, stored as a local CSV/TSV file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SheetOptions {
    pub name: String,
    pub path: PathBuf,
}

impl SheetOptions {
    pub fn format(&self) -> SheetFormat {
        SheetFormat::from_path(&self.path)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    Tsv,
}

impl SheetFormat {
    /// `.tsv` is tab-separated; anything else is treated as CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => SheetFormat::Tsv,
            _ => SheetFormat::Csv,
        }
    }

    pub fn delim(&self) -> char {
        match self { SheetFormat::Csv => ',', SheetFormat::Tsv => '\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Listing pages fetched in parallel. 1 = strictly sequential.
    pub workers: usize,
    pub pause_ms: u64,
    pub jitter_ms: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            base_url: s!(LISTING_BASE_URL),
            user_agent: s!(USER_AGENT),
            timeout_secs: TIMEOUT_SECS,
            workers: WORKERS,
            pause_ms: REQUEST_PAUSE_MS,
            jitter_ms: JITTER_MS,
        }
    }
}

impl FetchOptions {
    /// `<base_url><id>_zpid/`
    pub fn listing_url(&self, id: &str) -> String {
        let mut url = self.base_url.clone();
        if !url.ends_with('/') { url.push('/'); }
        join!(url, id, LISTING_URL_SUFFIX)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogOptions {
    /// `EnvFilter` directive, e.g. `"info"` or `"listing_updater=debug"`.
    /// `RUST_LOG` wins when set.
    pub level: String,
    /// Append to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self { level: s!(LOG_LEVEL), file: None }
    }
}
