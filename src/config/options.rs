// src/config/options.rs
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::consts::*;

/// Everything both binaries can be configured with.
///
/// Layered by [`AppOptions::load`]: defaults, then `marathon.toml` (optional),
/// then `MARATHON_<SECTION>__<KEY>` environment variables. CLI flags are
/// applied on top by the binaries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppOptions {
    #[serde(default)]
    pub scrape: ScrapeOptions,
    #[serde(default)]
    pub export: ExportOptions,
    #[serde(default)]
    pub dashboard: DashboardOptions,
}

impl AppOptions {
    pub fn load() -> Result<Self, config::ConfigError> {
        let cfg = config::Config::builder()
            .add_source(config::Config::try_from(&AppOptions::default())?)
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("scrape.years")
                    .try_parsing(true),
            )
            .build()?;

        cfg.try_deserialize()
    }
}

/* ---------------- Scrape ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeOptions {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_years")]
    pub years: Vec<i32>,
    /// Letter pages to visit per year (`alfa<letter>.htm`).
    #[serde(default = "default_letters")]
    pub letters: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String { BASE_URL.to_string() }
fn default_years() -> Vec<i32> { DEFAULT_YEARS.to_vec() }
fn default_letters() -> String { LETTERS.to_string() }
fn default_timeout() -> u64 { TIMEOUT_SECS }
fn default_user_agent() -> String { USER_AGENT.to_string() }

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            years: default_years(),
            letters: default_letters(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/* ---------------- Export ---------------- */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> u8 {
        match self { ExportFormat::Csv => b',', ExportFormat::Tsv => b'\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    /// File name without extension; the format decides the extension.
    #[serde(default = "default_file_stem")]
    pub file_stem: String,
    /// Also write a SQLite copy of the dataset here.
    #[serde(default)]
    pub sqlite: Option<PathBuf>,
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_out_dir() -> PathBuf { PathBuf::from(DEFAULT_OUT_DIR) }
fn default_file_stem() -> String { DEFAULT_FILE.to_string() }
fn default_table() -> String { DEFAULT_TABLE.to_string() }

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_dir: default_out_dir(),
            file_stem: default_file_stem(),
            sqlite: None,
            table: default_table(),
        }
    }
}

impl ExportOptions {
    pub fn out_path(&self) -> PathBuf {
        self.out_dir.join(format!("{}.{}", self.file_stem, self.format.ext()))
    }

    /// Split a user path into dir + stem. A `.tsv`/`.csv` extension also
    /// switches the format; anything else is dropped.
    pub fn set_path(&mut self, p: &Path) {
        if let Some(parent) = p.parent() {
            self.out_dir = parent.to_path_buf();
        }
        if let Some(stem) = p.file_stem() {
            self.file_stem = stem.to_string_lossy().into_owned();
        }
        match p.extension().and_then(|e| e.to_str()) {
            Some(e) if e.eq_ignore_ascii_case("tsv") => self.format = ExportFormat::Tsv,
            Some(e) if e.eq_ignore_ascii_case("csv") => self.format = ExportFormat::Csv,
            _ => {}
        }
    }
}

/* ---------------- Dashboard ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardOptions {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_dataset")]
    pub dataset: PathBuf,
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_host() -> String { DEFAULT_HOST.to_string() }
fn default_port() -> u16 { DEFAULT_PORT }
fn default_dataset() -> PathBuf { ExportOptions::default().out_path() }

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            dataset: default_dataset(),
            table: default_table(),
        }
    }
}
