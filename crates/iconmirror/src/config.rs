//! Layered settings: defaults, TOML file, `ICONMIRROR_*` environment, CLI.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use iconmirror_fetch::{FetchOptions, Timeouts};
use serde::{Deserialize, Serialize};

use crate::cli::Overrides;

pub const DEFAULT_CONFIG_FILE: &str = "iconmirror.toml";
const ENV_PREFIX: &str = "ICONMIRROR_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sources:              PathBuf,
    pub assets_dir:           PathBuf,
    pub catalog:              PathBuf,
    pub catalog_name:         String,
    pub repo:                 Option<String>,
    pub base_url:             Option<String>,
    /// `None` uses the available parallelism.
    pub concurrency:          Option<usize>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_retries:          u32,
    pub retry_backoff_ms:     u64,
    pub archive:              bool,
    pub update_log:           Option<PathBuf>,
    pub commit_message:       Option<PathBuf>,
    pub user_agent:           String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sources:              PathBuf::from("config.csv"),
            assets_dir:           PathBuf::from("icons/assets"),
            catalog:              PathBuf::from("icons/allinone.json"),
            catalog_name:         "Icon Catalog".to_string(),
            repo:                 None,
            base_url:             None,
            concurrency:          None,
            connect_timeout_secs: 10,
            request_timeout_secs: 20,
            max_retries:          2,
            retry_backoff_ms:     500,
            archive:              false,
            update_log:           Some(PathBuf::from("update.log")),
            commit_message:       Some(PathBuf::from("commit_message.txt")),
            user_agent:           concat!("iconmirror/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Settings {
    /// Merge every layer. An explicitly named config file must exist; the
    /// default one is optional.
    pub fn load(config: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let file = match config {
            Some(path) if !path.is_file() => bail!("config file {} not found", path.display()),
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        Self::figment(&file, overrides)
            .extract()
            .with_context(|| format!("invalid configuration (file: {})", file.display()))
    }

    fn figment(file: &Path, overrides: &Overrides) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
    }

    /// Prefix for public asset URLs. Empty means relative paths.
    pub fn base_url(&self) -> String {
        if let Some(base) = self.base_url.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
            return if base.ends_with('/') { base.to_string() } else { format!("{base}/") };
        }
        match self.repo.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
            Some(repo) => format!("https://cdn.jsdelivr.net/gh/{repo}@main/"),
            None => String::new(),
        }
    }

    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            connect: Duration::from_secs(self.connect_timeout_secs),
            total:   Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions::default()
            .max_retries(self.max_retries)
            .retry_backoff(Duration::from_millis(self.retry_backoff_ms))
    }
}
