use std::path::PathBuf;

use clap::{Args, Parser};
use serde::Serialize;

#[derive(Clone, Debug, Parser)]
#[command(name = "iconmirror", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct App {
    /// Configuration file [default: iconmirror.toml when present]
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log icon-level drops and store hits
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,

    #[command(flatten)]
    pub overrides: Overrides,
}

/// Settings given on the command line. Unset flags leave lower layers alone.
#[derive(Clone, Debug, Default, Args, Serialize)]
pub struct Overrides {
    /// Source list (CSV: label, manifest url, output path)
    #[arg(long, value_name = "FILE")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<PathBuf>,

    /// Directory holding content-addressed assets
    #[arg(long, value_name = "DIR")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets_dir: Option<PathBuf>,

    /// Consolidated catalog output
    #[arg(long, value_name = "FILE")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// GitHub `owner/name` whose jsDelivr URL prefixes public asset URLs
    #[arg(long, value_name = "OWNER/NAME")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    /// Explicit public URL prefix, takes precedence over --repo
    #[arg(long, value_name = "URL")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Maximum concurrent downloads
    #[arg(short = 'j', long, value_name = "N")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,

    /// Keep catalog entries from earlier runs
    #[arg(long)]
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub archive: bool,
}
