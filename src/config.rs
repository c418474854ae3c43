//! Command line and environment configuration

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use crate::constants::{DEFAULT_API_URL, DEFAULT_LOG_FILE};

/// Remove image backgrounds through a remote service, from your terminal
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(name = "cutout")]
pub struct Cli {
    /// Base URL of the background removal service
    #[arg(long, env = "CUTOUT_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Where downloaded cutouts are written (defaults to the Downloads folder)
    #[arg(short, long, env = "CUTOUT_OUTPUT_DIR", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Log file path
    #[arg(long, default_value = DEFAULT_LOG_FILE, value_name = "FILE")]
    pub log_file: PathBuf,
}

/// Resolved runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Service base URL without a trailing slash
    pub api_url: String,
    pub output_dir: PathBuf,
    pub log_file: PathBuf,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        Ok(Config {
            api_url: normalize_base_url(&cli.api_url)?,
            output_dir: cli.output_dir.unwrap_or_else(default_output_dir),
            log_file: cli.log_file,
        })
    }
}

/// Check the URL is absolute http(s) and strip any trailing slash
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let url = reqwest::Url::parse(raw.trim())
        .with_context(|| format!("invalid service URL {:?}", raw))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("service URL must use http or https, got {:?}", url.scheme());
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

fn default_output_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}
