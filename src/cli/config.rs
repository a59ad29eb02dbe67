use clap::{ArgGroup, Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::form::extractor::ExtractOptions;
use crate::form::injector::InjectOptions;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "form-sync",
    version,
    about = "Scrape and populate legacy health-department report forms"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: form-sync.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report which form layout a saved page carries
    Detect {
        /// Saved HTML page
        #[arg(long)]
        html: String,
    },

    /// Scrape every field of a form into JSON
    #[command(group(ArgGroup::new("source").required(true).args(["html", "url"])))]
    Scrape {
        /// Saved HTML page
        #[arg(long)]
        html: Option<String>,

        /// Live page to fetch
        #[arg(long)]
        url: Option<String>,

        /// Cookie header sent with --url
        #[arg(long, requires = "url")]
        cookie: Option<String>,

        /// Output JSON path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Read the third-column status control of each row
        #[arg(long)]
        status_column: bool,
    },

    /// Write scraped (or edited) field data back into a form
    Populate {
        /// Saved HTML page to fill
        #[arg(long)]
        html: String,

        /// JSON field list or snapshot produced by `scrape`
        #[arg(long)]
        data: String,

        /// Output HTML path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Also write trailing-column fields back
        #[arg(long)]
        write_secondary_fields: bool,

        /// Append a JSONL audit trail of every applied record
        #[arg(long)]
        trace: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `form-sync.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub extract: ExtractOptions,
    #[serde(default)]
    pub inject: InjectConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InjectConfig {
    #[serde(default)]
    pub write_secondary_fields: bool,

    pub trace_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchConfig {
    pub cookie: Option<String>,
}

pub const DEFAULT_CONFIG_PATH: &str = "form-sync.yaml";

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = config_path, error = %e, "malformed config, using defaults");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// CLI flags can only switch options on; the config file sets the baseline.
pub fn build_extract_options(config: &AppConfig, status_column: bool) -> ExtractOptions {
    ExtractOptions {
        status_column: status_column || config.extract.status_column,
    }
}

pub fn build_inject_options(config: &AppConfig, write_secondary_fields: bool) -> InjectOptions {
    InjectOptions {
        write_secondary_fields: write_secondary_fields || config.inject.write_secondary_fields,
    }
}

/// Log filter from `-v` count: warnings by default, then info, debug, trace.
pub fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
