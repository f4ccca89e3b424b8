use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Wait for hub scans and process hub notifications
#[derive(Parser, Debug)]
#[command(name = "hub-integration")]
#[command(version)]
#[command(about = "Wait for hub BOM import scans and process hub notifications", long_about = None)]
pub struct Args {
    /// Path to a config file (defaults to ./hub-integration.config.yml when present)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Hub base URL, overriding the config file
    #[arg(long, global = true, value_name = "URL")]
    pub server_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Wait until the BOM import scans of a project version have completed
    WaitScan {
        /// Project name (exact match)
        #[arg(short, long)]
        project: String,

        /// Project version name (exact match)
        #[arg(long, value_name = "VERSION")]
        project_version: String,

        /// Maximum wait per phase in milliseconds; values <= 0 use the default
        #[arg(long, allow_negative_numbers = true)]
        timeout_ms: Option<i64>,
    },

    /// Print the content items of all notifications in a time window as JSON
    Notifications {
        /// Window start (RFC 3339, e.g. 2024-05-01T00:00:00Z)
        #[arg(long)]
        start: DateTime<Utc>,

        /// Window end (RFC 3339)
        #[arg(long)]
        end: DateTime<Utc>,

        /// Keep only these policy rules (name, id or URL); repeatable
        #[arg(short, long = "rule", value_name = "RULE")]
        rules: Vec<String>,
    },

    /// Print the policy status summary of a project version
    PolicyStatus {
        /// Project name (exact match)
        #[arg(short, long)]
        project: String,

        /// Project version name (exact match)
        #[arg(long, value_name = "VERSION")]
        project_version: String,
    },
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
