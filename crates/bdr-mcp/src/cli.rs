use bdr_config::ConfigOverrides;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Log level options for the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "bdr-mcp-server")]
#[command(about = "MCP server exposing Brown Digital Repository search over stdio")]
#[command(version)]
pub struct Cli {
    /// Config file path (defaults to ~/.config/bdr-mcp/config.toml)
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Repository API base URL (overrides config file and BDR_API_BASE)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Upstream request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(short = 'l', long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Print an example config file and exit
    #[arg(long)]
    pub print_config_example: bool,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            log_level: self.log_level.map(|l| l.as_filter().to_string()),
        }
    }
}
