//! # BDR configuration
//!
//! Configuration model and loader for the Brown Digital Repository MCP
//! server. Values are layered with the precedence
//! `defaults < config file < environment < command-line overrides`.
//!
//! ```rust,no_run
//! use bdr_config::{BdrConfig, ConfigOverrides};
//!
//! # fn main() -> Result<(), bdr_config::ConfigError> {
//! let config = BdrConfig::load(None, ConfigOverrides::default())?;
//! println!("searching {}", config.api.search_endpoint());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod loader;

pub use config::*;
pub use loader::*;
