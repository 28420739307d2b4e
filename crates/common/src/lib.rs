//! Common utilities and shared types for forkful.
//!
//! This crate provides foundational components used across all forkful crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//!
//! # Example
//!
//! ```no_run
//! use forkful_common::{AppResult, Config};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     println!("Listening on {}:{}", config.server.host, config.server.port);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;

pub use config::{AuthConfig, Config, DatabaseConfig, ServerConfig};
pub use error::{AppError, AppResult};
