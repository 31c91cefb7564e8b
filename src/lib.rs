//! Onsave - rebuild a file's outputs when it is saved
//!
//! Onsave watches a single file for write-completion events and reruns a
//! build command each time one arrives. The motivating use case is a LaTeX
//! paper with a Makefile: leave `onsave` running in the paper's directory
//! and every save of `paper.tex` triggers `make`.

pub mod command;
pub mod config;
pub mod error;
pub mod watcher;

// Re-exports for convenience
pub use command::BuildCommand;
pub use config::{Config, ConfigWarning};
pub use error::{OnsaveError, OnsaveResult};
pub use watcher::{watch, WatchEvent, WatchOptions};
