//! # CargoTrack Node Library
//!
//! Exposes the node's building blocks for the binary and for tests.
//!
//! - `config`: environment configuration
//! - `runtime`: bus, registry service and observer wiring
//! - `shim`: line-delimited JSON command interface

#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod runtime;
pub mod shim;

pub use config::{ConfigError, NodeConfig};
pub use runtime::NodeRuntime;
pub use shim::{run_shim, Command, CommandError, CommandHandler, CommandResponse};
