//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing, enums, and subcommand handlers.

mod args;
mod commands;
mod enums;

pub use args::{Args, CacheAction, Command, ConfigAction, RenderArgs};
pub use commands::{
    handle_config_action, resolve_candidates, resolve_url, run_cache, run_render, run_series,
};
pub use enums::Role;
