//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::Role;
use crate::render::RenderConfig;

/// Render TV series artwork as ASCII art in the terminal
#[derive(Parser, Debug)]
#[command(name = "ascii-poster")]
#[command(version, about = "Render series artwork as terminal ASCII art", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Render options shared by the rendering subcommands.
/// Unset options fall back to the config file, then to built-in defaults.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Output width in characters (0 derives it from the height)
    #[arg(long)]
    pub width: Option<u32>,

    /// Output height in characters (0 derives it from the width)
    #[arg(long)]
    pub height: Option<u32>,

    /// Force ANSI colors on, even if the config file disables them
    #[arg(long, overrides_with = "no_color")]
    pub color: bool,

    /// Disable ANSI colors
    #[arg(long, overrides_with = "color")]
    pub no_color: bool,

    /// Preferred image when an entity has several
    #[arg(long, ignore_case = true)]
    pub role: Option<Role>,
}

impl RenderArgs {
    /// Layer these flags over `base`.
    pub fn apply(&self, base: RenderConfig) -> RenderConfig {
        RenderConfig {
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
            colored: match (self.color, self.no_color) {
                (true, _) => true,
                (_, true) => false,
                _ => base.colored,
            },
            role: self.role.map(Into::into).unwrap_or(base.role),
            cache_dir: base.cache_dir,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render an image URL as ASCII art
    Render {
        /// Image URL (PNG, JPEG or GIF)
        url: String,

        /// Frame the output in a border under this title
        #[arg(long)]
        title: Option<String>,

        #[command(flatten)]
        render: RenderArgs,
    },
    /// List series from a JSON payload with their artwork
    Series {
        /// Series JSON file (single object or array), `-` for stdin
        file: PathBuf,

        /// Prefix for relative image URLs (e.g. http://localhost:8989)
        #[arg(long)]
        base_url: Option<String>,

        /// Print the listing without artwork
        #[arg(long)]
        no_ascii: bool,

        #[command(flatten)]
        render: RenderArgs,
    },
    /// Render cache management
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum CacheAction {
    /// List cached renders with sizes
    List,
    /// Remove the whole cache directory
    Clear,
    /// Print the cache directory
    Path,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}
