//! Subcommand handlers.

use std::io::Read;
use std::path::{Path, PathBuf};

use super::args::{CacheAction, ConfigAction};
use crate::ascii;
use crate::config::{default_path, DEFAULT_CONFIG};
use crate::models::{parse_series_list, Series};
use crate::render::{ImageCandidate, RenderCache, RenderConfig, Renderer};

/// Render a single URL and print it, optionally framed under `title`.
pub fn run_render(url: &str, title: Option<&str>, config: &RenderConfig) -> Result<(), String> {
    let renderer = Renderer::from_config(config)
        .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

    let block = renderer.render(url, config).map_err(|e| e.to_string())?;

    match title {
        Some(t) => println!("{}", ascii::frame_with_title(t, &block)),
        None => println!("{}", block),
    }
    Ok(())
}

/// Print a series listing, rendering each entry's artwork when `show_ascii`.
///
/// A failed render prints a placeholder and the listing continues.
pub fn run_series(
    file: &Path,
    base_url: Option<&str>,
    show_ascii: bool,
    config: &RenderConfig,
) -> Result<(), String> {
    let json = read_input(file)?;
    let series = parse_series_list(&json)
        .map_err(|e| format!("Failed to parse series JSON: {}", e))?;

    if series.is_empty() {
        println!("No series found.");
        return Ok(());
    }

    let renderer = if show_ascii {
        Some(
            Renderer::from_config(config)
                .map_err(|e| format!("Failed to create HTTP client: {}", e))?,
        )
    } else {
        None
    };

    println!("Your Library ({} series):\n", series.len());

    for (i, s) in series.iter().enumerate() {
        println!("{}. {}", i + 1, s.summary());

        if let Some(renderer) = &renderer {
            let candidates = resolve_candidates(s, base_url);
            match renderer.render_candidates(&candidates, config) {
                Ok(art) => println!("{}", indent(&art, "   ")),
                Err(e) => println!("   [Could not load poster: {}]", e),
            }
            println!();
        }
    }

    Ok(())
}

/// Handle cache subcommand actions.
pub fn run_cache(action: CacheAction, config: &RenderConfig) -> Result<(), String> {
    let cache = RenderCache::new(config.cache_dir.clone());

    match action {
        CacheAction::List => {
            let entries = cache
                .list_entries()
                .map_err(|e| format!("Failed to list cache entries: {}", e))?;

            if entries.is_empty() {
                println!("Cache is empty.");
                return Ok(());
            }

            println!("Cached renders:\n");
            for entry in &entries {
                println!("  {:>8} {}", format_size(entry.size_bytes), entry.key);
            }

            let total: u64 = entries.iter().map(|e| e.size_bytes).sum();
            println!("\nTotal: {} entries, {}", entries.len(), format_size(total));
        }
        CacheAction::Clear => {
            cache
                .clear()
                .map_err(|e| format!("Failed to clear cache: {}", e))?;
            println!("Cleared render cache: {}", cache.cache_dir().display());
        }
        CacheAction::Path => {
            println!("{}", cache.cache_dir().display());
        }
    }

    Ok(())
}

/// Handle config subcommand actions.
///
/// `explicit_path` is the `--config` argument, if any; `effective` is the
/// merged configuration in use.
pub fn handle_config_action(
    action: ConfigAction,
    explicit_path: Option<&Path>,
    effective: &RenderConfig,
) -> Result<(), String> {
    let config_path = explicit_path.map(PathBuf::from).unwrap_or_else(default_path);

    match action {
        ConfigAction::Show => {
            println!("Current configuration:");
            println!("  Width:     {}", effective.width);
            println!("  Height:    {}", effective.height);
            println!("  Colored:   {}", if effective.colored { "yes" } else { "no" });
            println!("  Role:      {}", effective.role);
            println!("  Cache dir: {}", effective.cache_dir.display());
            println!();

            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
        }
        ConfigAction::Init => {
            if config_path.exists() {
                return Err(format!(
                    "Config file already exists: {}\nUse 'ascii-poster config show' to view current settings.",
                    config_path.display()
                ));
            }

            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Error creating config directory: {}", e))?;
            }

            std::fs::write(&config_path, DEFAULT_CONFIG)
                .map_err(|e| format!("Error writing config file: {}", e))?;

            println!("Created config file: {}", config_path.display());
        }
    }

    Ok(())
}

/// Read a whole file, or stdin when `path` is `-`.
fn read_input(path: &Path) -> Result<String, String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("Failed to read stdin: {}", e))?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))
    }
}

/// Image candidates of `series` with relative URLs joined onto `base_url`.
pub fn resolve_candidates(series: &Series, base_url: Option<&str>) -> Vec<ImageCandidate> {
    series
        .images
        .iter()
        .map(|img| ImageCandidate {
            role: img.role.clone(),
            url: resolve_url(base_url, &img.url),
        })
        .collect()
}

/// Join a server-relative URL (`/MediaCover/...`) onto `base_url`.
/// Absolute URLs, and any URL when no base is given, pass through.
pub fn resolve_url(base_url: Option<&str>, url: &str) -> String {
    match base_url {
        Some(base) if url.starts_with('/') => format!("{}{}", base.trim_end_matches('/'), url),
        _ => url.to_string(),
    }
}

/// Prefix every line of `block` with `prefix`.
fn indent(block: &str, prefix: &str) -> String {
    block
        .lines()
        .map(|line| format!("{}{}", prefix, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Human-readable byte count.
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
