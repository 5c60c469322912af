use ascii_poster::cli::{self, Args, Command, ConfigAction};
use ascii_poster::config::Config;
use clap::Parser;

/// Install the logger. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Load config file.
///
/// If --config is specified, require the file to exist.
/// Otherwise, fall back to defaults if the default config cannot be loaded.
fn load_config(path: Option<&std::path::Path>) -> Config {
    match path {
        Some(path) => match Config::load_from_explicit(path.to_path_buf()) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => match Config::load() {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Warning: {}", e);
                eprintln!("Using default settings.\n");
                Config::default()
            }
        },
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    // `config init` creates the file, so it must not be required to exist
    let cfg = match args.command {
        Command::Config {
            action: ConfigAction::Init,
        } => Config::default(),
        _ => load_config(args.config.as_deref()),
    };
    let base = cfg.render_config();

    // Merge settings: CLI args > config file > built-in defaults
    let result = match args.command {
        Command::Render { url, title, render } => {
            cli::run_render(&url, title.as_deref(), &render.apply(base))
        }
        Command::Series {
            file,
            base_url,
            no_ascii,
            render,
        } => cli::run_series(
            &file,
            base_url.as_deref(),
            !no_ascii,
            &render.apply(cfg.listing_render_config()),
        ),
        Command::Cache { action } => cli::run_cache(action, &base),
        Command::Config { action } => {
            cli::handle_config_action(action, args.config.as_deref(), &base)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
