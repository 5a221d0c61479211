//! dropsize CLI: Compute and preview completion dropdown sizes

use clap::{Parser, Subcommand};
use dropsize_core::{Config, ConfigError, SizingResult, SizingTier, CONFIG_FILE_NAME};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Completion dropdown sizing for terminal UIs
#[derive(Parser)]
#[command(name = "dropsize")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to ./.dropsize.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the window size for one terminal height
    Compute {
        /// Terminal height in rows
        #[arg(long, allow_hyphen_values = true)]
        rows: i32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print window sizes across a range of terminal heights
    Table {
        /// First row count (inclusive)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        from: i32,

        /// Last row count (inclusive)
        #[arg(long, default_value_t = 50, allow_hyphen_values = true)]
        to: i32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default config to the current directory
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Open the live dropdown preview (default when no command specified)
    Preview,
}

/// Log filter environment variable.
const LOG_ENV: &str = "DROPSIZE_LOG";

fn main() {
    init_logging();
    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => fail(&format!("Failed to get current directory: {e}")),
    };

    let config = match load_config(cli.config.as_deref(), &cwd) {
        Ok(config) => config,
        Err(e) => fail(&format!("Failed to load config: {e}")),
    };

    match cli.command {
        None | Some(Commands::Preview) => {
            if let Err(e) = dropsize_tui::run_preview_tui(&config) {
                fail(&e.to_string());
            }
        }
        Some(Commands::Compute { rows, json }) => cmd_compute(&config, rows, json),
        Some(Commands::Table { from, to, json }) => cmd_table(&config, from, to, json),
        Some(Commands::Init { force }) => cmd_init(&cwd, force),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

fn load_config(path: Option<&Path>, dir: &Path) -> Result<Config, ConfigError> {
    if let Some(path) = path {
        return Config::load(path);
    }
    debug!(dir = %dir.display(), "discovering config");
    Config::discover(dir)
}

fn format_result(rows: i32, result: &SizingResult, tier: SizingTier) -> String {
    let mode = if result.is_compact_mode {
        "compact"
    } else {
        "normal"
    };
    format!(
        "{rows:>5}  window {:>3}  available {:>4}  {mode:<7}  {tier}",
        result.window_size, result.available_height
    )
}

fn sizing_json(config: &Config, rows: i32) -> serde_json::Value {
    let result = config.policy.compute(rows);
    serde_json::json!({
        "rows": rows,
        "tier": config.policy.tier(rows),
        "window_size": result.window_size,
        "max_visible_items": result.max_visible_items,
        "available_height": result.available_height,
        "is_compact_mode": result.is_compact_mode,
    })
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => fail(&format!("Failed to serialize output: {e}")),
    }
}

fn cmd_compute(config: &Config, rows: i32, json: bool) {
    if json {
        print_json(&sizing_json(config, rows));
        return;
    }

    let result = config.policy.compute(rows);
    println!("Rows:             {rows}");
    println!("Window size:      {}", result.window_size);
    println!("Max visible:      {}", result.max_visible_items);
    println!("Available height: {}", result.available_height);
    println!("Compact mode:     {}", result.is_compact_mode);
    println!("Tier:             {}", config.policy.tier(rows));
}

fn cmd_table(config: &Config, from: i32, to: i32, json: bool) {
    if from > to {
        fail(&format!("--from ({from}) must not exceed --to ({to})"));
    }

    if json {
        let rows: Vec<_> = (from..=to).map(|rows| sizing_json(config, rows)).collect();
        print_json(&serde_json::Value::Array(rows));
        return;
    }

    println!(" rows  window     available  mode     tier");
    for rows in from..=to {
        let result = config.policy.compute(rows);
        println!("{}", format_result(rows, &result, config.policy.tier(rows)));
    }
}

/// Write the default config into `dir`.
///
/// Returns the written path, or `None` when a config exists and `force` is off.
fn write_default_config(dir: &Path, force: bool) -> Result<Option<PathBuf>, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() && !force {
        return Ok(None);
    }
    Config::default().save(&path)?;
    Ok(Some(path))
}

fn cmd_init(dir: &Path, force: bool) {
    match write_default_config(dir, force) {
        Ok(Some(path)) => println!("Created {}", path.display()),
        Ok(None) => println!(
            "Config already exists at {}",
            dir.join(CONFIG_FILE_NAME).display()
        ),
        Err(e) => fail(&format!("Failed to write config: {e}")),
    }
}
