//! bitboard - terminal editor for 8 to 128-bit bitboards
//!
//! Click or drag across the grid to toggle bits; the readout above the grid
//! shows the value in hex, decimal or binary and the Copy button puts it on
//! the clipboard.

mod clipboard;
mod config;
mod core;
mod data;
mod frontend;

use crate::clipboard::SessionClipboard;
use crate::core::{to_app_event, AppCore, InputResult};
use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use data::{BitState, DisplayMode, FormatBuffer, GridSize};
use frontend::{Frontend, TuiFrontend};
use std::path::PathBuf;
use std::time::Duration;

#[derive(ClapParser)]
#[command(name = "bitboard")]
#[command(about = "Terminal bitboard editor", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Custom data directory (default: ~/.bitboard)
    /// Can also be set via BITBOARD_DIR environment variable
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Initial board width in bits (8, 16, 32, 64, 128)
    #[arg(short, long, value_name = "BITS")]
    width: Option<GridSize>,

    /// Initial numeric display mode
    #[arg(short, long, value_enum)]
    display: Option<DisplayArg>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum DisplayArg {
    Hex,
    Decimal,
    Binary,
}

impl DisplayArg {
    fn mode(self) -> DisplayMode {
        match self {
            DisplayArg::Hex => DisplayMode::Hex,
            DisplayArg::Decimal => DisplayMode::Decimal,
            DisplayArg::Binary => DisplayMode::Binary,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file
    ValidateConfig {
        /// Config file to validate (default: config.toml in the data directory)
        #[arg(value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Print a 128-bit value in every display mode
    Format {
        /// Hex (0x..), binary (0b..) or decimal literal
        #[arg(value_name = "VALUE")]
        value: String,
    },
}

/// Parse a board literal; `_` separators are allowed
fn parse_board_value(input: &str) -> Result<u128> {
    let cleaned: String = input.trim().chars().filter(|c| *c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();
    let (digits, radix) = if let Some(hex) = lower.strip_prefix("0x") {
        (hex, 16)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        (bin, 2)
    } else {
        (lower.as_str(), 10)
    };
    if digits.is_empty() {
        bail!("Empty value '{}'", input);
    }
    u128::from_str_radix(digits, radix)
        .with_context(|| format!("'{}' is not a 128-bit value", input))
}

fn init_logging() -> Result<()> {
    // TUI owns stdout, so logs go to a file in the data directory
    // (use RUST_LOG env var to control level, e.g. RUST_LOG=debug)
    let log_dir = config::Config::base_dir()?;
    std::fs::create_dir_all(&log_dir)
        .context(format!("Failed to create data directory {:?}", log_dir))?;
    let log_path = log_dir.join("bitboard.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .context(format!("Failed to open log file {:?}", log_path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false) // No color codes in log file
        .init();
    Ok(())
}

fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::ValidateConfig { config: path } => {
            let path = match path {
                Some(path) => path,
                None => config::Config::config_path()?,
            };
            println!("Validating config file: {:?}", path);

            match config::Config::load_from_path(&path) {
                Ok(config) => {
                    println!("✓ Config loaded successfully");
                    println!("  board:      {} / {}", config.board.width, config.board.display);
                    println!("  background: {}", config::color_to_hex(&config.background_color()));
                    println!("  cell:       {}", config::color_to_hex(&config.cell_color()));
                    println!("  palette:    {} color(s)", config.palette().len());
                    Ok(())
                }
                Err(e) => {
                    eprintln!("✗ {:#}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Format { value } => {
            let state = BitState::from_u128(parse_board_value(&value)?);
            let mut buf = FormatBuffer::new();
            for mode in [DisplayMode::Hex, DisplayMode::Decimal, DisplayMode::Binary] {
                println!("{:>7}: {}", mode.name(), state.format(mode, &mut buf));
            }
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    if let Some(dir) = &cli.data_dir {
        std::env::set_var(config::DATA_DIR_ENV, dir);
    }

    // Handle subcommands
    if let Some(command) = cli.command {
        return run_command(command);
    }

    init_logging()?;

    let mut config = match &cli.config {
        Some(path) => config::Config::load_from_path(path)?,
        None => config::Config::load()?,
    };
    if let Some(width) = cli.width {
        config.board.width = width.label().to_ascii_lowercase();
    }
    if let Some(display) = cli.display {
        config.board.display = display.mode();
    }
    tracing::info!(
        "Starting bitboard: width {}, display {}",
        config.board.width,
        config.board.display
    );

    run_tui(config)
}

fn run_tui(config: config::Config) -> Result<()> {
    let frame_interval = Duration::from_millis(config.ui.frame_interval_ms);
    let mut frontend = TuiFrontend::new()?;
    frontend.set_poll_timeout(frame_interval);

    let mut clipboard = SessionClipboard::new();

    let (width, height) = frontend.size();
    let result = AppCore::new(config, &mut frontend, width, height)
        .and_then(|mut app_core| event_loop(&mut frontend, &mut app_core, &mut clipboard));

    frontend.cleanup()?;
    if let Err(e) = &result {
        tracing::error!("Exiting on error: {:#}", e);
    }
    result
}

fn event_loop(
    frontend: &mut TuiFrontend,
    app_core: &mut AppCore,
    clipboard: &mut SessionClipboard,
) -> Result<()> {
    while app_core.running {
        for event in frontend.poll_events()? {
            let Some(app_event) = to_app_event(&event) else {
                continue;
            };
            for result in app_core.handle_event(app_event)? {
                apply_result(result, clipboard);
            }
        }

        if !app_core.running {
            break;
        }
        frontend.render(app_core)?;
    }
    tracing::info!("Event loop finished");
    Ok(())
}

/// Carry out side effects the core cannot perform itself
fn apply_result(result: InputResult, clipboard: &mut SessionClipboard) {
    if !result.needs_platform() {
        tracing::debug!("Input result: {:?}", result);
        return;
    }
    if let InputResult::CopyToClipboard { text } = result {
        match clipboard.copy(&text) {
            Ok(()) => tracing::info!("Copied {} to clipboard", text),
            Err(e) => tracing::warn!("Clipboard copy failed: {:#}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_width_and_display() {
        let cli = Cli::try_parse_from(["bitboard", "--width", "128", "--display", "binary"]).unwrap();
        assert_eq!(cli.width, Some(GridSize::Bits128));
        assert_eq!(cli.display.map(DisplayArg::mode), Some(DisplayMode::Binary));

        assert!(Cli::try_parse_from(["bitboard", "--width", "12"]).is_err());
        assert!(Cli::try_parse_from(["bitboard", "--display", "octal"]).is_err());
    }

    #[test]
    fn test_cli_subcommands() {
        let cli = Cli::try_parse_from(["bitboard", "format", "0xff"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Format { ref value }) if value == "0xff"));

        let cli = Cli::try_parse_from(["bitboard", "validate-config"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::ValidateConfig { config: None })));
    }

    #[test]
    fn test_parse_board_value() {
        assert_eq!(parse_board_value("0xff").unwrap(), 255);
        assert_eq!(parse_board_value("0XFF").unwrap(), 255);
        assert_eq!(parse_board_value("0b101").unwrap(), 5);
        assert_eq!(parse_board_value("1_000").unwrap(), 1000);
        assert_eq!(parse_board_value(&u128::MAX.to_string()).unwrap(), u128::MAX);
        assert!(parse_board_value("0x").is_err());
        assert!(parse_board_value("0x1_0000_0000_0000_0000_0000_0000_0000_0000").is_err());
        assert!(parse_board_value("twelve").is_err());
    }
}
