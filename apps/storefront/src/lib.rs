//! # Storefront
//!
//! Interactive terminal store over `storefront-core`.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. init_tracing()          RUST_LOG or "warn,storefront=info", stderr  │
//! │  2. parse_args()            --config <PATH>, --help                     │
//! │  3. StorefrontConfig::load  file → env → validate                      │
//! │  4. seed::build_store       configured or built-in catalog             │
//! │  5. Menu::run               stdin / stdout until quit or EOF           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Logs go to stderr so they never interleave with the menu on stdout.

pub mod config;
pub mod error;
pub mod menu;
pub mod seed;

use std::io;
use std::path::PathBuf;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::StorefrontConfig;
use error::AppResult;
use menu::Menu;

/// Parsed command line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub help: bool,
}

/// Parses arguments, excluding the program name.
///
/// Unknown arguments are ignored with a warning.
pub fn parse_args(args: impl IntoIterator<Item = String>) -> CliArgs {
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                if let Some(path) = args.next() {
                    parsed.config = Some(PathBuf::from(path));
                }
            }
            "--help" | "-h" => parsed.help = true,
            other => warn!(argument = other, "Ignoring unknown argument"),
        }
    }

    parsed
}

fn print_help() {
    println!("Storefront - interactive terminal store");
    println!();
    println!("Usage: storefront [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>  Config file (default: platform config dir/storefront.toml)");
    println!("  -h, --help           Show this help message");
    println!();
    println!("Environment:");
    println!("  STOREFRONT_CONFIG      Config file path, used when --config is absent");
    println!("  STOREFRONT_STORE_NAME  Overrides [store] name");
    println!("  RUST_LOG               Log filter (default: warn,storefront=info)");
}

/// Runs the storefront against the process's stdin and stdout.
pub fn run() -> AppResult<()> {
    init_tracing();

    let args = parse_args(std::env::args().skip(1));
    if args.help {
        print_help();
        return Ok(());
    }

    let config = StorefrontConfig::load(args.config)?;
    let store = seed::build_store(&config)?;
    info!(
        store = %config.store.name,
        products = store.len(),
        "Storefront ready"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(&store, &config.store.name, stdin.lock(), stdout.lock()).run()?;

    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Every purchase and order step
/// - `RUST_LOG=storefront_core=debug` - Core crate only
/// - Default: warnings, plus info from the app
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,storefront=info,storefront_core=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse_args(args(&[])), CliArgs::default());
    }

    #[test]
    fn test_parse_config_path() {
        let parsed = parse_args(args(&["--config", "/tmp/shop.toml"]));
        assert_eq!(parsed.config, Some(PathBuf::from("/tmp/shop.toml")));
        assert!(!parsed.help);

        let parsed = parse_args(args(&["-c", "shop.toml", "-h"]));
        assert_eq!(parsed.config, Some(PathBuf::from("shop.toml")));
        assert!(parsed.help);
    }

    #[test]
    fn test_parse_ignores_unknown_and_dangling() {
        let parsed = parse_args(args(&["--verbose", "--config"]));
        assert_eq!(parsed, CliArgs::default());
    }
}
