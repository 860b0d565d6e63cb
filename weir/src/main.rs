mod runner;

use clap::{Parser, Subcommand};
use std::error::Error as _;
use std::path::{Path, PathBuf};
use weir_core::conf::WeirConfig;
use weir_core::logging::init_logging;

const DEFAULT_CONFIG: &str = "config/weir.toml";

#[derive(Parser, Debug)]
#[command(
    name = "weir",
    version,
    about = "Weir: Varnish transaction log aggregator"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a config file and exit
    Check {
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },

    /// Tail the log feed and emit transaction events (default)
    Run {
        /// Path to the Weir config file
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Check { config }) => check(&config),

        Some(Command::Run { config }) => run(&config),

        None => run(Path::new(DEFAULT_CONFIG)),
    }
}

fn run(config: &Path) {
    init_logging();

    let cfg = WeirConfig::from_file(config).expect("Failed to load Weir config");

    runner::run(cfg).expect("Failed to run Weir harvest");
}

fn check(config: &Path) {
    match WeirConfig::from_file(config) {
        Ok(cfg) => {
            println!("✔ Config loaded successfully");
            println!(
                "✔ feed: {}",
                cfg.path
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<stdin>".to_string())
            );
            println!("✔ directions: client={} backend={}", cfg.client, cfg.backend);
            match cfg.timeout {
                Some(timeout) => println!("✔ tail timeout: {timeout:?}"),
                None => println!("✔ tail timeout: none (wait forever)"),
            }
        }
        Err(err) => {
            eprintln!("✘ {err}");
            let mut cause = err.source();
            while let Some(source) = cause {
                eprintln!("  caused by: {source}");
                cause = source.source();
            }
            std::process::exit(1);
        }
    }
}
