mod catalog_cmd;
mod config;
mod history_cmd;
mod plan_cmd;
#[cfg(test)]
mod test_util;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;

use weekmenu_core::{Catalog, Session, load_catalog};
use weekmenu_store::config::LogConfig;
use weekmenu_store::log::MenuLog;

use config::WeekmenuConfig;

#[derive(Parser)]
#[command(name = "weekmenu", about = "Weekly meal planner and shopping list builder")]
struct Cli {
    /// Recipe catalog file (overrides WEEKMENU_CATALOG env var)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Recorded-menus log file (overrides WEEKMENU_LOG env var)
    #[arg(long, global = true)]
    log: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a weekmenu config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Plan a week interactively, reading commands from stdin
    Plan {
        /// Start from an empty menu instead of a random one
        #[arg(long)]
        empty: bool,
        /// Seed for the random generator
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print one random weekly menu without recording it
    Random {
        /// Seed for the random generator
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List recorded menus
    History {
        /// Show only the most recent N entries
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print the shopping list for a recorded menu
    Shop {
        /// Entry number from `weekmenu history` (defaults to the latest)
        #[arg(long)]
        entry: Option<usize>,
    },
    /// List the recipes every slot accepts
    Options,
    /// Print shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

fn cmd_init(cli_catalog: Option<&Path>, cli_log: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        catalog: config::CatalogSection {
            path: cli_catalog
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CATALOG_PATH)),
        },
        log: config::LogSection {
            path: cli_log
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(LogConfig::DEFAULT_PATH)),
        },
    };

    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  catalog.path = {}", cfg.catalog.path.display());
    println!("  log.path = {}", cfg.log.path.display());
    Ok(())
}

fn open_catalog(resolved: &WeekmenuConfig) -> anyhow::Result<Catalog> {
    load_catalog(&resolved.catalog_path)
        .with_context(|| format!("cannot load recipe catalog {}", resolved.catalog_path.display()))
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let catalog_flag = cli.catalog.as_deref();
    let log_flag = cli.log.as_deref();

    match cli.command {
        Commands::Init { force } => cmd_init(catalog_flag, log_flag, force),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "weekmenu", &mut std::io::stdout());
            Ok(())
        }
        Commands::Plan { empty, seed } => {
            let resolved = WeekmenuConfig::resolve(catalog_flag, log_flag)?;
            let catalog = open_catalog(&resolved)?;
            let log = MenuLog::new(resolved.log_config);
            let mut rng = rng_from(seed);

            let mut session = if empty {
                Session::new(catalog)
            } else {
                Session::randomized(catalog, &mut rng)?
            };

            let stdin = std::io::stdin();
            plan_cmd::run_plan(
                &mut session,
                &log,
                &mut rng,
                stdin.lock(),
                &mut std::io::stdout().lock(),
            )
        }
        Commands::Random { seed } => {
            let resolved = WeekmenuConfig::resolve(catalog_flag, log_flag)?;
            let catalog = open_catalog(&resolved)?;
            catalog_cmd::run_random(&catalog, &mut rng_from(seed), &mut std::io::stdout().lock())
        }
        Commands::History { limit } => {
            let resolved = WeekmenuConfig::resolve(catalog_flag, log_flag)?;
            let log = MenuLog::new(resolved.log_config);
            history_cmd::run_history(&log, limit, &mut std::io::stdout().lock())
        }
        Commands::Shop { entry } => {
            let resolved = WeekmenuConfig::resolve(catalog_flag, log_flag)?;
            let catalog = open_catalog(&resolved)?;
            let log = MenuLog::new(resolved.log_config);
            history_cmd::run_shop(&log, &catalog, entry, &mut std::io::stdout().lock())
        }
        Commands::Options => {
            let resolved = WeekmenuConfig::resolve(catalog_flag, log_flag)?;
            let catalog = open_catalog(&resolved)?;
            catalog_cmd::run_options(&catalog, &mut std::io::stdout().lock())
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
