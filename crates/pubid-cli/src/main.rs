//! pubid CLI
//!
//! Command-line interface for public identifier resolution

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pubid_core::errors::{ExError, ExErrorKind};
use pubid_core::logging_facility;
use pubid_core::ResolverConfig;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "pubid")]
#[command(about = "pubid - Resolve public identifiers to canonical keys", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (missing file means defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite store path (overrides `database` in the config)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve an identifier to a canonical key
    Resolve(commands::resolve::ResolveArgs),
    /// Print the short code derived from a canonical key
    ShortCode(commands::short_code::ShortCodeArgs),
    /// Print the short link for a canonical key
    Link(commands::short_code::LinkArgs),
    /// Seed import operations
    Seed(commands::seed::SeedArgs),
    /// Run only the fallback scan (backfill and repair diagnostics)
    Scan(commands::scan::ScanArgs),
}

/// Settings shared by every command
pub struct Env {
    pub config: ResolverConfig,
    pub db_path: PathBuf,
}

impl Env {
    fn load(config: Option<PathBuf>, db: Option<PathBuf>) -> Result<Self, ExError> {
        let config = match config {
            Some(path) => ResolverConfig::load(&path)?,
            None => ResolverConfig::default(),
        };
        let db_path = db.unwrap_or_else(|| config.database.clone());
        Ok(Self { config, db_path })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli).await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let env = Env::load(cli.config, cli.db)?;
    logging_facility::init(env.config.log_profile);

    match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(&env, args).await,
        Commands::ShortCode(args) => commands::short_code::execute_short_code(args),
        Commands::Link(args) => commands::short_code::execute_link(&env, args),
        Commands::Seed(args) => commands::seed::execute(&env, args),
        Commands::Scan(args) => commands::scan::execute(&env, args).await,
    }
}

/// Process exit status for a failed command
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<ExError>().map(ExError::kind) {
        Some(ExErrorKind::NotFound) => 2,
        Some(ExErrorKind::StoreUnavailable | ExErrorKind::Persistence) => 3,
        Some(ExErrorKind::AmbiguousMatch) => 4,
        _ => 1,
    }
}
