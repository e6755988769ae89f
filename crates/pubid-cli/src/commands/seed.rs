//! Seed import command
//!
//! Usage: pubid seed import <PATH>

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use pubid_store::seed::import_seed;
use pubid_store::SqliteStore;

use crate::Env;

#[derive(Debug, Args)]
pub struct SeedArgs {
    #[command(subcommand)]
    pub command: SeedCommand,
}

#[derive(Debug, Subcommand)]
pub enum SeedCommand {
    /// Import a seed file into the store
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to a seed file (YAML or JSON) or a directory of them
    pub path: PathBuf,
}

/// Execute seed command
pub fn execute(env: &Env, args: SeedArgs) -> anyhow::Result<()> {
    match args.command {
        SeedCommand::Import(import_args) => execute_import(env, import_args),
    }
}

fn execute_import(env: &Env, args: ImportArgs) -> anyhow::Result<()> {
    let store = SqliteStore::open(&env.db_path)?;

    let files = if args.path.is_dir() {
        seed_files(&args.path)?
    } else {
        vec![args.path]
    };

    for seed_file in files {
        println!("Importing {}...", seed_file.display());
        let report = import_seed(&store, &seed_file)?;
        println!(
            "✓ Imported {} documents (digest: {})",
            report.document_count, report.seed_digest
        );
    }

    Ok(())
}

/// Seed files in `dir`, sorted by path for a deterministic import order
fn seed_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .map(|ext| ext == "yaml" || ext == "yml" || ext == "json")
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}
