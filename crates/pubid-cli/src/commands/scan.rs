//! Scan command
//!
//! Usage: pubid scan <TYPE> <IDENTIFIER>
//!
//! Runs the fallback scan alone, skipping the probe. Useful to check what a
//! short code would match before backfilling a persisted index.

use std::sync::Arc;

use clap::Args;
use pubid_engine::Resolver;
use pubid_store::SqliteStore;

use crate::Env;

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Resource type, e.g. `event`
    pub resource_type: String,

    /// Identifier to match against every key of the type
    pub identifier: String,
}

/// Execute scan command
pub async fn execute(env: &Env, args: ScanArgs) -> anyhow::Result<()> {
    let store = SqliteStore::open_existing(&env.db_path)?;
    let resolver = Resolver::from_config(Arc::new(store), &env.config);

    match resolver
        .scan_only(&args.resource_type, &args.identifier)
        .await?
    {
        Some(m) => println!(
            "{}\t{} (scanned {})",
            m.key,
            m.rule.as_str(),
            m.scanned
        ),
        None => println!("no match for {}", args.identifier),
    }
    Ok(())
}
