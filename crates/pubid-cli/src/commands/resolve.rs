//! Resolve command
//!
//! Usage: pubid resolve <TYPE> <IDENTIFIER>

use std::sync::Arc;

use clap::Args;
use pubid_engine::{Resolution, ResolvedVia, Resolver};
use pubid_store::SqliteStore;

use crate::Env;

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Resource type, e.g. `event`
    pub resource_type: String,

    /// External identifier from the URL
    pub identifier: String,
}

/// Execute resolve command
pub async fn execute(env: &Env, args: ResolveArgs) -> anyhow::Result<()> {
    let store = SqliteStore::open_existing(&env.db_path)?;
    let resolver = Resolver::from_config(Arc::new(store), &env.config);

    let resolution = resolver
        .resolve(&args.resource_type, &args.identifier)
        .await?;
    println!("{}", describe(&resolution));
    Ok(())
}

fn describe(resolution: &Resolution) -> String {
    let how = match resolution.via {
        ResolvedVia::Probe { candidate_index } => format!("probe #{}", candidate_index),
        ResolvedVia::Scan { rule, scanned } => {
            format!("scan {} after {} records", rule.as_str(), scanned)
        }
    };
    format!(
        "{}\t{} ({})",
        resolution.canonical_key, resolution.class, how
    )
}
