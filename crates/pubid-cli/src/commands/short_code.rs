//! Short code and link commands
//!
//! Usage:
//!   pubid short-code <KEY>
//!   pubid link <ROUTE> <KEY>

use clap::Args;
use pubid_core::{short_code, short_link};

use crate::Env;

#[derive(Debug, Args)]
pub struct ShortCodeArgs {
    /// Canonical key, published or draft
    pub key: String,
}

#[derive(Debug, Args)]
pub struct LinkArgs {
    /// Page route, e.g. `events`
    pub route: String,

    /// Canonical key, published or draft
    pub key: String,

    /// Origin to render against (default: `base_url` from the config)
    #[arg(long)]
    pub base_url: Option<String>,
}

/// Execute short-code command
pub fn execute_short_code(args: ShortCodeArgs) -> anyhow::Result<()> {
    println!("{}", short_code(&args.key));
    Ok(())
}

/// Execute link command
pub fn execute_link(env: &Env, args: LinkArgs) -> anyhow::Result<()> {
    let base = args.base_url.as_deref().unwrap_or(&env.config.base_url);
    println!("{}", short_link(base, &args.route, &args.key));
    Ok(())
}
