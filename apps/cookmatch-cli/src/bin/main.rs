use std::env;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cookmatch_core::catalog::Catalog;
use cookmatch_core::config::Config;
use cookmatch_core::{Candidate, EntityKind, EntityProfile, ListingRecord, ProviderRecord};
use cookmatch_query::RawParams;
use cookmatch_search::SearchEngine;

fn usage(prog: &str) -> ! {
    eprintln!("Usage: {} <providers|listings> [name=value ...]", prog);
    eprintln!("Example: {} listings q=curry cuisine=Thai excludeAllergens=peanut sort=price-asc", prog);
    std::process::exit(1)
}

fn parse_args() -> (EntityKind, RawParams) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() { usage(&prog); }
    let kind = args.remove(0).parse::<EntityKind>().unwrap_or_else(|e| { eprintln!("{}", e); usage(&prog) });
    let mut params = RawParams::new();
    for arg in &args {
        match RawParams::parse_pair(arg) {
            Some((name, value)) => { params.insert(name, value); }
            None => warn!(arg = %arg, "ignoring argument without '='"),
        }
    }
    (kind, params)
}

fn run<C>(catalog: Catalog, profile: EntityProfile, params: &RawParams) -> anyhow::Result<String>
where
    C: Candidate + Clone + Serialize + DeserializeOwned,
{
    let engine: SearchEngine<C, Catalog> = SearchEngine::with_profile(catalog, profile);
    let results = engine.query(params)?;
    info!(kind = %profile.kind, results = results.len(), "search complete");
    Ok(serde_json::to_string_pretty(&results)?)
}

fn main() -> anyhow::Result<()> {
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let (kind, params) = parse_args();
    let profile = config.search_settings()?.profile_for(kind)?;
    let catalog = Catalog::new(config.catalog_dir());
    info!(%kind, catalog = %catalog.root().display(), params = params.len(), "running search");

    let output = match kind {
        EntityKind::Provider => run::<ProviderRecord>(catalog, profile, &params)?,
        EntityKind::Listing => run::<ListingRecord>(catalog, profile, &params)?,
    };
    println!("{}", output);
    Ok(())
}
