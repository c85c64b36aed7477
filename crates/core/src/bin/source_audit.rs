// crates/core/src/bin/source_audit.rs
//! Resolve RAG source strings from the command line.
//!
//! Useful for auditing how the deployed rule tables classify real chunk
//! sources, and for dry-running a candidate config file before shipping it:
//!
//! ```text
//! source-audit "guides/who-guide.pdf/page_15" "blood in stool"
//! cut -f3 chunks.tsv | source-audit --rules rules.toml --json
//! ```

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use chatchw_view_core::{ResolverConfig, SourceResolver};

#[derive(Parser)]
#[command(
    name = "source-audit",
    about = "Resolve RAG source strings to document locations"
)]
struct Args {
    /// Source strings to resolve; reads one per line from stdin when empty.
    sources: Vec<String>,

    /// Resolver config file (.json or .toml); defaults to the shipped
    /// who-guide table.
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Emit one JSON object per input instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let resolver = match &args.rules {
        Some(path) => {
            let config = ResolverConfig::load(path)
                .with_context(|| format!("failed to load rules from {}", path.display()))?;
            SourceResolver::new(config).context("invalid resolver config")?
        }
        None => SourceResolver::who_guide(),
    };
    tracing::debug!(
        default = %resolver.config().default_document,
        phrases = resolver.config().phrase_pages.len(),
        rules = resolver.config().topic_rules.len(),
        "resolver ready"
    );

    if args.sources.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read stdin")?;
            audit_one(&resolver, &line, args.json)?;
        }
    } else {
        for source in &args.sources {
            audit_one(&resolver, source, args.json)?;
        }
    }

    Ok(())
}

fn audit_one(resolver: &SourceResolver, source: &str, json: bool) -> Result<()> {
    let location = resolver.resolve(source);

    if json {
        let row = serde_json::json!({
            "source": source,
            "location": location,
            "displayName": resolver.display_name(source),
            "viewerLink": resolver.viewer_link(source),
        });
        println!("{row}");
        return Ok(());
    }

    println!("{source}");
    println!("  display: {}", resolver.display_name(source));
    match resolver.viewer_link(source) {
        Some(link) => println!("  link:    {link}"),
        None => println!("  link:    (unresolved)"),
    }
    Ok(())
}
