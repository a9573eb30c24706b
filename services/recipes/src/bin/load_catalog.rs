//! Loads the ingredient and tag catalogs from JSON files.
//!
//! # Usage
//!
//! ```bash
//! DATABASE_URL=postgres://... load-catalog --ingredients data/ingredients.json --tags data/tags.json
//! ```
//!
//! Rows that already exist are skipped, so the loader can be re-run.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sea_orm::Database;
use tracing::info;

use foodgram_core::tracing::init_tracing;
use foodgram_recipes::infra::catalog::{load_ingredients, load_tags, parse_ingredients, parse_tags};

#[derive(Parser)]
#[command(about = "Bulk-load the ingredient and tag catalogs")]
struct Args {
    /// JSON array of `{name, measurement_unit}` objects
    #[arg(long)]
    ingredients: PathBuf,

    /// JSON array of `{name, color, slug}` objects
    #[arg(long)]
    tags: Option<PathBuf>,

    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let raw = tokio::fs::read_to_string(&args.ingredients)
        .await
        .with_context(|| format!("cannot read {}", args.ingredients.display()))?;
    let ingredients = parse_ingredients(&raw)?;

    let tags = match &args.tags {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("cannot read {}", path.display()))?;
            parse_tags(&raw)?
        }
        None => Vec::new(),
    };

    let db = Database::connect(&args.database_url)
        .await
        .context("failed to connect to database")?;

    let inserted = load_ingredients(&db, &ingredients).await?;
    info!(
        total = ingredients.len(),
        inserted, "ingredient catalog loaded"
    );

    if !tags.is_empty() {
        let inserted = load_tags(&db, &tags).await?;
        info!(total = tags.len(), inserted, "tag catalog loaded");
    }
    Ok(())
}
