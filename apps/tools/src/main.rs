use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{ReactionLedger, ARTWORK_REACTIONS_KEY};
use shared::protocol::ArtworkCatalog;
use storage::{default_user_database_url, prepare_database_url, Storage};

mod validate;

#[derive(Parser, Debug)]
struct Cli {
    /// Defaults to the store the photo card front end writes.
    #[arg(long)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Inspect or reset a reaction ledger.
    Reactions {
        #[command(subcommand)]
        action: ReactionsAction,
    },
    /// Check an artwork data file before serving it.
    ValidateData { path: PathBuf },
}

#[derive(Subcommand, Debug)]
enum ReactionsAction {
    List {
        #[arg(long, default_value = ARTWORK_REACTIONS_KEY)]
        key: String,
    },
    Clear {
        #[arg(long, default_value = ARTWORK_REACTIONS_KEY)]
        key: String,
    },
}

impl Cli {
    fn raw_database_url(&self) -> String {
        self.database_url
            .clone()
            .unwrap_or_else(default_user_database_url)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let raw_database_url = cli.raw_database_url();
    match cli.command {
        Command::Reactions { action } => {
            let database_url = prepare_database_url(&raw_database_url)?;
            let storage = Storage::new(&database_url).await?;
            match action {
                ReactionsAction::List { key } => list_reactions(storage, key).await?,
                ReactionsAction::Clear { key } => {
                    ReactionLedger::new(Arc::new(storage), key.as_str())
                        .clear()
                        .await?;
                    println!("cleared ledger '{key}'");
                }
            }
        }
        Command::ValidateData { path } => validate_data(&path).await?,
    }

    Ok(())
}

async fn list_reactions(storage: Storage, key: String) -> Result<()> {
    let updated_at = storage
        .list_items()
        .await?
        .into_iter()
        .find(|item| item.key == key)
        .map(|item| item.updated_at);
    let Some(updated_at) = updated_at else {
        println!("ledger '{key}' is empty");
        return Ok(());
    };

    let entries = ReactionLedger::new(Arc::new(storage), key.as_str())
        .entries()
        .await;
    println!(
        "ledger '{key}': {} entries, updated {}",
        entries.len(),
        updated_at.to_rfc3339()
    );
    for (image, reaction) in entries {
        println!("{}\t{image}", reaction.as_str());
    }
    Ok(())
}

async fn validate_data(path: &Path) -> Result<()> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    let catalog: ArtworkCatalog = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse '{}'", path.display()))?;

    let report = validate::inspect(&catalog);
    println!("{} artworks in '{}'", report.total, path.display());
    for (id, positions) in &report.duplicate_ids {
        println!("duplicate id '{id}' at positions {positions:?}");
    }
    for position in &report.missing_image {
        println!("artwork at position {position} has no image");
    }
    if !report.without_id.is_empty() {
        println!(
            "{} artworks have no id and are addressed by position",
            report.without_id.len()
        );
    }

    if !report.is_clean() {
        bail!("'{}' failed validation", path.display());
    }
    println!("ok");
    Ok(())
}
