use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use client_core::{
    ArtworkSource, Clipboard, FileArtworkSource, HttpArtworkSource, HttpRandomImageSource,
    PhotoCard, RandomImageCard, ReactionLedger, UrlSync,
};
use storage::{default_user_database_url, prepare_database_url, KeyValueStore, Storage};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

mod clipboard;
mod render;

use clipboard::SystemClipboard;
use render::{render_card, render_image, Gesture, HELP};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Variant {
    Artworks,
    Random,
}

#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the artwork endpoint server.
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    server_url: String,
    #[arg(long, default_value = "basquiat")]
    catalog: String,
    /// Read the catalog from a local data file instead of the server.
    #[arg(long)]
    data_file: Option<PathBuf>,
    /// Page address the card lives on; `?photo=` seeds the start position.
    #[arg(long, default_value = "http://localhost:8080/")]
    page_url: String,
    #[arg(long)]
    database_url: Option<String>,
    #[arg(long, value_enum, default_value_t = Variant::Artworks)]
    variant: Variant,
    #[arg(long)]
    random_api_url: Option<String>,
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

impl Args {
    fn raw_database_url(&self) -> String {
        self.database_url
            .clone()
            .unwrap_or_else(default_user_database_url)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let database_url = prepare_database_url(&args.raw_database_url())?;
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(%database_url, %error, "failed to open reaction store");
        error
    })?;
    let store: Arc<dyn KeyValueStore> = Arc::new(storage);
    let clipboard: Arc<dyn Clipboard> = Arc::new(SystemClipboard);
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout_secs))
        .build()
        .context("failed to build HTTP client")?;

    match args.variant {
        Variant::Artworks => {
            let source: Arc<dyn ArtworkSource> = match &args.data_file {
                Some(path) => Arc::new(FileArtworkSource::new(path)),
                None => {
                    let url = format!(
                        "{}/api/{}",
                        args.server_url.trim_end_matches('/'),
                        args.catalog
                    );
                    Arc::new(HttpArtworkSource::with_client(http, url))
                }
            };
            let url_sync = UrlSync::parse(&args.page_url)
                .with_context(|| format!("invalid page url '{}'", args.page_url))?;
            let card = PhotoCard::new(
                source,
                ReactionLedger::for_artworks(store),
                url_sync,
                clipboard,
            );
            run_artworks(card).await
        }
        Variant::Random => {
            let Some(url) = args.random_api_url else {
                bail!("--random-api-url is required for the random variant");
            };
            let card = RandomImageCard::new(
                Arc::new(HttpRandomImageSource::with_client(http, url)),
                ReactionLedger::for_images(store),
                clipboard,
            );
            run_random(card).await
        }
    }
}

async fn run_artworks(mut card: PhotoCard) -> Result<()> {
    println!("{}", render_card(&card.view().await));
    let phase = card.load().await;
    info!(?phase, location = %card.location(), "card ready");
    println!("{}\n{HELP}", render_card(&card.view().await));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(gesture) = Gesture::parse(&line) else {
            println!("{HELP}");
            continue;
        };
        match gesture {
            Gesture::Quit => break,
            Gesture::Help => {
                println!("{HELP}");
                continue;
            }
            Gesture::Next => {
                card.next();
            }
            Gesture::Previous => {
                card.previous();
            }
            Gesture::Like => {
                card.like().await;
            }
            Gesture::Dislike => {
                card.dislike().await;
            }
            Gesture::Share => {
                if let Some(outcome) = card.share() {
                    println!("{}", outcome.confirmation());
                }
            }
            Gesture::Show => {}
        }
        println!("{}\n({})", render_card(&card.view().await), card.location());
    }
    Ok(())
}

async fn run_random(mut card: RandomImageCard) -> Result<()> {
    println!("{}", render_image(&card.view().await));
    card.load().await;
    println!("{}\n{HELP}", render_image(&card.view().await));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(gesture) = Gesture::parse(&line) else {
            println!("{HELP}");
            continue;
        };
        match gesture {
            Gesture::Quit => break,
            Gesture::Help => {
                println!("{HELP}");
                continue;
            }
            Gesture::Next => {
                card.next().await;
            }
            Gesture::Previous => {
                println!("no previous image");
                continue;
            }
            Gesture::Like => {
                card.like().await;
            }
            Gesture::Dislike => {
                card.dislike().await;
            }
            Gesture::Share => {
                if let Some(outcome) = card.share() {
                    println!("{}", outcome.confirmation());
                }
            }
            Gesture::Show => {}
        }
        println!("{}", render_image(&card.view().await));
    }
    Ok(())
}
