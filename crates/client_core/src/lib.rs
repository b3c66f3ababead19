use std::path::PathBuf;

use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    error::ApiException,
    protocol::{ArtworkCatalog, ErrorBody, RandomImage},
};
use thiserror::Error;
use tracing::debug;

pub mod card;
pub mod ledger;
pub mod pagination;
pub mod random_card;
pub mod url_sync;

pub use card::{ArtworkView, CardPhase, CardView, PhotoCard};
pub use ledger::{ReactionLedger, ARTWORK_REACTIONS_KEY, IMAGE_REACTIONS_KEY};
pub use pagination::PaginationController;
pub use random_card::{ImageCardView, RandomImageCard};
pub use url_sync::{UrlSync, PHOTO_PARAM};

pub const SHARE_CONFIRMATION: &str = "Link copied to clipboard!";

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("endpoint {url} answered with an error: {source}")]
    Endpoint {
        url: String,
        #[source]
        source: ApiException,
    },
    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read catalog file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog file {path}: {source}")]
    FileDecode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0} is unavailable")]
    Unavailable(&'static str),
}

#[async_trait]
pub trait ArtworkSource: Send + Sync {
    async fn fetch_artworks(&self) -> Result<ArtworkCatalog, SourceError>;
}

#[async_trait]
pub trait RandomImageSource: Send + Sync {
    async fn fetch_image(&self) -> Result<RandomImage, SourceError>;
}

pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> anyhow::Result<()>;
}

pub struct MissingArtworkSource;

#[async_trait]
impl ArtworkSource for MissingArtworkSource {
    async fn fetch_artworks(&self) -> Result<ArtworkCatalog, SourceError> {
        Err(SourceError::Unavailable("artwork source"))
    }
}

pub struct MissingRandomImageSource;

#[async_trait]
impl RandomImageSource for MissingRandomImageSource {
    async fn fetch_image(&self) -> Result<RandomImage, SourceError> {
        Err(SourceError::Unavailable("random image source"))
    }
}

pub struct MissingClipboard;

impl Clipboard for MissingClipboard {
    fn write_text(&self, _text: &str) -> anyhow::Result<()> {
        Err(anyhow!("clipboard is unavailable"))
    }
}

/// Result of a share gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareOutcome {
    /// What was shared: a page URL or an image locator.
    pub url: String,
    pub copied: bool,
}

impl ShareOutcome {
    pub fn confirmation(&self) -> String {
        if self.copied {
            SHARE_CONFIRMATION.to_string()
        } else {
            format!("Copy this link: {}", self.url)
        }
    }
}

pub struct HttpArtworkSource {
    http: Client,
    url: String,
}

impl HttpArtworkSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(http: Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ArtworkSource for HttpArtworkSource {
    async fn fetch_artworks(&self) -> Result<ArtworkCatalog, SourceError> {
        let catalog: ArtworkCatalog = get_json(&self.http, &self.url).await?;
        debug!(url = %self.url, total = catalog.total_count(), "fetched artwork catalog");
        Ok(catalog)
    }
}

pub struct HttpRandomImageSource {
    http: Client,
    url: String,
}

impl HttpRandomImageSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(http: Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

#[async_trait]
impl RandomImageSource for HttpRandomImageSource {
    async fn fetch_image(&self) -> Result<RandomImage, SourceError> {
        get_json(&self.http, &self.url).await
    }
}

/// Reads the catalog straight from a data file, bypassing the endpoint.
pub struct FileArtworkSource {
    path: PathBuf,
}

impl FileArtworkSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ArtworkSource for FileArtworkSource {
    async fn fetch_artworks(&self) -> Result<ArtworkCatalog, SourceError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::File {
                path: self.path.clone(),
                source,
            })?;
        serde_json::from_str(&raw).map_err(|source| SourceError::FileDecode {
            path: self.path.clone(),
            source,
        })
    }
}

async fn get_json<T: DeserializeOwned>(http: &Client, url: &str) -> Result<T, SourceError> {
    let res = http
        .get(url)
        .send()
        .await
        .map_err(|source| SourceError::Request {
            url: url.to_string(),
            source,
        })?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|parsed| parsed.message().to_string())
            .unwrap_or_else(|_| body.trim().to_string());
        return Err(SourceError::Endpoint {
            url: url.to_string(),
            source: ApiException::from_status(status.as_u16(), message),
        });
    }

    res.json::<T>().await.map_err(|source| SourceError::Decode {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
