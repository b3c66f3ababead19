use std::path::PathBuf;

use anyhow::{Context, Result};
use axum::http::{header, HeaderMap, HeaderValue};
use serde_json::Value;

pub const ALLOWED_ORIGIN: &str = "*";
pub const ALLOWED_METHODS: &str = "GET,OPTIONS,PATCH,DELETE,POST,PUT";
pub const ALLOWED_HEADERS: &str = "X-CSRF-Token, X-Requested-With, Accept, Accept-Version, Content-Length, Content-MD5, Content-Type, Date, X-Api-Version";

/// Catalog name that is always routed, whatever the configured name is.
pub const GENERIC_CATALOG_ROUTE: &str = "artworks";

#[derive(Clone)]
pub struct CatalogContext {
    pub data_path: PathBuf,
    pub catalog_name: String,
    pub cache_control: HeaderValue,
}

impl CatalogContext {
    pub fn new(
        data_path: impl Into<PathBuf>,
        catalog_name: impl Into<String>,
        cache_control: &str,
    ) -> Result<Self> {
        let cache_control = HeaderValue::from_str(cache_control)
            .with_context(|| format!("invalid cache-control value '{cache_control}'"))?;
        Ok(Self {
            data_path: data_path.into(),
            catalog_name: catalog_name.into(),
            cache_control,
        })
    }

    pub fn serves(&self, requested: &str) -> bool {
        requested == self.catalog_name || requested == GENERIC_CATALOG_ROUTE
    }

    /// File name reported in failure bodies.
    pub fn file_label(&self) -> String {
        format!("{}.json", self.catalog_name)
    }
}

/// Reads and parses the data file on every call; the document is passed
/// through as-is.
pub async fn read_catalog(ctx: &CatalogContext) -> Result<Value> {
    let raw = tokio::fs::read_to_string(&ctx.data_path)
        .await
        .with_context(|| format!("failed to read '{}'", ctx.data_path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse '{}'", ctx.data_path.display()))
}

pub fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOWED_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    headers
}

pub fn catalog_headers(ctx: &CatalogContext) -> HeaderMap {
    let mut headers = cors_headers();
    headers.insert(header::CACHE_CONTROL, ctx.cache_control.clone());
    headers
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
