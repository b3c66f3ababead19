use serde::{Deserialize, Serialize};

use crate::{domain::ArtworkRecord, error::ApiError};

/// Body of the artwork endpoint. A missing `artworks` key reads as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtworkCatalog {
    #[serde(default)]
    pub artworks: Vec<ArtworkRecord>,
}

impl ArtworkCatalog {
    pub fn total_count(&self) -> usize {
        self.artworks.len()
    }
}

/// Body of the third-party single image endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomImage {
    pub image: String,
    #[serde(default)]
    pub link: String,
}

/// 500 body of the artwork endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlerFailure {
    pub error: String,
}

/// Any error body a catalog endpoint may answer with.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorBody {
    Api(ApiError),
    Handler(HandlerFailure),
}

impl ErrorBody {
    pub fn message(&self) -> &str {
        match self {
            ErrorBody::Api(error) => &error.message,
            ErrorBody::Handler(failure) => &failure.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_without_artworks_key_is_empty() {
        let catalog: ArtworkCatalog = serde_json::from_str("{}").expect("catalog");
        assert_eq!(catalog.total_count(), 0);
    }

    #[test]
    fn error_body_accepts_both_shapes() {
        let handler: ErrorBody =
            serde_json::from_str(r#"{"error":"Failed to read basquiat.json"}"#).expect("handler");
        assert_eq!(handler.message(), "Failed to read basquiat.json");

        let api: ErrorBody =
            serde_json::from_str(r#"{"code":"not_found","message":"unknown catalog"}"#)
                .expect("api");
        assert!(matches!(api, ErrorBody::Api(_)));
        assert_eq!(api.message(), "unknown catalog");
    }
}
