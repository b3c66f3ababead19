use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque artwork identifier.
///
/// Catalog files carry ids as JSON numbers or strings; both decode to the
/// same textual form so `20` and `"20"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ArtworkId(pub String);

impl ArtworkId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for ArtworkId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for ArtworkId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseScalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

impl LooseScalar {
    fn into_text(self) -> String {
        match self {
            LooseScalar::Text(text) => text,
            LooseScalar::Integer(n) => n.to_string(),
            LooseScalar::Float(n) => n.to_string(),
            LooseScalar::Flag(flag) => flag.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for ArtworkId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        LooseScalar::deserialize(deserializer).map(|raw| ArtworkId(raw.into_text()))
    }
}

fn display_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<LooseScalar>::deserialize(deserializer)?
        .map(LooseScalar::into_text)
        .unwrap_or_default())
}

/// One entry of the artwork catalog. Read-only for the widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtworkRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ArtworkId>,
    /// Display source and reaction ledger key.
    #[serde(default, deserialize_with = "display_text")]
    pub image: String,
    #[serde(default, deserialize_with = "display_text")]
    pub title: String,
    #[serde(default, deserialize_with = "display_text")]
    pub artist: String,
    #[serde(default, deserialize_with = "display_text")]
    pub year: String,
    #[serde(default, deserialize_with = "display_text")]
    pub description: String,
}

impl ArtworkRecord {
    /// Id usable in a URL; blank ids count as missing.
    pub fn url_id(&self) -> Option<&ArtworkId> {
        self.id.as_ref().filter(|id| !id.0.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reaction {
    Like,
    Dislike,
}

impl Reaction {
    pub fn as_str(self) -> &'static str {
        match self {
            Reaction::Like => "like",
            Reaction::Dislike => "dislike",
        }
    }
}

/// What the `photo` query parameter points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSelector {
    Id(ArtworkId),
    /// 1-based position, used when the record has no id.
    Index(usize),
}

impl fmt::Display for PhotoSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoSelector::Id(id) => write!(f, "{id}"),
            PhotoSelector::Index(index) => write!(f, "{index}"),
        }
    }
}
