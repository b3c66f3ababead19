//! Durable image -> reaction map.
//!
//! The whole map lives under one storage key as a JSON object. Every query
//! reads it back from storage and every toggle writes it immediately, so two
//! ledgers over the same store always agree after a write (last writer wins).

use std::{collections::BTreeMap, sync::Arc};

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use shared::domain::Reaction;
use storage::KeyValueStore;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub const ARTWORK_REACTIONS_KEY: &str = "reactions";
pub const IMAGE_REACTIONS_KEY: &str = "imageReactions";

#[derive(Clone)]
pub struct ReactionLedger {
    store: Arc<dyn KeyValueStore>,
    storage_key: String,
    write_guard: Arc<Mutex<()>>,
}

impl ReactionLedger {
    pub fn new(store: Arc<dyn KeyValueStore>, storage_key: impl Into<String>) -> Self {
        Self {
            store,
            storage_key: storage_key.into(),
            write_guard: Arc::new(Mutex::new(())),
        }
    }

    pub fn for_artworks(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, ARTWORK_REACTIONS_KEY)
    }

    pub fn for_images(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, IMAGE_REACTIONS_KEY)
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub async fn get(&self, image: &str) -> Option<Reaction> {
        self.load_raw().await.get(image).and_then(decode_reaction)
    }

    /// Like, or clear an existing like. Replaces a dislike.
    pub async fn toggle_like(&self, image: &str) -> Result<Option<Reaction>> {
        self.toggle(image, Reaction::Like).await
    }

    /// Dislike, or clear an existing dislike. Replaces a like.
    pub async fn toggle_dislike(&self, image: &str) -> Result<Option<Reaction>> {
        self.toggle(image, Reaction::Dislike).await
    }

    /// Every readable entry; malformed ones are skipped.
    pub async fn entries(&self) -> BTreeMap<String, Reaction> {
        self.load_raw()
            .await
            .iter()
            .filter_map(|(image, value)| decode_reaction(value).map(|r| (image.clone(), r)))
            .collect()
    }

    pub async fn clear(&self) -> Result<()> {
        let _guard = self.write_guard.lock().await;
        self.store
            .remove_item(&self.storage_key)
            .await
            .with_context(|| format!("failed to clear ledger '{}'", self.storage_key))
    }

    async fn toggle(&self, image: &str, reaction: Reaction) -> Result<Option<Reaction>> {
        let _guard = self.write_guard.lock().await;
        let mut raw = self.load_raw().await;

        let next = if raw.get(image).and_then(decode_reaction) == Some(reaction) {
            raw.remove(image);
            None
        } else {
            raw.insert(image.to_string(), Value::from(reaction.as_str()));
            Some(reaction)
        };

        let encoded = serde_json::to_string(&raw).context("failed to encode ledger")?;
        self.store
            .set_item(&self.storage_key, &encoded)
            .await
            .with_context(|| format!("failed to persist ledger '{}'", self.storage_key))?;

        debug!(key = %self.storage_key, image, reaction = ?next, "reaction toggled");
        Ok(next)
    }

    /// Missing, unreadable or non-object values read as an empty map.
    async fn load_raw(&self) -> Map<String, Value> {
        let stored = match self.store.get_item(&self.storage_key).await {
            Ok(stored) => stored,
            Err(error) => {
                warn!(key = %self.storage_key, %error, "reaction ledger unreadable; treating as empty");
                return Map::new();
            }
        };

        let Some(stored) = stored else {
            return Map::new();
        };

        match serde_json::from_str::<Value>(&stored) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                warn!(key = %self.storage_key, "reaction ledger is malformed; treating as empty");
                Map::new()
            }
        }
    }
}

/// Tags, plus the older boolean form (`true` like, `false` dislike).
fn decode_reaction(value: &Value) -> Option<Reaction> {
    match value {
        Value::String(tag) if tag == "like" => Some(Reaction::Like),
        Value::String(tag) if tag == "dislike" => Some(Reaction::Dislike),
        Value::Bool(true) => Some(Reaction::Like),
        Value::Bool(false) => Some(Reaction::Dislike),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::MemoryStore;

    fn ledger() -> (ReactionLedger, MemoryStore) {
        let store = MemoryStore::new();
        (ReactionLedger::for_artworks(Arc::new(store.clone())), store)
    }

    #[tokio::test]
    async fn empty_ledger_reads_neutral() {
        let (ledger, _) = ledger();
        assert_eq!(ledger.get("img.png").await, None);
    }

    #[tokio::test]
    async fn toggle_like_twice_returns_to_neutral() {
        let (ledger, _) = ledger();
        assert_eq!(
            ledger.toggle_like("img.png").await.expect("like"),
            Some(Reaction::Like)
        );
        assert_eq!(ledger.get("img.png").await, Some(Reaction::Like));

        assert_eq!(ledger.toggle_like("img.png").await.expect("unlike"), None);
        assert_eq!(ledger.get("img.png").await, None);
    }

    #[tokio::test]
    async fn dislike_overwrites_like_and_back() {
        let (ledger, _) = ledger();
        ledger.toggle_like("img.png").await.expect("like");
        assert_eq!(
            ledger.toggle_dislike("img.png").await.expect("dislike"),
            Some(Reaction::Dislike)
        );
        assert_eq!(ledger.get("img.png").await, Some(Reaction::Dislike));

        assert_eq!(
            ledger.toggle_like("img.png").await.expect("like"),
            Some(Reaction::Like)
        );
        assert_eq!(ledger.get("img.png").await, Some(Reaction::Like));
    }

    #[tokio::test]
    async fn toggling_one_key_leaves_others_untouched() {
        let (ledger, _) = ledger();
        ledger.toggle_dislike("other.png").await.expect("dislike");

        ledger.toggle_like("img.png").await.expect("like");
        ledger.toggle_like("img.png").await.expect("unlike");

        assert_eq!(ledger.get("other.png").await, Some(Reaction::Dislike));
        assert_eq!(ledger.entries().await.len(), 1);
    }

    #[tokio::test]
    async fn writes_tag_schema_to_storage() {
        let (ledger, store) = ledger();
        ledger.toggle_like("img.png").await.expect("like");

        let raw = store
            .get_item(ARTWORK_REACTIONS_KEY)
            .await
            .expect("read")
            .expect("stored");
        let parsed: Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(parsed, serde_json::json!({ "img.png": "like" }));
    }

    #[tokio::test]
    async fn malformed_storage_reads_as_empty() {
        let (ledger, store) = ledger();
        store
            .set_item(ARTWORK_REACTIONS_KEY, "not json")
            .await
            .expect("write");
        assert_eq!(ledger.get("img.png").await, None);

        store
            .set_item(ARTWORK_REACTIONS_KEY, "[1, 2]")
            .await
            .expect("write");
        assert!(ledger.entries().await.is_empty());

        assert_eq!(
            ledger.toggle_like("img.png").await.expect("like"),
            Some(Reaction::Like)
        );
    }

    #[tokio::test]
    async fn legacy_boolean_entries_are_understood() {
        let store = MemoryStore::new();
        store
            .set_item(
                IMAGE_REACTIONS_KEY,
                r#"{"a.jpg": true, "b.jpg": false, "c.jpg": 3}"#,
            )
            .await
            .expect("write");
        let ledger = ReactionLedger::for_images(Arc::new(store));

        assert_eq!(ledger.get("a.jpg").await, Some(Reaction::Like));
        assert_eq!(ledger.get("b.jpg").await, Some(Reaction::Dislike));
        assert_eq!(ledger.get("c.jpg").await, None);

        assert_eq!(ledger.toggle_like("a.jpg").await.expect("unlike"), None);
    }

    #[tokio::test]
    async fn ledgers_over_one_store_see_each_others_writes() {
        let store = Arc::new(MemoryStore::new());
        let first = ReactionLedger::for_artworks(store.clone());
        let second = ReactionLedger::for_artworks(store);

        first.toggle_like("img.png").await.expect("like");
        assert_eq!(second.get("img.png").await, Some(Reaction::Like));
    }

    #[tokio::test]
    async fn artwork_and_image_ledgers_are_independent() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let artworks = ReactionLedger::for_artworks(store.clone());
        let images = ReactionLedger::for_images(store);

        artworks.toggle_like("img.png").await.expect("like");
        assert_eq!(images.get("img.png").await, None);
    }

    #[tokio::test]
    async fn clear_removes_every_entry() {
        let (ledger, _) = ledger();
        ledger.toggle_like("a.png").await.expect("like");
        ledger.toggle_dislike("b.png").await.expect("dislike");

        ledger.clear().await.expect("clear");
        assert!(ledger.entries().await.is_empty());
    }
}
