//! Mirrors the current photo into the page's `photo` query parameter.
//!
//! Publishing rewrites the location in place (history replace, never push),
//! so browsing artworks does not grow the back/forward stack.

use shared::domain::PhotoSelector;
use url::Url;

pub const PHOTO_PARAM: &str = "photo";

#[derive(Debug, Clone)]
pub struct UrlSync {
    location: Url,
}

impl UrlSync {
    pub fn new(location: Url) -> Self {
        Self { location }
    }

    pub fn parse(location: &str) -> Result<Self, url::ParseError> {
        Url::parse(location).map(Self::new)
    }

    pub fn location(&self) -> &Url {
        &self.location
    }

    /// Raw `photo` value the page was opened with, if any.
    pub fn read_initial_selector(&self) -> Option<String> {
        self.location
            .query_pairs()
            .find(|(key, _)| key == PHOTO_PARAM)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.trim().is_empty())
    }

    /// Sets `photo` to `selector`, or drops it for `None`. Other parameters
    /// keep their order; an existing `photo` keeps its position.
    pub fn publish(&mut self, selector: Option<&PhotoSelector>) {
        let value = selector.map(ToString::to_string);
        let mut replaced = false;
        let mut pairs: Vec<(String, String)> = Vec::new();

        for (key, current) in self.location.query_pairs() {
            if key != PHOTO_PARAM {
                pairs.push((key.into_owned(), current.into_owned()));
                continue;
            }
            if let (Some(value), false) = (&value, replaced) {
                pairs.push((PHOTO_PARAM.to_string(), value.clone()));
                replaced = true;
            }
        }
        if let (Some(value), false) = (value, replaced) {
            pairs.push((PHOTO_PARAM.to_string(), value));
        }

        if pairs.is_empty() {
            self.location.set_query(None);
        } else {
            self.location.query_pairs_mut().clear().extend_pairs(pairs);
        }
    }

    /// Publishes `selector` and returns the link to hand out.
    pub fn share(&mut self, selector: &PhotoSelector) -> String {
        self.publish(Some(selector));
        self.location.to_string()
    }
}
