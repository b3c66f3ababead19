//! The artwork card: pagination, reactions and URL sync driven by gestures.
//!
//! ```text
//! Loading --fetch ok, non-empty--> Ready(seeded index)
//! Loading --fetch ok, empty------> Empty
//! Loading --fetch failed---------> Empty
//! Ready(i) --next/previous-------> Ready(i')
//! ```
//! Nothing leaves `Empty`; a new card has to be built.

use std::sync::Arc;

use shared::domain::{ArtworkRecord, Reaction};
use tracing::{error, info, warn};
use url::Url;

use crate::{
    ledger::ReactionLedger, pagination::PaginationController, url_sync::UrlSync, ArtworkSource,
    Clipboard, ShareOutcome,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPhase {
    Loading,
    Ready { index: usize },
    Empty,
}

enum CardState {
    Loading,
    Ready(PaginationController),
    Empty,
}

/// What the presentation layer renders.
#[derive(Debug, Clone, PartialEq)]
pub enum CardView {
    Loading,
    Empty,
    Artwork(ArtworkView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtworkView {
    pub title: String,
    pub year: String,
    pub artist: String,
    pub image: String,
    pub description: String,
    pub position: usize,
    pub total: usize,
    pub reaction: Option<Reaction>,
    pub previous_disabled: bool,
    pub next_disabled: bool,
}

impl ArtworkView {
    pub fn heading(&self) -> String {
        if self.year.is_empty() {
            self.title.clone()
        } else {
            format!("{} ({})", self.title, self.year)
        }
    }

    pub fn position_label(&self) -> String {
        format!("{} of {}", self.position, self.total)
    }
}

pub struct PhotoCard {
    source: Arc<dyn ArtworkSource>,
    ledger: ReactionLedger,
    url_sync: UrlSync,
    clipboard: Arc<dyn Clipboard>,
    state: CardState,
}

impl PhotoCard {
    pub fn new(
        source: Arc<dyn ArtworkSource>,
        ledger: ReactionLedger,
        url_sync: UrlSync,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            source,
            ledger,
            url_sync,
            clipboard,
            state: CardState::Loading,
        }
    }

    pub fn phase(&self) -> CardPhase {
        match &self.state {
            CardState::Loading => CardPhase::Loading,
            CardState::Ready(controller) => CardPhase::Ready {
                index: controller.current_index().unwrap_or(1),
            },
            CardState::Empty => CardPhase::Empty,
        }
    }

    pub fn location(&self) -> &Url {
        self.url_sync.location()
    }

    pub fn current_artwork(&self) -> Option<&ArtworkRecord> {
        match &self.state {
            CardState::Ready(controller) => controller.current_artwork(),
            CardState::Loading | CardState::Empty => None,
        }
    }

    /// Fetches the catalog once. Calls after the first are no-ops.
    pub async fn load(&mut self) -> CardPhase {
        if !matches!(self.state, CardState::Loading) {
            return self.phase();
        }

        self.state = match self.source.fetch_artworks().await {
            Ok(catalog) if catalog.artworks.is_empty() => {
                info!("artwork catalog is empty");
                CardState::Empty
            }
            Ok(catalog) => {
                let requested = self.url_sync.read_initial_selector();
                let controller =
                    PaginationController::initialize(catalog.artworks, requested.as_deref());
                info!(
                    total = controller.total_count(),
                    index = ?controller.current_index(),
                    requested = ?requested,
                    "artwork catalog loaded"
                );
                self.url_sync.publish(controller.current_selector().as_ref());
                CardState::Ready(controller)
            }
            Err(error) => {
                error!(%error, "error loading artworks");
                CardState::Empty
            }
        };
        self.phase()
    }

    pub fn next(&mut self) -> bool {
        self.navigate(PaginationController::next)
    }

    pub fn previous(&mut self) -> bool {
        self.navigate(PaginationController::previous)
    }

    fn navigate(&mut self, step: fn(&mut PaginationController) -> bool) -> bool {
        let CardState::Ready(controller) = &mut self.state else {
            return false;
        };
        if !step(controller) {
            return false;
        }
        self.url_sync.publish(controller.current_selector().as_ref());
        true
    }

    /// New reaction for the current artwork. `None` without an artwork.
    pub async fn like(&mut self) -> Option<Reaction> {
        self.react(Reaction::Like).await
    }

    pub async fn dislike(&mut self) -> Option<Reaction> {
        self.react(Reaction::Dislike).await
    }

    async fn react(&mut self, reaction: Reaction) -> Option<Reaction> {
        let image = self.current_artwork()?.image.clone();
        let toggled = match reaction {
            Reaction::Like => self.ledger.toggle_like(&image).await,
            Reaction::Dislike => self.ledger.toggle_dislike(&image).await,
        };
        match toggled {
            Ok(next) => next,
            Err(error) => {
                warn!(%error, %image, "failed to record reaction");
                self.ledger.get(&image).await
            }
        }
    }

    /// Publishes the current selector and copies the page link.
    pub fn share(&mut self) -> Option<ShareOutcome> {
        let CardState::Ready(controller) = &self.state else {
            return None;
        };
        let selector = controller.current_selector()?;
        let url = self.url_sync.share(&selector);
        let copied = match self.clipboard.write_text(&url) {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, "failed to copy share link");
                false
            }
        };
        Some(ShareOutcome { url, copied })
    }

    pub async fn view(&self) -> CardView {
        let controller = match &self.state {
            CardState::Loading => return CardView::Loading,
            CardState::Empty => return CardView::Empty,
            CardState::Ready(controller) => controller,
        };
        let (Some(artwork), Some(position)) =
            (controller.current_artwork(), controller.current_index())
        else {
            return CardView::Empty;
        };

        CardView::Artwork(ArtworkView {
            title: artwork.title.clone(),
            year: artwork.year.clone(),
            artist: artwork.artist.clone(),
            image: artwork.image.clone(),
            description: artwork.description.clone(),
            position,
            total: controller.total_count(),
            reaction: self.ledger.get(&artwork.image).await,
            previous_disabled: !controller.has_previous(),
            next_disabled: !controller.has_next(),
        })
    }
}
