//! Single image card backed by a third-party endpoint. Every `next`
//! fetches a fresh image; there is no history to step back through.

use std::sync::Arc;

use shared::{domain::Reaction, protocol::RandomImage};
use tracing::{error, warn};

use crate::{ledger::ReactionLedger, Clipboard, RandomImageSource, ShareOutcome};

#[derive(Debug, Clone, PartialEq)]
pub enum ImageCardView {
    Loading,
    Empty,
    Image {
        image: String,
        link: String,
        reaction: Option<Reaction>,
    },
}

enum ImageState {
    Loading,
    Ready(RandomImage),
    Empty,
}

pub struct RandomImageCard {
    source: Arc<dyn RandomImageSource>,
    ledger: ReactionLedger,
    clipboard: Arc<dyn Clipboard>,
    state: ImageState,
}

impl RandomImageCard {
    pub fn new(
        source: Arc<dyn RandomImageSource>,
        ledger: ReactionLedger,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            source,
            ledger,
            clipboard,
            state: ImageState::Loading,
        }
    }

    pub fn current(&self) -> Option<&RandomImage> {
        match &self.state {
            ImageState::Ready(image) => Some(image),
            ImageState::Loading | ImageState::Empty => None,
        }
    }

    /// First fetch. A failure leaves the card empty.
    pub async fn load(&mut self) {
        if !matches!(self.state, ImageState::Loading) {
            return;
        }
        self.state = match self.source.fetch_image().await {
            Ok(image) => ImageState::Ready(image),
            Err(error) => {
                error!(%error, "error fetching image");
                ImageState::Empty
            }
        };
    }

    /// Replaces the image with a fresh one. On failure the previous image
    /// stays on screen.
    pub async fn next(&mut self) -> bool {
        if !matches!(self.state, ImageState::Ready(_)) {
            return false;
        }
        match self.source.fetch_image().await {
            Ok(image) => {
                self.state = ImageState::Ready(image);
                true
            }
            Err(error) => {
                error!(%error, "error fetching next image");
                false
            }
        }
    }

    pub async fn like(&mut self) -> Option<Reaction> {
        self.react(Reaction::Like).await
    }

    pub async fn dislike(&mut self) -> Option<Reaction> {
        self.react(Reaction::Dislike).await
    }

    async fn react(&mut self, reaction: Reaction) -> Option<Reaction> {
        let image = self.current()?.image.clone();
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

    /// Copies the image locator itself.
    pub fn share(&self) -> Option<ShareOutcome> {
        let url = self.current()?.image.clone();
        let copied = match self.clipboard.write_text(&url) {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, "failed to copy image link");
                false
            }
        };
        Some(ShareOutcome { url, copied })
    }

    pub async fn view(&self) -> ImageCardView {
        match &self.state {
            ImageState::Loading => ImageCardView::Loading,
            ImageState::Empty => ImageCardView::Empty,
            ImageState::Ready(current) => ImageCardView::Image {
                image: current.image.clone(),
                link: current.link.clone(),
                reaction: self.ledger.get(&current.image).await,
            },
        }
    }
}
