//! 1-based cursor over the artwork sequence.

use std::num::IntErrorKind;

use shared::domain::{ArtworkRecord, PhotoSelector};
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct PaginationController {
    sequence: Vec<ArtworkRecord>,
    /// 1-based; 0 only while the sequence is empty.
    current_index: usize,
}

impl PaginationController {
    /// Positions the cursor on `requested` when given.
    ///
    /// `requested` is first matched against record ids, then read as a
    /// 1-based position. Positions outside `[1, total]` are clamped and
    /// unreadable or zero positions fall back to the first record.
    pub fn initialize(sequence: Vec<ArtworkRecord>, requested: Option<&str>) -> Self {
        let current_index = resolve_start_index(&sequence, requested);
        Self {
            sequence,
            current_index,
        }
    }

    pub fn total_count(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// `None` when the sequence is empty.
    pub fn current_index(&self) -> Option<usize> {
        (self.current_index > 0).then_some(self.current_index)
    }

    pub fn current_artwork(&self) -> Option<&ArtworkRecord> {
        self.current_index
            .checked_sub(1)
            .and_then(|idx| self.sequence.get(idx))
    }

    /// Id of the current record, or its position when it has none.
    pub fn current_selector(&self) -> Option<PhotoSelector> {
        let artwork = self.current_artwork()?;
        Some(match artwork.url_id() {
            Some(id) => PhotoSelector::Id(id.clone()),
            None => PhotoSelector::Index(self.current_index),
        })
    }

    pub fn has_next(&self) -> bool {
        self.current_index > 0 && self.current_index < self.total_count()
    }

    pub fn has_previous(&self) -> bool {
        self.current_index > 1
    }

    /// Returns whether the cursor moved. A no-op on the last record.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current_index += 1;
        true
    }

    /// Returns whether the cursor moved. A no-op on the first record.
    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.current_index -= 1;
        true
    }
}

fn resolve_start_index(sequence: &[ArtworkRecord], requested: Option<&str>) -> usize {
    let total = sequence.len();
    if total == 0 {
        return 0;
    }

    let Some(requested) = requested.map(str::trim).filter(|value| !value.is_empty()) else {
        return 1;
    };

    if let Some(position) = sequence
        .iter()
        .position(|record| record.id.as_ref().is_some_and(|id| id.as_str().trim() == requested))
    {
        return position + 1;
    }

    let wanted = match requested.parse::<i64>() {
        Ok(0) => 1,
        Ok(n) => n,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => 1,
        },
    };
    let clamped = wanted.clamp(1, total as i64);
    if clamped != wanted {
        warn!(requested, total, clamped, "photo position out of range; clamped");
    }
    clamped as usize
}
