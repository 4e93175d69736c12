use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Local, Utc};
use shared::{
    domain::{light_glyph, WhisperId},
    protocol::{CommentPayload, WhisperPayload},
};

/// Author shown on a locally appended reply once the backend confirms it.
pub const REPLY_DISPLAY_AUTHOR: &str = "You (Faculty)";

/// Placeholder copy for a wall with no whispers.
pub const EMPTY_WALL_MESSAGE: &str = "The garden is quiet. Plant the first seed.";

pub const THREAD_OPEN_LABEL: &str = "Hide Support";

#[derive(Debug, Clone)]
pub struct CommentLine {
    pub author: String,
    pub text: String,
    pub time_label: String,
}

impl CommentLine {
    fn from_payload(payload: &CommentPayload) -> Self {
        Self {
            author: payload.author.clone(),
            text: payload.text.clone(),
            time_label: comment_time_label(payload.time.as_ref()),
        }
    }
}

/// Local time-of-day for a comment timestamp; empty when the backend sent
/// none.
pub fn comment_time_label(time: Option<&DateTime<Utc>>) -> String {
    time.map(|time| time.with_timezone(&Local).format("%H:%M").to_string())
        .unwrap_or_default()
}

#[derive(Debug, Clone)]
pub struct WhisperCard {
    pub id: WhisperId,
    pub glyph: &'static str,
    pub tag: String,
    pub content: String,
    pub comments: Vec<CommentLine>,
}

impl WhisperCard {
    fn from_payload(payload: &WhisperPayload) -> Self {
        Self {
            id: payload.id.clone(),
            glyph: light_glyph(payload.light),
            tag: payload.tag.clone(),
            content: format!("\"{}\"", payload.content),
            comments: payload
                .comments
                .iter()
                .map(CommentLine::from_payload)
                .collect(),
        }
    }

    pub fn reply_count(&self) -> usize {
        self.comments.len()
    }
}

#[derive(Debug, Default, Clone)]
struct Composer {
    draft: String,
    in_flight: bool,
}

/// Card list view-model. Fetched data is rebuilt wholesale on every render;
/// the expanded set and the per-card composers are keyed by whisper id and
/// survive rebuilds, so re-fetching a whisper never collapses its thread or
/// drops an in-progress draft.
#[derive(Debug, Default)]
pub struct WallView {
    cards: Vec<WhisperCard>,
    expanded: HashSet<WhisperId>,
    composers: HashMap<WhisperId, Composer>,
}

impl WallView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[WhisperCard] {
        &self.cards
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Rebuilds the card list from a fetched snapshot, in input order. The
    /// expanded/composer maps are not part of the snapshot and are left
    /// alone: a card whose id is in the expanded set comes back expanded.
    pub fn render(&mut self, whispers: &[WhisperPayload]) {
        self.cards = whispers.iter().map(WhisperCard::from_payload).collect();
    }

    pub fn is_expanded(&self, id: &WhisperId) -> bool {
        self.expanded.contains(id)
    }

    /// Flips the thread open or closed and returns the new toggle label.
    pub fn toggle_thread(&mut self, id: &WhisperId) -> String {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.clone());
        }
        self.thread_label(id)
    }

    /// "Hide Support" while open, "View Support (N)" while closed, N being
    /// the comment count at the time the label is computed.
    pub fn thread_label(&self, id: &WhisperId) -> String {
        if self.is_expanded(id) {
            THREAD_OPEN_LABEL.to_string()
        } else {
            let count = self
                .cards
                .iter()
                .find(|card| &card.id == id)
                .map(WhisperCard::reply_count)
                .unwrap_or(0);
            format!("View Support ({count})")
        }
    }

    pub fn draft(&self, id: &WhisperId) -> &str {
        self.composers
            .get(id)
            .map(|composer| composer.draft.as_str())
            .unwrap_or("")
    }

    pub fn draft_mut(&mut self, id: &WhisperId) -> &mut String {
        &mut self.composers.entry(id.clone()).or_default().draft
    }

    pub fn is_in_flight(&self, id: &WhisperId) -> bool {
        self.composers
            .get(id)
            .is_some_and(|composer| composer.in_flight)
    }

    /// Claims the card for a submit. Yields the draft only when it is
    /// non-empty and no submit for this card is already in flight; the card
    /// stays claimed until `complete_submit` or `fail_submit`. Other cards
    /// are unaffected.
    pub fn begin_submit(&mut self, id: &WhisperId) -> Option<String> {
        let composer = self.composers.entry(id.clone()).or_default();
        if composer.in_flight || composer.draft.is_empty() {
            return None;
        }
        composer.in_flight = true;
        Some(composer.draft.clone())
    }

    /// The backend confirmed the reply: append it locally instead of
    /// waiting for the next poll, clear the draft, release the card.
    pub fn complete_submit(&mut self, id: &WhisperId, text: &str) {
        if let Some(card) = self.cards.iter_mut().find(|card| &card.id == id) {
            card.comments.push(CommentLine {
                author: REPLY_DISPLAY_AUTHOR.to_string(),
                text: text.to_string(),
                time_label: String::new(),
            });
        }
        let composer = self.composers.entry(id.clone()).or_default();
        composer.in_flight = false;
        composer.draft.clear();
    }

    /// The backend refused or was unreachable: release the card and keep
    /// the unsent draft.
    pub fn fail_submit(&mut self, id: &WhisperId) {
        if let Some(composer) = self.composers.get_mut(id) {
            composer.in_flight = false;
        }
    }
}

#[cfg(test)]
#[path = "tests/wall_tests.rs"]
mod tests;
