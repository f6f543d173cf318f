//! The ordered sequence of rendered citation entries.
//!
//! A [`CitationDocument`] owns the display-ordered entries for one formatting
//! session. Entries keep their identity (the [`CitationId`]) across
//! reconciliation passes: they are mutated in place on update, removed when
//! the engine's live registry drops them, and reordered without being
//! recreated.

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Opaque, stable identity of a citation across reconciliation passes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CitationId(pub String);

impl fmt::Display for CitationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CitationId {
    fn from(s: &str) -> Self {
        CitationId(s.to_string())
    }
}

impl From<String> for CitationId {
    fn from(s: String) -> Self {
        CitationId(s)
    }
}

/// Render-diff state of an entry, consumed by the caller when displaying
/// the document. Carries no reconciliation logic of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayStatus {
    /// Untouched since the last pass.
    #[default]
    Unchanged,
    /// Awaiting this pass's updates.
    Pending,
    /// Updated or inserted by the current pass.
    Refreshed,
}

impl DisplayStatus {
    /// Display prefix: `..` for entries the current pass left alone, `>>`
    /// for entries it updated or inserted.
    pub fn prefix(self) -> &'static str {
        match self {
            DisplayStatus::Unchanged | DisplayStatus::Pending => "..",
            DisplayStatus::Refreshed => ">>",
        }
    }
}

/// One rendered citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationEntry {
    pub id: CitationId,
    pub text: String,
    pub status: DisplayStatus,
}

/// Display-ordered, identity-preserving sequence of rendered citations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitationDocument {
    entries: Vec<CitationEntry>,
}

impl CitationDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CitationEntry] {
        &self.entries
    }

    /// Remove every entry whose id is not in `live`, in one pass.
    ///
    /// Survivors keep their relative order. Removal goes through `retain`,
    /// so positions of not-yet-visited entries are never invalidated
    /// mid-scan.
    pub fn prune_dead(&mut self, live: &FxHashSet<CitationId>) {
        let before = self.entries.len();
        self.entries.retain(|entry| live.contains(&entry.id));
        let removed = before - self.entries.len();
        if removed > 0 {
            debug!(removed, remaining = self.entries.len(), "pruned dead citations");
        }
    }

    /// Stable-sort entries by their rank in `rank_of`.
    ///
    /// An entry whose id has no rank takes its current position as its rank,
    /// keeping the comparison total while preserving the relative order of
    /// unranked entries among themselves.
    pub fn reorder(&mut self, rank_of: &FxHashMap<CitationId, usize>) {
        let mut keyed: Vec<(usize, CitationEntry)> = self
            .entries
            .drain(..)
            .enumerate()
            .map(|(index, entry)| {
                let rank = rank_of.get(&entry.id).copied().unwrap_or(index);
                (rank, entry)
            })
            .collect();
        keyed.sort_by_key(|(rank, _)| *rank);
        self.entries.extend(keyed.into_iter().map(|(_, entry)| entry));
    }

    /// Mark every entry as awaiting the current pass.
    pub fn mark_all_pending(&mut self) {
        for entry in &mut self.entries {
            entry.status = DisplayStatus::Pending;
        }
    }

    /// Replace the text of the entry with this id in place, marking it
    /// refreshed. Returns `false` when the id is unknown; the caller then
    /// falls through to insertion.
    pub fn apply_upsert(&mut self, id: &CitationId, text: &str) -> bool {
        match self.entries.iter_mut().find(|entry| &entry.id == id) {
            Some(entry) => {
                entry.text = text.to_string();
                entry.status = DisplayStatus::Refreshed;
                true
            }
            None => false,
        }
    }

    /// Insert a new refreshed entry at `index`, shifting later entries
    /// right. An out-of-range index clamps to the end; that is a recoverable
    /// inconsistency, not an error.
    pub fn insert_at(&mut self, index: usize, id: CitationId, text: String) {
        let clamped = index.min(self.entries.len());
        if clamped != index {
            warn!(index, clamped, citation_id = %id, "clamped out-of-range insertion index");
        }
        self.entries.insert(
            clamped,
            CitationEntry {
                id,
                text,
                status: DisplayStatus::Refreshed,
            },
        );
    }

    /// Join the entries into one document string, one
    /// `{prefix}[{position}] {text}` line per entry.
    pub fn join(&self, separator: &str) -> String {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                format!("{}[{}] {}", entry.status.prefix(), index, entry.text)
            })
            .collect::<Vec<_>>()
            .join(separator)
    }
}
