//! One-pass reconciliation of the document against engine output.
//!
//! For each submitted citation cluster, the rendering engine reports which
//! entries changed as `(target_index, text, citation_id)` edits, plus a
//! snapshot of the citation ids still registered. The synchronizer folds
//! that batch into the document: prune entries the registry dropped, reorder
//! to the cluster's preceding/following lists, then update in place where
//! the id already exists and insert where it does not.
//!
//! Target indexes are defined against the document state after the reorder
//! and before any insertion of the same batch, so insertions must land in
//! strictly ascending index order. Batches that violate that are rejected as
//! unsupported engine output.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::{CitationDocument, CitationId};
use crate::error::{Error, Result};

/// One entry of a cluster's preceding/following list: a citation id and the
/// note number it sits in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterRef {
    pub id: CitationId,
    pub note_index: u32,
}

impl ClusterRef {
    pub fn new(id: impl Into<CitationId>, note_index: u32) -> Self {
        ClusterRef {
            id: id.into(),
            note_index,
        }
    }
}

/// Position hints for one citation cluster.
///
/// The concatenation of `preceding` then `following` defines the desired
/// final order of every entry those lists mention. `insertion_index_hint` is
/// forwarded to the engine ("insert after note 3"); reconciliation itself
/// derives order from the lists alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterHints {
    pub insertion_index_hint: u32,
    pub preceding: Vec<ClusterRef>,
    pub following: Vec<ClusterRef>,
}

impl ClusterHints {
    /// Desired rank of every citation id the hint lists mention. A later
    /// mention of the same id wins, matching list concatenation order.
    pub fn rank_of(&self) -> FxHashMap<CitationId, usize> {
        self.preceding
            .iter()
            .chain(self.following.iter())
            .enumerate()
            .map(|(rank, cluster_ref)| (cluster_ref.id.clone(), rank))
            .collect()
    }
}

/// One edit reported by the engine: place `text` for `id` at
/// `target_index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineEdit {
    pub target_index: usize,
    pub text: String,
    pub id: CitationId,
}

impl EngineEdit {
    pub fn new(target_index: usize, text: impl Into<String>, id: impl Into<CitationId>) -> Self {
        EngineEdit {
            target_index,
            text: text.into(),
            id: id.into(),
        }
    }
}

/// Owns the document and reconciles it against one engine batch at a time.
///
/// Clusters must be reconciled strictly in submission order: each batch's
/// ranks and target indexes are only meaningful against the document state
/// the previous batch left behind.
#[derive(Debug, Clone, Default)]
pub struct DocumentSynchronizer {
    document: CitationDocument,
}

impl DocumentSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &CitationDocument {
        &self.document
    }

    /// Fold one cluster's engine response into the document.
    ///
    /// Reconciling the same cluster twice with identical inputs yields the
    /// same document both times.
    pub fn reconcile(
        &mut self,
        hints: &ClusterHints,
        edits: Vec<EngineEdit>,
        live: &FxHashSet<CitationId>,
    ) -> Result<()> {
        for pair in edits.windows(2) {
            if pair[1].target_index <= pair[0].target_index {
                return Err(Error::NonAscendingTargetIndex {
                    previous: pair[0].target_index,
                    found: pair[1].target_index,
                });
            }
        }

        self.document.prune_dead(live);
        self.document.reorder(&hints.rank_of());
        self.document.mark_all_pending();

        // Updates first; whatever is left over is an insertion. Ascending
        // target order was validated above, so each insertion's index is
        // still meaningful after the ones before it.
        let mut insertions = Vec::new();
        for edit in edits {
            if self.document.apply_upsert(&edit.id, &edit.text) {
                debug!(citation_id = %edit.id, "updated existing citation");
            } else {
                insertions.push(edit);
            }
        }
        for edit in insertions {
            debug!(citation_id = %edit.id, target_index = edit.target_index, "inserted citation");
            self.document.insert_at(edit.target_index, edit.id, edit.text);
        }
        Ok(())
    }
}
