//! The seam between this core and the rendering engine.
//!
//! The engine is an external collaborator: given a citation cluster and its
//! position hints, it renders text and reports edits plus the set of
//! citation ids still registered. [`DocumentSession`] drives clusters
//! through the engine and the synchronizer strictly in submission order.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::{CitationDocument, CitationId};
use crate::error::{Error, Result};
use crate::options::SessionOptions;
use crate::sync::{ClusterHints, DocumentSynchronizer, EngineEdit};

/// One in-text citation event, submitted for rendering as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationCluster {
    pub id: CitationId,
    /// Bibliographic item ids covered by this cluster.
    pub item_ids: Vec<String>,
}

impl CitationCluster {
    pub fn new(id: impl Into<CitationId>, item_ids: Vec<String>) -> Self {
        CitationCluster {
            id: id.into(),
            item_ids,
        }
    }
}

/// A rendering engine consumed as a black box.
///
/// Any auxiliary data the engine produces beyond the edits is ignored by
/// this core.
pub trait CitationEngine {
    /// Render one cluster against the current registry and report the
    /// resulting edits.
    fn process_cluster(
        &mut self,
        cluster: &CitationCluster,
        hints: &ClusterHints,
    ) -> Result<Vec<EngineEdit>>;

    /// Snapshot of the citation ids currently registered (the live
    /// registry).
    fn live_ids(&self) -> FxHashSet<CitationId>;
}

/// One formatting session: an engine, a document, and the options that
/// configured them. Single-threaded; never share a session across
/// documents.
#[derive(Debug)]
pub struct DocumentSession<E: CitationEngine> {
    engine: E,
    synchronizer: DocumentSynchronizer,
    options: SessionOptions,
}

impl<E: CitationEngine> DocumentSession<E> {
    pub fn new(engine: E, options: SessionOptions) -> Self {
        DocumentSession {
            engine,
            synchronizer: DocumentSynchronizer::new(),
            options,
        }
    }

    /// Render one cluster and fold the engine's response into the document.
    ///
    /// Clusters must be submitted in document order; each reconciliation is
    /// only meaningful against the state the previous one left behind.
    pub fn submit(
        &mut self,
        cluster: &CitationCluster,
        hints: &ClusterHints,
    ) -> Result<&CitationDocument> {
        debug!(cluster_id = %cluster.id, items = cluster.item_ids.len(), "processing cluster");
        let edits = self.engine.process_cluster(cluster, hints)?;
        let live = self.engine.live_ids();
        self.synchronizer.reconcile(hints, edits, &live)?;
        Ok(self.synchronizer.document())
    }

    pub fn document(&self) -> &CitationDocument {
        self.synchronizer.document()
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}

/// Check that every language tag's base segment has a grouping in the
/// engine's language table.
///
/// A missing base means the style/engine setup itself is broken, not a
/// data-level miss, so this aborts the session rather than proceeding with
/// undefined behavior.
pub fn validate_language_bases<'a, I>(langs: I, bases: &FxHashSet<String>) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    for lang in langs {
        let base = match lang.split_once('-') {
            Some((base, _)) => base,
            None => lang,
        };
        if !bases.contains(base) {
            return Err(Error::MissingLanguageBase {
                base: base.to_string(),
            });
        }
    }
    Ok(())
}
