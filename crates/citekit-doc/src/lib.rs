//! Incremental citation document reconciliation.
//!
//! A formatting session holds an ordered, mutable sequence of rendered
//! citations. As the caller submits citation clusters one at a time
//! ("insert citation after note 3"), the rendering engine reports which
//! entries changed, and this crate keeps the document consistent: entries
//! keep their identity across passes, dead entries are pruned against the
//! engine's live registry, and updates and insertions land without
//! disturbing what the engine left alone.
//!
//! The main types are:
//! - [`CitationDocument`]: the display-ordered entries, keyed by stable
//!   [`CitationId`]
//! - [`DocumentSynchronizer`]: folds one engine batch into the document
//! - [`CitationEngine`]: the trait seam to the external rendering engine,
//!   driven per cluster by [`DocumentSession`]
//! - [`SessionOptions`]: the enumerated session configuration
//!
//! # Example
//!
//! ```rust
//! use citekit_doc::{ClusterHints, DocumentSynchronizer, EngineEdit};
//! use rustc_hash::FxHashSet;
//!
//! let mut sync = DocumentSynchronizer::new();
//! let live: FxHashSet<_> = [citekit_doc::CitationId::from("c1")].into_iter().collect();
//! sync.reconcile(
//!     &ClusterHints::default(),
//!     vec![EngineEdit::new(0, "Smith 2020", "c1")],
//!     &live,
//! )?;
//! assert_eq!(sync.document().join("\n"), ">>[0] Smith 2020");
//! # Ok::<(), citekit_doc::Error>(())
//! ```
//!
//! Reconciliation is synchronous and single-threaded; one session owns one
//! document, and clusters must be submitted strictly in document order.

pub mod document;
pub mod engine;
pub mod error;
pub mod options;
pub mod sync;

pub use document::{CitationDocument, CitationEntry, CitationId, DisplayStatus};
pub use engine::{CitationCluster, CitationEngine, DocumentSession, validate_language_bases};
pub use error::{Error, Result};
pub use options::{DevelopmentExtensions, Mode, OutputFormat, SessionOptions};
pub use sync::{ClusterHints, ClusterRef, DocumentSynchronizer, EngineEdit};
