//! Error types for document reconciliation and session configuration.
//!
//! The taxonomy is narrow by design: most inconsistencies (missing
//! abbreviations, out-of-range insertion indexes, upserts for unknown
//! citation ids) have well-defined fallbacks and are not errors. What
//! remains is unsupported engine output and broken session setup.

use thiserror::Error;

/// Result type alias for citekit-doc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reconciling a document or configuring a
/// session.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// The engine emitted target indexes that are not strictly ascending
    /// within one batch. Index semantics are only defined for ascending
    /// batches, so this is unsupported input rather than something to guess
    /// our way through.
    #[error("engine emitted target index {found} after {previous}; batches must be strictly ascending")]
    NonAscendingTargetIndex { previous: usize, found: usize },

    /// Unrecognized processing mode.
    #[error("invalid mode '{mode}': expected 'citation', 'bibliography', or 'all'")]
    InvalidMode { mode: String },

    /// Unrecognized session option name. Options are an enumerated set;
    /// unknown names are rejected rather than silently accepted.
    #[error("unknown option '{name}'")]
    UnknownOption { name: String },

    /// A language tag's base grouping is missing from the engine's language
    /// table. This indicates broken style/engine setup and aborts the
    /// session.
    #[error("missing base-language grouping '{base}' in engine language table")]
    MissingLanguageBase { base: String },

    /// Failure reported by the rendering engine while processing a cluster.
    #[error("engine error: {0}")]
    Engine(String),
}
