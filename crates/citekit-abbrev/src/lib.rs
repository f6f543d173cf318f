//! Hierarchical abbreviation lookup with jurisdiction fallback.
//!
//! Citation styles abbreviate recurring terms (journal titles, place names,
//! institution names) using pre-supplied tables keyed by jurisdiction. A
//! jurisdiction is a colon-separated path of increasingly specific scopes
//! (`US:CA:district-1`), and a lookup falls back from the most specific scope
//! toward the least, ending at the `default` sentinel jurisdiction.
//!
//! The main types are:
//! - [`normalize_key`]: canonicalizes a raw term into a lookup key
//! - [`AbbreviationStore`]: the session-wide `jurisdiction -> category -> key`
//!   tables, built by overlaying one or more sources
//! - [`Resolver`]: walks the fallback chain and copies hits into a
//!   caller-supplied [`WorkingCache`]
//!
//! # Example
//!
//! ```rust
//! use citekit_abbrev::{AbbreviationStore, Resolver, WorkingCache};
//!
//! let mut store = AbbreviationStore::new();
//! store.insert("US", "place", "new york", "NY");
//!
//! let resolver = Resolver::new(&store);
//! let mut cache = WorkingCache::default();
//!
//! // Nothing is registered for the district, so the scan falls back to "US".
//! let matched = resolver.resolve(&mut cache, "US:CA:district-1", "place", "new york");
//! assert_eq!(matched, "US");
//! assert_eq!(cache["US"].get("place", "new york"), Some("NY"));
//! ```
//!
//! A total miss is not an error: the resolver reports the deepest fallback
//! jurisdiction reached (`default`), and the caller observes the miss as the
//! key being absent from the working cache.

pub mod normalize;
pub mod resolver;
pub mod store;

pub use normalize::normalize_key;
pub use resolver::{Resolver, WorkingCache};
pub use store::{AbbreviationSegments, AbbreviationStore, RawTable};
