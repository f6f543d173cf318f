//! Session-scoped abbreviation tables.
//!
//! The store maps `jurisdiction -> category -> key -> short form`. Categories
//! are an open, caller-defined set ("title", "place", "institution-entire",
//! ...). The store is an explicit value constructed once per formatting
//! session and passed by reference into the [`Resolver`](crate::Resolver);
//! overlays from bulk data or caller-supplied tables happen during setup,
//! lookups never mutate it.

use rustc_hash::FxHashMap;
use serde::Deserialize;
use tracing::debug;

use crate::normalize::normalize_key;

/// Nested table shape shared by overlays and the working cache:
/// `jurisdiction -> category -> key -> short form`.
pub type RawTable = FxHashMap<String, FxHashMap<String, FxHashMap<String, String>>>;

/// The `category -> key -> short form` tables for one jurisdiction.
#[derive(Debug, Clone, Default)]
pub struct AbbreviationSegments {
    segments: FxHashMap<String, FxHashMap<String, String>>,
}

impl AbbreviationSegments {
    /// Look up a key within one category.
    pub fn get(&self, category: &str, key: &str) -> Option<&str> {
        self.segments
            .get(category)?
            .get(key)
            .map(String::as_str)
    }

    /// The mutable key table for a category, created empty if absent.
    pub fn segment_mut(&mut self, category: &str) -> &mut FxHashMap<String, String> {
        self.segments.entry(category.to_string()).or_default()
    }

    /// Whether a category table exists (possibly empty).
    pub fn has_segment(&self, category: &str) -> bool {
        self.segments.contains_key(category)
    }
}

/// Abbreviation tables for all jurisdictions seen by a session.
///
/// A fresh store always contains an empty `default` jurisdiction; `default`
/// is the terminal fallback target and must always resolve.
#[derive(Debug, Clone)]
pub struct AbbreviationStore {
    tables: FxHashMap<String, AbbreviationSegments>,
}

/// Bulk abbreviation files wrap the table in an `xdata` envelope.
#[derive(Debug, Deserialize)]
struct BulkEnvelope {
    xdata: RawTable,
}

impl AbbreviationStore {
    pub fn new() -> Self {
        let mut tables = FxHashMap::default();
        tables.insert("default".to_string(), AbbreviationSegments::default());
        AbbreviationStore { tables }
    }

    /// Insert an empty table for `id` if absent. Idempotent.
    pub fn ensure_jurisdiction(&mut self, id: &str) {
        self.tables.entry(id.to_string()).or_default();
    }

    /// Insert a single entry, creating the jurisdiction and category as
    /// needed. Existing entries under the same key are overwritten.
    pub fn insert(&mut self, jurisdiction: &str, category: &str, key: &str, value: &str) {
        self.tables
            .entry(jurisdiction.to_string())
            .or_default()
            .segment_mut(category)
            .insert(key.to_string(), value.to_string());
    }

    /// Merge a full table into the store.
    ///
    /// Individual keys from the source are inserted or overwritten;
    /// jurisdictions, categories, and keys the source does not mention are
    /// untouched. Nothing is ever deleted by an overlay.
    pub fn overlay(&mut self, table: RawTable) {
        for (jurisdiction, segments) in table {
            let target = self.tables.entry(jurisdiction).or_default();
            for (category, keys) in segments {
                target.segment_mut(&category).extend(keys);
            }
        }
    }

    /// Merge a caller-supplied table whose keys are raw terms.
    ///
    /// Keys are normalized as prose before insertion, with two exceptions
    /// that keep their raw key: jurisdiction names (an all-caps key in the
    /// `place` category of the `default` jurisdiction) and court names
    /// (the `institution-entire` / `institution-part` categories).
    pub fn overlay_normalized(&mut self, table: RawTable) {
        for (jurisdiction, segments) in table {
            for (category, keys) in segments {
                for (key, value) in keys {
                    let is_jurisdiction_name = jurisdiction == "default"
                        && category == "place"
                        && key.to_uppercase() == key;
                    let is_court_name =
                        matches!(category.as_str(), "institution-entire" | "institution-part");
                    let key = if is_jurisdiction_name || is_court_name {
                        key
                    } else {
                        normalize_key("title", Some(&key))
                    };
                    self.insert(&jurisdiction, &category, &key, &value);
                }
            }
        }
    }

    /// Overlay a bulk abbreviation file (the `{"xdata": ...}` envelope).
    pub fn overlay_bulk(&mut self, json: &str) -> serde_json::Result<()> {
        let envelope: BulkEnvelope = serde_json::from_str(json)?;
        let jurisdictions = envelope.xdata.len();
        self.overlay(envelope.xdata);
        debug!(jurisdictions, "overlaid bulk abbreviation data");
        Ok(())
    }

    /// Pure read at one jurisdiction. Fallback across the jurisdiction
    /// hierarchy is the resolver's job, not the store's.
    pub fn lookup(&self, jurisdiction: &str, category: &str, key: &str) -> Option<&str> {
        self.tables.get(jurisdiction)?.get(category, key)
    }

    /// Whether the store has a table (possibly empty) for `jurisdiction`.
    pub fn has_jurisdiction(&self, jurisdiction: &str) -> bool {
        self.tables.contains_key(jurisdiction)
    }
}

impl Default for AbbreviationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(entries: &[(&str, &str, &str, &str)]) -> RawTable {
        let mut table = RawTable::default();
        for (jurisdiction, category, key, value) in entries {
            table
                .entry(jurisdiction.to_string())
                .or_default()
                .entry(category.to_string())
                .or_default()
                .insert(key.to_string(), value.to_string());
        }
        table
    }

    #[test]
    fn test_fresh_store_has_default_jurisdiction() {
        let store = AbbreviationStore::new();
        assert!(store.has_jurisdiction("default"));
    }

    #[test]
    fn test_ensure_jurisdiction_idempotent() {
        let mut store = AbbreviationStore::new();
        store.ensure_jurisdiction("US");
        store.insert("US", "place", "new york", "NY");
        store.ensure_jurisdiction("US");
        assert_eq!(store.lookup("US", "place", "new york"), Some("NY"));
    }

    #[test]
    fn test_overlay_does_not_disturb_other_jurisdictions() {
        let mut store = AbbreviationStore::new();
        store.insert("CA", "place", "toronto", "Tor.");
        store.insert("US", "place", "boston", "Bos.");
        store.overlay(table(&[("US", "place", "new york", "NY")]));
        assert_eq!(store.lookup("CA", "place", "toronto"), Some("Tor."));
        assert_eq!(store.lookup("US", "place", "boston"), Some("Bos."));
        assert_eq!(store.lookup("US", "place", "new york"), Some("NY"));
    }

    #[test]
    fn test_overlay_replaces_at_key_level() {
        let mut store = AbbreviationStore::new();
        store.insert("US", "title", "modern law review", "Mod. L. Rev.");
        store.insert("US", "title", "harvard law review", "Harv. L. Rev.");
        store.overlay(table(&[("US", "title", "modern law review", "M.L.R.")]));
        assert_eq!(store.lookup("US", "title", "modern law review"), Some("M.L.R."));
        // Keys absent from the overlay survive.
        assert_eq!(
            store.lookup("US", "title", "harvard law review"),
            Some("Harv. L. Rev.")
        );
    }

    #[test]
    fn test_overlay_normalized_prose_keys() {
        let mut store = AbbreviationStore::new();
        store.overlay_normalized(table(&[(
            "US",
            "title",
            "The Modern Law Review",
            "Mod. L. Rev.",
        )]));
        assert_eq!(
            store.lookup("US", "title", "modern law review"),
            Some("Mod. L. Rev.")
        );
    }

    #[test]
    fn test_overlay_normalized_preserves_jurisdiction_and_court_keys() {
        let mut store = AbbreviationStore::new();
        store.overlay_normalized(table(&[
            ("default", "place", "US:CA", "California"),
            ("US", "institution-entire", "Supreme Court", "S. Ct."),
        ]));
        assert_eq!(store.lookup("default", "place", "US:CA"), Some("California"));
        assert_eq!(
            store.lookup("US", "institution-entire", "Supreme Court"),
            Some("S. Ct.")
        );
    }

    #[test]
    fn test_overlay_bulk_envelope() {
        let mut store = AbbreviationStore::new();
        let json = r#"{"xdata": {"US": {"place": {"new york": "NY"}}}}"#;
        store.overlay_bulk(json).unwrap();
        assert_eq!(store.lookup("US", "place", "new york"), Some("NY"));
    }

    #[test]
    fn test_overlay_bulk_rejects_malformed_envelope() {
        let mut store = AbbreviationStore::new();
        assert!(store.overlay_bulk(r#"{"data": {}}"#).is_err());
    }

    #[test]
    fn test_lookup_has_no_fallback() {
        let mut store = AbbreviationStore::new();
        store.insert("US", "place", "new york", "NY");
        assert_eq!(store.lookup("US:CA", "place", "new york"), None);
    }
}
