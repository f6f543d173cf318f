//! Fallback resolution across the jurisdiction hierarchy.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::store::{AbbreviationSegments, AbbreviationStore};

/// Per-call cache populated by the resolver, shaped like the store's tables.
///
/// The rendering engine supplies one of these per render pass; the resolver
/// guarantees that after a call, `cache[returned_jurisdiction]` exists and
/// has a table for the requested category, whether or not the lookup hit.
pub type WorkingCache = FxHashMap<String, AbbreviationSegments>;

/// Walks the jurisdiction fallback chain against a borrowed store.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    store: &'a AbbreviationStore,
}

impl<'a> Resolver<'a> {
    pub fn new(store: &'a AbbreviationStore) -> Self {
        Resolver { store }
    }

    /// Resolve `key` in `category`, falling back from the most specific
    /// scope of `jurisdiction` toward the `default` sentinel.
    ///
    /// The first hit is copied into `cache` under the jurisdiction that
    /// produced it, and scanning stops there. Every candidate visited gets a
    /// placeholder category table in `cache`, hit or miss, so the caller can
    /// index `cache[returned][category]` unconditionally afterward.
    ///
    /// Returns the jurisdiction at which scanning stopped: the hit's
    /// jurisdiction, or `default` when nothing matched. A total miss is not
    /// an error; the key is simply absent from the cache.
    pub fn resolve(
        &self,
        cache: &mut WorkingCache,
        jurisdiction: &str,
        category: &str,
        key: &str,
    ) -> String {
        let mut chain = vec!["default".to_string()];
        if jurisdiction != "default" {
            let scopes: Vec<&str> = jurisdiction.split(':').collect();
            for end in 1..=scopes.len() {
                chain.push(scopes[..end].join(":"));
            }
        }
        // Built root-to-leaf; the scan runs leaf-to-root.
        chain.reverse();

        let mut stopped_at = "default".to_string();
        for candidate in chain {
            let segment = cache.entry(candidate.clone()).or_default().segment_mut(category);
            if let Some(value) = self.store.lookup(&candidate, category, key) {
                segment.insert(key.to_string(), value.to_string());
                debug!(jurisdiction = %candidate, category, key, "abbreviation hit");
                return candidate;
            }
            stopped_at = candidate;
        }
        debug!(jurisdiction = %stopped_at, category, key, "abbreviation miss");
        stopped_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_falls_back_to_broader_jurisdiction() {
        let mut store = AbbreviationStore::new();
        store.insert("US", "place", "new york", "NY");
        let resolver = Resolver::new(&store);
        let mut cache = WorkingCache::default();

        let matched = resolver.resolve(&mut cache, "US:CA:district-1", "place", "new york");

        assert_eq!(matched, "US");
        assert_eq!(cache["US"].get("place", "new york"), Some("NY"));
    }

    #[test]
    fn test_most_specific_match_wins() {
        let mut store = AbbreviationStore::new();
        store.insert("US", "place", "new york", "NY (federal)");
        store.insert("US:NY", "place", "new york", "NY (state)");
        let resolver = Resolver::new(&store);
        let mut cache = WorkingCache::default();

        let matched = resolver.resolve(&mut cache, "US:NY", "place", "new york");

        assert_eq!(matched, "US:NY");
        assert_eq!(cache["US:NY"].get("place", "new york"), Some("NY (state)"));
        // The scan stopped at the hit; the broader value was never copied.
        assert_eq!(cache["US"].get("place", "new york"), None);
    }

    #[test]
    fn test_total_miss_reports_default_with_key_absent() {
        let store = AbbreviationStore::new();
        let resolver = Resolver::new(&store);
        let mut cache = WorkingCache::default();

        let matched = resolver.resolve(&mut cache, "US:CA", "place", "nowhere");

        assert_eq!(matched, "default");
        assert_eq!(cache["default"].get("place", "nowhere"), None);
    }

    #[test]
    fn test_placeholders_created_for_every_candidate_visited() {
        let store = AbbreviationStore::new();
        let resolver = Resolver::new(&store);
        let mut cache = WorkingCache::default();

        resolver.resolve(&mut cache, "US:CA:district-1", "place", "nowhere");

        for candidate in ["US:CA:district-1", "US:CA", "US", "default"] {
            assert!(cache[candidate].has_segment("place"), "missing {candidate}");
        }
    }

    #[test]
    fn test_default_sentinel_resolves_directly() {
        let mut store = AbbreviationStore::new();
        store.insert("default", "title", "modern law review", "Mod. L. Rev.");
        let resolver = Resolver::new(&store);
        let mut cache = WorkingCache::default();

        let matched = resolver.resolve(&mut cache, "default", "title", "modern law review");

        assert_eq!(matched, "default");
        assert_eq!(
            cache["default"].get("title", "modern law review"),
            Some("Mod. L. Rev.")
        );
    }

    #[test]
    fn test_fallback_hit_lands_under_matching_jurisdiction() {
        let mut store = AbbreviationStore::new();
        store.insert("default", "place", "somewhere", "Sw.");
        let resolver = Resolver::new(&store);
        let mut cache = WorkingCache::default();

        let matched = resolver.resolve(&mut cache, "US:CA", "place", "somewhere");

        assert_eq!(matched, "default");
        assert_eq!(cache["default"].get("place", "somewhere"), Some("Sw."));
        assert_eq!(cache["US:CA"].get("place", "somewhere"), None);
    }
}
