use std::collections::HashMap;
use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};

use crate::domain::{FeedSource, IngestReport};

pub const DEFAULT_CACHE_TTL_SECS: u64 = 1800;

struct CachedReport {
    stored_at: Instant,
    report: IngestReport,
}

/// In-memory ingestion results keyed by source selection.
///
/// An entry is served until it is `ttl` old. Nothing outlives the process.
pub struct ArticleCache {
    ttl: Duration,
    entries: HashMap<String, CachedReport>,
}

impl ArticleCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached report for this selection, if still fresh
    pub fn get(&self, sources: &[FeedSource]) -> Option<&IngestReport> {
        self.get_at(&cache_key(sources), Instant::now())
    }

    pub fn insert(&mut self, sources: &[FeedSource], report: IngestReport) {
        self.insert_at(cache_key(sources), report, Instant::now());
    }

    /// Serve the cached report, or run `ingest` and remember its result
    pub fn get_or_ingest<F>(&mut self, sources: &[FeedSource], ingest: F) -> IngestReport
    where
        F: FnOnce(&[FeedSource]) -> IngestReport,
    {
        self.get_or_ingest_at(sources, Instant::now(), ingest)
    }

    /// Drop every entry so the next lookup fetches again
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    pub fn invalidate_key(&mut self, sources: &[FeedSource]) {
        self.entries.remove(&cache_key(sources));
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<&IngestReport> {
        self.entries
            .get(key)
            .filter(|cached| now.saturating_duration_since(cached.stored_at) < self.ttl)
            .map(|cached| &cached.report)
    }

    fn insert_at(&mut self, key: String, report: IngestReport, now: Instant) {
        self.entries.insert(
            key,
            CachedReport {
                stored_at: now,
                report,
            },
        );
    }

    fn get_or_ingest_at<F>(&mut self, sources: &[FeedSource], now: Instant, ingest: F) -> IngestReport
    where
        F: FnOnce(&[FeedSource]) -> IngestReport,
    {
        let key = cache_key(sources);
        if let Some(report) = self.get_at(&key, now) {
            tracing::debug!(key = %key, "serving cached articles");
            return report.clone();
        }

        let report = ingest(sources);
        self.insert_at(key, report.clone(), now);
        report
    }
}

impl Default for ArticleCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_CACHE_TTL_SECS))
    }
}

/// SHA-256 over the ordered (name, endpoint) pairs of a selection
pub fn cache_key(sources: &[FeedSource]) -> String {
    let mut hasher = Sha256::new();
    for source in sources {
        hasher.update(source.name.as_bytes());
        hasher.update([0u8]);
        hasher.update(source.endpoint.as_str().as_bytes());
        hasher.update([0u8]);
    }
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Article;
    use std::cell::Cell;

    fn sources(names: &[&str]) -> Vec<FeedSource> {
        names
            .iter()
            .map(|n| FeedSource::parse(*n, &format!("https://{}.example.com/feed", n)).unwrap())
            .collect()
    }

    fn report(title: &str) -> IngestReport {
        IngestReport {
            articles: vec![Article::new("a".to_string(), title.to_string())],
            failures: Vec::new(),
        }
    }

    #[test]
    fn test_fresh_entry_served_without_ingesting() {
        let mut cache = ArticleCache::new(Duration::from_secs(60));
        let selection = sources(&["a", "b"]);
        let calls = Cell::new(0);
        let start = Instant::now();

        let first = cache.get_or_ingest_at(&selection, start, |_| {
            calls.set(calls.get() + 1);
            report("first")
        });
        let second = cache.get_or_ingest_at(&selection, start + Duration::from_secs(59), |_| {
            calls.set(calls.get() + 1);
            report("second")
        });

        assert_eq!(calls.get(), 1);
        assert_eq!(first, second);
        assert_eq!(second.articles[0].title, "first");
    }

    #[test]
    fn test_expired_entry_refetched() {
        let mut cache = ArticleCache::new(Duration::from_secs(60));
        let selection = sources(&["a"]);
        let start = Instant::now();

        cache.get_or_ingest_at(&selection, start, |_| report("old"));
        let refreshed =
            cache.get_or_ingest_at(&selection, start + Duration::from_secs(60), |_| report("new"));

        assert_eq!(refreshed.articles[0].title, "new");
    }

    #[test]
    fn test_invalidate_forces_refetch() {
        let mut cache = ArticleCache::new(Duration::from_secs(3600));
        let selection = sources(&["a"]);

        cache.get_or_ingest(&selection, |_| report("old"));
        cache.invalidate();
        assert!(cache.is_empty());

        let refreshed = cache.get_or_ingest(&selection, |_| report("new"));
        assert_eq!(refreshed.articles[0].title, "new");
    }

    #[test]
    fn test_invalidate_key_leaves_other_selections() {
        let mut cache = ArticleCache::new(Duration::from_secs(3600));
        let ab = sources(&["a", "b"]);
        let c = sources(&["c"]);

        cache.insert(&ab, report("ab"));
        cache.insert(&c, report("c"));
        cache.invalidate_key(&ab);

        assert!(cache.get(&ab).is_none());
        assert_eq!(cache.get(&c).unwrap().articles[0].title, "c");
    }

    #[test]
    fn test_different_selections_have_different_keys() {
        assert_ne!(cache_key(&sources(&["a"])), cache_key(&sources(&["b"])));
        assert_ne!(
            cache_key(&sources(&["a", "b"])),
            cache_key(&sources(&["b", "a"]))
        );
        assert_eq!(cache_key(&sources(&["a"])), cache_key(&sources(&["a"])));
    }

    #[test]
    fn test_zero_ttl_never_serves() {
        let mut cache = ArticleCache::new(Duration::ZERO);
        let selection = sources(&["a"]);

        cache.insert(&selection, report("stale"));
        assert!(cache.get(&selection).is_none());
    }
}
