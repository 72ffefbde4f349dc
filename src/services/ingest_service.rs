use crate::domain::{Article, FeedSource, IngestFailure, IngestReport};
use crate::services::normalizer::Normalizer;
use crate::services::notification_service::{notify_failure, Notifier};
use crate::sources::FeedParser;

/// Outcome for a single source: its articles, or why it was skipped
type SourceOutcome = Result<Vec<Article>, IngestFailure>;

/// Fetches the selected sources, normalizes their entries and merges them
/// into one list ordered newest first.
///
/// A source that fails contributes nothing and never stops the others.
pub struct IngestService<P: FeedParser, N: Notifier> {
    parser: P,
    notifier: N,
    normalizer: Normalizer,
    parallel: bool,
}

impl<P: FeedParser, N: Notifier> IngestService<P, N> {
    pub fn new(parser: P, notifier: N, normalizer: Normalizer) -> Self {
        Self {
            parser,
            notifier,
            normalizer,
            parallel: false,
        }
    }

    /// Fetch every source on its own thread instead of one after another.
    /// The merged result is the same either way.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn ingest(&self, sources: &[FeedSource]) -> IngestReport {
        let outcomes = if self.parallel && sources.len() > 1 {
            self.fetch_parallel(sources)
        } else {
            sources.iter().map(|s| self.ingest_source(s)).collect()
        };

        // Merge in selection order so completion order never leaks into the result
        let mut report = IngestReport::default();
        for outcome in outcomes {
            match outcome {
                Ok(articles) => report.articles.extend(articles),
                Err(failure) => {
                    notify_failure(&self.notifier, &failure);
                    report.failures.push(failure);
                }
            }
        }

        sort_newest_first(&mut report.articles);

        tracing::info!(
            sources = sources.len(),
            articles = report.articles.len(),
            failures = report.failures.len(),
            "ingestion complete"
        );

        report
    }

    /// Articles only, for callers that don't care which sources failed
    pub fn ingest_articles(&self, sources: &[FeedSource]) -> Vec<Article> {
        self.ingest(sources).articles
    }

    fn ingest_source(&self, source: &FeedSource) -> SourceOutcome {
        tracing::debug!(source = %source.name, endpoint = %source.endpoint, "fetching feed");

        let feed = self
            .parser
            .parse(&source.endpoint)
            .map_err(|e| IngestFailure::fetch_or_parse(&source.name, e))?;

        if feed.malformed {
            return Err(IngestFailure::malformed(&source.name));
        }

        let articles: Vec<Article> = feed
            .entries
            .iter()
            .map(|entry| self.normalizer.normalize(entry, &source.name))
            .collect();

        tracing::debug!(source = %source.name, articles = articles.len(), "feed normalized");

        Ok(articles)
    }

    fn fetch_parallel(&self, sources: &[FeedSource]) -> Vec<SourceOutcome> {
        std::thread::scope(|scope| {
            let handles: Vec<_> = sources
                .iter()
                .map(|source| scope.spawn(move || self.ingest_source(source)))
                .collect();

            handles
                .into_iter()
                .zip(sources)
                .map(|(handle, source)| {
                    handle.join().unwrap_or_else(|_| {
                        Err(IngestFailure::fetch_or_parse(&source.name, "fetch worker panicked"))
                    })
                })
                .collect()
        })
    }
}

/// Newest first, undated articles last. The sort is stable so equal
/// timestamps keep their insertion order.
pub fn sort_newest_first(articles: &mut [Article]) {
    articles.sort_by(|a, b| b.published.cmp(&a.published));
}
