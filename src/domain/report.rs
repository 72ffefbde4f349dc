use std::fmt;

use super::Article;

/// Why a source contributed no articles to an ingestion call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The parser flagged the feed as ill-formed
    MalformedFeed,
    /// Fetching or parsing raised an error
    FetchOrParse(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestFailure {
    pub source: String,
    pub kind: FailureKind,
}

impl IngestFailure {
    pub fn malformed(source: &str) -> Self {
        Self {
            source: source.to_string(),
            kind: FailureKind::MalformedFeed,
        }
    }

    pub fn fetch_or_parse(source: &str, detail: impl fmt::Display) -> Self {
        Self {
            source: source.to_string(),
            kind: FailureKind::FetchOrParse(detail.to_string()),
        }
    }

    /// Format: "Could not properly parse feed for {source}. It might be malformed."
    /// or "Error fetching or parsing feed for {source}: {detail}"
    pub fn message(&self) -> String {
        match &self.kind {
            FailureKind::MalformedFeed => format!(
                "Could not properly parse feed for {}. It might be malformed.",
                self.source
            ),
            FailureKind::FetchOrParse(detail) => format!(
                "Error fetching or parsing feed for {}: {}",
                self.source, detail
            ),
        }
    }
}

impl fmt::Display for IngestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Outcome of one ingestion call: the merged articles plus every source
/// that was skipped along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub articles: Vec<Article>,
    pub failures: Vec<IngestFailure>,
}

impl IngestReport {
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Articles to display, at most `count`
    pub fn top(&self, count: usize) -> &[Article] {
        &self.articles[..count.min(self.articles.len())]
    }
}
