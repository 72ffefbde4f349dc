use url::Url;

use crate::domain::RawEntry;
use crate::errors::FeederResult;

/// A fetched and parsed feed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFeed {
    /// Set when the document could not be understood as a feed
    pub malformed: bool,
    pub entries: Vec<RawEntry>,
}

impl ParsedFeed {
    pub fn new(entries: Vec<RawEntry>) -> Self {
        Self {
            malformed: false,
            entries,
        }
    }

    pub fn malformed() -> Self {
        Self {
            malformed: true,
            entries: Vec::new(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait FeedParser: Send + Sync {
    /// Fetch the document behind `endpoint` and parse it into entries
    fn parse(&self, endpoint: &Url) -> FeederResult<ParsedFeed>;
}
