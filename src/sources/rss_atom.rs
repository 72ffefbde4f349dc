use std::time::Duration;

use feed_rs::parser;
use reqwest::blocking::Client;
use url::Url;

use crate::domain::RawEntry;
use crate::errors::{FeederError, FeederResult};
use crate::sources::traits::{FeedParser, ParsedFeed};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fetches RSS, Atom and JSON feeds over HTTP(S), or from disk for
/// `file://` endpoints
pub struct RssAtomParser {
    client: Client,
}

impl RssAtomParser {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .user_agent(concat!("feeder/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    fn fetch_bytes(&self, endpoint: &Url) -> FeederResult<Vec<u8>> {
        match endpoint.scheme() {
            "http" | "https" => {
                let response = self.client.get(endpoint.as_str()).send()?;
                let status = response.status();
                if !status.is_success() {
                    return Err(FeederError::HttpStatus {
                        status: status.as_u16(),
                        url: endpoint.to_string(),
                    });
                }
                Ok(response.bytes()?.to_vec())
            }
            "file" => {
                let path = endpoint
                    .to_file_path()
                    .map_err(|_| FeederError::InvalidUrl(endpoint.to_string()))?;
                Ok(std::fs::read(path)?)
            }
            other => Err(FeederError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Parse a feed document. A document feed-rs rejects is reported as
    /// malformed rather than as an error.
    pub fn parse_bytes(bytes: &[u8]) -> ParsedFeed {
        match parser::parse(bytes) {
            Ok(feed) => ParsedFeed::new(feed.entries.into_iter().map(RawEntry::from).collect()),
            Err(e) => {
                tracing::debug!(error = %e, "feed document rejected by parser");
                ParsedFeed::malformed()
            }
        }
    }
}

impl Default for RssAtomParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedParser for RssAtomParser {
    fn parse(&self, endpoint: &Url) -> FeederResult<ParsedFeed> {
        let bytes = self.fetch_bytes(endpoint)?;
        tracing::debug!(endpoint = %endpoint, bytes = bytes.len(), "fetched feed document");

        Ok(Self::parse_bytes(&bytes))
    }
}
