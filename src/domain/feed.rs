use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{FeederError, FeederResult};

/// A named feed endpoint. The name is the display label shown next to every
/// article ingested from this endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub endpoint: Url,
}

impl FeedSource {
    pub fn new(name: impl Into<String>, endpoint: Url) -> FeederResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(FeederError::InvalidInput(
                "Source name must not be empty".to_string(),
            ));
        }

        Ok(Self { name, endpoint })
    }

    /// Build a source from a raw endpoint string
    pub fn parse(name: impl Into<String>, endpoint: &str) -> FeederResult<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| FeederError::InvalidUrl(format!("{}: {}", endpoint, e)))?;
        Self::new(name, endpoint)
    }
}
