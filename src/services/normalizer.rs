use crate::domain::{Article, RawEntry};
use crate::html;
use crate::services::image_extractor::extract_image;

pub const DEFAULT_SUMMARY_WORD_LIMIT: usize = 500;
pub const MISSING_SUMMARY: &str = "No summary available.";
pub const ELLIPSIS: &str = "...";

/// Turns raw feed entries into display-ready articles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    word_limit: usize,
}

impl Normalizer {
    pub fn new(word_limit: usize) -> Self {
        Self { word_limit }
    }

    pub fn normalize(&self, entry: &RawEntry, source_name: &str) -> Article {
        let published = entry.published.or(entry.updated);

        let raw_summary = entry.summary.as_deref().unwrap_or(MISSING_SUMMARY);
        let summary = truncate_words(&html::strip_to_text(raw_summary), self.word_limit);

        // Title and link are kept verbatim; absent values become empty strings
        Article::new(
            source_name.to_string(),
            entry.title.clone().unwrap_or_default(),
        )
        .with_link(entry.link.clone().unwrap_or_default())
        .with_published(published)
        .with_summary(summary)
        .with_image_url(extract_image(entry))
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_SUMMARY_WORD_LIMIT)
    }
}

/// Normalize with the default summary word limit
pub fn normalize(entry: &RawEntry, source_name: &str) -> Article {
    Normalizer::default().normalize(entry, source_name)
}

/// Keep the first `limit` words followed by an ellipsis when the text is
/// longer than that, otherwise return it untouched
fn truncate_words(text: &str, limit: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= limit {
        return text.to_string();
    }

    let mut truncated = words[..limit].join(" ");
    truncated.push_str(ELLIPSIS);
    truncated
}
