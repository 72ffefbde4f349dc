use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Date format used when an article is displayed
pub const DISPLAY_DATE_FORMAT: &str = "%a, %d %b %Y";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub source: String,
    pub title: String,
    pub link: String,
    pub published: Option<DateTime<Utc>>,
    pub summary: String,
    pub image_url: Option<String>,
}

impl Article {
    pub fn new(source: String, title: String) -> Self {
        Self {
            source,
            title,
            link: String::new(),
            published: None,
            summary: String::new(),
            image_url: None,
        }
    }

    pub fn with_link(mut self, link: String) -> Self {
        self.link = link;
        self
    }

    pub fn with_published(mut self, published: Option<DateTime<Utc>>) -> Self {
        self.published = published;
        self
    }

    pub fn with_summary(mut self, summary: String) -> Self {
        self.summary = summary;
        self
    }

    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url;
        self
    }

    /// Publish date as shown to the reader, "N/A" when unknown
    pub fn display_date(&self) -> String {
        self.published
            .map(|dt| dt.format(DISPLAY_DATE_FORMAT).to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display_date_formats_published() {
        let article = Article::new("Wired".to_string(), "Title".to_string())
            .with_published(Some(Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap()));

        assert_eq!(article.display_date(), "Mon, 01 Jan 2024");
    }

    #[test]
    fn test_display_date_without_published() {
        let article = Article::new("Wired".to_string(), "Title".to_string());
        assert_eq!(article.display_date(), "N/A");
    }
}
