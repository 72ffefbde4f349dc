use chrono::{DateTime, Utc};

/// One media:content (or enclosure) item attached to an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaContent {
    pub url: String,
    /// Top-level media kind such as "image", "video" or "audio"
    pub medium: Option<String>,
}

impl MediaContent {
    pub fn new(url: impl Into<String>, medium: Option<&str>) -> Self {
        Self {
            url: url.into(),
            medium: medium.map(str::to_string),
        }
    }

    pub fn is_image(&self) -> bool {
        self.medium
            .as_deref()
            .is_some_and(|m| m.eq_ignore_ascii_case("image"))
    }
}

/// A syndication item as it arrives from a feed, before normalization.
///
/// Every field is optional because feeds disagree on what they carry.
/// The fields are resolved once here, at the parsing boundary, so the
/// normalizer never has to dig through the underlying feed model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    pub summary: Option<String>,
    pub media_thumbnails: Vec<String>,
    pub media_content: Vec<MediaContent>,
}

impl RawEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_link(mut self, link: &str) -> Self {
        self.link = Some(link.to_string());
        self
    }

    pub fn with_published(mut self, published: DateTime<Utc>) -> Self {
        self.published = Some(published);
        self
    }

    pub fn with_updated(mut self, updated: DateTime<Utc>) -> Self {
        self.updated = Some(updated);
        self
    }

    pub fn with_summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }

    pub fn with_thumbnail(mut self, url: &str) -> Self {
        self.media_thumbnails.push(url.to_string());
        self
    }

    pub fn with_media_content(mut self, content: MediaContent) -> Self {
        self.media_content.push(content);
        self
    }
}

impl From<feed_rs::model::Entry> for RawEntry {
    fn from(entry: feed_rs::model::Entry) -> Self {
        let title = entry.title.map(|t| t.content);
        let link = entry.links.into_iter().next().map(|l| l.href);

        // Atom feeds without a summary often carry the text only in content
        let summary = entry
            .summary
            .map(|s| s.content)
            .or_else(|| entry.content.and_then(|c| c.body));

        let mut media_thumbnails = Vec::new();
        let mut media_content = Vec::new();

        for object in entry.media {
            media_thumbnails.extend(
                object
                    .thumbnails
                    .into_iter()
                    .map(|t| t.image.uri)
                    .filter(|uri| !uri.trim().is_empty()),
            );

            for content in object.content {
                let Some(url) = content.url else {
                    continue;
                };
                // feed-rs drops the MRSS medium attribute, so fall back to the extension
                let medium = content
                    .content_type
                    .as_ref()
                    .map(|mime| mime.ty().as_str().to_string())
                    .or_else(|| medium_from_extension(url.path()).map(str::to_string));

                media_content.push(MediaContent {
                    url: url.to_string(),
                    medium,
                });
            }
        }

        Self {
            title,
            link,
            published: entry.published,
            updated: entry.updated,
            summary,
            media_thumbnails,
            media_content,
        }
    }
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

fn medium_from_extension(path: &str) -> Option<&'static str> {
    let (_, extension) = path.rsplit_once('.')?;
    IMAGE_EXTENSIONS
        .iter()
        .any(|e| extension.eq_ignore_ascii_case(e))
        .then_some("image")
}
