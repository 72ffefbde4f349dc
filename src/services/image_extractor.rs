use crate::domain::RawEntry;
use crate::html;

/// Find a representative image for an entry.
///
/// Checked in order, first hit wins:
/// 1. first media thumbnail
/// 2. first media content item declared as an image
/// 3. first `<img src>` embedded in the summary HTML
pub fn extract_image(entry: &RawEntry) -> Option<String> {
    if let Some(thumbnail) = entry.media_thumbnails.first() {
        return Some(thumbnail.clone());
    }

    if let Some(content) = entry.media_content.iter().find(|c| c.is_image()) {
        return Some(content.url.clone());
    }

    entry.summary.as_deref().and_then(html::first_image_src)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MediaContent;

    const SUMMARY_WITH_IMAGE: &str =
        r#"<p>Story</p><img src="https://cdn.example.com/inline.jpg">"#;

    #[test]
    fn test_thumbnail_wins_over_summary_image() {
        let entry = RawEntry::new()
            .with_thumbnail("https://cdn.example.com/thumb.jpg")
            .with_summary(SUMMARY_WITH_IMAGE);

        assert_eq!(
            extract_image(&entry).as_deref(),
            Some("https://cdn.example.com/thumb.jpg")
        );
    }

    #[test]
    fn test_first_thumbnail_is_used() {
        let entry = RawEntry::new()
            .with_thumbnail("https://cdn.example.com/first.jpg")
            .with_thumbnail("https://cdn.example.com/second.jpg");

        assert_eq!(
            extract_image(&entry).as_deref(),
            Some("https://cdn.example.com/first.jpg")
        );
    }

    #[test]
    fn test_media_content_picks_first_image() {
        let entry = RawEntry::new()
            .with_media_content(MediaContent::new("https://cdn.example.com/clip.mp4", Some("video")))
            .with_media_content(MediaContent::new("https://cdn.example.com/still.png", Some("image")))
            .with_media_content(MediaContent::new("https://cdn.example.com/other.png", Some("image")))
            .with_summary(SUMMARY_WITH_IMAGE);

        assert_eq!(
            extract_image(&entry).as_deref(),
            Some("https://cdn.example.com/still.png")
        );
    }

    #[test]
    fn test_single_media_content_image_is_used() {
        let entry = RawEntry::new()
            .with_media_content(MediaContent::new("https://cdn.example.com/only.jpg", Some("image")))
            .with_summary(SUMMARY_WITH_IMAGE);

        assert_eq!(
            extract_image(&entry).as_deref(),
            Some("https://cdn.example.com/only.jpg")
        );
    }

    #[test]
    fn test_non_image_media_falls_back_to_summary() {
        let entry = RawEntry::new()
            .with_media_content(MediaContent::new("https://cdn.example.com/clip.mp4", Some("video")))
            .with_summary(SUMMARY_WITH_IMAGE);

        assert_eq!(
            extract_image(&entry).as_deref(),
            Some("https://cdn.example.com/inline.jpg")
        );
    }

    #[test]
    fn test_no_image_anywhere() {
        assert_eq!(extract_image(&RawEntry::new()), None);

        let entry = RawEntry::new().with_summary("<p>Words only</p>");
        assert_eq!(extract_image(&entry), None);
    }

    #[test]
    fn test_garbage_summary_is_not_fatal() {
        let entry = RawEntry::new().with_summary("<img src=<<>>\"\0</");
        let _ = extract_image(&entry);
    }
}
