//! Plain-text and image extraction from feed HTML fragments.

use scraper::{Html, Selector};

/// Extract plain text from HTML content, preserving word boundaries
pub fn strip_to_text(html: &str) -> String {
    let document = Html::parse_fragment(html);
    let mut text = String::new();

    for node in document.root_element().descendants() {
        if let Some(text_node) = node.value().as_text() {
            // Skip text living inside script/style blocks
            let hidden = node
                .ancestors()
                .filter_map(|a| a.value().as_element())
                .any(|e| matches!(e.name(), "script" | "style"));
            if !hidden {
                text.push_str(text_node);
            }
        }
        // Add space before block elements so adjacent paragraphs don't merge
        if let Some(element) = node.value().as_element() {
            match element.name() {
                "p" | "br" | "div" | "li" | "tr" | "td" | "h1" | "h2" | "h3" | "h4"
                | "h5" | "h6" | "blockquote" | "figure" | "figcaption" => text.push(' '),
                _ => {}
            }
        }
    }

    // Collapse whitespace and trim
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `src` of the first `<img>` element carrying one
pub fn first_image_src(html: &str) -> Option<String> {
    let selector = Selector::parse("img[src]").ok()?;
    let document = Html::parse_fragment(html);

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("src"))
        .map(str::trim)
        .find(|src| !src.is_empty())
        .map(str::to_string)
}
