use chrono::{DateTime, Local};

use crate::domain::{Article, IngestReport};

pub const NO_SELECTION_MESSAGE: &str =
    "Please select at least one news source to see the latest articles.";
pub const NO_ARTICLES_MESSAGE: &str =
    "Could not fetch any articles. Please check your connection or try again later.";

const RULE: &str = "----------------------------------------";

/// Text view of at most `count` articles
pub fn render_report(report: &IngestReport, count: usize, updated_at: DateTime<Local>) -> String {
    if report.is_empty() {
        return format!("{}\n", NO_ARTICLES_MESSAGE);
    }

    let mut out = String::new();
    out.push_str(&format!("Top {} Latest Articles\n", count));
    out.push_str(&format!(
        "Last updated: {}\n",
        updated_at.format("%I:%M %p, %d %B %Y")
    ));
    out.push_str(RULE);
    out.push('\n');

    for article in report.top(count) {
        out.push_str(&render_article(article));
        out.push('\n');
    }

    out
}

/// Format: title, link, "{source} | {date}", summary, then image if any
pub fn render_article(article: &Article) -> String {
    let mut block = format!("{}\n", article.title);

    if !article.link.is_empty() {
        block.push_str(&format!("  {}\n", article.link));
    }
    block.push_str(&format!("  {} | {}\n", article.source, article.display_date()));
    if !article.summary.is_empty() {
        block.push_str(&format!("  {}\n", article.summary));
    }
    if let Some(image_url) = &article.image_url {
        block.push_str(&format!("  Image: {}\n", image_url));
    }

    block
}
