use opml::{Outline, OPML};

use crate::domain::FeedSource;
use crate::errors::{FeederError, FeederResult};

/// Built-in news sources, in display order
pub const DEFAULT_FEEDS: &[(&str, &str)] = &[
    ("TechCrunch", "http://feeds.feedburner.com/TechCrunch/"),
    ("The Verge", "http://www.theverge.com/rss/index.xml"),
    ("Wired", "https://www.wired.com/feed/rss"),
    ("Ars Technica", "http://feeds.arstechnica.com/arstechnica/index"),
    ("Forbes (Innovation)", "https://www.forbes.com/innovation/feed/"),
    ("R&D World", "https://www.rdworldonline.com/feed/"),
    ("MIT Technology Review", "https://www.technologyreview.com/feed/"),
];

/// How many sources are selected when the user picks none explicitly
pub const DEFAULT_SELECTION_SIZE: usize = 3;

/// Name to endpoint lookup for every source the user can choose from
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    sources: Vec<FeedSource>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in technology news feeds
    pub fn builtin() -> FeederResult<Self> {
        let mut registry = Self::new();
        for (name, endpoint) in DEFAULT_FEEDS {
            registry.register(FeedSource::parse(*name, endpoint)?)?;
        }
        Ok(registry)
    }

    /// Build a registry from OPML content, one source per outline with an xmlUrl
    pub fn from_opml(content: &str) -> FeederResult<Self> {
        let opml = OPML::from_str(content).map_err(|e| FeederError::OpmlParse(e.to_string()))?;

        let mut registry = Self::new();
        for (name, url) in extract_feed_outlines(&opml.body.outlines) {
            registry.register(FeedSource::parse(name, &url)?)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, source: FeedSource) -> FeederResult<()> {
        if self.get(&source.name).is_some() {
            return Err(FeederError::DuplicateSource(source.name));
        }
        self.sources.push(source);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FeedSource> {
        self.sources.iter().find(|s| s.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn sources(&self) -> &[FeedSource] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Resolve names to sources, keeping the requested order and dropping
    /// repeats. Unknown names are an error.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> FeederResult<Vec<FeedSource>> {
        let mut selected: Vec<FeedSource> = Vec::with_capacity(names.len());

        for name in names {
            let name = name.as_ref();
            let source = self
                .get(name)
                .ok_or_else(|| FeederError::UnknownSource(name.to_string()))?;
            if !selected.iter().any(|s| s.name == source.name) {
                selected.push(source.clone());
            }
        }

        Ok(selected)
    }

    /// The first few registered sources
    pub fn default_selection(&self) -> Vec<FeedSource> {
        self.sources
            .iter()
            .take(DEFAULT_SELECTION_SIZE)
            .cloned()
            .collect()
    }

    /// Export the registry to OPML format
    pub fn to_opml(&self) -> FeederResult<String> {
        let mut opml = OPML::default();
        opml.head = Some(opml::Head {
            title: Some("Feeder Sources".to_string()),
            ..Default::default()
        });

        for source in &self.sources {
            let outline = Outline {
                text: source.name.clone(),
                r#type: Some("rss".to_string()),
                xml_url: Some(source.endpoint.to_string()),
                title: Some(source.name.clone()),
                ..Default::default()
            };
            opml.body.outlines.push(outline);
        }

        opml.to_string()
            .map_err(|e| FeederError::OpmlParse(e.to_string()))
    }
}

/// Recursively collect (name, xmlUrl) pairs from OPML outlines
fn extract_feed_outlines(outlines: &[Outline]) -> Vec<(String, String)> {
    let mut feeds = Vec::new();

    for outline in outlines {
        if let Some(url) = outline.xml_url.as_deref().filter(|u| !u.is_empty()) {
            let name = outline
                .title
                .clone()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| outline.text.clone());
            feeds.push((name, url.to_string()));
        }

        // Categories nest their feeds as child outlines
        feeds.extend(extract_feed_outlines(&outline.outlines));
    }

    feeds
}
