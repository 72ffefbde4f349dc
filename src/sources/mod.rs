pub mod registry;
pub mod rss_atom;
pub mod traits;

pub use registry::SourceRegistry;
pub use rss_atom::RssAtomParser;
pub use traits::{FeedParser, ParsedFeed};
