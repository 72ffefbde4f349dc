pub mod article;
pub mod entry;
pub mod feed;
pub mod report;

pub use article::Article;
pub use entry::{MediaContent, RawEntry};
pub use feed::FeedSource;
pub use report::{FailureKind, IngestFailure, IngestReport};
