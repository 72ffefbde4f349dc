pub mod article_cache;

pub use article_cache::{cache_key, ArticleCache};
