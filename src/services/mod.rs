pub mod image_extractor;
pub mod ingest_service;
pub mod normalizer;
pub mod notification_service;

pub use image_extractor::extract_image;
pub use ingest_service::{sort_newest_first, IngestService};
pub use normalizer::{normalize, Normalizer};
pub use notification_service::{Notifier, SilentNotifier, TracingNotifier};
