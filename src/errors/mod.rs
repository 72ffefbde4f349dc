use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeederError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Registry errors
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),

    #[error("Unknown news source: {0}")]
    UnknownSource(String),

    #[error("Duplicate news source: {0}")]
    DuplicateSource(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Unsupported feed endpoint scheme: {0}")]
    UnsupportedScheme(String),

    // Parsing errors
    #[error("OPML parsing failed: {0}")]
    OpmlParse(String),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // User input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type FeederResult<T> = Result<T, FeederError>;
