use thiserror::Error;

/// Failures at the edges of the crate: reading pages and payloads, writing
/// results, fetching live pages. Extraction and injection themselves never
/// fail; missing elements are skipped.
#[derive(Debug, Error)]
pub enum FormSyncError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error ({context}): {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON serialize error ({context}): {source}")]
    JsonSerialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("no page source given (pass --html or --url)")]
    MissingSource,
}

pub type Result<T> = std::result::Result<T, FormSyncError>;
