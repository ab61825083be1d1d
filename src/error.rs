use thiserror::Error;

/// Failures of a page update run
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("FRED API key missing: set FRED_API_KEY or pass --key")]
    MissingApiKey,

    #[error("Failed to rewrite SVG: {0}")]
    Svg(String),

    #[error("Failed to render page: {0}")]
    Page(String),

    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[cfg(not(target_arch = "wasm32"))]
    #[error("FRED request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl UpdateError {
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
