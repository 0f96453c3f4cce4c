use std::fmt;

/// Why a fetch was aborted
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("{found} results found, but {required} or more are required")]
    InsufficientResults { found: usize, required: usize },

    #[error("Image load error for {uri}: {reason}")]
    ImageLoad { uri: String, reason: String },
}

/// A failed fetch together with the query that was attempted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub url: String,
    pub error: FetchError,
}

impl FetchFailure {
    pub fn new(url: impl Into<String>, error: FetchError) -> Self {
        Self {
            url: url.into(),
            error,
        }
    }

    /// Text shown in the error dialog
    pub fn report(&self) -> String {
        format!("URI: {}\n\nException: {}", self.url, self.error)
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.error, self.url)
    }
}

impl std::error::Error for FetchFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_contains_query_and_cause() {
        let failure = FetchFailure::new(
            "https://itunes.apple.com/search?term=x&media=music&limit=200",
            FetchError::InsufficientResults {
                found: 18,
                required: 21,
            },
        );
        let report = failure.report();
        assert!(report.starts_with("URI: https://itunes.apple.com/search?term=x"));
        assert!(report.contains("18 results found, but 21 or more are required"));
    }
}
