//! Response shape of the search endpoint.
//!
//! Only the fields the gallery reads are mirrored; everything else in a result
//! entry is ignored.

use mosaic_types::{FetchError, ImageRef};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "resultCount")]
    pub result_count: u32,
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "artworkUrl100", default)]
    pub artwork_url100: Option<String>,
}

/// Decode a response body into image references, one per result entry.
///
/// Entries without artwork are skipped. Duplicates are kept here; the result
/// set removes them.
pub fn parse_response(body: &str) -> Result<Vec<ImageRef>, FetchError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    if response.result_count as usize != response.results.len() {
        tracing::warn!(
            result_count = response.result_count,
            results = response.results.len(),
            "resultCount does not match results length"
        );
    }

    let refs: Vec<ImageRef> = response
        .results
        .into_iter()
        .filter_map(|r| r.artwork_url100)
        .filter(|url| !url.is_empty())
        .map(ImageRef)
        .collect();

    tracing::debug!(refs = refs.len(), "parsed search response");
    Ok(refs)
}
