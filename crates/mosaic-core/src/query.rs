use std::num::NonZeroU32;

use mosaic_types::{Category, SearchRequest};
use url::form_urlencoded;

pub const DEFAULT_LIMIT: NonZeroU32 = match NonZeroU32::new(200) {
    Some(limit) => limit,
    None => unreachable!(),
};

/// Assemble a search request.
///
/// Term and category are form-encoded (space becomes `+`), the limit is rendered
/// as a decimal string. The term is not validated: an empty term is a valid
/// query that simply matches little or nothing.
pub fn build(term: &str, category: Category, limit: NonZeroU32) -> SearchRequest {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("term", term)
        .append_pair("media", category.as_str())
        .append_pair("limit", &limit.to_string())
        .finish();

    SearchRequest {
        term: term.to_string(),
        category,
        limit,
        query,
    }
}
