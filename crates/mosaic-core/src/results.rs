use std::collections::HashSet;

use mosaic_types::{FetchError, ImageRef};

use crate::gallery::GRID_SIZE;

/// A full grid plus at least one image to rotate in
pub const MIN_RESULTS: usize = GRID_SIZE + 1;

/// Drop repeated references, keeping the first occurrence of each
pub fn dedup<I>(refs: I) -> Vec<ImageRef>
where
    I: IntoIterator<Item = ImageRef>,
{
    let mut seen = HashSet::new();
    refs.into_iter()
        .filter(|r| seen.insert(r.clone()))
        .collect()
}

/// Deduplicated image references from one search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    refs: Vec<ImageRef>,
}

impl ResultSet {
    /// Deduplicate and apply the minimum-size gate
    pub fn accept<I>(refs: I) -> Result<Self, FetchError>
    where
        I: IntoIterator<Item = ImageRef>,
    {
        let refs = dedup(refs);
        if refs.len() < MIN_RESULTS {
            return Err(FetchError::InsufficientResults {
                found: refs.len(),
                required: MIN_RESULTS,
            });
        }
        Ok(Self { refs })
    }

    pub fn as_slice(&self) -> &[ImageRef] {
        &self.refs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(names: &[&str]) -> Vec<ImageRef> {
        names.iter().map(|n| ImageRef::from(*n)).collect()
    }

    fn numbered(count: usize) -> Vec<ImageRef> {
        (0..count)
            .map(|i| ImageRef(format!("https://img.example/{i}.jpg")))
            .collect()
    }

    #[test]
    fn dedup_keeps_first_seen_order() {
        let deduped = dedup(refs(&["c", "a", "c", "b", "a", "d", "c"]));
        assert_eq!(deduped, refs(&["c", "a", "b", "d"]));
    }

    #[test]
    fn accepts_exactly_twenty_one() {
        let set = ResultSet::accept(numbered(21)).unwrap();
        assert_eq!(set.as_slice().len(), 21);
    }

    #[test]
    fn gate_counts_unique_references() {
        let mut raw = numbered(20);
        raw.extend(numbered(20));
        let err = ResultSet::accept(raw).unwrap_err();
        assert_eq!(
            err,
            FetchError::InsufficientResults {
                found: 20,
                required: 21
            }
        );
    }

    #[test]
    fn gate_rejects_empty() {
        assert!(matches!(
            ResultSet::accept(Vec::new()),
            Err(FetchError::InsufficientResults { found: 0, .. })
        ));
    }

    #[test]
    fn accepted_set_preserves_response_order() {
        let mut raw = numbered(25);
        raw.insert(3, raw[0].clone());
        let set = ResultSet::accept(raw).unwrap();
        assert_eq!(set.as_slice(), numbered(25).as_slice());
    }
}
