use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::FetchFailure;

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// User action, consumed by the interactive thread
    UiEvent(UiEvent),
    /// Interactive thread asks the backend to run a fetch
    FetchRequested(SearchRequest),
    FetchProgress {
        loaded: usize,
        total: usize,
    },
    FetchSucceeded {
        url: String,
        images: LoadedImageSet,
    },
    FetchFailed(FetchFailure),
    SlideshowTick {
        generation: u64,
    },
    BackendReady,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Search {
        term: String,
        category: Option<Category>,
    },
    TogglePlayback,
    Render,
    Close,
}

/// Media category understood by the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Movie,
    Podcast,
    #[default]
    Music,
    MusicVideo,
    Audiobook,
    ShortFilm,
    TvShow,
    Software,
    Ebook,
    All,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Movie,
        Category::Podcast,
        Category::Music,
        Category::MusicVideo,
        Category::Audiobook,
        Category::ShortFilm,
        Category::TvShow,
        Category::Software,
        Category::Ebook,
        Category::All,
    ];

    /// Wire value of the `media` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Movie => "movie",
            Category::Podcast => "podcast",
            Category::Music => "music",
            Category::MusicVideo => "musicVideo",
            Category::Audiobook => "audiobook",
            Category::ShortFilm => "shortFilm",
            Category::TvShow => "tvShow",
            Category::Software => "software",
            Category::Ebook => "ebook",
            Category::All => "all",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown media category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Transport-ready search request.
///
/// `query` holds the already percent-encoded `term=..&media=..&limit=..` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub term: String,
    pub category: Category,
    pub limit: NonZeroU32,
    pub query: String,
}

impl SearchRequest {
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}?{}", endpoint, self.query)
    }
}

/// Opaque URI of a remotely hosted image
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(s: &str) -> Self {
        ImageRef(s.to_string())
    }
}

impl From<String> for ImageRef {
    fn from(s: String) -> Self {
        ImageRef(s)
    }
}

/// RGBA8 image decoded off the interactive thread
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub uri: ImageRef,
    pub width: u32,
    pub height: u32,
    pub pixels: Arc<[u8]>,
}

/// Decoded images, index-aligned with the result set they came from
#[derive(Debug, Clone, Default)]
pub struct LoadedImageSet {
    images: Arc<[DecodedImage]>,
}

impl LoadedImageSet {
    pub fn new(images: Vec<DecodedImage>) -> Self {
        Self {
            images: images.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DecodedImage> {
        self.images.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DecodedImage> {
        self.images.iter()
    }
}
