pub mod gallery;
pub mod query;
pub mod results;
pub mod slideshow;

pub use gallery::{GRID_COLUMNS, GRID_ROWS, GRID_SIZE, Gallery, Slot, Swap};
pub use results::{MIN_RESULTS, ResultSet};
pub use slideshow::{PlaybackState, SlideshowEngine};
