pub mod error;
pub mod types;

pub use error::{FetchError, FetchFailure};
pub use types::*;
