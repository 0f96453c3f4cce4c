mod client;
mod images;
mod pipeline;
pub mod schema;

pub use client::{ItunesClient, SearchClient};
pub use images::{HttpImageLoader, ImageLoader, decode_image};
pub use pipeline::FetchPipeline;
