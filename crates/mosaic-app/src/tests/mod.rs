
use std::io::Cursor;

use mosaic_config::Config;
use serde_json::json;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub(crate) fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(3, 3, image::Rgba([200, 100, 50, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

/// Search endpoint answering `results` unique artworks served by the same mock
pub(crate) async fn artwork_server(results: usize) -> MockServer {
    let server = MockServer::start().await;

    let entries: Vec<_> = (0..results)
        .map(|i| json!({ "artworkUrl100": format!("{}/art/{i}.png", server.uri()) }))
        .collect();
    let body = json!({ "resultCount": results, "results": entries });

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/art/\d+\.png$"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes()))
        .mount(&server)
        .await;

    server
}

pub(crate) fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.search.endpoint = format!("{}/search", server.uri());
    config.search.request_timeout_secs = 5;
    config.slideshow.interval_ms = 50;
    config.slideshow.seed = Some(11);
    config
}
