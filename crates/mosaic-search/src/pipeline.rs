use futures_util::{StreamExt, stream};
use mosaic_core::ResultSet;
use mosaic_types::{FetchError, FetchFailure, LoadedImageSet, SearchRequest};

use crate::client::SearchClient;
use crate::images::ImageLoader;

/// Search, validate, deduplicate and preload one result set.
///
/// Image policy: the first reference (in result order) that fails to load
/// aborts the whole fetch with [`FetchError::ImageLoad`]; nothing is
/// substituted.
pub struct FetchPipeline<C, L> {
    client: C,
    loader: L,
    max_in_flight: usize,
}

impl<C, L> FetchPipeline<C, L>
where
    C: SearchClient,
    L: ImageLoader,
{
    pub fn new(client: C, loader: L, max_in_flight: usize) -> Self {
        Self {
            client,
            loader,
            max_in_flight: max_in_flight.max(1),
        }
    }

    /// Full query URL for `request`
    pub fn url(&self, request: &SearchRequest) -> String {
        request.url(self.client.endpoint())
    }

    /// Issue the request and apply the deduplication gate
    pub async fn resolve(&self, request: &SearchRequest) -> Result<ResultSet, FetchError> {
        let refs = self.client.search(request).await?;
        let raw = refs.len();
        let set = ResultSet::accept(refs)?;
        tracing::info!(raw, unique = set.as_slice().len(), "search resolved");
        Ok(set)
    }

    /// Load every reference, keeping result order.
    ///
    /// `on_progress(loaded, total)` runs after each image completes.
    pub async fn preload<F>(
        &self,
        set: &ResultSet,
        mut on_progress: F,
    ) -> Result<LoadedImageSet, FetchError>
    where
        F: FnMut(usize, usize) + Send,
    {
        let total = set.as_slice().len();
        // owned refs keep the stream future `Send` for spawned fetch tasks
        let mut loads = stream::iter(set.as_slice().to_vec())
            .map(|uri| async move { self.loader.load(&uri).await })
            .buffered(self.max_in_flight);

        let mut images = Vec::with_capacity(total);
        while let Some(result) = loads.next().await {
            // dropping `loads` cancels the downloads still running
            let image = result?;
            images.push(image);
            on_progress(images.len(), total);
        }

        Ok(LoadedImageSet::new(images))
    }

    /// Resolve then preload, pairing any error with the attempted URL
    pub async fn fetch<F>(
        &self,
        request: &SearchRequest,
        on_progress: F,
    ) -> Result<LoadedImageSet, FetchFailure>
    where
        F: FnMut(usize, usize) + Send,
    {
        let url = self.url(request);
        let result = async {
            let set = self.resolve(request).await?;
            self.preload(&set, on_progress).await
        }
        .await;

        result.map_err(|error| {
            tracing::warn!(%url, %error, "fetch failed");
            FetchFailure::new(url, error)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::num::NonZeroU32;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use mosaic_core::query;
    use mosaic_types::{Category, DecodedImage, ImageRef};

    use super::*;

    const ENDPOINT: &str = "https://search.example/search";

    struct FakeClient {
        response: Result<Vec<ImageRef>, FetchError>,
    }

    #[async_trait]
    impl SearchClient for FakeClient {
        fn endpoint(&self) -> &str {
            ENDPOINT
        }

        async fn search(&self, _request: &SearchRequest) -> Result<Vec<ImageRef>, FetchError> {
            self.response.clone()
        }
    }

    #[derive(Default)]
    struct FakeLoader {
        failing: HashSet<String>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ImageLoader for FakeLoader {
        async fn load(&self, uri: &ImageRef) -> Result<DecodedImage, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.contains(uri.as_str()) {
                return Err(FetchError::ImageLoad {
                    uri: uri.to_string(),
                    reason: "corrupt".to_string(),
                });
            }
            Ok(DecodedImage {
                uri: uri.clone(),
                width: 100,
                height: 100,
                pixels: Arc::from(vec![0u8; 4]),
            })
        }
    }

    fn numbered(count: usize) -> Vec<ImageRef> {
        (0..count)
            .map(|i| ImageRef(format!("https://img.example/{i}.jpg")))
            .collect()
    }

    fn request() -> SearchRequest {
        query::build("daft punk", Category::Music, NonZeroU32::new(200).unwrap())
    }

    fn pipeline(
        response: Result<Vec<ImageRef>, FetchError>,
        loader: FakeLoader,
    ) -> FetchPipeline<FakeClient, FakeLoader> {
        FetchPipeline::new(FakeClient { response }, loader, 4)
    }

    #[tokio::test]
    async fn eighteen_results_fail_with_rendered_query() {
        let pipeline = pipeline(Ok(numbered(18)), FakeLoader::default());
        let failure = pipeline.fetch(&request(), |_, _| {}).await.unwrap_err();

        assert_eq!(
            failure.url,
            "https://search.example/search?term=daft+punk&media=music&limit=200"
        );
        assert_eq!(
            failure.error,
            FetchError::InsufficientResults {
                found: 18,
                required: 21
            }
        );
        assert_eq!(pipeline.loader.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn twenty_five_results_load_in_response_order() {
        let pipeline = pipeline(Ok(numbered(25)), FakeLoader::default());
        let images = pipeline.fetch(&request(), |_, _| {}).await.unwrap();

        assert_eq!(images.len(), 25);
        for (image, expected) in images.iter().zip(numbered(25)) {
            assert_eq!(image.uri, expected);
        }
    }

    #[tokio::test]
    async fn duplicates_are_dropped_before_loading() {
        let mut raw = numbered(22);
        raw.extend(numbered(10));
        let pipeline = pipeline(Ok(raw), FakeLoader::default());
        let images = pipeline.fetch(&request(), |_, _| {}).await.unwrap();

        assert_eq!(images.len(), 22);
        assert_eq!(pipeline.loader.calls.load(Ordering::SeqCst), 22);
    }

    #[tokio::test]
    async fn duplicates_can_push_a_set_below_the_gate() {
        let mut raw = numbered(15);
        raw.extend(numbered(15));
        let pipeline = pipeline(Ok(raw), FakeLoader::default());
        let failure = pipeline.fetch(&request(), |_, _| {}).await.unwrap_err();
        assert!(matches!(
            failure.error,
            FetchError::InsufficientResults { found: 15, .. }
        ));
    }

    #[tokio::test]
    async fn image_failure_aborts_with_failing_reference() {
        let loader = FakeLoader {
            failing: HashSet::from(["https://img.example/7.jpg".to_string()]),
            ..Default::default()
        };
        let pipeline = pipeline(Ok(numbered(25)), loader);
        let failure = pipeline.fetch(&request(), |_, _| {}).await.unwrap_err();

        assert_eq!(
            failure.error,
            FetchError::ImageLoad {
                uri: "https://img.example/7.jpg".to_string(),
                reason: "corrupt".to_string()
            }
        );
    }

    #[tokio::test]
    async fn transport_errors_pass_through() {
        let pipeline = pipeline(
            Err(FetchError::Transport("HTTP 500".to_string())),
            FakeLoader::default(),
        );
        let failure = pipeline.fetch(&request(), |_, _| {}).await.unwrap_err();
        assert_eq!(failure.error, FetchError::Transport("HTTP 500".to_string()));
        assert!(failure.report().contains("Exception: Transport error: HTTP 500"));
    }

    #[tokio::test]
    async fn fetch_runs_on_a_spawned_task() {
        let pipeline = Arc::new(pipeline(Ok(numbered(25)), FakeLoader::default()));
        let task = tokio::spawn({
            let pipeline = pipeline.clone();
            async move { pipeline.fetch(&request(), |_, _| {}).await }
        });

        let images = task.await.unwrap().unwrap();
        assert_eq!(images.len(), 25);
        assert_eq!(pipeline.loader.calls.load(Ordering::SeqCst), 25);
    }

    #[tokio::test]
    async fn progress_reaches_total() {
        let pipeline = pipeline(Ok(numbered(30)), FakeLoader::default());
        let mut seen = Vec::new();
        pipeline
            .fetch(&request(), |loaded, total| seen.push((loaded, total)))
            .await
            .unwrap();

        assert_eq!(seen.len(), 30);
        assert!(seen.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(seen.last(), Some(&(30, 30)));
    }
}
