//! Image retrieval over HTTP.

use std::time::Duration;

use image::DynamicImage;

use super::RenderError;

/// Timeout for a single image download (10 seconds).
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of decoded images, keyed by URL.
///
/// The render pipeline calls `fetch` at most once per cache miss.
pub trait ImageFetcher {
    /// Retrieve and decode the image at `url`.
    fn fetch(&self, url: &str) -> Result<DynamicImage, RenderError>;
}

/// Fetches images with a single blocking HTTP GET.
///
/// No retry: a failed request is returned to the caller immediately.
pub struct HttpFetcher {
    http_client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Create a fetcher with the default 10 second timeout.
    pub fn new() -> Result<Self, RenderError> {
        Self::with_timeout(FETCH_TIMEOUT)
    }

    /// Create a fetcher with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, RenderError> {
        let http_client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { http_client })
    }
}

impl ImageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<DynamicImage, RenderError> {
        log::debug!("Downloading image: {}", url);

        let response = self.http_client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(RenderError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes()?;

        // Format is sniffed from the magic bytes, not the content-type header
        let image = image::load_from_memory(&bytes)?;
        log::debug!(
            "Decoded {}x{} image from {}",
            image.width(),
            image.height(),
            url
        );

        Ok(image)
    }
}
