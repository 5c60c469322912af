//! Error type for the render pipeline.

/// Errors that can occur while rendering an image to text.
///
/// `Http` and `HttpStatus` are fetch failures, `Decode` covers bodies that
/// are not a supported raster image. Cache write failures are never
/// surfaced here; they are logged and the render still succeeds.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to download image: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to download image: HTTP {status}")]
    HttpStatus {
        /// Status code returned by the image host
        status: u16,
    },

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("no suitable image found")]
    NoImage,

    #[error("render width and height are both zero")]
    InvalidDimensions,
}

impl RenderError {
    /// Whether this error came from retrieving the image bytes.
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, RenderError::Http(_) | RenderError::HttpStatus { .. })
    }
}
