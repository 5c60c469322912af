//! Render pipeline: image URL in, cached block of terminal text out.
//!
//! A render runs these stages in sequence, with no internal concurrency:
//!
//! 1. look the URL up in the [`RenderCache`]
//! 2. on a miss, [`ImageFetcher::fetch`] downloads and decodes the image
//! 3. the image is resampled to the derived character grid
//! 4. pixels are converted to glyphs and formatted into rows
//! 5. the block is written back to the cache (failures only logged)
//!
//! Concurrent renders of the same URL are not coordinated; both fetch and
//! the last write wins. Output is deterministic per URL and options.

mod cache;
mod error;
mod fetch;
mod select;

use std::path::PathBuf;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::ascii;

pub use cache::{sanitize_url, CacheEntry, CacheKey, RenderCache, CACHE_EXTENSION};
pub use error::RenderError;
pub use fetch::{HttpFetcher, ImageFetcher, FETCH_TIMEOUT};
pub use select::{select_image, ImageCandidate, FALLBACK_ROLE};

/// Name of the cache directory created under the system temp dir.
pub const DEFAULT_CACHE_DIR_NAME: &str = "sonarr-cli-ascii-cache";

/// Default grid size, small enough to sit next to a listing entry.
pub const DEFAULT_WIDTH: u32 = 8;
pub const DEFAULT_HEIGHT: u32 = 8;

/// Default width in series listings, where posters get more room.
pub const LISTING_WIDTH: u32 = 30;

/// Which of an entity's images to prefer.
///
/// Parsing ignores case, matching how candidate roles are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ImageRole {
    #[default]
    Poster,
    Banner,
    Fanart,
}

impl ImageRole {
    /// Role name as it appears in image candidates.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageRole::Poster => "poster",
            ImageRole::Banner => "banner",
            ImageRole::Fanart => "fanart",
        }
    }
}

impl std::str::FromStr for ImageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "poster" => Ok(ImageRole::Poster),
            "banner" => Ok(ImageRole::Banner),
            "fanart" => Ok(ImageRole::Fanart),
            _ => Err(format!(
                "unknown image role '{}', expected one of poster, banner, fanart",
                s
            )),
        }
    }
}

impl TryFrom<String> for ImageRole {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl std::fmt::Display for ImageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for one render.
///
/// `width` and `height` are in character cells; a zero value is derived
/// from the other and the source aspect ratio. Both zero is rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub colored: bool,
    pub cache_dir: PathBuf,
    pub role: ImageRole,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            colored: true,
            cache_dir: default_cache_dir(),
            role: ImageRole::default(),
        }
    }
}

impl RenderConfig {
    /// Key under which a render of `url` with these options is cached.
    pub fn cache_key(&self, url: &str) -> CacheKey {
        CacheKey::for_render(url, self.width, self.height, self.colored)
    }
}

/// Default cache location: `<temp dir>/sonarr-cli-ascii-cache`.
/// Only computes the path; nothing is created.
pub fn default_cache_dir() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_CACHE_DIR_NAME)
}

/// Convert an already decoded image to a formatted block.
///
/// This is the pure part of the pipeline: derive dimensions, resample,
/// convert, format, and strip escapes when color is off.
pub fn render_image(img: &DynamicImage, config: &RenderConfig) -> Result<String, RenderError> {
    let (width, height) =
        ascii::derive_dimensions(img.width(), img.height(), config.width, config.height)
            .ok_or(RenderError::InvalidDimensions)?;

    let resized = ascii::resample(img, width, height);
    let glyphs = ascii::convert(&resized, config.colored, false);
    let block = ascii::format_grid(&glyphs, width, height);

    if config.colored {
        Ok(block)
    } else {
        Ok(ascii::strip_ansi(&block))
    }
}

/// Read-through, write-through renderer over a [`RenderCache`].
pub struct Renderer<F = HttpFetcher> {
    fetcher: F,
    cache: RenderCache,
}

impl Renderer<HttpFetcher> {
    /// Create a renderer that downloads over HTTP.
    pub fn new(cache: RenderCache) -> Result<Self, RenderError> {
        Ok(Self::with_fetcher(HttpFetcher::new()?, cache))
    }

    /// Create an HTTP renderer caching under `config.cache_dir`.
    pub fn from_config(config: &RenderConfig) -> Result<Self, RenderError> {
        Self::new(RenderCache::new(config.cache_dir.clone()))
    }
}

impl<F: ImageFetcher> Renderer<F> {
    /// Create a renderer with a custom image source.
    pub fn with_fetcher(fetcher: F, cache: RenderCache) -> Self {
        Self { fetcher, cache }
    }

    /// Get the cache this renderer reads and writes.
    pub fn cache(&self) -> &RenderCache {
        &self.cache
    }

    /// Get the image source.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Render the image at `url`, serving from cache when possible.
    ///
    /// # Errors
    ///
    /// - `InvalidDimensions` if both width and height are zero
    /// - `Http` / `HttpStatus` / `Decode` if the image could not be retrieved
    ///
    /// A failed cache write is logged and does not fail the render.
    pub fn render(&self, url: &str, config: &RenderConfig) -> Result<String, RenderError> {
        if config.width == 0 && config.height == 0 {
            return Err(RenderError::InvalidDimensions);
        }

        let key = config.cache_key(url);
        if let Some(block) = self.cache.get(&key) {
            log::debug!("Cache hit: {}", key.as_str());
            return Ok(block);
        }
        log::debug!("Cache miss: {}", key.as_str());

        let img = self.fetcher.fetch(url)?;
        let block = render_image(&img, config)?;

        if let Err(e) = self.cache.put(&key, &block) {
            log::warn!("Failed to cache ASCII art for {}: {}", url, e);
        }

        Ok(block)
    }

    /// Pick the best image for `config.role` and render it.
    ///
    /// # Errors
    ///
    /// `NoImage` if `candidates` is empty, otherwise as [`Renderer::render`].
    pub fn render_candidates(
        &self,
        candidates: &[ImageCandidate],
        config: &RenderConfig,
    ) -> Result<String, RenderError> {
        let url = select_image(candidates, config.role.as_str())?;
        self.render(url, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    /// Serves a fixed gradient image and counts calls.
    struct CountingFetcher {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingFetcher {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ImageFetcher for CountingFetcher {
        fn fetch(&self, _url: &str) -> Result<DynamicImage, RenderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(RenderError::HttpStatus { status: 503 });
            }
            Ok(gradient(200, 100))
        }
    }

    fn gradient(width: u32, height: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            let v = ((x * 255) / width.max(1)) as u8;
            Rgb([v, ((y * 255) / height.max(1)) as u8, 255 - v])
        });
        DynamicImage::ImageRgb8(img)
    }

    fn config_in(dir: &TempDir) -> RenderConfig {
        RenderConfig {
            cache_dir: dir.path().join("cache"),
            ..RenderConfig::default()
        }
    }

    fn renderer(config: &RenderConfig, fetcher: CountingFetcher) -> Renderer<CountingFetcher> {
        Renderer::with_fetcher(fetcher, RenderCache::new(config.cache_dir.clone()))
    }

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.width, 8);
        assert_eq!(config.height, 8);
        assert!(config.colored);
        assert_eq!(config.role, ImageRole::Poster);
        assert!(config.cache_dir.ends_with(DEFAULT_CACHE_DIR_NAME));
    }

    #[test]
    fn test_second_render_is_served_from_cache() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);
        let renderer = renderer(&config, CountingFetcher::new());

        let first = renderer.render("https://img/a.png", &config).unwrap();
        let second = renderer.render("https://img/a.png", &config).unwrap();

        assert_eq!(first, second);
        assert_eq!(renderer.fetcher().calls(), 1);
    }

    #[test]
    fn test_changed_options_miss_the_cache() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);
        let renderer = renderer(&config, CountingFetcher::new());

        renderer.render("https://img/a.png", &config).unwrap();
        let mono = RenderConfig {
            colored: false,
            ..config.clone()
        };
        renderer.render("https://img/a.png", &mono).unwrap();

        assert_eq!(renderer.fetcher().calls(), 2);
    }

    #[test]
    fn test_cache_write_failure_is_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where the cache directory should be
        let blocker = temp_dir.path().join("cache");
        std::fs::write(&blocker, "not a directory").unwrap();
        let config = config_in(&temp_dir);
        let renderer = renderer(&config, CountingFetcher::new());

        let block = renderer.render("https://img/a.png", &config).unwrap();
        assert!(!block.is_empty());

        // Nothing was cached, so the next render fetches again
        renderer.render("https://img/a.png", &config).unwrap();
        assert_eq!(renderer.fetcher().calls(), 2);
    }

    #[test]
    fn test_unreadable_entry_is_refetched() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);
        let renderer = renderer(&config, CountingFetcher::new());
        let url = "https://img/a.png";

        // A directory occupying the entry path: reads fail and so do writes
        std::fs::create_dir_all(renderer.cache().entry_path(&config.cache_key(url))).unwrap();

        assert!(renderer.render(url, &config).is_ok());
        assert!(renderer.render(url, &config).is_ok());
        assert_eq!(renderer.fetcher().calls(), 2);
    }

    #[test]
    fn test_fetch_error_propagates_and_is_not_cached() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);
        let renderer = renderer(&config, CountingFetcher::failing());

        let err = renderer.render("https://img/a.png", &config).unwrap_err();
        assert!(err.is_fetch_error());
        assert!(renderer.cache().list_entries().unwrap().is_empty());
    }

    #[test]
    fn test_both_dimensions_zero_is_rejected_before_fetch() {
        let temp_dir = TempDir::new().unwrap();
        let config = RenderConfig {
            width: 0,
            height: 0,
            ..config_in(&temp_dir)
        };
        let renderer = renderer(&config, CountingFetcher::new());

        assert!(matches!(
            renderer.render("https://img/a.png", &config),
            Err(RenderError::InvalidDimensions)
        ));
        assert_eq!(renderer.fetcher().calls(), 0);
    }

    #[test]
    fn test_width_only_render_uses_derived_height() {
        let temp_dir = TempDir::new().unwrap();
        let config = RenderConfig {
            width: 40,
            height: 0,
            colored: false,
            ..config_in(&temp_dir)
        };
        let renderer = renderer(&config, CountingFetcher::new());

        let block = renderer.render("https://img/a.png", &config).unwrap();
        let lines: Vec<&str> = block.split('\n').collect();
        assert_eq!(lines.len(), 10);
        assert!(lines.iter().all(|l| l.chars().count() == 40));
    }

    #[test]
    fn test_monochrome_has_no_escapes() {
        let config = RenderConfig {
            colored: false,
            ..RenderConfig::default()
        };
        let block = render_image(&gradient(64, 64), &config).unwrap();
        assert!(!block.contains('\x1b'));
    }

    #[test]
    fn test_stripped_color_matches_monochrome() {
        let img = gradient(120, 80);
        let colored = render_image(&img, &RenderConfig::default()).unwrap();
        let mono = render_image(
            &img,
            &RenderConfig {
                colored: false,
                ..RenderConfig::default()
            },
        )
        .unwrap();

        assert!(colored.contains("\x1b[38;2;"));
        assert_eq!(ascii::strip_ansi(&colored), mono);
    }

    #[test]
    fn test_render_candidates_empty_is_no_image() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(&temp_dir);
        let renderer = renderer(&config, CountingFetcher::new());

        assert!(matches!(
            renderer.render_candidates(&[], &config),
            Err(RenderError::NoImage)
        ));
        assert_eq!(renderer.fetcher().calls(), 0);
    }

    #[test]
    fn test_render_candidates_uses_selected_url() {
        let temp_dir = TempDir::new().unwrap();
        let config = RenderConfig {
            role: ImageRole::Banner,
            ..config_in(&temp_dir)
        };
        let renderer = renderer(&config, CountingFetcher::new());
        let candidates = vec![
            ImageCandidate::new("poster", "https://img/p.png"),
            ImageCandidate::new("banner", "https://img/b.png"),
        ];

        renderer.render_candidates(&candidates, &config).unwrap();
        assert!(renderer
            .cache()
            .get(&config.cache_key("https://img/b.png"))
            .is_some());
    }
}
