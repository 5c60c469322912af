//! RenderCache - content-addressed disk cache for rendered text blocks.

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// File extension of cache entries.
pub const CACHE_EXTENSION: &str = "ascii";

/// Sanitized URLs longer than this are truncated and suffixed with a hash.
const MAX_SANITIZED_LEN: usize = 160;

/// Replace every character that is unsafe in a path segment with `_`.
///
/// Unsafe characters are `/ \ : * ? " < > |` and control characters. Distinct
/// URLs can collide after sanitization (`https://a/b.png` and
/// `https://a:b.png` both become `https___a_b.png`) and then share a cache
/// entry.
pub fn sanitize_url(url: &str) -> String {
    url.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Lookup key of a cache entry.
///
/// Built from the sanitized source URL plus the render options that shape
/// the output, so changing width, height or color never returns a block
/// rendered under different options.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for `url` rendered at `width` x `height` cells.
    pub fn for_render(url: &str, width: u32, height: u32, colored: bool) -> Self {
        let mode = if colored { "color" } else { "mono" };
        Self(format!(
            "{}.{}x{}.{}",
            Self::url_component(url),
            width,
            height,
            mode
        ))
    }

    /// Sanitized URL, bounded in length.
    ///
    /// Over-long values keep a prefix and gain the first 8 bytes of the
    /// URL's SHA256 as hex so the file name stays within filesystem limits.
    fn url_component(url: &str) -> String {
        let sanitized = sanitize_url(url);
        if sanitized.len() <= MAX_SANITIZED_LEN {
            return sanitized;
        }

        let mut cut = MAX_SANITIZED_LEN;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }

        let digest = Sha256::digest(url.as_bytes());
        format!("{}-{}", &sanitized[..cut], hex::encode(&digest[..8]))
    }

    /// The key as a string (file name without extension).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the entry for this key.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.0, CACHE_EXTENSION)
    }
}

/// Persistent disk cache of rendered blocks.
///
/// Entries live until [`RenderCache::clear`] removes the whole directory;
/// there is no size bound, TTL or per-entry eviction.
#[derive(Debug, Clone)]
pub struct RenderCache {
    cache_dir: PathBuf,
}

impl RenderCache {
    /// Create a RenderCache rooted at `cache_dir`.
    /// Does not create the directory; `put` creates it on demand.
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Get the cache directory path.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Path of the entry for `key`, whether or not it exists.
    pub fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.cache_dir.join(key.file_name())
    }

    /// Get a cached block.
    ///
    /// A missing entry is a miss. An entry that exists but cannot be read is
    /// logged and also treated as a miss.
    pub fn get(&self, key: &CacheKey) -> Option<String> {
        let path = self.entry_path(key);
        match std::fs::read_to_string(&path) {
            Ok(block) => Some(block),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("Failed to read cache entry {:?}: {}", path, e);
                None
            }
        }
    }

    /// Store a block, overwriting any previous entry for `key`.
    pub fn put(&self, key: &CacheKey, block: &str) -> Result<PathBuf, std::io::Error> {
        std::fs::create_dir_all(&self.cache_dir)?;
        let path = self.entry_path(key);
        std::fs::write(&path, block)?;
        Ok(path)
    }

    /// Remove the entire cache directory tree.
    /// Succeeds if the directory does not exist.
    pub fn clear(&self) -> Result<(), std::io::Error> {
        match std::fs::remove_dir_all(&self.cache_dir) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    /// List all cache entries with their sizes, sorted by key.
    pub fn list_entries(&self) -> Result<Vec<CacheEntry>, std::io::Error> {
        let mut entries = Vec::new();

        if !self.cache_dir.exists() {
            return Ok(entries);
        }

        for entry in std::fs::read_dir(&self.cache_dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().and_then(|e| e.to_str()) != Some(CACHE_EXTENSION) {
                continue;
            }

            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }

            let key = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("")
                .to_string();

            entries.push(CacheEntry {
                key,
                size_bytes: metadata.len(),
                path,
            });
        }

        entries.sort_by(|a, b| a.key.cmp(&b.key));

        Ok(entries)
    }
}

/// Information about a cached block.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Cache key (file name without extension)
    pub key: String,
    /// Size of the entry in bytes
    pub size_bytes: u64,
    /// Full path to the entry
    pub path: PathBuf,
}
