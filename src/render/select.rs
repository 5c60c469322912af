//! Picking which of an entity's images to render.

use serde::{Deserialize, Serialize};

use super::RenderError;

/// Role used when the requested one is missing.
pub const FALLBACK_ROLE: &str = "poster";

/// One image reference of a media entity.
///
/// Field names follow the Sonarr series payload (`coverType`, `url`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCandidate {
    #[serde(rename = "coverType")]
    pub role: String,
    pub url: String,
}

impl ImageCandidate {
    pub fn new(role: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            url: url.into(),
        }
    }
}

/// Pick the URL to render for `role`.
///
/// Tiers, first match wins:
/// 1. first candidate whose role equals `role` (case-insensitive)
/// 2. first candidate whose role is `poster` (case-insensitive)
/// 3. first candidate
///
/// An empty list is `RenderError::NoImage`.
pub fn select_image<'a>(
    candidates: &'a [ImageCandidate],
    role: &str,
) -> Result<&'a str, RenderError> {
    let by_role = |wanted: &str| {
        candidates
            .iter()
            .find(|c| c.role.eq_ignore_ascii_case(wanted))
    };

    by_role(role)
        .or_else(|| by_role(FALLBACK_ROLE))
        .or_else(|| candidates.first())
        .map(|c| c.url.as_str())
        .ok_or(RenderError::NoImage)
}
