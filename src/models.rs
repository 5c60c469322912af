//! Media entities supplied by the library manager's API.

use serde::Deserialize;

use crate::render::ImageCandidate;

/// A TV series as returned by the library manager.
///
/// Only the fields needed for a listing line and its artwork are kept;
/// unknown fields in the payload are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub title: String,
    #[serde(default)]
    pub year: u32,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub monitored: bool,
    #[serde(default)]
    pub images: Vec<ImageCandidate>,
}

impl Series {
    /// Listing marker: `✓` for monitored series, `○` otherwise.
    pub fn status_marker(&self) -> &'static str {
        if self.monitored {
            "✓"
        } else {
            "○"
        }
    }

    /// Listing line without the index, e.g. `✓ Show (2016) - continuing`.
    pub fn summary(&self) -> String {
        format!(
            "{} {} ({}) - {}",
            self.status_marker(),
            self.title,
            self.year,
            self.status
        )
    }
}

/// Parse a series payload: either a single object or an array of them.
pub fn parse_series_list(json: &str) -> Result<Vec<Series>, serde_json::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<Series>),
        One(Box<Series>),
    }

    Ok(match serde_json::from_str(json)? {
        OneOrMany::Many(list) => list,
        OneOrMany::One(series) => vec![*series],
    })
}
