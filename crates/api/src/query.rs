//! Query parameter types for API handlers.

use serde::Deserialize;
use tally_core::word_frequency;

/// Query parameters for `GET /api/reports/word-count` (`?minCount=`).
///
/// `min_count` stays raw so a malformed value falls back to the default
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordCountParams {
    pub min_count: Option<String>,
}

impl WordCountParams {
    /// The threshold to apply, see [`word_frequency::parse_min_count`].
    pub fn min_count(&self) -> u32 {
        word_frequency::parse_min_count(self.min_count.as_deref())
    }
}
