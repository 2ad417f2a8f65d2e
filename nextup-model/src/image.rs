use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-size artwork URL maps for a title or episode, mirroring the remote
/// catalog's `imageSet` structure (keys like `"w240"`, `"w360"`).
///
/// Stored as an opaque JSON string blob on the owning row and parsed back
/// only when something actually renders artwork.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_poster: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_poster: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_backdrop: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_backdrop: Option<BTreeMap<String, String>>,
}

impl ImageSet {
    pub fn is_empty(&self) -> bool {
        self.vertical_poster.is_none()
            && self.horizontal_poster.is_none()
            && self.vertical_backdrop.is_none()
            && self.horizontal_backdrop.is_none()
    }
}
