use serde::{Deserialize, Serialize};

use crate::constants::{MISSING_VALUE, OVERLAY_ID, POINTER_OFFSET, REGION_SELECTOR, VALUE_ATTRIBUTE};

/// How the tooltip finds its elements and renders values.
///
/// Every field has a default so a page may override only what it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TooltipConfig {
    pub overlay_id: String,
    pub region_selector: String,
    pub value_attribute: String,
    pub offset: f64,
    pub missing_value: String,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            overlay_id: OVERLAY_ID.to_string(),
            region_selector: REGION_SELECTOR.to_string(),
            value_attribute: VALUE_ATTRIBUTE.to_string(),
            offset: POINTER_OFFSET,
            missing_value: MISSING_VALUE.to_string(),
        }
    }
}

impl TooltipConfig {
    /// Parse a (possibly partial) JSON configuration block
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or a field has the wrong type
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid tooltip config: {e}"))
    }

    /// Serialize for embedding into a page's configuration block
    ///
    /// # Errors
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("Failed to serialize tooltip config: {e}"))
    }
}
