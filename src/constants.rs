use std::time::Duration;

/// Identifier of the floating overlay element in the host page
pub const OVERLAY_ID: &str = "tooltip";

/// Selector matching every map region
pub const REGION_SELECTOR: &str = "path";

/// Attribute holding the value shown for a region
pub const VALUE_ATTRIBUTE: &str = "data-inflation";

/// Identifier of the optional JSON configuration block in the host page
pub const CONFIG_ELEMENT_ID: &str = "tooltip-config";

/// Distance in pixels between the pointer and the overlay's top-left corner
pub const POINTER_OFFSET: f64 = 10.0;

/// Text shown for a region that has no value attribute.
/// Matches how the browser interpolates a `null` attribute read.
pub const MISSING_VALUE: &str = "null";

/// FRED series observations endpoint
pub const FRED_OBSERVATIONS_URL: &str = "https://api.stlouisfed.org/fred/series/observations";

/// Environment variable holding the FRED API key
pub const FRED_API_KEY_ENV: &str = "FRED_API_KEY";

pub const FRED_TIMEOUT: Duration = Duration::from_secs(20);

/// Pause between consecutive FRED requests
pub const FRED_REQUEST_PACING: Duration = Duration::from_millis(80);

/// Comment markers delimiting the map inside the HTML page
pub const MAP_MARKER_START: &str = "MAP_SVG_START";
pub const MAP_MARKER_END: &str = "MAP_SVG_END";

/// Hover palette appended to the map's stylesheet so the choropleth renders
/// even when the page stylesheet is missing
pub const CHOROPLETH_CSS: &str = "
/* === Added by update-map (choropleth palette) === */
.state path{stroke:#FFFFFF;stroke-width:1;transition:fill .2s ease, stroke .2s ease}
.state path:hover{stroke:#0a3f36;stroke-width:1.5}
.c0{fill:#e8ecea}
.c1{fill:#d6efe3}
.c2{fill:#bde4d6}
.c3{fill:#9fd6c5}
.c4{fill:#7cc5b1}
.c5{fill:#55b29a}
";
