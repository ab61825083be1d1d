//! Splices the map into the HTML page and refreshes its metadata badges.
//!
//! HTML is not required to be well-formed XML, so these helpers work on the
//! text directly and only touch the parts they own.

use crate::config::TooltipConfig;
use crate::constants::{CONFIG_ELEMENT_ID, MAP_MARKER_END, MAP_MARKER_START};
use crate::fred::Seasonality;

const SEASONALITY_ID: &str = "seasonality";
const REFRESHED_ID: &str = "refreshed";

/// Byte range of an HTML comment whose trimmed body equals `name`
fn find_marker(html: &str, name: &str, from: usize) -> Option<(usize, usize)> {
    let mut search = from;
    while let Some(offset) = html.get(search..)?.find("<!--") {
        let start = search + offset;
        let body_start = start + "<!--".len();
        let body_len = html[body_start..].find("-->")?;
        let end = body_start + body_len + "-->".len();
        if html[body_start..body_start + body_len].trim() == name {
            return Some((start, end));
        }
        search = end;
    }
    None
}

/// Byte range of the first `<svg …>…</svg>` element, matched case-insensitively
fn find_svg(html: &str) -> Option<(usize, usize)> {
    // ASCII lowercasing keeps byte offsets intact
    let lower = html.to_ascii_lowercase();
    let mut search = 0;
    let start = loop {
        let candidate = search + lower[search..].find("<svg")?;
        let next = lower.as_bytes().get(candidate + 4).copied();
        if matches!(next, Some(b'>' | b'/' | b' ' | b'\t' | b'\n' | b'\r')) {
            break candidate;
        }
        search = candidate + 4;
    };
    let close = lower[start..].find("</svg>")?;
    Some((start, start + close + "</svg>".len()))
}

/// Put `svg` between the map markers, or in place of the first `<svg>` when the
/// page has no markers. A page with neither is returned unchanged.
#[must_use]
pub fn replace_svg_in_html(html: &str, svg: &str) -> String {
    let markers = find_marker(html, MAP_MARKER_START, 0)
        .and_then(|(_, start_end)| {
            find_marker(html, MAP_MARKER_END, start_end).map(|(end_start, _)| (start_end, end_start))
        });

    if let Some((before_end, after_start)) = markers {
        return format!("{}\n{svg}\n{}", &html[..before_end], &html[after_start..]);
    }

    match find_svg(html) {
        Some((start, end)) => format!("{}{svg}{}", &html[..start], &html[end..]),
        None => html.to_string(),
    }
}

/// Replace the content of every `<span id="…">` with the given id
fn set_span_text(html: &str, id: &str, text: &str) -> String {
    let double_quoted = format!("id=\"{id}\"");
    let single_quoted = format!("id='{id}'");
    let mut result = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find("<span") {
        let Some(tag_len) = rest[open..].find('>') else {
            break;
        };
        let tag_end = open + tag_len + 1;
        let tag = &rest[open..tag_end];

        if !(tag.contains(&double_quoted) || tag.contains(&single_quoted)) {
            result.push_str(&rest[..tag_end]);
            rest = &rest[tag_end..];
            continue;
        }
        let Some(close) = rest[tag_end..].find("</span>") else {
            break;
        };

        result.push_str(&rest[..tag_end]);
        result.push_str(text);
        rest = &rest[tag_end + close..];
    }

    result.push_str(rest);
    result
}

/// Update the seasonality badge and the refreshed timestamp
#[must_use]
pub fn update_meta_in_html(html: &str, seasonality: Seasonality, refreshed: &str) -> String {
    let html = set_span_text(html, SEASONALITY_ID, seasonality.label());
    set_span_text(&html, REFRESHED_ID, &format!("Refreshed: {refreshed}"))
}

/// A complete page around `svg`, used when no page exists yet
///
/// # Errors
/// Returns an error if the tooltip configuration cannot be serialized
pub fn render_page(svg: &str, script_src: &str, config: &TooltipConfig) -> Result<String, String> {
    let config_json = config.to_json()?;
    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<title>US Inflation Map</title>
<link rel="stylesheet" href="style.css">
</head>
<body>
<h1>US Inflation by State</h1>
<p><span id="{SEASONALITY_ID}"></span> · <span id="{REFRESHED_ID}"></span></p>
<div class="map-container">
<!-- {MAP_MARKER_START} -->
{svg}
<!-- {MAP_MARKER_END} -->
</div>
<div id="{overlay_id}" style="position: absolute; display: none;"></div>
<script id="{CONFIG_ELEMENT_ID}" type="application/json">{config_json}</script>
<script type="module" src="{script_src}"></script>
</body>
</html>
"#,
        overlay_id = config.overlay_id,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_between_markers() {
        let html = "<body><!--MAP_SVG_START--><svg>old</svg><p>junk</p><!--  MAP_SVG_END  --></body>";
        let result = replace_svg_in_html(html, "<svg>new</svg>");
        assert_eq!(result, "<body><!--MAP_SVG_START-->\n<svg>new</svg>\n<!--  MAP_SVG_END  --></body>");
    }

    #[test]
    fn test_other_comments_are_not_markers() {
        let html = "<!-- intro --><div><!-- MAP_SVG_START --><!-- note --><!-- MAP_SVG_END --></div>";
        let result = replace_svg_in_html(html, "<svg/>");
        assert_eq!(
            result,
            "<!-- intro --><div><!-- MAP_SVG_START -->\n<svg/>\n<!-- MAP_SVG_END --></div>"
        );
    }

    #[test]
    fn test_markers_in_wrong_order_fall_back_to_svg() {
        let html = "<!-- MAP_SVG_END --><SVG width=\"1\"><g/></SVG><!-- MAP_SVG_START -->";
        let result = replace_svg_in_html(html, "<svg>new</svg>");
        assert_eq!(result, "<!-- MAP_SVG_END --><svg>new</svg><!-- MAP_SVG_START -->");
    }

    #[test]
    fn test_replace_first_svg_only() {
        let html = "<svgicon></svgicon><svg id=\"a\">1</svg><svg id=\"b\">2</svg>";
        let result = replace_svg_in_html(html, "<svg>new</svg>");
        assert_eq!(result, "<svgicon></svgicon><svg>new</svg><svg id=\"b\">2</svg>");
    }

    #[test]
    fn test_no_target_leaves_page() {
        let html = "<p>nothing here</p>";
        assert_eq!(replace_svg_in_html(html, "<svg/>"), html);
    }

    #[test]
    fn test_update_meta() {
        let html = r#"<span class="badge" id="seasonality">old</span><span id='refreshed'>never</span><span id="other">x</span>"#;
        let result = update_meta_in_html(html, Seasonality::NotSeasonallyAdjusted, "2025-01-02 03:04 UTC");
        assert_eq!(
            result,
            r#"<span class="badge" id="seasonality">Not Seasonally Adjusted</span><span id='refreshed'>Refreshed: 2025-01-02 03:04 UTC</span><span id="other">x</span>"#
        );
    }

    #[test]
    fn test_update_meta_without_spans() {
        let html = "<h1>Map</h1>";
        assert_eq!(update_meta_in_html(html, Seasonality::SeasonallyAdjusted, "now"), html);
    }

    #[test]
    fn test_render_page_round_trips_through_splicing() {
        let config = TooltipConfig::default();
        let page = render_page("<svg>first</svg>", "tooltip.js", &config).expect("should render");

        assert!(page.contains(r#"<div id="tooltip""#));
        assert!(page.contains(r#"<script type="module" src="tooltip.js"></script>"#));
        assert!(page.contains(r#""valueAttribute":"data-inflation""#));

        let updated = replace_svg_in_html(&page, "<svg>second</svg>");
        assert!(updated.contains("<svg>second</svg>"));
        assert!(!updated.contains("first"));

        let updated = update_meta_in_html(&updated, Seasonality::SeasonallyAdjusted, "today");
        assert!(updated.contains(r#"<span id="seasonality">Seasonally Adjusted</span>"#));
        assert!(updated.contains(r#"<span id="refreshed">Refreshed: today</span>"#));
    }
}
