//! Rewrites a US map SVG so each state path carries its value, colour bucket
//! and a `<title>`.
//!
//! The document is streamed through `quick-xml`; everything that is not a
//! state path, one of its titles, or the stylesheet is copied byte for byte.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::choropleth::{format_rate, is_bucket_class, Classifier};
use crate::constants::CHOROPLETH_CSS;
use crate::fred::RateTable;
use crate::states::find_state;

/// Class of the group holding the state paths
const STATE_GROUP_CLASS: &str = "state";

/// Present in the palette stylesheet; an SVG containing it already has one
const PALETTE_MARKER: &str = "Added by update-map";

/// Elements the rewriter treats specially
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementKind {
    Svg,
    Group,
    Path,
    Title,
    Style,
    Defs,
    Other,
}

impl ElementKind {
    fn of(element: &BytesStart<'_>) -> Self {
        Self::from_local_name(element.local_name().as_ref())
    }

    fn from_local_name(name: &[u8]) -> Self {
        match name {
            b"svg" => Self::Svg,
            b"g" => Self::Group,
            b"path" => Self::Path,
            b"title" => Self::Title,
            b"style" => Self::Style,
            b"defs" => Self::Defs,
            _ => Self::Other,
        }
    }
}

/// What the document contains, gathered before rewriting
#[derive(Debug, Default, Clone, Copy)]
struct Layout {
    has_state_group: bool,
    has_style: bool,
    has_defs: bool,
    has_palette: bool,
}

/// Where the palette stylesheet goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CssTarget {
    FirstStyle,
    Defs,
    NewDefs,
}

impl Layout {
    fn css_target(self) -> CssTarget {
        if self.has_style {
            CssTarget::FirstStyle
        } else if self.has_defs {
            CssTarget::Defs
        } else {
            CssTarget::NewDefs
        }
    }
}

/// Enhance every state path of `svg` with the rates in `rates`.
///
/// Paths are limited to the `<g class="state">` group when the document has
/// one. The value is written to `value_attribute` and previously assigned
/// bucket classes are replaced, so running this twice gives the same result.
///
/// # Errors
/// Returns an error if the SVG is not well-formed XML
pub fn enhance_svg(svg: &str, rates: &RateTable, value_attribute: &str) -> Result<String, String> {
    let layout = scan_layout(svg)?;
    let css_target = layout.css_target();
    let classifier = Classifier::from_values(rates.rates());

    let mut reader = Reader::from_str(svg);
    let mut writer = Writer::new(Vec::with_capacity(svg.len() + CHOROPLETH_CSS.len()));

    // Number of currently open elements
    let mut depth = 0usize;
    let mut state_group: Option<usize> = None;
    let mut enhanced_path: Option<usize> = None;
    let mut skipped_title: Option<usize> = None;
    let mut css_pending = !layout.has_palette;
    let mut in_first_style = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("Invalid SVG at byte {}: {e}", reader.error_position()))?;

        if let Some(title_depth) = skipped_title {
            match event {
                Event::Start(_) => depth += 1,
                Event::End(_) => {
                    if depth == title_depth {
                        skipped_title = None;
                    }
                    depth = depth.saturating_sub(1);
                }
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(start) => {
                depth += 1;
                let in_scope = !layout.has_state_group || state_group.is_some();

                match ElementKind::of(&start) {
                    ElementKind::Title if enhanced_path == Some(depth - 1) => {
                        skipped_title = Some(depth);
                    }
                    ElementKind::Path if in_scope => {
                        if let Some((abbr, state_name)) = path_state(&start)? {
                            let rate = rates.rate(abbr);
                            write_state_path(
                                &mut writer,
                                &start,
                                (abbr, state_name),
                                rate,
                                classifier.classify(rate),
                                value_attribute,
                            )?;
                            enhanced_path = Some(depth);
                        } else {
                            write(&mut writer, Event::Start(start))?;
                        }
                    }
                    ElementKind::Group if state_group.is_none() && has_class(&start, STATE_GROUP_CLASS)? => {
                        state_group = Some(depth);
                        write(&mut writer, Event::Start(start))?;
                    }
                    ElementKind::Svg if depth == 1 && css_pending && css_target == CssTarget::NewDefs => {
                        write(&mut writer, Event::Start(start))?;
                        write(&mut writer, Event::Start(BytesStart::new("defs")))?;
                        write_style(&mut writer)?;
                        write(&mut writer, Event::End(BytesEnd::new("defs")))?;
                        css_pending = false;
                    }
                    ElementKind::Style if css_pending && css_target == CssTarget::FirstStyle => {
                        in_first_style = true;
                        write(&mut writer, Event::Start(start))?;
                    }
                    _ => write(&mut writer, Event::Start(start))?,
                }
            }
            Event::End(end) => {
                let level = depth;
                depth = depth.saturating_sub(1);

                if enhanced_path == Some(level) {
                    enhanced_path = None;
                }
                if state_group == Some(level) {
                    state_group = None;
                }

                match ElementKind::from_local_name(end.local_name().as_ref()) {
                    ElementKind::Style if in_first_style => {
                        write_css_text(&mut writer)?;
                        in_first_style = false;
                        css_pending = false;
                    }
                    ElementKind::Defs if css_pending && css_target == CssTarget::Defs => {
                        write_style(&mut writer)?;
                        css_pending = false;
                    }
                    _ => {}
                }
                write(&mut writer, Event::End(end))?;
            }
            Event::Empty(empty) => {
                let in_scope = !layout.has_state_group || state_group.is_some();

                match ElementKind::of(&empty) {
                    ElementKind::Title if enhanced_path == Some(depth) => {}
                    ElementKind::Path if in_scope => {
                        if let Some((abbr, state_name)) = path_state(&empty)? {
                            let rate = rates.rate(abbr);
                            write_state_path(
                                &mut writer,
                                &empty,
                                (abbr, state_name),
                                rate,
                                classifier.classify(rate),
                                value_attribute,
                            )?;
                            write(&mut writer, Event::End(BytesEnd::new("path")))?;
                        } else {
                            write(&mut writer, Event::Empty(empty))?;
                        }
                    }
                    ElementKind::Style if css_pending && css_target == CssTarget::FirstStyle => {
                        write(&mut writer, Event::Start(empty.to_owned()))?;
                        write_css_text(&mut writer)?;
                        write(&mut writer, Event::End(empty.to_end().into_owned()))?;
                        css_pending = false;
                    }
                    ElementKind::Defs if css_pending && css_target == CssTarget::Defs => {
                        write(&mut writer, Event::Start(empty.to_owned()))?;
                        write_style(&mut writer)?;
                        write(&mut writer, Event::End(empty.to_end().into_owned()))?;
                        css_pending = false;
                    }
                    _ => write(&mut writer, Event::Empty(empty))?,
                }
            }
            Event::Eof => break,
            other => write(&mut writer, other)?,
        }
    }

    String::from_utf8(writer.into_inner()).map_err(|e| format!("SVG output is not UTF-8: {e}"))
}

fn scan_layout(svg: &str) -> Result<Layout, String> {
    let mut reader = Reader::from_str(svg);
    let mut layout = Layout {
        has_palette: svg.contains(PALETTE_MARKER),
        ..Layout::default()
    };

    loop {
        match reader
            .read_event()
            .map_err(|e| format!("Invalid SVG at byte {}: {e}", reader.error_position()))?
        {
            Event::Start(element) | Event::Empty(element) => match ElementKind::of(&element) {
                ElementKind::Group => layout.has_state_group |= has_class(&element, STATE_GROUP_CLASS)?,
                ElementKind::Style => layout.has_style = true,
                ElementKind::Defs => layout.has_defs = true,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(layout)
}

fn attribute(element: &BytesStart<'_>, key: &str) -> Result<Option<String>, String> {
    let Some(attr) = element
        .try_get_attribute(key)
        .map_err(|e| format!("Malformed attribute: {e}"))?
    else {
        return Ok(None);
    };
    attr.unescape_value()
        .map(|value| Some(value.into_owned()))
        .map_err(|e| format!("Malformed value for '{key}': {e}"))
}

fn has_class(element: &BytesStart<'_>, class: &str) -> Result<bool, String> {
    Ok(attribute(element, "class")?.is_some_and(|value| value.split_whitespace().any(|c| c == class)))
}

/// The state a path draws: its `id` when that is a state abbreviation,
/// otherwise a leading two-letter lowercase class such as `class="ca"`
fn path_state(path: &BytesStart<'_>) -> Result<Option<(&'static str, &'static str)>, String> {
    if let Some(state) = attribute(path, "id")?.and_then(|id| find_state(&id)) {
        return Ok(Some(state));
    }

    let state = attribute(path, "class")?.and_then(|class| {
        let first = class.split_whitespace().next()?;
        let is_code = first.len() == 2 && first.bytes().all(|b| b.is_ascii_lowercase());
        if is_code {
            find_state(first)
        } else {
            None
        }
    });
    Ok(state)
}

fn write_state_path(
    writer: &mut Writer<Vec<u8>>,
    original: &BytesStart<'_>,
    (abbr, state_name): (&str, &str),
    rate: Option<f64>,
    bucket: &str,
    value_attribute: &str,
) -> Result<(), String> {
    let formatted = format_rate(rate);
    let name = String::from_utf8_lossy(original.name().as_ref()).into_owned();
    let mut path = BytesStart::new(name);
    let mut has_class_attr = false;
    let mut has_id = false;

    for attr in original.attributes() {
        let attr = attr.map_err(|e| format!("Malformed attribute: {e}"))?;
        let key = attr.key.as_ref();
        if key == b"class" {
            let existing = attr
                .unescape_value()
                .map_err(|e| format!("Malformed class: {e}"))?;
            let class = bucketed_class(&existing, bucket);
            path.push_attribute(("class", class.as_str()));
            has_class_attr = true;
        } else if key == b"id" {
            // The tooltip labels a region by its id; an empty one gets replaced
            if attr.value.is_empty() {
                continue;
            }
            path.push_attribute(attr);
            has_id = true;
        } else if key != value_attribute.as_bytes() {
            path.push_attribute(attr);
        }
    }
    if !has_class_attr {
        path.push_attribute(("class", bucket));
    }
    if !has_id {
        path.push_attribute(("id", abbr));
    }
    path.push_attribute((value_attribute, formatted.as_str()));

    write(writer, Event::Start(path))?;
    write(writer, Event::Start(BytesStart::new("title")))?;
    let title = format!("{state_name} — {formatted}");
    write(writer, Event::Text(BytesText::new(&title)))?;
    write(writer, Event::End(BytesEnd::new("title")))
}

/// Existing classes minus any old bucket, followed by `bucket`
fn bucketed_class(existing: &str, bucket: &str) -> String {
    existing
        .split_whitespace()
        .filter(|class| !is_bucket_class(class))
        .chain(std::iter::once(bucket))
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_css_text(writer: &mut Writer<Vec<u8>>) -> Result<(), String> {
    write(writer, Event::Text(BytesText::from_escaped(CHOROPLETH_CSS)))
}

fn write_style(writer: &mut Writer<Vec<u8>>) -> Result<(), String> {
    let mut style = BytesStart::new("style");
    style.push_attribute(("type", "text/css"));
    write(writer, Event::Start(style))?;
    write_css_text(writer)?;
    write(writer, Event::End(BytesEnd::new("style")))
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), String> {
    writer
        .write_event(event)
        .map_err(|e| format!("Failed to write SVG: {e}"))
}
