use super::{Overlay, Region};
use crate::config::TooltipConfig;

/// Pointer position in page coordinates (pixels, document origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePoint {
    pub x: f64,
    pub y: f64,
}

impl PagePoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Shows the overlay next to the pointer while it moves over a region and
/// hides it when the pointer leaves. The last handled event wins.
pub struct TooltipController<O: Overlay> {
    overlay: O,
    offset: f64,
    missing_value: String,
}

impl<O: Overlay> TooltipController<O> {
    #[must_use]
    pub fn new(overlay: O, config: &TooltipConfig) -> Self {
        Self {
            overlay,
            offset: config.offset,
            missing_value: config.missing_value.clone(),
        }
    }

    /// Text shown for `region`: `"<id>: <value>"`
    #[must_use]
    pub fn label_for(&self, region: &impl Region) -> String {
        let value = region
            .value()
            .unwrap_or_else(|| self.missing_value.clone());
        format!("{}: {}", region.id(), value)
    }

    pub fn pointer_moved(&mut self, region: &impl Region, at: PagePoint) {
        let text = self.label_for(region);
        self.overlay.move_to(at.x + self.offset, at.y + self.offset);
        self.overlay.set_visible(true);
        self.overlay.set_text(&text);
    }

    /// Content is left in place; only visibility changes
    pub fn pointer_left(&mut self) {
        self.overlay.set_visible(false);
    }

    #[must_use]
    pub fn overlay(&self) -> &O {
        &self.overlay
    }
}
