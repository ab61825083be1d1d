use leptos::{RwSignal, SignalUpdate};

/// The floating element the controller writes to. It is never read back.
pub trait Overlay {
    /// Place the overlay's top-left corner at page coordinates (pixels)
    fn move_to(&mut self, left: f64, top: f64);
    fn set_visible(&mut self, visible: bool);
    fn set_text(&mut self, text: &str);
}

/// Snapshot of everything the controller controls on the overlay
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TooltipState {
    pub left: f64,
    pub top: f64,
    pub visible: bool,
    pub text: String,
}

impl TooltipState {
    /// Inline style equivalent to the state's position and visibility
    #[must_use]
    pub fn style(&self) -> String {
        format!(
            "left: {}px; top: {}px; display: {};",
            self.left,
            self.top,
            if self.visible { "block" } else { "none" }
        )
    }
}

impl Overlay for TooltipState {
    fn move_to(&mut self, left: f64, top: f64) {
        self.left = left;
        self.top = top;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_text(&mut self, text: &str) {
        text.clone_into(&mut self.text);
    }
}

impl Overlay for RwSignal<TooltipState> {
    fn move_to(&mut self, left: f64, top: f64) {
        self.update(|state| state.move_to(left, top));
    }

    fn set_visible(&mut self, visible: bool) {
        self.update(|state| state.set_visible(visible));
    }

    fn set_text(&mut self, text: &str) {
        self.update(|state| state.set_text(text));
    }
}
