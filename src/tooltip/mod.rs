//! Pointer-driven tooltip for map regions.
//!
//! The controller is independent of the DOM: regions and the overlay are
//! capabilities ([`Region`], [`Overlay`]) so the same transitions drive the
//! page's overlay element, a Leptos signal, or a plain [`TooltipState`] in
//! tests.

mod controller;
mod overlay;
mod region;

pub use controller::{PagePoint, TooltipController};
pub use overlay::{Overlay, TooltipState};
pub use region::{Region, StaticRegion};
