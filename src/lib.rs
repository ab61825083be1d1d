#![allow(clippy::implicit_hasher)]

pub mod choropleth;
pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod fred;
pub mod logging;
pub mod page;
pub mod states;
pub mod svg;
pub mod tooltip;

#[cfg(target_arch = "wasm32")]
pub mod dom;

#[cfg(not(target_arch = "wasm32"))]
pub mod update;

#[doc(hidden)]
pub use ::log as __log;

pub use components::RegionTooltip;
pub use config::TooltipConfig;
pub use tooltip::{Overlay, Region, TooltipController, TooltipState};

/// Wire the tooltip into the current page.
///
/// Uses the page's overlay element when it exists; otherwise mounts a
/// [`RegionTooltip`] with the configured id and drives that instead.
#[cfg(target_arch = "wasm32")]
pub fn start() {
    use leptos::{create_rw_signal, view};

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        web_sys::console::error_1(&"No document available".into());
        return;
    };
    let config = dom::page_config(&document, constants::CONFIG_ELEMENT_ID);

    match dom::ElementOverlay::find(&document, &config.overlay_id) {
        Ok(overlay) => {
            if let Err(e) = dom::attach_tooltips(&document, &config, overlay) {
                web_sys::console::error_1(&e.into());
            }
        }
        Err(e) => {
            web_sys::console::warn_1(&format!("{e}; mounting a tooltip overlay").into());
            leptos::mount_to_body(move || {
                let state = create_rw_signal(TooltipState::default());
                if let Err(e) = dom::attach_tooltips(&document, &config, state) {
                    web_sys::console::error_1(&e.into());
                }
                view! { <RegionTooltip state=state.read_only() overlay_id=config.overlay_id.clone() /> }
            });
        }
    }
}
