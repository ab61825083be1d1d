use leptos::{component, view, IntoView, ReadSignal, SignalWith};

use crate::tooltip::TooltipState;

/// Overlay rendered by the app itself, for pages that ship without one
#[component]
#[must_use]
pub fn RegionTooltip(
    state: ReadSignal<TooltipState>,
    #[prop(into)] overlay_id: String,
) -> impl IntoView {
    view! {
        <div
            id=overlay_id
            class="region-tooltip"
            style=move || format!("position: absolute; {}", state.with(TooltipState::style))
        >
            {move || state.with(|s| s.text.clone())}
        </div>
    }
}
