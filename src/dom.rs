use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use crate::config::TooltipConfig;
use crate::log;
use crate::tooltip::{Overlay, PagePoint, Region, TooltipController};

type PointerListener = Closure<dyn FnMut(MouseEvent)>;

/// The page's overlay element, driven through inline styles
pub struct ElementOverlay {
    element: HtmlElement,
}

impl ElementOverlay {
    #[must_use]
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    /// Find the overlay by id
    ///
    /// # Errors
    /// Returns an error if no element has the id or it is not an HTML element
    pub fn find(document: &Document, id: &str) -> Result<Self, String> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| format!("No overlay element with id '{id}'"))?
            .dyn_into::<HtmlElement>()
            .map(Self::new)
            .map_err(|_| format!("Overlay '#{id}' is not an HTML element"))
    }
}

impl Overlay for ElementOverlay {
    fn move_to(&mut self, left: f64, top: f64) {
        let style = self.element.style();
        let _ = style.set_property("left", &format!("{left}px"));
        let _ = style.set_property("top", &format!("{top}px"));
    }

    fn set_visible(&mut self, visible: bool) {
        let _ = self
            .element
            .style()
            .set_property("display", if visible { "block" } else { "none" });
    }

    fn set_text(&mut self, text: &str) {
        self.element.set_text_content(Some(text));
    }
}

/// A map shape read through its `id` and value attribute
#[derive(Clone)]
pub struct ElementRegion {
    element: Element,
    value_attribute: Rc<str>,
}

impl ElementRegion {
    #[must_use]
    pub fn new(element: Element, value_attribute: Rc<str>) -> Self {
        Self { element, value_attribute }
    }
}

impl Region for ElementRegion {
    fn id(&self) -> String {
        self.element.id()
    }

    fn value(&self) -> Option<String> {
        self.element.get_attribute(&self.value_attribute)
    }
}

/// Every element matching the configured selector
///
/// # Errors
/// Returns an error if the selector is invalid
pub fn find_regions(document: &Document, config: &TooltipConfig) -> Result<Vec<ElementRegion>, String> {
    let nodes = document
        .query_selector_all(&config.region_selector)
        .map_err(|_| format!("Invalid region selector '{}'", config.region_selector))?;
    let attribute: Rc<str> = Rc::from(config.value_attribute.as_str());

    Ok((0..nodes.length())
        .filter_map(|index| nodes.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .map(|element| ElementRegion::new(element, Rc::clone(&attribute)))
        .collect())
}

fn add_listener(element: &Element, event: &str, listener: PointerListener) -> Result<(), String> {
    element
        .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
        .map_err(|_| format!("Failed to add {event} listener"))?;
    // Listeners stay attached for the lifetime of the page
    listener.forget();
    Ok(())
}

/// Register `mousemove` and `mouseleave` on every region, all driving
/// `overlay`. Returns the number of regions wired up.
///
/// # Errors
/// Returns an error if the selector is invalid or a listener cannot be added
pub fn attach_tooltips<O: Overlay + 'static>(
    document: &Document,
    config: &TooltipConfig,
    overlay: O,
) -> Result<usize, String> {
    let controller = Rc::new(RefCell::new(TooltipController::new(overlay, config)));
    let regions = find_regions(document, config)?;

    for region in &regions {
        let on_move = {
            let controller = Rc::clone(&controller);
            let region = region.clone();
            Closure::wrap(Box::new(move |ev: MouseEvent| {
                let at = PagePoint::new(f64::from(ev.page_x()), f64::from(ev.page_y()));
                controller.borrow_mut().pointer_moved(&region, at);
            }) as Box<dyn FnMut(_)>)
        };
        let on_leave = {
            let controller = Rc::clone(&controller);
            Closure::wrap(Box::new(move |_ev: MouseEvent| {
                controller.borrow_mut().pointer_left();
            }) as Box<dyn FnMut(_)>)
        };

        add_listener(&region.element, "mousemove", on_move)?;
        add_listener(&region.element, "mouseleave", on_leave)?;
    }

    log!("Tooltip attached to {} regions", regions.len());
    Ok(regions.len())
}

/// Configuration from the page's JSON block, defaults when absent or invalid
#[must_use]
pub fn page_config(document: &Document, config_id: &str) -> TooltipConfig {
    let Some(json) = document.get_element_by_id(config_id).and_then(|el| el.text_content()) else {
        return TooltipConfig::default();
    };

    TooltipConfig::from_json(&json).unwrap_or_else(|e| {
        web_sys::console::warn_1(&e.into());
        TooltipConfig::default()
    })
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;
    use web_sys::MouseEventInit;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window().and_then(|w| w.document()).expect("document")
    }

    fn mount(html: &str) -> HtmlElement {
        let document = document();
        let container = document
            .create_element("div")
            .expect("create container")
            .dyn_into::<HtmlElement>()
            .expect("html element");
        container.set_inner_html(html);
        document.body().expect("body").append_child(&container).expect("append");
        container
    }

    fn pointer(event: &str, x: i32, y: i32) -> MouseEvent {
        let init = MouseEventInit::new();
        init.set_client_x(x);
        init.set_client_y(y);
        MouseEvent::new_with_mouse_event_init_dict(event, &init).expect("mouse event")
    }

    #[wasm_bindgen_test]
    fn test_move_and_leave_drive_overlay() {
        let container = mount(
            r#"<div id="test-tooltip"></div>
               <svg><path class="test-region" id="CA" data-inflation="3.2%" d="M0 0"/></svg>"#,
        );
        let document = document();
        let config = TooltipConfig {
            overlay_id: "test-tooltip".to_string(),
            region_selector: "path.test-region".to_string(),
            ..TooltipConfig::default()
        };
        let overlay = ElementOverlay::find(&document, &config.overlay_id).expect("overlay");

        let attached = attach_tooltips(&document, &config, overlay).expect("attach");
        assert_eq!(attached, 1);

        let region = document.get_element_by_id("CA").expect("region");
        region.dispatch_event(&pointer("mousemove", 100, 200)).expect("dispatch");

        let tooltip = document
            .get_element_by_id("test-tooltip")
            .expect("overlay")
            .dyn_into::<HtmlElement>()
            .expect("html element");
        assert_eq!(tooltip.text_content().as_deref(), Some("CA: 3.2%"));
        assert_eq!(tooltip.style().get_property_value("display").ok().as_deref(), Some("block"));
        // The test page is not scrolled, so page and client coordinates agree
        assert_eq!(tooltip.style().get_property_value("left").ok().as_deref(), Some("110px"));
        assert_eq!(tooltip.style().get_property_value("top").ok().as_deref(), Some("210px"));

        region.dispatch_event(&pointer("mouseleave", 0, 0)).expect("dispatch");
        assert_eq!(tooltip.style().get_property_value("display").ok().as_deref(), Some("none"));
        assert_eq!(tooltip.text_content().as_deref(), Some("CA: 3.2%"));

        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_missing_attribute_reads_as_none() {
        let container = mount(r#"<svg><path id="TX" class="missing-attr" d="M0 0"/></svg>"#);
        let config = TooltipConfig {
            region_selector: "path.missing-attr".to_string(),
            ..TooltipConfig::default()
        };

        let regions = find_regions(&document(), &config).expect("regions");
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].id(), "TX");
        assert_eq!(regions[0].value(), None);

        container.remove();
    }

    #[wasm_bindgen_test]
    fn test_missing_overlay_is_error() {
        let result = ElementOverlay::find(&document(), "no-such-overlay");
        assert!(result.is_err());
    }
}
