//! Scroll Subscription
//!
//! Reports "near bottom" on window scroll and resize. The listeners live
//! exactly as long as the `ScrollSubscription` value.

use list_sync::is_near_bottom;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

const EVENTS: [&str; 2] = ["scroll", "resize"];

pub struct ScrollSubscription {
    window: web_sys::Window,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl ScrollSubscription {
    /// Call `on_near_bottom` whenever the viewport is within `threshold`
    /// pixels of the document end. `None` outside a browser.
    pub fn subscribe(threshold: f64, on_near_bottom: impl Fn() + 'static) -> Option<Self> {
        let window = web_sys::window()?;
        let probe = window.clone();
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
            if viewport_near_bottom(&probe, threshold) {
                on_near_bottom();
            }
        });
        for event in EVENTS {
            let _ = window.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
        }
        Some(Self { window, callback })
    }
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        for event in EVENTS {
            let _ = self
                .window
                .remove_event_listener_with_callback(event, self.callback.as_ref().unchecked_ref());
        }
    }
}

fn viewport_near_bottom(window: &web_sys::Window, threshold: f64) -> bool {
    let Some(root) = window.document().and_then(|doc| doc.document_element()) else {
        return false;
    };
    let viewport = window
        .inner_height()
        .ok()
        .and_then(|height| height.as_f64())
        .unwrap_or_default();
    is_near_bottom(
        f64::from(root.scroll_top()),
        viewport,
        f64::from(root.scroll_height()),
        threshold,
    )
}
