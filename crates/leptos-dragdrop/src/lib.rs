//! Leptos DragDrop Utilities
//!
//! Mouse-event drag-and-drop for reordering the rows of a flat list.
//! Uses movement threshold to distinguish click from drag.
//!
//! Rows are addressed by their index in the rendered sequence. A finished
//! drag is reported as `(source, destination)`, where `destination` is
//! `None` if the mouse was released outside every row.

use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    /// Row being dragged
    pub dragging_read: ReadSignal<Option<usize>>,
    pub dragging_write: WriteSignal<Option<usize>>,
    /// Row under the pointer while dragging
    pub hover_read: ReadSignal<Option<usize>>,
    pub hover_write: WriteSignal<Option<usize>>,
    /// Pending row (mousedown but not yet dragging)
    pub pending_read: ReadSignal<Option<usize>>,
    pub pending_write: WriteSignal<Option<usize>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_read, dragging_write) = signal(None::<usize>);
    let (hover_read, hover_write) = signal(None::<usize>);
    let (pending_read, pending_write) = signal(None::<usize>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DndSignals {
        dragging_read,
        dragging_write,
        hover_read,
        hover_write,
        pending_read,
        pending_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

/// Reset all drag state
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_write.set(None);
    dnd.hover_write.set(None);
    dnd.pending_write.set(None);
}

/// Create mousedown handler for a draggable row
/// Records pending drag with start position
pub fn make_on_mousedown(dnd: DndSignals, index: usize) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Checkboxes and buttons keep their click
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            }
            dnd.pending_write.set(Some(index));
            dnd.start_x_write.set(ev.client_x());
            dnd.start_y_write.set(ev.client_y());
        }
    }
}

/// Create mouseenter handler for rows
pub fn make_on_row_mouseenter(dnd: DndSignals, index: usize) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_read.get_untracked().is_some() {
            dnd.hover_write.set(Some(index));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_read.get_untracked().is_some() {
            dnd.hover_write.set(None);
        }
    }
}

/// Document-level listeners; removed when dropped
pub struct DndListeners {
    on_mousemove: Closure<dyn FnMut(web_sys::MouseEvent)>,
    on_mouseup: Closure<dyn FnMut(web_sys::MouseEvent)>,
}

impl Drop for DndListeners {
    fn drop(&mut self) {
        if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
            let _ = doc.remove_event_listener_with_callback("mousemove", self.on_mousemove.as_ref().unchecked_ref());
            let _ = doc.remove_event_listener_with_callback("mouseup", self.on_mouseup.as_ref().unchecked_ref());
        }
    }
}

/// Bind global mousemove (drag start) and mouseup (drop) handlers
///
/// `on_drop(source, destination)` fires only for real drags, not clicks.
pub fn bind_global_listeners<F>(dnd: DndSignals, on_drop: F) -> DndListeners
where
    F: Fn(usize, Option<usize>) + 'static,
{
    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let pending = dnd.pending_read.get_untracked();

        // Start dragging once the pointer moved beyond the threshold
        if pending.is_some() && dnd.dragging_read.get_untracked().is_none() {
            let dx = (ev.client_x() - dnd.start_x_read.get_untracked()).abs();
            let dy = (ev.client_y() - dnd.start_y_read.get_untracked()).abs();
            if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
                dnd.dragging_write.set(pending);
                dnd.hover_write.set(pending);
            }
        }
    });

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dragging = dnd.dragging_read.get_untracked();
        let hover = dnd.hover_read.get_untracked();
        end_drag(&dnd);
        if let Some(source) = dragging {
            on_drop(source, hover);
        }
    });

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    }

    DndListeners { on_mousemove, on_mouseup }
}
