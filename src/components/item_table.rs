//! Item Table Component
//!
//! Checkbox column, value and order columns, and drag-to-reorder rows.

use leptos::prelude::*;
use list_sync::{DragMove, SelectAllState, SelectionGesture};
use leptos_dragdrop::*;

use crate::store::{dispatch, use_session, use_table_store, TableStateStoreFields};

#[component]
pub fn ItemTable() -> impl IntoView {
    let store = use_table_store();
    let session = use_session();

    // Create DnD signals
    let dnd = create_dnd_signals();

    // Bind global listeners for dragging; released with the component
    let listeners = StoredValue::new_local(Some(bind_global_listeners(dnd, move |source, destination| {
        tracing::debug!(source, ?destination, "row dropped");
        dispatch(session, move |session| async move {
            session.reorder(DragMove::new(source, destination)).await
        });
    })));
    on_cleanup(move || listeners.set_value(None));

    let on_toggle_all = move |_| {
        dispatch(session, |session| async move { session.select(SelectionGesture::ToggleAll).await });
    };

    let rows = move || store.rows().get().into_iter().enumerate();

    view! {
        <table class="item-table">
            <thead>
                <tr>
                    <th class="checkbox-cell">
                        <input
                            type="checkbox"
                            prop:checked=move || store.select_all().get() == SelectAllState::Checked
                            prop:indeterminate=move || store.select_all().get() == SelectAllState::Indeterminate
                            on:change=on_toggle_all
                        />
                    </th>
                    <th>"Value"</th>
                    <th>"Order"</th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=rows
                    key=|(index, row)| (*index, row.value, row.order.to_bits(), row.selected)
                    children=move |(index, row)| {
                        let value = row.value;
                        let selected = row.selected;
                        let order = row.order;

                        // DnD handlers
                        let on_mousedown = make_on_mousedown(dnd, index);
                        let on_mouseenter = make_on_row_mouseenter(dnd, index);
                        let on_mouseleave = make_on_mouseleave(dnd);

                        // Visual state
                        let is_dragging = move || dnd.dragging_read.get() == Some(index);
                        let is_drop_target = move || {
                            dnd.dragging_read.get().is_some_and(|source| source != index)
                                && dnd.hover_read.get() == Some(index)
                        };
                        let row_class = move || {
                            let mut c = String::from("item-row");
                            if selected { c.push_str(" selected"); }
                            if is_dragging() { c.push_str(" dragging"); }
                            if is_drop_target() { c.push_str(" drop-target"); }
                            c
                        };

                        view! {
                            <tr
                                class=row_class
                                on:mousedown=on_mousedown
                                on:mouseenter=on_mouseenter
                                on:mouseleave=on_mouseleave
                            >
                                <td class="checkbox-cell">
                                    <input
                                        type="checkbox"
                                        prop:checked=selected
                                        on:change=move |_| {
                                            dispatch(session, move |session| async move {
                                                session.select(SelectionGesture::Toggle(value)).await
                                            });
                                        }
                                    />
                                </td>
                                <td>{value}</td>
                                <td>{order}</td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
    }
}
