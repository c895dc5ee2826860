//! Filter Bar Component
//!
//! Search field and min/max range inputs. Editing one switches the list to
//! that kind of filter.

use leptos::prelude::*;
use list_sync::{Filter, ItemId};

use crate::store::{dispatch, use_session, use_table_store, TableStateStoreFields};

/// Parse a bound input; blank or invalid means unbounded
fn parse_bound(raw: &str) -> Option<ItemId> {
    raw.trim().parse().ok()
}

#[derive(Clone, Copy)]
enum Bound {
    Min,
    Max,
}

/// Range filter after editing one bound; the other comes from the active
/// filter, or is unbounded when a search is active
fn edit_range(current: &Filter, bound: Bound, raw: &str) -> Filter {
    let (min, max) = match current {
        Filter::Range { min, max } => (*min, *max),
        Filter::Search { .. } => (None, None),
    };
    let edited = parse_bound(raw);
    match bound {
        Bound::Min => Filter::range(edited, max),
        Bound::Max => Filter::range(min, edited),
    }
}

#[component]
pub fn FilterBar() -> impl IntoView {
    let store = use_table_store();
    let session = use_session();

    let search_text = move || match store.filter().get() {
        Filter::Search { text } => text,
        Filter::Range { .. } => String::new(),
    };
    let bound = move |pick_max: bool| match store.filter().get() {
        Filter::Range { min, max } => {
            let value = if pick_max { max } else { min };
            value.map(|v| v.to_string()).unwrap_or_default()
        }
        Filter::Search { .. } => String::new(),
    };

    let apply_range = move |bound: Bound, raw: String| {
        let filter = edit_range(&store.filter().get_untracked(), bound, &raw);
        dispatch(session, move |session| async move { session.set_filter(filter).await });
    };

    view! {
        <div class="filter-bar">
            <input
                type="text"
                class="search-input"
                placeholder="Search"
                prop:value=search_text
                on:input=move |ev| {
                    let filter = Filter::search(event_target_value(&ev));
                    dispatch(session, move |session| async move { session.set_filter(filter).await });
                }
            />
            <input
                type="number"
                class="range-input"
                placeholder="Min"
                prop:value=move || bound(false)
                on:change=move |ev| apply_range(Bound::Min, event_target_value(&ev))
            />
            <input
                type="number"
                class="range-input"
                placeholder="Max"
                prop:value=move || bound(true)
                on:change=move |ev| apply_range(Bound::Max, event_target_value(&ev))
            />
        </div>
    }
}
