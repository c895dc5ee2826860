//! Item List App
//!
//! Wires the list session to the store, the scroll subscription and the
//! table components.

use std::rc::Rc;

use leptos::prelude::*;
use list_sync::{ListConfig, ListSession};
use reactive_stores::Store;

use crate::components::{FilterBar, ItemTable};
use crate::gateway::HttpGateway;
use crate::scroll::ScrollSubscription;
use crate::store::{dispatch, store_apply_view, SessionHandle, TableState, TableStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(TableState::default());
    provide_context(store);

    let config = ListConfig::default();
    let threshold = config.near_bottom_threshold;
    let session = ListSession::new(config, Rc::new(HttpGateway::same_origin()))
        .with_observer(move |view| store_apply_view(&store, view));
    let session: SessionHandle = StoredValue::new_local(session);
    provide_context(session);

    // Hydrate once on mount
    dispatch(session, |session| async move { session.start().await });

    // Infinite scroll; unsubscribed when the app unmounts
    let subscription = StoredValue::new_local(ScrollSubscription::subscribe(threshold, move || {
        dispatch(session, |session| async move { session.scroll_near_bottom().await });
    }));
    on_cleanup(move || subscription.set_value(None));

    view! {
        <main class="list-page">
            <h1>"Items"</h1>

            <FilterBar />

            <ItemTable />

            <Show when=move || store.loading().get()>
                <div class="loading">"Loading..."</div>
            </Show>

            {move || store.error().get().map(|message| view! { <p class="error">{message}</p> })}

            <p class="item-count">{move || format!("{} items", store.rows().read().len())}</p>
        </main>
    }
}
