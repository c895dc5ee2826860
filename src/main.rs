//! Item List Frontend Entry Point

mod app;
mod components;
mod gateway;
mod scroll;
mod store;

use app::App;
use leptos::prelude::*;

/// Route engine logs to the browser console
#[cfg(target_arch = "wasm32")]
fn init_tracing() {
    use tracing::subscriber::set_global_default;
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Registry;

    let level = if cfg!(debug_assertions) { Level::DEBUG } else { Level::INFO };
    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(level)
            .build(),
    );
    let _ = set_global_default(Registry::default().with(wasm_layer));
}

#[cfg(not(target_arch = "wasm32"))]
fn init_tracing() {}

fn main() {
    console_error_panic_hook::set_once();
    init_tracing();
    mount_to_body(App);
}
