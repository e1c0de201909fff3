//! Tab Shelf - new-tab page that shows open tabs and bookmarks as groups
//! Built with Rust + WASM + Yew

pub mod actions;
pub mod bookmark_tree;
pub mod config;
pub mod debounce;
pub mod emoji;
pub mod error;
pub mod events;
pub mod group_name;
pub mod grouping;
pub mod host;
pub mod links;
pub mod reconcile;
pub mod relative_time;
pub mod state;
pub mod storage;
pub mod tab_data;
pub mod ui;

#[cfg(test)]
mod testing;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start the Yew app for the new-tab page
#[wasm_bindgen]
pub fn start_newtab() {
    yew::Renderer::<ui::newtab::NewTab>::new().render();
}

// Start the Yew app for the toolbar popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::Popup>::new().render();
}
