//! The host browser's tab, tab group and bookmark APIs

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::error::HostError;
use crate::tab_data::{BookmarkNode, Tab, TabGroup};

// Import JS bridge functions
#[wasm_bindgen(module = "/newtab.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn queryTabs(filter: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn createTab(properties: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn removeTab(tab_id: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn updateTab(tab_id: i32, properties: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn groupTabs(options: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn queryTabGroups(filter: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn updateTabGroup(group_id: i32, properties: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getBookmarkTree() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn createBookmark(properties: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn moveBookmark(id: &str, destination: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn removeBookmark(id: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getBookmarkSubTree(id: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn updateBookmark(id: &str, changes: JsValue) -> Result<(), JsValue>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_window: Option<bool>,
}

impl TabQuery {
    pub fn all() -> TabQuery {
        TabQuery::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TabUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muted: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TabGroupUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkCreate {
    pub parent_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkDestination {
    pub parent_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GroupOptions<'a> {
    tab_ids: &'a [i32],
    #[serde(skip_serializing_if = "Option::is_none")]
    group_id: Option<i32>,
}

#[derive(Serialize)]
struct CreateTabProperties<'a> {
    url: &'a str,
    active: bool,
}

#[derive(Serialize, Deserialize)]
struct TitleOnly {
    title: String,
}

/// Everything the new-tab page asks of the browser. Every call is a
/// suspension point; nothing is cancellable.
#[allow(async_fn_in_trait)]
pub trait Host {
    async fn query_tabs(&self, filter: &TabQuery) -> Result<Vec<Tab>, HostError>;
    async fn create_tab(&self, url: &str, active: bool) -> Result<Tab, HostError>;
    async fn remove_tab(&self, tab_id: i32) -> Result<(), HostError>;
    async fn update_tab(&self, tab_id: i32, update: &TabUpdate) -> Result<(), HostError>;
    /// Put tabs into `group_id`, or into a new group when `None`; returns the group id
    async fn group_tabs(&self, tab_ids: &[i32], group_id: Option<i32>) -> Result<i32, HostError>;

    async fn query_tab_groups(&self) -> Result<Vec<TabGroup>, HostError>;
    async fn update_tab_group(&self, group_id: i32, update: &TabGroupUpdate) -> Result<(), HostError>;

    async fn bookmark_tree(&self) -> Result<Vec<BookmarkNode>, HostError>;
    async fn create_bookmark(&self, create: &BookmarkCreate) -> Result<BookmarkNode, HostError>;
    async fn move_bookmark(&self, id: &str, destination: &BookmarkDestination) -> Result<(), HostError>;
    async fn remove_bookmark(&self, id: &str) -> Result<(), HostError>;
    async fn bookmark_subtree(&self, id: &str) -> Result<Vec<BookmarkNode>, HostError>;
    async fn rename_bookmark(&self, id: &str, title: &str) -> Result<(), HostError>;
}

/// [`Host`] backed by the `chrome.*` extension APIs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChromeHost;

fn to_js<T: Serialize + ?Sized>(what: &'static str, value: &T) -> Result<JsValue, HostError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| HostError::convert(what, e))
}

fn from_js<T: DeserializeOwned>(what: &'static str, value: JsValue) -> Result<T, HostError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| HostError::convert(what, e))
}

fn rejected(call: &'static str) -> impl FnOnce(JsValue) -> HostError {
    move |e| HostError::call(call, format!("{:?}", e))
}

impl Host for ChromeHost {
    async fn query_tabs(&self, filter: &TabQuery) -> Result<Vec<Tab>, HostError> {
        let tabs_js = queryTabs(to_js("tab query", filter)?).await.map_err(rejected("tabs.query"))?;
        from_js("tab list", tabs_js)
    }

    async fn create_tab(&self, url: &str, active: bool) -> Result<Tab, HostError> {
        let properties = to_js("tab properties", &CreateTabProperties { url, active })?;
        let tab_js = createTab(properties).await.map_err(rejected("tabs.create"))?;
        from_js("tab", tab_js)
    }

    async fn remove_tab(&self, tab_id: i32) -> Result<(), HostError> {
        removeTab(tab_id).await.map_err(rejected("tabs.remove"))
    }

    async fn update_tab(&self, tab_id: i32, update: &TabUpdate) -> Result<(), HostError> {
        updateTab(tab_id, to_js("tab update", update)?)
            .await
            .map_err(rejected("tabs.update"))
    }

    async fn group_tabs(&self, tab_ids: &[i32], group_id: Option<i32>) -> Result<i32, HostError> {
        let options = to_js("group options", &GroupOptions { tab_ids, group_id })?;
        let group_js = groupTabs(options).await.map_err(rejected("tabs.group"))?;
        from_js("group id", group_js)
    }

    async fn query_tab_groups(&self) -> Result<Vec<TabGroup>, HostError> {
        let groups_js = queryTabGroups(JsValue::from(js_sys::Object::new()))
            .await
            .map_err(rejected("tabGroups.query"))?;
        from_js("tab group list", groups_js)
    }

    async fn update_tab_group(&self, group_id: i32, update: &TabGroupUpdate) -> Result<(), HostError> {
        updateTabGroup(group_id, to_js("tab group update", update)?)
            .await
            .map_err(rejected("tabGroups.update"))
    }

    async fn bookmark_tree(&self) -> Result<Vec<BookmarkNode>, HostError> {
        let tree_js = getBookmarkTree().await.map_err(rejected("bookmarks.getTree"))?;
        from_js("bookmark tree", tree_js)
    }

    async fn create_bookmark(&self, create: &BookmarkCreate) -> Result<BookmarkNode, HostError> {
        let created_js = createBookmark(to_js("bookmark", create)?)
            .await
            .map_err(rejected("bookmarks.create"))?;
        from_js("bookmark", created_js)
    }

    async fn move_bookmark(&self, id: &str, destination: &BookmarkDestination) -> Result<(), HostError> {
        moveBookmark(id, to_js("bookmark destination", destination)?)
            .await
            .map_err(rejected("bookmarks.move"))
    }

    async fn remove_bookmark(&self, id: &str) -> Result<(), HostError> {
        removeBookmark(id).await.map_err(rejected("bookmarks.remove"))
    }

    async fn bookmark_subtree(&self, id: &str) -> Result<Vec<BookmarkNode>, HostError> {
        let tree_js = getBookmarkSubTree(id).await.map_err(rejected("bookmarks.getSubTree"))?;
        from_js("bookmark subtree", tree_js)
    }

    async fn rename_bookmark(&self, id: &str, title: &str) -> Result<(), HostError> {
        let changes = to_js("bookmark changes", &TitleOnly { title: title.to_string() })?;
        updateBookmark(id, changes).await.map_err(rejected("bookmarks.update"))
    }
}
