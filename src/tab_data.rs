//! Data structures mirroring the host browser's tab, tab group and bookmark objects
use serde::{Deserialize, Serialize};

/// Group id the host assigns to tabs that are not in any tab group
pub const UNGROUPED: i32 = -1;

/// Bookmark tree id of the "Bookmarks Bar" root folder
pub const BOOKMARKS_BAR_ID: &str = "1";

/// Bookmark tree id of the "Other Bookmarks" root folder
pub const OTHER_BOOKMARKS_ID: &str = "2";

fn ungrouped() -> i32 {
    UNGROUPED
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutedInfo {
    pub muted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A browser tab as reported by `tabs.query`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub window_id: i32,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub audible: Option<bool>,
    #[serde(default)]
    pub muted_info: Option<MutedInfo>,
    #[serde(default = "ungrouped")]
    pub group_id: i32,
    #[serde(default)]
    pub fav_icon_url: Option<String>,
}

/// Information about a browser tab, as rendered on the new-tab page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub id: Option<i32>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub window_id: i32,
    pub active: bool,
    pub audible: Option<bool>,
    pub muted_info: Option<MutedInfo>,
    pub group_id: i32,
    pub fav_icon_url: Option<String>,
    /// Epoch ms when the tab last lost focus, if known
    pub last_active: Option<f64>,
}

impl TabInfo {
    pub fn from_tab(tab: Tab, last_active: Option<f64>) -> TabInfo {
        TabInfo {
            id: tab.id,
            title: tab.title,
            url: tab.url,
            window_id: tab.window_id,
            active: tab.active,
            audible: tab.audible,
            muted_info: tab.muted_info,
            group_id: tab.group_id,
            fav_icon_url: tab.fav_icon_url,
            last_active,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted_info.as_ref().is_some_and(|info| info.muted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabGroupColor {
    #[default]
    Grey,
    Blue,
    Red,
    Yellow,
    Green,
    Pink,
    Purple,
    Cyan,
    Orange,
}

/// Host-level tab group metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabGroup {
    pub id: i32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub color: TabGroupColor,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub window_id: i32,
}

/// A node of the bookmark tree. Nodes without a url are folders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<BookmarkNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<f64>,
}

impl BookmarkNode {
    pub fn is_folder(&self) -> bool {
        self.url.is_none()
    }

    pub fn children(&self) -> &[BookmarkNode] {
        self.children.as_deref().unwrap_or_default()
    }
}

/// A bare url/title pair, e.g. pasted into the import box
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    pub title: String,
}

/// Anything that points somewhere and has a name
pub trait Linked {
    fn url(&self) -> Option<&str>;
    fn title(&self) -> Option<&str>;
}

impl Linked for TabInfo {
    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

impl Linked for BookmarkNode {
    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }
}

impl Linked for Link {
    fn url(&self) -> Option<&str> {
        Some(&self.url)
    }

    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }
}
