//! New-tab page state and the fetches that refresh it
//!
//! Every refresh re-reads the full host state. Derived groups are rebuilt from
//! scratch and then reconciled against the previous state so unchanged groups
//! keep their identity.
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::bookmark_tree::{walk_bookmark_tree, BookmarkGroup};
use crate::error::HostError;
use crate::group_name::GroupName;
use crate::grouping::{group_names, group_tabs, GroupedTabs};
use crate::host::{Host, TabQuery};
use crate::reconcile::{reconcile, reconcile_value, GroupMap};
use crate::storage::{StorageArea, TabStorage, TabStorageUpdate, UNKNOWN};
use crate::tab_data::{BookmarkNode, TabGroup, TabInfo};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTabState {
    pub tabs: Rc<Vec<TabInfo>>,
    pub raw_tab_groups: Rc<Vec<TabGroup>>,
    pub bookmark_tree: Rc<Vec<BookmarkNode>>,
    pub tab_groups: GroupMap<i32, Rc<GroupedTabs>>,
    pub bookmark_groups: GroupMap<String, Rc<BookmarkGroup>>,
    pub group_names: Rc<Vec<GroupName>>,
}

impl NewTabState {
    pub fn new() -> NewTabState {
        NewTabState::default()
    }

    pub fn apply_tabs(&self, tabs: Vec<TabInfo>) -> NewTabState {
        let tabs = Rc::new(tabs);
        let fresh = group_tabs(&self.raw_tab_groups, &tabs);
        NewTabState {
            tab_groups: reconcile(&self.tab_groups, fresh),
            tabs,
            ..self.clone()
        }
    }

    pub fn apply_tab_groups(&self, raw_tab_groups: Vec<TabGroup>) -> NewTabState {
        let raw_tab_groups = Rc::new(raw_tab_groups);
        let fresh = group_tabs(&raw_tab_groups, &self.tabs);
        let next = NewTabState {
            tab_groups: reconcile(&self.tab_groups, fresh),
            raw_tab_groups,
            ..self.clone()
        };
        next.with_group_names(&self.group_names)
    }

    pub fn apply_bookmark_tree(&self, tree: Vec<BookmarkNode>) -> NewTabState {
        let fresh = walk_bookmark_tree(&tree);
        let next = NewTabState {
            bookmark_groups: reconcile(&self.bookmark_groups, fresh),
            bookmark_tree: Rc::new(tree),
            ..self.clone()
        };
        next.with_group_names(&self.group_names)
    }

    fn with_group_names(mut self, previous: &Rc<Vec<GroupName>>) -> NewTabState {
        let folders: Vec<BookmarkNode> = self
            .bookmark_groups
            .values()
            .map(|group| group.parent.clone())
            .collect();
        self.group_names = reconcile_value(previous, group_names(&self.raw_tab_groups, &folders));
        self
    }
}

/// Remembers which tab was active so focus changes can be timestamped
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveTabTracker {
    pub active_tab: i32,
    pub url: String,
}

impl Default for ActiveTabTracker {
    fn default() -> Self {
        ActiveTabTracker {
            active_tab: UNKNOWN,
            url: String::new(),
        }
    }
}

impl ActiveTabTracker {
    /// Record `tab_id` as the active tab. Returns the tab that lost focus, if
    /// the active tab changed and a previous one was known.
    pub fn hand_off(&mut self, tab_id: i32, url: &str) -> Option<i32> {
        if self.active_tab == tab_id {
            return None;
        }
        let previous = self.active_tab;
        log::debug!("New active tab {} {:?}", tab_id, url);
        self.active_tab = tab_id;
        self.url = url.to_string();
        (previous != UNKNOWN).then_some(previous)
    }
}

/// Query every tab, stamp the tab that lost focus, and join stored
/// last-active times
pub async fn fetch_tabs<H: Host, S: StorageArea>(
    host: &H,
    storage: &S,
    tracker: &RefCell<ActiveTabTracker>,
    now: f64,
) -> Result<Vec<TabInfo>, HostError> {
    let tabs = host.query_tabs(&TabQuery::all()).await?;

    for tab in tabs.iter().filter(|tab| tab.active) {
        let tab_id = tab.id.unwrap_or(UNKNOWN);
        let previous = tracker
            .borrow_mut()
            .hand_off(tab_id, tab.url.as_deref().unwrap_or_default());
        if let Some(previous) = previous {
            let update = TabStorageUpdate {
                tab_id: previous,
                created_at: None,
                last_active: Some(now),
            };
            if let Err(e) = TabStorage::update(storage, update).await {
                log::error!("Recording last active time of tab {} failed: {}", previous, e);
            }
        }
    }

    let mut records = HashMap::new();
    for tab_id in tabs.iter().filter_map(|tab| tab.id).filter(|id| *id >= 0) {
        records.insert(tab_id, TabStorage::from_storage(storage, tab_id).await?);
    }

    Ok(tabs
        .into_iter()
        .map(|tab| {
            let last_active = tab
                .id
                .and_then(|id| records.get(&id))
                .and_then(TabStorage::last_active_at);
            TabInfo::from_tab(tab, last_active)
        })
        .collect())
}

pub async fn fetch_tab_groups<H: Host>(host: &H) -> Result<Vec<TabGroup>, HostError> {
    host.query_tab_groups().await
}

pub async fn fetch_bookmark_tree<H: Host>(host: &H) -> Result<Vec<BookmarkNode>, HostError> {
    host.bookmark_tree().await
}
