//! Bucketing live tabs by their host tab group
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::group_name::GroupName;
use crate::reconcile::GroupMap;
use crate::tab_data::{BookmarkNode, TabGroup, TabInfo};

/// The tabs of one host tab group (or of the ungrouped bucket)
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedTabs {
    pub group_id: i32,
    pub tabs: Vec<TabInfo>,
    /// Missing for the ungrouped bucket, or while the host is still creating the group
    pub tab_group: Option<TabGroup>,
}

impl GroupedTabs {
    fn new(group_id: i32) -> GroupedTabs {
        GroupedTabs {
            group_id,
            tabs: Vec::new(),
            tab_group: None,
        }
    }

    pub fn name(&self) -> GroupName {
        GroupName::from_string(
            self.tab_group
                .as_ref()
                .and_then(|group| group.title.as_deref())
                .unwrap_or_default(),
        )
    }
}

/// Group tabs by group id, ascending (ungrouped `-1` first). Tab groups
/// without any live tab are left out.
pub fn group_tabs(tab_groups: &[TabGroup], tabs: &[TabInfo]) -> GroupMap<i32, Rc<GroupedTabs>> {
    let mut buckets: BTreeMap<i32, GroupedTabs> = BTreeMap::new();

    for tab in tabs {
        buckets
            .entry(tab.group_id)
            .or_insert_with(|| GroupedTabs::new(tab.group_id))
            .tabs
            .push(tab.clone());
    }

    for tab_group in tab_groups {
        if let Some(bucket) = buckets.get_mut(&tab_group.id) {
            bucket.tab_group = Some(tab_group.clone());
        }
    }

    buckets
        .into_iter()
        .map(|(group_id, bucket)| (group_id, Rc::new(bucket)))
        .collect()
}

/// Every known group name: tab group titles first, then bookmark folder titles
pub fn group_names(tab_groups: &[TabGroup], folders: &[BookmarkNode]) -> Vec<GroupName> {
    tab_groups
        .iter()
        .map(|group| GroupName::from_string(group.title.as_deref().unwrap_or_default()))
        .chain(folders.iter().map(|folder| GroupName::from_string(&folder.title)))
        .collect()
}
