//! In-memory [`Host`] used by the unit tests
use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use crate::error::HostError;
use crate::host::{BookmarkCreate, BookmarkDestination, Host, TabGroupUpdate, TabQuery, TabUpdate};
use crate::tab_data::{BookmarkNode, Tab, TabGroup, TabGroupColor, UNGROUPED};

pub struct FakeHost {
    pub tabs: RefCell<Vec<Tab>>,
    pub tab_groups: RefCell<Vec<TabGroup>>,
    pub tree: RefCell<Vec<BookmarkNode>>,
    /// Tab ids, bookmark ids or urls whose requests are rejected
    pub failing: RefCell<HashSet<String>>,
    pub calls: RefCell<Vec<String>>,
    next_id: Cell<i32>,
}

pub fn tab(id: i32, url: &str, group_id: i32) -> Tab {
    Tab {
        id: Some(id),
        title: Some(format!("Tab {}", id)),
        url: Some(url.to_string()),
        window_id: 1,
        active: false,
        audible: None,
        muted_info: None,
        group_id,
        fav_icon_url: None,
    }
}

pub fn folder(id: &str, title: &str, children: Vec<BookmarkNode>) -> BookmarkNode {
    BookmarkNode {
        id: id.to_string(),
        parent_id: None,
        title: title.to_string(),
        url: None,
        children: Some(children),
        index: None,
        date_added: None,
    }
}

pub fn bookmark(id: &str, title: &str, url: &str) -> BookmarkNode {
    BookmarkNode {
        id: id.to_string(),
        parent_id: None,
        title: title.to_string(),
        url: Some(url.to_string()),
        children: None,
        index: None,
        date_added: None,
    }
}

fn find_mut<'a>(nodes: &'a mut [BookmarkNode], id: &str) -> Option<&'a mut BookmarkNode> {
    for node in nodes.iter_mut() {
        if node.id == id {
            return Some(node);
        }
        if let Some(children) = node.children.as_mut() {
            if let Some(found) = find_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn detach(nodes: &mut Vec<BookmarkNode>, id: &str) -> Option<BookmarkNode> {
    if let Some(pos) = nodes.iter().position(|node| node.id == id) {
        return Some(nodes.remove(pos));
    }
    nodes
        .iter_mut()
        .filter_map(|node| node.children.as_mut())
        .find_map(|children| detach(children, id))
}

impl FakeHost {
    /// Empty browser: root `0` holding "Bookmarks Bar" (`1`) and "Other Bookmarks" (`2`)
    pub fn new() -> FakeHost {
        FakeHost::with_tree(vec![folder(
            "0",
            "",
            vec![folder("1", "Bookmarks Bar", vec![]), folder("2", "Other Bookmarks", vec![])],
        )])
    }

    pub fn with_tree(tree: Vec<BookmarkNode>) -> FakeHost {
        FakeHost {
            tabs: RefCell::new(Vec::new()),
            tab_groups: RefCell::new(Vec::new()),
            tree: RefCell::new(tree),
            failing: RefCell::new(HashSet::new()),
            calls: RefCell::new(Vec::new()),
            next_id: Cell::new(100),
        }
    }

    pub fn fail_on(&self, what: &str) {
        self.failing.borrow_mut().insert(what.to_string());
    }

    pub fn add_tab(&self, tab: Tab) {
        self.tabs.borrow_mut().push(tab);
    }

    pub fn add_tab_group(&self, id: i32, title: &str) {
        self.tab_groups.borrow_mut().push(TabGroup {
            id,
            title: Some(title.to_string()),
            color: TabGroupColor::Grey,
            collapsed: true,
            window_id: 1,
        });
    }

    pub fn node(&self, id: &str) -> Option<BookmarkNode> {
        find_mut(&mut self.tree.borrow_mut(), id).map(|node| node.clone())
    }

    pub fn child_ids(&self, id: &str) -> Vec<String> {
        self.node(id)
            .map(|node| node.children().iter().map(|child| child.id.clone()).collect())
            .unwrap_or_default()
    }

    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls.borrow().iter().filter(|call| call.starts_with(prefix)).count()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn check(&self, call: &'static str, key: &str) -> Result<(), HostError> {
        if self.failing.borrow().contains(key) {
            Err(HostError::call(call, format!("rejected {}", key)))
        } else {
            Ok(())
        }
    }

    fn next_id(&self) -> i32 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

impl Host for FakeHost {
    async fn query_tabs(&self, filter: &TabQuery) -> Result<Vec<Tab>, HostError> {
        self.record("tabs.query".to_string());
        Ok(self
            .tabs
            .borrow()
            .iter()
            .filter(|tab| filter.active.is_none_or(|active| tab.active == active))
            .cloned()
            .collect())
    }

    async fn create_tab(&self, url: &str, active: bool) -> Result<Tab, HostError> {
        self.record(format!("tabs.create {}", url));
        self.check("tabs.create", url)?;
        let mut created = tab(self.next_id(), url, UNGROUPED);
        created.active = active;
        self.tabs.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn remove_tab(&self, tab_id: i32) -> Result<(), HostError> {
        self.record(format!("tabs.remove {}", tab_id));
        self.check("tabs.remove", &tab_id.to_string())?;
        self.tabs.borrow_mut().retain(|tab| tab.id != Some(tab_id));
        Ok(())
    }

    async fn update_tab(&self, tab_id: i32, update: &TabUpdate) -> Result<(), HostError> {
        self.record(format!("tabs.update {}", tab_id));
        self.check("tabs.update", &tab_id.to_string())?;
        let mut tabs = self.tabs.borrow_mut();
        if update.active == Some(true) {
            for tab in tabs.iter_mut() {
                tab.active = tab.id == Some(tab_id);
            }
        }
        if let Some(muted) = update.muted {
            if let Some(tab) = tabs.iter_mut().find(|tab| tab.id == Some(tab_id)) {
                tab.muted_info = Some(crate::tab_data::MutedInfo { muted, reason: None });
            }
        }
        Ok(())
    }

    async fn group_tabs(&self, tab_ids: &[i32], group_id: Option<i32>) -> Result<i32, HostError> {
        self.record(format!("tabs.group {:?} {:?}", tab_ids, group_id));
        let group_id = match group_id {
            Some(id) => id,
            None => {
                let id = self.next_id();
                self.add_tab_group(id, "");
                id
            }
        };
        for tab in self.tabs.borrow_mut().iter_mut() {
            if tab.id.is_some_and(|id| tab_ids.contains(&id)) {
                tab.group_id = group_id;
            }
        }
        Ok(group_id)
    }

    async fn query_tab_groups(&self) -> Result<Vec<TabGroup>, HostError> {
        self.record("tabGroups.query".to_string());
        Ok(self.tab_groups.borrow().clone())
    }

    async fn update_tab_group(&self, group_id: i32, update: &TabGroupUpdate) -> Result<(), HostError> {
        self.record(format!("tabGroups.update {}", group_id));
        let mut groups = self.tab_groups.borrow_mut();
        let group = groups
            .iter_mut()
            .find(|group| group.id == group_id)
            .ok_or_else(|| HostError::call("tabGroups.update", "no such group"))?;
        if let Some(title) = &update.title {
            group.title = Some(title.clone());
        }
        if let Some(collapsed) = update.collapsed {
            group.collapsed = collapsed;
        }
        Ok(())
    }

    async fn bookmark_tree(&self) -> Result<Vec<BookmarkNode>, HostError> {
        self.record("bookmarks.getTree".to_string());
        Ok(self.tree.borrow().clone())
    }

    async fn create_bookmark(&self, create: &BookmarkCreate) -> Result<BookmarkNode, HostError> {
        self.record(format!("bookmarks.create {}", create.title));
        self.check("bookmarks.create", create.url.as_deref().unwrap_or(&create.title))?;
        let id = self.next_id().to_string();
        let mut node = match &create.url {
            Some(url) => bookmark(&id, &create.title, url),
            None => folder(&id, &create.title, vec![]),
        };
        node.parent_id = Some(create.parent_id.clone());
        let mut tree = self.tree.borrow_mut();
        let parent = find_mut(&mut tree, &create.parent_id)
            .ok_or_else(|| HostError::call("bookmarks.create", "no such parent"))?;
        parent.children.get_or_insert_with(Vec::new).push(node.clone());
        Ok(node)
    }

    async fn move_bookmark(&self, id: &str, destination: &BookmarkDestination) -> Result<(), HostError> {
        self.record(format!("bookmarks.move {} {}", id, destination.parent_id));
        self.check("bookmarks.move", id)?;
        let mut tree = self.tree.borrow_mut();
        let mut node = detach(&mut tree, id).ok_or_else(|| HostError::call("bookmarks.move", "no such node"))?;
        node.parent_id = Some(destination.parent_id.clone());
        let parent = find_mut(&mut tree, &destination.parent_id)
            .ok_or_else(|| HostError::call("bookmarks.move", "no such parent"))?;
        let children = parent.children.get_or_insert_with(Vec::new);
        match destination.index {
            Some(index) if (index as usize) <= children.len() => children.insert(index as usize, node),
            _ => children.push(node),
        }
        Ok(())
    }

    async fn remove_bookmark(&self, id: &str) -> Result<(), HostError> {
        self.record(format!("bookmarks.remove {}", id));
        self.check("bookmarks.remove", id)?;
        detach(&mut self.tree.borrow_mut(), id)
            .map(|_| ())
            .ok_or_else(|| HostError::call("bookmarks.remove", "no such node"))
    }

    async fn bookmark_subtree(&self, id: &str) -> Result<Vec<BookmarkNode>, HostError> {
        self.record(format!("bookmarks.getSubTree {}", id));
        Ok(self.node(id).into_iter().collect())
    }

    async fn rename_bookmark(&self, id: &str, title: &str) -> Result<(), HostError> {
        self.record(format!("bookmarks.update {}", id));
        let mut tree = self.tree.borrow_mut();
        let node = find_mut(&mut tree, id).ok_or_else(|| HostError::call("bookmarks.update", "no such node"))?;
        node.title = title.to_string();
        Ok(())
    }
}
