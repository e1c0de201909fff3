//! Tab and bookmark operations built from host calls
//!
//! Bulk operations send every request at once and wait for all of them. A
//! failed item is logged and left out of the result; the others still go through.
use std::collections::HashSet;
use std::rc::Rc;

use futures::future::join_all;

use crate::bookmark_tree::{find_child_folder, find_folder, plan_folder_merges, BookmarkGroup};
use crate::error::{ActionError, HostError};
use crate::group_name::GroupName;
use crate::host::{BookmarkCreate, BookmarkDestination, Host, TabGroupUpdate, TabQuery, TabUpdate};
use crate::links::{get_duplicates, sort_by_url_and_title};
use crate::reconcile::GroupMap;
use crate::tab_data::{BookmarkNode, Linked, Tab, TabGroup, TabInfo, UNGROUPED};

fn successes<T>(results: Vec<Result<T, HostError>>) -> Vec<T> {
    results.into_iter().filter_map(Result::ok).collect()
}

fn tab_ids(tabs: &[TabInfo]) -> Vec<i32> {
    tabs.iter().filter_map(|tab| tab.id).collect()
}

/// Close tabs; returns the ids that were closed
pub async fn close_tabs<H: Host>(host: &H, tabs: &[TabInfo]) -> Vec<i32> {
    let results = join_all(tab_ids(tabs).into_iter().map(|id| async move {
        host.remove_tab(id)
            .await
            .map(|_| id)
            .inspect_err(|e| log::error!("Removing tab {} failed: {}", id, e))
    }))
    .await;
    successes(results)
}

pub async fn close_tab<H: Host>(host: &H, tab: &TabInfo) -> Result<(), HostError> {
    match tab.id {
        Some(id) => host.remove_tab(id).await,
        None => Ok(()),
    }
}

pub async fn focus_tab<H: Host>(host: &H, tab: &TabInfo) -> Result<(), HostError> {
    let Some(id) = tab.id else {
        return Ok(());
    };
    let update = TabUpdate {
        active: Some(true),
        ..TabUpdate::default()
    };
    host.update_tab(id, &update).await
}

pub async fn set_muted<H: Host>(host: &H, tab: &TabInfo, muted: bool) -> Result<(), HostError> {
    let Some(id) = tab.id else {
        return Ok(());
    };
    let update = TabUpdate {
        muted: Some(muted),
        ..TabUpdate::default()
    };
    host.update_tab(id, &update).await
}

pub async fn mute_tab<H: Host>(host: &H, tab: &TabInfo) -> Result<(), HostError> {
    set_muted(host, tab, true).await
}

pub async fn unmute_tab<H: Host>(host: &H, tab: &TabInfo) -> Result<(), HostError> {
    set_muted(host, tab, false).await
}

pub async fn mute_tabs<H: Host>(host: &H, tabs: &[TabInfo]) -> Result<(), HostError> {
    for tab in tabs {
        mute_tab(host, tab).await?;
    }
    Ok(())
}

/// Close every tab that repeats an earlier tab's url and title
pub async fn close_duplicate_tabs<H: Host>(host: &H, tabs: &[TabInfo]) -> Vec<i32> {
    let dupes = get_duplicates(tabs);
    if dupes.is_empty() {
        log::debug!("No duplicate tabs");
        return Vec::new();
    }
    close_tabs(host, &dupes).await
}

pub async fn change_tab_group_name<H: Host>(host: &H, group_id: i32, name: &GroupName) -> Result<(), HostError> {
    if group_id == UNGROUPED {
        return Ok(());
    }
    let update = TabGroupUpdate {
        title: Some(name.to_string()),
        ..TabGroupUpdate::default()
    };
    host.update_tab_group(group_id, &update).await
}

pub async fn add_tabs_to_existing_group<H: Host>(
    host: &H,
    tab_group: &TabGroup,
    tabs: &[TabInfo],
) -> Result<i32, HostError> {
    let group_id = host.group_tabs(&tab_ids(tabs), Some(tab_group.id)).await?;
    let update = TabGroupUpdate {
        collapsed: Some(false),
        ..TabGroupUpdate::default()
    };
    host.update_tab_group(group_id, &update).await?;
    Ok(group_id)
}

async fn group_into_named<H: Host>(host: &H, name: &str, ids: &[i32]) -> Result<Option<i32>, HostError> {
    if ids.is_empty() {
        return Ok(None);
    }
    let existing = host
        .query_tab_groups()
        .await?
        .into_iter()
        .find(|group| group.title.as_deref() == Some(name));

    // both paths leave the group expanded
    let (group_id, update) = match existing {
        Some(group) => {
            let group_id = host.group_tabs(ids, Some(group.id)).await?;
            let update = TabGroupUpdate {
                collapsed: Some(false),
                ..TabGroupUpdate::default()
            };
            (group_id, update)
        }
        None => {
            let group_id = host.group_tabs(ids, None).await?;
            let update = TabGroupUpdate {
                title: Some(name.to_string()),
                collapsed: Some(false),
            };
            (group_id, update)
        }
    };
    host.update_tab_group(group_id, &update).await?;
    Ok(Some(group_id))
}

/// Move tabs into the tab group titled `name`, creating it if there is none
pub async fn add_tabs_to_group<H: Host>(host: &H, name: &str, tabs: &[TabInfo]) -> Result<Option<i32>, HostError> {
    group_into_named(host, name, &tab_ids(tabs)).await
}

/// The active tab of the focused window
pub async fn current_tab<H: Host>(host: &H) -> Result<Option<TabInfo>, HostError> {
    let query = TabQuery {
        active: Some(true),
        current_window: Some(true),
    };
    let tabs = host.query_tabs(&query).await?;
    Ok(tabs.into_iter().next().map(|tab| TabInfo::from_tab(tab, None)))
}

pub async fn add_current_tab_to_group<H: Host>(host: &H, tab_group: &TabGroup) -> Result<Option<i32>, HostError> {
    let Some(tab) = current_tab(host).await? else {
        return Ok(None);
    };
    Ok(Some(add_tabs_to_existing_group(host, tab_group, &[tab]).await?))
}

/// Put the current tab into the group titled `name`, creating the group when needed
pub async fn add_current_tab_to_named_group<H: Host>(host: &H, name: &str) -> Result<Option<i32>, HostError> {
    let Some(tab) = current_tab(host).await? else {
        return Ok(None);
    };
    add_tabs_to_group(host, name, &[tab]).await
}

/// Open one background tab per link; returns the tabs that opened
pub async fn create_tabs_for_links<H: Host, L: Linked>(host: &H, links: &[L]) -> Vec<Tab> {
    let results = join_all(links.iter().filter_map(|link| link.url()).map(|url| async move {
        host.create_tab(url, false)
            .await
            .inspect_err(|e| log::error!("Opening {} failed: {}", url, e))
    }))
    .await;
    successes(results)
}

/// Open links as tabs and put them into the tab group titled `name`
pub async fn open_links_in_tab_group<H: Host, L: Linked>(
    host: &H,
    name: &str,
    links: &[L],
) -> Result<Option<i32>, HostError> {
    let tabs = create_tabs_for_links(host, links).await;
    let ids: Vec<i32> = tabs.iter().filter_map(|tab| tab.id).collect();
    group_into_named(host, name, &ids).await
}

/// The folder new bookmark folders are created in, e.g. "Other Bookmarks"
pub async fn extension_bookmark_folder<H: Host>(host: &H, home: &[&str]) -> Result<BookmarkNode, ActionError> {
    let tree = host.bookmark_tree().await?;
    find_folder(&tree, home)
        .cloned()
        .ok_or_else(|| ActionError::NotFound(format!("{} folder", home.join("/"))))
}

/// Child folder of `folder` titled `name`, created when missing
pub async fn subfolder<H: Host>(host: &H, folder: &BookmarkNode, name: &str) -> Result<BookmarkNode, HostError> {
    if let Some(existing) = find_child_folder(folder, name) {
        return Ok(existing.clone());
    }
    log::info!("Creating bookmark folder {:?}", name);
    host.create_bookmark(&BookmarkCreate {
        parent_id: folder.id.clone(),
        title: name.to_string(),
        url: None,
    })
    .await
}

/// Bookmark links into `node`, skipping urls it already holds
pub async fn save_links_to_bookmark_node<H: Host, L: Linked>(
    host: &H,
    node: &BookmarkNode,
    links: &[L],
) -> Result<Vec<BookmarkNode>, HostError> {
    let mut existing: HashSet<String> = node
        .children()
        .iter()
        .map(|child| child.url.clone().unwrap_or_default())
        .collect();

    let mut created = Vec::new();
    for link in links {
        let url = link.url().unwrap_or_default();
        if !existing.insert(url.to_string()) {
            continue;
        }
        let bookmark = host
            .create_bookmark(&BookmarkCreate {
                parent_id: node.id.clone(),
                title: link.title().unwrap_or_default().to_string(),
                url: Some(url.to_string()),
            })
            .await?;
        created.push(bookmark);
    }
    Ok(created)
}

/// Bookmark links into the folder `name` below the extension folder
pub async fn save_links_to_folder<H: Host, L: Linked>(
    host: &H,
    home: &[&str],
    name: &str,
    links: &[L],
) -> Result<Vec<BookmarkNode>, ActionError> {
    let parent = extension_bookmark_folder(host, home).await?;
    let folder = subfolder(host, &parent, name).await?;
    Ok(save_links_to_bookmark_node(host, &folder, links).await?)
}

/// Bookmark tabs into the folder `name`, then close them
pub async fn save_tabs_to_bookmark_folder<H: Host>(
    host: &H,
    home: &[&str],
    name: &str,
    tabs: &[TabInfo],
) -> Result<Vec<i32>, ActionError> {
    save_links_to_folder(host, home, name, tabs).await?;
    Ok(close_tabs(host, tabs).await)
}

/// Move bookmarks into `parent_id`; returns the ids that moved
pub async fn move_bookmarks<H: Host>(host: &H, bookmarks: &[BookmarkNode], parent_id: &str) -> Vec<String> {
    let destination = BookmarkDestination {
        parent_id: parent_id.to_string(),
        index: None,
    };
    let destination = &destination;
    let results = join_all(bookmarks.iter().map(|bookmark| async move {
        host.move_bookmark(&bookmark.id, destination)
            .await
            .map(|_| bookmark.id.clone())
            .inspect_err(|e| log::error!("Moving bookmark {} failed: {}", bookmark.id, e))
    }))
    .await;
    successes(results)
}

/// Move bookmarks into the folder `name` below the extension folder
pub async fn move_bookmarks_to_folder<H: Host>(
    host: &H,
    home: &[&str],
    name: &str,
    bookmarks: &[BookmarkNode],
) -> Result<Vec<String>, ActionError> {
    let parent = extension_bookmark_folder(host, home).await?;
    let folder = subfolder(host, &parent, name).await?;
    Ok(move_bookmarks(host, bookmarks, &folder.id).await)
}

/// Delete bookmarks; returns the ids that were deleted
pub async fn delete_bookmarks<H: Host>(host: &H, bookmarks: &[BookmarkNode]) -> Vec<String> {
    let results = join_all(bookmarks.iter().map(|bookmark| async move {
        host.remove_bookmark(&bookmark.id)
            .await
            .map(|_| bookmark.id.clone())
            .inspect_err(|e| log::error!("Deleting bookmark {} failed: {}", bookmark.id, e))
    }))
    .await;
    successes(results)
}

/// Delete every bookmark that repeats an earlier one
pub async fn delete_duplicate_bookmarks<H: Host>(host: &H, bookmarks: &[BookmarkNode]) -> Vec<String> {
    delete_bookmarks(host, &get_duplicates(bookmarks)).await
}

/// Remove the folder when nothing is left in it
pub async fn delete_folder_if_empty<H: Host>(host: &H, folder_id: &str) -> Result<bool, HostError> {
    let folders = host.bookmark_subtree(folder_id).await?;
    let empty: Vec<BookmarkNode> = folders
        .into_iter()
        .filter(|folder| folder.is_folder() && folder.children().is_empty())
        .collect();
    if empty.is_empty() {
        return Ok(false);
    }
    Ok(!delete_bookmarks(host, &empty).await.is_empty())
}

pub async fn change_bookmark_folder_name<H: Host>(
    host: &H,
    folder: &BookmarkNode,
    name: &GroupName,
) -> Result<(), HostError> {
    let title = name.to_string();
    if folder.title == title {
        return Ok(());
    }
    host.rename_bookmark(&folder.id, &title).await
}

/// Reorder bookmarks inside `parent_id` by url then title, one move at a time
pub async fn sort_bookmarks_in_folder<H: Host>(
    host: &H,
    parent_id: &str,
    bookmarks: &[BookmarkNode],
) -> Result<(), HostError> {
    let mut sorted = bookmarks.to_vec();
    sort_by_url_and_title(&mut sorted);
    let destination = BookmarkDestination {
        parent_id: parent_id.to_string(),
        index: None,
    };
    for bookmark in &sorted {
        host.move_bookmark(&bookmark.id, &destination).await?;
    }
    Ok(())
}

/// Fold folders that share a name text into one. Returns how many bookmarks moved.
pub async fn merge_bookmark_folders<H: Host>(host: &H, groups: &GroupMap<String, Rc<BookmarkGroup>>) -> usize {
    let mut moved = 0;
    for merge in plan_folder_merges(groups.values()) {
        log::info!(
            "Merging {} folder(s) into {:?}",
            merge.sources.len(),
            merge.target.title
        );
        moved += move_bookmarks(host, &merge.bookmarks_to_move(), &merge.target.id)
            .await
            .len();
        for source in &merge.sources {
            if let Err(e) = delete_folder_if_empty(host, &source.id).await {
                log::error!("Removing merged folder {} failed: {}", source.id, e);
            }
        }
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookmark_tree::walk_bookmark_tree;
    use crate::tab_data::Link;
    use crate::testing::{bookmark, folder, tab, FakeHost};
    use futures::executor::block_on;

    const HOME: &[&str] = &["Other Bookmarks"];

    fn info(tab: Tab) -> TabInfo {
        TabInfo::from_tab(tab, None)
    }

    fn link(url: &str) -> Link {
        Link {
            url: url.to_string(),
            title: url.to_string(),
        }
    }

    #[test]
    fn test_close_tabs_tolerates_partial_failure() {
        let host = FakeHost::new();
        for id in 1..=3 {
            host.add_tab(tab(id, &format!("https://{}.com", id), UNGROUPED));
        }
        host.fail_on("2");
        let tabs: Vec<TabInfo> = host.tabs.borrow().iter().cloned().map(info).collect();

        let closed = block_on(close_tabs(&host, &tabs));

        assert_eq!(closed, vec![1, 3]);
        assert_eq!(host.call_count("tabs.remove"), 3);
        assert_eq!(host.tabs.borrow().iter().map(|t| t.id).collect::<Vec<_>>(), vec![Some(2)]);
    }

    #[test]
    fn test_close_tabs_skips_tabs_without_id() {
        let host = FakeHost::new();
        let mut transient = info(tab(1, "https://a.com", UNGROUPED));
        transient.id = None;

        assert!(block_on(close_tabs(&host, &[transient])).is_empty());
        assert_eq!(host.call_count("tabs.remove"), 0);
    }

    #[test]
    fn test_close_duplicate_tabs() {
        let host = FakeHost::new();
        let mut tabs = Vec::new();
        for (id, url) in [(1, "https://a.com"), (2, "https://b.com"), (3, "https://a.com")] {
            let mut t = tab(id, url, UNGROUPED);
            t.title = Some("Same".to_string());
            host.add_tab(t.clone());
            tabs.push(info(t));
        }

        assert_eq!(block_on(close_duplicate_tabs(&host, &tabs)), vec![3]);
    }

    #[test]
    fn test_focus_and_mute() {
        let host = FakeHost::new();
        host.add_tab(tab(1, "https://a.com", UNGROUPED));
        let t = info(tab(1, "https://a.com", UNGROUPED));

        block_on(focus_tab(&host, &t)).unwrap();
        block_on(mute_tab(&host, &t)).unwrap();

        let tabs = host.tabs.borrow();
        assert!(tabs[0].active);
        assert_eq!(tabs[0].muted_info.as_ref().map(|m| m.muted), Some(true));
    }

    #[test]
    fn test_change_tab_group_name_ignores_ungrouped() {
        let host = FakeHost::new();

        block_on(change_tab_group_name(&host, UNGROUPED, &GroupName::new("", "x"))).unwrap();

        assert_eq!(host.call_count("tabGroups.update"), 0);
    }

    #[test]
    fn test_add_tabs_to_group_joins_existing_group() {
        let host = FakeHost::new();
        host.add_tab_group(7, "📚 Reading");
        host.add_tab(tab(1, "https://a.com", UNGROUPED));

        let group = block_on(add_tabs_to_group(&host, "📚 Reading", &[info(tab(1, "https://a.com", UNGROUPED))]))
            .unwrap();

        assert_eq!(group, Some(7));
        assert_eq!(host.tabs.borrow()[0].group_id, 7);
        assert_eq!(host.tab_groups.borrow().len(), 1);
    }

    #[test]
    fn test_open_links_expands_collapsed_existing_group() {
        let host = FakeHost::new();
        host.add_tab_group(7, "Imported");
        assert!(host.tab_groups.borrow()[0].collapsed);

        let group = block_on(open_links_in_tab_group(&host, "Imported", &[link("https://a.com")])).unwrap();

        assert_eq!(group, Some(7));
        let groups = host.tab_groups.borrow();
        assert_eq!(groups.len(), 1);
        assert!(!groups[0].collapsed);
        assert_eq!(groups[0].title.as_deref(), Some("Imported"));
    }

    #[test]
    fn test_add_tabs_to_group_creates_named_group() {
        let host = FakeHost::new();
        host.add_tab(tab(1, "https://a.com", UNGROUPED));

        let group = block_on(add_tabs_to_group(&host, "Work", &[info(tab(1, "https://a.com", UNGROUPED))]))
            .unwrap()
            .unwrap();

        let groups = host.tab_groups.borrow();
        assert_eq!(groups[0].id, group);
        assert_eq!(groups[0].title.as_deref(), Some("Work"));
        assert!(!groups[0].collapsed);
    }

    #[test]
    fn test_current_tab_add_to_group() {
        let host = FakeHost::new();
        host.add_tab_group(7, "Work");
        host.add_tab(tab(1, "https://a.com", UNGROUPED));
        let mut active = tab(2, "https://b.com", UNGROUPED);
        active.active = true;
        host.add_tab(active);
        let work = host.tab_groups.borrow()[0].clone();

        assert_eq!(block_on(current_tab(&host)).unwrap().and_then(|t| t.id), Some(2));
        assert_eq!(block_on(add_current_tab_to_group(&host, &work)).unwrap(), Some(7));

        let tabs = host.tabs.borrow();
        assert_eq!(tabs[0].group_id, UNGROUPED);
        assert_eq!(tabs[1].group_id, 7);
        assert!(!host.tab_groups.borrow()[0].collapsed);
    }

    #[test]
    fn test_current_tab_to_new_named_group() {
        let host = FakeHost::new();
        let mut active = tab(1, "https://a.com", UNGROUPED);
        active.active = true;
        host.add_tab(active);

        let group = block_on(add_current_tab_to_named_group(&host, "Later")).unwrap().unwrap();

        assert_eq!(host.tabs.borrow()[0].group_id, group);
        assert_eq!(host.tab_groups.borrow()[0].title.as_deref(), Some("Later"));
    }

    #[test]
    fn test_no_current_tab_does_nothing() {
        let host = FakeHost::new();
        host.add_tab(tab(1, "https://a.com", UNGROUPED));

        assert_eq!(block_on(add_current_tab_to_named_group(&host, "Later")).unwrap(), None);
        assert_eq!(host.call_count("tabs.group"), 0);
    }

    #[test]
    fn test_mute_tabs() {
        let host = FakeHost::new();
        host.add_tab(tab(1, "https://a.com", UNGROUPED));
        host.add_tab(tab(2, "https://b.com", UNGROUPED));
        let tabs: Vec<TabInfo> = host.tabs.borrow().iter().cloned().map(info).collect();

        block_on(mute_tabs(&host, &tabs)).unwrap();

        assert!(host.tabs.borrow().iter().all(|t| t.muted_info.as_ref().is_some_and(|m| m.muted)));
    }

    #[test]
    fn test_add_no_tabs_does_nothing() {
        let host = FakeHost::new();

        assert_eq!(block_on(add_tabs_to_group(&host, "Work", &[])).unwrap(), None);
        assert_eq!(host.call_count("tabs.group"), 0);
    }

    #[test]
    fn test_open_links_in_tab_group_skips_failed_tabs() {
        let host = FakeHost::new();
        host.fail_on("https://bad.com");
        let links = vec![link("https://a.com"), link("https://bad.com"), link("https://b.com")];

        let group = block_on(open_links_in_tab_group(&host, "Imported", &links)).unwrap().unwrap();

        let tabs = host.tabs.borrow();
        assert_eq!(tabs.len(), 2);
        assert!(tabs.iter().all(|t| t.group_id == group && !t.active));
    }

    #[test]
    fn test_extension_folder_missing_is_not_found() {
        let host = FakeHost::with_tree(vec![folder("0", "", vec![])]);

        let err = block_on(extension_bookmark_folder(&host, HOME)).unwrap_err();

        assert_eq!(err, ActionError::NotFound("Other Bookmarks folder".to_string()));
    }

    #[test]
    fn test_save_links_to_folder_creates_folder_and_skips_existing() {
        let host = FakeHost::new();
        let links = vec![link("https://a.com"), link("https://b.com"), link("https://a.com")];

        let created = block_on(save_links_to_folder(&host, HOME, "Reading", &links)).unwrap();
        assert_eq!(created.len(), 2);

        let again = block_on(save_links_to_folder(&host, HOME, "Reading", &[link("https://b.com"), link("https://c.com")]))
            .unwrap();
        assert_eq!(again.len(), 1);

        let other = host.node("2").unwrap();
        assert_eq!(other.children().len(), 1);
        assert_eq!(other.children()[0].title, "Reading");
        assert_eq!(other.children()[0].children().len(), 3);
    }

    #[test]
    fn test_save_tabs_to_bookmark_folder_closes_tabs() {
        let host = FakeHost::new();
        host.add_tab(tab(1, "https://a.com", 4));
        let tabs = vec![info(tab(1, "https://a.com", 4))];

        let closed = block_on(save_tabs_to_bookmark_folder(&host, HOME, "Work", &tabs)).unwrap();

        assert_eq!(closed, vec![1]);
        assert!(host.tabs.borrow().is_empty());
    }

    #[test]
    fn test_move_bookmarks_to_folder() {
        let host = FakeHost::with_tree(vec![folder(
            "0",
            "",
            vec![
                folder("1", "Bookmarks Bar", vec![bookmark("10", "A", "https://a.com"), bookmark("11", "B", "https://b.com")]),
                folder("2", "Other Bookmarks", vec![]),
            ],
        )]);
        host.fail_on("11");
        let bookmarks = vec![host.node("10").unwrap(), host.node("11").unwrap()];

        let moved = block_on(move_bookmarks_to_folder(&host, HOME, "Later", &bookmarks)).unwrap();

        assert_eq!(moved, vec!["10".to_string()]);
        assert_eq!(host.child_ids("1"), vec!["11".to_string()]);
    }

    #[test]
    fn test_delete_bookmarks_tolerates_partial_failure() {
        let host = FakeHost::with_tree(vec![folder(
            "0",
            "",
            vec![folder("1", "Bar", vec![bookmark("10", "A", "https://a.com"), bookmark("11", "B", "https://b.com")])],
        )]);
        host.fail_on("10");
        let bookmarks = vec![host.node("10").unwrap(), host.node("11").unwrap()];

        assert_eq!(block_on(delete_bookmarks(&host, &bookmarks)), vec!["11".to_string()]);
        assert_eq!(host.child_ids("1"), vec!["10".to_string()]);
    }

    #[test]
    fn test_delete_duplicate_bookmarks() {
        let host = FakeHost::with_tree(vec![folder(
            "0",
            "",
            vec![folder(
                "1",
                "Bar",
                vec![
                    bookmark("10", "A", "https://a.com?x=1"),
                    bookmark("11", "a", "https://a.com?x=2"),
                    bookmark("12", "B", "https://b.com"),
                ],
            )],
        )]);
        let bookmarks = host.node("1").unwrap().children().to_vec();

        assert_eq!(block_on(delete_duplicate_bookmarks(&host, &bookmarks)), vec!["11".to_string()]);
    }

    #[test]
    fn test_delete_folder_if_empty() {
        let host = FakeHost::with_tree(vec![folder(
            "0",
            "",
            vec![folder("1", "Full", vec![bookmark("10", "A", "https://a.com")]), folder("2", "Empty", vec![])],
        )]);

        assert!(!block_on(delete_folder_if_empty(&host, "1")).unwrap());
        assert!(block_on(delete_folder_if_empty(&host, "2")).unwrap());
        assert_eq!(host.child_ids("0"), vec!["1".to_string()]);
    }

    #[test]
    fn test_change_bookmark_folder_name() {
        let host = FakeHost::new();
        let other = host.node("2").unwrap();

        block_on(change_bookmark_folder_name(&host, &other, &GroupName::new("📚", "Other Bookmarks"))).unwrap();
        assert_eq!(host.node("2").unwrap().title, "📚 Other Bookmarks");

        let renamed = host.node("2").unwrap();
        block_on(change_bookmark_folder_name(&host, &renamed, &GroupName::from_string("📚 Other Bookmarks"))).unwrap();
        assert_eq!(host.call_count("bookmarks.update"), 1);
    }

    #[test]
    fn test_sort_bookmarks_in_folder() {
        let host = FakeHost::with_tree(vec![folder(
            "0",
            "",
            vec![folder(
                "1",
                "Bar",
                vec![
                    bookmark("10", "C", "https://c.com"),
                    bookmark("11", "A", "https://a.com"),
                    bookmark("12", "B", "https://b.com"),
                ],
            )],
        )]);
        let bookmarks = host.node("1").unwrap().children().to_vec();

        block_on(sort_bookmarks_in_folder(&host, "1", &bookmarks)).unwrap();

        assert_eq!(host.child_ids("1"), vec!["11", "12", "10"]);
    }

    #[test]
    fn test_merge_bookmark_folders() {
        let host = FakeHost::with_tree(vec![folder(
            "0",
            "",
            vec![
                folder("1", "Reading", vec![bookmark("10", "A", "https://a.com")]),
                folder("2", "📚 Reading", vec![bookmark("20", "B", "https://b.com")]),
                folder("3", "Work", vec![bookmark("30", "C", "https://c.com")]),
            ],
        )]);
        let groups = walk_bookmark_tree(&host.tree.borrow());

        let moved = block_on(merge_bookmark_folders(&host, &groups));

        assert_eq!(moved, 1);
        assert_eq!(host.child_ids("2"), vec!["20", "10"]);
        assert_eq!(host.child_ids("0"), vec!["2", "3"]);
    }
}
