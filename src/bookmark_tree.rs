//! Turning the bookmark tree into one group per folder that holds links
use std::collections::HashMap;
use std::rc::Rc;

use crate::group_name::GroupName;
use crate::reconcile::GroupMap;
use crate::tab_data::BookmarkNode;

/// A bookmark folder together with the links it directly contains
#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkGroup {
    pub id: String,
    /// The folder node itself
    pub parent: BookmarkNode,
    /// Direct link children only; subfolders get their own group
    pub bookmarks: Vec<BookmarkNode>,
    pub title: String,
    /// Folder titles from the root down to this folder
    pub path: Vec<String>,
}

impl BookmarkGroup {
    pub fn name(&self) -> GroupName {
        GroupName::from_string(&self.title)
    }
}

/// Walk the tree depth first and collect one group per folder with at least
/// one direct link, in pre-order.
pub fn walk_bookmark_tree(roots: &[BookmarkNode]) -> GroupMap<String, Rc<BookmarkGroup>> {
    let mut groups = GroupMap::new();
    for root in roots {
        walk_folder(&mut groups, &[], root);
    }
    groups
}

fn walk_folder(groups: &mut GroupMap<String, Rc<BookmarkGroup>>, parent_path: &[String], node: &BookmarkNode) {
    let mut path = parent_path.to_vec();
    path.push(node.title.clone());

    let mut group = BookmarkGroup {
        id: node.id.clone(),
        parent: node.clone(),
        bookmarks: Vec::new(),
        title: node.title.clone(),
        path,
    };
    // reserve the slot so the folder precedes its subfolders
    groups.insert(node.id.clone(), Rc::new(group.clone()));

    for child in node.children() {
        if child.url.is_some() {
            group.bookmarks.push(child.clone());
        } else {
            walk_folder(groups, &group.path, child);
        }
    }

    if group.bookmarks.is_empty() {
        groups.remove(&node.id);
    } else {
        groups.insert(node.id.clone(), Rc::new(group));
    }
}

/// Resolve a folder by its title path, starting below the first root
/// (e.g. `["Other Bookmarks"]`).
pub fn find_folder<'a>(roots: &'a [BookmarkNode], path: &[&str]) -> Option<&'a BookmarkNode> {
    let mut node = roots.first()?;
    for title in path {
        node = find_child_folder(node, title)?;
    }
    Some(node)
}

/// Direct child of `folder` titled `name`
pub fn find_child_folder<'a>(folder: &'a BookmarkNode, name: &str) -> Option<&'a BookmarkNode> {
    folder.children().iter().find(|child| child.title == name)
}

/// Folders sharing one name text, to be folded into `target`
#[derive(Debug, Clone, PartialEq)]
pub struct FolderMerge {
    pub target: Rc<BookmarkGroup>,
    pub sources: Vec<Rc<BookmarkGroup>>,
}

impl FolderMerge {
    /// Links that have to move into the target folder
    pub fn bookmarks_to_move(&self) -> Vec<BookmarkNode> {
        self.sources
            .iter()
            .flat_map(|group| group.bookmarks.iter().cloned())
            .collect()
    }
}

/// Find groups whose names differ only by emoji (or are identical). The
/// folder with the longest title wins, so an emoji-decorated name is kept.
pub fn plan_folder_merges<'a, I>(groups: I) -> Vec<FolderMerge>
where
    I: IntoIterator<Item = &'a Rc<BookmarkGroup>>,
{
    let mut order: Vec<String> = Vec::new();
    let mut by_text: HashMap<String, Vec<Rc<BookmarkGroup>>> = HashMap::new();

    for group in groups {
        let text = group.name().text;
        if text.is_empty() {
            continue;
        }
        let same = by_text.entry(text.clone()).or_insert_with(|| {
            order.push(text);
            Vec::new()
        });
        same.push(Rc::clone(group));
    }

    order
        .into_iter()
        .filter_map(|text| {
            let mut same = by_text.remove(&text)?;
            if same.len() < 2 {
                return None;
            }
            let mut best = 0;
            for (i, group) in same.iter().enumerate() {
                if group.title.chars().count() > same[best].title.chars().count() {
                    best = i;
                }
            }
            let target = same.remove(best);
            Some(FolderMerge { target, sources: same })
        })
        .collect()
}
