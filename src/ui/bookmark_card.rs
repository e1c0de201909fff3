//! One card per bookmark folder that holds links
use std::collections::HashSet;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::actions;
use crate::bookmark_tree::BookmarkGroup;
use crate::config::Settings;
use crate::group_name::GroupName;
use crate::host::{ChromeHost, Host};
use crate::links::get_hostname;
use crate::relative_time::relative_time_from_epoch;
use crate::tab_data::BookmarkNode;
use crate::ui::components::{ActionButton, GroupNameEditor, GroupTargetInput, RowCheckbox};
use crate::ui::{first_n, toggled};

#[derive(Properties)]
pub struct BookmarkCardProps {
    pub group: Rc<BookmarkGroup>,
    pub group_names: Rc<Vec<GroupName>>,
    pub settings: Rc<Settings>,
    pub refresh: Callback<()>,
}

impl PartialEq for BookmarkCardProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.group, &other.group)
            && self.group_names == other.group_names
            && self.settings == other.settings
            && self.refresh == other.refresh
    }
}

fn selected_bookmarks(bookmarks: &[BookmarkNode], selected: &HashSet<String>) -> Vec<BookmarkNode> {
    bookmarks
        .iter()
        .filter(|bookmark| selected.contains(&bookmark.id))
        .cloned()
        .collect()
}

#[function_component(BookmarkCard)]
pub fn bookmark_card(props: &BookmarkCardProps) -> Html {
    let selected = use_state(HashSet::<String>::new);
    let target = use_state(String::new);

    let on_rename = {
        let folder = props.group.parent.clone();
        Callback::from(move |name: GroupName| {
            let folder = folder.clone();
            spawn_local(async move {
                if let Err(e) = actions::change_bookmark_folder_name(&ChromeHost, &folder, &name).await {
                    log::error!("Renaming folder {} failed: {}", folder.id, e);
                }
            });
        })
    };

    let on_select_first = {
        let selected = selected.clone();
        let ids: Vec<String> = props.group.bookmarks.iter().map(|b| b.id.clone()).collect();
        let count = props.settings.select_batch_size;
        Callback::from(move |_| selected.set(first_n(ids.iter().cloned(), count)))
    };

    let on_sort = {
        let group = Rc::clone(&props.group);
        let refresh = props.refresh.clone();
        Callback::from(move |_| {
            let group = Rc::clone(&group);
            let refresh = refresh.clone();
            spawn_local(async move {
                if let Err(e) = actions::sort_bookmarks_in_folder(&ChromeHost, &group.id, &group.bookmarks).await {
                    log::error!("Sorting folder {} failed: {}", group.id, e);
                }
                refresh.emit(());
            });
        })
    };

    let on_uniq = {
        let group = Rc::clone(&props.group);
        let refresh = props.refresh.clone();
        Callback::from(move |_| {
            let group = Rc::clone(&group);
            let refresh = refresh.clone();
            spawn_local(async move {
                let deleted = actions::delete_duplicate_bookmarks(&ChromeHost, &group.bookmarks).await;
                log::info!("Deleted {} duplicate bookmark(s) from {}", deleted.len(), group.title);
                refresh.emit(());
            });
        })
    };

    let on_delete_selected = {
        let selected = selected.clone();
        let group = Rc::clone(&props.group);
        let refresh = props.refresh.clone();
        Callback::from(move |_| {
            let chosen = selected_bookmarks(&group.bookmarks, &selected);
            selected.set(HashSet::new());
            let folder_id = group.id.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                actions::delete_bookmarks(&ChromeHost, &chosen).await;
                if let Err(e) = actions::delete_folder_if_empty(&ChromeHost, &folder_id).await {
                    log::error!("Cleaning up folder {} failed: {}", folder_id, e);
                }
                refresh.emit(());
            });
        })
    };

    let on_target_input = {
        let target = target.clone();
        Callback::from(move |value: String| target.set(value))
    };

    let on_move_to_folder = {
        let selected = selected.clone();
        let target = target.clone();
        let group = Rc::clone(&props.group);
        let settings = Rc::clone(&props.settings);
        let refresh = props.refresh.clone();
        Callback::from(move |_| {
            let chosen = selected_bookmarks(&group.bookmarks, &selected);
            let name = GroupName::from_string(target.trim()).to_string();
            if name.is_empty() || chosen.is_empty() {
                return;
            }
            selected.set(HashSet::new());
            let folder_id = group.id.clone();
            let settings = Rc::clone(&settings);
            let refresh = refresh.clone();
            spawn_local(async move {
                let home = settings.extension_folder_path();
                if let Err(e) = actions::move_bookmarks_to_folder(&ChromeHost, &home, &name, &chosen).await {
                    log::error!("Moving bookmarks to {:?} failed: {}", name, e);
                }
                if let Err(e) = actions::delete_folder_if_empty(&ChromeHost, &folder_id).await {
                    log::error!("Cleaning up folder {} failed: {}", folder_id, e);
                }
                refresh.emit(());
            });
        })
    };

    let on_open_in_group = {
        let selected = selected.clone();
        let target = target.clone();
        let group = Rc::clone(&props.group);
        let refresh = props.refresh.clone();
        Callback::from(move |_| {
            let chosen = selected_bookmarks(&group.bookmarks, &selected);
            if chosen.is_empty() {
                return;
            }
            let typed = GroupName::from_string(target.trim()).to_string();
            let name = if typed.is_empty() { group.title.clone() } else { typed };
            selected.set(HashSet::new());
            let refresh = refresh.clone();
            spawn_local(async move {
                if let Err(e) = actions::open_links_in_tab_group(&ChromeHost, &name, &chosen).await {
                    log::error!("Opening bookmarks in group {:?} failed: {}", name, e);
                }
                refresh.emit(());
            });
        })
    };

    let list_id = format!("folder-targets-{}", props.group.id);

    html! {
        <div class="group-card">
            <div class="group-card-header">
                <GroupNameEditor
                    name={props.group.name()}
                    placeholder={props.group.path.join(" / ")}
                    delay_ms={props.settings.rename_debounce_ms}
                    on_change={on_rename}
                />
                <span class="group-count">{format!("{} bookmarks", props.group.bookmarks.len())}</span>
                <ActionButton onclick={on_select_first} label={format!("Select first {}", props.settings.select_batch_size)} />
                <ActionButton onclick={on_sort} label="Sort" />
                <ActionButton onclick={on_uniq} label="Uniq" />
                <ActionButton onclick={on_delete_selected} label="Delete" disabled={selected.is_empty()} />
                <GroupTargetInput list_id={list_id} group_names={Rc::clone(&props.group_names)} on_input={on_target_input}>
                    <ActionButton onclick={on_open_in_group} label="Open" disabled={selected.is_empty()} />
                    <ActionButton onclick={on_move_to_folder} label="To folder" disabled={selected.is_empty()} />
                </GroupTargetInput>
            </div>
            <table class="group-table">
                <tbody>
                    {for props.group.bookmarks.iter().map(|bookmark| html! {
                        <BookmarkRow
                            key={bookmark.id.clone()}
                            bookmark={bookmark.clone()}
                            checked={selected.contains(&bookmark.id)}
                            on_toggle={
                                let selected = selected.clone();
                                let id = bookmark.id.clone();
                                Callback::from(move |_| selected.set(toggled(&selected, id.clone())))
                            }
                            refresh={props.refresh.clone()}
                        />
                    })}
                </tbody>
            </table>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct BookmarkRowProps {
    bookmark: BookmarkNode,
    checked: bool,
    on_toggle: Callback<()>,
    refresh: Callback<()>,
}

#[function_component(BookmarkRow)]
fn bookmark_row(props: &BookmarkRowProps) -> Html {
    let bookmark = &props.bookmark;

    let on_delete = {
        let bookmark = bookmark.clone();
        let refresh = props.refresh.clone();
        Callback::from(move |_| {
            let bookmark = bookmark.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                if let Err(e) = ChromeHost.remove_bookmark(&bookmark.id).await {
                    log::error!("Deleting bookmark {} failed: {}", bookmark.id, e);
                }
                refresh.emit(());
            });
        })
    };

    let url = bookmark.url.clone().unwrap_or_default();
    let hostname = get_hostname(&url).unwrap_or_else(|| url.clone());
    let title = if bookmark.title.is_empty() { url.clone() } else { bookmark.title.clone() };
    let added = bookmark.date_added.map(relative_time_from_epoch).unwrap_or_default();

    html! {
        <tr class="group-row">
            <td><RowCheckbox checked={props.checked} on_toggle={props.on_toggle.clone()} /></td>
            <td class="row-title">
                <a href={url} target="_blank" rel="noreferrer">{title}</a>
            </td>
            <td class="row-hostname">{hostname}</td>
            <td class="row-time">{added}</td>
            <td class="row-close"><button onclick={on_delete}>{"✕"}</button></td>
        </tr>
    }
}
