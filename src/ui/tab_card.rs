//! One card per tab group
use std::collections::HashSet;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::actions;
use crate::config::Settings;
use crate::group_name::GroupName;
use crate::grouping::GroupedTabs;
use crate::host::ChromeHost;
use crate::links::{get_hostname, sort_by_url_and_title};
use crate::relative_time::relative_time_from_epoch;
use crate::tab_data::TabInfo;
use crate::ui::components::{ActionButton, GroupNameEditor, GroupTargetInput, RowCheckbox};
use crate::ui::{first_n, toggled};

#[derive(Properties)]
pub struct TabCardProps {
    pub group: Rc<GroupedTabs>,
    pub group_names: Rc<Vec<GroupName>>,
    pub settings: Rc<Settings>,
    pub refresh: Callback<()>,
}

// reconciliation keeps an unchanged group in the same Rc
impl PartialEq for TabCardProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.group, &other.group)
            && self.group_names == other.group_names
            && self.settings == other.settings
            && self.refresh == other.refresh
    }
}

/// Row key: the tab id, or the row position for tabs the host gave no id
fn row_key(tab: &TabInfo, index: usize) -> String {
    match tab.id {
        Some(id) => id.to_string(),
        None => format!("row-{}", index),
    }
}

fn selected_tabs(tabs: &[TabInfo], selected: &HashSet<i32>) -> Vec<TabInfo> {
    tabs.iter()
        .filter(|tab| tab.id.is_some_and(|id| selected.contains(&id)))
        .cloned()
        .collect()
}

#[function_component(TabCard)]
pub fn tab_card(props: &TabCardProps) -> Html {
    let selected = use_state(HashSet::<i32>::new);
    let target = use_state(String::new);
    let sorted = use_state(|| false);

    let tabs: Vec<TabInfo> = {
        let mut tabs = props.group.tabs.clone();
        if *sorted {
            sort_by_url_and_title(&mut tabs);
        }
        tabs
    };

    let on_rename = {
        let group_id = props.group.group_id;
        Callback::from(move |name: GroupName| {
            spawn_local(async move {
                if let Err(e) = actions::change_tab_group_name(&ChromeHost, group_id, &name).await {
                    log::error!("Renaming tab group {} failed: {}", group_id, e);
                }
            });
        })
    };

    let on_close_selected = {
        let selected = selected.clone();
        let tabs = props.group.tabs.clone();
        let refresh = props.refresh.clone();
        Callback::from(move |_| {
            let chosen = selected_tabs(&tabs, &selected);
            selected.set(HashSet::new());
            let refresh = refresh.clone();
            spawn_local(async move {
                actions::close_tabs(&ChromeHost, &chosen).await;
                refresh.emit(());
            });
        })
    };

    let on_uniq = {
        let tabs = props.group.tabs.clone();
        let refresh = props.refresh.clone();
        Callback::from(move |_| {
            let tabs = tabs.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                let closed = actions::close_duplicate_tabs(&ChromeHost, &tabs).await;
                log::info!("Closed {} duplicate tab(s)", closed.len());
                refresh.emit(());
            });
        })
    };

    let on_mute_all = {
        let tabs = props.group.tabs.clone();
        let refresh = props.refresh.clone();
        Callback::from(move |_| {
            let tabs = tabs.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                if let Err(e) = actions::mute_tabs(&ChromeHost, &tabs).await {
                    log::error!("Muting tabs failed: {}", e);
                }
                refresh.emit(());
            });
        })
    };

    let on_sort = {
        let sorted = sorted.clone();
        Callback::from(move |_| sorted.set(!*sorted))
    };

    let on_select_first = {
        let selected = selected.clone();
        let ids: Vec<i32> = tabs.iter().filter_map(|tab| tab.id).collect();
        let count = props.settings.select_batch_size;
        Callback::from(move |_| selected.set(first_n(ids.iter().copied(), count)))
    };

    let on_target_input = {
        let target = target.clone();
        Callback::from(move |value: String| target.set(value))
    };

    let on_move_to_group = {
        let selected = selected.clone();
        let target = target.clone();
        let tabs = props.group.tabs.clone();
        let refresh = props.refresh.clone();
        Callback::from(move |_| {
            let chosen = selected_tabs(&tabs, &selected);
            let name = GroupName::from_string(target.trim()).to_string();
            if name.is_empty() || chosen.is_empty() {
                return;
            }
            selected.set(HashSet::new());
            let refresh = refresh.clone();
            spawn_local(async move {
                if let Err(e) = actions::add_tabs_to_group(&ChromeHost, &name, &chosen).await {
                    log::error!("Moving tabs to group {:?} failed: {}", name, e);
                }
                refresh.emit(());
            });
        })
    };

    let on_save_to_folder = {
        let selected = selected.clone();
        let target = target.clone();
        let tabs = props.group.tabs.clone();
        let settings = Rc::clone(&props.settings);
        let refresh = props.refresh.clone();
        Callback::from(move |_| {
            let chosen = selected_tabs(&tabs, &selected);
            let name = GroupName::from_string(target.trim()).to_string();
            if name.is_empty() || chosen.is_empty() {
                return;
            }
            selected.set(HashSet::new());
            let settings = Rc::clone(&settings);
            let refresh = refresh.clone();
            spawn_local(async move {
                let home = settings.extension_folder_path();
                if let Err(e) = actions::save_tabs_to_bookmark_folder(&ChromeHost, &home, &name, &chosen).await {
                    log::error!("Saving tabs to folder {:?} failed: {}", name, e);
                }
                refresh.emit(());
            });
        })
    };

    let is_ungrouped = props.group.tab_group.is_none();
    let list_id = format!("tab-targets-{}", props.group.group_id);

    html! {
        <div class="group-card">
            <div class="group-card-header">
                <GroupNameEditor
                    name={props.group.name()}
                    placeholder={props.settings.ungrouped_label.clone()}
                    delay_ms={props.settings.rename_debounce_ms}
                    disabled={is_ungrouped}
                    on_change={on_rename}
                />
                <span class="group-count">{format!("{} tabs", props.group.tabs.len())}</span>
                <ActionButton onclick={on_select_first} label={format!("Select first {}", props.settings.select_batch_size)} />
                <ActionButton onclick={on_sort} label={if *sorted { "Unsort" } else { "Sort" }} />
                <ActionButton onclick={on_uniq} label="Uniq" />
                <ActionButton onclick={on_mute_all} label="Mute all" />
                <ActionButton onclick={on_close_selected} label="Close Tabs" disabled={selected.is_empty()} />
                <GroupTargetInput list_id={list_id} group_names={Rc::clone(&props.group_names)} on_input={on_target_input}>
                    <ActionButton onclick={on_move_to_group} label="To group" disabled={selected.is_empty()} />
                    <ActionButton onclick={on_save_to_folder} label="To folder" disabled={selected.is_empty()} />
                </GroupTargetInput>
            </div>
            <table class="group-table">
                <tbody>
                    {for tabs.iter().enumerate().map(|(index, tab)| html! {
                        <TabRow
                            key={row_key(tab, index)}
                            tab={tab.clone()}
                            checked={tab.id.is_some_and(|id| selected.contains(&id))}
                            on_toggle={
                                let selected = selected.clone();
                                let id = tab.id;
                                Callback::from(move |_| {
                                    if let Some(id) = id {
                                        selected.set(toggled(&selected, id));
                                    }
                                })
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
struct TabRowProps {
    tab: TabInfo,
    checked: bool,
    on_toggle: Callback<()>,
    refresh: Callback<()>,
}

#[function_component(TabRow)]
fn tab_row(props: &TabRowProps) -> Html {
    let tab = &props.tab;

    let on_focus = {
        let tab = tab.clone();
        Callback::from(move |_| {
            let tab = tab.clone();
            spawn_local(async move {
                if let Err(e) = actions::focus_tab(&ChromeHost, &tab).await {
                    log::error!("Focusing tab {:?} failed: {}", tab.id, e);
                }
            });
        })
    };

    let on_mute = {
        let tab = tab.clone();
        let refresh = props.refresh.clone();
        Callback::from(move |_| {
            let tab = tab.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                let result = if tab.is_muted() {
                    actions::unmute_tab(&ChromeHost, &tab).await
                } else {
                    actions::mute_tab(&ChromeHost, &tab).await
                };
                if let Err(e) = result {
                    log::error!("Muting tab {:?} failed: {}", tab.id, e);
                }
                refresh.emit(());
            });
        })
    };

    let on_close = {
        let tab = tab.clone();
        let refresh = props.refresh.clone();
        Callback::from(move |_| {
            let tab = tab.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                if let Err(e) = actions::close_tab(&ChromeHost, &tab).await {
                    log::error!("Closing tab {:?} failed: {}", tab.id, e);
                }
                refresh.emit(());
            });
        })
    };

    let url = tab.url.clone().unwrap_or_default();
    let hostname = get_hostname(&url).unwrap_or_else(|| url.clone());
    let title = tab.title.clone().unwrap_or_else(|| url.clone());
    let last_active = tab.last_active.map(relative_time_from_epoch).unwrap_or_default();

    html! {
        <tr class="group-row">
            <td><RowCheckbox checked={props.checked} on_toggle={props.on_toggle.clone()} /></td>
            <td class="row-title" onclick={on_focus}>
                if let Some(icon) = &tab.fav_icon_url {
                    <img class="favicon" src={icon.clone()} />
                }
                <span title={url}>{title}</span>
            </td>
            <td class="row-hostname">{hostname}</td>
            <td class="row-mute">
                if tab.is_muted() {
                    <button onclick={on_mute}>{"🔇"}</button>
                } else if tab.audible.unwrap_or(false) {
                    <button onclick={on_mute}>{"🔊"}</button>
                }
            </td>
            <td class="row-time">{last_active}</td>
            <td class="row-close"><button onclick={on_close}>{"✕"}</button></td>
        </tr>
    }
}
