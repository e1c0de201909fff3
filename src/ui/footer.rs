//! Link import and folder maintenance
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

use crate::actions;
use crate::bookmark_tree::BookmarkGroup;
use crate::config::Settings;
use crate::group_name::GroupName;
use crate::host::ChromeHost;
use crate::links::links_from_text;
use crate::reconcile::GroupMap;
use crate::tab_data::Link;
use crate::ui::components::{ActionButton, GroupTargetInput};

#[derive(Properties, PartialEq)]
pub struct FooterProps {
    pub group_names: Rc<Vec<GroupName>>,
    pub bookmark_groups: GroupMap<String, Rc<BookmarkGroup>>,
    pub settings: Rc<Settings>,
    pub refresh: Callback<()>,
}

/// Target name typed by the user, or the default import group
fn import_target(typed: &str, settings: &Settings) -> String {
    let name = GroupName::from_string(typed.trim()).to_string();
    if name.is_empty() {
        settings.default_import_group.clone()
    } else {
        name
    }
}

fn pasted_links(textarea: &NodeRef) -> Vec<Link> {
    textarea
        .cast::<HtmlTextAreaElement>()
        .map(|textarea| links_from_text(&textarea.value()))
        .unwrap_or_default()
}

#[function_component(Footer)]
pub fn footer(props: &FooterProps) -> Html {
    let textarea = use_node_ref();
    let target = use_state(String::new);

    let on_target_input = {
        let target = target.clone();
        Callback::from(move |value: String| target.set(value))
    };

    let on_open_in_group = {
        let textarea = textarea.clone();
        let target = target.clone();
        let settings = Rc::clone(&props.settings);
        let refresh = props.refresh.clone();
        Callback::from(move |_| {
            let links = pasted_links(&textarea);
            let name = import_target(&target, &settings);
            let refresh = refresh.clone();
            spawn_local(async move {
                if let Err(e) = actions::open_links_in_tab_group(&ChromeHost, &name, &links).await {
                    log::error!("Opening links in group {:?} failed: {}", name, e);
                }
                refresh.emit(());
            });
        })
    };

    let on_save_to_folder = {
        let textarea = textarea.clone();
        let target = target.clone();
        let settings = Rc::clone(&props.settings);
        let refresh = props.refresh.clone();
        Callback::from(move |_| {
            let links = pasted_links(&textarea);
            let name = import_target(&target, &settings);
            let settings = Rc::clone(&settings);
            let refresh = refresh.clone();
            spawn_local(async move {
                let home = settings.extension_folder_path();
                if let Err(e) = actions::save_links_to_folder(&ChromeHost, &home, &name, &links).await {
                    log::error!("Saving links to folder {:?} failed: {}", name, e);
                }
                refresh.emit(());
            });
        })
    };

    let on_merge = {
        let groups = props.bookmark_groups.clone();
        let refresh = props.refresh.clone();
        Callback::from(move |_| {
            let groups = groups.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                let moved = actions::merge_bookmark_folders(&ChromeHost, &groups).await;
                log::info!("Merged folders, moved {} bookmark(s)", moved);
                refresh.emit(());
            });
        })
    };

    html! {
        <div class="group-card footer">
            <div class="group-card-header">
                <ActionButton onclick={on_merge} label="Merge Folders" />
                <GroupTargetInput list_id="import-targets" group_names={Rc::clone(&props.group_names)} on_input={on_target_input}>
                    <ActionButton onclick={on_open_in_group} label="To group" />
                    <ActionButton onclick={on_save_to_folder} label="To folder" />
                </GroupTargetInput>
            </div>
            <textarea ref={textarea} class="import-links" rows="4" placeholder="One link per line" />
        </div>
    }
}
