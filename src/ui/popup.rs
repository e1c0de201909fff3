//! Toolbar popup: put the current tab into a new or existing tab group
use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::actions::{add_current_tab_to_group, add_current_tab_to_named_group};
use crate::host::{ChromeHost, Host};
use crate::tab_data::{TabGroup, TabGroupColor};

/// CSS class carrying the group's host color
pub fn color_class(color: TabGroupColor) -> &'static str {
    match color {
        TabGroupColor::Grey => "group-grey",
        TabGroupColor::Blue => "group-blue",
        TabGroupColor::Red => "group-red",
        TabGroupColor::Yellow => "group-yellow",
        TabGroupColor::Green => "group-green",
        TabGroupColor::Pink => "group-pink",
        TabGroupColor::Purple => "group-purple",
        TabGroupColor::Cyan => "group-cyan",
        TabGroupColor::Orange => "group-orange",
    }
}

/// Groups whose title contains `search`, ignoring case; all groups for an empty search
pub fn matching_groups<'a>(groups: &'a [TabGroup], search: &str) -> Vec<&'a TabGroup> {
    let needle = search.trim().to_lowercase();
    groups
        .iter()
        .filter(|group| {
            needle.is_empty()
                || group
                    .title
                    .as_deref()
                    .is_some_and(|title| title.to_lowercase().contains(&needle))
        })
        .collect()
}

#[function_component(Popup)]
pub fn popup() -> Html {
    let search = use_state(String::new);
    let tab_groups = use_state(Vec::<TabGroup>::new);
    let is_busy = use_state(|| false);

    // Load tab groups on mount
    {
        let tab_groups = tab_groups.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match ChromeHost.query_tab_groups().await {
                    Ok(groups) => tab_groups.set(groups),
                    Err(e) => log::error!("Failed to load tab groups: {}", e),
                }
            });
            || ()
        });
    }

    let on_search = {
        let search = search.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                search.set(input.value());
            }
        })
    };

    let on_new_group = {
        let search = search.clone();
        let is_busy = is_busy.clone();
        Callback::from(move |_| {
            let name = search.trim().to_string();
            let is_busy = is_busy.clone();
            is_busy.set(true);
            spawn_local(async move {
                match add_current_tab_to_named_group(&ChromeHost, &name).await {
                    Ok(Some(group_id)) => log::info!("Current tab grouped into {} ({})", name, group_id),
                    Ok(None) => log::warn!("No active tab to group"),
                    Err(e) => log::error!("Grouping current tab failed: {}", e),
                }
                is_busy.set(false);
            });
        })
    };

    let group_button = |group: &TabGroup| {
        let onclick = {
            let group = group.clone();
            let is_busy = is_busy.clone();
            Callback::from(move |_| {
                let group = group.clone();
                let is_busy = is_busy.clone();
                is_busy.set(true);
                spawn_local(async move {
                    if let Err(e) = add_current_tab_to_group(&ChromeHost, &group).await {
                        log::error!("Adding current tab to group {} failed: {}", group.id, e);
                    }
                    is_busy.set(false);
                });
            })
        };
        html! {
            <div key={group.id} class={classes!("popup-group", color_class(group.color))}>
                <Button {onclick} disabled={*is_busy} variant={ButtonVariant::Secondary} block={true}>
                    {group.title.clone().unwrap_or_default()}
                </Button>
            </div>
        }
    };

    let name_is_empty = search.trim().is_empty();

    html! {
        <div class="popup-container">
            <input
                class="popup-search"
                type="text"
                placeholder="Group name"
                value={(*search).clone()}
                oninput={on_search}
            />
            <Button
                onclick={on_new_group}
                disabled={*is_busy || name_is_empty}
                variant={ButtonVariant::Secondary}
                block={true}
            >
                {"Add Tab to New Group"}
            </Button>
            <div class="popup-groups">
                {for matching_groups(&tab_groups, &search).into_iter().map(group_button)}
            </div>
        </div>
    }
}
