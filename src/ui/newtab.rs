//! The new-tab page: tab groups, link import, bookmark folders
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::platform::time::sleep;
use yew::prelude::*;

use crate::config::Settings;
use crate::events::{ChromeEvents, BOOKMARK_EVENTS, TAB_EVENTS, TAB_GROUP_EVENTS};
use crate::host::ChromeHost;
use crate::relative_time::now_ms;
use crate::state::{fetch_bookmark_tree, fetch_tab_groups, fetch_tabs, ActiveTabTracker, NewTabState};
use crate::storage::ChromeStorage;
use crate::tab_data::{BookmarkNode, TabGroup, TabInfo};
use crate::ui::bookmark_card::BookmarkCard;
use crate::ui::footer::Footer;
use crate::ui::tab_card::TabCard;

pub enum NewTabAction {
    Tabs(Vec<TabInfo>),
    TabGroups(Vec<TabGroup>),
    BookmarkTree(Vec<BookmarkNode>),
}

impl Reducible for NewTabState {
    type Action = NewTabAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            NewTabAction::Tabs(tabs) => self.apply_tabs(tabs),
            NewTabAction::TabGroups(groups) => self.apply_tab_groups(groups),
            NewTabAction::BookmarkTree(tree) => self.apply_bookmark_tree(tree),
        };
        Rc::new(next)
    }
}

type Dispatcher = UseReducerDispatcher<NewTabState>;

async fn refresh_tabs(dispatch: Dispatcher, tracker: Rc<RefCell<ActiveTabTracker>>) {
    match fetch_tabs(&ChromeHost, &ChromeStorage::session(), &tracker, now_ms()).await {
        Ok(tabs) => {
            log::debug!("Refreshed {} tabs", tabs.len());
            dispatch.dispatch(NewTabAction::Tabs(tabs));
        }
        Err(e) => log::error!("Refreshing tabs failed: {}", e),
    }
}

async fn refresh_tab_groups(dispatch: Dispatcher) {
    match fetch_tab_groups(&ChromeHost).await {
        Ok(groups) => dispatch.dispatch(NewTabAction::TabGroups(groups)),
        Err(e) => log::error!("Refreshing tab groups failed: {}", e),
    }
}

async fn refresh_bookmarks(dispatch: Dispatcher) {
    match fetch_bookmark_tree(&ChromeHost).await {
        Ok(tree) => dispatch.dispatch(NewTabAction::BookmarkTree(tree)),
        Err(e) => log::error!("Refreshing bookmarks failed: {}", e),
    }
}

#[function_component(NewTab)]
pub fn new_tab() -> Html {
    let state = use_reducer(NewTabState::new);
    let settings = use_state(|| Rc::new(Settings::default()));
    let tracker = use_mut_ref(ActiveTabTracker::default);

    // Load settings on mount
    {
        let settings = settings.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match Settings::load(&ChromeStorage::local()).await {
                    Ok(loaded) => settings.set(Rc::new(loaded)),
                    Err(e) => log::warn!("Using default settings: {}", e),
                }
            });
            || ()
        });
    }

    {
        let dispatch = state.dispatcher();
        let tracker = tracker.clone();
        use_effect_with((), move |_| {
            let handler = move || spawn_local(refresh_tabs(dispatch.clone(), tracker.clone()));
            handler();
            let subscriptions = ChromeEvents::listen(TAB_EVENTS, handler);
            move || drop(subscriptions)
        });
    }

    {
        let dispatch = state.dispatcher();
        use_effect_with((), move |_| {
            let handler = move || spawn_local(refresh_tab_groups(dispatch.clone()));
            handler();
            let subscriptions = ChromeEvents::listen(TAB_GROUP_EVENTS, handler);
            move || drop(subscriptions)
        });
    }

    {
        let dispatch = state.dispatcher();
        use_effect_with((), move |_| {
            let handler = move || spawn_local(refresh_bookmarks(dispatch.clone()));
            handler();
            let subscriptions = ChromeEvents::listen(BOOKMARK_EVENTS, handler);
            move || drop(subscriptions)
        });
    }

    // Re-read everything once the host has settled after an action
    let refresh = {
        let dispatch = state.dispatcher();
        let tracker = tracker.clone();
        use_callback(settings.refresh_delay_ms, move |_: (), delay_ms| {
            let dispatch = dispatch.clone();
            let tracker = tracker.clone();
            let delay = Duration::from_millis(u64::from(*delay_ms));
            spawn_local(async move {
                sleep(delay).await;
                refresh_tabs(dispatch.clone(), tracker).await;
                refresh_tab_groups(dispatch.clone()).await;
                refresh_bookmarks(dispatch).await;
            });
        })
    };

    let settings = (*settings).clone();
    let is_loading = state.tabs.is_empty() && state.bookmark_tree.is_empty();

    html! {
        <div class="newtab-page">
            if is_loading {
                <Spinner />
            }
            {for state.tab_groups.iter().map(|(group_id, group)| html! {
                <TabCard
                    key={*group_id}
                    group={Rc::clone(group)}
                    group_names={Rc::clone(&state.group_names)}
                    settings={Rc::clone(&settings)}
                    refresh={refresh.clone()}
                />
            })}
            <Footer
                group_names={Rc::clone(&state.group_names)}
                bookmark_groups={state.bookmark_groups.clone()}
                settings={Rc::clone(&settings)}
                refresh={refresh.clone()}
            />
            {for state.bookmark_groups.values().map(|group| html! {
                <BookmarkCard
                    key={group.id.clone()}
                    group={Rc::clone(group)}
                    group_names={Rc::clone(&state.group_names)}
                    settings={Rc::clone(&settings)}
                    refresh={refresh.clone()}
                />
            })}
        </div>
    }
}
