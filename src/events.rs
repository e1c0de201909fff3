//! Host change notifications and scoped listener registration
use std::rc::Rc;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/newtab.js")]
extern "C" {
    fn addHostListener(event: &str, listener: &js_sys::Function);
    fn removeHostListener(event: &str, listener: &js_sys::Function);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEvent {
    TabCreated,
    TabUpdated,
    TabRemoved,
    TabReplaced,
    TabActivated,
    TabHighlighted,
    TabMoved,
    TabAttached,
    TabDetached,
    TabGroupCreated,
    TabGroupUpdated,
    TabGroupRemoved,
    TabGroupMoved,
    BookmarkCreated,
    BookmarkRemoved,
    BookmarkChanged,
    BookmarkMoved,
    BookmarkChildrenReordered,
    BookmarkImportBegan,
    BookmarkImportEnded,
}

pub const TAB_EVENTS: &[HostEvent] = &[
    HostEvent::TabCreated,
    HostEvent::TabUpdated,
    HostEvent::TabRemoved,
    HostEvent::TabReplaced,
    HostEvent::TabActivated,
    HostEvent::TabHighlighted,
    HostEvent::TabMoved,
    HostEvent::TabAttached,
    HostEvent::TabDetached,
];

pub const TAB_GROUP_EVENTS: &[HostEvent] = &[
    HostEvent::TabGroupCreated,
    HostEvent::TabGroupUpdated,
    HostEvent::TabGroupRemoved,
    HostEvent::TabGroupMoved,
];

pub const BOOKMARK_EVENTS: &[HostEvent] = &[
    HostEvent::BookmarkCreated,
    HostEvent::BookmarkRemoved,
    HostEvent::BookmarkChanged,
    HostEvent::BookmarkMoved,
    HostEvent::BookmarkChildrenReordered,
    HostEvent::BookmarkImportBegan,
    HostEvent::BookmarkImportEnded,
];

impl HostEvent {
    /// The `chrome.*` event this variant stands for
    pub fn as_str(&self) -> &'static str {
        match self {
            HostEvent::TabCreated => "tabs.onCreated",
            HostEvent::TabUpdated => "tabs.onUpdated",
            HostEvent::TabRemoved => "tabs.onRemoved",
            HostEvent::TabReplaced => "tabs.onReplaced",
            HostEvent::TabActivated => "tabs.onActivated",
            HostEvent::TabHighlighted => "tabs.onHighlighted",
            HostEvent::TabMoved => "tabs.onMoved",
            HostEvent::TabAttached => "tabs.onAttached",
            HostEvent::TabDetached => "tabs.onDetached",
            HostEvent::TabGroupCreated => "tabGroups.onCreated",
            HostEvent::TabGroupUpdated => "tabGroups.onUpdated",
            HostEvent::TabGroupRemoved => "tabGroups.onRemoved",
            HostEvent::TabGroupMoved => "tabGroups.onMoved",
            HostEvent::BookmarkCreated => "bookmarks.onCreated",
            HostEvent::BookmarkRemoved => "bookmarks.onRemoved",
            HostEvent::BookmarkChanged => "bookmarks.onChanged",
            HostEvent::BookmarkMoved => "bookmarks.onMoved",
            HostEvent::BookmarkChildrenReordered => "bookmarks.onChildrenReordered",
            HostEvent::BookmarkImportBegan => "bookmarks.onImportBegan",
            HostEvent::BookmarkImportEnded => "bookmarks.onImportEnded",
        }
    }
}

pub trait EventSource {
    type Listener;

    fn add_listener(&self, event: HostEvent, listener: &Self::Listener);
    fn remove_listener(&self, event: HostEvent, listener: &Self::Listener);
}

/// A registered listener, removed again when dropped
pub struct Subscription<S: EventSource> {
    source: S,
    event: HostEvent,
    listener: Rc<S::Listener>,
}

impl<S: EventSource> Subscription<S> {
    pub fn new(source: S, event: HostEvent, listener: Rc<S::Listener>) -> Subscription<S> {
        source.add_listener(event, &listener);
        Subscription {
            source,
            event,
            listener,
        }
    }

    pub fn event(&self) -> HostEvent {
        self.event
    }
}

impl<S: EventSource> Drop for Subscription<S> {
    fn drop(&mut self) {
        self.source.remove_listener(self.event, &self.listener);
    }
}

/// Register one listener for every event in `events`
pub fn subscribe_all<S: EventSource + Clone>(
    source: &S,
    events: &[HostEvent],
    listener: Rc<S::Listener>,
) -> Vec<Subscription<S>> {
    events
        .iter()
        .map(|event| Subscription::new(source.clone(), *event, Rc::clone(&listener)))
        .collect()
}

/// Event source backed by the `chrome.*` event objects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChromeEvents;

impl EventSource for ChromeEvents {
    type Listener = Closure<dyn FnMut()>;

    fn add_listener(&self, event: HostEvent, listener: &Self::Listener) {
        addHostListener(event.as_str(), listener.as_ref().unchecked_ref());
    }

    fn remove_listener(&self, event: HostEvent, listener: &Self::Listener) {
        removeHostListener(event.as_str(), listener.as_ref().unchecked_ref());
    }
}

impl ChromeEvents {
    /// Call `handler` whenever any of `events` fires, until the returned
    /// subscriptions are dropped
    pub fn listen(events: &[HostEvent], handler: impl FnMut() + 'static) -> Vec<Subscription<ChromeEvents>> {
        let listener = Rc::new(Closure::<dyn FnMut()>::new(handler));
        subscribe_all(&ChromeEvents, events, listener)
    }
}
