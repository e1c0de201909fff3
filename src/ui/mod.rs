//! Yew components of the new-tab page and the toolbar popup
use std::collections::HashSet;
use std::hash::Hash;

pub mod bookmark_card;
pub mod components;
pub mod footer;
pub mod newtab;
pub mod popup;
pub mod tab_card;

/// `selected` with `key` flipped in or out
pub fn toggled<K: Eq + Hash + Clone>(selected: &HashSet<K>, key: K) -> HashSet<K> {
    let mut next = selected.clone();
    if !next.remove(&key) {
        next.insert(key);
    }
    next
}

/// The first `n` keys, for the "select first" shortcut
pub fn first_n<K: Eq + Hash>(keys: impl IntoIterator<Item = K>, n: usize) -> HashSet<K> {
    keys.into_iter().take(n).collect()
}
