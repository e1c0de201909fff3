//! Identity-preserving reconciliation of freshly computed groups
//!
//! Components are memoized on their props, so a group whose content did not
//! change between two refreshes keeps the `Rc` it had before.
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::Rc;

/// Insertion-ordered map. Re-inserting a key keeps its position.
#[derive(Debug, Clone)]
pub struct GroupMap<K, V> {
    entries: Vec<(K, V)>,
    index: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone, V> GroupMap<K, V> {
    pub fn new() -> Self {
        GroupMap {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.index.get(&key) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let i = self.index.remove(key)?;
        let (_, value) = self.entries.remove(i);
        for (k, _) in &self.entries[i..] {
            if let Some(pos) = self.index.get_mut(k) {
                *pos -= 1;
            }
        }
        Some(value)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        match self.index.get(key) {
            Some(&i) => Some(&mut self.entries[i].1),
            None => None,
        }
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<K: Eq + Hash + Clone, V> Default for GroupMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for GroupMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq + Hash + Clone, V> FromIterator<(K, V)> for GroupMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = GroupMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<K, V> IntoIterator for GroupMap<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

fn keep_if_equal<V: PartialEq>(old: Option<&Rc<V>>, fresh: Rc<V>) -> Rc<V> {
    match old {
        Some(prev) if Rc::ptr_eq(prev, &fresh) || **prev == *fresh => Rc::clone(prev),
        _ => fresh,
    }
}

/// Rebuild `fresh` in its own order, reusing the old `Rc` for every entry that
/// is deeply equal to the one under the same key in `old`. Keys missing from
/// `fresh` are dropped.
pub fn reconcile<K, V, I>(old: &GroupMap<K, Rc<V>>, fresh: I) -> GroupMap<K, Rc<V>>
where
    K: Eq + Hash + Clone,
    V: PartialEq,
    I: IntoIterator<Item = (K, Rc<V>)>,
{
    fresh
        .into_iter()
        .map(|(key, value)| {
            let kept = keep_if_equal(old.get(&key), value);
            (key, kept)
        })
        .collect()
}

/// Same as [`reconcile`] for a list of values that carry their own key
pub fn reconcile_keyed<K, V, F>(old: &GroupMap<K, Rc<V>>, fresh: Vec<Rc<V>>, key: F) -> GroupMap<K, Rc<V>>
where
    K: Eq + Hash + Clone,
    V: PartialEq,
    F: Fn(&V) -> K,
{
    reconcile(old, fresh.into_iter().map(|value| (key(&value), value)))
}

/// Whole-value comparison: any difference replaces the value
pub fn reconcile_value<T: PartialEq>(old: &Rc<T>, fresh: T) -> Rc<T> {
    if **old == fresh {
        Rc::clone(old)
    } else {
        Rc::new(fresh)
    }
}
