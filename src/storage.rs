//! Key-value storage areas and the per-tab activity record kept in them
use std::cell::RefCell;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::error::HostError;
use crate::tab_data::Tab;

#[wasm_bindgen(module = "/newtab.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(area: &str, key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(area: &str, key: &str, value: JsValue) -> Result<(), JsValue>;
}

/// Async key-value store, e.g. `chrome.storage.session`
#[allow(async_fn_in_trait)]
pub trait StorageArea {
    async fn get(&self, key: &str) -> Result<Option<Value>, HostError>;
    async fn set(&self, key: &str, value: Value) -> Result<(), HostError>;
}

/// One of the extension's `chrome.storage` areas, reached through the JS bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeStorage {
    area: &'static str,
}

impl ChromeStorage {
    /// Cleared when the browser session ends
    pub fn session() -> ChromeStorage {
        ChromeStorage { area: "session" }
    }

    pub fn local() -> ChromeStorage {
        ChromeStorage { area: "local" }
    }
}

impl StorageArea for ChromeStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>, HostError> {
        let value_js = getStorage(self.area, key)
            .await
            .map_err(|e| HostError::call("storage.get", format!("{:?}", e)))?;

        if value_js.is_null() || value_js.is_undefined() {
            return Ok(None);
        }
        serde_wasm_bindgen::from_value(value_js)
            .map(Some)
            .map_err(|e| HostError::convert("stored value", e))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), HostError> {
        let value_js = value
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| HostError::convert("stored value", e))?;

        setStorage(self.area, key, value_js)
            .await
            .map_err(|e| HostError::call("storage.set", format!("{:?}", e)))
    }
}

/// In-process storage area
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RefCell<HashMap<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> MemoryStorage {
        MemoryStorage::default()
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl StorageArea for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>, HostError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), HostError> {
        self.values.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }
}

/// Sentinel for "no tab" and "never"
pub const UNKNOWN: i32 = -1;
const UNKNOWN_TIME: f64 = -1.0;

fn unknown_id() -> i32 {
    UNKNOWN
}

fn unknown_time() -> f64 {
    UNKNOWN_TIME
}

/// Creation and last-focus times of a tab, keyed by `tab=<id>`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabStorage {
    #[serde(default = "unknown_id")]
    pub tab_id: i32,
    #[serde(default = "unknown_time")]
    pub created_at: f64,
    #[serde(default = "unknown_time")]
    pub last_active: f64,
}

/// Fields to overwrite in a stored [`TabStorage`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabStorageUpdate {
    pub tab_id: i32,
    pub created_at: Option<f64>,
    pub last_active: Option<f64>,
}

impl TabStorage {
    pub fn new(tab_id: i32, created_at: f64, last_active: f64) -> TabStorage {
        TabStorage {
            tab_id,
            created_at,
            last_active,
        }
    }

    pub fn empty() -> TabStorage {
        TabStorage::new(UNKNOWN, UNKNOWN_TIME, UNKNOWN_TIME)
    }

    /// Record for a tab seen for the first time at `now`
    pub fn from_tab(tab: &Tab, now: f64) -> TabStorage {
        let last_active = if tab.active { now } else { UNKNOWN_TIME };
        TabStorage::new(tab.id.unwrap_or(UNKNOWN), now, last_active)
    }

    pub fn storage_key(tab_id: i32) -> String {
        format!("tab={}", tab_id)
    }

    /// Last time the tab lost focus, if it ever did
    pub fn last_active_at(&self) -> Option<f64> {
        (self.last_active != UNKNOWN_TIME).then_some(self.last_active)
    }

    /// Read the record for `tab_id`; unknown fields come back as `-1`.
    /// `tab_id == -1` yields [`TabStorage::empty`] without touching storage.
    pub async fn from_storage<S: StorageArea>(storage: &S, tab_id: i32) -> Result<TabStorage, HostError> {
        if tab_id == UNKNOWN {
            return Ok(TabStorage::empty());
        }
        let stored = match storage.get(&TabStorage::storage_key(tab_id)).await? {
            Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable record for tab {}: {}", tab_id, e);
                TabStorage::empty()
            }),
            None => TabStorage::empty(),
        };
        Ok(TabStorage { tab_id, ..stored })
    }

    /// Read, overlay `updates`, write back. Not atomic: the last writer wins.
    /// Does nothing for `tab_id == -1`.
    pub async fn update<S: StorageArea>(
        storage: &S,
        updates: TabStorageUpdate,
    ) -> Result<Option<TabStorage>, HostError> {
        if updates.tab_id == UNKNOWN {
            return Ok(None);
        }
        let current = TabStorage::from_storage(storage, updates.tab_id).await?;
        let merged = TabStorage::new(
            updates.tab_id,
            updates.created_at.unwrap_or(current.created_at),
            updates.last_active.unwrap_or(current.last_active),
        );
        let value = serde_json::to_value(merged).map_err(|e| HostError::convert("tab record", e))?;
        storage.set(&TabStorage::storage_key(updates.tab_id), value).await?;
        Ok(Some(merged))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_empty_for_unknown_tab() {
        let storage = MemoryStorage::new();

        let record = block_on(TabStorage::from_storage(&storage, UNKNOWN)).unwrap();

        assert_eq!(record, TabStorage::empty());
    }

    #[test]
    fn test_missing_record_defaults() {
        let storage = MemoryStorage::new();

        let record = block_on(TabStorage::from_storage(&storage, 42)).unwrap();

        assert_eq!(record, TabStorage::new(42, -1.0, -1.0));
        assert_eq!(record.last_active_at(), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_partial_record_defaults() {
        let storage = MemoryStorage::new();
        block_on(storage.set("tab=3", json!({"tabId": 3, "createdAt": 100.0}))).unwrap();

        let record = block_on(TabStorage::from_storage(&storage, 3)).unwrap();

        assert_eq!(record, TabStorage::new(3, 100.0, -1.0));
    }

    #[test]
    fn test_update_overlays_and_persists() {
        let storage = MemoryStorage::new();
        block_on(storage.set("tab=5", json!({"tabId": 5, "createdAt": 100.0, "lastActive": 150.0}))).unwrap();

        let updated = block_on(TabStorage::update(
            &storage,
            TabStorageUpdate {
                tab_id: 5,
                created_at: None,
                last_active: Some(200.0),
            },
        ))
        .unwrap();

        assert_eq!(updated, Some(TabStorage::new(5, 100.0, 200.0)));
        let stored = block_on(storage.get("tab=5")).unwrap().unwrap();
        assert_eq!(stored, json!({"tabId": 5, "createdAt": 100.0, "lastActive": 200.0}));
    }

    #[test]
    fn test_update_unknown_tab_is_noop() {
        let storage = MemoryStorage::new();

        let updated = block_on(TabStorage::update(
            &storage,
            TabStorageUpdate {
                tab_id: UNKNOWN,
                created_at: Some(1.0),
                last_active: Some(2.0),
            },
        ))
        .unwrap();

        assert_eq!(updated, None);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_last_writer_wins() {
        let storage = MemoryStorage::new();
        let update = |last_active| TabStorageUpdate {
            tab_id: 9,
            created_at: None,
            last_active: Some(last_active),
        };

        block_on(TabStorage::update(&storage, update(10.0))).unwrap();
        block_on(TabStorage::update(&storage, update(20.0))).unwrap();

        let record = block_on(TabStorage::from_storage(&storage, 9)).unwrap();
        assert_eq!(record.last_active_at(), Some(20.0));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_unreadable_record_falls_back() {
        let storage = MemoryStorage::new();
        block_on(storage.set("tab=4", json!("garbage"))).unwrap();

        let record = block_on(TabStorage::from_storage(&storage, 4)).unwrap();

        assert_eq!(record, TabStorage::new(4, -1.0, -1.0));
    }

    #[test]
    fn test_from_tab() {
        let tab: Tab = serde_json::from_str(r#"{"id": 8, "windowId": 1, "active": true}"#).unwrap();

        assert_eq!(TabStorage::from_tab(&tab, 500.0), TabStorage::new(8, 500.0, 500.0));

        let background = Tab { active: false, ..tab };
        assert_eq!(TabStorage::from_tab(&background, 500.0), TabStorage::new(8, 500.0, -1.0));
    }
}
