//! User settings, stored as JSON under the `settings` key of the local storage area
use serde::{Deserialize, Serialize};

use crate::error::HostError;
use crate::storage::StorageArea;

pub const SETTINGS_KEY: &str = "settings";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Title path, below the bookmark root, of the folder new bookmark folders go into
    pub extension_folder: Vec<String>,
    /// Quiet period before an edited group name is written back
    pub rename_debounce_ms: u32,
    /// Wait before re-reading host state after an action
    pub refresh_delay_ms: u32,
    /// Group used when links are imported without a target name
    pub default_import_group: String,
    /// How many rows the "select first" shortcut picks
    pub select_batch_size: usize,
    pub ungrouped_label: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            extension_folder: vec!["Other Bookmarks".to_string()],
            rename_debounce_ms: 500,
            refresh_delay_ms: 500,
            default_import_group: "Imported".to_string(),
            select_batch_size: 50,
            ungrouped_label: crate::group_name::UNGROUPED_LABEL.to_string(),
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults when none are stored or they
    /// cannot be read
    pub async fn load<S: StorageArea>(storage: &S) -> Result<Settings, HostError> {
        let Some(value) = storage.get(SETTINGS_KEY).await? else {
            return Ok(Settings::default());
        };
        Ok(serde_json::from_value(value).unwrap_or_else(|e| {
            log::warn!("Using default settings, stored settings are invalid: {}", e);
            Settings::default()
        }))
    }

    pub fn extension_folder_path(&self) -> Vec<&str> {
        self.extension_folder.iter().map(String::as_str).collect()
    }
}
