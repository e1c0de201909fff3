//! Group display names: an optional leading emoji plus text
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::emoji::{leading_emoji, strip_leading_emoji};

/// Shown in place of an empty group name
pub const UNGROUPED_LABEL: &str = "Ungrouped";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GroupName {
    pub emoji: String,
    pub text: String,
}

impl GroupName {
    pub fn new(emoji: impl Into<String>, text: impl Into<String>) -> GroupName {
        GroupName {
            emoji: emoji.into(),
            text: text.into(),
        }
    }

    /// Split a combined title such as `"📚 Reading"` into emoji and text
    pub fn from_string(full: &str) -> GroupName {
        GroupName::new(
            leading_emoji(full).unwrap_or_default(),
            strip_leading_emoji(full),
        )
    }

    /// Rebuild a name from `old_name`, replacing whichever parts are given
    pub fn merge(old_name: Option<&str>, new_text: Option<&str>, new_emoji: Option<&str>) -> GroupName {
        let base = old_name.map(GroupName::from_string).unwrap_or_default();
        GroupName {
            emoji: new_emoji.map(str::to_string).unwrap_or(base.emoji),
            text: new_text.map(str::to_string).unwrap_or(base.text),
        }
    }

    pub fn with_emoji(&self, emoji: impl Into<String>) -> GroupName {
        GroupName::new(emoji, self.text.clone())
    }

    pub fn with_text(&self, text: impl Into<String>) -> GroupName {
        GroupName::new(self.emoji.clone(), text)
    }

    /// The text part, or the "Ungrouped" label when there is none
    pub fn display_text(&self) -> &str {
        if self.text.is_empty() {
            UNGROUPED_LABEL
        } else {
            &self.text
        }
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.emoji.is_empty(), self.text.is_empty()) {
            (false, false) => write!(f, "{} {}", self.emoji, self.text),
            (false, true) => f.write_str(&self.emoji),
            (true, _) => f.write_str(&self.text),
        }
    }
}
