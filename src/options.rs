use std::collections::HashMap;

use serde::Deserialize;

use crate::error::Error;
use crate::markdown::DEFAULT_MAX_REPLACEMENTS;

/// Lookup tables and switches for [`escape_for_slack`](crate::escape_for_slack).
///
/// Deserializes from the camelCase JSON shape used by Slack web clients:
///
/// ```json
/// {
///   "customEmoji": { "shipit": "https://example.com/shipit.png", "goodbye": "alias:wave" },
///   "users": { "U123": "alice" },
///   "channels": { "C456": "general" },
///   "usergroups": { "S789": "@devs" },
///   "markdown": true
/// }
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Emoji name to code points (`1F44B`), an image URL or `alias:NAME`.
    pub custom_emoji: HashMap<String, String>,
    pub users: HashMap<String, String>,
    pub channels: HashMap<String, String>,
    pub usergroups: HashMap<String, String>,
    /// Expand markdown before resolving mentions and emoji.
    pub markdown: bool,
    /// Substitutions allowed per markup kind.
    pub max_replacements: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            custom_emoji: HashMap::new(),
            users: HashMap::new(),
            channels: HashMap::new(),
            usergroups: HashMap::new(),
            markdown: false,
            max_replacements: DEFAULT_MAX_REPLACEMENTS,
        }
    }
}

impl Options {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_markdown(mut self, markdown: bool) -> Self {
        self.markdown = markdown;
        self
    }

    pub fn with_max_replacements(mut self, max_replacements: usize) -> Self {
        self.max_replacements = max_replacements;
        self
    }

    pub fn with_custom_emoji(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_emoji.insert(name.into(), value.into());
        self
    }

    pub fn with_user(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.users.insert(id.into(), name.into());
        self
    }

    pub fn with_channel(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.channels.insert(id.into(), name.into());
        self
    }

    pub fn with_usergroup(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.usergroups.insert(id.into(), name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert!(!options.markdown);
        assert_eq!(options.max_replacements, 100);
        assert!(options.users.is_empty());
    }

    #[test]
    fn test_from_json() {
        let options = Options::from_json(
            r#"{
                "customEmoji": { "goodbye": "alias:wave" },
                "users": { "U123": "alice" },
                "markdown": true,
                "maxReplacements": 5
            }"#,
        );
        let expected = Options::default()
            .with_custom_emoji("goodbye", "alias:wave")
            .with_user("U123", "alice")
            .with_markdown(true)
            .with_max_replacements(5);
        assert_eq!(options.ok(), Some(expected));
    }

    #[test]
    fn test_from_empty_json_object() {
        assert_eq!(Options::from_json("{}").ok(), Some(Options::default()));
    }

    #[test]
    fn test_from_invalid_json() {
        let err = Options::from_json(r#"{ "markdown": "yes" }"#);
        assert!(matches!(err, Err(Error::InvalidOptions(_))));
    }
}
