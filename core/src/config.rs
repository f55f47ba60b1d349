use alloc::string::{String, ToString};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, Theme};

/// How the effective theme is exposed on the document root.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStrategy {
    /// Toggle a class on `<html>`.
    Class,
    /// Toggle an attribute on `<html>`.
    Attribute,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeConfig {
    pub marker: MarkerStrategy,
    pub class_name: String,
    pub attribute_name: String,
    pub default_theme: Theme,
    pub system_enabled: bool,
    pub suppress_transitions: bool,
    pub storage_key: String,
    pub sync_across_tabs: bool,
}

impl ThemeConfig {
    pub const DEFAULT_CLASS_NAME: &'static str = "dark";
    pub const DEFAULT_ATTRIBUTE_NAME: &'static str = "data-theme";
    pub const DEFAULT_STORAGE_KEY: &'static str = "theme";

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        if self.class_name.is_empty() || self.class_name.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidClassName(self.class_name.clone()));
        }
        let valid_attribute_char =
            |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.');
        if self.attribute_name.is_empty() || !self.attribute_name.chars().all(valid_attribute_char) {
            return Err(ConfigError::InvalidAttributeName(
                self.attribute_name.clone(),
            ));
        }
        Ok(())
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            marker: MarkerStrategy::Class,
            class_name: Self::DEFAULT_CLASS_NAME.to_string(),
            attribute_name: Self::DEFAULT_ATTRIBUTE_NAME.to_string(),
            default_theme: Theme::Dark,
            system_enabled: true,
            suppress_transitions: true,
            storage_key: Self::DEFAULT_STORAGE_KEY.to_string(),
            sync_across_tabs: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(ThemeConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_unusable_marker_names() {
        let config = ThemeConfig {
            class_name: "dark mode".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidClassName("dark mode".to_string()))
        );

        let config = ThemeConfig {
            attribute_name: "data theme".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidAttributeName(_))
        ));

        let config = ThemeConfig {
            storage_key: String::new(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyStorageKey));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: ThemeConfig = toml::from_str(
            r#"
            marker = "attribute"
            defaultTheme = "light"
            systemEnabled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.marker, MarkerStrategy::Attribute);
        assert_eq!(config.default_theme, Theme::Light);
        assert!(!config.system_enabled);
        assert_eq!(config.storage_key, ThemeConfig::DEFAULT_STORAGE_KEY);
        assert!(config.suppress_transitions);
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let json = serde_json::to_value(ThemeConfig::default()).unwrap();
        assert_eq!(json["storageKey"], "theme");
        assert_eq!(json["defaultTheme"], "dark");
        assert_eq!(json["marker"], "class");
    }
}
