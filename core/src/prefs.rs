//! User preferences, persisted as TOML.

use serde::{Deserialize, Serialize};

use crate::charset;

/// UI color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    Auto,
}

/// Editor preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Padding character override; `None` means the alphabet default.
    pub padding_char: Option<char>,
    pub theme: Theme,
    /// UI language tag.
    pub language: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            padding_char: None,
            theme: Theme::Auto,
            language: "cs".to_string(),
        }
    }
}

impl Preferences {
    /// The padding character the pipeline should use. An override that is
    /// not in the plate alphabet is ignored.
    pub fn effective_padding_char(&self) -> char {
        match self.padding_char {
            Some(ch) if charset::is_valid_char(ch) => ch,
            _ => charset::PADDING_CHAR,
        }
    }

    /// Load preferences from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let prefs: Preferences = toml::from_str(&content)?;
        Ok(prefs)
    }

    /// Save preferences to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load preferences from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize preferences to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.padding_char, None);
        assert_eq!(prefs.theme, Theme::Auto);
        assert_eq!(prefs.language, "cs");
        assert_eq!(prefs.effective_padding_char(), charset::PADDING_CHAR);
    }

    #[test]
    fn padding_override_must_be_in_alphabet() {
        let mut prefs = Preferences::default();
        prefs.padding_char = Some('Z');
        assert_eq!(prefs.effective_padding_char(), 'Z');
        prefs.padding_char = Some('G');
        assert_eq!(prefs.effective_padding_char(), charset::PADDING_CHAR);
    }

    #[test]
    fn toml_round_trip() {
        let mut prefs = Preferences::default();
        prefs.padding_char = Some('X');
        prefs.theme = Theme::Dark;
        let text = prefs.to_toml_string().unwrap();
        let parsed = Preferences::from_toml_str(&text).unwrap();
        assert_eq!(parsed, prefs);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed = Preferences::from_toml_str("theme = \"dark\"\n").unwrap();
        assert_eq!(parsed.theme, Theme::Dark);
        assert_eq!(parsed.padding_char, None);
        assert_eq!(parsed.language, "cs");
    }
}
