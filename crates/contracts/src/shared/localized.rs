//! Localized strings: static labels for the registry and free-form
//! content text coming from the API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::enums::Language;

/// Static label with a translation per supported language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalizedLabel {
    pub fr: &'static str,
    pub en: &'static str,
}

impl LocalizedLabel {
    pub const fn new(fr: &'static str, en: &'static str) -> Self {
        Self { fr, en }
    }

    pub fn get(&self, lang: Language) -> &'static str {
        match lang {
            Language::Fr => self.fr,
            Language::En => self.en,
        }
    }

    pub fn to_owned_map(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("fr".to_string(), self.fr.to_string()),
            ("en".to_string(), self.en.to_string()),
        ])
    }
}

/// Content text: either a plain string or a map `lang -> text`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Plain(String),
    Map(BTreeMap<String, String>),
}

impl Default for LocalizedText {
    fn default() -> Self {
        LocalizedText::Plain(String::new())
    }
}

impl LocalizedText {
    /// Text in the requested language, then French, then any translation
    pub fn get(&self, lang: Language) -> &str {
        match self {
            LocalizedText::Plain(s) => s,
            LocalizedText::Map(map) => map
                .get(lang.code())
                .or_else(|| map.get(Language::default().code()))
                .or_else(|| map.values().next())
                .map(String::as_str)
                .unwrap_or(""),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            LocalizedText::Plain(s) => s.is_empty(),
            LocalizedText::Map(map) => map.values().all(|v| v.is_empty()),
        }
    }
}

impl From<&str> for LocalizedText {
    fn from(s: &str) -> Self {
        LocalizedText::Plain(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_and_map_deserialize() {
        let plain: LocalizedText = serde_json::from_str(r#""Col d'Izoard""#).unwrap();
        assert_eq!(plain.get(Language::En), "Col d'Izoard");

        let map: LocalizedText =
            serde_json::from_str(r#"{"fr": "Col du Galibier", "en": "Galibier Pass"}"#).unwrap();
        assert_eq!(map.get(Language::Fr), "Col du Galibier");
        assert_eq!(map.get(Language::En), "Galibier Pass");
    }

    #[test]
    fn test_missing_translation_falls_back_to_french() {
        let map = LocalizedText::Map(BTreeMap::from([(
            "fr".to_string(),
            "Programme montagne".to_string(),
        )]));
        assert_eq!(map.get(Language::En), "Programme montagne");
    }
}
