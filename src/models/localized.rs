use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Languages the public site is published in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Uz,
    Ru,
    En,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Uz, Language::Ru, Language::En];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Uz => "uz",
            Language::Ru => "ru",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uz" => Ok(Language::Uz),
            "ru" => Ok(Language::Ru),
            "en" => Ok(Language::En),
            other => Err(format!("unsupported language: {}", other)),
        }
    }
}

/// A piece of text carried in every site language
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub uz: String,
    #[serde(default)]
    pub ru: String,
    #[serde(default)]
    pub en: String,
}

impl LocalizedText {
    pub fn new(uz: impl Into<String>, ru: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            uz: uz.into(),
            ru: ru.into(),
            en: en.into(),
        }
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::Uz => &self.uz,
            Language::Ru => &self.ru,
            Language::En => &self.en,
        }
    }

    pub fn get_mut(&mut self, language: Language) -> &mut String {
        match language {
            Language::Uz => &mut self.uz,
            Language::Ru => &mut self.ru,
            Language::En => &mut self.en,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_language() {
        let text = LocalizedText::new("Salom", "Привет", "Hello");
        assert_eq!(text.get(Language::Uz), "Salom");
        assert_eq!(text.get(Language::Ru), "Привет");
        assert_eq!(text.get(Language::En), "Hello");
    }

    #[test]
    fn parses_language_codes() {
        assert_eq!("RU".parse::<Language>(), Ok(Language::Ru));
        assert!("de".parse::<Language>().is_err());
    }

    #[test]
    fn missing_languages_default_to_empty() {
        let text: LocalizedText = serde_json::from_str(r#"{"uz":"Loyiha"}"#).unwrap();
        assert_eq!(text.uz, "Loyiha");
        assert!(text.ru.is_empty());
    }
}
