//! Bilingual dictionary and per-language locale snapshots

use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// A supported site language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "fr")]
    Fr,
}

impl Language {
    /// Every supported language, default first
    pub const ALL: [Language; 2] = [Language::En, Language::Fr];

    /// The locale code (`en`, `fr`)
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }

    /// Look up a language by its exact locale code
    pub fn from_code(code: &str) -> Option<Language> {
        Language::ALL.into_iter().find(|l| l.code() == code)
    }

    /// Resolve a requested code, falling back to the default language
    pub fn resolve(code: Option<&str>) -> Language {
        code.and_then(Language::from_code).unwrap_or_default()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

const BUILTIN: &[(&str, &str, &str)] = &[
    ("welcome", "Welcome to Stamina", "Bienvenue dans Stamina"),
    ("models", "Models", "Modèles"),
    ("services", "Services", "Services"),
    ("classifications", "Classifications", "Nomenclatures"),
    ("glossaries", "Glossaries", "Glossaires"),
    ("welcome_gsbpm", "Welcome to the GSBPM", "Bienvenue dans le GSBPM"),
    ("welcome_gsim", "Welcome to the GSIM", "Bienvenue dans le GSIM"),
];

/// Semantic key -> language -> localized string
///
/// Every key carries a string for every [`Language`]; construction rejects
/// incomplete tables so any locale derived from it is complete too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    entries: IndexMap<String, IndexMap<Language, String>>,
}

impl Dictionary {
    /// Build a dictionary, checking that no translation is missing
    pub fn new(entries: IndexMap<String, IndexMap<Language, String>>) -> Result<Self> {
        for (key, translations) in &entries {
            for language in Language::ALL {
                if !translations.contains_key(&language) {
                    return Err(Error::MissingTranslation {
                        key: key.clone(),
                        language,
                    });
                }
            }
        }
        Ok(Self { entries })
    }

    /// The table shipped with the site
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(key, en, fr)| {
                let mut translations = IndexMap::new();
                translations.insert(Language::En, en.to_string());
                translations.insert(Language::Fr, fr.to_string());
                (key.to_string(), translations)
            })
            .collect();
        Self { entries }
    }

    /// Parse a table from RON: `{"key": {"en": "...", "fr": "..."}}`
    pub fn from_ron(source: &str) -> Result<Self> {
        let raw: IndexMap<String, IndexMap<String, String>> =
            ron::from_str(source).map_err(|e| Error::Dictionary(e.to_string()))?;

        let mut entries = IndexMap::with_capacity(raw.len());
        for (key, translations) in raw {
            let mut by_language = IndexMap::new();
            for (code, text) in translations {
                let language = Language::from_code(&code).ok_or_else(|| {
                    Error::Dictionary(format!("unsupported locale '{}' for key '{}'", code, key))
                })?;
                by_language.insert(language, text);
            }
            entries.insert(key, by_language);
        }
        Self::new(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The string for `key` in `language`, if the key exists
    pub fn translation(&self, key: &str, language: Language) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(|t| t.get(&language))
            .map(String::as_str)
    }

    /// Derive the full locale for one language
    pub fn locale(&self, language: Language) -> LocaleSnapshot {
        let entries = self
            .entries
            .iter()
            .filter_map(|(key, translations)| {
                translations
                    .get(&language)
                    .map(|text| (key.clone(), text.clone()))
            })
            .collect();
        LocaleSnapshot {
            language,
            entries: Rc::new(entries),
        }
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Read-only key -> string view for a single language
///
/// Cloning is cheap; clones share the same table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSnapshot {
    language: Language,
    entries: Rc<IndexMap<String, String>>,
}

impl LocaleSnapshot {
    pub fn language(&self) -> Language {
        self.language
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
