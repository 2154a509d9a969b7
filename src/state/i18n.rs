use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::state::form_state::Flash;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    En,
    ZhHant,
}

impl Language {
    pub fn all() -> &'static [Self] {
        &[Self::En, Self::ZhHant]
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::ZhHant => "zh-Hant",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Self::En),
            "zh-Hant" => Some(Self::ZhHant),
            _ => None,
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Self::En => "language.option.en",
            Self::ZhHant => "language.option.zh_hant",
        }
    }
}

/// Looks up `key`, falling back to English and then to the key itself.
pub fn tr<'a>(language: Language, key: &'a str) -> &'a str {
    if key.is_empty() {
        return key;
    }
    catalog(language)
        .get(key)
        .map(String::as_str)
        .or_else(|| catalog(Language::En).get(key).map(String::as_str))
        .unwrap_or(key)
}

pub fn flash_text(language: Language, flash: &Flash) -> String {
    let base = tr(language, &flash.key);
    match flash.detail.as_deref() {
        Some(detail) if base.is_empty() => detail.to_string(),
        Some(detail) => format!("{base} {detail}"),
        None => base.to_string(),
    }
}

fn catalog(language: Language) -> &'static BTreeMap<String, String> {
    match language {
        Language::En => EN_CATALOG.get_or_init(|| parse_catalog(Language::En)),
        Language::ZhHant => ZH_HANT_CATALOG.get_or_init(|| parse_catalog(Language::ZhHant)),
    }
}

fn parse_catalog(language: Language) -> BTreeMap<String, String> {
    let source = match language {
        Language::En => include_str!("../../assets/i18n/en.json"),
        Language::ZhHant => include_str!("../../assets/i18n/zh-Hant.json"),
    };

    serde_json::from_str(source).unwrap_or_else(|err| {
        panic!(
            "failed to parse i18n catalog for language '{}': {err}",
            language.code()
        )
    })
}

static EN_CATALOG: OnceLock<BTreeMap<String, String>> = OnceLock::new();
static ZH_HANT_CATALOG: OnceLock<BTreeMap<String, String>> = OnceLock::new();
