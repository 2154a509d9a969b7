use hedsheet::state::form_state::{Flash, FlashCategory};
use hedsheet::state::i18n::{self, Language};
use std::collections::BTreeSet;

#[test]
fn test_default_language_is_english() {
    assert_eq!(Language::default(), Language::En);
    assert_eq!(i18n::tr(Language::default(), "button.validate"), "Validate");
}

#[test]
fn test_language_switch_changes_ui_text() {
    assert_eq!(i18n::tr(Language::En, "button.validate"), "Validate");
    assert_eq!(i18n::tr(Language::ZhHant, "button.validate"), "驗證");
}

#[test]
fn test_missing_key_falls_back_to_english() {
    assert_eq!(
        i18n::tr(Language::ZhHant, "test.fallback_only"),
        "Fallback value"
    );
}

#[test]
fn test_unknown_key_returns_key() {
    assert_eq!(i18n::tr(Language::En, "no.such.key"), "no.such.key");
    assert_eq!(i18n::tr(Language::En, ""), "");
}

#[test]
fn test_language_code_roundtrip() {
    assert_eq!(Language::from_code("en"), Some(Language::En));
    assert_eq!(Language::from_code("zh-Hant"), Some(Language::ZhHant));
    assert_eq!(Language::from_code("unknown"), None);
}

#[test]
fn test_flash_text_variants() {
    let plain = Flash::new(FlashCategory::Error, "flash.spreadsheet_not_specified");
    assert_eq!(i18n::flash_text(Language::En, &plain), "Spreadsheet is not specified.");

    let raw = Flash::new(FlashCategory::Success, "").with_detail("from server");
    assert_eq!(i18n::flash_text(Language::ZhHant, &raw), "from server");

    let detailed = Flash::new(FlashCategory::Error, "flash.validation_failed").with_detail("HTTP 500");
    assert_eq!(i18n::flash_text(Language::En, &detailed), "Validation failed: HTTP 500");
}

#[test]
fn test_zh_hant_catalog_matches_english_keys_except_fallback_only() {
    let en: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(include_str!("../assets/i18n/en.json"))
            .expect("en.json should be valid JSON object");
    let zh: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(include_str!("../assets/i18n/zh-Hant.json"))
            .expect("zh-Hant.json should be valid JSON object");

    let allowed_missing: BTreeSet<&str> = BTreeSet::from(["test.fallback_only"]);

    let en_keys: BTreeSet<&str> = en.keys().map(String::as_str).collect();
    let zh_keys: BTreeSet<&str> = zh.keys().map(String::as_str).collect();

    let missing: Vec<&str> = en_keys
        .difference(&zh_keys)
        .copied()
        .filter(|key| !allowed_missing.contains(key))
        .collect();

    assert!(
        missing.is_empty(),
        "zh-Hant catalog is missing keys: {}",
        missing.join(", ")
    );
}
