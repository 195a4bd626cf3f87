use orderdesk_core::Locale;
use serde_json::Value;

/// A UI language and the number/date layout it uses by default.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LocaleMeta {
    pub code: &'static str,
    pub name: &'static str,
    pub number_locale: Locale,
}

pub const LOCALE_META: &[LocaleMeta] = &[
    LocaleMeta {
        code: "en",
        name: "English",
        number_locale: Locale::EnUs,
    },
    LocaleMeta {
        code: "it",
        name: "Italiano",
        number_locale: Locale::ItIt,
    },
];

const LOCALE_TABLE: &[(&str, &str)] = &[
    ("en", include_str!("../../i18n/en.json")),
    ("it", include_str!("../../i18n/it.json")),
];

/// Supported UI languages with their native names.
#[must_use]
pub const fn locales() -> &'static [LocaleMeta] {
    LOCALE_META
}

#[must_use]
pub fn is_supported(lang: &str) -> bool {
    LOCALE_META.iter().any(|m| m.code == lang)
}

#[must_use]
pub fn default_number_locale(lang: &str) -> Locale {
    LOCALE_META
        .iter()
        .find(|m| m.code == lang)
        .map_or(Locale::EnUs, |m| m.number_locale)
}

/// Primary language subtag of a BCP-47 tag (`it-IT` -> `it`, `pt_BR` -> `pt`).
#[must_use]
pub fn language_of(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

pub fn load_translations(lang: &str) -> Option<Value> {
    let bundle = LOCALE_TABLE
        .iter()
        .find_map(|(code, data)| (*code == lang).then_some(*data))
        .unwrap_or(LOCALE_TABLE[0].1);

    serde_json::from_str(bundle).ok()
}
