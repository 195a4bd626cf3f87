use crate::i18n::locales::{default_number_locale, is_supported, language_of, load_translations};
use orderdesk_core::Locale;
use serde_json::Value;
use std::cell::RefCell;

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const STORAGE_KEY: &str = "orderdesk.locale";

pub struct I18nBundle {
    pub lang: String,
    /// Layout used for amounts and dates while this language is active.
    pub number_locale: Locale,
    /// BCP-47 tag handed to `Intl` in the browser.
    pub number_tag: String,
    pub translations: Value,
    pub fallback: Value,
}

fn build_bundle(lang: &str, number_tag: &str) -> Option<I18nBundle> {
    if !is_supported(lang) {
        return None;
    }
    let fallback = load_translations("en")?;
    let translations = load_translations(lang)?;

    Some(I18nBundle {
        lang: lang.to_string(),
        number_locale: Locale::from_tag(number_tag),
        number_tag: number_tag.trim().to_string(),
        translations,
        fallback,
    })
}

fn fallback_bundle() -> I18nBundle {
    let fallback = load_translations("en").unwrap_or(Value::Object(serde_json::Map::new()));

    I18nBundle {
        lang: "en".to_string(),
        number_locale: Locale::EnUs,
        number_tag: Locale::EnUs.tag().to_string(),
        translations: fallback.clone(),
        fallback,
    }
}

fn saved_lang() -> Option<String> {
    #[cfg(all(not(test), target_arch = "wasm32"))]
    {
        web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .and_then(|storage| storage.get_item(STORAGE_KEY).ok().flatten())
            .filter(|lang| is_supported(lang))
    }

    #[cfg(any(test, not(target_arch = "wasm32")))]
    {
        None
    }
}

thread_local! {
    static CURRENT: RefCell<I18nBundle> = RefCell::new({
        let initial = saved_lang().unwrap_or_else(|| "en".to_string());
        build_bundle(&initial, default_number_locale(&initial).tag()).unwrap_or_else(fallback_bundle)
    });
}

pub(super) fn with_bundle<R>(f: impl FnOnce(&I18nBundle) -> R) -> R {
    CURRENT.with(|cell| f(&cell.borrow()))
}

fn replace_bundle(bundle: I18nBundle) {
    CURRENT.with(|cell| cell.replace(bundle));
}

fn apply(bundle: I18nBundle, persist: bool) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.document_element())
        {
            let _ = el.set_attribute("lang", &bundle.number_tag);
        }
        if persist
            && let Some(storage) =
                web_sys::window().and_then(|win| win.local_storage().ok().flatten())
        {
            let _ = storage.set_item(STORAGE_KEY, &bundle.lang);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = persist;
    replace_bundle(bundle);
}

/// Switch the UI language.
///
/// Unknown languages are ignored. The choice is persisted to localStorage and
/// amounts switch to the language's default layout.
pub fn set_lang(lang: &str) {
    if let Some(bundle) = build_bundle(lang, default_number_locale(lang).tag()) {
        apply(bundle, true);
    }
}

/// Pick the startup language from the configured locale tag unless the user
/// saved a choice earlier.
///
/// The configured tag (for example `en-GB` or `es-ES`) keeps driving amounts
/// and dates when its language is the one in use, or when there is no bundle
/// for its language and the UI falls back to English.
pub fn init_from_config(configured: &str) {
    let configured_lang = language_of(configured);
    let lang = saved_lang().unwrap_or_else(|| configured_lang.clone());
    let lang = if is_supported(&lang) { lang } else { "en".to_string() };
    let number_tag = if configured_lang == lang || !is_supported(&configured_lang) {
        configured.to_string()
    } else {
        default_number_locale(&lang).tag().to_string()
    };
    if let Some(bundle) = build_bundle(&lang, &number_tag) {
        apply(bundle, false);
    }
}

/// Get the current active language code
#[must_use]
pub fn current_lang() -> String {
    with_bundle(|bundle| bundle.lang.clone())
}

/// Layout used for amounts and dates in the current language.
#[must_use]
pub fn number_locale() -> Locale {
    with_bundle(|bundle| bundle.number_locale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_bundle_loads_requested_locale() {
        let bundle = build_bundle("it", "it-IT").expect("bundle should load");
        assert_eq!(bundle.lang, "it");
        assert_eq!(bundle.number_locale, Locale::ItIt);
        assert!(bundle.translations.is_object());
        assert!(bundle.fallback.is_object());
        assert!(build_bundle("xx", "en-US").is_none());
    }

    #[test]
    fn configured_locale_keeps_its_layout() {
        init_from_config("en-GB");
        assert_eq!(current_lang(), "en");
        assert_eq!(number_locale(), Locale::EnGb);

        init_from_config("it");
        assert_eq!(current_lang(), "it");
        assert_eq!(number_locale(), Locale::ItIt);

        set_lang("it");
        assert_eq!(number_locale(), Locale::ItIt);
        set_lang("en");
    }

    #[test]
    fn locale_without_bundle_keeps_its_tag_for_amounts() {
        init_from_config("es-ES");
        assert_eq!(current_lang(), "en");
        with_bundle(|bundle| assert_eq!(bundle.number_tag, "es-ES"));
        assert_eq!(number_locale(), Locale::EnUs);

        init_from_config("pt-BR");
        assert_eq!(current_lang(), "en");
        with_bundle(|bundle| assert_eq!(bundle.number_tag, "pt-BR"));

        set_lang("en");
        with_bundle(|bundle| assert_eq!(bundle.number_tag, "en-US"));
    }
}
