mod bundle;
mod format;
mod locales;
mod render;

pub use bundle::{I18nBundle, current_lang, init_from_config, number_locale, set_lang};
pub use format::{fmt_date, fmt_money, fmt_percent, fmt_quantity};
pub use locales::{LocaleMeta, locales};
pub use render::{t, tr};

use yew::prelude::*;

/// Active UI language, provided at the app root. Components that translate
/// text subscribe to it so a language switch re-renders them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiLang(pub String);

#[hook]
pub fn use_ui_lang() -> Option<UiLang> {
    use_context::<UiLang>()
}
