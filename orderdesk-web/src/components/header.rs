use crate::i18n::{locales, set_lang, t};
use crate::router::Route;
use wasm_bindgen::JsCast;
use yew::prelude::*;
use yew_router::Routable;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub on_lang_change: Callback<String>,
    pub current_lang: String,
}

#[function_component(Header)]
pub fn header(p: &Props) -> Html {
    let on_change = {
        let cb = p.on_lang_change.clone();
        Callback::from(move |e: web_sys::Event| {
            if let Some(sel) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
            {
                set_lang(&sel.value());
                cb.emit(sel.value());
            }
        })
    };
    let options = locales()
        .iter()
        .map(|meta| {
            html! {
                <option value={meta.code} selected={meta.code == p.current_lang}>{ meta.name }</option>
            }
        })
        .collect::<Html>();
    html! {
        <header role="banner" class="navbar navbar-expand border-bottom mb-3">
            <div class="container-fluid">
                <a class="navbar-brand" href={Route::NewOrder.to_path()}>{ t("app.title") }</a>
                <nav class="navbar-nav me-auto">
                    <a class="nav-link" href={Route::NewOrder.to_path()}>{ t("nav.new_order") }</a>
                    <a class="nav-link" href={Route::Dashboard.to_path()}>{ t("nav.dashboard") }</a>
                </nav>
                <label for="lang-select" class="visually-hidden">{ t("nav.language") }</label>
                <select id="lang-select" class="form-select form-select-sm w-auto" onchange={on_change} aria-label={t("nav.language")}>
                    { options }
                </select>
            </div>
        </header>
    }
}
