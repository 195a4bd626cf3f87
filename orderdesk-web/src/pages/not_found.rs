use crate::i18n::{t, use_ui_lang};
use crate::router::Route;
use yew::prelude::*;
use yew_router::Routable;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    let _lang = use_ui_lang();
    html! {
        <section class="text-center my-5" aria-labelledby="not-found-title">
            <h1 id="not-found-title" class="h3">{ t("not_found.title") }</h1>
            <p class="text-muted">{ t("not_found.message") }</p>
            <a class="btn btn-primary" href={Route::NewOrder.to_path()}>{ t("not_found.back") }</a>
        </section>
    }
}
