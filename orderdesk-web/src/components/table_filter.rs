//! Free-text filter bound to a table by id.

use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Id of the table the filter applies to.
    pub table: AttrValue,
    #[prop_or_default]
    pub value: AttrValue,
    #[prop_or_default]
    pub placeholder: AttrValue,
    pub on_filter: Callback<String>,
}

#[function_component(TableFilter)]
pub fn table_filter(p: &Props) -> Html {
    let oninput = {
        let cb = p.on_filter.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            cb.emit(input.value());
        })
    };
    html! {
        <input
            type="search"
            class="form-control form-control-sm table-filter"
            data-table={p.table.clone()}
            placeholder={p.placeholder.clone()}
            aria-label={p.placeholder.clone()}
            value={p.value.clone()}
            {oninput}
        />
    }
}
