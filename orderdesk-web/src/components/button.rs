use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub label: AttrValue,
    #[prop_or_default]
    pub onclick: Callback<MouseEvent>,
    #[prop_or(AttrValue::Static("btn btn-primary"))]
    pub class: AttrValue,
    #[prop_or_default]
    pub id: Option<AttrValue>,
    #[prop_or_default]
    pub pressed: Option<bool>,
}

/// A `type="button"` button, so it never submits the surrounding order form.
#[function_component(Button)]
pub fn button(p: &Props) -> Html {
    let onclick = p.onclick.clone();
    let pressed = p.pressed.map(|v| AttrValue::from(v.to_string()));
    html! {
        <button type="button" id={p.id.clone()} class={p.class.clone()} aria-pressed={pressed} {onclick}>
            { p.label.clone() }
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn button_renders_label_and_never_submits() {
        let props = Props {
            label: AttrValue::from("Add to order"),
            onclick: Callback::noop(),
            class: AttrValue::from("btn btn-success"),
            id: None,
            pressed: None,
        };
        let html = block_on(LocalServerRenderer::<Button>::with_props(props).render());
        assert!(html.contains("Add to order"));
        assert!(html.contains(r#"type="button""#));
        assert!(!html.contains("aria-pressed"));
    }
}
