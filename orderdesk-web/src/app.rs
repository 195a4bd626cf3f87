use crate::bootstrap::BootstrapData;
use crate::components::header::Header;
use crate::i18n::{self, UiLang};
use crate::pages::dashboard::DashboardPage;
use crate::pages::not_found::NotFoundPage;
use crate::pages::order_new::OrderNewPage;
use crate::router::Route;
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub data: Rc<BootstrapData>,
}

/// Main application component providing browser routing.
#[function_component(App)]
pub fn app(p: &Props) -> Html {
    let data = p.data.clone();
    let render = Callback::from(move |route: Route| {
        html! { <Layout {route} data={data.clone()} /> }
    });
    html! {
        <BrowserRouter>
            <Switch<Route> {render} />
        </BrowserRouter>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct LayoutProps {
    pub route: Route,
    pub data: Rc<BootstrapData>,
}

/// Header plus the page for `route`. Needs no router context.
#[function_component(Layout)]
pub fn layout(p: &LayoutProps) -> Html {
    let lang = use_state(i18n::current_lang);
    let on_lang_change = {
        let lang = lang.clone();
        Callback::from(move |code: String| lang.set(code))
    };
    let data = &p.data;
    let page = match p.route {
        Route::Home | Route::NewOrder => html! {
            <OrderNewPage
                config={data.config.clone()}
                customers={Rc::<[_]>::from(data.customers.clone())}
                products={Rc::<[_]>::from(data.products.clone())}
            />
        },
        Route::Dashboard => html! {
            <DashboardPage data={Rc::new(data.dashboard.clone())} currency={data.config.currency.clone()} />
        },
        Route::NotFound => html! { <NotFoundPage /> },
    };
    html! {
        <ContextProvider<UiLang> context={UiLang((*lang).clone())}>
            <Header current_lang={(*lang).clone()} {on_lang_change} />
            <main id="main" role="main" class="container" lang={(*lang).clone()}>
                { page }
            </main>
        </ContextProvider<UiLang>>
    }
}
