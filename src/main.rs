use log::{info, Level};
use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod hooks;
mod stats;
mod utils;

mod contact {
    pub mod attachments;
    pub mod payload;
    pub mod submission;
    pub mod tags;
    pub mod verification;
    pub mod web;
}

mod components {
    pub mod about;
    pub mod captcha;
    pub mod contact_form;
    pub mod embers;
    pub mod hero;
    pub mod lightbox;
    pub mod overlay_scrollbar;
    pub mod stats_panel;
    pub mod testimonials;
    pub mod works;
}

mod pages {
    pub mod home;
    pub mod not_found;
}

use pages::{home::Home, not_found::NotFound};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        }
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! { <NotFound /> }
        }
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    console_error_panic_hook::set_once();

    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
