mod components;
mod pages;
mod services;
mod state;
mod theme;

use yew::prelude::*;
use yew_router::prelude::*;

use components::layout::{Layout, Route};
use components::session::{use_session, LoginForm, SessionProvider};
use components::toast::ToastProvider;
use pages::contact_detail::ContactDetailPage;
use pages::contacts::ContactsPage;
use pages::dashboard::DashboardPage;
use pages::offices::OfficesPage;
use pages::site_settings::SiteSettingsPage;
use pages::testimonials::TestimonialsPage;
use pages::NotFoundPage;
use theme::ThemeProvider;

fn switch(route: Route) -> Html {
    match route {
        Route::Dashboard => html! { <DashboardPage /> },
        // An authenticated visit to /login just goes home.
        Route::Login => html! { <Redirect<Route> to={Route::Dashboard} /> },
        Route::Contacts => html! { <ContactsPage /> },
        Route::ContactDetail { id } => html! { <ContactDetailPage {id} /> },
        Route::SiteSettings => html! { <SiteSettingsPage /> },
        Route::Testimonials => html! { <TestimonialsPage /> },
        Route::Offices => html! { <OfficesPage /> },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}

#[function_component(Shell)]
fn shell() -> Html {
    let session = use_session();

    if session.user.is_none() {
        return html! { <LoginForm on_login={session.login.clone()} /> };
    }

    html! {
        <Layout>
            <Switch<Route> render={switch} />
        </Layout>
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <ThemeProvider>
            <ToastProvider>
                <SessionProvider>
                    <BrowserRouter>
                        <Shell />
                    </BrowserRouter>
                </SessionProvider>
            </ToastProvider>
        </ThemeProvider>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
