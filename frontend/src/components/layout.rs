use yew::prelude::*;
use yew_router::prelude::*;

use super::session::use_session;
use crate::theme::ThemeSelector;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Dashboard,
    #[at("/login")]
    Login,
    #[at("/contacts")]
    Contacts,
    #[at("/contacts/:id")]
    ContactDetail { id: i64 },
    #[at("/site")]
    SiteSettings,
    #[at("/testimonials")]
    Testimonials,
    #[at("/offices")]
    Offices,
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Html,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let session = use_session();
    let current_route = use_route::<Route>().unwrap_or(Route::Dashboard);
    let show_user_menu = use_state(|| false);

    let toggle_user_menu = {
        let show_user_menu = show_user_menu.clone();
        Callback::from(move |_| show_user_menu.set(!*show_user_menu))
    };

    html! {
        <div class="min-h-screen flex flex-col" style="background-color: var(--bg-primary);">
            <header class="h-14 flex-shrink-0 z-40" style="background-color: var(--bg-secondary); border-bottom: 1px solid var(--border-primary);">
                <div class="h-full flex items-center justify-between px-4">
                    <div class="flex items-center space-x-6">
                        <div class="flex items-center space-x-2">
                            <div class="w-8 h-8 rounded flex items-center justify-center" style="background-color: var(--accent-primary);">
                                <span class="text-white font-bold text-lg">{"H"}</span>
                            </div>
                            <span class="font-semibold text-lg" style="color: var(--fg-primary);">{"Haven"}</span>
                        </div>

                        <nav class="hidden md:flex items-center space-x-1">
                            <NavTab route={Route::Dashboard} label="Dashboard" current={current_route.clone()} />
                            <NavTab route={Route::Contacts} label="Contacts" current={current_route.clone()} />
                            <NavTab route={Route::SiteSettings} label="Website" current={current_route.clone()} />
                            <NavTab route={Route::Testimonials} label="Testimonials" current={current_route.clone()} />
                            <NavTab route={Route::Offices} label="Offices" current={current_route.clone()} />
                        </nav>
                    </div>

                    <div class="flex items-center space-x-4">
                        <ThemeSelector />

                        <div class="relative">
                            <button
                                onclick={toggle_user_menu}
                                class="flex items-center space-x-2"
                                style="color: var(--fg-secondary);"
                            >
                                <div class="w-8 h-8 rounded-full flex items-center justify-center" style="background-color: var(--accent-primary);">
                                    <span class="text-white text-sm font-medium">
                                        {session.user.as_ref().map(|u| u.first_name.chars().next().unwrap_or('U')).unwrap_or('U')}
                                    </span>
                                </div>
                                <svg class="w-4 h-4" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                                    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M19 9l-7 7-7-7"/>
                                </svg>
                            </button>

                            if *show_user_menu {
                                <div class="absolute right-0 mt-2 w-56 rounded-lg shadow-lg py-2 z-50" style="background-color: var(--bg-secondary); border: 1px solid var(--border-primary);">
                                    <div class="px-4 py-3" style="border-bottom: 1px solid var(--border-primary);">
                                        <p class="font-medium" style="color: var(--fg-primary);">
                                            {session.user.as_ref().map(|u| format!("{} {}", u.first_name, u.last_name)).unwrap_or_else(|| "User".to_string())}
                                        </p>
                                        <p class="text-sm" style="color: var(--fg-muted);">
                                            {session.user.as_ref().map(|u| u.email.clone()).unwrap_or_default()}
                                        </p>
                                    </div>
                                    <button
                                        onclick={session.logout.reform(|_| ())}
                                        class="w-full text-left px-4 py-2 text-sm hover:opacity-80"
                                        style="color: var(--color-error);"
                                    >
                                        {"Sign Out"}
                                    </button>
                                </div>
                            }
                        </div>
                    </div>
                </div>
            </header>

            <main class="flex-1 overflow-auto">
                { props.children.clone() }
            </main>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct NavTabProps {
    route: Route,
    label: &'static str,
    current: Route,
}

#[function_component(NavTab)]
fn nav_tab(props: &NavTabProps) -> Html {
    // Contact detail highlights the Contacts tab.
    let is_active = props.route == props.current
        || (props.route == Route::Contacts
            && matches!(props.current, Route::ContactDetail { .. }));
    let style = if is_active {
        "color: var(--fg-primary); border-bottom: 2px solid var(--accent-primary);"
    } else {
        "color: var(--fg-muted); border-bottom: 2px solid transparent;"
    };

    html! {
        <span class="px-3 py-2 text-sm font-medium inline-block" {style}>
            <Link<Route> to={props.route.clone()}>
                {props.label}
            </Link<Route>>
        </span>
    }
}
