pub mod contact_detail;
pub mod contacts;
pub mod dashboard;
pub mod offices;
pub mod site_settings;
pub mod testimonials;

use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::layout::Route;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <div class="flex flex-col items-center justify-center py-24 space-y-4">
            <h1 class="text-4xl font-bold" style="color: var(--fg-primary);">{"404"}</h1>
            <p style="color: var(--fg-muted);">{"This page does not exist"}</p>
            <Link<Route> to={Route::Dashboard}>
                <span class="text-sm" style="color: var(--accent-primary);">{"Back to dashboard"}</span>
            </Link<Route>>
        </div>
    }
}
