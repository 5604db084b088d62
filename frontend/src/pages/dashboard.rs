use std::collections::BTreeMap;

use yew::prelude::*;
use yew_hooks::{use_async_with_options, UseAsyncOptions};
use yew_router::prelude::*;

use crate::components::layout::Route;
use crate::services::stats;

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let summary = use_async_with_options(
        async move { stats::summary().await },
        UseAsyncOptions::enable_auto(),
    );

    html! {
        <div class="p-6 max-w-6xl mx-auto space-y-6">
            <div>
                <h1 class="text-2xl font-bold" style="color: var(--fg-primary);">{"Dashboard"}</h1>
                <p class="text-sm mt-1" style="color: var(--fg-muted);">
                    {"Where your pipeline stands today"}
                </p>
            </div>

            if summary.loading {
                <div class="flex justify-center py-12">
                    <div class="animate-spin rounded-full h-8 w-8 border-b-2" style="border-color: var(--accent-primary);"></div>
                </div>
            } else if let Some(error) = &summary.error {
                <div class="px-4 py-3 rounded-lg text-sm" style="background-color: var(--color-error-bg); color: var(--color-error);">
                    {error.message.clone()}
                </div>
            } else if let Some(data) = &summary.data {
                <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4">
                    <StatCard label="Contacts" value={data.total_contacts} filter={None::<&'static str>} />
                    <StatCard label="Owners" value={data.owners} filter={Some("owner")} />
                    <StatCard label="Buyers" value={data.buyers} filter={Some("buyer")} />
                    <StatCard label="Interested" value={data.interested} filter={Some("interested")} />
                    <StatCard label="Open Tasks" value={data.open_tasks} filter={None::<&'static str>} />
                    <StatCard label="Active Interest Forms" value={data.active_prospects} filter={None::<&'static str>} />
                </div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct StatCardProps {
    label: &'static str,
    value: i64,
    /// When set, clicking the card opens the contact list pre-filtered to
    /// this role.
    filter: Option<&'static str>,
}

#[function_component(StatCard)]
fn stat_card(props: &StatCardProps) -> Html {
    let navigator = use_navigator().expect("Navigator not found");

    let onclick = {
        let filter = props.filter;
        Callback::from(move |_| {
            match filter {
                Some(role) => {
                    let mut query = BTreeMap::new();
                    query.insert("types", role.to_string());
                    let _ = navigator.push_with_query(&Route::Contacts, &query);
                }
                None => navigator.push(&Route::Contacts),
            };
        })
    };

    html! {
        <button
            {onclick}
            class="p-5 rounded-lg text-left hover:opacity-90"
            style="background-color: var(--bg-secondary); border: 1px solid var(--border-primary);"
        >
            <p class="text-sm" style="color: var(--fg-muted);">{props.label}</p>
            <p class="text-3xl font-bold mt-1" style="color: var(--fg-primary);">{props.value}</p>
        </button>
    }
}
