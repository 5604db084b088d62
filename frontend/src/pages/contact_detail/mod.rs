mod info;
mod properties;
mod requests;
mod tasks;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::data_table::RoleBadges;
use crate::components::layout::Route;
use crate::components::toast::use_toasts;
use crate::services::contacts;
use haven_shared::Contact;

use info::InfoTab;
use properties::PropertiesTab;
use requests::RequestsTab;
use tasks::TasksTab;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Info,
    Tasks,
    Requests,
    Properties,
}

impl Tab {
    fn all() -> [Tab; 4] {
        [Tab::Info, Tab::Tasks, Tab::Requests, Tab::Properties]
    }

    fn label(&self) -> &'static str {
        match self {
            Tab::Info => "Info",
            Tab::Tasks => "Tasks",
            Tab::Requests => "Requests",
            Tab::Properties => "Properties",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ContactDetailPageProps {
    pub id: i64,
}

#[function_component(ContactDetailPage)]
pub fn contact_detail_page(props: &ContactDetailPageProps) -> Html {
    let toasts = use_toasts();
    let navigator = use_navigator().expect("Navigator not found");
    let contact = use_state(|| None::<Contact>);
    let error = use_state(|| None::<String>);
    let active_tab = use_state(|| Tab::Info);
    // Deleting is a two-click action; the first click arms the button.
    let delete_armed = use_state(|| false);

    {
        let contact = contact.clone();
        let error = error.clone();
        use_effect_with(props.id, move |id| {
            let id = *id;
            contact.set(None);
            error.set(None);
            spawn_local(async move {
                match contacts::get(id).await {
                    Ok(fetched) => contact.set(Some(fetched)),
                    Err(e) => error.set(Some(e.message)),
                }
            });
            || ()
        });
    }

    // Per-module saves return the server's copy of the record.
    let on_updated = {
        let contact = contact.clone();
        Callback::from(move |updated: Contact| contact.set(Some(updated)))
    };

    let on_delete = {
        let delete_armed = delete_armed.clone();
        let navigator = navigator.clone();
        let toasts = toasts.clone();
        let id = props.id;
        Callback::from(move |_: MouseEvent| {
            if !*delete_armed {
                delete_armed.set(true);
                return;
            }
            let delete_armed = delete_armed.clone();
            let navigator = navigator.clone();
            let toasts = toasts.clone();
            spawn_local(async move {
                match contacts::delete(id).await {
                    Ok(()) => {
                        toasts.success("Contact deleted");
                        navigator.push(&Route::Contacts);
                    }
                    Err(e) => {
                        toasts.error(format!("Could not delete contact: {}", e.message));
                        delete_armed.set(false);
                    }
                }
            });
        })
    };

    if let Some(message) = (*error).clone() {
        return html! {
            <div class="p-6 max-w-5xl mx-auto">
                <div class="px-4 py-3 rounded-lg text-sm" style="background-color: var(--color-error-bg); color: var(--color-error);">
                    {message}
                </div>
            </div>
        };
    }

    let Some(current) = (*contact).clone() else {
        return html! {
            <div class="flex justify-center py-12">
                <div class="animate-spin rounded-full h-8 w-8 border-b-2" style="border-color: var(--accent-primary);"></div>
            </div>
        };
    };

    html! {
        <div class="p-6 max-w-5xl mx-auto space-y-4">
            <div class="flex items-center justify-between flex-wrap gap-2">
                <div class="flex items-center space-x-3">
                    <Link<Route> to={Route::Contacts}>
                        <span class="text-sm" style="color: var(--fg-muted);">{"← Contacts"}</span>
                    </Link<Route>>
                    <h1 class="text-2xl font-bold" style="color: var(--fg-primary);">
                        {current.full_name()}
                    </h1>
                    <RoleBadges contact={current.clone()} />
                </div>
                <button
                    onclick={on_delete}
                    class="px-3 py-1.5 rounded-lg text-xs font-medium"
                    style={if *delete_armed {
                        "background-color: var(--color-error); color: var(--button-primary-text);"
                    } else {
                        "background-color: var(--bg-tertiary); color: var(--color-error);"
                    }}
                >
                    {if *delete_armed { "Confirm delete" } else { "Delete contact" }}
                </button>
            </div>

            <div class="flex space-x-1" style="border-bottom: 1px solid var(--border-primary);">
                { for Tab::all().iter().map(|tab| {
                    let tab = *tab;
                    let active = *active_tab == tab;
                    let active_tab = active_tab.clone();
                    let style = if active {
                        "color: var(--accent-primary); border-bottom: 2px solid var(--accent-primary);"
                    } else {
                        "color: var(--fg-muted); border-bottom: 2px solid transparent;"
                    };
                    html! {
                        <button
                            class="px-4 py-2 text-sm font-medium"
                            {style}
                            onclick={Callback::from(move |_| active_tab.set(tab))}
                        >
                            {tab.label()}
                        </button>
                    }
                })}
            </div>

            {match *active_tab {
                Tab::Info => html! { <InfoTab contact={current} on_updated={on_updated} /> },
                Tab::Tasks => html! { <TasksTab contact_id={props.id} /> },
                Tab::Requests => html! { <RequestsTab contact_id={props.id} /> },
                Tab::Properties => html! { <PropertiesTab contact_id={props.id} /> },
            }}
        </div>
    }
}
