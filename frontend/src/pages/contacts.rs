// Contact list: one fetch per mount, then filtering, sorting and searching
// happen entirely client-side. The active filter mirrors into the URL query
// so back/forward and reloads restore the same view.

use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::data_table::{ContactTable, RoleBadges};
use crate::components::layout::Route;
use crate::components::toast::use_toasts;
use crate::services::contacts;
use crate::state::filters::{ContactFilter, ContactType, SortKey};
use haven_shared::Contact;

#[derive(Clone, Copy, PartialEq, Eq)]
enum ViewMode {
    Grid,
    Table,
}

#[function_component(ContactsPage)]
pub fn contacts_page() -> Html {
    let navigator = use_navigator().expect("Navigator not found");
    let location = use_location();
    let toasts = use_toasts();

    let contacts = use_state(Vec::<Contact>::new);
    let loading = use_state(|| true);
    let error = use_state(|| None::<String>);
    let filter = use_state(|| {
        location
            .as_ref()
            .map(|l| ContactFilter::from_query(l.query_str()))
            .unwrap_or_default()
    });
    let view_mode = use_state(|| ViewMode::Table);
    let show_filter_menu = use_state(|| false);
    let show_create_modal = use_state(|| false);

    {
        let contacts = contacts.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match contacts::list().await {
                    Ok(list) => contacts.set(list),
                    Err(e) => error.set(Some(e.message)),
                }
                loading.set(false);
            });
            || ()
        });
    }

    // Every filter change lands in the URL so the view is shareable.
    let apply_filter = {
        let filter = filter.clone();
        let navigator = navigator.clone();
        Callback::from(move |next: ContactFilter| {
            if next.is_empty() {
                navigator.replace(&Route::Contacts);
            } else {
                let _ = navigator.replace_with_query(&Route::Contacts, &next.to_pairs());
            }
            filter.set(next);
        })
    };

    let on_search = {
        let filter = filter.clone();
        let apply_filter = apply_filter.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*filter).clone();
            next.search = input.value();
            apply_filter.emit(next);
        })
    };

    let on_toggle_type = {
        let filter = filter.clone();
        let apply_filter = apply_filter.clone();
        Callback::from(move |contact_type: ContactType| {
            let mut next = (*filter).clone();
            next.toggle_type(contact_type);
            apply_filter.emit(next);
        })
    };

    let on_sort = {
        let filter = filter.clone();
        let apply_filter = apply_filter.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*filter).clone();
            next.sort = SortKey::from_str(&select.value()).unwrap_or_default();
            apply_filter.emit(next);
        })
    };

    let on_clear = {
        let apply_filter = apply_filter.clone();
        Callback::from(move |_: MouseEvent| apply_filter.emit(ContactFilter::default()))
    };

    let on_select = {
        let navigator = navigator.clone();
        Callback::from(move |id: i64| navigator.push(&Route::ContactDetail { id }))
    };

    let on_created = {
        let contacts = contacts.clone();
        let navigator = navigator.clone();
        let show_create_modal = show_create_modal.clone();
        let toasts = toasts.clone();
        Callback::from(move |created: Contact| {
            let mut current = (*contacts).clone();
            current.insert(0, created.clone());
            contacts.set(current);
            show_create_modal.set(false);
            toasts.success("Contact created");
            navigator.push(&Route::ContactDetail { id: created.id });
        })
    };

    let visible = filter.apply(&contacts);
    let owner_count = contacts.iter().filter(|c| ContactType::Owner.matches(c)).count();
    let buyer_count = contacts.iter().filter(|c| ContactType::Buyer.matches(c)).count();
    let interested_count = contacts
        .iter()
        .filter(|c| ContactType::Interested.matches(c))
        .count();

    html! {
        <div class="p-6 max-w-7xl mx-auto space-y-4">
            <div class="flex items-center justify-between flex-wrap gap-3">
                <div>
                    <h1 class="text-2xl font-bold" style="color: var(--fg-primary);">{"Contacts"}</h1>
                    <p class="text-sm mt-1" style="color: var(--fg-muted);">
                        {format!("{} total · {} owners · {} buyers · {} interested",
                            contacts.len(), owner_count, buyer_count, interested_count)}
                    </p>
                </div>
                <button
                    onclick={{
                        let show_create_modal = show_create_modal.clone();
                        Callback::from(move |_| show_create_modal.set(true))
                    }}
                    class="px-4 py-2 rounded-lg text-sm font-medium"
                    style="background-color: var(--button-primary-bg); color: var(--button-primary-text);"
                >
                    {"+ New Contact"}
                </button>
            </div>

            <div class="flex items-center gap-2 flex-wrap">
                <input
                    type="text"
                    placeholder="Search by name, email or phone..."
                    class="flex-1 min-w-64 px-3 py-2 rounded-lg text-sm"
                    style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                    value={filter.search.clone()}
                    oninput={on_search}
                />

                <div class="relative">
                    <button
                        onclick={{
                            let show_filter_menu = show_filter_menu.clone();
                            Callback::from(move |_| show_filter_menu.set(!*show_filter_menu))
                        }}
                        class="px-3 py-2 rounded-lg text-sm"
                        style={if filter.types.is_empty() {
                            "background-color: var(--bg-secondary); border: 1px solid var(--border-primary); color: var(--fg-secondary);"
                        } else {
                            "background-color: var(--bg-secondary); border: 1px solid var(--accent-primary); color: var(--accent-primary);"
                        }}
                    >
                        {if filter.types.is_empty() {
                            "Filter".to_string()
                        } else {
                            format!("Filter ({})", filter.types.len())
                        }}
                    </button>

                    if *show_filter_menu {
                        <div class="absolute right-0 mt-2 w-56 rounded-lg shadow-lg p-3 z-30 space-y-3" style="background-color: var(--bg-secondary); border: 1px solid var(--border-primary);">
                            <div class="space-y-1">
                                <p class="text-xs font-medium uppercase" style="color: var(--fg-muted);">{"Role"}</p>
                                { for ContactType::all().iter().map(|ct| {
                                    let ct = *ct;
                                    let checked = filter.types.contains(&ct);
                                    let on_toggle_type = on_toggle_type.clone();
                                    html! {
                                        <label class="flex items-center space-x-2 text-sm py-0.5 cursor-pointer" style="color: var(--fg-secondary);">
                                            <input
                                                type="checkbox"
                                                checked={checked}
                                                onchange={Callback::from(move |_| on_toggle_type.emit(ct))}
                                            />
                                            <span>{ct.label()}</span>
                                        </label>
                                    }
                                })}
                            </div>
                            <div class="space-y-1">
                                <p class="text-xs font-medium uppercase" style="color: var(--fg-muted);">{"Sort"}</p>
                                <select
                                    class="w-full px-2 py-1.5 rounded text-sm"
                                    style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                                    onchange={on_sort}
                                >
                                    { for [SortKey::Name, SortKey::Newest, SortKey::Oldest].iter().map(|key| html! {
                                        <option value={key.as_str()} selected={filter.sort == *key}>
                                            {key.label()}
                                        </option>
                                    })}
                                </select>
                            </div>
                            if !filter.is_empty() {
                                <button
                                    onclick={on_clear}
                                    class="w-full text-left text-sm py-1"
                                    style="color: var(--color-error);"
                                >
                                    {"Clear all filters"}
                                </button>
                            }
                        </div>
                    }
                </div>

                <div class="flex rounded-lg overflow-hidden" style="border: 1px solid var(--border-primary);">
                    <ViewToggle label="Table" active={*view_mode == ViewMode::Table} onclick={{
                        let view_mode = view_mode.clone();
                        Callback::from(move |_| view_mode.set(ViewMode::Table))
                    }} />
                    <ViewToggle label="Grid" active={*view_mode == ViewMode::Grid} onclick={{
                        let view_mode = view_mode.clone();
                        Callback::from(move |_| view_mode.set(ViewMode::Grid))
                    }} />
                </div>
            </div>

            if *loading {
                <div class="flex justify-center py-12">
                    <div class="animate-spin rounded-full h-8 w-8 border-b-2" style="border-color: var(--accent-primary);"></div>
                </div>
            } else if let Some(message) = (*error).clone() {
                <div class="px-4 py-3 rounded-lg text-sm" style="background-color: var(--color-error-bg); color: var(--color-error);">
                    {message}
                </div>
            } else if *view_mode == ViewMode::Table {
                <ContactTable contacts={visible} on_select={on_select} />
            } else {
                <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4">
                    { for visible.iter().map(|contact| {
                        let id = contact.id;
                        let on_select = on_select.clone();
                        html! {
                            <div
                                key={id}
                                class="p-4 rounded-lg cursor-pointer hover:opacity-90 space-y-2"
                                style="background-color: var(--bg-secondary); border: 1px solid var(--border-primary);"
                                onclick={Callback::from(move |_| on_select.emit(id))}
                            >
                                <div class="flex items-center justify-between">
                                    <p class="font-medium" style="color: var(--fg-primary);">{contact.full_name()}</p>
                                    <RoleBadges contact={contact.clone()} />
                                </div>
                                if let Some(email) = &contact.email {
                                    <p class="text-sm truncate" style="color: var(--fg-secondary);">{email.clone()}</p>
                                }
                                if let Some(phone) = &contact.phone {
                                    <p class="text-sm" style="color: var(--fg-muted);">{phone.clone()}</p>
                                }
                            </div>
                        }
                    })}
                    if visible.is_empty() {
                        <div class="col-span-full p-8 text-center text-sm" style="color: var(--fg-muted);">
                            {"No contacts match the current filters"}
                        </div>
                    }
                </div>
            }

            if *show_create_modal {
                <CreateContactModal
                    on_created={on_created}
                    on_close={{
                        let show_create_modal = show_create_modal.clone();
                        Callback::from(move |_| show_create_modal.set(false))
                    }}
                />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ViewToggleProps {
    label: &'static str,
    active: bool,
    onclick: Callback<MouseEvent>,
}

#[function_component(ViewToggle)]
fn view_toggle(props: &ViewToggleProps) -> Html {
    let style = if props.active {
        "background-color: var(--accent-primary); color: white;"
    } else {
        "background-color: var(--bg-secondary); color: var(--fg-muted);"
    };
    html! {
        <button onclick={props.onclick.clone()} class="px-3 py-2 text-sm" {style}>
            {props.label}
        </button>
    }
}

#[derive(Properties, PartialEq)]
struct CreateContactModalProps {
    on_created: Callback<Contact>,
    on_close: Callback<()>,
}

#[function_component(CreateContactModal)]
fn create_contact_modal(props: &CreateContactModalProps) -> Html {
    let first_name = use_state(String::new);
    let last_name = use_state(String::new);
    let email = use_state(String::new);
    let phone = use_state(String::new);
    let saving = use_state(|| false);
    let error = use_state(|| None::<String>);

    let onsubmit = {
        let first_name = first_name.clone();
        let last_name = last_name.clone();
        let email = email.clone();
        let phone = phone.clone();
        let saving = saving.clone();
        let error = error.clone();
        let on_created = props.on_created.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving {
                return;
            }
            if first_name.is_empty() || last_name.is_empty() {
                error.set(Some("First and last name are required".to_string()));
                return;
            }

            saving.set(true);
            error.set(None);

            let request = contacts::CreateContactRequest {
                first_name: (*first_name).clone(),
                last_name: (*last_name).clone(),
                email: (!email.is_empty()).then(|| (*email).clone()),
                phone: (!phone.is_empty()).then(|| (*phone).clone()),
            };
            let saving = saving.clone();
            let error = error.clone();
            let on_created = on_created.clone();
            spawn_local(async move {
                match contacts::create(&request).await {
                    Ok(created) => {
                        saving.set(false);
                        on_created.emit(created);
                    }
                    Err(e) => {
                        saving.set(false);
                        error.set(Some(e.message));
                    }
                }
            });
        })
    };

    let text_input = |label: &'static str,
                      state: UseStateHandle<String>,
                      input_type: &'static str,
                      required: bool| {
        let oninput = {
            let state = state.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                state.set(input.value());
            })
        };
        html! {
            <div>
                <label class="block text-sm font-medium mb-1" style="color: var(--fg-secondary);">
                    {label}
                </label>
                <input
                    type={input_type}
                    required={required}
                    class="w-full px-3 py-2 rounded-lg text-sm"
                    style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                    value={(*state).clone()}
                    {oninput}
                />
            </div>
        }
    };

    html! {
        <div class="fixed inset-0 z-50 flex items-center justify-center p-4" style="background-color: rgba(0, 0, 0, 0.5);">
            <div class="w-full max-w-md rounded-lg p-6 space-y-4" style="background-color: var(--bg-secondary); border: 1px solid var(--border-primary);">
                <div class="flex items-center justify-between">
                    <h2 class="text-lg font-semibold" style="color: var(--fg-primary);">{"New Contact"}</h2>
                    <button
                        onclick={props.on_close.reform(|_| ())}
                        style="color: var(--fg-muted);"
                    >
                        {"✕"}
                    </button>
                </div>

                <form class="space-y-3" {onsubmit}>
                    <div class="grid grid-cols-2 gap-3">
                        {text_input("First name", first_name.clone(), "text", true)}
                        {text_input("Last name", last_name.clone(), "text", true)}
                    </div>
                    {text_input("Email", email.clone(), "email", false)}
                    {text_input("Phone", phone.clone(), "tel", false)}

                    if let Some(message) = (*error).clone() {
                        <div class="px-3 py-2 rounded-lg text-sm" style="background-color: var(--color-error-bg); color: var(--color-error);">
                            {message}
                        </div>
                    }

                    <div class="flex justify-end space-x-2 pt-2">
                        <button
                            type="button"
                            onclick={props.on_close.reform(|_| ())}
                            class="px-4 py-2 rounded-lg text-sm"
                            style="background-color: var(--bg-tertiary); color: var(--fg-secondary);"
                        >
                            {"Cancel"}
                        </button>
                        <button
                            type="submit"
                            disabled={*saving}
                            class="px-4 py-2 rounded-lg text-sm font-medium disabled:opacity-50"
                            style="background-color: var(--button-primary-bg); color: var(--button-primary-text);"
                        >
                            {if *saving { "Creating..." } else { "Create" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
