// Office directory editor. The nested address/contact record is edited
// through typed field lenses, so every path is checked at compile time.

use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::toast::use_toasts;
use crate::services::offices;
use crate::state::form::{Field, FormState};
use haven_shared::{Office, OfficeRequest};

type OfficeField = Field<OfficeRequest, String>;
type OptOfficeField = Field<OfficeRequest, Option<String>>;

const NAME: OfficeField = Field::new(|o| &o.name, |o, v| o.name = v);
const STREET: OfficeField = Field::new(|o| &o.address.street, |o, v| o.address.street = v);
const CITY: OfficeField = Field::new(|o| &o.address.city, |o, v| o.address.city = v);
const POSTAL_CODE: OfficeField =
    Field::new(|o| &o.address.postal_code, |o, v| o.address.postal_code = v);
const STATE: OptOfficeField = Field::new(|o| &o.address.state, |o, v| o.address.state = v);
const COUNTRY: OptOfficeField = Field::new(|o| &o.address.country, |o, v| o.address.country = v);
const PHONE: OptOfficeField = Field::new(|o| &o.contact.phone, |o, v| o.contact.phone = v);
const EMAIL: OptOfficeField = Field::new(|o| &o.contact.email, |o, v| o.contact.email = v);
const HOURS: OptOfficeField = Field::new(|o| &o.hours, |o, v| o.hours = v);
const IS_DEFAULT: Field<OfficeRequest, bool> =
    Field::new(|o| &o.is_default, |o, v| o.is_default = v);

fn request_from(office: &Office) -> OfficeRequest {
    OfficeRequest {
        name: office.name.clone(),
        address: office.address.clone(),
        contact: office.contact.clone(),
        hours: office.hours.clone(),
        is_default: office.is_default,
    }
}

// The save and delete continuations land after renders their handlers never
// saw, so the directory is driven through a reducer rather than `set()` on a
// stale clone.
#[derive(Clone, PartialEq, Default)]
struct Directory {
    offices: Vec<Office>,
}

enum DirectoryAction {
    Load(Vec<Office>),
    Upsert(Office),
    Remove(i64),
}

impl yew::functional::Reducible for Directory {
    type Action = DirectoryAction;

    fn reduce(self: Rc<Self>, action: DirectoryAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            DirectoryAction::Load(offices) => next.offices = offices,
            DirectoryAction::Upsert(saved) => {
                match next.offices.iter().position(|o| o.id == saved.id) {
                    Some(index) => next.offices[index] = saved,
                    None => next.offices.push(saved),
                }
            }
            DirectoryAction::Remove(id) => next.offices.retain(|o| o.id != id),
        }
        Rc::new(next)
    }
}

#[function_component(OfficesPage)]
pub fn offices_page() -> Html {
    let toasts = use_toasts();
    let list = use_reducer(Directory::default);
    let loading = use_state(|| true);
    // `None` means the editor is composing a new office.
    let selected = use_state(|| None::<i64>);
    let form = use_state(|| FormState::new(OfficeRequest::default()));
    let saving = use_state(|| false);

    {
        let list = list.clone();
        let loading = loading.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                if let Ok(fetched) = offices::list().await {
                    list.dispatch(DirectoryAction::Load(fetched));
                }
                loading.set(false);
            });
            || ()
        });
    }

    let on_select = {
        let list = list.clone();
        let selected = selected.clone();
        let form = form.clone();
        Callback::from(move |id: i64| {
            if let Some(office) = list.offices.iter().find(|o| o.id == id) {
                let mut next = (*form).clone();
                next.reset(request_from(office));
                form.set(next);
                selected.set(Some(id));
            }
        })
    };

    let on_new = {
        let selected = selected.clone();
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*form).clone();
            next.reset(OfficeRequest::default());
            form.set(next);
            selected.set(None);
        })
    };

    let on_save = {
        let list = list.clone();
        let selected = selected.clone();
        let form = form.clone();
        let saving = saving.clone();
        let toasts = toasts.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving || !form.is_dirty() || form.value().name.is_empty() {
                return;
            }
            saving.set(true);

            let request = form.value().clone();
            let existing_id = *selected;
            let list = list.clone();
            let selected = selected.clone();
            let form = form.clone();
            let saving = saving.clone();
            let toasts = toasts.clone();
            spawn_local(async move {
                let result = match existing_id {
                    Some(id) => offices::update(id, &request).await,
                    None => offices::create(&request).await,
                };
                match result {
                    Ok(saved) => {
                        selected.set(Some(saved.id));
                        let mut next = (*form).clone();
                        next.reset(request_from(&saved));
                        form.set(next);
                        list.dispatch(DirectoryAction::Upsert(saved));
                        toasts.success("Office saved");
                    }
                    Err(e) => toasts.error(format!("Could not save office: {}", e.message)),
                }
                saving.set(false);
            });
        })
    };

    let on_delete = {
        let list = list.clone();
        let selected = selected.clone();
        let form = form.clone();
        let toasts = toasts.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(id) = *selected else { return };
            let list = list.clone();
            let selected = selected.clone();
            let form = form.clone();
            let toasts = toasts.clone();
            spawn_local(async move {
                match offices::delete(id).await {
                    Ok(()) => {
                        list.dispatch(DirectoryAction::Remove(id));
                        selected.set(None);
                        let mut next = (*form).clone();
                        next.reset(OfficeRequest::default());
                        form.set(next);
                        toasts.success("Office deleted");
                    }
                    Err(e) => toasts.error(format!("Could not delete office: {}", e.message)),
                }
            });
        })
    };

    let bind = {
        let form = form.clone();
        move |field: OfficeField| {
            let form = form.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                let mut next = (*form).clone();
                next.set(field, input.value());
                form.set(next);
            })
        }
    };

    let bind_opt = {
        let form = form.clone();
        move |field: OptOfficeField| {
            let form = form.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                let value = input.value();
                let mut next = (*form).clone();
                next.set(field, (!value.is_empty()).then_some(value));
                form.set(next);
            })
        }
    };

    let text_field = |label: &'static str, field: OfficeField| {
        html! {
            <div>
                <label class="block text-sm font-medium mb-1" style="color: var(--fg-secondary);">
                    {label}
                </label>
                <input
                    type="text"
                    class="w-full px-3 py-2 rounded-lg text-sm"
                    style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                    value={form.get(field).clone()}
                    oninput={bind(field)}
                />
            </div>
        }
    };

    let opt_field = |label: &'static str, field: OptOfficeField| {
        html! {
            <div>
                <label class="block text-sm font-medium mb-1" style="color: var(--fg-secondary);">
                    {label}
                </label>
                <input
                    type="text"
                    class="w-full px-3 py-2 rounded-lg text-sm"
                    style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                    value={form.get(field).clone().unwrap_or_default()}
                    oninput={bind_opt(field)}
                />
            </div>
        }
    };

    let on_toggle_default = {
        let form = form.clone();
        Callback::from(move |_: Event| {
            let mut next = (*form).clone();
            let flipped = !next.value().is_default;
            next.set(IS_DEFAULT, flipped);
            form.set(next);
        })
    };

    html! {
        <div class="p-6 max-w-5xl mx-auto space-y-4">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold" style="color: var(--fg-primary);">{"Offices"}</h1>
                <button
                    onclick={on_new}
                    class="px-4 py-2 rounded-lg text-sm font-medium"
                    style="background-color: var(--button-primary-bg); color: var(--button-primary-text);"
                >
                    {"+ New Office"}
                </button>
            </div>

            if *loading {
                <div class="flex justify-center py-12">
                    <div class="animate-spin rounded-full h-8 w-8 border-b-2" style="border-color: var(--accent-primary);"></div>
                </div>
            } else {
                <div class="flex gap-4">
                    <div class="w-64 flex-shrink-0 space-y-2">
                        { for list.offices.iter().map(|office| {
                            let id = office.id;
                            let active = *selected == Some(id);
                            let on_select = on_select.clone();
                            html! {
                                <button
                                    key={id}
                                    class="w-full text-left p-3 rounded-lg"
                                    style={if active {
                                        "background-color: var(--bg-highlight); border: 1px solid var(--accent-primary);"
                                    } else {
                                        "background-color: var(--bg-secondary); border: 1px solid var(--border-primary);"
                                    }}
                                    onclick={Callback::from(move |_| on_select.emit(id))}
                                >
                                    <p class="text-sm font-medium" style="color: var(--fg-primary);">
                                        {&office.name}
                                        if office.is_default {
                                            <span class="ml-1 text-xs" style="color: var(--accent-primary);">{"(main)"}</span>
                                        }
                                    </p>
                                    <p class="text-xs" style="color: var(--fg-muted);">
                                        {format!("{}, {}", office.address.street, office.address.city)}
                                    </p>
                                </button>
                            }
                        })}
                        if list.offices.is_empty() {
                            <p class="text-sm p-2" style="color: var(--fg-muted);">{"No offices yet"}</p>
                        }
                    </div>

                    <form
                        class="flex-1 rounded-lg p-4 space-y-3"
                        style="background-color: var(--bg-secondary); border: 1px solid var(--border-primary);"
                        onsubmit={on_save}
                    >
                        <div class="flex items-center justify-between">
                            <h2 class="font-semibold" style="color: var(--fg-primary);">
                                {if selected.is_some() { "Edit Office" } else { "New Office" }}
                            </h2>
                            <div class="flex items-center space-x-2">
                                if selected.is_some() {
                                    <button
                                        type="button"
                                        onclick={on_delete}
                                        class="text-xs"
                                        style="color: var(--color-error);"
                                    >
                                        {"Delete"}
                                    </button>
                                }
                                <button
                                    type="submit"
                                    disabled={*saving || !form.is_dirty()}
                                    class="px-3 py-1.5 rounded-lg text-sm font-medium disabled:opacity-40"
                                    style="background-color: var(--button-primary-bg); color: var(--button-primary-text);"
                                >
                                    {if *saving { "Saving..." } else { "Save" }}
                                </button>
                            </div>
                        </div>

                        {text_field("Name", NAME)}
                        <div class="grid grid-cols-2 gap-3">
                            {text_field("Street", STREET)}
                            {text_field("City", CITY)}
                            {text_field("Postal code", POSTAL_CODE)}
                            {opt_field("State / province", STATE)}
                            {opt_field("Country", COUNTRY)}
                            {opt_field("Phone", PHONE)}
                            {opt_field("Email", EMAIL)}
                            {opt_field("Opening hours", HOURS)}
                        </div>
                        <label class="flex items-center space-x-2 text-sm cursor-pointer" style="color: var(--fg-secondary);">
                            <input
                                type="checkbox"
                                checked={form.value().is_default}
                                onchange={on_toggle_default}
                            />
                            <span>{"Main office"}</span>
                        </label>
                    </form>
                </div>
            }
        </div>
    }
}
