// Properties tab: listings this contact owns or is buying, with add/remove
// through a compact listing picker.

use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::toast::use_toasts;
use crate::services::listings;
use haven_shared::Listing;

// Link and unlink settle after renders their handlers never saw, so the
// section list is driven through a reducer rather than `set()` on a stale
// clone.
#[derive(Clone, PartialEq, Default)]
struct LinkedListings {
    listings: Vec<Listing>,
}

enum LinkAction {
    Load(Vec<Listing>),
    Link(Listing),
    Unlink(i64),
}

impl yew::functional::Reducible for LinkedListings {
    type Action = LinkAction;

    fn reduce(self: Rc<Self>, action: LinkAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            LinkAction::Load(listings) => next.listings = listings,
            LinkAction::Link(listing) => {
                if !next.listings.iter().any(|l| l.id == listing.id) {
                    next.listings.push(listing);
                }
            }
            LinkAction::Unlink(id) => next.listings.retain(|l| l.id != id),
        }
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq)]
pub struct PropertiesTabProps {
    pub contact_id: i64,
}

#[function_component(PropertiesTab)]
pub fn properties_tab(props: &PropertiesTabProps) -> Html {
    html! {
        <div class="space-y-4">
            <RelationshipSection
                contact_id={props.contact_id}
                relationship="owner"
                title="Owned Properties"
            />
            <RelationshipSection
                contact_id={props.contact_id}
                relationship="buyer"
                title="Buying Interest"
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct RelationshipSectionProps {
    contact_id: i64,
    relationship: &'static str,
    title: &'static str,
}

#[function_component(RelationshipSection)]
fn relationship_section(props: &RelationshipSectionProps) -> Html {
    let toasts = use_toasts();
    let list = use_reducer(LinkedListings::default);
    let show_picker = use_state(|| false);

    {
        let list = list.clone();
        let relationship = props.relationship;
        use_effect_with(props.contact_id, move |id| {
            let id = *id;
            spawn_local(async move {
                let result = match relationship {
                    "owner" => listings::owner_listings_for_contact(id).await,
                    _ => listings::buyer_listings_for_contact(id).await,
                };
                if let Ok(fetched) = result {
                    list.dispatch(LinkAction::Load(fetched));
                }
            });
            || ()
        });
    }

    let on_picked = {
        let list = list.clone();
        let show_picker = show_picker.clone();
        let toasts = toasts.clone();
        let contact_id = props.contact_id;
        let relationship = props.relationship;
        Callback::from(move |listing: Listing| {
            show_picker.set(false);
            if list.listings.iter().any(|l| l.id == listing.id) {
                return;
            }
            let list = list.clone();
            let toasts = toasts.clone();
            spawn_local(async move {
                match listings::add_contact_relationship(listing.id, contact_id, relationship)
                    .await
                {
                    Ok(_) => {
                        list.dispatch(LinkAction::Link(listing));
                        toasts.success("Property linked");
                    }
                    Err(e) => {
                        toasts.error(format!("Could not link property: {}", e.message));
                    }
                }
            });
        })
    };

    let on_remove = {
        let list = list.clone();
        let toasts = toasts.clone();
        let contact_id = props.contact_id;
        let relationship = props.relationship;
        Callback::from(move |listing_id: i64| {
            let list = list.clone();
            let toasts = toasts.clone();
            spawn_local(async move {
                match listings::remove_contact_relationship(listing_id, contact_id, relationship)
                    .await
                {
                    Ok(()) => list.dispatch(LinkAction::Unlink(listing_id)),
                    Err(e) => {
                        toasts.error(format!("Could not unlink property: {}", e.message));
                    }
                }
            });
        })
    };

    html! {
        <div class="rounded-lg p-4 space-y-3" style="background-color: var(--bg-secondary); border: 1px solid var(--border-primary);">
            <div class="flex items-center justify-between">
                <h2 class="font-semibold" style="color: var(--fg-primary);">{props.title}</h2>
                <button
                    onclick={{
                        let show_picker = show_picker.clone();
                        Callback::from(move |_| show_picker.set(true))
                    }}
                    class="px-3 py-1.5 rounded-lg text-sm font-medium"
                    style="background-color: var(--button-primary-bg); color: var(--button-primary-text);"
                >
                    {"+ Link Property"}
                </button>
            </div>

            <div class="space-y-2">
                { for list.listings.iter().map(|listing| {
                    let id = listing.id;
                    html! {
                        <div
                            key={id}
                            class="flex items-center justify-between p-3 rounded-lg"
                            style="background-color: var(--bg-tertiary);"
                        >
                            <div>
                                <p class="text-sm font-medium" style="color: var(--fg-primary);">
                                    {format!("{}, {}", listing.street, listing.city)}
                                </p>
                                <p class="text-xs" style="color: var(--fg-muted);">
                                    {match &listing.price {
                                        Some(price) => format!("{} · {} · {}", price, listing.listing_type, listing.status),
                                        None => format!("{} · {}", listing.listing_type, listing.status),
                                    }}
                                </p>
                            </div>
                            <button
                                class="text-xs"
                                style="color: var(--color-error);"
                                onclick={on_remove.reform(move |_| id)}
                            >
                                {"Unlink"}
                            </button>
                        </div>
                    }
                })}
                if list.listings.is_empty() {
                    <p class="text-sm py-2" style="color: var(--fg-muted);">{"No linked properties"}</p>
                }
            </div>

            if *show_picker {
                <ListingPicker
                    on_picked={on_picked}
                    on_close={{
                        let show_picker = show_picker.clone();
                        Callback::from(move |_| show_picker.set(false))
                    }}
                />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ListingPickerProps {
    on_picked: Callback<Listing>,
    on_close: Callback<()>,
}

#[function_component(ListingPicker)]
fn listing_picker(props: &ListingPickerProps) -> Html {
    let search = use_state(String::new);
    let results = use_state(Vec::<Listing>::new);

    // Re-query the compact endpoint on every keystroke; the result set is
    // small enough that debouncing is not worth the wiring.
    let on_search = {
        let search = search.clone();
        let results = results.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let query = input.value();
            search.set(query.clone());
            let results = results.clone();
            spawn_local(async move {
                if let Ok(fetched) = listings::list_compact(&query).await {
                    results.set(fetched);
                }
            });
        })
    };

    html! {
        <div class="fixed inset-0 z-50 flex items-center justify-center p-4" style="background-color: rgba(0, 0, 0, 0.5);">
            <div class="w-full max-w-lg rounded-lg p-5 space-y-3" style="background-color: var(--bg-secondary); border: 1px solid var(--border-primary);">
                <div class="flex items-center justify-between">
                    <h3 class="font-semibold" style="color: var(--fg-primary);">{"Link a Property"}</h3>
                    <button onclick={props.on_close.reform(|_| ())} style="color: var(--fg-muted);">{"✕"}</button>
                </div>
                <input
                    type="text"
                    placeholder="Search by street or city..."
                    class="w-full px-3 py-2 rounded-lg text-sm"
                    style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                    value={(*search).clone()}
                    oninput={on_search}
                />
                <div class="max-h-72 overflow-y-auto space-y-1">
                    { for results.iter().map(|listing| {
                        let on_picked = props.on_picked.clone();
                        let picked = listing.clone();
                        html! {
                            <button
                                key={listing.id}
                                class="w-full text-left p-2 rounded hover:opacity-80"
                                style="background-color: var(--bg-tertiary);"
                                onclick={Callback::from(move |_| on_picked.emit(picked.clone()))}
                            >
                                <p class="text-sm" style="color: var(--fg-primary);">
                                    {format!("{}, {}", listing.street, listing.city)}
                                </p>
                                <p class="text-xs" style="color: var(--fg-muted);">
                                    {listing.status.clone()}
                                </p>
                            </button>
                        }
                    })}
                    if results.is_empty() && !search.is_empty() {
                        <p class="text-sm py-2 text-center" style="color: var(--fg-muted);">{"No matches"}</p>
                    }
                </div>
            </div>
        </div>
    }
}
