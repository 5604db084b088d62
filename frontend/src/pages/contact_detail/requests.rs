// Requests tab: the contact's interest forms (prospects). Each card edits a
// local copy of the record, kept apart from the fetched list until the user
// explicitly saves; create and delete apply optimistically.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::save_badge::{schedule_revert, SaveBadge};
use crate::components::toast::use_toasts;
use crate::services::{locations, prospects};
use crate::state::optimistic::{ListAction, OptimisticList};
use crate::state::save_tracker::{
    SaveEvent, SaveState, SaveTracker, ERROR_REVERT_MS, SAVED_REVERT_MS,
};
use haven_shared::{City, CreateProspectRequest, Neighborhood, Prospect, SelectedNeighborhood};

const EXTRAS: &[&str] = &["terrace", "garage", "elevator", "pool", "garden", "storage"];

/// String-typed working copy of one interest form. Numeric fields stay raw
/// text while the user types; parsing happens once at save time.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ProspectForm {
    pub listing_type: String,
    pub status: String,
    pub min_price: String,
    pub max_price: String,
    pub min_bedrooms: String,
    pub min_bathrooms: String,
    pub min_area: String,
    pub urgency: String,
    pub move_in_by: String,
    pub neighborhoods: Vec<SelectedNeighborhood>,
    pub extras: BTreeMap<String, bool>,
}

impl ProspectForm {
    pub fn from_prospect(prospect: &Prospect) -> Self {
        fn text<T: ToString>(value: &Option<T>) -> String {
            value.as_ref().map(|v| v.to_string()).unwrap_or_default()
        }
        Self {
            listing_type: prospect.listing_type.clone().unwrap_or_default(),
            status: prospect.status.clone().unwrap_or_default(),
            min_price: text(&prospect.min_price),
            max_price: text(&prospect.max_price),
            min_bedrooms: text(&prospect.min_bedrooms),
            min_bathrooms: text(&prospect.min_bathrooms),
            min_area: text(&prospect.min_area),
            urgency: text(&prospect.urgency),
            move_in_by: text(&prospect.move_in_by),
            neighborhoods: prospect.neighborhoods.clone(),
            extras: prospect.extras.clone(),
        }
    }

    pub fn to_request(&self, contact_id: i64) -> CreateProspectRequest {
        CreateProspectRequest {
            contact_id,
            listing_type: (!self.listing_type.is_empty()).then(|| self.listing_type.clone()),
            status: (!self.status.is_empty()).then(|| self.status.clone()),
            min_price: self.min_price.parse::<Decimal>().ok(),
            max_price: self.max_price.parse::<Decimal>().ok(),
            min_bedrooms: self.min_bedrooms.parse().ok(),
            min_bathrooms: self.min_bathrooms.parse().ok(),
            min_area: self.min_area.parse().ok(),
            urgency: self.urgency.parse().ok(),
            move_in_by: NaiveDate::parse_from_str(&self.move_in_by, "%Y-%m-%d").ok(),
            neighborhoods: self.neighborhoods.clone(),
            extras: self.extras.clone(),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct RequestsTabProps {
    pub contact_id: i64,
}

#[function_component(RequestsTab)]
pub fn requests_tab(props: &RequestsTabProps) -> Html {
    let toasts = use_toasts();
    // `use_reducer` so the async reconciliation below always applies to the
    // latest list, not the snapshot a cloned state handle would deref to.
    let list = use_reducer(|| OptimisticList::new(Vec::<Prospect>::new(), |p: &Prospect| p.id));
    let loading = use_state(|| true);
    let creating = use_state(|| false);
    let tracker = use_reducer(|| SaveTracker::new(&["interest_forms"]));
    let cities = use_state(Vec::<City>::new);

    {
        let list = list.clone();
        let loading = loading.clone();
        let cities = cities.clone();
        use_effect_with(props.contact_id, move |id| {
            let id = *id;
            spawn_local(async move {
                if let Ok(fetched) = prospects::list_for_contact(id).await {
                    list.dispatch(ListAction::Load(fetched));
                }
                loading.set(false);
            });
            spawn_local(async move {
                if let Ok(fetched) = locations::all_cities().await {
                    cities.set(fetched);
                }
            });
            || ()
        });
    }

    let on_new = {
        let list = list.clone();
        let creating = creating.clone();
        let toasts = toasts.clone();
        let contact_id = props.contact_id;
        Callback::from(move |_: MouseEvent| {
            if *creating {
                return;
            }
            let local_id = -(js_sys::Date::now() as i64);
            let placeholder = Prospect {
                id: local_id,
                contact_id,
                listing_type: None,
                status: Some("active".to_string()),
                min_price: None,
                max_price: None,
                min_bedrooms: None,
                min_bathrooms: None,
                min_area: None,
                urgency: None,
                move_in_by: None,
                neighborhoods: Vec::new(),
                extras: BTreeMap::new(),
                created_at: chrono::Utc::now(),
                updated_at: None,
            };

            list.dispatch(ListAction::InsertPending(placeholder));
            creating.set(true);

            let request = CreateProspectRequest {
                contact_id,
                listing_type: None,
                status: Some("active".to_string()),
                min_price: None,
                max_price: None,
                min_bedrooms: None,
                min_bathrooms: None,
                min_area: None,
                urgency: None,
                move_in_by: None,
                neighborhoods: Vec::new(),
                extras: BTreeMap::new(),
            };
            let list = list.clone();
            let creating = creating.clone();
            let toasts = toasts.clone();
            spawn_local(async move {
                match prospects::create(&request).await {
                    Ok(confirmed) => {
                        list.dispatch(ListAction::ConfirmInsert { local_id, confirmed });
                    }
                    Err(e) => {
                        list.dispatch(ListAction::RollbackInsert { local_id });
                        toasts.error(format!("Could not create interest form: {}", e.message));
                    }
                }
                creating.set(false);
            });
        })
    };

    let on_delete = {
        let list = list.clone();
        let toasts = toasts.clone();
        Callback::from(move |id: i64| {
            let Some(snapshot) = list.snapshot_of(id) else { return };
            list.dispatch(ListAction::BeginRemove { id });

            let list = list.clone();
            let toasts = toasts.clone();
            spawn_local(async move {
                if let Err(e) = prospects::delete(id).await {
                    list.dispatch(ListAction::Rollback(snapshot));
                    toasts.error(format!("Could not delete interest form: {}", e.message));
                }
            });
        })
    };

    let on_saved = {
        let list = list.clone();
        Callback::from(move |confirmed: Prospect| {
            list.dispatch(ListAction::ConfirmUpdate {
                id: confirmed.id,
                confirmed,
            });
        })
    };

    html! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <div class="flex items-center space-x-3">
                    <h2 class="font-semibold" style="color: var(--fg-primary);">{"Interest Forms"}</h2>
                    <SaveBadge state={tracker.state("interest_forms")} />
                </div>
                <button
                    onclick={on_new}
                    disabled={*creating}
                    class="px-3 py-1.5 rounded-lg text-sm font-medium disabled:opacity-40"
                    style="background-color: var(--button-primary-bg); color: var(--button-primary-text);"
                >
                    {"+ New Interest Form"}
                </button>
            </div>

            if *loading {
                <div class="flex justify-center py-8">
                    <div class="animate-spin rounded-full h-8 w-8 border-b-2" style="border-color: var(--accent-primary);"></div>
                </div>
            } else {
                { for list.items().iter().map(|prospect| html! {
                    <ProspectCard
                        key={prospect.id}
                        prospect={prospect.clone()}
                        contact_id={props.contact_id}
                        cities={(*cities).clone()}
                        tracker={tracker.clone()}
                        on_saved={on_saved.clone()}
                        on_delete={on_delete.clone()}
                    />
                })}
                if list.is_empty() {
                    <p class="text-sm py-4 text-center" style="color: var(--fg-muted);">
                        {"No interest forms for this contact yet"}
                    </p>
                }
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ProspectCardProps {
    prospect: Prospect,
    contact_id: i64,
    cities: Vec<City>,
    tracker: UseReducerHandle<SaveTracker>,
    on_saved: Callback<Prospect>,
    on_delete: Callback<i64>,
}

#[function_component(ProspectCard)]
fn prospect_card(props: &ProspectCardProps) -> Html {
    let toasts = use_toasts();
    let form = use_state(|| ProspectForm::from_prospect(&props.prospect));
    let saving = use_state(|| false);
    let selected_city = use_state(|| None::<i64>);
    let neighborhoods = use_state(Vec::<Neighborhood>::new);
    let pending = props.prospect.id < 0;

    // Start the pickers on the city of the form's first neighborhood.
    {
        let selected_city = selected_city.clone();
        let neighborhoods = neighborhoods.clone();
        let first = props.prospect.neighborhoods.first().map(|n| n.neighborhood_id);
        use_effect_with((), move |_| {
            if let Some(neighborhood_id) = first {
                spawn_local(async move {
                    let Ok(located) = locations::location_by_neighborhood(neighborhood_id).await
                    else {
                        return;
                    };
                    selected_city.set(Some(located.city_id));
                    if let Ok(fetched) = locations::neighborhoods_by_city(located.city_id).await {
                        neighborhoods.set(fetched);
                    }
                });
            }
            || ()
        });
    }

    let mark_edited = {
        let tracker = props.tracker.clone();
        move || tracker.dispatch(("interest_forms", SaveEvent::Edited))
    };

    let set_field = {
        let form = form.clone();
        let mark_edited = mark_edited.clone();
        move |set: fn(&mut ProspectForm, String)| {
            let form = form.clone();
            let mark_edited = mark_edited.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                let mut next = (*form).clone();
                set(&mut next, input.value());
                form.set(next);
                mark_edited();
            })
        }
    };

    let on_city_change = {
        let selected_city = selected_city.clone();
        let neighborhoods = neighborhoods.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let Ok(city_id) = select.value().parse::<i64>() else {
                selected_city.set(None);
                neighborhoods.set(Vec::new());
                return;
            };
            selected_city.set(Some(city_id));
            let neighborhoods = neighborhoods.clone();
            spawn_local(async move {
                if let Ok(fetched) = locations::neighborhoods_by_city(city_id).await {
                    neighborhoods.set(fetched);
                }
            });
        })
    };

    let on_add_neighborhood = {
        let form = form.clone();
        let neighborhoods = neighborhoods.clone();
        let mark_edited = mark_edited.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let Ok(id) = select.value().parse::<i64>() else { return };
            let Some(picked) = neighborhoods.iter().find(|n| n.id == id) else { return };

            let mut next = (*form).clone();
            if next.neighborhoods.iter().any(|n| n.neighborhood_id == id) {
                return;
            }
            next.neighborhoods.push(SelectedNeighborhood {
                neighborhood_id: picked.id,
                name: picked.name.clone(),
            });
            form.set(next);
            mark_edited();
        })
    };

    let on_remove_neighborhood = {
        let form = form.clone();
        let mark_edited = mark_edited.clone();
        Callback::from(move |id: i64| {
            let mut next = (*form).clone();
            next.neighborhoods.retain(|n| n.neighborhood_id != id);
            form.set(next);
            mark_edited();
        })
    };

    let on_toggle_extra = {
        let form = form.clone();
        let mark_edited = mark_edited.clone();
        Callback::from(move |extra: String| {
            let mut next = (*form).clone();
            let current = next.extras.get(&extra).copied().unwrap_or(false);
            if current {
                next.extras.remove(&extra);
            } else {
                next.extras.insert(extra, true);
            }
            form.set(next);
            mark_edited();
        })
    };

    let on_save = {
        let form = form.clone();
        let saving = saving.clone();
        let tracker = props.tracker.clone();
        let toasts = toasts.clone();
        let on_saved = props.on_saved.clone();
        let prospect_id = props.prospect.id;
        let contact_id = props.contact_id;
        Callback::from(move |_: MouseEvent| {
            if *saving || tracker.state("interest_forms") != SaveState::Modified {
                return;
            }
            saving.set(true);
            tracker.dispatch(("interest_forms", SaveEvent::SaveStarted));

            let request = form.to_request(contact_id);
            let saving = saving.clone();
            let tracker = tracker.clone();
            let toasts = toasts.clone();
            let on_saved = on_saved.clone();
            spawn_local(async move {
                match prospects::update(prospect_id, &request).await {
                    Ok(confirmed) => {
                        on_saved.emit(confirmed);
                        tracker.dispatch(("interest_forms", SaveEvent::SaveSucceeded));
                        schedule_revert(tracker.clone(), "interest_forms", SAVED_REVERT_MS);
                    }
                    Err(e) => {
                        toasts.error(format!("Could not save interest form: {}", e.message));
                        tracker.dispatch(("interest_forms", SaveEvent::SaveFailed));
                        schedule_revert(tracker.clone(), "interest_forms", ERROR_REVERT_MS);
                    }
                }
                saving.set(false);
            });
        })
    };

    let number_input = |label: &'static str, value: String, oninput: Callback<InputEvent>| {
        html! {
            <div>
                <label class="block text-xs font-medium mb-1" style="color: var(--fg-muted);">
                    {label}
                </label>
                <input
                    type="number"
                    min="0"
                    class="w-full px-2 py-1.5 rounded text-sm"
                    style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                    {value}
                    {oninput}
                />
            </div>
        }
    };

    html! {
        <div
            class="rounded-lg p-4 space-y-4"
            style={format!(
                "background-color: var(--bg-secondary); border: 1px solid var(--border-primary);{}",
                if pending { " opacity: 0.6;" } else { "" }
            )}
        >
            <div class="flex items-center justify-between">
                <div class="flex items-center space-x-3">
                    <select
                        class="px-2 py-1.5 rounded text-sm"
                        style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                        onchange={{
                            let form = form.clone();
                            let mark_edited = mark_edited.clone();
                            Callback::from(move |e: Event| {
                                let select: HtmlSelectElement = e.target_unchecked_into();
                                let mut next = (*form).clone();
                                next.listing_type = select.value();
                                form.set(next);
                                mark_edited();
                            })
                        }}
                    >
                        <option value="" selected={form.listing_type.is_empty()}>{"Any type"}</option>
                        <option value="sale" selected={form.listing_type == "sale"}>{"Buy"}</option>
                        <option value="rent" selected={form.listing_type == "rent"}>{"Rent"}</option>
                    </select>
                    <span class="text-xs" style="color: var(--fg-muted);">
                        {props.prospect.created_at.format("opened %Y-%m-%d").to_string()}
                    </span>
                </div>
                <div class="flex items-center space-x-2">
                    <button
                        onclick={on_save}
                        disabled={pending || *saving}
                        class="px-3 py-1.5 rounded-lg text-sm font-medium disabled:opacity-40"
                        style="background-color: var(--button-primary-bg); color: var(--button-primary-text);"
                    >
                        {if *saving { "Saving..." } else { "Save" }}
                    </button>
                    <button
                        onclick={{
                            let on_delete = props.on_delete.clone();
                            let id = props.prospect.id;
                            Callback::from(move |_| on_delete.emit(id))
                        }}
                        disabled={pending}
                        class="text-xs disabled:opacity-40"
                        style="color: var(--color-error);"
                    >
                        {"Delete"}
                    </button>
                </div>
            </div>

            <div class="grid grid-cols-2 sm:grid-cols-4 gap-3">
                {number_input("Min price", form.min_price.clone(), set_field(|f, v| f.min_price = v))}
                {number_input("Max price", form.max_price.clone(), set_field(|f, v| f.max_price = v))}
                {number_input("Min bedrooms", form.min_bedrooms.clone(), set_field(|f, v| f.min_bedrooms = v))}
                {number_input("Min bathrooms", form.min_bathrooms.clone(), set_field(|f, v| f.min_bathrooms = v))}
                {number_input("Min area (m²)", form.min_area.clone(), set_field(|f, v| f.min_area = v))}
                {number_input("Urgency (1-5)", form.urgency.clone(), set_field(|f, v| f.urgency = v))}
                <div class="col-span-2">
                    <label class="block text-xs font-medium mb-1" style="color: var(--fg-muted);">
                        {"Move in by"}
                    </label>
                    <input
                        type="date"
                        class="w-full px-2 py-1.5 rounded text-sm"
                        style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                        value={form.move_in_by.clone()}
                        oninput={set_field(|f, v| f.move_in_by = v)}
                    />
                </div>
            </div>

            <div class="space-y-2">
                <label class="block text-xs font-medium" style="color: var(--fg-muted);">
                    {"Neighborhoods"}
                </label>
                <div class="flex flex-wrap gap-1">
                    { for form.neighborhoods.iter().map(|picked| {
                        let id = picked.neighborhood_id;
                        let on_remove = on_remove_neighborhood.clone();
                        html! {
                            <span
                                key={id}
                                class="px-2 py-0.5 text-xs rounded flex items-center space-x-1"
                                style="background-color: var(--bg-highlight); color: var(--fg-secondary);"
                            >
                                <span>{picked.name.clone()}</span>
                                <button onclick={Callback::from(move |_| on_remove.emit(id))}>{"✕"}</button>
                            </span>
                        }
                    })}
                </div>
                <div class="flex space-x-2">
                    <select
                        class="px-2 py-1.5 rounded text-sm"
                        style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                        onchange={on_city_change}
                    >
                        <option value="" selected={selected_city.is_none()}>{"Pick a city..."}</option>
                        { for props.cities.iter().map(|city| html! {
                            <option value={city.id.to_string()} selected={*selected_city == Some(city.id)}>
                                {city.name.clone()}
                            </option>
                        })}
                    </select>
                    <select
                        class="px-2 py-1.5 rounded text-sm"
                        style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                        disabled={neighborhoods.is_empty()}
                        onchange={on_add_neighborhood}
                    >
                        <option value="" selected=true>{"Add neighborhood..."}</option>
                        { for neighborhoods.iter().map(|n| html! {
                            <option value={n.id.to_string()}>{n.name.clone()}</option>
                        })}
                    </select>
                </div>
            </div>

            <div class="flex flex-wrap gap-3">
                { for EXTRAS.iter().map(|extra| {
                    let extra_name = extra.to_string();
                    let checked = form.extras.get(*extra).copied().unwrap_or(false);
                    let on_toggle_extra = on_toggle_extra.clone();
                    html! {
                        <label class="flex items-center space-x-1 text-sm cursor-pointer" style="color: var(--fg-secondary);">
                            <input
                                type="checkbox"
                                checked={checked}
                                onchange={Callback::from(move |_| on_toggle_extra.emit(extra_name.clone()))}
                            />
                            <span class="capitalize">{*extra}</span>
                        </label>
                    }
                })}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn prospect() -> Prospect {
        Prospect {
            id: 7,
            contact_id: 3,
            listing_type: Some("sale".to_string()),
            status: Some("active".to_string()),
            min_price: Some(Decimal::new(150_000, 0)),
            max_price: Some(Decimal::new(320_500, 0)),
            min_bedrooms: Some(2),
            min_bathrooms: None,
            min_area: Some(75),
            urgency: Some(4),
            move_in_by: NaiveDate::from_ymd_opt(2026, 11, 1),
            neighborhoods: vec![SelectedNeighborhood {
                neighborhood_id: 9007199254740993,
                name: "Old Town".to_string(),
            }],
            extras: BTreeMap::from([("terrace".to_string(), true)]),
            created_at: Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn form_round_trip_preserves_numeric_fields() {
        let original = prospect();
        let request = ProspectForm::from_prospect(&original).to_request(original.contact_id);

        assert_eq!(request.min_price, original.min_price);
        assert_eq!(request.max_price, original.max_price);
        assert_eq!(request.min_bedrooms, original.min_bedrooms);
        assert_eq!(request.min_bathrooms, None);
        assert_eq!(request.min_area, original.min_area);
        assert_eq!(request.urgency, original.urgency);
        assert_eq!(request.move_in_by, original.move_in_by);
        assert_eq!(request.extras, original.extras);
    }

    #[test]
    fn neighborhood_ids_survive_the_form_and_serialize_as_strings() {
        let request = ProspectForm::from_prospect(&prospect()).to_request(3);
        assert_eq!(request.neighborhoods.len(), 1);
        assert_eq!(request.neighborhoods[0].neighborhood_id, 9007199254740993);

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""neighborhood_id":"9007199254740993""#));
    }

    #[test]
    fn blank_numeric_inputs_become_absent() {
        let request = ProspectForm::default().to_request(3);
        assert_eq!(request.min_price, None);
        assert_eq!(request.min_bedrooms, None);
        assert_eq!(request.move_in_by, None);
        assert_eq!(request.listing_type, None);
    }

    #[test]
    fn garbage_numeric_input_is_dropped_not_zeroed() {
        let form = ProspectForm {
            min_price: "lots".to_string(),
            min_bedrooms: "2.5".to_string(),
            ..Default::default()
        };
        let request = form.to_request(3);
        assert_eq!(request.min_price, None);
        assert_eq!(request.min_bedrooms, None);
    }
}
