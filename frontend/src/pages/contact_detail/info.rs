// Info tab: three independently saved editor modules (basic info, contact
// details, notes) plus the comments timeline. Each module sends a partial
// update carrying only its own fields.

use serde_json::Value;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::save_badge::{schedule_revert, SaveBadge};
use crate::components::session::use_session;
use crate::components::toast::use_toasts;
use crate::services::{comments, contacts};
use crate::state::optimistic::{ListAction, OptimisticList};
use crate::state::save_tracker::{
    SaveEvent, SaveState, SaveTracker, ERROR_REVERT_MS, SAVED_REVERT_MS,
};
use haven_shared::{Contact, CreateCommentRequest, UpdateContactRequest, UserComment};

const MODULES: &[&str] = &["basic_info", "contact_details", "notes"];

// additional_info keys the detail editor surfaces.
const INFO_KEYS: [(&str, &str); 3] = [
    ("occupation", "Occupation"),
    ("source", "How they found us"),
    ("language", "Preferred language"),
];

fn info_value(contact: &Contact, key: &str) -> String {
    contact
        .additional_info
        .as_ref()
        .and_then(|v| v.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[derive(Properties, PartialEq)]
pub struct InfoTabProps {
    pub contact: Contact,
    pub on_updated: Callback<Contact>,
}

#[function_component(InfoTab)]
pub fn info_tab(props: &InfoTabProps) -> Html {
    let contact = &props.contact;
    let toasts = use_toasts();
    let tracker = use_reducer(|| SaveTracker::new(MODULES));

    let first_name = use_state(|| contact.first_name.clone());
    let last_name = use_state(|| contact.last_name.clone());
    let email = use_state(|| contact.email.clone().unwrap_or_default());
    let phone = use_state(|| contact.phone.clone().unwrap_or_default());
    let notes = use_state(|| contact.notes.clone().unwrap_or_default());
    let extra_fields = use_state(|| {
        INFO_KEYS
            .iter()
            .map(|(key, _)| info_value(contact, key))
            .collect::<Vec<String>>()
    });

    // Reseed editors only when a different contact loads, never after our
    // own saves round-trip.
    {
        let first_name = first_name.clone();
        let last_name = last_name.clone();
        let email = email.clone();
        let phone = phone.clone();
        let notes = notes.clone();
        let extra_fields = extra_fields.clone();
        let contact = contact.clone();
        use_effect_with(contact.id, move |_| {
            first_name.set(contact.first_name.clone());
            last_name.set(contact.last_name.clone());
            email.set(contact.email.clone().unwrap_or_default());
            phone.set(contact.phone.clone().unwrap_or_default());
            notes.set(contact.notes.clone().unwrap_or_default());
            extra_fields.set(
                INFO_KEYS
                    .iter()
                    .map(|(key, _)| info_value(&contact, key))
                    .collect(),
            );
            || ()
        });
    }

    let bind_input = |state: UseStateHandle<String>, module: &'static str| {
        let tracker = tracker.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
            tracker.dispatch((module, SaveEvent::Edited));
        })
    };

    let make_save = {
        let tracker = tracker.clone();
        let toasts = toasts.clone();
        let on_updated = props.on_updated.clone();
        let contact_id = contact.id;
        move |module: &'static str, request: UpdateContactRequest| -> Callback<MouseEvent> {
            let tracker = tracker.clone();
            let toasts = toasts.clone();
            let on_updated = on_updated.clone();
            Callback::from(move |_| {
                if tracker.state(module) != SaveState::Modified {
                    return;
                }
                tracker.dispatch((module, SaveEvent::SaveStarted));

                let request = request.clone();
                let tracker = tracker.clone();
                let toasts = toasts.clone();
                let on_updated = on_updated.clone();
                spawn_local(async move {
                    match contacts::update(contact_id, &request).await {
                        Ok(updated) => {
                            on_updated.emit(updated);
                            tracker.dispatch((module, SaveEvent::SaveSucceeded));
                            schedule_revert(tracker.clone(), module, SAVED_REVERT_MS);
                        }
                        Err(e) => {
                            web_sys::console::error_1(
                                &format!("Contact save failed: {}", e).into(),
                            );
                            toasts.error(format!("Could not save: {}", e.message));
                            tracker.dispatch((module, SaveEvent::SaveFailed));
                            schedule_revert(tracker.clone(), module, ERROR_REVERT_MS);
                        }
                    }
                });
            })
        }
    };

    let save_basic = make_save(
        "basic_info",
        UpdateContactRequest {
            first_name: Some((*first_name).clone()),
            last_name: Some((*last_name).clone()),
            ..Default::default()
        },
    );

    let details_request = {
        // Merge the surfaced keys back into the existing bag; blank values
        // drop the key.
        let mut bag = match &contact.additional_info {
            Some(Value::Object(map)) => map.clone(),
            _ => serde_json::Map::new(),
        };
        for ((key, _), value) in INFO_KEYS.iter().zip(extra_fields.iter()) {
            if value.is_empty() {
                bag.remove(*key);
            } else {
                bag.insert(key.to_string(), Value::String(value.clone()));
            }
        }
        UpdateContactRequest {
            email: Some((*email).clone()),
            phone: Some((*phone).clone()),
            additional_info: Some(Value::Object(bag)),
            ..Default::default()
        }
    };
    let save_details = make_save("contact_details", details_request);

    let save_notes = make_save(
        "notes",
        UpdateContactRequest {
            notes: Some((*notes).clone()),
            ..Default::default()
        },
    );

    let notes_oninput = {
        let notes = notes.clone();
        let tracker = tracker.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            notes.set(area.value());
            tracker.dispatch(("notes", SaveEvent::Edited));
        })
    };

    html! {
        <div class="space-y-4">
            <SectionCard
                title="Basic Info"
                state={tracker.state("basic_info")}
                on_save={save_basic}
            >
                <div class="grid grid-cols-1 sm:grid-cols-2 gap-3">
                    <LabeledInput
                        label="First name"
                        value={(*first_name).clone()}
                        oninput={bind_input(first_name.clone(), "basic_info")}
                    />
                    <LabeledInput
                        label="Last name"
                        value={(*last_name).clone()}
                        oninput={bind_input(last_name.clone(), "basic_info")}
                    />
                </div>
            </SectionCard>

            <SectionCard
                title="Contact Details"
                state={tracker.state("contact_details")}
                on_save={save_details}
            >
                <div class="grid grid-cols-1 sm:grid-cols-2 gap-3">
                    <LabeledInput
                        label="Email"
                        value={(*email).clone()}
                        oninput={bind_input(email.clone(), "contact_details")}
                    />
                    <LabeledInput
                        label="Phone"
                        value={(*phone).clone()}
                        oninput={bind_input(phone.clone(), "contact_details")}
                    />
                    { for INFO_KEYS.iter().enumerate().map(|(index, (_, label))| {
                        let value = extra_fields[index].clone();
                        let extra_fields = extra_fields.clone();
                        let tracker = tracker.clone();
                        let oninput = Callback::from(move |e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            let mut next = (*extra_fields).clone();
                            next[index] = input.value();
                            extra_fields.set(next);
                            tracker.dispatch(("contact_details", SaveEvent::Edited));
                        });
                        html! {
                            <LabeledInput
                                label={*label}
                                {value}
                                {oninput}
                            />
                        }
                    })}
                </div>
            </SectionCard>

            <SectionCard
                title="Notes"
                state={tracker.state("notes")}
                on_save={save_notes}
            >
                <textarea
                    rows="4"
                    class="w-full px-3 py-2 rounded-lg text-sm"
                    style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                    value={(*notes).clone()}
                    oninput={notes_oninput}
                />
            </SectionCard>

            <CommentsTimeline contact_id={contact.id} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SectionCardProps {
    title: &'static str,
    state: SaveState,
    on_save: Callback<MouseEvent>,
    children: Html,
}

#[function_component(SectionCard)]
fn section_card(props: &SectionCardProps) -> Html {
    html! {
        <div class="rounded-lg p-4 space-y-3" style="background-color: var(--bg-secondary); border: 1px solid var(--border-primary);">
            <div class="flex items-center justify-between">
                <h2 class="font-semibold" style="color: var(--fg-primary);">{props.title}</h2>
                <div class="flex items-center space-x-3">
                    <SaveBadge state={props.state} />
                    <button
                        onclick={props.on_save.clone()}
                        disabled={props.state != SaveState::Modified}
                        class="px-3 py-1.5 rounded-lg text-sm font-medium disabled:opacity-40"
                        style="background-color: var(--button-primary-bg); color: var(--button-primary-text);"
                    >
                        {"Save"}
                    </button>
                </div>
            </div>
            { props.children.clone() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct LabeledInputProps {
    label: &'static str,
    value: String,
    oninput: Callback<InputEvent>,
}

#[function_component(LabeledInput)]
fn labeled_input(props: &LabeledInputProps) -> Html {
    html! {
        <div>
            <label class="block text-sm font-medium mb-1" style="color: var(--fg-secondary);">
                {props.label}
            </label>
            <input
                type="text"
                class="w-full px-3 py-2 rounded-lg text-sm"
                style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                value={props.value.clone()}
                oninput={props.oninput.clone()}
            />
        </div>
    }
}

// ===== Comments timeline =====

#[derive(Properties, PartialEq)]
struct CommentsTimelineProps {
    contact_id: i64,
}

#[function_component(CommentsTimeline)]
fn comments_timeline(props: &CommentsTimelineProps) -> Html {
    let session = use_session();
    let toasts = use_toasts();
    // `use_reducer` so reconciliation from the async continuations below
    // lands on the latest timeline, not a render-time snapshot.
    let timeline = use_reducer(|| OptimisticList::new(Vec::<UserComment>::new(), |c: &UserComment| c.id));
    let new_content = use_state(String::new);
    let posting = use_state(|| false);
    let editing = use_state(|| None::<(i64, String)>);

    {
        let timeline = timeline.clone();
        use_effect_with(props.contact_id, move |id| {
            let id = *id;
            spawn_local(async move {
                if let Ok(fetched) = comments::list_for_contact(id).await {
                    timeline.dispatch(ListAction::Load(fetched));
                }
            });
            || ()
        });
    }

    let on_post = {
        let timeline = timeline.clone();
        let new_content = new_content.clone();
        let posting = posting.clone();
        let toasts = toasts.clone();
        let session = session.clone();
        let contact_id = props.contact_id;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *posting || new_content.is_empty() {
                return;
            }
            let Some(user) = session.user.clone() else { return };

            let content = (*new_content).clone();
            let local_id = -(js_sys::Date::now() as i64);
            let placeholder = UserComment {
                id: local_id,
                contact_id,
                author_id: user.id,
                author_name: format!("{} {}", user.first_name, user.last_name),
                content: content.clone(),
                created_at: chrono::Utc::now(),
                updated_at: None,
            };

            timeline.dispatch(ListAction::InsertPending(placeholder));
            new_content.set(String::new());
            posting.set(true);

            let request = CreateCommentRequest { contact_id, content: content.clone() };
            let timeline = timeline.clone();
            let new_content = new_content.clone();
            let posting = posting.clone();
            let toasts = toasts.clone();
            spawn_local(async move {
                match comments::create(&request).await {
                    Ok(confirmed) => {
                        timeline.dispatch(ListAction::ConfirmInsert { local_id, confirmed });
                    }
                    Err(e) => {
                        timeline.dispatch(ListAction::RollbackInsert { local_id });
                        // Put the text back so the user can retry.
                        new_content.set(content);
                        toasts.error(format!("Could not post comment: {}", e.message));
                    }
                }
                posting.set(false);
            });
        })
    };

    let on_save_edit = {
        let timeline = timeline.clone();
        let editing = editing.clone();
        let toasts = toasts.clone();
        Callback::from(move |_: MouseEvent| {
            let Some((id, content)) = (*editing).clone() else { return };
            let Some(snapshot) = timeline.snapshot_of(id) else { return };
            let Some(original) = timeline.get(id).cloned() else { return };

            let mut patched = original.clone();
            patched.content = content.clone();
            timeline.dispatch(ListAction::BeginUpdate { id, updated: patched });
            editing.set(None);

            let timeline = timeline.clone();
            let toasts = toasts.clone();
            spawn_local(async move {
                match comments::update(id, &content).await {
                    Ok(confirmed) => {
                        timeline.dispatch(ListAction::ConfirmUpdate { id, confirmed });
                    }
                    Err(e) => {
                        timeline.dispatch(ListAction::Rollback(snapshot));
                        toasts.error(format!("Could not update comment: {}", e.message));
                    }
                }
            });
        })
    };

    let on_delete = {
        let timeline = timeline.clone();
        let toasts = toasts.clone();
        Callback::from(move |id: i64| {
            let Some(snapshot) = timeline.snapshot_of(id) else { return };
            timeline.dispatch(ListAction::BeginRemove { id });

            let timeline = timeline.clone();
            let toasts = toasts.clone();
            spawn_local(async move {
                if let Err(e) = comments::delete(id).await {
                    timeline.dispatch(ListAction::Rollback(snapshot));
                    toasts.error(format!("Could not delete comment: {}", e.message));
                }
            });
        })
    };

    html! {
        <div class="rounded-lg p-4 space-y-3" style="background-color: var(--bg-secondary); border: 1px solid var(--border-primary);">
            <h2 class="font-semibold" style="color: var(--fg-primary);">{"Comments"}</h2>

            <form class="flex space-x-2" onsubmit={on_post}>
                <input
                    type="text"
                    placeholder="Write a comment..."
                    class="flex-1 px-3 py-2 rounded-lg text-sm"
                    style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                    value={(*new_content).clone()}
                    oninput={{
                        let new_content = new_content.clone();
                        Callback::from(move |e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            new_content.set(input.value());
                        })
                    }}
                />
                <button
                    type="submit"
                    disabled={*posting || new_content.is_empty()}
                    class="px-4 py-2 rounded-lg text-sm font-medium disabled:opacity-40"
                    style="background-color: var(--button-primary-bg); color: var(--button-primary-text);"
                >
                    {"Post"}
                </button>
            </form>

            <div class="space-y-2">
                { for timeline.items().iter().map(|comment| {
                    let id = comment.id;
                    let pending = id < 0;
                    let is_editing = matches!(&*editing, Some((editing_id, _)) if *editing_id == id);
                    html! {
                        <div
                            key={id}
                            class="p-3 rounded-lg space-y-1"
                            style={format!(
                                "background-color: var(--bg-tertiary);{}",
                                if pending { " opacity: 0.6;" } else { "" }
                            )}
                        >
                            <div class="flex items-center justify-between">
                                <span class="text-sm font-medium" style="color: var(--fg-primary);">
                                    {&comment.author_name}
                                </span>
                                <div class="flex items-center space-x-2">
                                    <span class="text-xs" style="color: var(--fg-muted);">
                                        {comment.created_at.format("%Y-%m-%d %H:%M").to_string()}
                                    </span>
                                    if session.can_edit_comment(comment) && !pending {
                                        <button
                                            class="text-xs"
                                            style="color: var(--accent-primary);"
                                            onclick={{
                                                let editing = editing.clone();
                                                let content = comment.content.clone();
                                                Callback::from(move |_| editing.set(Some((id, content.clone()))))
                                            }}
                                        >
                                            {"Edit"}
                                        </button>
                                        <button
                                            class="text-xs"
                                            style="color: var(--color-error);"
                                            onclick={on_delete.reform(move |_| id)}
                                        >
                                            {"Delete"}
                                        </button>
                                    }
                                </div>
                            </div>
                            if is_editing {
                                <div class="flex space-x-2">
                                    <input
                                        type="text"
                                        class="flex-1 px-2 py-1 rounded text-sm"
                                        style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                                        value={editing.as_ref().map(|(_, c)| c.clone()).unwrap_or_default()}
                                        oninput={{
                                            let editing = editing.clone();
                                            Callback::from(move |e: InputEvent| {
                                                let input: HtmlInputElement = e.target_unchecked_into();
                                                editing.set(Some((id, input.value())));
                                            })
                                        }}
                                    />
                                    <button
                                        class="text-xs px-2"
                                        style="color: var(--color-success);"
                                        onclick={on_save_edit.clone()}
                                    >
                                        {"Save"}
                                    </button>
                                    <button
                                        class="text-xs px-2"
                                        style="color: var(--fg-muted);"
                                        onclick={{
                                            let editing = editing.clone();
                                            Callback::from(move |_| editing.set(None))
                                        }}
                                    >
                                        {"Cancel"}
                                    </button>
                                </div>
                            } else {
                                <p class="text-sm" style="color: var(--fg-secondary);">{&comment.content}</p>
                            }
                        </div>
                    }
                })}
                if timeline.is_empty() {
                    <p class="text-sm py-2" style="color: var(--fg-muted);">{"No comments yet"}</p>
                }
            </div>
        </div>
    }
}
