// Tasks tab: optimistic create/toggle/delete over the contact's task list.
// The entry form persists as a localStorage draft keyed per contact, so a
// half-written task survives navigating away.

use chrono::NaiveDate;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::session::use_session;
use crate::components::toast::use_toasts;
use crate::services::tasks;
use crate::state::drafts::{clear_task_draft, load_task_draft, save_task_draft, TaskDraft};
use crate::state::optimistic::{ListAction, OptimisticList};
use haven_shared::{CreateTaskRequest, Task, UpdateTaskRequest};

#[derive(Properties, PartialEq)]
pub struct TasksTabProps {
    pub contact_id: i64,
}

#[function_component(TasksTab)]
pub fn tasks_tab(props: &TasksTabProps) -> Html {
    let session = use_session();
    let toasts = use_toasts();
    // `use_reducer` so the async reconciliation below always applies to the
    // latest list, not the snapshot a cloned state handle would deref to.
    let list = use_reducer(|| OptimisticList::new(Vec::<Task>::new(), |t: &Task| t.id));
    let loading = use_state(|| true);
    let draft = use_state(|| load_task_draft(props.contact_id).unwrap_or_default());
    let creating = use_state(|| false);

    {
        let list = list.clone();
        let loading = loading.clone();
        let draft = draft.clone();
        use_effect_with(props.contact_id, move |id| {
            let id = *id;
            draft.set(load_task_draft(id).unwrap_or_default());
            spawn_local(async move {
                if let Ok(fetched) = tasks::list_for_contact(id).await {
                    list.dispatch(ListAction::Load(fetched));
                }
                loading.set(false);
            });
            || ()
        });
    }

    let update_draft = {
        let draft = draft.clone();
        let contact_id = props.contact_id;
        Callback::from(move |next: TaskDraft| {
            save_task_draft(contact_id, &next);
            draft.set(next);
        })
    };

    let on_create = {
        let list = list.clone();
        let draft = draft.clone();
        let creating = creating.clone();
        let toasts = toasts.clone();
        let session = session.clone();
        let contact_id = props.contact_id;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *creating || draft.title.is_empty() {
                return;
            }
            let Some(user) = session.user.clone() else { return };

            let submitted = (*draft).clone();
            let due_date = NaiveDate::parse_from_str(&submitted.due_date, "%Y-%m-%d").ok();
            let local_id = -(js_sys::Date::now() as i64);
            let placeholder = Task {
                id: local_id,
                title: submitted.title.clone(),
                description: (!submitted.description.is_empty())
                    .then(|| submitted.description.clone()),
                completed: false,
                due_date,
                contact_id: Some(contact_id),
                listing_id: None,
                deal_id: None,
                appointment_id: None,
                prospect_id: None,
                created_by: user.id,
                created_by_name: Some(format!("{} {}", user.first_name, user.last_name)),
                created_at: chrono::Utc::now(),
                updated_at: None,
            };

            list.dispatch(ListAction::InsertPending(placeholder));
            creating.set(true);
            // Optimistically clear the form; a failure restores it below.
            draft.set(TaskDraft::default());
            clear_task_draft(contact_id);

            let request = CreateTaskRequest {
                title: submitted.title.clone(),
                description: (!submitted.description.is_empty())
                    .then(|| submitted.description.clone()),
                due_date,
                contact_id: Some(contact_id),
                listing_id: None,
                prospect_id: None,
            };
            let list = list.clone();
            let draft = draft.clone();
            let creating = creating.clone();
            let toasts = toasts.clone();
            spawn_local(async move {
                match tasks::create(&request).await {
                    Ok(confirmed) => {
                        list.dispatch(ListAction::ConfirmInsert { local_id, confirmed });
                        toasts.success("Task created");
                    }
                    Err(e) => {
                        list.dispatch(ListAction::RollbackInsert { local_id });
                        // Restore the form so nothing has to be retyped.
                        save_task_draft(contact_id, &submitted);
                        draft.set(submitted);
                        toasts.error(format!("Could not create task: {}", e.message));
                    }
                }
                creating.set(false);
            });
        })
    };

    let on_toggle = {
        let list = list.clone();
        let toasts = toasts.clone();
        Callback::from(move |id: i64| {
            let Some(snapshot) = list.snapshot_of(id) else { return };
            let Some(original) = list.get(id).cloned() else { return };
            let mut patched = original.clone();
            patched.completed = !original.completed;

            let completed = patched.completed;
            list.dispatch(ListAction::BeginUpdate { id, updated: patched });

            let request = UpdateTaskRequest {
                completed: Some(completed),
                ..Default::default()
            };
            let list = list.clone();
            let toasts = toasts.clone();
            spawn_local(async move {
                match tasks::update(id, &request).await {
                    Ok(confirmed) => list.dispatch(ListAction::ConfirmUpdate { id, confirmed }),
                    Err(e) => {
                        list.dispatch(ListAction::Rollback(snapshot));
                        toasts.error(format!("Could not update task: {}", e.message));
                    }
                }
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
                if let Err(e) = tasks::delete(id).await {
                    list.dispatch(ListAction::Rollback(snapshot));
                    toasts.error(format!("Could not delete task: {}", e.message));
                }
            });
        })
    };

    let draft_field = |set: fn(&mut TaskDraft, String)| {
        let draft = draft.clone();
        let update_draft = update_draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            set(&mut next, input.value());
            update_draft.emit(next);
        })
    };

    html! {
        <div class="space-y-4">
            <form
                class="rounded-lg p-4 space-y-3"
                style="background-color: var(--bg-secondary); border: 1px solid var(--border-primary);"
                onsubmit={on_create}
            >
                <h2 class="font-semibold" style="color: var(--fg-primary);">{"New Task"}</h2>
                <div class="grid grid-cols-1 sm:grid-cols-3 gap-3">
                    <input
                        type="text"
                        placeholder="Title"
                        class="px-3 py-2 rounded-lg text-sm sm:col-span-2"
                        style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                        value={draft.title.clone()}
                        oninput={draft_field(|d, v| d.title = v)}
                    />
                    <input
                        type="date"
                        class="px-3 py-2 rounded-lg text-sm"
                        style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                        value={draft.due_date.clone()}
                        oninput={draft_field(|d, v| d.due_date = v)}
                    />
                </div>
                <input
                    type="text"
                    placeholder="Description (optional)"
                    class="w-full px-3 py-2 rounded-lg text-sm"
                    style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                    value={draft.description.clone()}
                    oninput={draft_field(|d, v| d.description = v)}
                />
                <div class="flex justify-end">
                    <button
                        type="submit"
                        disabled={*creating || draft.title.is_empty()}
                        class="px-4 py-2 rounded-lg text-sm font-medium disabled:opacity-40"
                        style="background-color: var(--button-primary-bg); color: var(--button-primary-text);"
                    >
                        {if *creating { "Adding..." } else { "Add Task" }}
                    </button>
                </div>
            </form>

            if *loading {
                <div class="flex justify-center py-8">
                    <div class="animate-spin rounded-full h-8 w-8 border-b-2" style="border-color: var(--accent-primary);"></div>
                </div>
            } else {
                <div class="space-y-2">
                    { for list.items().iter().map(|task| {
                        let id = task.id;
                        let pending = id < 0;
                        html! {
                            <div
                                key={id}
                                class="flex items-start justify-between p-3 rounded-lg"
                                style={format!(
                                    "background-color: var(--bg-secondary); border: 1px solid var(--border-primary);{}",
                                    if pending { " opacity: 0.6;" } else { "" }
                                )}
                            >
                                <div class="flex items-start space-x-3">
                                    <input
                                        type="checkbox"
                                        class="mt-1"
                                        checked={task.completed}
                                        disabled={pending || !session.can_edit_task(task)}
                                        onchange={on_toggle.reform(move |_| id)}
                                    />
                                    <div>
                                        <p
                                            class={if task.completed { "text-sm font-medium line-through" } else { "text-sm font-medium" }}
                                            style={if task.completed { "color: var(--fg-muted);" } else { "color: var(--fg-primary);" }}
                                        >
                                            {&task.title}
                                        </p>
                                        if let Some(description) = &task.description {
                                            <p class="text-sm" style="color: var(--fg-secondary);">{description.clone()}</p>
                                        }
                                        <p class="text-xs mt-1" style="color: var(--fg-muted);">
                                            {match (&task.due_date, &task.created_by_name) {
                                                (Some(due), Some(name)) => format!("Due {} · by {}", due, name),
                                                (Some(due), None) => format!("Due {}", due),
                                                (None, Some(name)) => format!("by {}", name),
                                                (None, None) => String::new(),
                                            }}
                                        </p>
                                    </div>
                                </div>
                                if session.can_delete_task(task) && !pending {
                                    <button
                                        class="text-xs"
                                        style="color: var(--color-error);"
                                        onclick={on_delete.reform(move |_| id)}
                                    >
                                        {"Delete"}
                                    </button>
                                }
                            </div>
                        }
                    })}
                    if list.is_empty() {
                        <p class="text-sm py-4 text-center" style="color: var(--fg-muted);">
                            {"No tasks for this contact yet"}
                        </p>
                    }
                </div>
            }
        </div>
    }
}
