use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::toast::use_toasts;
use crate::services::testimonials;
use haven_shared::{Testimonial, TestimonialRequest};

// Deletes and modal saves settle after renders their handlers never saw, so
// the board is driven through a reducer rather than `set()` on a stale clone.
#[derive(Clone, PartialEq, Default)]
struct Board {
    entries: Vec<Testimonial>,
}

enum BoardAction {
    Load(Vec<Testimonial>),
    Upsert(Testimonial),
    Remove(i64),
}

impl yew::functional::Reducible for Board {
    type Action = BoardAction;

    fn reduce(self: Rc<Self>, action: BoardAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            BoardAction::Load(entries) => next.entries = entries,
            BoardAction::Upsert(saved) => {
                match next.entries.iter().position(|t| t.id == saved.id) {
                    Some(index) => next.entries[index] = saved,
                    None => next.entries.push(saved),
                }
                next.entries.sort_by_key(|t| t.sort_order);
            }
            BoardAction::Remove(id) => next.entries.retain(|t| t.id != id),
        }
        Rc::new(next)
    }
}

#[function_component(TestimonialsPage)]
pub fn testimonials_page() -> Html {
    let toasts = use_toasts();
    let list = use_reducer(Board::default);
    let loading = use_state(|| true);
    let editing = use_state(|| None::<Option<Testimonial>>);

    {
        let list = list.clone();
        let loading = loading.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                if let Ok(fetched) = testimonials::list().await {
                    list.dispatch(BoardAction::Load(fetched));
                }
                loading.set(false);
            });
            || ()
        });
    }

    let on_seed = {
        let list = list.clone();
        let toasts = toasts.clone();
        Callback::from(move |_: MouseEvent| {
            let list = list.clone();
            let toasts = toasts.clone();
            spawn_local(async move {
                match testimonials::seed().await {
                    Ok(seeded) => {
                        list.dispatch(BoardAction::Load(seeded));
                        toasts.success("Starter testimonials added");
                    }
                    Err(e) => toasts.error(format!("Could not seed testimonials: {}", e.message)),
                }
            });
        })
    };

    let on_delete = {
        let list = list.clone();
        let toasts = toasts.clone();
        Callback::from(move |id: i64| {
            let list = list.clone();
            let toasts = toasts.clone();
            spawn_local(async move {
                match testimonials::delete(id).await {
                    Ok(()) => {
                        list.dispatch(BoardAction::Remove(id));
                        toasts.success("Testimonial deleted");
                    }
                    Err(e) => toasts.error(format!("Could not delete: {}", e.message)),
                }
            });
        })
    };

    let on_saved = {
        let list = list.clone();
        let editing = editing.clone();
        Callback::from(move |saved: Testimonial| {
            list.dispatch(BoardAction::Upsert(saved));
            editing.set(None);
        })
    };

    html! {
        <div class="p-6 max-w-4xl mx-auto space-y-4">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold" style="color: var(--fg-primary);">{"Testimonials"}</h1>
                <button
                    onclick={{
                        let editing = editing.clone();
                        Callback::from(move |_| editing.set(Some(None)))
                    }}
                    class="px-4 py-2 rounded-lg text-sm font-medium"
                    style="background-color: var(--button-primary-bg); color: var(--button-primary-text);"
                >
                    {"+ New Testimonial"}
                </button>
            </div>

            if *loading {
                <div class="flex justify-center py-12">
                    <div class="animate-spin rounded-full h-8 w-8 border-b-2" style="border-color: var(--accent-primary);"></div>
                </div>
            } else if list.entries.is_empty() {
                <div class="p-8 rounded-lg text-center space-y-3" style="background-color: var(--bg-secondary); border: 1px solid var(--border-primary);">
                    <p class="text-sm" style="color: var(--fg-muted);">{"No testimonials yet"}</p>
                    <button
                        onclick={on_seed}
                        class="px-4 py-2 rounded-lg text-sm"
                        style="background-color: var(--bg-tertiary); color: var(--fg-secondary);"
                    >
                        {"Add starter set"}
                    </button>
                </div>
            } else {
                <div class="space-y-2">
                    { for list.entries.iter().map(|testimonial| {
                        let id = testimonial.id;
                        let item = testimonial.clone();
                        let editing = editing.clone();
                        let stars = "★".repeat(testimonial.rating.clamp(0, 5) as usize);
                        html! {
                            <div
                                key={id}
                                class="p-4 rounded-lg flex items-start justify-between"
                                style={format!(
                                    "background-color: var(--bg-secondary); border: 1px solid var(--border-primary);{}",
                                    if testimonial.visible { "" } else { " opacity: 0.5;" }
                                )}
                            >
                                <div class="space-y-1">
                                    <p class="text-sm italic" style="color: var(--fg-secondary);">
                                        {format!("\u{201c}{}\u{201d}", testimonial.quote)}
                                    </p>
                                    <p class="text-sm font-medium" style="color: var(--fg-primary);">
                                        {&testimonial.author}
                                        if let Some(role) = &testimonial.role {
                                            <span class="font-normal" style="color: var(--fg-muted);">
                                                {format!(" · {}", role)}
                                            </span>
                                        }
                                    </p>
                                    <p class="text-xs" style="color: var(--color-warning);">
                                        {stars}
                                    </p>
                                </div>
                                <div class="flex items-center space-x-2">
                                    <button
                                        class="text-xs"
                                        style="color: var(--accent-primary);"
                                        onclick={Callback::from(move |_| editing.set(Some(Some(item.clone()))))}
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
                                </div>
                            </div>
                        }
                    })}
                </div>
            }

            if let Some(target) = (*editing).clone() {
                <TestimonialModal
                    testimonial={target}
                    on_saved={on_saved}
                    on_close={{
                        let editing = editing.clone();
                        Callback::from(move |_| editing.set(None))
                    }}
                />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct TestimonialModalProps {
    /// `None` creates, `Some` edits.
    testimonial: Option<Testimonial>,
    on_saved: Callback<Testimonial>,
    on_close: Callback<()>,
}

#[function_component(TestimonialModal)]
fn testimonial_modal(props: &TestimonialModalProps) -> Html {
    let toasts = use_toasts();
    let existing = props.testimonial.clone();
    let author = use_state(|| existing.as_ref().map(|t| t.author.clone()).unwrap_or_default());
    let role = use_state(|| {
        existing
            .as_ref()
            .and_then(|t| t.role.clone())
            .unwrap_or_default()
    });
    let quote = use_state(|| existing.as_ref().map(|t| t.quote.clone()).unwrap_or_default());
    let rating = use_state(|| existing.as_ref().map(|t| t.rating).unwrap_or(5));
    let visible = use_state(|| existing.as_ref().map(|t| t.visible).unwrap_or(true));
    let saving = use_state(|| false);

    let onsubmit = {
        let author = author.clone();
        let role = role.clone();
        let quote = quote.clone();
        let rating = rating.clone();
        let visible = visible.clone();
        let saving = saving.clone();
        let toasts = toasts.clone();
        let on_saved = props.on_saved.clone();
        let existing = existing.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving || author.is_empty() || quote.is_empty() {
                return;
            }
            saving.set(true);

            let request = TestimonialRequest {
                author: (*author).clone(),
                role: (!role.is_empty()).then(|| (*role).clone()),
                quote: (*quote).clone(),
                rating: (*rating).clamp(1, 5),
                avatar_url: existing.as_ref().and_then(|t| t.avatar_url.clone()),
                visible: *visible,
                sort_order: existing.as_ref().map(|t| t.sort_order).unwrap_or(0),
            };
            let existing_id = existing.as_ref().map(|t| t.id);
            let saving = saving.clone();
            let toasts = toasts.clone();
            let on_saved = on_saved.clone();
            spawn_local(async move {
                let result = match existing_id {
                    Some(id) => testimonials::update(id, &request).await,
                    None => testimonials::create(&request).await,
                };
                match result {
                    Ok(saved) => {
                        toasts.success("Testimonial saved");
                        on_saved.emit(saved);
                    }
                    Err(e) => toasts.error(format!("Could not save: {}", e.message)),
                }
                saving.set(false);
            });
        })
    };

    html! {
        <div class="fixed inset-0 z-50 flex items-center justify-center p-4" style="background-color: rgba(0, 0, 0, 0.5);">
            <div class="w-full max-w-md rounded-lg p-6 space-y-4" style="background-color: var(--bg-secondary); border: 1px solid var(--border-primary);">
                <div class="flex items-center justify-between">
                    <h2 class="text-lg font-semibold" style="color: var(--fg-primary);">
                        {if existing.is_some() { "Edit Testimonial" } else { "New Testimonial" }}
                    </h2>
                    <button onclick={props.on_close.reform(|_| ())} style="color: var(--fg-muted);">{"✕"}</button>
                </div>

                <form class="space-y-3" {onsubmit}>
                    <input
                        type="text"
                        placeholder="Author"
                        required=true
                        class="w-full px-3 py-2 rounded-lg text-sm"
                        style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                        value={(*author).clone()}
                        oninput={{
                            let author = author.clone();
                            Callback::from(move |e: InputEvent| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                author.set(input.value());
                            })
                        }}
                    />
                    <input
                        type="text"
                        placeholder="Role (e.g. Buyer, 2025)"
                        class="w-full px-3 py-2 rounded-lg text-sm"
                        style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                        value={(*role).clone()}
                        oninput={{
                            let role = role.clone();
                            Callback::from(move |e: InputEvent| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                role.set(input.value());
                            })
                        }}
                    />
                    <textarea
                        rows="3"
                        placeholder="Quote"
                        required=true
                        class="w-full px-3 py-2 rounded-lg text-sm"
                        style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                        value={(*quote).clone()}
                        oninput={{
                            let quote = quote.clone();
                            Callback::from(move |e: InputEvent| {
                                let area: HtmlTextAreaElement = e.target_unchecked_into();
                                quote.set(area.value());
                            })
                        }}
                    />
                    <div class="flex items-center justify-between">
                        <label class="flex items-center space-x-2 text-sm" style="color: var(--fg-secondary);">
                            <span>{"Rating"}</span>
                            <input
                                type="number"
                                min="1"
                                max="5"
                                class="w-16 px-2 py-1 rounded text-sm"
                                style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                                value={rating.to_string()}
                                oninput={{
                                    let rating = rating.clone();
                                    Callback::from(move |e: InputEvent| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        if let Ok(parsed) = input.value().parse::<i32>() {
                                            rating.set(parsed);
                                        }
                                    })
                                }}
                            />
                        </label>
                        <label class="flex items-center space-x-2 text-sm cursor-pointer" style="color: var(--fg-secondary);">
                            <input
                                type="checkbox"
                                checked={*visible}
                                onchange={{
                                    let visible = visible.clone();
                                    Callback::from(move |_| visible.set(!*visible))
                                }}
                            />
                            <span>{"Visible on the website"}</span>
                        </label>
                    </div>

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
                            {if *saving { "Saving..." } else { "Save" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
