use gloo::timers::callback::Timeout;
use yew::prelude::*;

use crate::state::save_tracker::{SaveEvent, SaveState, SaveTracker};

/// Feeds `RevertElapsed` back into the machine once the indicator delay
/// passes.
pub fn schedule_revert(
    tracker: UseReducerHandle<SaveTracker>,
    module: &'static str,
    delay_ms: u32,
) {
    Timeout::new(delay_ms, move || {
        tracker.dispatch((module, SaveEvent::RevertElapsed));
    })
    .forget();
}

/// Small inline indicator next to a module's save button.
#[derive(Properties, PartialEq)]
pub struct SaveBadgeProps {
    pub state: SaveState,
}

#[function_component(SaveBadge)]
pub fn save_badge(props: &SaveBadgeProps) -> Html {
    let (label, style) = match props.state {
        SaveState::Idle => return html! {},
        SaveState::Modified => ("Unsaved changes", "color: var(--color-warning);"),
        SaveState::Saving => ("Saving...", "color: var(--fg-muted);"),
        SaveState::Saved => ("Saved", "color: var(--color-success);"),
        SaveState::Error => ("Save failed", "color: var(--color-error);"),
    };
    html! {
        <span class="text-xs font-medium" {style}>{label}</span>
    }
}
