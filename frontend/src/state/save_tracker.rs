// Per-module save bookkeeping for detail pages. Each named module (basic
// info, notes, ...) runs its own little machine; modules save independently
// and never touch each other's state.
//
// Idle -> Modified -> Saving -> Saved -> Idle          (after SAVED_REVERT_MS)
//                            -> Error -> Modified      (after ERROR_REVERT_MS)
//
// `has_changes` tracks edits not yet covered by a save: starting a save
// clears it, an edit while saving re-sets it, and a failed save restores it.
// Saved reverts to Modified instead of Idle when such edits exist.
//
// The machine itself is synchronous; the component layer schedules a
// `Timeout` for the reversion delays and feeds `RevertElapsed` back in.

use std::collections::BTreeMap;

pub const SAVED_REVERT_MS: u32 = 2_000;
pub const ERROR_REVERT_MS: u32 = 3_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SaveState {
    #[default]
    Idle,
    Modified,
    Saving,
    Saved,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveEvent {
    Edited,
    SaveStarted,
    SaveSucceeded,
    SaveFailed,
    RevertElapsed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
struct ModuleSave {
    state: SaveState,
    has_changes: bool,
}

impl ModuleSave {
    fn transition(&mut self, event: SaveEvent) {
        use SaveEvent::*;
        use SaveState::*;

        match (self.state, event) {
            (Idle | Modified | Error | Saved, Edited) => {
                self.state = Modified;
                self.has_changes = true;
            }
            // Edits while a save is in flight re-set the changes flag so
            // the user can save again once this round trip settles.
            (Saving, Edited) => self.has_changes = true,
            // The request snapshots the current edits, so they are covered
            // from this point on.
            (Modified, SaveStarted) => {
                self.state = Saving;
                self.has_changes = false;
            }
            (Saving, SaveSucceeded) => self.state = Saved,
            (Saving, SaveFailed) => {
                self.state = Error;
                self.has_changes = true;
            }
            (Saved, RevertElapsed) => {
                self.state = if self.has_changes { Modified } else { Idle };
            }
            // Failure keeps the modified flag so the user can retry.
            (Error, RevertElapsed) => self.state = Modified,
            _ => {}
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SaveTracker {
    modules: BTreeMap<&'static str, ModuleSave>,
}

impl SaveTracker {
    pub fn new(modules: &[&'static str]) -> Self {
        Self {
            modules: modules.iter().map(|m| (*m, ModuleSave::default())).collect(),
        }
    }

    pub fn state(&self, module: &str) -> SaveState {
        self.modules.get(module).map(|m| m.state).unwrap_or_default()
    }

    pub fn has_changes(&self, module: &str) -> bool {
        self.modules.get(module).map(|m| m.has_changes).unwrap_or(false)
    }

    pub fn any_changes(&self) -> bool {
        self.modules.values().any(|m| m.has_changes)
    }

    pub fn transition(&mut self, module: &str, event: SaveEvent) {
        if let Some(entry) = self.modules.get_mut(module) {
            entry.transition(event);
        }
    }
}

// Components hold the tracker in `use_reducer` so timer callbacks always
// transition the latest value.
impl yew::functional::Reducible for SaveTracker {
    type Action = (&'static str, SaveEvent);

    fn reduce(self: std::rc::Rc<Self>, action: Self::Action) -> std::rc::Rc<Self> {
        let mut next = (*self).clone();
        next.transition(action.0, action.1);
        std::rc::Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODULES: &[&str] = &["basic_info", "contact_details", "notes", "interest_forms"];

    #[test]
    fn edit_moves_only_that_module_to_modified() {
        let mut tracker = SaveTracker::new(MODULES);
        tracker.transition("notes", SaveEvent::Edited);

        assert_eq!(tracker.state("notes"), SaveState::Modified);
        assert!(tracker.has_changes("notes"));
        for other in ["basic_info", "contact_details", "interest_forms"] {
            assert_eq!(tracker.state(other), SaveState::Idle);
            assert!(!tracker.has_changes(other));
        }
    }

    #[test]
    fn edit_recovers_from_error_state() {
        let mut tracker = SaveTracker::new(MODULES);
        tracker.transition("notes", SaveEvent::Edited);
        tracker.transition("notes", SaveEvent::SaveStarted);
        tracker.transition("notes", SaveEvent::SaveFailed);
        assert_eq!(tracker.state("notes"), SaveState::Error);

        tracker.transition("notes", SaveEvent::Edited);
        assert_eq!(tracker.state("notes"), SaveState::Modified);
    }

    #[test]
    fn successful_save_reverts_to_idle_with_changes_cleared() {
        let mut tracker = SaveTracker::new(MODULES);
        tracker.transition("notes", SaveEvent::Edited);
        tracker.transition("notes", SaveEvent::SaveStarted);
        assert_eq!(tracker.state("notes"), SaveState::Saving);

        tracker.transition("notes", SaveEvent::SaveSucceeded);
        assert_eq!(tracker.state("notes"), SaveState::Saved);
        assert!(!tracker.has_changes("notes"));

        tracker.transition("notes", SaveEvent::RevertElapsed);
        assert_eq!(tracker.state("notes"), SaveState::Idle);
    }

    #[test]
    fn failed_save_keeps_changes_and_reverts_to_modified() {
        let mut tracker = SaveTracker::new(MODULES);
        tracker.transition("basic_info", SaveEvent::Edited);
        tracker.transition("basic_info", SaveEvent::SaveStarted);
        tracker.transition("basic_info", SaveEvent::SaveFailed);

        assert_eq!(tracker.state("basic_info"), SaveState::Error);
        assert!(tracker.has_changes("basic_info"));

        tracker.transition("basic_info", SaveEvent::RevertElapsed);
        assert_eq!(tracker.state("basic_info"), SaveState::Modified);
        assert!(tracker.has_changes("basic_info"));
    }

    #[test]
    fn modules_save_independently() {
        let mut tracker = SaveTracker::new(MODULES);
        tracker.transition("notes", SaveEvent::Edited);
        tracker.transition("basic_info", SaveEvent::Edited);
        tracker.transition("notes", SaveEvent::SaveStarted);
        tracker.transition("notes", SaveEvent::SaveSucceeded);

        assert_eq!(tracker.state("notes"), SaveState::Saved);
        assert_eq!(tracker.state("basic_info"), SaveState::Modified);
        assert!(tracker.any_changes());
    }

    #[test]
    fn edit_during_save_keeps_changes_after_success() {
        let mut tracker = SaveTracker::new(MODULES);
        tracker.transition("notes", SaveEvent::Edited);
        tracker.transition("notes", SaveEvent::SaveStarted);
        tracker.transition("notes", SaveEvent::Edited);
        tracker.transition("notes", SaveEvent::SaveSucceeded);

        // The in-flight save carried the pre-edit snapshot; the concurrent
        // edit is not covered by it and must survive the success.
        assert_eq!(tracker.state("notes"), SaveState::Saved);
        assert!(tracker.has_changes("notes"));

        tracker.transition("notes", SaveEvent::RevertElapsed);
        assert_eq!(tracker.state("notes"), SaveState::Modified);
        assert!(tracker.has_changes("notes"));
    }

    #[test]
    fn unknown_module_is_inert() {
        let mut tracker = SaveTracker::new(MODULES);
        tracker.transition("bogus", SaveEvent::Edited);
        assert_eq!(tracker.state("bogus"), SaveState::Idle);
        assert!(!tracker.any_changes());
    }
}
