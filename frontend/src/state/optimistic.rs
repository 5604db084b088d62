// One optimistic-list contract for tasks, comments and prospects instead of
// three hand-rolled copies. The list applies a change synchronously, hands
// back a snapshot, and the caller reconciles with the server response or
// rolls the snapshot back.
//
// New entities carry a caller-generated local id (negative at call sites,
// so it can never collide with a server id) until the server assigns the
// real one.
//
// Components hold the list in `use_reducer` and reconcile through
// `ListAction`. A cloned `UseStateHandle` derefs to the render-time value,
// so a `set()` from an async continuation would write a pre-mutation
// snapshot back and erase the placeholder it was meant to confirm.

use std::rc::Rc;

/// Pre-mutation snapshot for an edit or delete, carrying enough to restore
/// both value and position.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot<T> {
    index: usize,
    value: T,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OptimisticList<T> {
    items: Vec<T>,
    id_of: fn(&T) -> i64,
}

impl<T: Clone> OptimisticList<T> {
    pub fn new(items: Vec<T>, id_of: fn(&T) -> i64) -> Self {
        Self { items, id_of }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| (self.id_of)(item) == id)
    }

    /// Capture an entry before dispatching `BeginUpdate`/`BeginRemove`, so
    /// the failure path can dispatch `Rollback` later.
    pub fn snapshot_of(&self, id: i64) -> Option<Snapshot<T>> {
        let index = self.position(id)?;
        Some(Snapshot {
            index,
            value: self.items[index].clone(),
        })
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.items.iter().position(|item| (self.id_of)(item) == id)
    }

    /// Step 2 of a create: show the entry immediately under its local id.
    pub fn insert_pending(&mut self, item: T) {
        self.items.insert(0, item);
    }

    /// Create succeeded: swap the placeholder for the server-confirmed
    /// record (real id, server timestamps).
    pub fn confirm_insert(&mut self, local_id: i64, confirmed: T) {
        if let Some(index) = self.position(local_id) {
            self.items[index] = confirmed;
        }
    }

    /// Create failed: remove exactly the placeholder, nothing else.
    pub fn rollback_insert(&mut self, local_id: i64) {
        if let Some(index) = self.position(local_id) {
            self.items.remove(index);
        }
    }

    /// Patch an entry in place, returning the snapshot to roll back to.
    pub fn begin_update(&mut self, id: i64, updated: T) -> Option<Snapshot<T>> {
        let index = self.position(id)?;
        let value = std::mem::replace(&mut self.items[index], updated);
        Some(Snapshot { index, value })
    }

    /// Update succeeded: settle on the server's authoritative record.
    pub fn confirm_update(&mut self, id: i64, confirmed: T) {
        if let Some(index) = self.position(id) {
            self.items[index] = confirmed;
        }
    }

    /// Remove an entry, returning the snapshot to roll back to.
    pub fn begin_remove(&mut self, id: i64) -> Option<Snapshot<T>> {
        let index = self.position(id)?;
        let value = self.items.remove(index);
        Some(Snapshot { index, value })
    }

    /// Restore the pre-mutation value at its original position.
    pub fn rollback(&mut self, snapshot: Snapshot<T>) {
        let Snapshot { index, value } = snapshot;
        let id = (self.id_of)(&value);
        match self.position(id) {
            // Edit rollback: the entry is still present, put the old value back.
            Some(current) => self.items[current] = value,
            // Delete rollback: reinsert where it was.
            None => self.items.insert(index.min(self.items.len()), value),
        }
    }
}

pub enum ListAction<T> {
    Load(Vec<T>),
    InsertPending(T),
    ConfirmInsert { local_id: i64, confirmed: T },
    RollbackInsert { local_id: i64 },
    BeginUpdate { id: i64, updated: T },
    ConfirmUpdate { id: i64, confirmed: T },
    BeginRemove { id: i64 },
    Rollback(Snapshot<T>),
}

impl<T: Clone> yew::functional::Reducible for OptimisticList<T> {
    type Action = ListAction<T>;

    fn reduce(self: Rc<Self>, action: ListAction<T>) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ListAction::Load(items) => next.items = items,
            ListAction::InsertPending(item) => next.insert_pending(item),
            ListAction::ConfirmInsert { local_id, confirmed } => {
                next.confirm_insert(local_id, confirmed)
            }
            ListAction::RollbackInsert { local_id } => next.rollback_insert(local_id),
            ListAction::BeginUpdate { id, updated } => {
                next.begin_update(id, updated);
            }
            ListAction::ConfirmUpdate { id, confirmed } => next.confirm_update(id, confirmed),
            ListAction::BeginRemove { id } => {
                next.begin_remove(id);
            }
            ListAction::Rollback(snapshot) => next.rollback(snapshot),
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Entry {
        id: i64,
        label: &'static str,
    }

    fn entry(id: i64, label: &'static str) -> Entry {
        Entry { id, label }
    }

    fn list() -> OptimisticList<Entry> {
        OptimisticList::new(
            vec![entry(1, "first"), entry(2, "second"), entry(3, "third")],
            |e| e.id,
        )
    }

    #[test]
    fn pending_insert_is_visible_immediately() {
        let mut list = list();
        list.insert_pending(entry(-100, "draft"));
        assert_eq!(list.len(), 4);
        assert_eq!(list.items()[0].id, -100);
    }

    #[test]
    fn confirm_insert_swaps_local_id_for_server_record() {
        let mut list = list();
        list.insert_pending(entry(-100, "draft"));
        list.confirm_insert(-100, entry(42, "draft"));

        assert!(list.get(-100).is_none());
        assert_eq!(list.get(42), Some(&entry(42, "draft")));
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn rollback_insert_removes_exactly_that_entry() {
        let mut list = list();
        list.insert_pending(entry(-100, "draft"));
        list.rollback_insert(-100);

        assert_eq!(
            list.items(),
            &[entry(1, "first"), entry(2, "second"), entry(3, "third")]
        );
    }

    #[test]
    fn update_rollback_restores_value_in_place() {
        let mut list = list();
        let snapshot = list.begin_update(2, entry(2, "patched")).unwrap();
        assert_eq!(list.get(2), Some(&entry(2, "patched")));

        list.rollback(snapshot);
        assert_eq!(list.get(2), Some(&entry(2, "second")));
        assert_eq!(list.items()[1].id, 2);
    }

    #[test]
    fn remove_rollback_restores_position() {
        let mut list = list();
        let snapshot = list.begin_remove(2).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.get(2).is_none());

        list.rollback(snapshot);
        assert_eq!(
            list.items(),
            &[entry(1, "first"), entry(2, "second"), entry(3, "third")]
        );
    }

    #[test]
    fn remove_rollback_clamps_index_when_list_shrank() {
        let mut list = list();
        let snapshot = list.begin_remove(3).unwrap();
        list.begin_remove(1).unwrap();
        list.begin_remove(2).unwrap();

        list.rollback(snapshot);
        assert_eq!(list.items(), &[entry(3, "third")]);
    }

    #[test]
    fn mutations_never_touch_unrelated_entries() {
        let mut list = list();
        let snapshot = list.begin_update(1, entry(1, "patched")).unwrap();
        list.insert_pending(entry(-5, "draft"));
        list.rollback(snapshot);

        assert_eq!(list.get(2), Some(&entry(2, "second")));
        assert_eq!(list.get(3), Some(&entry(3, "third")));
        assert_eq!(list.get(-5), Some(&entry(-5, "draft")));
    }

    #[test]
    fn missing_ids_are_ignored() {
        let mut list = list();
        assert!(list.begin_update(99, entry(99, "ghost")).is_none());
        assert!(list.begin_remove(99).is_none());
        list.confirm_insert(99, entry(99, "ghost"));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn dispatched_confirm_lands_on_the_latest_value() {
        use yew::functional::Reducible;

        // Mutations that arrive while a create is in flight must survive
        // the create's confirmation.
        let state = Rc::new(list());
        let state = state.reduce(ListAction::InsertPending(entry(-100, "draft")));
        let state = state.reduce(ListAction::BeginRemove { id: 1 });
        let state = state.reduce(ListAction::ConfirmInsert {
            local_id: -100,
            confirmed: entry(42, "draft"),
        });

        assert_eq!(state.get(42), Some(&entry(42, "draft")));
        assert!(state.get(-100).is_none());
        assert!(state.get(1).is_none());
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn dispatched_rollback_uses_a_snapshot_taken_before_the_mutation() {
        use yew::functional::Reducible;

        let state = Rc::new(list());
        let snapshot = state.snapshot_of(2).unwrap();
        let state = state.reduce(ListAction::BeginUpdate {
            id: 2,
            updated: entry(2, "patched"),
        });
        let state = state.reduce(ListAction::InsertPending(entry(-5, "draft")));
        let state = state.reduce(ListAction::Rollback(snapshot));

        assert_eq!(state.get(2), Some(&entry(2, "second")));
        assert_eq!(state.get(-5), Some(&entry(-5, "draft")));
    }
}
