// Typed field access over a single form record. A `Field` is a get/set
// lens built from plain fn pointers, so nested paths like the office
// address or a hero subsection are checked at compile time instead of
// being addressed by dotted strings at runtime.

pub struct Field<R, T> {
    get: fn(&R) -> &T,
    set: fn(&mut R, T),
}

// Manual impls; deriving would put bounds on R and T.
impl<R, T> Clone for Field<R, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, T> Copy for Field<R, T> {}

impl<R, T> PartialEq for Field<R, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::fn_addr_eq(self.get, other.get) && std::ptr::fn_addr_eq(self.set, other.set)
    }
}

impl<R, T> Field<R, T> {
    pub const fn new(get: fn(&R) -> &T, set: fn(&mut R, T)) -> Self {
        Self { get, set }
    }

    pub fn get<'a>(&self, record: &'a R) -> &'a T {
        (self.get)(record)
    }

    pub fn set(&self, record: &mut R, value: T) {
        (self.set)(record, value)
    }
}

/// A form record plus dirty bookkeeping. Editors mutate through `set`,
/// which marks the record dirty; a successful save clears the flag.
#[derive(Clone, Debug, PartialEq)]
pub struct FormState<R> {
    value: R,
    dirty: bool,
}

impl<R: Clone> FormState<R> {
    pub fn new(value: R) -> Self {
        Self { value, dirty: false }
    }

    pub fn value(&self) -> &R {
        &self.value
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn get<'a, T>(&'a self, field: Field<R, T>) -> &'a T {
        field.get(&self.value)
    }

    pub fn set<T>(&mut self, field: Field<R, T>, value: T) {
        field.set(&mut self.value, value);
        self.dirty = true;
    }

    /// Replace the whole record, e.g. with a freshly fetched copy.
    pub fn reset(&mut self, value: R) {
        self.value = value;
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Default)]
    struct Address {
        street: String,
        city: String,
    }

    #[derive(Clone, Debug, PartialEq, Default)]
    struct Record {
        name: String,
        address: Address,
    }

    const NAME: Field<Record, String> =
        Field::new(|r| &r.name, |r, v| r.name = v);
    const STREET: Field<Record, String> =
        Field::new(|r| &r.address.street, |r, v| r.address.street = v);

    #[test]
    fn set_through_nested_field_marks_dirty() {
        let mut form = FormState::new(Record::default());
        assert!(!form.is_dirty());

        form.set(STREET, "Calle Mayor 1".to_string());
        assert!(form.is_dirty());
        assert_eq!(form.get(STREET), "Calle Mayor 1");
        assert_eq!(form.value().address.street, "Calle Mayor 1");
    }

    #[test]
    fn fields_are_independent() {
        let mut form = FormState::new(Record::default());
        form.set(NAME, "Central".to_string());
        assert_eq!(form.get(STREET), "");
        assert_eq!(form.get(NAME), "Central");
    }

    #[test]
    fn reset_replaces_record_and_clears_dirty() {
        let mut form = FormState::new(Record::default());
        form.set(NAME, "temp".to_string());

        let fetched = Record {
            name: "Server copy".to_string(),
            address: Address::default(),
        };
        form.reset(fetched.clone());
        assert!(!form.is_dirty());
        assert_eq!(form.value(), &fetched);
    }
}
