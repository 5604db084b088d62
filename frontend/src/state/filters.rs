// Client-side filtering and sorting over the already-fetched contact list.
// The active filter mirrors into the URL query so back/forward restores the
// view.

use std::collections::BTreeMap;

use haven_shared::Contact;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactType {
    Owner,
    Buyer,
    Interested,
}

impl ContactType {
    pub fn all() -> [ContactType; 3] {
        [ContactType::Owner, ContactType::Buyer, ContactType::Interested]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactType::Owner => "owner",
            ContactType::Buyer => "buyer",
            ContactType::Interested => "interested",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContactType::Owner => "Owner",
            ContactType::Buyer => "Buyer",
            ContactType::Interested => "Interested",
        }
    }

    pub fn from_str(s: &str) -> Option<ContactType> {
        match s {
            "owner" => Some(ContactType::Owner),
            "buyer" => Some(ContactType::Buyer),
            "interested" => Some(ContactType::Interested),
            _ => None,
        }
    }

    /// Matches either the server-derived role flag or the legacy
    /// `contact_type` string that predates the flags.
    pub fn matches(&self, contact: &Contact) -> bool {
        let legacy = contact.contact_type.as_deref();
        match self {
            ContactType::Owner => contact.is_owner || legacy == Some("owner"),
            ContactType::Buyer => contact.is_buyer || legacy == Some("buyer"),
            ContactType::Interested => contact.is_interested || legacy == Some("interested"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Newest,
    Oldest,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Newest => "Newest first",
            SortKey::Oldest => "Oldest first",
        }
    }

    pub fn from_str(s: &str) -> Option<SortKey> {
        match s {
            "name" => Some(SortKey::Name),
            "newest" => Some(SortKey::Newest),
            "oldest" => Some(SortKey::Oldest),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct ContactFilter {
    pub search: String,
    pub types: Vec<ContactType>,
    pub sort: SortKey,
}

impl ContactFilter {
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.types.is_empty() && self.sort == SortKey::default()
    }

    pub fn toggle_type(&mut self, contact_type: ContactType) {
        if let Some(pos) = self.types.iter().position(|t| *t == contact_type) {
            self.types.remove(pos);
        } else {
            self.types.push(contact_type);
        }
    }

    /// Derive the visible list: search over name/email/phone, type
    /// multi-select (any match), then sort.
    pub fn apply(&self, contacts: &[Contact]) -> Vec<Contact> {
        let query = self.search.to_lowercase();
        let mut result: Vec<Contact> = contacts
            .iter()
            .filter(|c| {
                let type_match =
                    self.types.is_empty() || self.types.iter().any(|t| t.matches(c));
                let search_match = query.is_empty()
                    || c.full_name().to_lowercase().contains(&query)
                    || c.email.as_ref().map(|e| e.to_lowercase().contains(&query)).unwrap_or(false)
                    || c.phone.as_ref().map(|p| p.contains(&query)).unwrap_or(false);
                type_match && search_match
            })
            .cloned()
            .collect();

        match self.sort {
            SortKey::Name => result.sort_by(|a, b| {
                a.full_name().to_lowercase().cmp(&b.full_name().to_lowercase())
            }),
            SortKey::Newest => result.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortKey::Oldest => result.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        }
        result
    }

    /// Raw key/value pairs for the router's query serializer, empty when
    /// nothing is active. The router percent-encodes the values itself.
    pub fn to_pairs(&self) -> BTreeMap<&'static str, String> {
        let mut pairs = BTreeMap::new();
        if !self.search.is_empty() {
            pairs.insert("q", self.search.clone());
        }
        if !self.types.is_empty() {
            let types: Vec<&str> = self.types.iter().map(|t| t.as_str()).collect();
            pairs.insert("types", types.join(","));
        }
        if self.sort != SortKey::default() {
            pairs.insert("sort", self.sort.as_str().to_string());
        }
        pairs
    }

    /// Encode into a URL query string ("" when nothing is active).
    pub fn to_query(&self) -> String {
        let pairs: Vec<String> = self
            .to_pairs()
            .iter()
            .map(|(key, value)| format!("{}={}", key, encode(value)))
            .collect();
        pairs.join("&")
    }

    /// Decode from a URL query string; unknown keys and values are ignored.
    /// Values decode before any splitting, since the serializer writes the
    /// comma in a joined `types` value as `%2C`.
    pub fn from_query(query: &str) -> Self {
        let mut filter = ContactFilter::default();
        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, value)) = pair.split_once('=') else { continue };
            match key {
                "q" => filter.search = decode(value),
                "types" => {
                    filter.types = decode(value)
                        .split(',')
                        .filter_map(ContactType::from_str)
                        .collect();
                }
                "sort" => {
                    if let Some(sort) = SortKey::from_str(&decode(value)) {
                        filter.sort = sort;
                    }
                }
                _ => {}
            }
        }
        filter
    }
}

fn encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

fn decode(value: &str) -> String {
    let mut out = Vec::with_capacity(value.len());
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            // Slice the bytes, not the str: the two bytes after '%' may sit
            // inside a multi-byte character.
            b'%' if i + 3 <= bytes.len() => {
                let parsed = std::str::from_utf8(&bytes[i + 1..i + 3])
                    .ok()
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                match parsed {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn contact(id: i64, first: &str, owner: bool, buyer: bool, legacy: Option<&str>) -> Contact {
        Contact {
            id,
            first_name: first.to_string(),
            last_name: "Test".to_string(),
            email: Some(format!("{}@example.com", first.to_lowercase())),
            phone: None,
            is_owner: owner,
            is_buyer: buyer,
            is_interested: false,
            contact_type: legacy.map(str::to_string),
            notes: None,
            additional_info: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, id as u32 % 60).unwrap(),
            updated_at: None,
        }
    }

    fn sample() -> Vec<Contact> {
        vec![
            contact(1, "Alice", true, false, None),
            contact(2, "Bruno", false, true, None),
            contact(3, "Carla", false, false, Some("owner")),
            contact(4, "Diego", false, false, None),
        ]
    }

    #[test]
    fn owner_filter_matches_flag_and_legacy_string() {
        let filter = ContactFilter {
            types: vec![ContactType::Owner],
            ..Default::default()
        };
        let visible = filter.apply(&sample());
        let ids: Vec<i64> = visible.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn clearing_filters_restores_full_set() {
        let contacts = sample();
        let mut filter = ContactFilter {
            types: vec![ContactType::Buyer],
            ..Default::default()
        };
        assert_eq!(filter.apply(&contacts).len(), 1);

        filter.types.clear();
        assert_eq!(filter.apply(&contacts).len(), contacts.len());
    }

    #[test]
    fn search_matches_name_and_email_case_insensitively() {
        let filter = ContactFilter {
            search: "BRUNO".to_string(),
            ..Default::default()
        };
        let visible = filter.apply(&sample());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 2);
    }

    #[test]
    fn type_multi_select_is_any_match() {
        let filter = ContactFilter {
            types: vec![ContactType::Owner, ContactType::Buyer],
            ..Default::default()
        };
        let ids: Vec<i64> = filter.apply(&sample()).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn sort_newest_reverses_creation_order() {
        let filter = ContactFilter {
            sort: SortKey::Newest,
            ..Default::default()
        };
        let ids: Vec<i64> = filter.apply(&sample()).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);
    }

    #[test]
    fn query_round_trip_preserves_filter() {
        let filter = ContactFilter {
            search: "van der Berg".to_string(),
            types: vec![ContactType::Owner, ContactType::Interested],
            sort: SortKey::Oldest,
        };
        let query = filter.to_query();
        assert_eq!(ContactFilter::from_query(&query), filter);
    }

    #[test]
    fn empty_filter_encodes_to_empty_query() {
        assert_eq!(ContactFilter::default().to_query(), "");
        assert_eq!(ContactFilter::from_query(""), ContactFilter::default());
    }

    #[test]
    fn unknown_query_keys_are_ignored() {
        let filter = ContactFilter::from_query("?q=ana&page=3&types=owner,bogus");
        assert_eq!(filter.search, "ana");
        assert_eq!(filter.types, vec![ContactType::Owner]);
    }

    #[test]
    fn router_serialized_query_round_trips() {
        // The navigation path hands `to_pairs()` to the router, whose
        // serializer writes the comma in a joined value as %2C. A reload
        // parses that string back through `from_query`.
        let filter = ContactFilter {
            search: "van der Berg".to_string(),
            types: vec![ContactType::Owner, ContactType::Interested],
            sort: SortKey::Oldest,
        };
        let query = serde_urlencoded::to_string(filter.to_pairs()).unwrap();
        assert!(query.contains("types=owner%2Cinterested"));
        assert_eq!(ContactFilter::from_query(&query), filter);
    }

    #[test]
    fn percent_encoded_types_value_is_decoded_before_splitting() {
        let filter = ContactFilter::from_query("types=owner%2Cbuyer");
        assert_eq!(filter.types, vec![ContactType::Owner, ContactType::Buyer]);
    }

    #[test]
    fn stray_percent_before_multibyte_text_decodes_leniently() {
        // An invalid hex pair stays a literal '%', even when the following
        // bytes belong to a multi-byte character.
        let filter = ContactFilter::from_query("q=%aéx");
        assert_eq!(filter.search, "%aéx");
    }
}
