use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Serde adapter for `bigint` identifiers the API serializes as strings.
///
/// Serialization always emits a string; deserialization accepts either a
/// string or a bare number, since older API responses predate the string
/// convention.
pub mod bigint_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum StringOrNumber {
            String(String),
            Number(i64),
        }

        match StringOrNumber::deserialize(deserializer)? {
            StringOrNumber::String(s) => s.parse::<i64>().map_err(de::Error::custom),
            StringOrNumber::Number(n) => Ok(n),
        }
    }
}

// ============================================
// SESSION
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: Option<String>,
    /// Capability strings granted by the auth service, e.g. "tasks.edit_all".
    pub capabilities: Vec<String>,
}

// ============================================
// CONTACTS
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    // Role flags derived server-side from relationship counts.
    pub is_owner: bool,
    pub is_buyer: bool,
    pub is_interested: bool,
    /// Legacy classification string that predates the role flags.
    pub contact_type: Option<String>,
    pub notes: Option<String>,
    pub additional_info: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Partial update; absent fields are left untouched by the server, which
/// lets each editor module save only its own fields.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateContactRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<serde_json::Value>,
}

// ============================================
// TASKS
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
    pub contact_id: Option<i64>,
    pub listing_id: Option<i64>,
    pub deal_id: Option<i64>,
    pub appointment_id: Option<i64>,
    pub prospect_id: Option<i64>,
    pub created_by: i64,
    pub created_by_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub contact_id: Option<i64>,
    pub listing_id: Option<i64>,
    pub prospect_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateTaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

// ============================================
// COMMENTS
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserComment {
    pub id: i64,
    pub contact_id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCommentRequest {
    pub contact_id: i64,
    pub content: String,
}

// ============================================
// PROSPECTS (interest forms)
// ============================================

/// A neighborhood picked in a prospect's search criteria. Neighborhood ids
/// are `bigint` on the server and travel as strings on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedNeighborhood {
    #[serde(with = "bigint_string")]
    pub neighborhood_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prospect {
    pub id: i64,
    pub contact_id: i64,
    /// "sale" or "rent".
    pub listing_type: Option<String>,
    pub status: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_bedrooms: Option<i32>,
    pub min_bathrooms: Option<i32>,
    /// Minimum surface in square meters.
    pub min_area: Option<i32>,
    /// 1 (browsing) through 5 (must move now).
    pub urgency: Option<i32>,
    pub move_in_by: Option<NaiveDate>,
    pub neighborhoods: Vec<SelectedNeighborhood>,
    /// Feature toggles like "terrace", "garage", "elevator".
    #[serde(default)]
    pub extras: BTreeMap<String, bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateProspectRequest {
    pub contact_id: i64,
    pub listing_type: Option<String>,
    pub status: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_bedrooms: Option<i32>,
    pub min_bathrooms: Option<i32>,
    pub min_area: Option<i32>,
    pub urgency: Option<i32>,
    pub move_in_by: Option<NaiveDate>,
    pub neighborhoods: Vec<SelectedNeighborhood>,
    pub extras: BTreeMap<String, bool>,
}

// ============================================
// LISTINGS
// ============================================

/// Compact listing shape served to association pickers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    pub street: String,
    pub city: String,
    pub price: Option<Decimal>,
    pub listing_type: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingContact {
    pub listing_id: i64,
    pub contact_id: i64,
    /// "owner" or "buyer".
    pub relationship: String,
}

// ============================================
// TESTIMONIALS
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: i64,
    pub author: String,
    pub role: Option<String>,
    pub quote: String,
    pub rating: i32,
    pub avatar_url: Option<String>,
    pub visible: bool,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TestimonialRequest {
    pub author: String,
    pub role: Option<String>,
    pub quote: String,
    pub rating: i32,
    pub avatar_url: Option<String>,
    pub visible: bool,
    pub sort_order: i32,
}

// ============================================
// OFFICES
// ============================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OfficeAddress {
    pub street: String,
    pub city: String,
    pub state: Option<String>,
    pub postal_code: String,
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OfficeContactInfo {
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Office {
    pub id: i64,
    pub name: String,
    pub address: OfficeAddress,
    pub contact: OfficeContactInfo,
    pub hours: Option<String>,
    pub is_default: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OfficeRequest {
    pub name: String,
    pub address: OfficeAddress,
    pub contact: OfficeContactInfo,
    pub hours: Option<String>,
    pub is_default: bool,
}

// ============================================
// WEBSITE CONFIGURATION
// ============================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeroSection {
    pub title: String,
    pub subtitle: String,
    pub cta_label: String,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeoSection {
    pub meta_title: String,
    pub meta_description: String,
    pub keywords: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BrandingSection {
    pub site_name: String,
    pub logo_url: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FooterSection {
    pub tagline: String,
    pub copyright: String,
    pub facebook_url: Option<String>,
    pub instagram_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContactSection {
    pub phone: String,
    pub email: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetadataSection {
    pub locale: String,
    pub currency: String,
    pub analytics_id: Option<String>,
}

/// The whole per-site configuration bag. Loaded in one piece; the editor
/// gates which section renders, not what is loaded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WebsiteConfig {
    pub hero: HeroSection,
    pub seo: SeoSection,
    pub branding: BrandingSection,
    pub footer: FooterSection,
    pub contact: ContactSection,
    pub metadata: MetadataSection,
}

// ============================================
// LOCATIONS
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    #[serde(with = "bigint_string")]
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighborhood {
    #[serde(with = "bigint_string")]
    pub id: i64,
    #[serde(with = "bigint_string")]
    pub city_id: i64,
    pub name: String,
}

// ============================================
// DASHBOARD
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_contacts: i64,
    pub owners: i64,
    pub buyers: i64,
    pub interested: i64,
    pub open_tasks: i64,
    pub active_prospects: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "bigint_string")]
        id: i64,
    }

    #[test]
    fn bigint_serializes_as_string() {
        let json = serde_json::to_string(&Wrapper { id: 9007199254740993 }).unwrap();
        assert_eq!(json, r#"{"id":"9007199254740993"}"#);
    }

    #[test]
    fn bigint_deserializes_from_string_or_number() {
        let from_string: Wrapper = serde_json::from_str(r#"{"id":"42"}"#).unwrap();
        assert_eq!(from_string.id, 42);
        let from_number: Wrapper = serde_json::from_str(r#"{"id":42}"#).unwrap();
        assert_eq!(from_number.id, 42);
    }

    #[test]
    fn bigint_rejects_garbage() {
        let result = serde_json::from_str::<Wrapper>(r#"{"id":"not-a-number"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn selected_neighborhood_round_trips() {
        let picked = SelectedNeighborhood {
            neighborhood_id: 1234567890123,
            name: "Riverside".to_string(),
        };
        let json = serde_json::to_string(&picked).unwrap();
        assert!(json.contains(r#""neighborhood_id":"1234567890123""#));
        let back: SelectedNeighborhood = serde_json::from_str(&json).unwrap();
        assert_eq!(back, picked);
    }

    #[test]
    fn prospect_extras_default_when_absent() {
        let json = r#"{
            "id": 1,
            "contact_id": 2,
            "listing_type": "sale",
            "status": "active",
            "min_price": "150000",
            "max_price": "300000",
            "min_bedrooms": 2,
            "min_bathrooms": null,
            "min_area": 70,
            "urgency": 3,
            "move_in_by": null,
            "neighborhoods": [],
            "created_at": "2026-01-10T09:00:00Z",
            "updated_at": null
        }"#;
        let prospect: Prospect = serde_json::from_str(json).unwrap();
        assert!(prospect.extras.is_empty());
        assert_eq!(prospect.min_bedrooms, Some(2));
    }

    #[test]
    fn partial_contact_update_skips_absent_fields() {
        let req = UpdateContactRequest {
            notes: Some("Prefers email".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"notes":"Prefers email"}"#);
    }
}
