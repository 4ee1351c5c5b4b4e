//! Request bodies and query parameters.

use serde::{Deserialize, Deserializer, Serialize};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PER_PAGE: u32 = 15;

/// Largest page size the list endpoint accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// Body of `POST /v1/locations` and `PUT|PATCH /v1/locations/{id}`.
///
/// Every field is optional at the wire level; the server decides which are
/// required (all of `code` and `name` on create, none on update).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// `None` leaves the image untouched, `Some(None)` (JSON `null`) clears it.
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<Option<String>>,
}

impl LocationPayload {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            name: Some(name.into()),
            image: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(Some(image.into()));
        self
    }

    pub fn clear_image(mut self) -> Self {
        self.image = Some(None);
        self
    }
}

/// Distinguishes a missing field (outer `None`) from an explicit `null`.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Query string of `GET /v1/locations`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationQuery {
    /// Case-insensitive substring filter on the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Case-insensitive substring filter on the code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// 1-indexed page number; values below 1 mean the first page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,

    /// Page size, `1..=MAX_PER_PAGE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i64>,
}

impl LocationQuery {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(i64::from(page));
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(i64::from(per_page));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_image_differs_from_null_image() {
        let missing: LocationPayload = serde_json::from_str(r#"{"name":"Petra"}"#).unwrap();
        assert_eq!(missing.image, None);

        let cleared: LocationPayload =
            serde_json::from_str(r#"{"name":"Petra","image":null}"#).unwrap();
        assert_eq!(cleared.image, Some(None));

        let set: LocationPayload =
            serde_json::from_str(r#"{"image":"https://example.com/p.jpg"}"#).unwrap();
        assert_eq!(set.image, Some(Some("https://example.com/p.jpg".to_string())));
    }

    #[test]
    fn serialization_skips_absent_fields() {
        let json = serde_json::to_value(LocationPayload::default().with_name("Petra")).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Petra" }));

        let json = serde_json::to_value(LocationPayload::default().clear_image()).unwrap();
        assert_eq!(json, serde_json::json!({ "image": null }));
    }

    #[test]
    fn query_builder_sets_only_requested_params() {
        let query = LocationQuery::default().with_name("Test").with_per_page(10);
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            serde_json::json!({ "name": "Test", "per_page": 10 })
        );
    }
}
