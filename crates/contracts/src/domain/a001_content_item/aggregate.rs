use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::enums::Language;
use crate::shared::localized::LocalizedText;

// ============================================================================
// Attributes
// ============================================================================

/// Category-specific attribute (altitude, difficulty, duration, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
    Other(serde_json::Value),
}

/// Borrowed view of a field, as seen by the filter and sort passes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Number(f64),
    Text(&'a str),
    List(&'a [String]),
    Bool(bool),
}

impl<'a> FieldValue<'a> {
    /// Numeric reading of the field; numeric strings ("2115") count too
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

// ============================================================================
// Lenient field readers
// ============================================================================
//
// Optional fields that do not parse are read as absent.

/// Ids arrive as strings or as numbers
fn de_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("invalid id: {other}"))),
    }
}

/// Featured rank: integer, float (rounded) or numeric string
fn de_rank<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f.round() as i64),
        _ => None,
    })
}

/// RFC 3339, a naive date-time or a bare date (read as midnight UTC)
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Timestamp string, or epoch milliseconds
fn de_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => parse_timestamp(&s),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    })
}

// ============================================================================
// Aggregate
// ============================================================================

/// A catalog record: a col, a training program, a nutrition entry or a
/// challenge. Owned by the remote source, read-only on this side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(deserialize_with = "de_id")]
    pub id: String,

    #[serde(default)]
    pub slug: String,

    pub name: LocalizedText,

    #[serde(default)]
    pub description: LocalizedText,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, deserialize_with = "de_rank", skip_serializing_if = "Option::is_none")]
    pub featured: Option<i64>,

    #[serde(default, deserialize_with = "de_timestamp", skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,

    #[serde(
        rename = "createdAt",
        default,
        deserialize_with = "de_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    /// Everything else the source sends
    #[serde(flatten)]
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl ContentItem {
    /// Lookup of a field by filter/sort key
    pub fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            "id" => Some(FieldValue::Text(&self.id)),
            "slug" => Some(FieldValue::Text(&self.slug)),
            "tags" => Some(FieldValue::List(&self.tags)),
            "featured" => self.featured.map(|f| FieldValue::Number(f as f64)),
            "subcategory" => self.subcategory.as_deref().map(FieldValue::Text),
            "region" => self.region.as_deref().map(FieldValue::Text),
            _ => match self.attributes.get(key)? {
                AttributeValue::Bool(b) => Some(FieldValue::Bool(*b)),
                AttributeValue::Number(n) => Some(FieldValue::Number(*n)),
                AttributeValue::Text(s) => Some(FieldValue::Text(s)),
                AttributeValue::List(l) => Some(FieldValue::List(l)),
                AttributeValue::Other(_) => None,
            },
        }
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.field(key).and_then(|v| v.as_number())
    }

    /// `last_updated`, or `createdAt` when the source never updated it
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.last_updated.or(self.created_at)
    }

    /// Text the search filter matches against
    pub fn search_text(&self, lang: Language) -> String {
        let mut text = String::new();
        text.push_str(self.name.get(lang));
        text.push(' ');
        text.push_str(self.description.get(lang));
        for tag in &self.tags {
            text.push(' ');
            text.push_str(tag);
        }
        text.to_lowercase()
    }

    /// `slug` when present, `id` otherwise (used in item URLs)
    pub fn route_key(&self) -> &str {
        if self.slug.is_empty() {
            &self.id
        } else {
            &self.slug
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOURMALET: &str = r#"{
        "id": "col-tourmalet",
        "slug": "col-du-tourmalet",
        "name": {"fr": "Col du Tourmalet", "en": "Col du Tourmalet"},
        "description": "Le géant des Pyrénées",
        "tags": ["tour-de-france", "mythique"],
        "featured": 10,
        "last_updated": "2024-05-02T10:00:00Z",
        "region": "pyrenees",
        "coordinates": {"lat": 42.9087, "lng": 0.1456},
        "altitude": 2115,
        "difficulty": 5,
        "gradient": 7.4,
        "features": ["panorama", "historic"],
        "surface": "asphalt",
        "open": true,
        "climbs": [{"side": "Luz"}]
    }"#;

    #[test]
    fn test_deserialize_collects_attributes() {
        let item: ContentItem = serde_json::from_str(TOURMALET).unwrap();
        assert_eq!(item.number("altitude"), Some(2115.0));
        assert_eq!(item.number("gradient"), Some(7.4));
        assert_eq!(item.field("surface"), Some(FieldValue::Text("asphalt")));
        assert_eq!(item.field("open"), Some(FieldValue::Bool(true)));
        assert!(matches!(item.field("features"), Some(FieldValue::List(l)) if l.len() == 2));
        // nested objects are kept but not filterable
        assert!(item.attributes.contains_key("climbs"));
        assert_eq!(item.field("climbs"), None);
        assert_eq!(item.field("region"), Some(FieldValue::Text("pyrenees")));
    }

    #[test]
    fn test_search_text_is_lowercase() {
        let item: ContentItem = serde_json::from_str(TOURMALET).unwrap();
        let text = item.search_text(Language::En);
        assert!(text.contains("col du tourmalet"));
        assert!(text.contains("mythique"));
    }

    #[test]
    fn test_timestamp_falls_back_to_created_at() {
        let item: ContentItem = serde_json::from_str(
            r#"{"id": "p1", "name": "Base", "createdAt": "2023-01-15T08:30:00Z"}"#,
        )
        .unwrap();
        assert!(item.last_updated.is_none());
        assert_eq!(
            item.timestamp().map(|t| t.to_rfc3339()),
            Some("2023-01-15T08:30:00+00:00".to_string())
        );
        assert_eq!(item.route_key(), "p1");
    }

    #[test]
    fn test_loose_upstream_fields() {
        let item: ContentItem =
            serde_json::from_str(r#"{"id": "a", "name": "A", "last_updated": "2024-05-02"}"#)
                .unwrap();
        assert_eq!(
            item.timestamp().map(|t| t.to_rfc3339()),
            Some("2024-05-02T00:00:00+00:00".to_string())
        );

        let item: ContentItem =
            serde_json::from_str(r#"{"id": 42, "name": "B", "featured": 2.5}"#).unwrap();
        assert_eq!(item.id, "42");
        assert_eq!(item.featured, Some(3));

        let item: ContentItem = serde_json::from_str(
            r#"{"id": "c", "name": "C", "featured": "top", "createdAt": "yesterday"}"#,
        )
        .unwrap();
        assert_eq!(item.featured, None);
        assert_eq!(item.timestamp(), None);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Some("2024-05-02T10:00:00+00:00".to_string());
        for raw in ["2024-05-02T10:00:00Z", "2024-05-02T12:00:00+02:00", "2024-05-02 10:00:00"] {
            assert_eq!(parse_timestamp(raw).map(|t| t.to_rfc3339()), expected, "{raw}");
        }
        assert_eq!(parse_timestamp("02/05/2024"), None);
    }

    #[test]
    fn test_missing_id_is_rejected() {
        assert!(serde_json::from_str::<ContentItem>(r#"{"name": "No id"}"#).is_err());
        assert!(serde_json::from_str::<ContentItem>(r#"{"id": null, "name": "X"}"#).is_err());
    }
}
