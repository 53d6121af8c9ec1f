use std::cmp::Ordering;

use crate::domain::a001_content_item::ContentItem;
use crate::enums::Language;

/// Numeric attributes that can be used as a sort key
pub const NUMERIC_SORT_FIELDS: &[&str] = &[
    "altitude",
    "difficulty",
    "gradient",
    "length",
    "duration",
    "calories",
    "cols_count",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    Featured,
    NameAsc,
    NameDesc,
    DateDesc,
    DateAsc,
    /// `altitude` / `altitude_desc` sort high values first, `altitude_asc` low first
    Numeric {
        field: &'static str,
        descending: bool,
    },
    /// Input order is kept
    Unknown,
}

impl SortKey {
    pub fn parse(key: &str) -> SortKey {
        match key {
            "featured" => SortKey::Featured,
            "name_asc" => SortKey::NameAsc,
            "name_desc" => SortKey::NameDesc,
            "date_desc" => SortKey::DateDesc,
            "date_asc" => SortKey::DateAsc,
            other => {
                let (field, descending) = if let Some(f) = other.strip_suffix("_asc") {
                    (f, false)
                } else if let Some(f) = other.strip_suffix("_desc") {
                    (f, true)
                } else {
                    (other, true)
                };
                match NUMERIC_SORT_FIELDS.iter().copied().find(|f| *f == field) {
                    Some(field) => SortKey::Numeric { field, descending },
                    None => SortKey::Unknown,
                }
            }
        }
    }
}

/// Missing values always go last, whatever the direction
fn cmp_present_first<T, F>(a: Option<T>, b: Option<T>, cmp: F) -> Ordering
where
    F: FnOnce(T, T) -> Ordering,
{
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Stable in-place sort of the filtered list
pub fn sort_items(items: &mut [&ContentItem], sort_key: &str, lang: Language) {
    match SortKey::parse(sort_key) {
        SortKey::Unknown => {}
        SortKey::Featured => items.sort_by(|a, b| {
            cmp_present_first(a.featured, b.featured, |x, y| y.cmp(&x))
        }),
        SortKey::NameAsc => items.sort_by_cached_key(|item| item.name.get(lang).to_lowercase()),
        SortKey::NameDesc => {
            items.sort_by(|a, b| {
                b.name
                    .get(lang)
                    .to_lowercase()
                    .cmp(&a.name.get(lang).to_lowercase())
            })
        }
        SortKey::DateDesc => items.sort_by(|a, b| {
            cmp_present_first(a.timestamp(), b.timestamp(), |x, y| y.cmp(&x))
        }),
        SortKey::DateAsc => items.sort_by(|a, b| {
            cmp_present_first(a.timestamp(), b.timestamp(), |x, y| x.cmp(&y))
        }),
        SortKey::Numeric { field, descending } => items.sort_by(|a, b| {
            cmp_present_first(a.number(field), b.number(field), |x, y| {
                if descending {
                    cmp_f64(y, x)
                } else {
                    cmp_f64(x, y)
                }
            })
        }),
    }
}
