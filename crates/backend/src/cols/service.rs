//! Mountain pass lookups behind `/api/passes/cols`.

use contracts::domain::a001_content_item::{ContentItem, Coordinates};
use contracts::enums::{CategoryKind, Language};
use contracts::shared::catalog::sort::sort_items;
use serde::{Deserialize, Serialize};

use crate::catalog::error::FetchError;
use crate::catalog::fetcher::DataFetcher;

const EARTH_RADIUS_KM: f64 = 6371.0;
pub const DEFAULT_POPULAR_LIMIT: usize = 6;
pub const DEFAULT_RADIUS_KM: f64 = 50.0;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColsQuery {
    pub region: Option<String>,
    pub difficulty: Option<u8>,
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lng: f64,
    pub radius_km: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PopularQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NearbyCol {
    #[serde(flatten)]
    pub item: ContentItem,
    pub distance_km: f64,
}

/// Great-circle distance
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

pub fn filter_cols(items: Vec<ContentItem>, query: &ColsQuery) -> Vec<ContentItem> {
    items
        .into_iter()
        .filter(|c| match &query.region {
            Some(region) => c.region.as_deref() == Some(region.as_str()),
            None => true,
        })
        .filter(|c| match query.difficulty {
            Some(d) => c.number("difficulty") == Some(f64::from(d)),
            None => true,
        })
        .collect()
}

/// Cols with coordinates within `radius_km`, nearest first
pub fn nearby_cols(items: Vec<ContentItem>, origin: Coordinates, radius_km: f64) -> Vec<NearbyCol> {
    let mut nearby: Vec<NearbyCol> = items
        .into_iter()
        .filter_map(|item| {
            let distance_km = haversine_km(origin, item.coordinates?);
            (distance_km <= radius_km).then_some(NearbyCol { item, distance_km })
        })
        .collect();
    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    nearby
}

pub async fn list(fetcher: &DataFetcher, query: &ColsQuery) -> Result<Vec<ContentItem>, FetchError> {
    let items = fetcher.fetch_category_data(CategoryKind::Cols, None).await?;
    let found = filter_cols(items, query);
    Ok(sorted(&found, query.sort.as_deref().unwrap_or("featured")))
}

pub async fn popular(fetcher: &DataFetcher, limit: usize) -> Result<Vec<ContentItem>, FetchError> {
    fetcher
        .fetch_recommendations(CategoryKind::Cols, None, Language::default(), limit)
        .await
}

pub async fn nearby(fetcher: &DataFetcher, query: &NearbyQuery) -> Result<Vec<NearbyCol>, FetchError> {
    let items = fetcher.fetch_category_data(CategoryKind::Cols, None).await?;
    let origin = Coordinates {
        lat: query.lat,
        lng: query.lng,
    };
    Ok(nearby_cols(
        items,
        origin,
        query.radius_km.unwrap_or(DEFAULT_RADIUS_KM),
    ))
}

pub async fn get_by_id(fetcher: &DataFetcher, id: &str) -> Result<Option<ContentItem>, FetchError> {
    fetcher.fetch_item(CategoryKind::Cols, id).await
}

/// Same sort keys as the catalog pages
pub fn sorted(items: &[ContentItem], sort_key: &str) -> Vec<ContentItem> {
    let mut refs: Vec<&ContentItem> = items.iter().collect();
    sort_items(&mut refs, sort_key, Language::default());
    refs.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fallback::get_fallback_data;

    fn cols() -> Vec<ContentItem> {
        get_fallback_data(CategoryKind::Cols, None)
    }

    #[test]
    fn test_haversine_known_distance() {
        // Paris -> Lyon, about 392 km
        let paris = Coordinates { lat: 48.8566, lng: 2.3522 };
        let lyon = Coordinates { lat: 45.764, lng: 4.8357 };
        let d = haversine_km(paris, lyon);
        assert!((d - 392.0).abs() < 5.0, "got {d}");
        assert_eq!(haversine_km(paris, paris), 0.0);
    }

    #[test]
    fn test_nearby_sorted_and_limited_by_radius() {
        // Bourg d'Oisans
        let origin = Coordinates { lat: 45.055, lng: 6.03 };
        let found = nearby_cols(cols(), origin, 60.0);
        let ids: Vec<&str> = found.iter().map(|n| n.item.id.as_str()).collect();
        assert_eq!(ids.first(), Some(&"alpe-d-huez"));
        assert!(ids.contains(&"col-du-galibier"));
        assert!(!ids.contains(&"col-du-tourmalet"));
        assert!(found.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
        assert!(found.iter().all(|n| n.distance_km <= 60.0));
    }

    #[test]
    fn test_filter_by_region_and_difficulty() {
        let query = ColsQuery {
            region: Some("pyrenees".into()),
            difficulty: Some(5),
            sort: None,
        };
        let found = filter_cols(cols(), &query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "col-du-tourmalet");

        assert_eq!(filter_cols(cols(), &ColsQuery::default()).len(), cols().len());
    }

    #[tokio::test]
    async fn test_popular_and_get_by_id() {
        let fetcher = DataFetcher::offline();
        let top = popular(&fetcher, 3).await.unwrap();
        let ids: Vec<&str> = top.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["col-du-tourmalet", "col-du-galibier", "passo-dello-stelvio"]);

        assert!(get_by_id(&fetcher, "mont-ventoux").await.unwrap().is_some());
        assert!(get_by_id(&fetcher, "nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_sorted_by_altitude() {
        let fetcher = DataFetcher::offline();
        let query = ColsQuery {
            region: Some("alpes".into()),
            difficulty: None,
            sort: Some("altitude".into()),
        };
        let found = list(&fetcher, &query).await.unwrap();
        assert_eq!(found[0].id, "col-du-galibier");
        assert_eq!(found.last().map(|c| c.id.as_str()), Some("alpe-d-huez"));
    }
}
