use crate::core::{
    distance::{annotate_distances, sort_by_distance},
    filters::{is_accessible, matches_payment, matches_region, matches_search, sort_by_city, sort_by_name},
    schedule::is_open_at,
    state::FilterState,
};
use crate::models::{FavoriteRestaurant, ObserverLocation, Restaurant, ALL_REGIONS};
use chrono::NaiveDateTime;

/// Everything a single filtering pass depends on besides the records
#[derive(Debug, Clone)]
pub struct FilterQuery<'a> {
    pub filters: FilterState,
    pub search: &'a str,
    /// Durable favorite region: a region code or `"all"`
    pub favorite_region: Option<&'a str>,
    /// Proximity mode, managed by the caller
    pub proximity: bool,
    pub observer: Option<ObserverLocation>,
    /// Wall-clock time the open-now predicate is evaluated at
    pub now: NaiveDateTime,
}

impl<'a> FilterQuery<'a> {
    pub fn new(filters: FilterState, now: NaiveDateTime) -> Self {
        Self {
            filters,
            search: "",
            favorite_region: None,
            proximity: false,
            observer: None,
            now,
        }
    }

    pub fn search(mut self, search: &'a str) -> Self {
        self.search = search;
        self
    }

    pub fn favorite_region(mut self, region: Option<&'a str>) -> Self {
        self.favorite_region = region;
        self
    }

    pub fn nearby(mut self, observer: Option<ObserverLocation>) -> Self {
        self.proximity = true;
        self.observer = observer;
        self
    }

    /// Region actually applied: a parseable favorite region wins over the
    /// engine's own region filter
    pub fn effective_region(&self) -> Option<i64> {
        let favorite = self
            .favorite_region
            .map(str::trim)
            .filter(|r| !r.is_empty() && *r != ALL_REGIONS);

        if let Some(raw) = favorite {
            match raw.parse::<i64>() {
                Ok(code) => return Some(code),
                Err(_) => tracing::debug!("Ignoring unparseable favorite region {:?}", raw),
            }
        }

        self.filters.region
    }

    /// Observer used for proximity ordering, when proximity mode can run
    pub fn proximity_observer(&self) -> Option<ObserverLocation> {
        if !self.proximity {
            return None;
        }
        self.observer.filter(ObserverLocation::is_valid)
    }
}

/// Result of one filtering pass
#[derive(Debug)]
pub struct FilterOutcome {
    pub restaurants: Vec<Restaurant>,
    pub total_candidates: usize,
}

/// Restaurant filter engine - implements the search/sort/filter pipeline
///
/// # Pipeline Stages
/// 1. Text search on name, address and zone
/// 2. Region narrowing (favorite region, else the region filter)
/// 3. Proximity ordering, which replaces stages 4 and 5
/// 4. Name sort
/// 5. City sort
/// 6. Payment filter
/// 7. Open-now filter
/// 8. Accessibility filter
///
/// The source slice is never modified; every pass returns fresh copies.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine;

impl FilterEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn apply(&self, records: &[Restaurant], query: &FilterQuery<'_>) -> FilterOutcome {
        let total_candidates = records.len();
        let filters = &query.filters;
        let region = query.effective_region();

        // Stages 1 & 2: search and region
        let narrowed: Vec<Restaurant> = records
            .iter()
            .filter(|r| matches_search(r, query.search))
            .filter(|r| region.map_or(true, |code| matches_region(r, code)))
            .cloned()
            .collect();

        // Stages 3-5: ordering
        let mut ordered = match query.proximity_observer() {
            Some(observer) => {
                let mut annotated = annotate_distances(&narrowed, &observer);
                sort_by_distance(&mut annotated);
                annotated
            }
            None => {
                let mut sorted = narrowed;
                if filters.name_ascending || filters.name_descending {
                    sort_by_name(&mut sorted, !filters.name_ascending);
                }
                if filters.city_ascending || filters.city_descending {
                    sort_by_city(&mut sorted, !filters.city_ascending);
                }
                sorted
            }
        };

        // Stages 6-8: remaining predicates
        ordered.retain(|r| {
            matches_payment(r, filters.card_payment, filters.izly_payment)
                && (!filters.open_now || is_open_at(r, query.now))
                && (!filters.accessible || is_accessible(r))
        });

        tracing::debug!(
            "Filtered {} restaurants down to {} (filters: {:?}, region: {:?}, proximity: {})",
            total_candidates,
            ordered.len(),
            filters.active_filters(),
            region,
            query.proximity_observer().is_some()
        );

        FilterOutcome {
            restaurants: ordered,
            total_candidates,
        }
    }
}

/// Separate favorites from a result list
///
/// Favorites are resolved against `all_records` so they show up even when the
/// current filters would hide them; unknown ids are dropped. The returned list
/// is `results` without those favorites.
pub fn split_favorites(
    results: Vec<Restaurant>,
    favorites: &[FavoriteRestaurant],
    all_records: &[Restaurant],
) -> (Vec<Restaurant>, Vec<Restaurant>) {
    let is_favorite = |r: &Restaurant| {
        let id = r.code.to_string();
        favorites.iter().any(|f| f.id == id)
    };

    let resolved = favorites
        .iter()
        .filter_map(|f| all_records.iter().find(|r| r.code.to_string() == f.id))
        .cloned()
        .collect();

    let rest = results.into_iter().filter(|r| !is_favorite(r)).collect();

    (resolved, rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::FilterKind;
    use crate::models::RegionRef;
    use chrono::NaiveDate;

    fn noon_monday() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn restaurant(code: i64, name: &str, zone: &str) -> Restaurant {
        let mut r = Restaurant::new(code, name);
        r.zone = Some(zone.to_string());
        r
    }

    fn codes(outcome: &FilterOutcome) -> Vec<i64> {
        outcome.restaurants.iter().map(|r| r.code).collect()
    }

    #[test]
    fn test_no_filters_is_identity() {
        let records = vec![restaurant(3, "C", "x"), restaurant(1, "A", "y")];
        let outcome = FilterEngine::new().apply(&records, &FilterQuery::new(FilterState::default(), noon_monday()));

        assert_eq!(outcome.restaurants, records);
        assert_eq!(outcome.total_candidates, 2);
    }

    #[test]
    fn test_name_ascending_scenario() {
        let records = vec![
            restaurant(1, "Zèbre", "Nancy"),
            restaurant(2, "Alpha", "Metz"),
            restaurant(3, "Michel", "Nancy"),
        ];
        let filters = FilterState::default().toggle(FilterKind::NameAscending);

        let outcome = FilterEngine::new().apply(&records, &FilterQuery::new(filters, noon_monday()));
        assert_eq!(codes(&outcome), vec![2, 3, 1]);
    }

    #[test]
    fn test_city_sort_runs_after_name_sort() {
        let records = vec![
            restaurant(1, "B", "Nancy"),
            restaurant(2, "A", "Nancy"),
            restaurant(3, "C", "Metz"),
        ];
        let filters = FilterState::default()
            .toggle(FilterKind::NameAscending)
            .toggle(FilterKind::CityAscending);

        let outcome = FilterEngine::new().apply(&records, &FilterQuery::new(filters, noon_monday()));
        // City decides, name order survives within a city
        assert_eq!(codes(&outcome), vec![3, 2, 1]);
    }

    #[test]
    fn test_favorite_region_overrides_region_filter() {
        let mut a = restaurant(1, "A", "x");
        a.region = Some(RegionRef { code: 1, libelle: "Un".to_string() });
        let mut b = restaurant(2, "B", "y");
        b.region = Some(RegionRef { code: 2, libelle: "Deux".to_string() });
        let records = vec![a, b];

        let filters = FilterState::default().with_region(Some(1));
        let engine = FilterEngine::new();

        let own = engine.apply(&records, &FilterQuery::new(filters, noon_monday()));
        assert_eq!(codes(&own), vec![1]);

        let query = FilterQuery::new(filters, noon_monday()).favorite_region(Some("2"));
        assert_eq!(codes(&engine.apply(&records, &query)), vec![2]);

        let query = FilterQuery::new(filters, noon_monday()).favorite_region(Some("all"));
        assert_eq!(codes(&engine.apply(&records, &query)), vec![1]);

        let query = FilterQuery::new(filters, noon_monday()).favorite_region(Some("lorraine"));
        assert_eq!(codes(&engine.apply(&records, &query)), vec![1]);
    }

    #[test]
    fn test_proximity_overrides_sorts() {
        let mut near = restaurant(1, "Zed", "Nancy");
        near.latitude = Some(48.69);
        near.longitude = Some(6.18);
        let mut far = restaurant(2, "Alpha", "Paris");
        far.latitude = Some(48.85);
        far.longitude = Some(2.35);
        let unknown = restaurant(3, "Aaa", "Metz");
        let records = vec![unknown, far, near];

        let filters = FilterState::default().toggle(FilterKind::NameAscending);
        let query = FilterQuery::new(filters, noon_monday())
            .nearby(Some(ObserverLocation::new(48.68, 6.17)));

        let outcome = FilterEngine::new().apply(&records, &query);
        assert_eq!(codes(&outcome), vec![1, 2, 3]);
        assert!(outcome.restaurants[0].distance_km.unwrap() < 5.0);
        assert!(outcome.restaurants[2].distance_km.is_none());
        // Inputs were not annotated
        assert!(records.iter().all(|r| r.distance_km.is_none()));
    }

    #[test]
    fn test_proximity_without_observer_keeps_sorts() {
        let records = vec![restaurant(1, "B", "x"), restaurant(2, "A", "y")];
        let filters = FilterState::default().toggle(FilterKind::NameAscending);
        let query = FilterQuery::new(filters, noon_monday()).nearby(None);

        let outcome = FilterEngine::new().apply(&records, &query);
        assert_eq!(codes(&outcome), vec![2, 1]);
        assert!(outcome.restaurants.iter().all(|r| r.distance_km.is_none()));
    }

    #[test]
    fn test_open_now_degrades_per_record() {
        let mut open = restaurant(1, "Open", "x");
        open.actif = Some(true);
        open.horaires = Some(vec!["11h30 - 14h00".to_string(); 7]);
        let mut broken = restaurant(2, "Broken", "x");
        broken.actif = Some(true);
        broken.horaires = Some(vec!["n/a".to_string(); 7]);
        let records = vec![open, broken, restaurant(3, "Nothing", "x")];

        let filters = FilterState::default().toggle(FilterKind::OpenNow);
        let outcome = FilterEngine::new().apply(&records, &FilterQuery::new(filters, noon_monday()));
        assert_eq!(codes(&outcome), vec![1]);
    }

    #[test]
    fn test_empty_input() {
        let filters = FilterState::default()
            .toggle(FilterKind::CardPayment)
            .toggle(FilterKind::Accessible);
        let query = FilterQuery::new(filters, noon_monday()).search("ru");

        let outcome = FilterEngine::new().apply(&[], &query);
        assert!(outcome.restaurants.is_empty());
        assert_eq!(outcome.total_candidates, 0);
    }

    #[test]
    fn test_split_favorites() {
        let records = vec![restaurant(1, "A", "x"), restaurant(2, "B", "y"), restaurant(3, "C", "z")];
        let favorites = vec![
            FavoriteRestaurant { id: "3".to_string(), name: "C".to_string(), city: "z".to_string() },
            FavoriteRestaurant { id: "99".to_string(), name: "Gone".to_string(), city: "".to_string() },
        ];
        // Current results hide restaurant 3, it still shows as a favorite
        let results = vec![records[0].clone(), records[1].clone()];

        let (favs, rest) = split_favorites(results, &favorites, &records);
        assert_eq!(favs.iter().map(|r| r.code).collect::<Vec<_>>(), vec![3]);
        assert_eq!(rest.iter().map(|r| r.code).collect::<Vec<_>>(), vec![1, 2]);
    }
}
