use crate::models::{ObserverLocation, Restaurant};
use std::cmp::Ordering;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance from the observer to a restaurant
///
/// `None` when the restaurant has no usable coordinates or the observer
/// position is not finite, so NaN never reaches a sort.
pub fn distance_to(observer: &ObserverLocation, restaurant: &Restaurant) -> Option<f64> {
    if !observer.latitude.is_finite() || !observer.longitude.is_finite() {
        return None;
    }

    let (lat, lon) = restaurant.coordinates()?;
    let distance = haversine_distance(observer.latitude, observer.longitude, lat, lon);

    distance.is_finite().then_some(distance)
}

/// Copy each restaurant, attaching `distance_km` where it can be computed
///
/// Restaurants without coordinates are kept, unannotated.
pub fn annotate_distances(
    restaurants: &[Restaurant],
    observer: &ObserverLocation,
) -> Vec<Restaurant> {
    restaurants
        .iter()
        .map(|restaurant| {
            let mut copy = restaurant.clone();
            copy.distance_km = distance_to(observer, restaurant);
            copy
        })
        .collect()
}

/// Stable ascending sort on `distance_km`, unknown distances last
pub fn sort_by_distance(restaurants: &mut [Restaurant]) {
    restaurants.sort_by(compare_distance);
}

fn compare_distance(a: &Restaurant, b: &Restaurant) -> Ordering {
    let a = a.distance_km.unwrap_or(f64::INFINITY);
    let b = b.distance_km.unwrap_or(f64::INFINITY);
    a.total_cmp(&b)
}
