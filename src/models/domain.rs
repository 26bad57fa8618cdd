use serde::{Deserialize, Serialize};

/// Restaurant record as returned by the CROUStillant API
///
/// Field names follow the upstream API. `distance_km` is never read from the
/// API; it is attached by the distance annotator for proximity ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub code: i64,
    pub nom: String,
    #[serde(default)]
    pub adresse: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub region: Option<RegionRef>,
    #[serde(default)]
    pub actif: Option<bool>,
    #[serde(default)]
    pub ouvert: Option<bool>,
    #[serde(default)]
    pub horaires: Option<Vec<String>>,
    #[serde(default)]
    pub jours_ouvert: Option<Vec<DayOpening>>,
    #[serde(default)]
    pub paiement: Option<Vec<String>>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(rename = "type", default)]
    pub kind: Option<RestaurantType>,
    #[serde(rename = "distanceKm", skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl Restaurant {
    /// Minimal record, mostly useful for tests and fixtures
    pub fn new(code: i64, nom: impl Into<String>) -> Self {
        Self {
            code,
            nom: nom.into(),
            adresse: None,
            zone: None,
            image_url: None,
            region: None,
            actif: None,
            ouvert: None,
            horaires: None,
            jours_ouvert: None,
            paiement: None,
            latitude: None,
            longitude: None,
            kind: None,
            distance_km: None,
        }
    }

    /// Whether the restaurant is in service at all, defaulting to false
    pub fn is_active(&self) -> bool {
        self.actif.or(self.ouvert).unwrap_or(false)
    }

    pub fn region_code(&self) -> Option<i64> {
        self.region.as_ref().map(|r| r.code)
    }

    /// Payment and accessibility tags, empty when the API omitted them
    pub fn tags(&self) -> &[String] {
        self.paiement.as_deref().unwrap_or(&[])
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| t == tag)
    }

    /// Coordinates, only when both are present and finite
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => Some((lat, lon)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRef {
    pub code: i64,
    #[serde(default)]
    pub libelle: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantType {
    pub libelle: String,
}

/// One weekday of the structured opening schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayOpening {
    #[serde(default)]
    pub jour: String,
    pub ouverture: ServiceFlags,
}

/// Which services run on a given day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceFlags {
    #[serde(default)]
    pub matin: bool,
    #[serde(default)]
    pub midi: bool,
    #[serde(default)]
    pub soir: bool,
}

/// Region listed by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub code: i64,
    pub libelle: String,
}

/// Daily menu of a restaurant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Menu {
    pub code: i64,
    pub date: String,
    #[serde(default)]
    pub repas: Vec<Meal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    pub code: i64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub categories: Vec<MenuCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategory {
    pub code: i64,
    pub libelle: String,
    pub ordre: i32,
    #[serde(default)]
    pub plats: Vec<Dish>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dish {
    pub code: i64,
    pub libelle: String,
    pub ordre: i32,
}

/// Position of the person looking for a restaurant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl ObserverLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Finite and within the usual latitude/longitude ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Restaurant saved by a device, as shown in the favorites section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRestaurant {
    pub id: String,
    pub name: String,
    pub city: String,
}

/// Sentinel favorite region meaning "no region narrowing"
pub const ALL_REGIONS: &str = "all";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
        }
    }

    /// Parse a stored code, falling back to the default on anything unknown
    pub fn from_code(code: &str) -> Self {
        match code {
            "en" => Language::En,
            _ => Language::Fr,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "light" => ThemePreference::Light,
            "dark" => ThemePreference::Dark,
            _ => ThemePreference::System,
        }
    }
}

/// Durable per-device settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevicePreferences {
    #[serde(rename = "deviceId")]
    pub device_id: uuid::Uuid,
    #[serde(rename = "favoriteRegion")]
    pub favorite_region: String,
    pub language: Language,
    pub theme: ThemePreference,
    #[serde(rename = "favoriteRestaurants")]
    pub favorite_restaurants: Vec<FavoriteRestaurant>,
}

impl DevicePreferences {
    /// Settings of a device that never saved anything
    pub fn defaults(device_id: uuid::Uuid) -> Self {
        Self {
            device_id,
            favorite_region: ALL_REGIONS.to_string(),
            language: Language::default(),
            theme: ThemePreference::default(),
            favorite_restaurants: Vec::new(),
        }
    }

    pub fn is_favorite(&self, restaurant_id: &str) -> bool {
        self.favorite_restaurants.iter().any(|f| f.id == restaurant_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_record() {
        let json = r#"{
            "code": 1234,
            "nom": "RU Lettres",
            "adresse": "1 rue des Facs",
            "zone": "Nancy",
            "image_url": null,
            "actif": true,
            "region": { "code": 7, "libelle": "Lorraine" },
            "horaires": ["11h30 - 14h00", "", "", "", "", "", ""],
            "paiement": ["IZLY", "Carte bancaire"],
            "latitude": 48.69,
            "longitude": 6.18,
            "type": { "libelle": "Restaurant" }
        }"#;

        let restaurant: Restaurant = serde_json::from_str(json).unwrap();
        assert_eq!(restaurant.code, 1234);
        assert_eq!(restaurant.region_code(), Some(7));
        assert!(restaurant.is_active());
        assert!(restaurant.has_tag("IZLY"));
        assert_eq!(restaurant.coordinates(), Some((48.69, 6.18)));
        assert!(restaurant.distance_km.is_none());
    }

    #[test]
    fn test_distance_never_read_from_api() {
        let json = r#"{ "code": 1, "nom": "A", "distanceKm": 3.5 }"#;
        let restaurant: Restaurant = serde_json::from_str(json).unwrap();
        assert!(restaurant.distance_km.is_none());

        let serialized = serde_json::to_value(&restaurant).unwrap();
        assert!(serialized.get("distanceKm").is_none());
    }

    #[test]
    fn test_active_falls_back_to_ouvert() {
        let mut restaurant = Restaurant::new(1, "A");
        assert!(!restaurant.is_active());

        restaurant.ouvert = Some(true);
        assert!(restaurant.is_active());

        restaurant.actif = Some(false);
        assert!(!restaurant.is_active());
    }

    #[test]
    fn test_coordinates_require_both_finite() {
        let mut restaurant = Restaurant::new(1, "A");
        restaurant.latitude = Some(48.0);
        assert!(restaurant.coordinates().is_none());

        restaurant.longitude = Some(f64::NAN);
        assert!(restaurant.coordinates().is_none());

        restaurant.longitude = Some(2.0);
        assert_eq!(restaurant.coordinates(), Some((48.0, 2.0)));
    }

    #[test]
    fn test_observer_validity() {
        assert!(ObserverLocation::new(48.85, 2.35).is_valid());
        assert!(!ObserverLocation::new(f64::NAN, 2.35).is_valid());
        assert!(!ObserverLocation::new(91.0, 2.35).is_valid());
    }

    #[test]
    fn test_default_preferences() {
        let prefs = DevicePreferences::defaults(uuid::Uuid::nil());
        assert_eq!(prefs.favorite_region, ALL_REGIONS);
        assert_eq!(prefs.language, Language::Fr);
        assert_eq!(prefs.theme, ThemePreference::System);
        assert!(!prefs.is_favorite("1"));
    }
}
