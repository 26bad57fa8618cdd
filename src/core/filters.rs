use crate::models::Restaurant;
use icu_collator::{Collator, CollatorOptions, Strength};
use std::cmp::{Ordering, Reverse};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Payment tag for bank cards
pub const CARD_PAYMENT_TAG: &str = "Carte bancaire";
/// Payment tag for the Izly student wallet
pub const IZLY_PAYMENT_TAG: &str = "IZLY";

const ACCESSIBILITY_MARKERS: [&str; 2] = ["pmr", "accessib"];

/// Fold a string by dropping accents and case
///
/// "Zèbre", "zebre" and "ZEBRE" fold to the same key. Only used for ordering
/// when no collator can be built.
pub fn fold_text(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Case-insensitive substring match against name, address or zone
///
/// A blank query matches everything.
#[inline]
pub fn matches_search(restaurant: &Restaurant, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }

    let query = query.to_lowercase();
    let contains = |field: Option<&str>| field.is_some_and(|v| v.to_lowercase().contains(&query));

    contains(Some(restaurant.nom.as_str()))
        || contains(restaurant.adresse.as_deref())
        || contains(restaurant.zone.as_deref())
}

#[inline]
pub fn matches_region(restaurant: &Restaurant, region: i64) -> bool {
    restaurant.region_code() == Some(region)
}

/// Payment filter
///
/// With one flag set, the matching tag is required. With both set, both tags
/// are required.
#[inline]
pub fn matches_payment(restaurant: &Restaurant, card: bool, izly: bool) -> bool {
    if !card && !izly {
        return true;
    }

    let has_card = restaurant.has_tag(CARD_PAYMENT_TAG);
    let has_izly = restaurant.has_tag(IZLY_PAYMENT_TAG);

    match (card, izly) {
        (true, true) => has_card && has_izly,
        (true, false) => has_card,
        _ => has_izly,
    }
}

/// Restaurants tagged as accessible to people with reduced mobility
#[inline]
pub fn is_accessible(restaurant: &Restaurant) -> bool {
    restaurant.tags().iter().any(|tag| {
        let tag = tag.to_lowercase();
        ACCESSIBILITY_MARKERS.iter().any(|marker| tag.contains(marker))
    })
}

/// Stable sort on name, ascending unless `descending`
pub fn sort_by_name(restaurants: &mut [Restaurant], descending: bool) {
    sort_by_key_collated(restaurants, descending, |r| r.nom.as_str());
}

/// Stable sort on zone, missing zones sorting as empty strings
pub fn sort_by_city(restaurants: &mut [Restaurant], descending: bool) {
    sort_by_key_collated(restaurants, descending, |r| r.zone.as_deref().unwrap_or(""));
}

/// French collator at primary strength: case and accents are ignored,
/// punctuation sorts before letters and ligatures expand ("Œ" as "oe")
pub fn french_collator() -> Result<Collator, icu_collator::CollatorError> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Primary);
    Collator::try_new(&icu_locid::locale!("fr").into(), options)
}

fn sort_by_key_collated<F>(restaurants: &mut [Restaurant], descending: bool, key: F)
where
    F: Fn(&Restaurant) -> &str,
{
    let collator = match french_collator() {
        Ok(collator) => collator,
        Err(e) => {
            tracing::warn!("Collator unavailable ({}), sorting on folded keys", e);
            sort_by_folded_key(restaurants, descending, key);
            return;
        }
    };

    // sort_by is stable: primary-equal keys keep their input order
    let compare = |a: &Restaurant, b: &Restaurant| -> Ordering { collator.compare(key(a), key(b)) };
    if descending {
        restaurants.sort_by(|a, b| compare(b, a));
    } else {
        restaurants.sort_by(compare);
    }
}

fn sort_by_folded_key<F>(restaurants: &mut [Restaurant], descending: bool, key: F)
where
    F: Fn(&Restaurant) -> &str,
{
    if descending {
        restaurants.sort_by_cached_key(|r| Reverse(fold_text(key(r))));
    } else {
        restaurants.sort_by_cached_key(|r| fold_text(key(r)));
    }
}
