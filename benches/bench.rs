// Criterion benchmarks for the CROUStillant finder

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use croustillant_finder::core::{
    distance::{annotate_distances, haversine_distance},
    filters::sort_by_name,
    FilterEngine, FilterKind, FilterQuery, FilterState,
};
use croustillant_finder::models::{ObserverLocation, RegionRef, Restaurant};

const NAMES: &[&str] = &[
    "RU Saurupt", "Cafétéria Lettres", "RU Monbois", "Brasserie Érable", "RU Saulcy",
    "Cafét' Médecine", "RU Vandœuvre", "Crous Café", "RU Technopôle", "Épicerie solidaire",
];
const CITIES: &[&str] = &["Nancy", "Metz", "Épinal", "Strasbourg", "Mulhouse", "Reims"];

fn create_restaurant(code: usize) -> Restaurant {
    let mut restaurant = Restaurant::new(code as i64, format!("{} {}", NAMES[code % NAMES.len()], code));
    restaurant.zone = Some(CITIES[code % CITIES.len()].to_string());
    restaurant.region = Some(RegionRef {
        code: (code % 5) as i64,
        libelle: String::new(),
    });
    restaurant.actif = Some(code % 7 != 0);
    restaurant.horaires = Some(vec!["11h30 - 14h00".to_string(); 7]);
    restaurant.paiement = Some(match code % 3 {
        0 => vec!["Carte bancaire".to_string(), "IZLY".to_string()],
        1 => vec!["IZLY".to_string()],
        _ => vec!["Carte bancaire".to_string()],
    });
    if code % 4 != 0 {
        restaurant.latitude = Some(48.0 + (code as f64 * 0.003) % 1.5);
        restaurant.longitude = Some(6.0 + (code as f64 * 0.002) % 1.5);
    }
    restaurant
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(48.6921),
                black_box(6.1844),
                black_box(49.1193),
                black_box(6.1757),
            )
        });
    });
}

fn bench_annotate(c: &mut Criterion) {
    let catalog: Vec<Restaurant> = (0..500).map(create_restaurant).collect();
    let observer = ObserverLocation::new(48.6936, 6.1834);

    c.bench_function("annotate_distances_500", |b| {
        b.iter(|| annotate_distances(black_box(&catalog), black_box(&observer)));
    });
}

fn bench_name_sort(c: &mut Criterion) {
    let catalog: Vec<Restaurant> = (0..500).map(create_restaurant).collect();

    c.bench_function("sort_by_name_500", |b| {
        b.iter(|| {
            let mut restaurants = catalog.clone();
            sort_by_name(black_box(&mut restaurants), false);
            restaurants
        });
    });
}

fn bench_engine(c: &mut Criterion) {
    let engine = FilterEngine::new();
    let now = NaiveDate::from_ymd_opt(2025, 3, 10)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap();
    let filters = FilterState::default()
        .toggle(FilterKind::NameAscending)
        .toggle(FilterKind::IzlyPayment)
        .toggle(FilterKind::OpenNow);

    let mut group = c.benchmark_group("engine");

    for count in [50, 100, 500, 1000].iter() {
        let catalog: Vec<Restaurant> = (0..*count).map(create_restaurant).collect();

        group.bench_with_input(BenchmarkId::new("sorted_filters", count), count, |b, _| {
            let query = FilterQuery::new(filters, now).search("ru");
            b.iter(|| engine.apply(black_box(&catalog), black_box(&query)));
        });

        group.bench_with_input(BenchmarkId::new("proximity", count), count, |b, _| {
            let query = FilterQuery::new(filters, now).nearby(Some(ObserverLocation::new(48.69, 6.18)));
            b.iter(|| engine.apply(black_box(&catalog), black_box(&query)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_annotate,
    bench_name_sort,
    bench_engine
);

criterion_main!(benches);
