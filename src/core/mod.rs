// Core algorithm exports
pub mod distance;
pub mod engine;
pub mod filters;
pub mod pagination;
pub mod schedule;
pub mod state;

pub use distance::{annotate_distances, distance_to, haversine_distance, sort_by_distance};
pub use engine::{split_favorites, FilterEngine, FilterOutcome, FilterQuery};
pub use filters::{is_accessible, matches_payment, matches_region, matches_search, sort_by_city, sort_by_name};
pub use pagination::{paginate, Page, DEFAULT_PER_PAGE};
pub use schedule::{is_open_at, parse_time_range, wall_clock_at, wall_clock_now, Schedule, TimeRange};
pub use state::{FilterKind, FilterState};
