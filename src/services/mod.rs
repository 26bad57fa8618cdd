// Service exports
pub mod cache;
pub mod croustillant;
pub mod postgres;

pub use cache::{CacheError, CacheKey, CacheManager, CacheStats};
pub use croustillant::{format_date_for_api, CroustillantClient, CroustillantError};
pub use postgres::{PreferenceError, PreferenceStore};
