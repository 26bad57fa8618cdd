//! CROUStillant finder - restaurant search service for the CROUStillant app
//!
//! This library provides the restaurant filter engine used by the mobile app:
//! text search, region narrowing, proximity ordering, name/city sorting and
//! payment, open-now and accessibility filters, plus the HTTP service around it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    distance::{annotate_distances, haversine_distance},
    FilterEngine, FilterKind, FilterQuery, FilterState,
};
pub use models::{ObserverLocation, Restaurant, SearchRestaurantsRequest, SearchRestaurantsResponse};
