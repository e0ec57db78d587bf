//! Attendance reporting core: CSV presence loading, weekday/month
//! aggregation, TTL-bounded caching, and XML roster lookups.

pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod presence;
pub mod roster;
