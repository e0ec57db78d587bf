mod reports;
mod users;

#[cfg(test)]
pub(crate) mod testing;

use salvo::Router;
use serde::Serialize;

// Re-export route constants from core
pub use kintai_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, API_V1_ROUTE_COMPONENT, API_V1_ROUTE_PREFIX,
};

/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// ## Summary
/// Constructs the versioned JSON API router.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT).push(
        Router::with_path(API_V1_ROUTE_COMPONENT)
            .push(users::routes())
            .push(reports::routes()),
    )
}
