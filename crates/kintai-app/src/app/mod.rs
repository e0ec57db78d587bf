pub mod api;
pub mod pages;

#[cfg(test)]
mod pages_tests;

use salvo::Router;

/// Top-level router: HTML report shells plus the JSON API.
#[must_use]
pub fn routes() -> Router {
    Router::new().push(pages::routes()).push(api::routes())
}
