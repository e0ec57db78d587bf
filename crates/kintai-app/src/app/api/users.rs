//! User listing and photo endpoints, enriched from the XML roster.

use kintai_core::constants::DEFAULT_AVATAR_URL;
use kintai_core::presence::UserId;
use kintai_core::roster::read_roster;
use salvo::writing::{Json, Text};
use salvo::{Depot, Request, Response, Router, handler, http::StatusCode};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use super::ErrorResponse;
use crate::config::get_config_from_depot;
use crate::state::get_state_from_depot;

/// User listing entry for the front-end dropdown.
#[derive(Debug, Serialize)]
pub struct UserEntry {
    pub user_id: UserId,
    pub name: String,
}

/// ## Summary
/// GET `/api/v1/users` - users present in the attendance data, ascending by
/// id, with roster display names.
///
/// When the roster file is missing or unusable every id degrades to its
/// `"User {id}"` placeholder instead of failing the request.
#[handler]
async fn list_users(depot: &mut Depot, res: &mut Response) {
    let (settings, state) = match (get_config_from_depot(depot), get_state_from_depot(depot)) {
        (Ok(settings), Ok(state)) => (settings, state),
        (config, state) => {
            error!(config = ?config.err(), state = ?state.err(), "depot is missing request context");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Internal server error".to_owned(),
            }));
            return;
        }
    };

    let table = match state.load() {
        Ok(table) => table,
        Err(err) => {
            error!(error = ?err, "failed to load presence data");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Failed to load presence data".to_owned(),
            }));
            return;
        }
    };

    let ids: Vec<UserId> = table.keys().copied().collect();
    let names = read_roster(&settings.roster.xml_path)
        .map(|roster| roster.display_names(ids.iter().copied()));

    let users: Vec<UserEntry> = ids
        .iter()
        .map(|&id| UserEntry {
            user_id: id,
            name: names
                .as_ref()
                .and_then(|names| names.get(&id).cloned())
                .unwrap_or_else(|| format!("User {id}")),
        })
        .collect();

    res.render(Json(users));
}

/// ## Summary
/// GET `/api/v1/user/{user_id}/photo` - the user's photo URL assembled from
/// the roster, or the fixed default avatar when the roster cannot supply
/// one. Never fails the request on roster gaps.
#[handler]
async fn user_photo(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(user_id) = req.param::<UserId>("user_id") else {
        res.status_code(StatusCode::BAD_REQUEST);
        res.render(Text::Plain("user_id must be an integer"));
        return;
    };
    let settings = match get_config_from_depot(depot) {
        Ok(settings) => settings,
        Err(err) => {
            error!(error = ?err, "configuration missing from depot");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Internal server error".to_owned(),
            }));
            return;
        }
    };

    let url = read_roster(&settings.roster.xml_path).map_or_else(
        || DEFAULT_AVATAR_URL.to_owned(),
        |roster| roster.photo_url(user_id),
    );

    res.render(Json(vec![json!({ "user_photo": url })]));
}

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(Router::with_path("users").get(list_users))
        .push(Router::with_path("user/{user_id}/photo").get(user_photo))
}
