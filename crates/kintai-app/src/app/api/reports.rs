//! Per-user attendance report endpoints.
//!
//! Every report loads the presence table through the TTL cache, extracts one
//! user's days, and renders heterogeneous JSON rows the front-end tables
//! consume directly.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use kintai_core::constants::{MONTH_ABBR, WEEKDAY_ABBR};
use kintai_core::presence::aggregate::{
    group_by_weekday, mean, mean_start_end_by_weekday, monthly_worked_hours,
};
use kintai_core::presence::{DayPresence, UserId};
use salvo::writing::{Json, Text};
use salvo::{Depot, Request, Response, Router, handler, http::StatusCode};
use serde_json::{Value, json};
use tracing::error;

use super::ErrorResponse;
use crate::state::get_state_from_depot;

/// Loads the presence table and extracts one user's days, rendering the
/// error response itself when it cannot: 400 for a non-numeric id, 404 with
/// a plain-text body for an unknown user, 500 when the load fails.
fn user_days(
    req: &Request,
    depot: &Depot,
    res: &mut Response,
) -> Option<BTreeMap<NaiveDate, DayPresence>> {
    let Some(user_id) = req.param::<UserId>("user_id") else {
        res.status_code(StatusCode::BAD_REQUEST);
        res.render(Text::Plain("user_id must be an integer"));
        return None;
    };
    let state = match get_state_from_depot(depot) {
        Ok(state) => state,
        Err(err) => {
            error!(error = ?err, "presence state missing from depot");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Internal server error".to_owned(),
            }));
            return None;
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
            return None;
        }
    };
    match table.get(&user_id) {
        Some(days) => Some(days.clone()),
        None => {
            tracing::debug!(user_id, "user not found in presence data");
            res.status_code(StatusCode::NOT_FOUND);
            res.render(Text::Plain(format!("User {user_id} not found")));
            None
        }
    }
}

#[expect(clippy::cast_precision_loss)]
fn to_f64(values: &[i64]) -> Vec<f64> {
    values.iter().map(|&v| v as f64).collect()
}

/// ## Summary
/// GET `/api/v1/mean_time_weekday/{user_id}` - mean presence time per
/// weekday, 7 rows `[abbr, mean_seconds]`.
#[handler]
async fn mean_time_weekday(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(days) = user_days(req, depot, res) else {
        return;
    };

    let buckets = group_by_weekday(&days);
    let rows: Vec<Value> = WEEKDAY_ABBR
        .iter()
        .zip(buckets.iter())
        .map(|(abbr, intervals)| json!([abbr, mean(&to_f64(intervals))]))
        .collect();

    res.render(Json(rows));
}

/// ## Summary
/// GET `/api/v1/presence_weekday/{user_id}` - total presence time per
/// weekday, a header row plus 7 rows `[abbr, total_seconds]`.
#[handler]
async fn presence_weekday(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(days) = user_days(req, depot, res) else {
        return;
    };

    let buckets = group_by_weekday(&days);
    let mut rows: Vec<Value> = vec![json!(["Weekday", "Presence (s)"])];
    rows.extend(
        WEEKDAY_ABBR
            .iter()
            .zip(buckets.iter())
            .map(|(abbr, intervals)| json!([abbr, intervals.iter().sum::<i64>()])),
    );

    res.render(Json(rows));
}

/// ## Summary
/// GET `/api/v1/presence_start_end/{user_id}` - mean start and end of day
/// per weekday, 7 rows `[abbr, mean_start_seconds, mean_end_seconds]`.
#[handler]
async fn presence_start_end(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(days) = user_days(req, depot, res) else {
        return;
    };

    let means = mean_start_end_by_weekday(&days);
    let rows: Vec<Value> = WEEKDAY_ABBR
        .iter()
        .zip(means.iter())
        .map(|(abbr, &(start, end))| json!([abbr, start, end]))
        .collect();

    res.render(Json(rows));
}

/// ## Summary
/// GET `/api/v1/monthly_hours/{user_id}` - worked hours summed per month,
/// a header row naming the observed years plus 12 month rows.
#[handler]
async fn monthly_hours(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(days) = user_days(req, depot, res) else {
        return;
    };

    let monthly = monthly_worked_hours(&days);
    let mut header = vec![json!("Month")];
    header.extend(monthly.years.iter().map(|year| json!(year.to_string())));

    let mut rows: Vec<Value> = vec![Value::Array(header)];
    rows.extend(
        MONTH_ABBR
            .iter()
            .zip(monthly.cells.iter())
            .map(|(abbr, cells)| {
                let mut row = vec![json!(abbr)];
                row.extend(cells.iter().map(|&hours| json!(hours)));
                Value::Array(row)
            }),
    );

    res.render(Json(rows));
}

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(Router::with_path("mean_time_weekday/{user_id}").get(mean_time_weekday))
        .push(Router::with_path("presence_weekday/{user_id}").get(presence_weekday))
        .push(Router::with_path("presence_start_end/{user_id}").get(presence_start_end))
        .push(Router::with_path("monthly_hours/{user_id}").get(monthly_hours))
}
