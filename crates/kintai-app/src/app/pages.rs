//! Static HTML report shells; the tables are rendered client-side from the
//! JSON API.

use salvo::writing::{Redirect, Text};
use salvo::{Response, Router, handler};

const PRESENCE_WEEKDAY_HTML: &str = include_str!("templates/presence_weekday.html");
const MEAN_TIME_WEEKDAY_HTML: &str = include_str!("templates/mean_time_weekday.html");
const PRESENCE_START_END_HTML: &str = include_str!("templates/presence_start_end.html");
const MONTHLY_HOURS_HTML: &str = include_str!("templates/monthly_hours.html");

#[handler]
async fn index(res: &mut Response) {
    res.render(Redirect::found("/presence_weekday"));
}

#[handler]
async fn presence_weekday(res: &mut Response) {
    res.render(Text::Html(PRESENCE_WEEKDAY_HTML));
}

#[handler]
async fn mean_time_weekday(res: &mut Response) {
    res.render(Text::Html(MEAN_TIME_WEEKDAY_HTML));
}

#[handler]
async fn presence_start_end(res: &mut Response) {
    res.render(Text::Html(PRESENCE_START_END_HTML));
}

#[handler]
async fn monthly_hours(res: &mut Response) {
    res.render(Text::Html(MONTHLY_HOURS_HTML));
}

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .get(index)
        .push(Router::with_path("presence_weekday").get(presence_weekday))
        .push(Router::with_path("mean_time_weekday").get(mean_time_weekday))
        .push(Router::with_path("presence_start_end").get(presence_start_end))
        .push(Router::with_path("monthly_hours").get(monthly_hours))
}
