//! Tests for the HTML report shells and the root redirect.

use salvo::http::StatusCode;
use salvo::test::{ResponseExt, TestClient};

use super::api::testing::test_app;

#[tokio::test]
async fn root_redirects_to_presence_weekday() {
    let app = test_app();

    let resp = TestClient::get("http://127.0.0.1:5800/")
        .send(&app.service)
        .await;

    assert_eq!(resp.status_code, Some(StatusCode::FOUND));
    let location = resp.headers().get("Location").unwrap().to_str().unwrap();
    assert!(location.ends_with("/presence_weekday"));
}

#[tokio::test]
async fn presence_weekday_page_renders() {
    let app = test_app();

    let mut resp = TestClient::get("http://127.0.0.1:5800/presence_weekday")
        .send(&app.service)
        .await;

    assert_eq!(resp.status_code, Some(StatusCode::OK));
    let body = resp.take_string().await.unwrap();
    assert!(body.contains("<h2>Presence by weekday</h2>"));
}

#[tokio::test]
async fn mean_time_weekday_page_renders() {
    let app = test_app();

    let mut resp = TestClient::get("http://127.0.0.1:5800/mean_time_weekday")
        .send(&app.service)
        .await;

    assert_eq!(resp.status_code, Some(StatusCode::OK));
    let body = resp.take_string().await.unwrap();
    assert!(body.contains("<h2>Presence mean time by weekday</h2>"));
}

#[tokio::test]
async fn monthly_hours_page_renders() {
    let app = test_app();

    let mut resp = TestClient::get("http://127.0.0.1:5800/monthly_hours")
        .send(&app.service)
        .await;

    assert_eq!(resp.status_code, Some(StatusCode::OK));
    let body = resp.take_string().await.unwrap();
    assert!(body.contains("<h2>Monthly worked hours</h2>"));
}
