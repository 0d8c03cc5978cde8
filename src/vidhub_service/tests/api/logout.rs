use serde_json::Value;

use crate::helpers::{TestApp, cookie_value, set_cookies};

#[tokio::test]
async fn should_clear_cookies_and_stored_refresh_token() {
    let app = TestApp::new().await;
    let (_, _, tokens) = app.logged_in_account().await;

    let response = app.post_logout(&tokens.access_token).await;

    assert_eq!(response.status().as_u16(), 200);
    let cookies = set_cookies(&response);
    for name in ["accessToken", "refreshToken"] {
        let cookie = &cookies[name];
        assert_eq!(cookie_value(cookie), "");
        assert!(cookie.contains("Max-Age=0"));
    }
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"], serde_json::json!({}));

    let response = app.post_refresh_token_cookie(&tokens.refresh_token).await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn should_return_401_without_access_token() {
    let app = TestApp::new().await;

    let response = app
        .http_client
        .post(format!("{}/api/v1/users/logout", app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Unauthorized request");
}
