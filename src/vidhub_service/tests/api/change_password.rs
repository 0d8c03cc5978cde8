use serde_json::{Value, json};

use crate::helpers::TestApp;

#[tokio::test]
async fn should_change_password_when_old_password_matches() {
    let app = TestApp::new().await;
    let (account, _, tokens) = app.logged_in_account().await;

    let response = app
        .post_change_password(
            &tokens.access_token,
            &json!({ "oldPassword": account.password, "newPassword": "new-password-456" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"], json!({}));
    assert_eq!(body["message"], "Password changed successfully");

    let old_login = app
        .post_login(&json!({ "username": account.username, "password": account.password }))
        .await;
    assert_eq!(old_login.status().as_u16(), 401);

    let new_login = app
        .post_login(&json!({ "username": account.username, "password": "new-password-456" }))
        .await;
    assert_eq!(new_login.status().as_u16(), 200);
}

#[tokio::test]
async fn should_return_400_for_wrong_old_password() {
    let app = TestApp::new().await;
    let (account, _, tokens) = app.logged_in_account().await;

    let response = app
        .post_change_password(
            &tokens.access_token,
            &json!({ "oldPassword": "not-my-password", "newPassword": "new-password-456" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid old password");

    let login = app
        .post_login(&json!({ "username": account.username, "password": account.password }))
        .await;
    assert_eq!(login.status().as_u16(), 200);
}

#[tokio::test]
async fn should_return_400_for_missing_fields() {
    let app = TestApp::new().await;
    let (account, _, tokens) = app.logged_in_account().await;

    let test_cases = [
        json!({ "oldPassword": account.password }),
        json!({ "newPassword": "new-password-456" }),
        json!({ "oldPassword": account.password, "newPassword": "  " }),
    ];

    for body in test_cases {
        let response = app.post_change_password(&tokens.access_token, &body).await;
        assert_eq!(response.status().as_u16(), 400, "Failed for input: {body}");
    }
}

#[tokio::test]
async fn should_return_401_for_invalid_access_token() {
    let app = TestApp::new().await;

    let response = app
        .post_change_password(
            "invalid-token",
            &json!({ "oldPassword": "password123", "newPassword": "new-password-456" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 401);
}
