use reqwest::multipart::Form;
use serde_json::Value;

use crate::helpers::{AVATAR_BYTES, COVER_BYTES, COVER_URL, TestApp, with_file};

const NEW_AVATAR_URL: &str = "https://media.test/new-avatar.png";

#[tokio::test]
async fn should_replace_avatar() {
    let app = TestApp::new().await;
    let (_, id, tokens) = app.logged_in_account().await;
    app.mock_upload_of(AVATAR_BYTES, NEW_AVATAR_URL).await;

    let form = with_file(Form::new(), "avatar", AVATAR_BYTES);
    let response = app
        .patch_media("/avatar", Some(tokens.access_token.as_str()), form)
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Avatar image updated successfully");
    assert_eq!(body["data"]["id"], id.as_str());
    assert_eq!(body["data"]["avatarUrl"], NEW_AVATAR_URL);
    assert_eq!(app.staged_files(), 0);
}

#[tokio::test]
async fn should_replace_cover_image() {
    let app = TestApp::new().await;
    let (_, _, tokens) = app.logged_in_account().await;
    app.mock_upload_of(COVER_BYTES, COVER_URL).await;

    let form = with_file(Form::new(), "coverImage", COVER_BYTES);
    let response = app
        .patch_media("/cover-image", Some(tokens.access_token.as_str()), form)
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Cover image updated successfully");
    assert_eq!(body["data"]["coverImageUrl"], COVER_URL);
    assert_eq!(app.staged_files(), 0);
}

#[tokio::test]
async fn should_return_400_when_file_is_missing() {
    let app = TestApp::new().await;
    let (_, _, tokens) = app.logged_in_account().await;

    let test_cases = [
        ("/avatar", Form::new().text("note", "no file")),
        ("/cover-image", with_file(Form::new(), "avatar", AVATAR_BYTES)),
    ];

    for (route, form) in test_cases {
        let response = app
            .patch_media(route, Some(tokens.access_token.as_str()), form)
            .await;
        assert_eq!(response.status().as_u16(), 400, "Failed for route: {route}");
    }
    assert_eq!(app.staged_files(), 0);
}

#[tokio::test]
async fn should_return_400_and_keep_old_url_when_upload_fails() {
    let app = TestApp::new().await;
    let (_, _, tokens) = app.logged_in_account().await;
    app.mock_failing_upload_of(COVER_BYTES).await;

    let form = with_file(Form::new(), "coverImage", COVER_BYTES);
    let response = app
        .patch_media("/cover-image", Some(tokens.access_token.as_str()), form)
        .await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(app.staged_files(), 0);

    let response = app.get_current_user(&tokens.access_token).await;
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["coverImageUrl"], Value::Null);
}

#[tokio::test]
async fn should_return_401_without_access_token() {
    let app = TestApp::new().await;

    let form = with_file(Form::new(), "avatar", AVATAR_BYTES);
    let response = app.patch_media("/avatar", None, form).await;

    assert_eq!(response.status().as_u16(), 401);
}
