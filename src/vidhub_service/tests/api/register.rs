use serde_json::Value;
use vidhub_core::{AccountStore, Email, Username};

use crate::helpers::{
    AVATAR_BYTES, AVATAR_URL, COVER_BYTES, COVER_URL, TestAccount, TestApp, with_file,
    with_file_bytes,
};

#[tokio::test]
async fn should_return_201_with_sanitized_account() {
    let app = TestApp::new().await;
    app.mock_uploads(AVATAR_URL).await;
    let account = TestAccount {
        full_name: "A B".to_owned(),
        username: "abc".to_owned(),
        email: "a@b.com".to_owned(),
        password: "pw1".to_owned(),
    };

    let response = app.post_register(account.form_with_avatar()).await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["success"], true);
    let data = body["data"].as_object().unwrap();
    assert_eq!(data["username"], "abc");
    assert_eq!(data["email"], "a@b.com");
    assert_eq!(data["fullName"], "A B");
    assert_eq!(data["avatarUrl"], AVATAR_URL);
    assert_eq!(data["coverImageUrl"], Value::Null);
    assert!(data.contains_key("createdAt"));
    assert!(!data.contains_key("password"));
    assert!(!data.contains_key("passwordHash"));
    assert!(!data.contains_key("refreshToken"));
}

#[tokio::test]
async fn should_lowercase_username_and_email() {
    let app = TestApp::new().await;
    app.mock_uploads(AVATAR_URL).await;
    let account = TestAccount {
        username: "  MixedCase ".to_owned(),
        email: "Mixed@Example.COM".to_owned(),
        ..TestAccount::random()
    };

    let response = app.post_register(account.form_with_avatar()).await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["username"], "mixedcase");
    assert_eq!(body["data"]["email"], "mixed@example.com");
}

#[tokio::test]
async fn should_store_cover_image_when_supplied() {
    let app = TestApp::new().await;
    app.mock_uploads(AVATAR_URL).await;
    app.mock_upload_of(COVER_BYTES, COVER_URL).await;
    let account = TestAccount::random();

    let form = with_file(account.form_with_avatar(), "coverImage", COVER_BYTES);
    let response = app.post_register(form).await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["avatarUrl"], AVATAR_URL);
    assert_eq!(body["data"]["coverImageUrl"], COVER_URL);
    assert_eq!(app.staged_files(), 0);
}

#[tokio::test]
async fn should_register_without_cover_when_cover_upload_fails() {
    let app = TestApp::new().await;
    app.mock_uploads(AVATAR_URL).await;
    app.mock_failing_upload_of(COVER_BYTES).await;
    let account = TestAccount::random();

    let form = with_file(account.form_with_avatar(), "coverImage", COVER_BYTES);
    let response = app.post_register(form).await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["coverImageUrl"], Value::Null);
    assert_eq!(app.staged_files(), 0);
}

#[tokio::test]
async fn should_return_409_if_username_or_email_is_taken() {
    let app = TestApp::new().await;
    app.mock_uploads(AVATAR_URL).await;
    let existing = TestAccount::random();
    app.register(&existing).await;

    let same_username = TestAccount {
        username: existing.username.to_uppercase(),
        ..TestAccount::random()
    };
    let same_email = TestAccount {
        email: existing.email.clone(),
        ..TestAccount::random()
    };

    for (account, description) in [
        (&same_username, "same username"),
        (&same_email, "same email"),
    ] {
        let response = app.post_register(account.form_with_avatar()).await;
        assert_eq!(
            response.status().as_u16(),
            409,
            "Failed for input: {}",
            description
        );
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], false);
    }

    let email = Email::parse(&same_username.email).unwrap();
    assert!(
        app.account_store
            .find_by_username_or_email(None, Some(&email))
            .await
            .is_err()
    );
    let username = Username::parse(&same_email.username).unwrap();
    assert!(
        app.account_store
            .find_by_username_or_email(Some(&username), None)
            .await
            .is_err()
    );
    assert_eq!(app.staged_files(), 0);
}

#[tokio::test]
async fn should_return_400_without_avatar() {
    let app = TestApp::new().await;
    app.mock_uploads(AVATAR_URL).await;
    let account = TestAccount::random();

    let response = app.post_register(account.text_form()).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Avatar file is required");
    let username = Username::parse(&account.username).unwrap();
    assert!(
        app.account_store
            .find_by_username_or_email(Some(&username), None)
            .await
            .is_err()
    );
}

#[tokio::test]
async fn should_return_400_when_avatar_upload_fails() {
    let app = TestApp::new().await;
    app.mock_failing_upload_of(AVATAR_BYTES).await;
    let account = TestAccount::random();

    let response = app.post_register(account.form_with_avatar()).await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(app.staged_files(), 0);
}

#[tokio::test]
async fn should_return_400_if_required_field_is_blank() {
    let app = TestApp::new().await;
    app.mock_uploads(AVATAR_URL).await;

    let test_cases = [
        (
            TestAccount {
                full_name: "   ".to_owned(),
                ..TestAccount::random()
            },
            "blank full name",
        ),
        (
            TestAccount {
                username: String::new(),
                ..TestAccount::random()
            },
            "empty username",
        ),
        (
            TestAccount {
                email: "not-an-email".to_owned(),
                ..TestAccount::random()
            },
            "malformed email",
        ),
        (
            TestAccount {
                password: " ".to_owned(),
                ..TestAccount::random()
            },
            "blank password",
        ),
    ];

    for (account, description) in test_cases {
        let response = app.post_register(account.form_with_avatar()).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Failed for input: {}",
            description
        );
    }
    assert_eq!(app.staged_files(), 0);
}

#[tokio::test]
async fn should_return_error_envelope_for_non_multipart_body() {
    let app = TestApp::new().await;
    let account = TestAccount::random();

    let response = app
        .post_register_json(&serde_json::json!({
            "fullName": account.full_name,
            "username": account.username,
            "email": account.email,
            "password": account.password,
        }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["data"], Value::Null);
    assert_eq!(body["message"], "Invalid multipart body");
}

#[tokio::test]
async fn should_accept_avatar_larger_than_two_mebibytes() {
    let app = TestApp::new().await;
    app.mock_uploads(AVATAR_URL).await;
    let account = TestAccount::random();
    let avatar = vec![b'x'; 3 * 1024 * 1024];

    let response = app
        .post_register(with_file_bytes(account.text_form(), "avatar", avatar))
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["avatarUrl"], AVATAR_URL);
    assert_eq!(app.staged_files(), 0);
}
