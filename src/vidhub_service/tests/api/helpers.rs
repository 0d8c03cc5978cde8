use std::collections::HashMap;
use std::path::PathBuf;

use fake::Fake;
use fake::faker::internet::en::{SafeEmail, Username as FakeUsername};
use reqwest::multipart::{Form, Part};
use secrecy::Secret;
use serde_json::Value;
use tempfile::TempDir;
use tokio::net::TcpListener;
use vidhub_adapters::{
    AppState, CloudinaryMediaUploader, HashMapAccountStore, JwtTokenIssuer,
    auth::JwtConfig,
    config::{MediaSettings, UploadSettings, test},
};
use vidhub_service::AccountService;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const AVATAR_URL: &str = "https://media.test/avatar.png";
pub const COVER_URL: &str = "https://media.test/cover.png";
pub const AVATAR_BYTES: &str = "avatar-bytes";
pub const COVER_BYTES: &str = "cover-bytes";

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub media_server: MockServer,
    pub account_store: HashMapAccountStore,
    pub upload_dir: PathBuf,
    _temp_dir: TempDir,
}

/// Registration input for one account.
pub struct TestAccount {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl TestAccount {
    pub fn random() -> Self {
        let username: String = FakeUsername().fake();
        Self {
            full_name: "Test Account".to_owned(),
            username: username.to_lowercase(),
            email: SafeEmail().fake::<String>().to_lowercase(),
            password: "password123".to_owned(),
        }
    }

    pub fn text_form(&self) -> Form {
        Form::new()
            .text("fullName", self.full_name.clone())
            .text("username", self.username.clone())
            .text("email", self.email.clone())
            .text("password", self.password.clone())
    }

    pub fn form_with_avatar(&self) -> Form {
        with_file(self.text_form(), "avatar", AVATAR_BYTES)
    }
}

pub fn with_file(form: Form, field: &'static str, content: &'static str) -> Form {
    form.part(
        field,
        Part::bytes(content.as_bytes().to_vec()).file_name(format!("{field}.png")),
    )
}

pub fn with_file_bytes(form: Form, field: &'static str, content: Vec<u8>) -> Form {
    form.part(
        field,
        Part::bytes(content).file_name(format!("{field}.png")),
    )
}

/// Tokens handed out by login or refresh.
pub struct Tokens {
    pub access_token: String,
    pub refresh_token: String,
}

impl TestApp {
    pub async fn new() -> Self {
        let media_server = MockServer::start().await;
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let upload_dir = temp_dir.path().join("uploads");

        let media_settings = MediaSettings {
            base_url: media_server.uri(),
            cloud_name: test::media::CLOUD_NAME.to_owned(),
            api_key: test::media::API_KEY.to_owned(),
            api_secret: Secret::from(test::media::API_SECRET.to_owned()),
            folder: None,
            timeout_in_millis: test::media::TIMEOUT.as_millis() as u64,
        };
        let media_client = reqwest::Client::builder()
            .timeout(test::media::TIMEOUT)
            .build()
            .expect("Failed to build media client");
        let media_uploader = CloudinaryMediaUploader::new(&media_settings, media_client);

        let token_issuer = JwtTokenIssuer::new(
            JwtConfig {
                secret: Secret::from(test::ACCESS_TOKEN_SECRET.to_owned()),
                ttl_in_seconds: 600,
            },
            JwtConfig {
                secret: Secret::from(test::REFRESH_TOKEN_SECRET.to_owned()),
                ttl_in_seconds: 6000,
            },
        );

        let account_store = HashMapAccountStore::new();
        let state = AppState::new(
            account_store.clone(),
            media_uploader,
            token_issuer,
            UploadSettings {
                temp_dir: upload_dir.clone(),
                max_file_bytes: test::UPLOAD_MAX_FILE_BYTES,
            },
        );

        let listener = TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(AccountService::new(state).run_standalone(listener, None));

        Self {
            address,
            http_client: reqwest::Client::new(),
            media_server,
            account_store,
            upload_dir,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, route: &str) -> String {
        format!("{}/api/v1/users{route}", self.address)
    }

    pub async fn mock_uploads(&self, url: &str) {
        Mock::given(method("POST"))
            .and(path(upload_path()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "secure_url": url, "public_id": "id" })),
            )
            .mount(&self.media_server)
            .await;
    }

    /// Answers uploads whose body contains `content` with `url`, ahead of
    /// [`TestApp::mock_uploads`].
    pub async fn mock_upload_of(&self, content: &str, url: &str) {
        Mock::given(method("POST"))
            .and(path(upload_path()))
            .and(body_string_contains(content))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "secure_url": url, "public_id": "id" })),
            )
            .with_priority(1)
            .mount(&self.media_server)
            .await;
    }

    /// Fails every upload whose body contains `content`.
    pub async fn mock_failing_upload_of(&self, content: &str) {
        Mock::given(method("POST"))
            .and(path(upload_path()))
            .and(body_string_contains(content))
            .respond_with(ResponseTemplate::new(500))
            .with_priority(1)
            .mount(&self.media_server)
            .await;
    }

    /// Number of files still sitting in the upload directory.
    pub fn staged_files(&self) -> usize {
        std::fs::read_dir(&self.upload_dir)
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    pub async fn post_register(&self, form: Form) -> reqwest::Response {
        self.http_client
            .post(self.url("/register"))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_register_json<Body: serde::Serialize>(
        &self,
        body: &Body,
    ) -> reqwest::Response {
        self.http_client
            .post(self.url("/register"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_login<Body: serde::Serialize>(&self, body: &Body) -> reqwest::Response {
        self.http_client
            .post(self.url("/login"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_logout(&self, access_token: &str) -> reqwest::Response {
        self.http_client
            .post(self.url("/logout"))
            .header("Cookie", format!("accessToken={access_token}"))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_refresh_token_cookie(&self, refresh_token: &str) -> reqwest::Response {
        self.http_client
            .post(self.url("/refresh-token"))
            .header("Cookie", format!("refreshToken={refresh_token}"))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_refresh_token_body<Body: serde::Serialize>(
        &self,
        body: &Body,
    ) -> reqwest::Response {
        self.http_client
            .post(self.url("/refresh-token"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_change_password<Body: serde::Serialize>(
        &self,
        access_token: &str,
        body: &Body,
    ) -> reqwest::Response {
        self.http_client
            .post(self.url("/change-password"))
            .header("Cookie", format!("accessToken={access_token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_current_user(&self, access_token: &str) -> reqwest::Response {
        self.http_client
            .get(self.url("/current-user"))
            .header("Cookie", format!("accessToken={access_token}"))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_current_user_with_bearer(&self, access_token: &str) -> reqwest::Response {
        self.http_client
            .get(self.url("/current-user"))
            .bearer_auth(access_token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_current_user_anonymously(&self) -> reqwest::Response {
        self.http_client
            .get(self.url("/current-user"))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn patch_update_account<Body: serde::Serialize>(
        &self,
        access_token: &str,
        body: &Body,
    ) -> reqwest::Response {
        self.http_client
            .patch(self.url("/update-account"))
            .header("Cookie", format!("accessToken={access_token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn patch_media(
        &self,
        route: &str,
        access_token: Option<&str>,
        form: Form,
    ) -> reqwest::Response {
        let mut request = self.http_client.patch(self.url(route)).multipart(form);
        if let Some(access_token) = access_token {
            request = request.header("Cookie", format!("accessToken={access_token}"));
        }
        request.send().await.expect("Failed to execute request.")
    }

    /// Registers `account` with an avatar and returns the created account's id.
    pub async fn register(&self, account: &TestAccount) -> String {
        let response = self.post_register(account.form_with_avatar()).await;
        assert_eq!(response.status().as_u16(), 201);
        let body: Value = response.json().await.unwrap();
        body["data"]["id"].as_str().unwrap().to_owned()
    }

    pub async fn login(&self, account: &TestAccount) -> Tokens {
        let response = self
            .post_login(&serde_json::json!({
                "username": account.username,
                "password": account.password,
            }))
            .await;
        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();
        Tokens {
            access_token: body["data"]["accessToken"].as_str().unwrap().to_owned(),
            refresh_token: body["data"]["refreshToken"].as_str().unwrap().to_owned(),
        }
    }

    /// Mocks a working media host, registers a random account and logs it in.
    pub async fn logged_in_account(&self) -> (TestAccount, String, Tokens) {
        self.mock_uploads(AVATAR_URL).await;
        let account = TestAccount::random();
        let id = self.register(&account).await;
        let tokens = self.login(&account).await;
        (account, id, tokens)
    }
}

pub fn upload_path() -> String {
    format!("/v1_1/{}/auto/upload", test::media::CLOUD_NAME)
}

/// `Set-Cookie` headers of `response`, keyed by cookie name.
pub fn set_cookies(response: &reqwest::Response) -> HashMap<String, String> {
    response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|cookie| {
            let (name, _) = cookie.split_once('=')?;
            Some((name.to_owned(), cookie.to_owned()))
        })
        .collect()
}

/// Value part of a `Set-Cookie` header.
pub fn cookie_value(set_cookie: &str) -> &str {
    set_cookie
        .split(';')
        .next()
        .and_then(|pair| pair.split_once('='))
        .map(|(_, value)| value)
        .unwrap_or_default()
}

/// Subject of a token signed with `secret`.
pub fn token_subject(token: &str, secret: &str) -> String {
    let mut validation = jsonwebtoken::Validation::default();
    validation.required_spec_claims.clear();
    let data = jsonwebtoken::decode::<Value>(
        token,
        &jsonwebtoken::DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .unwrap();
    data.claims["sub"].as_str().unwrap().to_owned()
}
