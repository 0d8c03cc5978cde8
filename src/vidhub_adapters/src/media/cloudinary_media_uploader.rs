use std::path::Path;

use reqwest::{
    Client, Url,
    multipart::{Form, Part},
};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use vidhub_core::{MediaUploadError, MediaUploader, UploadedMedia};

use crate::config::MediaSettings;

/// Uploads files to a Cloudinary-compatible media host with signed requests.
pub struct CloudinaryMediaUploader {
    http_client: Client,
    base_url: String,
    cloud_name: String,
    api_key: String,
    api_secret: Secret<String>,
    folder: Option<String>,
}

impl CloudinaryMediaUploader {
    pub fn new(settings: &MediaSettings, http_client: Client) -> Self {
        Self {
            http_client,
            base_url: with_trailing_slash(&settings.base_url),
            cloud_name: settings.cloud_name.clone(),
            api_key: settings.api_key.clone(),
            api_secret: settings.api_secret.clone(),
            folder: settings.folder.clone().filter(|folder| !folder.is_empty()),
        }
    }

    async fn send(&self, local_path: &Path) -> Result<UploadedMedia, MediaUploadError> {
        let bytes = tokio::fs::read(local_path)
            .await
            .map_err(|e| MediaUploadError::LocalFile(e.to_string()))?;
        let file_name = local_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_owned());

        let url = Url::parse(&self.base_url)
            .and_then(|base| base.join(&format!("v1_1/{}/auto/upload", self.cloud_name)))
            .map_err(|e| MediaUploadError::Request(e.to_string()))?;

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let mut signed_params = vec![("timestamp", timestamp.as_str())];
        if let Some(folder) = &self.folder {
            signed_params.push(("folder", folder.as_str()));
        }
        let signature = sign(&signed_params, &self.api_secret);

        let mut form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name))
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp.clone())
            .text("signature_algorithm", SIGNATURE_ALGORITHM)
            .text("signature", signature);
        if let Some(folder) = &self.folder {
            form = form.text("folder", folder.clone());
        }

        let response: UploadResponse = self
            .http_client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| MediaUploadError::Request(e.to_string()))?
            .error_for_status()
            .map_err(|e| MediaUploadError::Request(e.to_string()))?
            .json()
            .await
            .map_err(|e| MediaUploadError::Request(e.to_string()))?;

        let url = response
            .secure_url
            .or(response.url)
            .filter(|url| !url.trim().is_empty())
            .ok_or(MediaUploadError::MissingUrl)?;

        Ok(UploadedMedia {
            url,
            public_id: response.public_id,
        })
    }
}

#[async_trait::async_trait]
impl MediaUploader for CloudinaryMediaUploader {
    #[tracing::instrument(name = "Uploading media", skip_all, fields(path = %local_path.display()))]
    async fn upload(&self, local_path: &Path) -> Result<UploadedMedia, MediaUploadError> {
        let result = self.send(local_path).await;

        match tokio::fs::remove_file(local_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(error = %e, "Failed to remove staged upload"),
        }

        match &result {
            Ok(uploaded) => tracing::info!(public_id = ?uploaded.public_id, "Media uploaded"),
            Err(e) => tracing::error!(error = %e, "Media upload failed"),
        }
        result
    }
}

const SIGNATURE_ALGORITHM: &str = "sha256";

// `Url::join` replaces the last segment of a base path without a trailing slash
fn with_trailing_slash(base_url: &str) -> String {
    if base_url.ends_with('/') {
        base_url.to_owned()
    } else {
        format!("{base_url}/")
    }
}

/// Signs `params` the way the media host expects: sorted `key=value` pairs
/// joined by `&`, the api secret appended, hashed with SHA-256.
fn sign(params: &[(&str, &str)], api_secret: &Secret<String>) -> String {
    let mut params = params.to_vec();
    params.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.expose_secret().as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    url: Option<String>,
    public_id: Option<String>,
}
