use std::collections::HashMap;
use std::path::{Path, PathBuf};

use axum::extract::{Multipart, multipart::Field};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use super::routes::ApiError;

/// Text fields and staged files of a multipart request.
///
/// Files are written under the upload temp dir with a random name. Whatever
/// is not taken with [`StagedUploads::take_file`] is removed by
/// [`StagedUploads::discard`].
#[derive(Debug, Default)]
pub struct StagedUploads {
    text: HashMap<String, String>,
    files: HashMap<String, PathBuf>,
}

impl StagedUploads {
    #[tracing::instrument(name = "Staging multipart upload", skip_all)]
    pub async fn from_multipart(
        mut multipart: Multipart,
        temp_dir: &Path,
    ) -> Result<Self, ApiError> {
        let mut staged = StagedUploads::default();

        tokio::fs::create_dir_all(temp_dir)
            .await
            .map_err(|e| ApiError::internal("Failed to prepare upload directory", e))?;

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => {
                    staged.discard().await;
                    return Err(ApiError::validation("Invalid multipart body")
                        .with_errors(vec![e.body_text()]));
                }
            };

            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            let result = match field.file_name().map(str::to_owned) {
                Some(file_name) if !file_name.is_empty() => {
                    staged.stage_file(name, &file_name, field, temp_dir).await
                }
                Some(_) => Ok(()),
                None => match field.text().await {
                    Ok(value) => {
                        staged.text.insert(name, value);
                        Ok(())
                    }
                    Err(e) => Err(ApiError::validation("Invalid multipart body")
                        .with_errors(vec![e.body_text()])),
                },
            };

            if let Err(e) = result {
                staged.discard().await;
                return Err(e);
            }
        }

        Ok(staged)
    }

    async fn stage_file(
        &mut self,
        name: String,
        file_name: &str,
        mut field: Field<'_>,
        temp_dir: &Path,
    ) -> Result<(), ApiError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|extension| extension.to_str())
            .filter(|extension| extension.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|extension| format!(".{extension}"))
            .unwrap_or_default();
        let path = temp_dir.join(format!("{}{extension}", Uuid::new_v4()));

        let mut file = tokio::fs::File::create(&path)
            .await
            .map_err(|e| ApiError::internal("Failed to stage upload", e))?;

        // Registered first so that a failure below still cleans the file up
        if let Some(previous) = self.files.insert(name, path.clone()) {
            remove_staged([previous]).await;
        }

        let mut written = 0usize;
        loop {
            match field.chunk().await {
                Ok(Some(chunk)) => {
                    written += chunk.len();
                    file.write_all(&chunk)
                        .await
                        .map_err(|e| ApiError::internal("Failed to stage upload", e))?;
                }
                Ok(None) => break,
                Err(e) => {
                    return Err(ApiError::validation("Invalid multipart body")
                        .with_errors(vec![e.body_text()]));
                }
            }
        }

        file.flush()
            .await
            .map_err(|e| ApiError::internal("Failed to stage upload", e))?;

        if written == 0 {
            self.files.retain(|_, staged| staged != &path);
            remove_staged([path]).await;
        }

        Ok(())
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.text.get(name).map(String::as_str)
    }

    pub fn take_file(&mut self, name: &str) -> Option<PathBuf> {
        self.files.remove(name)
    }

    /// Removes every staged file that was not taken.
    pub async fn discard(self) {
        remove_staged(self.files.into_values()).await;
    }
}

/// Removes staged files, ignoring the ones that are already gone.
pub async fn remove_staged(paths: impl IntoIterator<Item = PathBuf>) {
    for path in paths {
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(error = %e, path = %path.display(), "Failed to remove staged file"),
        }
    }
}
