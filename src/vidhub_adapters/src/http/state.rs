use std::sync::Arc;

use vidhub_core::{AccountStore, MediaUploader};

use crate::auth::JwtTokenIssuer;
use crate::config::UploadSettings;

/// Shared state handed to every account route.
pub struct AppState<S, M> {
    pub account_store: Arc<S>,
    pub media_uploader: Arc<M>,
    pub token_issuer: Arc<JwtTokenIssuer>,
    pub uploads: Arc<UploadSettings>,
}

impl<S, M> AppState<S, M>
where
    S: AccountStore + 'static,
    M: MediaUploader + 'static,
{
    pub fn new(
        account_store: S,
        media_uploader: M,
        token_issuer: JwtTokenIssuer,
        uploads: UploadSettings,
    ) -> Self {
        Self {
            account_store: Arc::new(account_store),
            media_uploader: Arc::new(media_uploader),
            token_issuer: Arc::new(token_issuer),
            uploads: Arc::new(uploads),
        }
    }
}

// Manual impl so that neither S nor M has to be Clone
impl<S, M> Clone for AppState<S, M> {
    fn clone(&self) -> Self {
        Self {
            account_store: Arc::clone(&self.account_store),
            media_uploader: Arc::clone(&self.media_uploader),
            token_issuer: Arc::clone(&self.token_issuer),
            uploads: Arc::clone(&self.uploads),
        }
    }
}
