use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, request},
    routing::{get, patch, post},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use vidhub_adapters::{
    AppState,
    config::{API_PREFIX, AllowedOrigins},
    http::routes::{
        change_password, current_account, login, logout, refresh_token, register, update_account,
        update_avatar, update_cover_image,
    },
};
use vidhub_core::{AccountStore, MediaUploader};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Account service exposing every account route under `/api/v1/users`
pub struct AccountService {
    router: Router,
}

impl AccountService {
    /// Create a new AccountService over the given state
    ///
    /// # Arguments
    /// * `state` - Account store, media uploader, token issuer and upload settings
    ///   shared by all routes
    pub fn new<S, M>(state: AppState<S, M>) -> Self
    where
        S: AccountStore + 'static,
        M: MediaUploader + 'static,
    {
        let upload_limit = DefaultBodyLimit::max(state.uploads.max_file_bytes);

        let routes = Router::new()
            .route(
                "/register",
                post(register::<S, M>).layer(upload_limit.clone()),
            )
            .route("/login", post(login::<S, M>))
            .route("/logout", post(logout::<S, M>))
            .route("/refresh-token", post(refresh_token::<S, M>))
            .route("/change-password", post(change_password::<S, M>))
            .route("/current-user", get(current_account))
            .route("/update-account", patch(update_account::<S, M>))
            .route(
                "/avatar",
                patch(update_avatar::<S, M>).layer(upload_limit.clone()),
            )
            .route(
                "/cover-image",
                patch(update_cover_image::<S, M>).layer(upload_limit),
            )
            .with_state(state);

        let router = Router::new().nest(API_PREFIX, routes);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the AccountService into a router that can be mounted on another router
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins.filter(|origins| !origins.is_empty()) {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PATCH])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the account service as a standalone server
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Account service listening on {}", listener.local_addr()?);

        axum_server::Server::<std::net::SocketAddr>::from_listener(listener)
            .serve(router.into_make_service())
            .await
    }
}
