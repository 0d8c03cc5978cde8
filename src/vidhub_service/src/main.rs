use color_eyre::eyre::Result;
use tokio::net::TcpListener;
use vidhub_adapters::{
    AppState, CloudinaryMediaUploader, JwtTokenIssuer, PostgresAccountStore,
    config::{Settings, init_app_environment},
};
use vidhub_service::{AccountService, configure_postgresql, tracing::init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    color_eyre::install()?;
    init_tracing()?;

    let settings = Settings::build()?;
    init_app_environment(settings.application.environment);

    let pg_pool = configure_postgresql(&settings.postgres).await?;
    let account_store = PostgresAccountStore::new(pg_pool);

    let http_client = reqwest::Client::builder()
        .timeout(settings.media.timeout())
        .build()?;
    let media_uploader = CloudinaryMediaUploader::new(&settings.media, http_client);

    let token_issuer = JwtTokenIssuer::from_settings(&settings.auth);

    let state = AppState::new(
        account_store,
        media_uploader,
        token_issuer,
        settings.uploads.clone(),
    );

    let listener = TcpListener::bind(settings.application.address()).await?;
    tracing::info!(
        environment = settings.application.environment.as_str(),
        "Starting account service"
    );

    AccountService::new(state)
        .run_standalone(listener, Some(settings.auth.allowed_origins.clone()))
        .await?;

    Ok(())
}
