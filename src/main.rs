use std::net::SocketAddr;
use std::sync::Arc;

use bookland::{
    api::{self, middleware::throttle::Throttles, state::AppState},
    config::Settings,
    service::ServiceContext,
    storage,
};
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let (settings, config_error) = match Settings::new() {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };

    // Initialize tracing
    let default_filter = if settings.server.debug {
        "bookland=debug,tower_http=debug"
    } else {
        "bookland=info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(e) = config_error {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
    }

    tracing::info!(
        debug = settings.server.debug,
        "Starting Bookland server on {}:{}",
        settings.server.host,
        settings.server.port
    );

    // Initialize database
    let db_pool = SqlitePoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect(&settings.database.url)
        .await?;

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await?;

    let file_resolver = storage::build_resolver(&settings.storage)?;
    let throttles = Throttles::from_config(&settings.throttle)?;

    // Create service context
    let service_context = Arc::new(ServiceContext::from_pool(db_pool, file_resolver));

    let address = format!("{}:{}", settings.server.host, settings.server.port);
    let app_state = AppState::new(service_context, Arc::new(settings), throttles);
    let app = api::create_app(app_state);

    let listener = tokio::net::TcpListener::bind(&address).await?;

    tracing::info!("Server listening on http://{}", address);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
