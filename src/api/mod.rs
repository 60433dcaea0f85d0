pub mod handlers;
pub mod middleware;
pub mod state;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{config::CorsConfig, web};
use state::AppState;

pub fn create_app(app_state: AppState) -> Router {
    let cors = cors_layer(&app_state.settings.cors);

    let mut router = Router::new()
        .merge(api_routes(app_state.clone()))
        .merge(submission_routes(app_state.clone()))
        .merge(web::create_web_routes());

    if let Some(root) = app_state.settings.storage.media_root.clone() {
        tracing::info!(%root, "Serving local media under /media/");
        router = router.merge(media_routes(app_state.clone(), &root));
    }

    router
        // Add state to the router
        .with_state(app_state)

        // Middleware, outermost first
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CompressionLayer::new()),
        )
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/", get(handlers::root::api_info))
        .route("/api/testimonials/", get(handlers::content::testimonials))
        .route("/api/leadership/", get(handlers::content::leadership))
        .route("/api/gallery/", get(handlers::content::gallery))
        .route("/api/fees/", get(handlers::fees::list))
        .route("/api/events/", get(handlers::events::list))
        .route("/api/events/calendar/", get(handlers::events::calendar))
        .route("/api/featured-events/", get(handlers::content::featured_events))
        .route("/api/alumni/", get(handlers::content::alumni))
        .route("/api/admission-deadlines/", get(handlers::content::admission_deadlines))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::throttle::throttle_anon,
        ))
}

fn submission_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/admissions/submit/", post(handlers::submissions::admission))
        .route("/api/contact/submit/", post(handlers::submissions::contact))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::throttle::throttle_submissions,
        ))
}

fn media_routes(state: AppState, root: &str) -> Router<AppState> {
    Router::new()
        .nest_service("/media", ServeDir::new(root))
        .layer(axum::middleware::from_fn_with_state(
            state,
            middleware::media::require_media_access,
        ))
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ORIGIN,
            HeaderName::from_static("x-csrftoken"),
            HeaderName::from_static("x-requested-with"),
        ]);

    if config.allow_all {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
