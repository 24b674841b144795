//! Router assembly

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::warn;

use folio_shared::constants::ADMIN_SESSION_HEADER;

use crate::handlers::{content, contact, health, portfolio, session, settings, upload};
use crate::middleware::admin_gate;
use crate::state::AppState;

/// Multipart framing on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/api/v1/portfolio", get(portfolio::get_portfolio))
        .route("/api/v1/contact", post(contact::send_message));

    // Session open, status and logout authenticate in the handler; status
    // reads must not count as activity.
    let session_routes = Router::new().route(
        "/api/v1/admin/session",
        post(session::open_session)
            .get(session::session_status)
            .delete(session::close_session),
    );

    let admin_routes = Router::new()
        .route("/api/v1/admin/session/activity", post(session::record_activity))
        .route(
            "/api/v1/admin/content/{collection}",
            get(content::list_records).post(content::create_record),
        )
        .route(
            "/api/v1/admin/content/{collection}/{id}",
            put(content::update_record).delete(content::delete_record),
        )
        .route("/api/v1/admin/settings", put(settings::save_settings))
        .route("/api/v1/admin/uploads", post(upload::upload_file))
        .route_layer(middleware::from_fn_with_state(state.clone(), admin_gate));

    let body_limit = state.config.upload.max_bytes + MULTIPART_OVERHEAD;
    let cors = cors_layer(&state.config.app.cors_origins);

    Router::new()
        .merge(public_routes)
        .merge(session_routes)
        .merge(admin_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(DefaultBodyLimit::max(body_limit))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(ADMIN_SESSION_HEADER),
        ]);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(allowed)
}
