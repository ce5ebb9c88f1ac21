//! Route table: method+path bound to ordered middleware chains ending in a
//! controller. Report routes run validation first, then JWT auth, then the
//! admin check, so a malformed query is rejected with 400 even without a token.

use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{protected, public};
use crate::middleware::{
    jwt_auth_middleware, require_admin_middleware, validate_date_range, validate_revenue_query,
};

pub fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_auth_routes())
        // Protected API
        .merge(api_routes())
        .merge(report_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn public_auth_routes() -> Router {
    Router::new()
        .route("/auth/register", post(public::auth::register))
        .route("/auth/login", post(public::auth::login))
}

/// Authenticated routes. Admin checks for lot mutations happen in-handler.
fn api_routes() -> Router {
    Router::new()
        .route("/api/auth/whoami", get(protected::auth::whoami_get))
        .route(
            "/api/cars",
            get(protected::cars::list_get).post(protected::cars::create_post),
        )
        .route(
            "/api/cars/:id",
            get(protected::cars::record_get)
                .put(protected::cars::record_put)
                .delete(protected::cars::record_delete),
        )
        .route(
            "/api/lots",
            get(protected::lots::list_get).post(protected::lots::create_post),
        )
        .route(
            "/api/lots/:id",
            get(protected::lots::record_get)
                .put(protected::lots::record_put)
                .delete(protected::lots::record_delete),
        )
        .route("/api/sessions", get(protected::sessions::list_get))
        .route("/api/sessions/entry", post(protected::sessions::entry_post))
        .route("/api/sessions/exit", post(protected::sessions::exit_post))
        .layer(from_fn(jwt_auth_middleware))
}

/// Admin-only report routes. Layers apply innermost-first, so listing the
/// admin check, then JWT, then validation yields the execution order
/// validate -> authenticate -> authorize -> controller.
fn report_routes() -> Router {
    use protected::reports;

    Router::new()
        .route(
            "/api/reports/outgoing",
            get(reports::outgoing_get)
                .layer(from_fn(require_admin_middleware))
                .layer(from_fn(jwt_auth_middleware))
                .layer(from_fn(validate_date_range)),
        )
        .route(
            "/api/reports/incoming",
            get(reports::incoming_get)
                .layer(from_fn(require_admin_middleware))
                .layer(from_fn(jwt_auth_middleware))
                .layer(from_fn(validate_date_range)),
        )
        .route(
            "/api/reports/occupancy",
            get(reports::occupancy_get)
                .layer(from_fn(require_admin_middleware))
                .layer(from_fn(jwt_auth_middleware)),
        )
        .route(
            "/api/reports/revenue",
            get(reports::revenue_get)
                .layer(from_fn(require_admin_middleware))
                .layer(from_fn(jwt_auth_middleware))
                .layer(from_fn(validate_revenue_query)),
        )
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Parking API",
            "version": version,
            "description": "Parking management REST backend",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "auth": "/auth/register, /auth/login (public - token acquisition)",
                "whoami": "/api/auth/whoami (protected)",
                "cars": "/api/cars[/:id] (protected)",
                "lots": "/api/lots[/:id] (protected, mutations admin-only)",
                "sessions": "/api/sessions, /api/sessions/entry, /api/sessions/exit (protected)",
                "reports": "/api/reports/{outgoing,incoming,occupancy,revenue} (admin)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "message": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
