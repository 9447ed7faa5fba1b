use axum::{
    http::HeaderValue,
    middleware,
    routing::{any, get},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, Environment};
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let config = crate::config::config();

    let mut router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Protected API
        .merge(posts_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if config.security.enable_cors {
        router = router.layer(cors_layer(config));
    }

    router
}

fn posts_routes() -> Router<AppState> {
    use protected::posts;

    Router::new()
        // Every method reaches the handler so non-GET gets the JSON 405 body
        .route("/api/posts/my-search", any(posts::my_search))
        .route_layer(middleware::from_fn(jwt_auth_middleware))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if matches!(config.environment, Environment::Development) {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}
