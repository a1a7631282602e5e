use std::any::Any;

use axum::{
    Router,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::error;

use crate::{
    handlers::system::{health_handler, not_found_handler, welcome_handler},
    infra::{
        app_state::AppState,
        errors::{AppError, INTERNAL_SERVER_ERROR},
    },
    routes,
};

pub fn create_app(state: AppState) -> Router {
    let app = Router::new()
        .route("/", get(welcome_handler))
        .route("/health", get(health_handler))
        .merge(routes::create_api_router())
        .with_state(state);

    with_middleware(app)
}

/// Fallbacks and layers shared by every route; outermost layer last.
pub fn with_middleware(router: Router) -> Router {
    router
        .fallback(not_found_handler)
        .method_not_allowed_fallback(not_found_handler)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        INTERNAL_SERVER_ERROR.to_string()
    };

    error!(panic = %message, "request handler panicked");
    AppError::internal(message).into_response()
}
