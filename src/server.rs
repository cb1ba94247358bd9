use axum::{
    extract::Request,
    handler::HandlerWithoutStateExt,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::any::Any;
use std::sync::Arc;
use tower::Layer;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{self, CorsLayer},
    normalize_path::{NormalizePath, NormalizePathLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::api::{self, ApiError};
use crate::config::Config;
use crate::movies::MovieRepo;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub movies: Arc<dyn MovieRepo>,
}

impl AppState {
    pub fn new(config: Config, movies: Arc<dyn MovieRepo>) -> Self {
        Self {
            config: Arc::new(config),
            movies,
        }
    }
}

/// The router wrapped in trailing-slash trimming. The trimming has to sit
/// outside the router so that it runs before route matching.
pub fn build_app(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}

pub fn build_router(state: AppState) -> Router {
    let movie_routes = Router::new()
        .route(
            "/api/movies",
            get(api::list_movies).post(api::create_movie),
        )
        .route("/api/movies/filter", get(api::filter_movies))
        .route(
            "/api/movies/:id",
            get(api::get_movie)
                .put(api::update_movie)
                .delete(api::delete_movie),
        );

    let mut router = Router::new()
        .route_service("/", ServeFile::new(&state.config.index))
        .route("/health", get(api::health_handler))
        .merge(movie_routes);

    router = match state.config.appdir {
        Some(ref appdir) => router.fallback_service(
            ServeDir::new(appdir)
                .call_fallback_on_method_not_allowed(true)
                .not_found_service(fallback_handler.into_service()),
        ),
        None => router.fallback(fallback_handler),
    };

    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods(cors::Any)
                .allow_headers(cors::Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn fallback_handler(req: Request) -> Response {
    if req.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    ApiError::NotFound("Not found".to_string()).into_response()
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Internal(format!("Handler panicked: {}", detail)).into_response()
}
