use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::error::{ApiError, MessageResponse};
use crate::movies::{parse_position, MovieInput, MovieRepo};
use crate::server::AppState;

/// Serialize `value` up front so that a serialization failure is reported as
/// an internal error with the usual `{message}` body.
fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Result<Response, ApiError> {
    let body = serde_json::to_vec(value)?;
    Ok((status, [(header::CONTENT_TYPE, "application/json")], body).into_response())
}

pub async fn list_movies(State(state): State<AppState>) -> Result<Response, ApiError> {
    let movies = state.movies.list().await?;
    json_response(StatusCode::OK, &movies)
}

pub async fn filter_movies(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let mut genres = params.iter().filter(|(k, _)| k == "genre").map(|(_, v)| v);
    let genre = match (genres.next(), genres.next()) {
        (Some(genre), None) if !genre.is_empty() => genre,
        (Some(_), Some(_)) => {
            return Err(ApiError::InvalidInput(
                "Genre query parameter must be given once".to_string(),
            ))
        }
        _ => {
            return Err(ApiError::InvalidInput(
                "Genre query parameter is required".to_string(),
            ))
        }
    };

    let movies = state.movies.filter_by_genre(genre).await?;
    if movies.is_empty() {
        return Err(ApiError::NotFound(
            "No movies found for the specified genre".to_string(),
        ));
    }

    json_response(StatusCode::OK, &movies)
}

pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let position = parse_position(&id).ok_or_else(ApiError::movie_not_found)?;
    let movie = state
        .movies
        .get(position)
        .await?
        .ok_or_else(ApiError::movie_not_found)?;

    json_response(StatusCode::OK, &movie)
}

pub async fn create_movie(
    State(state): State<AppState>,
    body: Result<Json<MovieInput>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(input) = body?;
    let movie = input.into_movie()?;
    let created = state.movies.create(movie).await?;

    json_response(StatusCode::CREATED, &created)
}

pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<MovieInput>, JsonRejection>,
) -> Result<Response, ApiError> {
    // Bounds are checked before the body, so an unknown position wins over a
    // bad payload.
    let position = parse_position(&id).ok_or_else(ApiError::movie_not_found)?;
    if position >= state.movies.len().await? {
        return Err(ApiError::movie_not_found());
    }

    let Json(input) = body?;
    let movie = input.into_movie()?;

    // The collection may have shrunk since the check above; update re-checks
    // under the write lock.
    let updated = state
        .movies
        .update(position, movie)
        .await?
        .ok_or_else(ApiError::movie_not_found)?;

    json_response(StatusCode::OK, &updated)
}

pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let position = parse_position(&id).ok_or_else(ApiError::movie_not_found)?;
    state
        .movies
        .delete(position)
        .await?
        .ok_or_else(ApiError::movie_not_found)?;

    json_response(
        StatusCode::OK,
        &MessageResponse::new("Movie deleted successfully"),
    )
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub movies: usize,
}

/// Liveness check that also reports the current collection size. A failing
/// repository shows up here as a 500.
pub async fn health_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let health = HealthResponse {
        status: "healthy",
        movies: state.movies.len().await?,
    };
    let mut resp = json_response(StatusCode::OK, &health)?;
    resp.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-cache, no-store"),
    );
    Ok(resp)
}
