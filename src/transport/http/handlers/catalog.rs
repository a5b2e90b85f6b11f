use crate::domain::model::{GenreId, RatingId};
use crate::transport::http::handlers::common::{path_400, respond};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::Response;

#[utoipa::path(
    get,
    path = "/genres",
    responses((status = 200, description = "Genre vocabulary", body = ApiResponse))
)]
pub async fn list_genres_handler(State(state): State<AppState>) -> Response {
    respond(state.services.catalog.get_all_genres().await)
}

#[utoipa::path(
    get,
    path = "/genres/{id}",
    params(("id" = i32, Path, description = "Genre id")),
    responses(
        (status = 200, description = "Genre", body = ApiResponse),
        (status = 404, description = "Unknown genre", body = ApiResponse)
    )
)]
pub async fn get_genre_handler(
    State(state): State<AppState>,
    path: Result<Path<GenreId>, PathRejection>,
) -> Response {
    let Path(id) = match path {
        Ok(v) => v,
        Err(e) => return path_400(e),
    };
    respond(state.services.catalog.get_genre_by_id(id).await)
}

#[utoipa::path(
    get,
    path = "/mpa",
    responses((status = 200, description = "Rating vocabulary", body = ApiResponse))
)]
pub async fn list_ratings_handler(State(state): State<AppState>) -> Response {
    respond(state.services.catalog.get_all_ratings().await)
}

#[utoipa::path(
    get,
    path = "/mpa/{id}",
    params(("id" = i32, Path, description = "Rating id")),
    responses(
        (status = 200, description = "Rating", body = ApiResponse),
        (status = 404, description = "Unknown rating", body = ApiResponse)
    )
)]
pub async fn get_rating_handler(
    State(state): State<AppState>,
    path: Result<Path<RatingId>, PathRejection>,
) -> Response {
    let Path(id) = match path {
        Ok(v) => v,
        Err(e) => return path_400(e),
    };
    respond(state.services.catalog.get_rating_by_id(id).await)
}
