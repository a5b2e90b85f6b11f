use crate::domain::model::{FilmId, UserId};
use crate::transport::http::handlers::common::{error_response, path_400, respond, respond_empty};
use crate::transport::http::types::{json_422, ApiResponse, AppState, FilmRequest, PopularQuery};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

const FILM_SHAPE: &str =
    "{\"name\", \"description\", \"releaseDate\", \"duration\", \"mpa\": {\"id\"}, \"genres\": [{\"id\"}]}";

#[utoipa::path(
    get,
    path = "/films",
    responses((status = 200, description = "All films", body = ApiResponse))
)]
pub async fn list_films_handler(State(state): State<AppState>) -> Response {
    respond(state.services.films.get_all_films().await)
}

#[utoipa::path(
    post,
    path = "/films",
    request_body = FilmRequest,
    responses(
        (status = 200, description = "Film created", body = ApiResponse),
        (status = 400, description = "Business rule violated", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn create_film_handler(
    State(state): State<AppState>,
    request: Result<Json<FilmRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, FILM_SHAPE).into_response(),
    };
    respond(state.services.films.add_film(request.into_draft()).await)
}

#[utoipa::path(
    put,
    path = "/films",
    request_body = FilmRequest,
    responses(
        (status = 200, description = "Film replaced", body = ApiResponse),
        (status = 400, description = "Missing id or business rule violated", body = ApiResponse),
        (status = 404, description = "Unknown film", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn update_film_handler(
    State(state): State<AppState>,
    request: Result<Json<FilmRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, FILM_SHAPE).into_response(),
    };
    let Some(id) = request.id else {
        return error_response(StatusCode::BAD_REQUEST, "Film id is required for update");
    };
    respond(state.services.films.update_film(id, request.into_draft()).await)
}

#[utoipa::path(
    get,
    path = "/films/{id}",
    params(("id" = i64, Path, description = "Film id")),
    responses(
        (status = 200, description = "Film", body = ApiResponse),
        (status = 404, description = "Unknown film", body = ApiResponse)
    )
)]
pub async fn get_film_handler(
    State(state): State<AppState>,
    path: Result<Path<FilmId>, PathRejection>,
) -> Response {
    let Path(id) = match path {
        Ok(v) => v,
        Err(e) => return path_400(e),
    };
    respond(state.services.films.get_film_by_id(id).await)
}

#[utoipa::path(
    get,
    path = "/films/popular",
    params(PopularQuery),
    responses(
        (status = 200, description = "Most liked films first", body = ApiResponse),
        (status = 400, description = "Invalid count", body = ApiResponse)
    )
)]
pub async fn popular_films_handler(
    State(state): State<AppState>,
    query: Result<Query<PopularQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(v) => v,
        Err(e) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid query: {} (count must be a non-negative integer)", e),
            )
        }
    };
    let count = query.count.unwrap_or(state.popular_default_count);
    respond(state.services.films.get_most_popular_films(count).await)
}

#[utoipa::path(
    put,
    path = "/films/{id}/like/{user_id}",
    params(
        ("id" = i64, Path, description = "Film id"),
        ("user_id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Like recorded (idempotent)", body = ApiResponse),
        (status = 404, description = "Unknown film or user", body = ApiResponse)
    )
)]
pub async fn add_like_handler(
    State(state): State<AppState>,
    path: Result<Path<(FilmId, UserId)>, PathRejection>,
) -> Response {
    let Path((id, user_id)) = match path {
        Ok(v) => v,
        Err(e) => return path_400(e),
    };
    respond_empty(state.services.likes.add_like(id, user_id).await)
}

#[utoipa::path(
    delete,
    path = "/films/{id}/like/{user_id}",
    params(
        ("id" = i64, Path, description = "Film id"),
        ("user_id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "Like removed (no-op when absent)", body = ApiResponse),
        (status = 404, description = "Unknown film or user", body = ApiResponse)
    )
)]
pub async fn remove_like_handler(
    State(state): State<AppState>,
    path: Result<Path<(FilmId, UserId)>, PathRejection>,
) -> Response {
    let Path((id, user_id)) = match path {
        Ok(v) => v,
        Err(e) => return path_400(e),
    };
    respond_empty(state.services.likes.remove_like(id, user_id).await)
}

#[utoipa::path(
    get,
    path = "/films/{id}/likes",
    params(("id" = i64, Path, description = "Film id")),
    responses(
        (status = 200, description = "Number of likes", body = ApiResponse),
        (status = 404, description = "Unknown film", body = ApiResponse)
    )
)]
pub async fn count_likes_handler(
    State(state): State<AppState>,
    path: Result<Path<FilmId>, PathRejection>,
) -> Response {
    let Path(id) = match path {
        Ok(v) => v,
        Err(e) => return path_400(e),
    };
    respond(
        state
            .services
            .likes
            .count_likes(id)
            .await
            .map(|likes| serde_json::json!({ "filmId": id, "likes": likes })),
    )
}
