use crate::domain::model::UserId;
use crate::transport::http::handlers::common::{error_response, path_400, respond, respond_empty};
use crate::transport::http::types::{json_422, ApiResponse, AppState, UserRequest};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

const USER_SHAPE: &str = "{\"email\", \"login\", \"name\", \"birthday\"}";

#[utoipa::path(
    get,
    path = "/users",
    responses((status = 200, description = "All users", body = ApiResponse))
)]
pub async fn list_users_handler(State(state): State<AppState>) -> Response {
    respond(state.services.users.get_all_users().await)
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = UserRequest,
    responses(
        (status = 200, description = "User created", body = ApiResponse),
        (status = 400, description = "Business rule violated", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn create_user_handler(
    State(state): State<AppState>,
    request: Result<Json<UserRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, USER_SHAPE).into_response(),
    };
    respond(state.services.users.create_user(request.into_draft()).await)
}

#[utoipa::path(
    put,
    path = "/users",
    request_body = UserRequest,
    responses(
        (status = 200, description = "User replaced", body = ApiResponse),
        (status = 400, description = "Missing id or business rule violated", body = ApiResponse),
        (status = 404, description = "Unknown user", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn update_user_handler(
    State(state): State<AppState>,
    request: Result<Json<UserRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, USER_SHAPE).into_response(),
    };
    let Some(id) = request.id else {
        return error_response(StatusCode::BAD_REQUEST, "User id is required for update");
    };
    respond(state.services.users.update_user(id, request.into_draft()).await)
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = ApiResponse),
        (status = 404, description = "Unknown user", body = ApiResponse)
    )
)]
pub async fn get_user_handler(
    State(state): State<AppState>,
    path: Result<Path<UserId>, PathRejection>,
) -> Response {
    let Path(id) = match path {
        Ok(v) => v,
        Err(e) => return path_400(e),
    };
    respond(state.services.users.get_user_by_id(id).await)
}

#[utoipa::path(
    put,
    path = "/users/{id}/friends/{friend_id}",
    params(
        ("id" = i64, Path, description = "User id"),
        ("friend_id" = i64, Path, description = "User being added")
    ),
    responses(
        (status = 200, description = "Friend added (idempotent, one direction only)", body = ApiResponse),
        (status = 404, description = "Unknown user", body = ApiResponse)
    )
)]
pub async fn add_friend_handler(
    State(state): State<AppState>,
    path: Result<Path<(UserId, UserId)>, PathRejection>,
) -> Response {
    let Path((id, friend_id)) = match path {
        Ok(v) => v,
        Err(e) => return path_400(e),
    };
    respond_empty(state.services.friends.add_friend(id, friend_id).await)
}

#[utoipa::path(
    delete,
    path = "/users/{id}/friends/{friend_id}",
    params(
        ("id" = i64, Path, description = "User id"),
        ("friend_id" = i64, Path, description = "User being removed")
    ),
    responses(
        (status = 200, description = "Friend removed (no-op when absent)", body = ApiResponse),
        (status = 404, description = "Unknown user", body = ApiResponse)
    )
)]
pub async fn remove_friend_handler(
    State(state): State<AppState>,
    path: Result<Path<(UserId, UserId)>, PathRejection>,
) -> Response {
    let Path((id, friend_id)) = match path {
        Ok(v) => v,
        Err(e) => return path_400(e),
    };
    respond_empty(state.services.friends.remove_friend(id, friend_id).await)
}

#[utoipa::path(
    get,
    path = "/users/{id}/friends",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Users this user has added", body = ApiResponse),
        (status = 404, description = "Unknown user", body = ApiResponse)
    )
)]
pub async fn friends_handler(
    State(state): State<AppState>,
    path: Result<Path<UserId>, PathRejection>,
) -> Response {
    let Path(id) = match path {
        Ok(v) => v,
        Err(e) => return path_400(e),
    };
    respond(state.services.social.get_friends(id).await)
}

#[utoipa::path(
    get,
    path = "/users/{id}/friends/common/{other_id}",
    params(
        ("id" = i64, Path, description = "User id"),
        ("other_id" = i64, Path, description = "Other user id")
    ),
    responses(
        (status = 200, description = "Users both have added", body = ApiResponse),
        (status = 404, description = "Unknown user", body = ApiResponse)
    )
)]
pub async fn common_friends_handler(
    State(state): State<AppState>,
    path: Result<Path<(UserId, UserId)>, PathRejection>,
) -> Response {
    let Path((id, other_id)) = match path {
        Ok(v) => v,
        Err(e) => return path_400(e),
    };
    respond(state.services.social.get_common_friends(id, other_id).await)
}
