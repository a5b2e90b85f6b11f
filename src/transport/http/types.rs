use crate::app::Services;
use crate::domain::model::{FilmDraft, FilmId, UserDraft, UserId};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// `count` used by `/films/popular` when the caller omits it.
    pub popular_default_count: usize,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Reference to a catalog entry by id (`{"id": 1}`); any other field is ignored.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, ToSchema)]
pub struct IdRef {
    pub id: i32,
}

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilmRequest {
    /// Required for updates, ignored on create.
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub id: Option<FilmId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub release_date: NaiveDate,
    pub duration: i32,
    pub mpa: IdRef,
    #[serde(default)]
    pub genres: Vec<IdRef>,
}

impl FilmRequest {
    pub fn into_draft(self) -> FilmDraft {
        FilmDraft {
            name: self.name,
            description: self.description,
            release_date: self.release_date,
            duration: self.duration,
            rating_id: self.mpa.id,
            genre_ids: self.genres.iter().map(|g| g.id).collect(),
        }
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct UserRequest {
    /// Required for updates, ignored on create.
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub id: Option<UserId>,
    pub email: String,
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    pub birthday: NaiveDate,
}

impl UserRequest {
    pub fn into_draft(self) -> UserDraft {
        UserDraft {
            email: self.email,
            login: self.login,
            name: self.name,
            birthday: self.birthday,
        }
    }
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PopularQuery {
    /// Maximum number of films to return.
    pub count: Option<usize>,
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(format!("Invalid JSON body: {} (expected: {})", err, expected)),
        }),
    )
}
