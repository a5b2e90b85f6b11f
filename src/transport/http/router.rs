use crate::domain::model::{Film, Genre, Rating, User};
use crate::transport::http::handlers::{catalog, films, health, users};
use crate::transport::http::types::{ApiResponse, FilmRequest, IdRef, UserRequest};
use axum::routing::{get, put};
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        films::list_films_handler,
        films::create_film_handler,
        films::update_film_handler,
        films::get_film_handler,
        films::popular_films_handler,
        films::add_like_handler,
        films::remove_like_handler,
        films::count_likes_handler,
        users::list_users_handler,
        users::create_user_handler,
        users::update_user_handler,
        users::get_user_handler,
        users::add_friend_handler,
        users::remove_friend_handler,
        users::friends_handler,
        users::common_friends_handler,
        catalog::list_genres_handler,
        catalog::get_genre_handler,
        catalog::list_ratings_handler,
        catalog::get_rating_handler
    ),
    components(schemas(
        ApiResponse,
        FilmRequest,
        UserRequest,
        IdRef,
        Film,
        User,
        Genre,
        Rating
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/films",
            get(films::list_films_handler)
                .post(films::create_film_handler)
                .put(films::update_film_handler),
        )
        .route("/films/popular", get(films::popular_films_handler))
        .route("/films/:id", get(films::get_film_handler))
        .route("/films/:id/likes", get(films::count_likes_handler))
        .route(
            "/films/:id/like/:user_id",
            put(films::add_like_handler).delete(films::remove_like_handler),
        )
        .route(
            "/users",
            get(users::list_users_handler)
                .post(users::create_user_handler)
                .put(users::update_user_handler),
        )
        .route("/users/:id", get(users::get_user_handler))
        .route("/users/:id/friends", get(users::friends_handler))
        .route(
            "/users/:id/friends/:friend_id",
            put(users::add_friend_handler).delete(users::remove_friend_handler),
        )
        .route(
            "/users/:id/friends/common/:other_id",
            get(users::common_friends_handler),
        )
        .route("/genres", get(catalog::list_genres_handler))
        .route("/genres/:id", get(catalog::get_genre_handler))
        .route("/mpa", get(catalog::list_ratings_handler))
        .route("/mpa/:id", get(catalog::get_rating_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
