use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{films, health, reference, users, AppState};
use crate::middleware::{make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(user_routes())
        .merge(film_routes())
        .merge(reference_routes())
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(users::list_users)
                .post(users::create_user)
                .put(users::update_user),
        )
        .route("/users/:id", get(users::get_user))
        .route("/users/:id/friends", get(users::list_friends))
        .route(
            "/users/:id/friends/:friend_id",
            put(users::add_friend).delete(users::remove_friend),
        )
        .route(
            "/users/:id/friends/common/:other_id",
            get(users::common_friends),
        )
}

fn film_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/films",
            get(films::list_films)
                .post(films::create_film)
                .put(films::update_film),
        )
        .route("/films/popular", get(films::popular_films))
        .route("/films/:id", get(films::get_film))
        .route(
            "/films/:id/like/:user_id",
            put(films::add_like).delete(films::remove_like),
        )
        .route("/films/:id/genres", post(films::tag_genres))
}

fn reference_routes() -> Router<AppState> {
    Router::new()
        .route("/genres", get(reference::list_genres))
        .route("/genres/:id", get(reference::get_genre))
        .route("/mpa", get(reference::list_mpa))
        .route("/mpa/:id", get(reference::get_mpa))
}
