use axum::{extract::State, Json};

use super::{extract::AppPath, AppState};
use crate::{
    error::AppResult,
    models::{Genre, GenreId, MpaId, MpaRating},
};

pub async fn list_genres(State(state): State<AppState>) -> AppResult<Json<Vec<Genre>>> {
    Ok(Json(state.services.lookup.list_genres().await?))
}

pub async fn get_genre(
    State(state): State<AppState>,
    AppPath(id): AppPath<GenreId>,
) -> AppResult<Json<Genre>> {
    Ok(Json(state.services.lookup.resolve_genre(id).await?))
}

pub async fn list_mpa(State(state): State<AppState>) -> AppResult<Json<Vec<MpaRating>>> {
    Ok(Json(state.services.lookup.list_mpa_ratings().await?))
}

pub async fn get_mpa(
    State(state): State<AppState>,
    AppPath(id): AppPath<MpaId>,
) -> AppResult<Json<MpaRating>> {
    Ok(Json(state.services.lookup.resolve_mpa(id).await?))
}
