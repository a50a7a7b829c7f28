use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use super::{
    extract::{AppJson, AppPath, AppQuery},
    AppState,
};
use crate::{
    error::AppResult,
    models::{Film, FilmId, FilmUpdate, Genre, GenreId, IdRef, NewFilm, UserId},
};

#[derive(Debug, Deserialize)]
pub struct PopularQuery {
    /// Missing or non-positive means the configured default
    #[serde(default)]
    count: i64,
}

#[derive(Debug, Deserialize)]
pub struct TagGenresRequest {
    genres: Vec<IdRef>,
}

pub async fn list_films(State(state): State<AppState>) -> AppResult<Json<Vec<Film>>> {
    Ok(Json(state.services.catalog.list_films().await?))
}

pub async fn create_film(
    State(state): State<AppState>,
    AppJson(request): AppJson<NewFilm>,
) -> AppResult<(StatusCode, Json<Film>)> {
    let film = state.services.catalog.create_film(request).await?;
    Ok((StatusCode::CREATED, Json(film)))
}

pub async fn update_film(
    State(state): State<AppState>,
    AppJson(request): AppJson<FilmUpdate>,
) -> AppResult<Json<Film>> {
    Ok(Json(state.services.catalog.update_film(request).await?))
}

pub async fn get_film(
    State(state): State<AppState>,
    AppPath(id): AppPath<FilmId>,
) -> AppResult<Json<Film>> {
    Ok(Json(state.services.catalog.get_film(id).await?))
}

pub async fn popular_films(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PopularQuery>,
) -> AppResult<Json<Vec<Film>>> {
    Ok(Json(state.services.ranking.top_films(params.count).await?))
}

pub async fn add_like(
    State(state): State<AppState>,
    AppPath((id, user_id)): AppPath<(FilmId, UserId)>,
) -> AppResult<StatusCode> {
    state.services.relationships.add_like(id, user_id).await?;
    Ok(StatusCode::OK)
}

pub async fn remove_like(
    State(state): State<AppState>,
    AppPath((id, user_id)): AppPath<(FilmId, UserId)>,
) -> AppResult<StatusCode> {
    state.services.relationships.remove_like(id, user_id).await?;
    Ok(StatusCode::OK)
}

/// Returns the film's full genre list after tagging
pub async fn tag_genres(
    State(state): State<AppState>,
    AppPath(id): AppPath<FilmId>,
    AppJson(request): AppJson<TagGenresRequest>,
) -> AppResult<Json<Vec<Genre>>> {
    let ids: Vec<GenreId> = request.genres.iter().map(|genre| genre.id).collect();
    let relationships = &state.services.relationships;
    Ok(Json(relationships.tag_film_genres(id, &ids).await?))
}
