use axum::{extract::State, http::StatusCode, Json};

use super::{
    extract::{AppJson, AppPath},
    AppState,
};
use crate::{
    error::AppResult,
    models::{NewUser, User, UserId, UserUpdate},
};

pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.services.catalog.list_users().await?))
}

pub async fn create_user(
    State(state): State<AppState>,
    AppJson(request): AppJson<NewUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state.services.catalog.create_user(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    AppJson(request): AppJson<UserUpdate>,
) -> AppResult<Json<User>> {
    Ok(Json(state.services.catalog.update_user(request).await?))
}

pub async fn get_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<UserId>,
) -> AppResult<Json<User>> {
    Ok(Json(state.services.catalog.get_user(id).await?))
}

pub async fn add_friend(
    State(state): State<AppState>,
    AppPath((id, friend_id)): AppPath<(UserId, UserId)>,
) -> AppResult<StatusCode> {
    let relationships = &state.services.relationships;
    relationships.add_friend(id, friend_id).await?;
    Ok(StatusCode::OK)
}

pub async fn remove_friend(
    State(state): State<AppState>,
    AppPath((id, friend_id)): AppPath<(UserId, UserId)>,
) -> AppResult<StatusCode> {
    let relationships = &state.services.relationships;
    relationships.remove_friend(id, friend_id).await?;
    Ok(StatusCode::OK)
}

pub async fn list_friends(
    State(state): State<AppState>,
    AppPath(id): AppPath<UserId>,
) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.services.social.friends(id).await?))
}

pub async fn common_friends(
    State(state): State<AppState>,
    AppPath((id, other_id)): AppPath<(UserId, UserId)>,
) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.services.social.common_friends(id, other_id).await?))
}
