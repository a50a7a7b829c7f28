use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::{require_film, require_user, LookupResolver};
use crate::{
    db::Store,
    error::{AppError, AppResult},
    models::{FilmId, Genre, GenreId, UserId},
};

/// Adds and removes friend, like and genre edges while enforcing their invariants
#[derive(Clone)]
pub struct RelationshipManager {
    store: Arc<dyn Store>,
    lookup: LookupResolver,
}

impl RelationshipManager {
    pub fn new(store: Arc<dyn Store>, lookup: LookupResolver) -> Self {
        Self { store, lookup }
    }

    #[instrument(skip(self))]
    pub async fn add_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<()> {
        require_film(self.store.as_ref(), film_id).await?;
        require_user(self.store.as_ref(), user_id).await?;

        if !self.store.insert_like(film_id, user_id).await? {
            return Err(AppError::conflict(format!(
                "User {} already likes film {}",
                user_id, film_id
            )));
        }
        info!("Like added");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn remove_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<()> {
        require_film(self.store.as_ref(), film_id).await?;
        require_user(self.store.as_ref(), user_id).await?;

        if !self.store.delete_like(film_id, user_id).await? {
            return Err(AppError::not_found(format!(
                "Like from user {} not found for film {}",
                user_id, film_id
            )));
        }
        info!("Like removed");
        Ok(())
    }

    /// Adds the `user_id -> friend_id` edge only. The reverse direction is never implied.
    #[instrument(skip(self))]
    pub async fn add_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<()> {
        if user_id == friend_id {
            return Err(AppError::invalid(format!(
                "User {} cannot befriend themselves",
                user_id
            )));
        }
        require_user(self.store.as_ref(), user_id).await?;
        require_user(self.store.as_ref(), friend_id).await?;

        if !self.store.insert_friend(user_id, friend_id).await? {
            return Err(AppError::conflict(format!(
                "User {} already has user {} as a friend",
                user_id, friend_id
            )));
        }
        info!("Friend added");
        Ok(())
    }

    /// Removes the `user_id -> friend_id` edge if present; a missing edge is not an error.
    #[instrument(skip(self))]
    pub async fn remove_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<()> {
        require_user(self.store.as_ref(), user_id).await?;
        require_user(self.store.as_ref(), friend_id).await?;

        if self.store.delete_friend(user_id, friend_id).await? {
            info!("Friend removed");
        } else {
            debug!("No friend edge to remove");
        }
        Ok(())
    }

    /// Attaches genres to a film and returns the film's resulting genre list.
    ///
    /// Every id is resolved before anything is written, and the associations are added in
    /// one store call, so an unknown id leaves the film's genres untouched.
    #[instrument(skip(self))]
    pub async fn tag_film_genres(
        &self,
        film_id: FilmId,
        genre_ids: &[GenreId],
    ) -> AppResult<Vec<Genre>> {
        require_film(self.store.as_ref(), film_id).await?;
        let genres = self.lookup.resolve_genres(genre_ids).await?;
        let ids: Vec<GenreId> = genres.iter().map(|genre| genre.id).collect();

        let added = self.store.insert_film_genres(film_id, &ids).await?;
        info!(requested = ids.len(), added, "Film genres tagged");

        Ok(self
            .store
            .genres_by_film_ids(&[film_id])
            .await?
            .remove(&film_id)
            .unwrap_or_default())
    }
}
