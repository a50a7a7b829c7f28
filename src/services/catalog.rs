use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use super::{require_film, require_user, LookupResolver};
use crate::{
    db::Store,
    error::{AppError, AppResult},
    models::{
        Film, FilmId, FilmRow, FilmUpdate, GenreId, NewFilm, NewUser, User, UserId, UserUpdate,
    },
};

/// Users and films: validation, full-record writes and film hydration
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn Store>,
    lookup: LookupResolver,
}

impl Catalog {
    pub fn new(store: Arc<dyn Store>, lookup: LookupResolver) -> Self {
        Self { store, lookup }
    }

    #[instrument(skip(self, new_user), fields(login = %new_user.login))]
    pub async fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        new_user.validate(Utc::now().date_naive())?;
        let user = self.store.insert_user(&new_user).await?;
        info!(user_id = user.id, "User created");
        Ok(user)
    }

    #[instrument(skip(self, update), fields(user_id = update.id))]
    pub async fn update_user(&self, update: UserUpdate) -> AppResult<User> {
        update.fields.validate(Utc::now().date_naive())?;
        require_user(self.store.as_ref(), update.id).await?;

        let user = update.fields.into_user(update.id);
        if !self.store.update_user(&user).await? {
            return Err(AppError::storage(format!(
                "update of user {} affected no rows",
                user.id
            )));
        }
        info!("User updated");
        Ok(user)
    }

    pub async fn get_user(&self, id: UserId) -> AppResult<User> {
        require_user(self.store.as_ref(), id).await
    }

    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.store.list_users().await
    }

    /// Creates the film with its genres in a single store write once every reference
    /// has been resolved.
    #[instrument(skip(self, new_film), fields(name = %new_film.name))]
    pub async fn create_film(&self, new_film: NewFilm) -> AppResult<Film> {
        new_film.validate()?;
        let genre_ids = self.resolve_references(&new_film).await?;

        let id = self.store.insert_film(&new_film, &genre_ids).await?;
        info!(film_id = id, genres = genre_ids.len(), "Film created");
        self.get_film(id).await
    }

    /// Replaces the film's fields and genre set. Likes are kept.
    #[instrument(skip(self, update), fields(film_id = update.id))]
    pub async fn update_film(&self, update: FilmUpdate) -> AppResult<Film> {
        update.fields.validate()?;
        require_film(self.store.as_ref(), update.id).await?;
        let genre_ids = self.resolve_references(&update.fields).await?;

        let row = update.fields.to_row(update.id);
        if !self.store.update_film(&row, &genre_ids).await? {
            return Err(AppError::storage(format!(
                "update of film {} affected no rows",
                row.id
            )));
        }
        info!("Film updated");
        self.get_film(row.id).await
    }

    pub async fn get_film(&self, id: FilmId) -> AppResult<Film> {
        let row = require_film(self.store.as_ref(), id).await?;
        hydrate_films(self.store.as_ref(), vec![row])
            .await?
            .pop()
            .ok_or_else(|| AppError::Internal(format!("film {} vanished during hydration", id)))
    }

    pub async fn list_films(&self) -> AppResult<Vec<Film>> {
        let rows = self.store.list_films().await?;
        hydrate_films(self.store.as_ref(), rows).await
    }

    async fn resolve_references(&self, film: &NewFilm) -> AppResult<Vec<GenreId>> {
        self.lookup.resolve_mpa(film.mpa.id).await?;
        let genres = self.lookup.resolve_genres(&film.genre_ids()).await?;
        Ok(genres.into_iter().map(|genre| genre.id).collect())
    }
}

/// Attaches MPA rating, genres and likes to film rows, preserving their order.
///
/// Uses one batch lookup per relationship regardless of how many films are passed.
pub(crate) async fn hydrate_films(store: &dyn Store, rows: Vec<FilmRow>) -> AppResult<Vec<Film>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<FilmId> = rows.iter().map(|row| row.id).collect();
    let mut likes = store.likes_by_film_ids(&ids).await?;
    let mut genres = store.genres_by_film_ids(&ids).await?;
    let ratings: HashMap<_, _> = store
        .list_mpa()
        .await?
        .into_iter()
        .map(|mpa| (mpa.id, mpa))
        .collect();
    debug!(films = rows.len(), "Hydrating films");

    rows.into_iter()
        .map(|row| -> AppResult<Film> {
            let mpa = ratings.get(&row.mpa_id).cloned().ok_or_else(|| {
                AppError::Internal(format!(
                    "film {} references missing MPA rating {}",
                    row.id, row.mpa_id
                ))
            })?;
            Ok(Film {
                id: row.id,
                likes: likes.remove(&row.id).unwrap_or_default(),
                genres: genres.remove(&row.id).unwrap_or_default(),
                name: row.name,
                description: row.description,
                release_date: row.release_date,
                duration: row.duration,
                mpa,
            })
        })
        .collect()
}
