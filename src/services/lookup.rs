use std::sync::Arc;

use serde::Deserialize;
use tracing::instrument;

use crate::{
    db::Store,
    error::{AppError, AppResult},
    models::{dedup_ids, Genre, GenreId, MpaId, MpaRating},
};

/// How a reference id is judged to exist
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LookupPolicy {
    /// The row must be present.
    #[default]
    Exact,
    /// Legacy rule: ids are valid when within `1..=count(table)`. The row is still
    /// fetched afterwards, so a gap in the id sequence is reported as not found too.
    IdRange,
}

/// Validates genre and MPA references before they are attached to a film.
///
/// Stores do not enforce foreign keys in every backend, so this is the integrity check
/// every write of a film reference goes through.
#[derive(Clone)]
pub struct LookupResolver {
    store: Arc<dyn Store>,
    policy: LookupPolicy,
}

impl LookupResolver {
    pub fn new(store: Arc<dyn Store>, policy: LookupPolicy) -> Self {
        Self { store, policy }
    }

    #[instrument(skip(self))]
    pub async fn resolve_genre(&self, id: GenreId) -> AppResult<Genre> {
        if self.policy == LookupPolicy::IdRange && !in_range(id, self.store.count_genres().await?)
        {
            return Err(genre_not_found(id));
        }
        self.store
            .find_genre(id)
            .await?
            .ok_or_else(|| genre_not_found(id))
    }

    #[instrument(skip(self))]
    pub async fn resolve_mpa(&self, id: MpaId) -> AppResult<MpaRating> {
        if self.policy == LookupPolicy::IdRange && !in_range(id, self.store.count_mpa().await?) {
            return Err(mpa_not_found(id));
        }
        self.store
            .find_mpa(id)
            .await?
            .ok_or_else(|| mpa_not_found(id))
    }

    /// Resolves every id after dropping duplicates, failing on the first unknown one.
    /// Nothing is written here, so a failure leaves no partial state behind.
    pub async fn resolve_genres(&self, ids: &[GenreId]) -> AppResult<Vec<Genre>> {
        let mut genres = Vec::new();
        for id in dedup_ids(ids.iter().copied()) {
            genres.push(self.resolve_genre(id).await?);
        }
        Ok(genres)
    }

    pub async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.store.list_genres().await
    }

    pub async fn list_mpa_ratings(&self) -> AppResult<Vec<MpaRating>> {
        self.store.list_mpa().await
    }
}

fn in_range(id: i32, count: u64) -> bool {
    id >= 1 && (id as u64) <= count
}

fn genre_not_found(id: GenreId) -> AppError {
    AppError::not_found(format!("Genre with id={} not found", id))
}

fn mpa_not_found(id: MpaId) -> AppError {
    AppError::not_found(format!("MPA rating with id={} not found", id))
}
