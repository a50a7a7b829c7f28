use std::collections::{BTreeSet, HashMap};

use crate::error::AppResult;
use crate::models::{
    FilmId, FilmRow, Genre, GenreId, MpaId, MpaRating, NewFilm, NewUser, User, UserId,
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::{create_pool, PgStore};

/// Persistence contract for users, films, reference tables and the friend/like edge sets.
///
/// Implementations only store what they are given: foreign references are checked by
/// the service layer before any write reaches the store. Edge inserts report `false`
/// rather than failing when the edge already exists, so the caller decides whether
/// that is a conflict.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    /// Inserts a user, assigning its id. A blank name is stored as the login.
    async fn insert_user(&self, user: &NewUser) -> AppResult<User>;

    /// Replaces every field of an existing user. Returns false if no row matched.
    async fn update_user(&self, user: &User) -> AppResult<bool>;

    async fn find_user(&self, id: UserId) -> AppResult<Option<User>>;

    /// All users, ordered by id.
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Users among `ids` that exist, ordered by id.
    async fn find_users(&self, ids: &[UserId]) -> AppResult<Vec<User>>;

    async fn insert_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<bool>;

    async fn delete_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<bool>;

    /// Targets of the user's outgoing friend edges.
    async fn friend_ids(&self, user_id: UserId) -> AppResult<BTreeSet<UserId>>;

    /// Inserts the film row and its genre associations as one atomic write.
    async fn insert_film(&self, film: &NewFilm, genre_ids: &[GenreId]) -> AppResult<FilmId>;

    /// Replaces the film row and its whole genre set atomically, keeping likes.
    /// Returns false if no row matched.
    async fn update_film(&self, film: &FilmRow, genre_ids: &[GenreId]) -> AppResult<bool>;

    async fn find_film(&self, id: FilmId) -> AppResult<Option<FilmRow>>;

    /// All film rows, ordered by id.
    async fn list_films(&self) -> AppResult<Vec<FilmRow>>;

    async fn count_films(&self) -> AppResult<u64>;

    async fn insert_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<bool>;

    async fn delete_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<bool>;

    /// Like edges for a batch of films. Films without likes may be absent from the map.
    async fn likes_by_film_ids(
        &self,
        film_ids: &[FilmId],
    ) -> AppResult<HashMap<FilmId, BTreeSet<UserId>>>;

    /// Genres for a batch of films, each list ordered by genre id.
    async fn genres_by_film_ids(&self, film_ids: &[FilmId])
        -> AppResult<HashMap<FilmId, Vec<Genre>>>;

    /// Adds genre associations atomically, skipping ones already present.
    /// Returns how many were new.
    async fn insert_film_genres(&self, film_id: FilmId, genre_ids: &[GenreId]) -> AppResult<u64>;

    async fn find_genre(&self, id: GenreId) -> AppResult<Option<Genre>>;

    async fn list_genres(&self) -> AppResult<Vec<Genre>>;

    async fn count_genres(&self) -> AppResult<u64>;

    async fn find_mpa(&self, id: MpaId) -> AppResult<Option<MpaRating>>;

    async fn list_mpa(&self) -> AppResult<Vec<MpaRating>>;

    async fn count_mpa(&self) -> AppResult<u64>;
}
