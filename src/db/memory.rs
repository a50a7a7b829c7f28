use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};

use dashmap::DashMap;

use super::Store;
use crate::error::AppResult;
use crate::models::{
    default_genres, default_mpa_ratings, FilmId, FilmRow, Genre, GenreId, MpaId, MpaRating,
    NewFilm, NewUser, User, UserId,
};

struct UserEntry {
    user: User,
    friends: BTreeSet<UserId>,
}

struct FilmEntry {
    row: FilmRow,
    genres: BTreeSet<GenreId>,
    likes: BTreeSet<UserId>,
}

/// Process-local store.
///
/// Each user and film is one `DashMap` entry that owns its outgoing edge set, so
/// every edge mutation runs under the write guard of the aggregate it belongs to
/// (the film for likes, the initiating user for friendships). Reads clone under the
/// read guard. No guard is held while another entry of the same map is touched.
///
/// The reference tables are fixed at construction and never written afterwards.
pub struct MemoryStore {
    users: DashMap<UserId, UserEntry>,
    films: DashMap<FilmId, FilmEntry>,
    genres: BTreeMap<GenreId, Genre>,
    mpa: BTreeMap<MpaId, MpaRating>,
    next_user_id: AtomicI64,
    next_film_id: AtomicI64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates an empty store seeded with the default genres and MPA ratings
    pub fn new() -> Self {
        Self::with_reference_data(default_genres(), default_mpa_ratings())
    }

    pub fn with_reference_data(genres: Vec<Genre>, mpa: Vec<MpaRating>) -> Self {
        Self {
            users: DashMap::new(),
            films: DashMap::new(),
            genres: genres.into_iter().map(|g| (g.id, g)).collect(),
            mpa: mpa.into_iter().map(|m| (m.id, m)).collect(),
            next_user_id: AtomicI64::new(1),
            next_film_id: AtomicI64::new(1),
        }
    }

    fn known_genres(&self, genre_ids: &[GenreId]) -> Vec<GenreId> {
        genre_ids
            .iter()
            .copied()
            .filter(|id| self.genres.contains_key(id))
            .collect()
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: &NewUser) -> AppResult<User> {
        let id = self.next_user_id.fetch_add(1, Ordering::SeqCst);
        let user = user.clone().into_user(id);
        self.users.insert(
            id,
            UserEntry {
                user: user.clone(),
                friends: BTreeSet::new(),
            },
        );
        Ok(user)
    }

    async fn update_user(&self, user: &User) -> AppResult<bool> {
        match self.users.get_mut(&user.id) {
            Some(mut entry) => {
                entry.user = user.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_user(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.user.clone()))
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|entry| entry.user.clone()).collect();
        users.sort_by_key(|user| user.id);
        Ok(users)
    }

    async fn find_users(&self, ids: &[UserId]) -> AppResult<Vec<User>> {
        let wanted: BTreeSet<UserId> = ids.iter().copied().collect();
        Ok(wanted
            .into_iter()
            .filter_map(|id| self.users.get(&id).map(|entry| entry.user.clone()))
            .collect())
    }

    async fn insert_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<bool> {
        Ok(self
            .users
            .get_mut(&user_id)
            .map(|mut entry| entry.friends.insert(friend_id))
            .unwrap_or(false))
    }

    async fn delete_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<bool> {
        Ok(self
            .users
            .get_mut(&user_id)
            .map(|mut entry| entry.friends.remove(&friend_id))
            .unwrap_or(false))
    }

    async fn friend_ids(&self, user_id: UserId) -> AppResult<BTreeSet<UserId>> {
        Ok(self
            .users
            .get(&user_id)
            .map(|entry| entry.friends.clone())
            .unwrap_or_default())
    }

    async fn insert_film(&self, film: &NewFilm, genre_ids: &[GenreId]) -> AppResult<FilmId> {
        let id = self.next_film_id.fetch_add(1, Ordering::SeqCst);
        let genres = self.known_genres(genre_ids).into_iter().collect();
        self.films.insert(
            id,
            FilmEntry {
                row: film.to_row(id),
                genres,
                likes: BTreeSet::new(),
            },
        );
        Ok(id)
    }

    async fn update_film(&self, film: &FilmRow, genre_ids: &[GenreId]) -> AppResult<bool> {
        let genres: BTreeSet<GenreId> = self.known_genres(genre_ids).into_iter().collect();
        match self.films.get_mut(&film.id) {
            Some(mut entry) => {
                entry.row = film.clone();
                entry.genres = genres;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_film(&self, id: FilmId) -> AppResult<Option<FilmRow>> {
        Ok(self.films.get(&id).map(|entry| entry.row.clone()))
    }

    async fn list_films(&self) -> AppResult<Vec<FilmRow>> {
        let mut films: Vec<FilmRow> = self.films.iter().map(|entry| entry.row.clone()).collect();
        films.sort_by_key(|film| film.id);
        Ok(films)
    }

    async fn count_films(&self) -> AppResult<u64> {
        Ok(self.films.len() as u64)
    }

    async fn insert_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<bool> {
        Ok(self
            .films
            .get_mut(&film_id)
            .map(|mut entry| entry.likes.insert(user_id))
            .unwrap_or(false))
    }

    async fn delete_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<bool> {
        Ok(self
            .films
            .get_mut(&film_id)
            .map(|mut entry| entry.likes.remove(&user_id))
            .unwrap_or(false))
    }

    async fn likes_by_film_ids(
        &self,
        film_ids: &[FilmId],
    ) -> AppResult<HashMap<FilmId, BTreeSet<UserId>>> {
        Ok(film_ids
            .iter()
            .filter_map(|id| {
                self.films
                    .get(id)
                    .filter(|entry| !entry.likes.is_empty())
                    .map(|entry| (*id, entry.likes.clone()))
            })
            .collect())
    }

    async fn genres_by_film_ids(
        &self,
        film_ids: &[FilmId],
    ) -> AppResult<HashMap<FilmId, Vec<Genre>>> {
        let mut result = HashMap::new();
        for id in film_ids {
            let genre_ids = match self.films.get(id) {
                Some(entry) if !entry.genres.is_empty() => entry.genres.clone(),
                _ => continue,
            };
            let genres = genre_ids
                .iter()
                .filter_map(|genre_id| self.genres.get(genre_id).cloned())
                .collect();
            result.insert(*id, genres);
        }
        Ok(result)
    }

    async fn insert_film_genres(&self, film_id: FilmId, genre_ids: &[GenreId]) -> AppResult<u64> {
        let known = self.known_genres(genre_ids);
        let Some(mut entry) = self.films.get_mut(&film_id) else {
            return Ok(0);
        };
        let added = known.into_iter().filter(|id| entry.genres.insert(*id));
        Ok(added.count() as u64)
    }

    async fn find_genre(&self, id: GenreId) -> AppResult<Option<Genre>> {
        Ok(self.genres.get(&id).cloned())
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        Ok(self.genres.values().cloned().collect())
    }

    async fn count_genres(&self) -> AppResult<u64> {
        Ok(self.genres.len() as u64)
    }

    async fn find_mpa(&self, id: MpaId) -> AppResult<Option<MpaRating>> {
        Ok(self.mpa.get(&id).cloned())
    }

    async fn list_mpa(&self) -> AppResult<Vec<MpaRating>> {
        Ok(self.mpa.values().cloned().collect())
    }

    async fn count_mpa(&self) -> AppResult<u64> {
        Ok(self.mpa.len() as u64)
    }
}
