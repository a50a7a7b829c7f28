use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Genre, GenreId, MpaId, MpaRating, UserId};
use crate::error::{AppError, AppResult};

pub type FilmId = i64;

/// Maximum description length, counted in characters
pub const MAX_DESCRIPTION_LENGTH: usize = 200;

/// No film can be released before the first public screening (1895-12-28).
pub fn earliest_release_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1895, 12, 28).unwrap_or(NaiveDate::MIN)
}

/// A film with its references resolved, as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    pub id: FilmId,
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: i32,
    pub mpa: MpaRating,
    pub genres: Vec<Genre>,
    /// Users who liked the film
    pub likes: BTreeSet<UserId>,
}

impl Film {
    /// Popularity is the number of like edges, never a stored counter.
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }
}

/// Film columns as persisted, without the relationship sets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilmRow {
    pub id: FilmId,
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: i32,
    pub mpa_id: MpaId,
}

/// Reference to an existing row by id, as sent by clients (`{"id": 3}`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdRef {
    pub id: i32,
}

/// Film fields supplied on create, and on full-record update
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewFilm {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: i32,
    pub mpa: IdRef,
    #[serde(default)]
    pub genres: Vec<IdRef>,
}

/// Full replacement of an existing film
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilmUpdate {
    pub id: FilmId,
    #[serde(flatten)]
    pub fields: NewFilm,
}

impl NewFilm {
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::invalid("film name must not be blank"));
        }
        let length = self.description.chars().count();
        if length > MAX_DESCRIPTION_LENGTH {
            return Err(AppError::invalid(format!(
                "description is {} characters long (max {})",
                length, MAX_DESCRIPTION_LENGTH
            )));
        }
        if self.release_date < earliest_release_date() {
            return Err(AppError::invalid(format!(
                "release date must not be earlier than {}",
                earliest_release_date()
            )));
        }
        if self.duration <= 0 {
            return Err(AppError::invalid("duration must be positive"));
        }
        Ok(())
    }

    /// Requested genre ids, duplicates dropped, first occurrence order kept.
    pub fn genre_ids(&self) -> Vec<GenreId> {
        dedup_ids(self.genres.iter().map(|genre| genre.id))
    }

    pub fn to_row(&self, id: FilmId) -> FilmRow {
        FilmRow {
            id,
            name: self.name.clone(),
            description: self.description.clone(),
            release_date: self.release_date,
            duration: self.duration,
            mpa_id: self.mpa.id,
        }
    }
}

/// Drops repeated ids while keeping the order they were first seen in.
pub fn dedup_ids<I>(ids: I) -> Vec<GenreId>
where
    I: IntoIterator<Item = GenreId>,
{
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_film() -> NewFilm {
        NewFilm {
            name: "nisi eiusmod".to_string(),
            description: "adipisicing".to_string(),
            release_date: NaiveDate::from_ymd_opt(1967, 3, 25).unwrap(),
            duration: 100,
            mpa: IdRef { id: 1 },
            genres: vec![],
        }
    }

    #[test]
    fn test_valid_film_passes() {
        assert!(new_film().validate().is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut film = new_film();
        film.name = "  ".to_string();
        assert!(matches!(film.validate(), Err(AppError::InvalidArgument(_))));
    }

    #[test]
    fn test_description_limit_counts_characters() {
        let mut film = new_film();
        film.description = "ж".repeat(MAX_DESCRIPTION_LENGTH);
        assert!(film.validate().is_ok());
        film.description.push('ж');
        assert!(film.validate().is_err());
    }

    #[test]
    fn test_release_date_floor() {
        let mut film = new_film();
        film.release_date = earliest_release_date();
        assert!(film.validate().is_ok());
        film.release_date = NaiveDate::from_ymd_opt(1895, 12, 27).unwrap();
        assert!(film.validate().is_err());
    }

    #[test]
    fn test_non_positive_duration_rejected() {
        let mut film = new_film();
        film.duration = 0;
        assert!(film.validate().is_err());
        film.duration = -200;
        assert!(film.validate().is_err());
    }

    #[test]
    fn test_genre_ids_deduplicated_in_order() {
        let mut film = new_film();
        film.genres = [3, 1, 3, 2, 1].into_iter().map(|id| IdRef { id }).collect();
        assert_eq!(film.genre_ids(), vec![3, 1, 2]);
    }

    #[test]
    fn test_deserialize_camel_case_request() {
        let json = r#"{
            "name": "Film",
            "releaseDate": "2000-01-01",
            "duration": 90,
            "mpa": {"id": 2},
            "genres": [{"id": 1}]
        }"#;
        let film: NewFilm = serde_json::from_str(json).unwrap();
        assert_eq!(film.description, "");
        assert_eq!(film.mpa.id, 2);
        assert_eq!(film.genre_ids(), vec![1]);
    }

    #[test]
    fn test_serialize_film_shape() {
        let film = Film {
            id: 1,
            name: "Film".to_string(),
            description: String::new(),
            release_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            duration: 90,
            mpa: MpaRating::new(1, "G"),
            genres: vec![],
            likes: BTreeSet::from([2, 5]),
        };
        let json = serde_json::to_value(&film).unwrap();
        assert_eq!(json["releaseDate"], "2000-01-01");
        assert_eq!(json["mpa"]["name"], "G");
        assert_eq!(json["likes"], serde_json::json!([2, 5]));
        assert_eq!(film.like_count(), 2);
    }
}
