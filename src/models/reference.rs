use serde::{Deserialize, Serialize};

pub type GenreId = i32;
pub type MpaId = i32;

/// Film genre reference row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// MPA film rating reference row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MpaRating {
    pub id: MpaId,
    pub name: String,
}

impl Genre {
    pub fn new(id: GenreId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl MpaRating {
    pub fn new(id: MpaId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Genres seeded into a fresh store. Mirrors `migrations/0002_seed_reference.sql`.
pub fn default_genres() -> Vec<Genre> {
    ["Comedy", "Drama", "Animation", "Thriller", "Documentary", "Action"]
        .into_iter()
        .zip(1..)
        .map(|(name, id)| Genre::new(id, name))
        .collect()
}

/// MPA ratings seeded into a fresh store. Mirrors `migrations/0002_seed_reference.sql`.
pub fn default_mpa_ratings() -> Vec<MpaRating> {
    ["G", "PG", "PG-13", "R", "NC-17"]
        .into_iter()
        .zip(1..)
        .map(|(name, id)| MpaRating::new(id, name))
        .collect()
}
