//! Shared fixtures for service tests

use std::num::NonZeroUsize;
use std::ops::Deref;
use std::sync::Arc;

use chrono::NaiveDate;

use super::{ServiceConfig, Services};
use crate::db::MemoryStore;
use crate::models::{FilmId, IdRef, NewFilm, NewUser, UserId};

/// Services over a fresh in-memory store
#[derive(Clone)]
pub(crate) struct Fixture {
    services: Services,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Self::with_config(ServiceConfig::default())
    }

    pub(crate) fn with_default_top_count(default_top_count: usize) -> Self {
        Self::with_config(ServiceConfig {
            default_top_count: NonZeroUsize::new(default_top_count).unwrap(),
            ..ServiceConfig::default()
        })
    }

    fn with_config(config: ServiceConfig) -> Self {
        Self {
            services: Services::new(Arc::new(MemoryStore::new()), config),
        }
    }
}

impl Deref for Fixture {
    type Target = Services;

    fn deref(&self) -> &Services {
        &self.services
    }
}

/// Creates `count` users with logins `user0`, `user1`, ... and returns their ids in order.
pub(crate) async fn seed_users(fx: &Fixture, count: usize) -> Vec<UserId> {
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let user = fx
            .catalog
            .create_user(NewUser {
                email: format!("user{}@example.com", i),
                login: format!("user{}", i),
                name: None,
                birthday: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            })
            .await
            .unwrap();
        ids.push(user.id);
    }
    ids
}

/// Creates `count` G-rated films without genres and returns their ids in order.
pub(crate) async fn seed_films(fx: &Fixture, count: usize) -> Vec<FilmId> {
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let film = fx
            .catalog
            .create_film(NewFilm {
                name: format!("Film {}", i),
                description: String::new(),
                release_date: NaiveDate::from_ymd_opt(2001, 6, 1).unwrap(),
                duration: 95,
                mpa: IdRef { id: 1 },
                genres: Vec::new(),
            })
            .await
            .unwrap();
        ids.push(film.id);
    }
    ids
}
