use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};
use std::num::NonZeroUsize;
use std::sync::Arc;

use tracing::{debug, instrument};

use super::catalog::hydrate_films;
use crate::{
    db::Store,
    error::AppResult,
    models::{Film, FilmId, FilmRow, UserId},
};

/// Orders films by popularity
#[derive(Clone)]
pub struct RankingEngine {
    store: Arc<dyn Store>,
    default_count: NonZeroUsize,
}

impl RankingEngine {
    pub fn new(store: Arc<dyn Store>, default_count: NonZeroUsize) -> Self {
        Self {
            store,
            default_count,
        }
    }

    /// The `count` most liked films, most likes first, equal counts by ascending id.
    ///
    /// A non-positive `count` falls back to the configured default.
    #[instrument(skip(self))]
    pub async fn top_films(&self, count: i64) -> AppResult<Vec<Film>> {
        let limit = self.effective_count(count);
        if self.store.count_films().await? == 0 {
            return Ok(Vec::new());
        }

        let rows = self.store.list_films().await?;
        let ids: Vec<FilmId> = rows.iter().map(|row| row.id).collect();
        let likes = self.store.likes_by_film_ids(&ids).await?;

        let top = rank_by_likes(rows, &likes, limit);
        debug!(limit, returned = top.len(), "Ranked films");
        hydrate_films(self.store.as_ref(), top).await
    }

    fn effective_count(&self, count: i64) -> usize {
        if count <= 0 {
            self.default_count.get()
        } else {
            usize::try_from(count).unwrap_or(usize::MAX)
        }
    }
}

fn rank_by_likes(
    mut rows: Vec<FilmRow>,
    likes: &HashMap<FilmId, BTreeSet<UserId>>,
    limit: usize,
) -> Vec<FilmRow> {
    let like_count = |id: &FilmId| likes.get(id).map_or(0, BTreeSet::len);
    rows.sort_by_key(|row| (Reverse(like_count(&row.id)), row.id));
    rows.truncate(limit);
    rows
}
