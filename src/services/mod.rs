pub mod catalog;
pub mod lookup;
pub mod ranking;
pub mod relationships;
pub mod social;

#[cfg(test)]
pub(crate) mod test_support;

use std::num::NonZeroUsize;
use std::sync::Arc;

pub use catalog::Catalog;
pub use lookup::{LookupPolicy, LookupResolver};
pub use ranking::RankingEngine;
pub use relationships::RelationshipManager;
pub use social::SocialQueryEngine;

use crate::{
    config::Config,
    db::Store,
    error::{AppError, AppResult},
    models::{FilmId, FilmRow, User, UserId},
};

const DEFAULT_TOP_COUNT: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(count) => count,
    None => panic!("default top count is zero"),
};

/// Knobs the service layer reads at construction
#[derive(Debug, Clone, Copy)]
pub struct ServiceConfig {
    pub default_top_count: NonZeroUsize,
    pub lookup_policy: LookupPolicy,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_top_count: DEFAULT_TOP_COUNT,
            lookup_policy: LookupPolicy::Exact,
        }
    }
}

impl TryFrom<&Config> for ServiceConfig {
    type Error = anyhow::Error;

    fn try_from(config: &Config) -> anyhow::Result<Self> {
        let default_top_count = NonZeroUsize::new(config.default_top_count)
            .ok_or_else(|| anyhow::anyhow!("DEFAULT_TOP_COUNT must be at least 1"))?;
        Ok(Self {
            default_top_count,
            lookup_policy: config.lookup_policy,
        })
    }
}

/// Every service, sharing one store
#[derive(Clone)]
pub struct Services {
    pub catalog: Catalog,
    pub relationships: RelationshipManager,
    pub ranking: RankingEngine,
    pub social: SocialQueryEngine,
    pub lookup: LookupResolver,
}

impl Services {
    pub fn new(store: Arc<dyn Store>, config: ServiceConfig) -> Self {
        let lookup = LookupResolver::new(store.clone(), config.lookup_policy);
        Self {
            catalog: Catalog::new(store.clone(), lookup.clone()),
            relationships: RelationshipManager::new(store.clone(), lookup.clone()),
            ranking: RankingEngine::new(store.clone(), config.default_top_count),
            social: SocialQueryEngine::new(store),
            lookup,
        }
    }
}

pub(crate) async fn require_user(store: &dyn Store, id: UserId) -> AppResult<User> {
    store
        .find_user(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User with id {} not found", id)))
}

pub(crate) async fn require_film(store: &dyn Store, id: FilmId) -> AppResult<FilmRow> {
    store
        .find_film(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Film with id {} not found", id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(vars: &[(&str, &str)]) -> Config {
        let vars = vars.iter().map(|(k, v)| (k.to_string(), v.to_string()));
        envy::from_iter(vars).unwrap()
    }

    #[test]
    fn test_service_config_from_env_config() {
        let config = config_with(&[("DEFAULT_TOP_COUNT", "4"), ("LOOKUP_POLICY", "id_range")]);
        let services = ServiceConfig::try_from(&config).unwrap();
        assert_eq!(services.default_top_count.get(), 4);
        assert_eq!(services.lookup_policy, LookupPolicy::IdRange);
    }

    #[test]
    fn test_zero_default_top_count_rejected() {
        let config = config_with(&[("DEFAULT_TOP_COUNT", "0")]);
        assert!(ServiceConfig::try_from(&config).is_err());
    }
}
