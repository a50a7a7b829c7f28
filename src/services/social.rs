use std::sync::Arc;

use tracing::{debug, instrument};

use super::require_user;
use crate::{
    db::Store,
    error::{AppError, AppResult},
    models::{User, UserId},
};

/// Read-side queries over the friendship graph
#[derive(Clone)]
pub struct SocialQueryEngine {
    store: Arc<dyn Store>,
}

impl SocialQueryEngine {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Users the given user has added, ordered by id.
    #[instrument(skip(self))]
    pub async fn friends(&self, user_id: UserId) -> AppResult<Vec<User>> {
        require_user(self.store.as_ref(), user_id).await?;
        let ids: Vec<UserId> = self.store.friend_ids(user_id).await?.into_iter().collect();
        self.store.find_users(&ids).await
    }

    /// Users both have added, ordered by id. Symmetric in its arguments.
    #[instrument(skip(self))]
    pub async fn common_friends(&self, user_id: UserId, other_id: UserId) -> AppResult<Vec<User>> {
        if user_id == other_id {
            return Err(AppError::invalid(format!(
                "Common friends need two different users, got {} twice",
                user_id
            )));
        }
        require_user(self.store.as_ref(), user_id).await?;
        require_user(self.store.as_ref(), other_id).await?;

        let mine = self.store.friend_ids(user_id).await?;
        let theirs = self.store.friend_ids(other_id).await?;
        let common: Vec<UserId> = mine.intersection(&theirs).copied().collect();
        debug!(common = common.len(), "Intersected friend sets");

        self.store.find_users(&common).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{seed_users, Fixture};

    fn ids(users: &[User]) -> Vec<UserId> {
        users.iter().map(|user| user.id).collect()
    }

    #[tokio::test]
    async fn test_friends_of_unknown_user() {
        let fx = Fixture::new();
        let err = fx.social.friends(77).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_friends_resolved_in_id_order() {
        let fx = Fixture::new();
        let rel = &fx.relationships;
        let users = seed_users(&fx, 4).await;
        rel.add_friend(users[0], users[3]).await.unwrap();
        rel.add_friend(users[0], users[1]).await.unwrap();

        let friends = fx.social.friends(users[0]).await.unwrap();
        assert_eq!(ids(&friends), vec![users[1], users[3]]);
        assert_eq!(friends[0].login, "user1");
    }

    #[tokio::test]
    async fn test_common_friends_is_symmetric() {
        let fx = Fixture::new();
        let rel = &fx.relationships;
        let users = seed_users(&fx, 5).await;
        let (a, b) = (users[0], users[1]);
        for friend in [users[2], users[3], users[4]] {
            rel.add_friend(a, friend).await.unwrap();
        }
        for friend in [users[4], users[2], a] {
            rel.add_friend(b, friend).await.unwrap();
        }

        let ab = fx.social.common_friends(a, b).await.unwrap();
        let ba = fx.social.common_friends(b, a).await.unwrap();
        assert_eq!(ab, ba);
        assert_eq!(ids(&ab), vec![users[2], users[4]]);
    }

    #[tokio::test]
    async fn test_common_friends_with_self_rejected() {
        let fx = Fixture::new();
        let user = seed_users(&fx, 1).await[0];
        let err = fx.social.common_friends(user, user).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_common_friends_with_unknown_user() {
        let fx = Fixture::new();
        let user = seed_users(&fx, 1).await[0];
        let err = fx.social.common_friends(user, 500).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_no_common_friends() {
        let fx = Fixture::new();
        let users = seed_users(&fx, 3).await;
        let rel = &fx.relationships;
        rel.add_friend(users[0], users[2]).await.unwrap();

        let common = fx.social.common_friends(users[0], users[1]).await;
        assert!(common.unwrap().is_empty());
    }
}
