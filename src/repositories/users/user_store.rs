//! # 사용자 스토어
//!
//! `AspNetUsers` 컬렉션의 엔티티 스토어입니다.
//! 이름 조회(`find_by_name`)는 `user_name` 필드를 사용하고,
//! 이메일 조회가 추가로 제공됩니다.
//!
//! 사용자 목록은 역할보다 훨씬 클 수 있으므로 [`EntityStore::list`]
//! 스트림을 우선 사용하세요.

use crate::domain::entities::users::IdentityUser;
use crate::errors::StoreResult;
use crate::repositories::entity_store::{DocumentEntityStore, EntityStore};
use crate::repositories::key_coercion::{KeyCoercion, ObjectIdKeys};

/// `AspNetUsers` 컬렉션의 엔티티 스토어
pub type UserStore<C = ObjectIdKeys> = DocumentEntityStore<IdentityUser, C>;

impl<C: KeyCoercion> DocumentEntityStore<IdentityUser, C> {
    /// 이메일 주소의 정확한 일치로 사용자를 조회합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(IdentityUser))` - 첫 번째로 일치한 사용자
    /// * `Ok(None)` - 해당 이메일의 사용자가 없는 경우
    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<IdentityUser>> {
        self.find_one_by("email", email).await
    }

    /// 모든 사용자를 읽어옵니다. (전체 스캔)
    pub async fn users(&self) -> StoreResult<Vec<IdentityUser>> {
        self.list_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::db::memory::MemoryDatabase;
    use crate::domain::entities::users::{IdentityUserClaim, IdentityUserLogin};
    use crate::errors::StoreError;
    use crate::repositories::entity_store::UpdateOutcome;

    fn user_store() -> UserStore {
        UserStore::new(Arc::new(MemoryDatabase::new("identity_test")))
    }

    fn alice() -> IdentityUser {
        let mut user = IdentityUser::new("alice");
        user.email = Some("alice@example.com".to_string());
        user.password_hash = Some("$2b$12$hash".to_string());
        user.add_role("Admin");
        user.claims.push(IdentityUserClaim::new("department", "ops"));
        user.logins.push(IdentityUserLogin::new("Google", "g-123"));
        user
    }

    #[tokio::test]
    async fn test_user_round_trip_keeps_opaque_attributes() {
        let store = user_store();
        let user = alice();

        store.create(&user).await.unwrap();

        assert_eq!(store.find_by_id(&user.id).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_find_by_name_uses_user_name() {
        let store = user_store();
        let user = alice();
        store.create(&user).await.unwrap();

        assert_eq!(store.find_by_name("alice").await.unwrap(), Some(user));
        assert!(store.find_by_name("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let store = user_store();
        let user = alice();
        store.create(&user).await.unwrap();

        assert_eq!(store.find_by_email("alice@example.com").await.unwrap(), Some(user));
        assert!(store.find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_whole_document() {
        let store = user_store();
        let mut user = alice();
        store.create(&user).await.unwrap();

        user.email = None;
        user.remove_role("Admin");
        user.access_failed_count = 2;
        assert_eq!(store.update(&user).await.unwrap(), UpdateOutcome::Replaced);

        let stored = store.find_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(stored, user);
        assert!(store.find_by_email("alice@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_users_listing_and_dispose() {
        let store = user_store();
        store.create(&alice()).await.unwrap();
        store.create(&IdentityUser::new("bob")).await.unwrap();

        assert_eq!(store.users().await.unwrap().len(), 2);

        store.dispose();
        assert!(matches!(store.users().await, Err(StoreError::ObjectDisposed(_))));
        assert!(matches!(
            store.find_by_email("alice@example.com").await,
            Err(StoreError::ObjectDisposed(_))
        ));
    }
}
