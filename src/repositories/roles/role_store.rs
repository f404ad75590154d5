//! 역할 스토어

use crate::domain::entities::roles::IdentityRole;
use crate::errors::StoreResult;
use crate::repositories::entity_store::{DocumentEntityStore, EntityStore};
use crate::repositories::key_coercion::{KeyCoercion, ObjectIdKeys};

/// `AspNetRoles` 컬렉션의 엔티티 스토어
pub type RoleStore<C = ObjectIdKeys> = DocumentEntityStore<IdentityRole, C>;

impl<C: KeyCoercion> DocumentEntityStore<IdentityRole, C> {
    /// 모든 역할을 읽어옵니다.
    ///
    /// 역할 테이블은 작다는 전제의 전체 스캔입니다.
    pub async fn roles(&self) -> StoreResult<Vec<IdentityRole>> {
        self.list_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::db::memory::MemoryDatabase;

    #[tokio::test]
    async fn test_roles_lists_every_role() {
        let store: RoleStore = RoleStore::new(Arc::new(MemoryDatabase::new("identity_test")));
        store.create(&IdentityRole::new("Admin")).await.unwrap();
        store.create(&IdentityRole::new("Editor")).await.unwrap();

        let mut names: Vec<String> = store.roles().await.unwrap().into_iter().map(|r| r.name).collect();
        names.sort();

        assert_eq!(names, vec!["Admin", "Editor"]);
        assert_eq!(store.collection_name(), "AspNetRoles");
    }

    #[tokio::test]
    async fn test_roles_on_empty_collection() {
        let store: RoleStore = RoleStore::new(Arc::new(MemoryDatabase::new("identity_test")));

        assert!(store.roles().await.unwrap().is_empty());
    }
}
