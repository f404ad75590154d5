//! # Identity Context
//!
//! 하나의 공유 데이터베이스 핸들로 역할/사용자 스토어를 만들어 주는 진입점입니다.
//!
//! 컨텍스트가 핸들(`Arc`)을 보유하고, 스토어는 그 복제본을 빌려 씁니다.
//! 스토어를 폐기하거나 드롭해도 컨텍스트의 핸들은 그대로 유지됩니다.
//!
//! ```rust,ignore
//! use mongo_identity_store::db::IdentityContext;
//! use mongo_identity_store::repositories::EntityStore;
//!
//! let context = IdentityContext::connect("DefaultConnection").await?;
//! let roles = context.role_store();
//! let users = context.user_store();
//! ```

use std::sync::Arc;
use log::info;
use crate::db::collection::DocumentDatabase;
use crate::db::Database;
use crate::domain::entities::roles::IdentityRole;
use crate::domain::entities::users::IdentityUser;
use crate::errors::StoreResult;
use crate::repositories::{RoleStore, UserStore};

/// 역할/사용자 스토어가 공유하는 데이터베이스 컨텍스트
#[derive(Clone)]
pub struct IdentityContext {
    database: Arc<dyn DocumentDatabase>,
}

impl IdentityContext {
    /// 이미 열린 핸들로 컨텍스트를 만듭니다.
    pub fn new(database: Arc<dyn DocumentDatabase>) -> Self {
        Self { database }
    }

    /// 연결 이름 또는 MongoDB URL로 컨텍스트를 만듭니다.
    ///
    /// 해석 규칙은 [`Database::connect`]와 같습니다.
    pub async fn connect(name_or_connection_string: &str) -> StoreResult<Self> {
        let database = Database::connect(name_or_connection_string).await?;
        info!("아이덴티티 컨텍스트 생성: {}", database.database_name());
        Ok(Self::new(Arc::new(database)))
    }

    /// 기본 연결 이름(`DefaultConnection`)으로 컨텍스트를 만듭니다.
    pub async fn connect_default() -> StoreResult<Self> {
        let database = Database::connect_default().await?;
        Ok(Self::new(Arc::new(database)))
    }

    pub fn database(&self) -> &Arc<dyn DocumentDatabase> {
        &self.database
    }

    pub fn role_store(&self) -> RoleStore {
        RoleStore::new(self.database.clone())
    }

    pub fn user_store(&self) -> UserStore {
        UserStore::new(self.database.clone())
    }

    /// 모든 역할 (전체 스캔)
    pub async fn roles(&self) -> StoreResult<Vec<IdentityRole>> {
        self.role_store().roles().await
    }

    /// 모든 사용자 (전체 스캔)
    pub async fn users(&self) -> StoreResult<Vec<IdentityUser>> {
        self.user_store().users().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryDatabase;
    use crate::errors::StoreError;
    use crate::repositories::EntityStore;

    fn context() -> IdentityContext {
        IdentityContext::new(Arc::new(MemoryDatabase::new("identity_test")))
    }

    #[tokio::test]
    async fn test_stores_share_the_context_handle() {
        let context = context();
        let role = IdentityRole::new("Admin");
        let mut user = IdentityUser::new("alice");
        user.add_role(&role.name);

        let roles = context.role_store();
        roles.create(&role).await.unwrap();
        context.user_store().create(&user).await.unwrap();

        roles.dispose();

        assert_eq!(context.roles().await.unwrap(), vec![role]);
        assert_eq!(context.users().await.unwrap(), vec![user]);
    }

    #[tokio::test]
    async fn test_disposed_store_does_not_affect_new_stores() {
        let context = context();
        let first = context.role_store();
        first.dispose();

        let second = context.role_store();
        second.create(&IdentityRole::new("Editor")).await.unwrap();

        assert!(matches!(first.roles().await, Err(StoreError::ObjectDisposed(_))));
        assert_eq!(second.roles().await.unwrap().len(), 1);
        assert_eq!(context.database().database_name(), "identity_test");
    }

    #[tokio::test]
    async fn test_connect_rejects_missing_named_connection() {
        let result = IdentityContext::connect("NoSuchConnectionConfigured").await;

        assert!(matches!(result, Err(StoreError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_connect_with_url() {
        let context = IdentityContext::connect("mongodb://localhost:27017/identity_test")
            .await
            .unwrap();

        assert_eq!(context.database().database_name(), "identity_test");
        assert_eq!(context.user_store().collection_name(), "AspNetUsers");
    }

    /// 실제 MongoDB 서버가 필요합니다. `MONGODB_URI`에 데이터베이스 이름을 포함하세요.
    #[tokio::test]
    #[ignore]
    async fn test_live_mongodb_round_trip() {
        let uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017/identity_it".to_string());
        let database = Database::connect(&uri).await.unwrap();
        database.ping().await.unwrap();
        let context = IdentityContext::new(Arc::new(database));
        let roles = context.role_store();
        let role = IdentityRole::new("IntegrationRole");

        roles.create(&role).await.unwrap();
        assert_eq!(roles.find_by_id(&role.id).await.unwrap(), Some(role.clone()));

        let mut renamed = role.clone();
        renamed.name = "IntegrationRoleRenamed".to_string();
        assert_eq!(
            roles.update(&renamed).await.unwrap(),
            crate::repositories::UpdateOutcome::Replaced
        );
        assert!(roles.delete(&renamed).await.unwrap());
        assert!(roles.find_by_id(&role.id).await.unwrap().is_none());
    }
}
