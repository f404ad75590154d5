//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 하나의 제네릭 [`DocumentEntityStore`]를 역할과 사용자에 대해 인스턴스화합니다.
//!
//! ```text
//! EntityStore<E> (계약)
//!      │
//!      ▼
//! DocumentEntityStore<E, C>
//! ├── RoleStore  = DocumentEntityStore<IdentityRole>  → "AspNetRoles"
//! └── UserStore  = DocumentEntityStore<IdentityUser>  → "AspNetUsers"
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use mongo_identity_store::repositories::{EntityStore, UserStore};
//!
//! let users = UserStore::new(database.clone());
//! let user = users.find_by_name("alice").await?;
//! ```

pub mod entity_store;
pub mod key_coercion;
pub mod roles;
pub mod users;

pub use entity_store::{DocumentEntityStore, EntityStore, EntityStream, UpdateOutcome};
pub use key_coercion::{KeyCoercion, ObjectIdKeys, StringKeys};
pub use roles::RoleStore;
pub use users::UserStore;
