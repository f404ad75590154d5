//! 역할 리포지토리 모듈
//!
//! `AspNetRoles` 컬렉션에 대한 [`RoleStore`](role_store::RoleStore)를 제공합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use mongo_identity_store::repositories::roles::RoleStore;
//!
//! let store = RoleStore::new(database.clone());
//! let admin = store.find_by_name("Admin").await?;
//! ```

pub mod role_store;

pub use role_store::RoleStore;
