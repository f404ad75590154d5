//! 사용자 리포지토리 모듈
//!
//! `AspNetUsers` 컬렉션에 대한 [`UserStore`](user_store::UserStore)를 제공합니다.
//! 역할 스토어와 같은 제네릭 구현을 쓰며, 이메일 조회가 추가됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use mongo_identity_store::repositories::users::UserStore;
//!
//! let store = UserStore::new(database.clone());
//! let user = store.find_by_email("user@example.com").await?;
//! ```

pub mod user_store;

pub use user_store::UserStore;
