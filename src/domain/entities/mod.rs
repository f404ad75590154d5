//! # Domain Entities Module
//!
//! 아이덴티티 프레임워크가 저장하는 엔티티(역할, 사용자)를 정의합니다.
//! 각 엔티티는 MongoDB 컬렉션의 문서 하나와 1:1로 매핑됩니다.
//!
//! ## 문서 매핑 규칙
//!
//! - 식별자는 `_id` 필드에 MongoDB 네이티브 `ObjectId`로 저장됩니다.
//!   Rust 쪽에서는 24자리 16진수 문자열(`String`)로 다룹니다.
//! - 나머지 필드 이름은 구조체 필드 이름을 그대로 사용합니다.
//! - 클레임, 로그인 등 프레임워크 속성은 스토어가 해석하지 않고 그대로 저장합니다.
//!
//! ## 스토어 연동
//!
//! [`IdentityEntity`]를 구현한 타입은 제네릭 엔티티 스토어로 저장할 수 있습니다.
//!
//! ```rust,ignore
//! use mongo_identity_store::domain::entities::roles::IdentityRole;
//! use mongo_identity_store::repositories::{EntityStore, RoleStore};
//!
//! let store = RoleStore::new(database.clone());
//! store.create(&IdentityRole::new("Admin")).await?;
//! let admin = store.find_by_name("Admin").await?;
//! ```

pub mod roles;
pub mod users;

use std::fmt;
use serde::{de::DeserializeOwned, Serialize};

/// 엔티티 스토어로 저장 가능한 아이덴티티 엔티티
///
/// 컬렉션 이름과 이름 필드는 엔티티 종류마다 고정된 상수입니다.
pub trait IdentityEntity: Serialize + DeserializeOwned + Send + Sync + Unpin + 'static {
    /// 프레임워크가 선택한 식별자 타입 (문자열로 변환 가능해야 함)
    type Key: fmt::Display + Send + Sync;

    /// 저장될 컬렉션 이름
    const COLLECTION: &'static str;

    /// 이름 조회에 사용하는 문서 필드
    const NAME_FIELD: &'static str;

    fn id(&self) -> &Self::Key;

    /// 사람이 읽을 수 있는 고유 이름
    fn name(&self) -> &str;
}
