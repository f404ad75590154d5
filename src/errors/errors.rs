//! 엔티티 스토어 전역에서 사용하는 에러 시스템
//!
//! `thiserror` 기반의 단일 에러 타입으로 스토어, 백엔드, 연결 설정 계층의
//! 실패를 표현합니다. 드라이버 에러는 감싸지 않고 그대로 전달합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use mongo_identity_store::errors::{StoreError, StoreResult};
//!
//! async fn rename(store: &RoleStore, id: &str, name: &str) -> StoreResult<()> {
//!     let mut role = store
//!         .find_by_id(&id.to_string())
//!         .await?
//!         .ok_or_else(|| StoreError::InvalidArgument("role".to_string()))?;
//!     role.name = name.to_string();
//!     store.update(&role).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## 조회 실패
//!
//! "찾을 수 없음"은 에러가 아닙니다. 모든 조회 연산은 `Ok(None)`을 반환하며
//! 호출자가 직접 확인해야 합니다.

use mongodb::bson;
use thiserror::Error;

/// 스토어 전역 에러 타입
#[derive(Error, Debug)]
pub enum StoreError {
    /// 엔티티를 문서로 표현할 수 없음 (null 엔티티에 해당)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// `dispose()` 이후의 호출
    #[error("Cannot access a disposed object: {0}")]
    ObjectDisposed(String),

    /// 식별자가 ObjectId 형식이 아님
    ///
    /// 조회 실패로 변환되지 않고 그대로 호출자에게 전달됩니다.
    #[error("'{0}' is not a valid 24 digit hex ObjectId")]
    IdentifierFormat(String),

    /// 저장된 문서를 엔티티 타입으로 디코딩하지 못함
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] bson::de::Error),

    /// MongoDB 드라이버 에러 (변환 없이 전달)
    #[error(transparent)]
    Driver(#[from] mongodb::error::Error),

    /// 인메모리 백엔드가 거부한 쓰기 연산
    #[error("Backend error: {0}")]
    Backend(String),

    /// 지원하지 않는 연결 문자열 형식
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// 연결 설정 누락
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// 편의성을 위한 Result 타입 별칭
pub type StoreResult<T> = Result<T, StoreError>;
