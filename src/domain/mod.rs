//! # Domain Layer Module
//!
//! 아이덴티티 프레임워크가 영속화하는 엔티티를 담는 도메인 계층입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! └── Entities      - 역할, 사용자 (MongoDB 문서와 1:1 매핑)
//!      │
//!      ▼
//! Repositories      - 제네릭 엔티티 스토어
//!      │
//!      ▼
//! DB                - DocumentDatabase (MongoDB / 인메모리)
//! ```

pub mod entities;

pub use entities::IdentityEntity;
