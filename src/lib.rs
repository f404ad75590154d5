//! MongoDB 아이덴티티 스토어
//!
//! 인증 프레임워크의 역할/사용자 레코드를 관계형 저장소 대신
//! MongoDB 컬렉션에 저장하는 영속성 어댑터입니다.
//!
//! # Features
//!
//! - **제네릭 엔티티 스토어**: 역할과 사용자가 하나의 구현을 공유
//! - **식별자 변환**: 프레임워크 키 ↔ MongoDB `ObjectId`
//! - **Upsert 업데이트**: 없는 엔티티의 업데이트는 삽입으로 처리하고 결과를 보고
//! - **공유 핸들**: 스토어는 데이터베이스 핸들을 빌려 쓰고 닫지 않음
//! - **인메모리 백엔드**: 서버 없이 동일한 계약으로 테스트
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ IdentityContext │ ← 스토어 생성, 핸들 보유
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Entity Stores  │ ← RoleStore / UserStore
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │DocumentDatabase │ ← MongoDB 드라이버 / 인메모리
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use mongo_identity_store::db::IdentityContext;
//! use mongo_identity_store::domain::entities::roles::IdentityRole;
//! use mongo_identity_store::repositories::EntityStore;
//!
//! let context = IdentityContext::connect("mongodb://localhost:27017/identity").await?;
//! let roles = context.role_store();
//!
//! roles.create(&IdentityRole::new("Admin")).await?;
//! let admin = roles.find_by_name("Admin").await?;
//! ```

pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod repositories;
