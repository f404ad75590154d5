//! Roles Entity Module
//!
//! `AspNetRoles` 컬렉션에 저장되는 역할 엔티티를 정의합니다.

pub mod role;

pub use role::IdentityRole;
