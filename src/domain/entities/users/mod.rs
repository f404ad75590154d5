//! Users Entity Module
//!
//! `AspNetUsers` 컬렉션에 저장되는 사용자 엔티티와
//! 사용자 문서에 포함되는 클레임/외부 로그인 값 객체를 정의합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use mongo_identity_store::domain::entities::users::{IdentityUser, IdentityUserLogin};
//!
//! let mut user = IdentityUser::new("alice");
//! user.email = Some("alice@example.com".to_string());
//! user.add_role("Admin");
//! user.logins.push(IdentityUserLogin::new("Google", "google-user-id"));
//! ```

pub mod user;

pub use user::{IdentityUser, IdentityUserClaim, IdentityUserLogin};
