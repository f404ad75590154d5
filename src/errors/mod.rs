//! 에러 처리 모듈
//!
//! [`StoreError`]와 [`StoreResult`]를 제공합니다.

pub mod errors;

pub use errors::*;
