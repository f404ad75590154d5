//! # Configuration Module
//!
//! MongoDB 연결 관련 설정을 환경 변수 기반으로 중앙집중식으로 관리합니다.
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 이름이 붙은 연결 문자열 (DefaultConnection)
//! export CONNECTION_STRING_DEFAULT_CONNECTION="mongodb://localhost:27017/identity"
//!
//! # 컨텍스트가 사용할 연결 이름 (선택)
//! export IDENTITY_CONNECTION_NAME="DefaultConnection"
//!
//! # 모니터링용 애플리케이션 이름 (선택)
//! export MONGODB_APP_NAME="identity_service"
//!
//! # .env 파일 프로필 (dev, prod)
//! export PROFILE="dev"
//! ```

pub mod data_config;

pub use data_config::*;
