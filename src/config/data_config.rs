//! 데이터베이스 연결 설정 관리 모듈
//!
//! 연결 이름, 이름이 붙은 연결 문자열, 애플리케이션 이름 등
//! MongoDB 연결에 필요한 설정값을 환경 변수에서 읽어옵니다.

use std::env;
use std::path::{Path, PathBuf};
use log::{debug, error};

/// 기본 연결 이름
pub const DEFAULT_CONNECTION_NAME: &str = "DefaultConnection";

/// MongoDB 연결 설정
pub struct DatabaseConfig;

impl DatabaseConfig {
    /// 컨텍스트가 기본으로 사용할 연결 이름을 반환합니다.
    ///
    /// # Environment Variables
    ///
    /// - `IDENTITY_CONNECTION_NAME`: 커스텀 연결 이름 (기본값: `DefaultConnection`)
    pub fn connection_name() -> String {
        env::var("IDENTITY_CONNECTION_NAME")
            .unwrap_or_else(|_| DEFAULT_CONNECTION_NAME.to_string())
    }

    /// 이름이 붙은 연결 문자열을 환경 변수에서 찾습니다.
    ///
    /// # Returns
    ///
    /// * `Some(String)` - `CONNECTION_STRING_<NAME>` 변수가 환경 변수나
    ///   프로필 .env 파일([`DatabaseConfig::env_file`])에 있는 경우
    /// * `None` - 어디에도 없는 경우
    pub fn connection_string(name: &str) -> Option<String> {
        Self::connection_string_from(name, Self::env_file())
    }

    /// 환경 변수를 먼저 보고, 없으면 주어진 .env 파일에서 찾습니다.
    pub fn connection_string_from(name: &str, env_file: impl AsRef<Path>) -> Option<String> {
        let key = Self::connection_env_key(name);
        env::var(&key)
            .ok()
            .or_else(|| Self::read_env_file(env_file, &key))
    }

    /// 연결 이름을 환경 변수 키로 변환합니다.
    ///
    /// 카멜 케이스 경계와 구분자(`-`, `.`, 공백)를 `_`로 바꾸고 대문자로 만듭니다.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mongo_identity_store::config::DatabaseConfig;
    ///
    /// assert_eq!(
    ///     DatabaseConfig::connection_env_key("DefaultConnection"),
    ///     "CONNECTION_STRING_DEFAULT_CONNECTION"
    /// );
    /// ```
    pub fn connection_env_key(name: &str) -> String {
        let mut key = String::from("CONNECTION_STRING_");
        let mut previous_lower = false;

        for ch in name.trim().chars() {
            if ch == '-' || ch == '.' || ch.is_whitespace() {
                key.push('_');
                previous_lower = false;
                continue;
            }
            if ch.is_uppercase() && previous_lower {
                key.push('_');
            }
            previous_lower = ch.is_lowercase() || ch.is_ascii_digit();
            key.extend(ch.to_uppercase());
        }

        key
    }

    /// MongoDB 클라이언트에 설정할 애플리케이션 이름 (모니터링용)
    ///
    /// - `MONGODB_APP_NAME`: 기본값 `mongo_identity_store`
    pub fn app_name() -> String {
        env::var("MONGODB_APP_NAME").unwrap_or_else(|_| "mongo_identity_store".to_string())
    }

    /// 현재 프로필에 해당하는 .env 파일 경로
    ///
    /// - `PROFILE`: `dev`(기본값), `prod`, 그 외
    pub fn env_file() -> PathBuf {
        let profile = env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());
        PathBuf::from(Self::env_file_for_profile(&profile))
    }

    /// * `dev` - .env.dev
    /// * `prod` - .env.prod
    /// * 기타 - .env
    pub fn env_file_for_profile(profile: &str) -> &'static str {
        match profile {
            "prod" => ".env.prod",
            "dev" => ".env.dev",
            _ => ".env",
        }
    }

    /// .env 파일에서 키 하나를 읽습니다. 프로세스 환경 변수는 수정하지 않습니다.
    ///
    /// 파일이 없으면 `None`입니다. 형식 오류는 로그를 남기고 `None`을 반환합니다.
    pub fn read_env_file(path: impl AsRef<Path>, key: &str) -> Option<String> {
        let path = path.as_ref();
        let entries = match dotenv::from_path_iter(path) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("{} 파일 없음: {}", path.display(), e);
                return None;
            }
        };

        for entry in entries {
            match entry {
                Ok((name, value)) if name == key => return Some(value),
                Ok(_) => {}
                Err(e) => {
                    error!("{} 파일 파싱 실패: {}", path.display(), e);
                    return None;
                }
            }
        }

        None
    }
}
