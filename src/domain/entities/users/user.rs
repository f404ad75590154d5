//! User Entity Implementation
//!
//! 아이덴티티 프레임워크의 사용자 모델입니다.
//! 역할 이름, 클레임, 외부 로그인 정보는 사용자 문서 안에 내장됩니다.

use mongodb::bson::{oid::ObjectId, serde_helpers::hex_string_as_object_id, DateTime};
use serde::{Deserialize, Serialize};
use crate::domain::entities::IdentityEntity;

/// 사용자 엔티티
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityUser {
    #[serde(rename = "_id", with = "hex_string_as_object_id")]
    pub id: String,
    /// 사용자 이름 (unique, 스토어가 강제하지는 않음)
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub email_confirmed: bool,
    /// 해시된 비밀번호 (외부 로그인 전용 사용자는 None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// 자격 증명이 바뀔 때마다 갱신되는 임의 값
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_stamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub phone_number_confirmed: bool,
    #[serde(default)]
    pub two_factor_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lockout_end_date_utc: Option<DateTime>,
    #[serde(default)]
    pub lockout_enabled: bool,
    #[serde(default)]
    pub access_failed_count: i32,
    /// 소속 역할 이름
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub claims: Vec<IdentityUserClaim>,
    #[serde(default)]
    pub logins: Vec<IdentityUserLogin>,
}

/// 사용자 클레임
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityUserClaim {
    pub claim_type: String,
    pub claim_value: String,
}

impl IdentityUserClaim {
    pub fn new(claim_type: impl Into<String>, claim_value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            claim_value: claim_value.into(),
        }
    }
}

/// 외부 로그인 프로바이더 연결 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityUserLogin {
    /// 프로바이더 이름 (예: Google)
    pub login_provider: String,
    /// 프로바이더가 발급한 사용자 키
    pub provider_key: String,
}

impl IdentityUserLogin {
    pub fn new(login_provider: impl Into<String>, provider_key: impl Into<String>) -> Self {
        Self {
            login_provider: login_provider.into(),
            provider_key: provider_key.into(),
        }
    }
}

impl IdentityUser {
    /// 새 ObjectId를 할당한 사용자를 생성합니다.
    pub fn new(user_name: impl Into<String>) -> Self {
        Self::with_id(ObjectId::new().to_hex(), user_name)
    }

    pub fn with_id(id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_name: user_name.into(),
            email: None,
            email_confirmed: false,
            password_hash: None,
            security_stamp: None,
            phone_number: None,
            phone_number_confirmed: false,
            two_factor_enabled: false,
            lockout_end_date_utc: None,
            lockout_enabled: false,
            access_failed_count: 0,
            roles: Vec::new(),
            claims: Vec::new(),
            logins: Vec::new(),
        }
    }

    /// 역할 소속 여부 (대소문자 구분)
    pub fn is_in_role(&self, role_name: &str) -> bool {
        self.roles.iter().any(|role| role == role_name)
    }

    /// 역할을 추가합니다. 이미 소속된 경우 무시합니다.
    pub fn add_role(&mut self, role_name: impl Into<String>) {
        let role_name = role_name.into();
        if !self.is_in_role(&role_name) {
            self.roles.push(role_name);
        }
    }

    /// 역할을 제거하고 제거 여부를 반환합니다.
    pub fn remove_role(&mut self, role_name: &str) -> bool {
        let before = self.roles.len();
        self.roles.retain(|role| role != role_name);
        before != self.roles.len()
    }

    /// 프로바이더와 키가 일치하는 외부 로그인을 찾습니다.
    pub fn find_login(&self, login_provider: &str, provider_key: &str) -> Option<&IdentityUserLogin> {
        self.logins
            .iter()
            .find(|login| login.login_provider == login_provider && login.provider_key == provider_key)
    }
}

impl IdentityEntity for IdentityUser {
    type Key = String;

    const COLLECTION: &'static str = "AspNetUsers";
    const NAME_FIELD: &'static str = "user_name";

    fn id(&self) -> &String {
        &self.id
    }

    fn name(&self) -> &str {
        &self.user_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{from_document, to_document};

    #[test]
    fn test_roles_are_not_duplicated() {
        let mut user = IdentityUser::new("alice");

        user.add_role("Admin");
        user.add_role("Admin");
        user.add_role("Editor");

        assert_eq!(user.roles, vec!["Admin", "Editor"]);
        assert!(user.remove_role("Admin"));
        assert!(!user.remove_role("Admin"));
        assert!(!user.is_in_role("Admin"));
    }

    #[test]
    fn test_find_login() {
        let mut user = IdentityUser::new("alice");
        user.logins.push(IdentityUserLogin::new("Google", "g-123"));

        assert!(user.find_login("Google", "g-123").is_some());
        assert!(user.find_login("Google", "g-999").is_none());
    }

    #[test]
    fn test_optional_fields_are_omitted_from_document() {
        let mut user = IdentityUser::new("alice");
        user.claims.push(IdentityUserClaim::new("department", "ops"));

        let document = to_document(&user).unwrap();

        assert!(!document.contains_key("email"));
        assert!(!document.contains_key("password_hash"));
        assert_eq!(from_document::<IdentityUser>(document).unwrap(), user);
    }
}
