//! Role Entity Implementation

use mongodb::bson::{oid::ObjectId, serde_helpers::hex_string_as_object_id};
use serde::{Deserialize, Serialize};
use crate::domain::entities::IdentityEntity;

/// 역할 엔티티
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRole {
    /// ObjectId의 16진수 문자열 표현 (문서에는 `_id: ObjectId`로 저장)
    #[serde(rename = "_id", with = "hex_string_as_object_id")]
    pub id: String,
    /// 역할 이름
    pub name: String,
}

impl IdentityRole {
    /// 새 ObjectId를 할당한 역할을 생성합니다.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(ObjectId::new().to_hex(), name)
    }

    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl IdentityEntity for IdentityRole {
    type Key = String;

    const COLLECTION: &'static str = "AspNetRoles";
    const NAME_FIELD: &'static str = "name";

    fn id(&self) -> &String {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{from_document, to_document, Bson};

    #[test]
    fn test_new_role_gets_object_id() {
        let role = IdentityRole::new("Admin");

        assert!(ObjectId::parse_str(&role.id).is_ok());
        assert_eq!(role.name, "Admin");
    }

    #[test]
    fn test_id_is_stored_as_native_object_id() {
        let role = IdentityRole::with_id("507f1f77bcf86cd799439011", "Admin");

        let document = to_document(&role).unwrap();

        assert_eq!(
            document.get("_id"),
            Some(&Bson::ObjectId(ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap()))
        );
        assert_eq!(from_document::<IdentityRole>(document).unwrap(), role);
    }
}
