//! 식별자 변환 전략
//!
//! 프레임워크의 제네릭 키를 문서 데이터베이스의 `_id` 값으로 바꿉니다.
//! 스토어는 필터를 만들거나 문서를 쓰기 전에 항상 이 변환을 거칩니다.

use std::fmt;
use mongodb::bson::{oid::ObjectId, Bson};
use crate::errors::{StoreError, StoreResult};

/// 키를 네이티브 `_id` 값으로 변환하는 전략
pub trait KeyCoercion: Send + Sync + 'static {
    fn to_native<K>(key: &K) -> StoreResult<Bson>
    where
        K: fmt::Display + ?Sized;
}

/// 기본 전략: 키를 문자열로 만든 뒤 `ObjectId`로 파싱합니다.
///
/// 파싱에 실패하면 [`StoreError::IdentifierFormat`]을 반환하며,
/// 보정하거나 "없음"으로 바꾸지 않습니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectIdKeys;

impl KeyCoercion for ObjectIdKeys {
    fn to_native<K>(key: &K) -> StoreResult<Bson>
    where
        K: fmt::Display + ?Sized,
    {
        let raw = key.to_string();
        ObjectId::parse_str(&raw)
            .map(Bson::ObjectId)
            .map_err(|_| StoreError::IdentifierFormat(raw))
    }
}

/// 문자열 키를 그대로 `_id`로 사용하는 전략
///
/// ObjectId 형식이 아닌 키를 쓰는 엔티티용입니다. 이 전략을 쓰는 엔티티는
/// `_id`를 문자열로 직렬화해야 합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringKeys;

impl KeyCoercion for StringKeys {
    fn to_native<K>(key: &K) -> StoreResult<Bson>
    where
        K: fmt::Display + ?Sized,
    {
        Ok(Bson::String(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_keys_parse_hex_string() {
        let native = ObjectIdKeys::to_native("507f1f77bcf86cd799439011").unwrap();

        assert_eq!(
            native,
            Bson::ObjectId(ObjectId::parse_str("507f1f77bcf86cd799439011").unwrap())
        );
    }

    #[test]
    fn test_object_id_keys_accept_object_id_key() {
        let id = ObjectId::new();

        assert_eq!(ObjectIdKeys::to_native(&id).unwrap(), Bson::ObjectId(id));
    }

    #[test]
    fn test_object_id_keys_reject_plain_string() {
        let result = ObjectIdKeys::to_native("admin");

        match result {
            Err(StoreError::IdentifierFormat(raw)) => assert_eq!(raw, "admin"),
            other => panic!("Expected IdentifierFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_string_keys_pass_through() {
        assert_eq!(
            StringKeys::to_native("tenant-acme").unwrap(),
            Bson::String("tenant-acme".to_string())
        );
    }
}
