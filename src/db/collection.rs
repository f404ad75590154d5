//! 문서 데이터베이스 추상화
//!
//! 엔티티 스토어가 데이터베이스에서 필요로 하는 기능만을 정의합니다.
//! 이름으로 컬렉션을 얻고, 컬렉션에서 단일 문서 삽입/교체/삭제와
//! 동등 비교 필터 기반 조회를 수행합니다.
//!
//! MongoDB 드라이버 구현은 [`crate::db::Database`],
//! 인메모리 구현은 [`crate::db::memory::MemoryDatabase`]에 있습니다.

use std::sync::Arc;
use async_trait::async_trait;
use futures_util::stream::BoxStream;
use mongodb::bson::{Bson, Document};
use crate::errors::StoreResult;

/// 조회 결과 문서 스트림 (커서 기반 지연 평가)
pub type DocumentStream = BoxStream<'static, StoreResult<Document>>;

/// 교체 연산 결과
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceResult {
    /// 필터와 일치한 문서 수
    pub matched_count: u64,
    /// upsert로 새로 삽입된 경우 삽입된 문서의 `_id`
    pub upserted_id: Option<Bson>,
}

/// 이름이 붙은 문서 컬렉션
///
/// 필터는 최상위 필드 동등 비교만 사용합니다 (`doc! { "_id": oid }`).
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// 컬렉션 이름
    fn name(&self) -> &str;

    /// 문서 하나를 그대로 삽입합니다.
    async fn insert_one(&self, document: Document) -> StoreResult<()>;

    /// 필터와 일치하는 첫 문서를 교체합니다.
    ///
    /// `upsert`가 `true`이고 일치하는 문서가 없으면 `replacement`를 삽입합니다.
    async fn replace_one(
        &self,
        filter: Document,
        replacement: Document,
        upsert: bool,
    ) -> StoreResult<ReplaceResult>;

    /// 필터와 일치하는 첫 문서를 삭제하고 삭제된 문서 수를 반환합니다.
    async fn delete_one(&self, filter: Document) -> StoreResult<u64>;

    /// 필터와 일치하는 모든 문서를 스트림으로 반환합니다.
    async fn find(&self, filter: Document) -> StoreResult<DocumentStream>;

    /// 필터와 일치하는 첫 문서를 반환합니다.
    async fn find_one(&self, filter: Document) -> StoreResult<Option<Document>>;
}

/// 열린 데이터베이스 핸들
///
/// 여러 스토어가 `Arc`로 공유하며 동시 사용을 견뎌야 합니다.
/// 컬렉션은 첫 쓰기 시점에 암묵적으로 생성됩니다.
pub trait DocumentDatabase: Send + Sync {
    /// 데이터베이스 이름
    fn database_name(&self) -> &str;

    /// 이름으로 컬렉션을 가져옵니다.
    fn collection(&self, name: &str) -> Arc<dyn DocumentCollection>;
}
