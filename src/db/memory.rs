//! 인메모리 문서 데이터베이스
//!
//! MongoDB 서버 없이 엔티티 스토어를 구동하기 위한 [`DocumentDatabase`] 구현입니다.
//! 테스트와 로컬 개발에서 사용합니다.
//!
//! - 컬렉션은 첫 접근 시 생성되며 삽입 순서를 유지합니다.
//! - `_id`가 없는 문서는 삽입 시 새 `ObjectId`를 할당받습니다.
//! - `_id` 중복 삽입은 [`StoreError::Backend`]로 거부됩니다.
//! - 조회는 호출 시점의 스냅샷을 스트림으로 반환합니다.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use log::debug;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use crate::db::collection::{DocumentCollection, DocumentDatabase, DocumentStream, ReplaceResult};
use crate::errors::{StoreError, StoreResult};

const ID_FIELD: &str = "_id";

/// 인메모리 데이터베이스 핸들
pub struct MemoryDatabase {
    name: String,
    collections: RwLock<HashMap<String, Arc<MemoryCollection>>>,
}

impl MemoryDatabase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// 지금까지 생성된 컬렉션 이름 (정렬됨)
    pub fn collection_names(&self) -> Vec<String> {
        let collections = self.collections.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = collections.keys().cloned().collect();
        names.sort();
        names
    }

    /// 전체 내용을 relaxed Extended JSON으로 덤프합니다. (디버깅용)
    pub fn dump_json(&self) -> serde_json::Value {
        let collections = self.collections.read().unwrap_or_else(PoisonError::into_inner);
        let mut dump = serde_json::Map::new();

        for (name, collection) in collections.iter() {
            let documents = collection
                .snapshot(&Document::new())
                .into_iter()
                .map(|doc| Bson::Document(doc).into_relaxed_extjson())
                .collect();
            dump.insert(name.clone(), serde_json::Value::Array(documents));
        }

        serde_json::Value::Object(dump)
    }

    fn collection_entry(&self, name: &str) -> Arc<MemoryCollection> {
        if let Some(existing) = self
            .collections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return existing.clone();
        }

        let mut collections = self.collections.write().unwrap_or_else(PoisonError::into_inner);
        collections
            .entry(name.to_string())
            .or_insert_with(|| {
                debug!("인메모리 컬렉션 생성: {}", name);
                Arc::new(MemoryCollection::new(name))
            })
            .clone()
    }
}

impl DocumentDatabase for MemoryDatabase {
    fn database_name(&self) -> &str {
        &self.name
    }

    fn collection(&self, name: &str) -> Arc<dyn DocumentCollection> {
        self.collection_entry(name)
    }
}

/// 인메모리 컬렉션
pub struct MemoryCollection {
    name: String,
    documents: RwLock<Vec<Document>>,
}

impl MemoryCollection {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            documents: RwLock::new(Vec::new()),
        }
    }

    fn snapshot(&self, filter: &Document) -> Vec<Document> {
        self.documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|doc| matches_filter(doc, filter))
            .cloned()
            .collect()
    }

    fn duplicate_key(&self, id: &Bson) -> StoreError {
        StoreError::Backend(format!(
            "E11000 duplicate key error collection: {} index: _id_ dup key: {}",
            self.name, id
        ))
    }
}

/// 필터의 모든 최상위 필드가 문서의 값과 같은지 확인합니다.
fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, value)| document.get(key) == Some(value))
}

#[async_trait]
impl DocumentCollection for MemoryCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn insert_one(&self, mut document: Document) -> StoreResult<()> {
        let mut documents = self.documents.write().unwrap_or_else(PoisonError::into_inner);

        let id = match document.get(ID_FIELD) {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                document.insert(ID_FIELD, id.clone());
                id
            }
        };

        if documents.iter().any(|doc| doc.get(ID_FIELD) == Some(&id)) {
            return Err(self.duplicate_key(&id));
        }

        documents.push(document);
        Ok(())
    }

    async fn replace_one(
        &self,
        filter: Document,
        mut replacement: Document,
        upsert: bool,
    ) -> StoreResult<ReplaceResult> {
        let mut documents = self.documents.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(position) = documents.iter().position(|doc| matches_filter(doc, &filter)) {
            if let Some(current_id) = documents[position].get(ID_FIELD).cloned() {
                match replacement.get(ID_FIELD) {
                    Some(new_id) if *new_id != current_id => {
                        return Err(StoreError::Backend(format!(
                            "the (immutable) field '_id' was found to have been altered to _id: {}",
                            new_id
                        )));
                    }
                    Some(_) => {}
                    None => {
                        replacement.insert(ID_FIELD, current_id);
                    }
                }
            }

            documents[position] = replacement;
            return Ok(ReplaceResult {
                matched_count: 1,
                upserted_id: None,
            });
        }

        if !upsert {
            return Ok(ReplaceResult {
                matched_count: 0,
                upserted_id: None,
            });
        }

        let id = match replacement.get(ID_FIELD).or_else(|| filter.get(ID_FIELD)) {
            Some(id) => id.clone(),
            None => Bson::ObjectId(ObjectId::new()),
        };
        if documents.iter().any(|doc| doc.get(ID_FIELD) == Some(&id)) {
            return Err(self.duplicate_key(&id));
        }
        replacement.insert(ID_FIELD, id.clone());
        documents.push(replacement);

        Ok(ReplaceResult {
            matched_count: 0,
            upserted_id: Some(id),
        })
    }

    async fn delete_one(&self, filter: Document) -> StoreResult<u64> {
        let mut documents = self.documents.write().unwrap_or_else(PoisonError::into_inner);

        match documents.iter().position(|doc| matches_filter(doc, &filter)) {
            Some(position) => {
                documents.remove(position);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn find(&self, filter: Document) -> StoreResult<DocumentStream> {
        let snapshot = self.snapshot(&filter);
        Ok(stream::iter(snapshot.into_iter().map(Ok)).boxed())
    }

    async fn find_one(&self, filter: Document) -> StoreResult<Option<Document>> {
        Ok(self
            .documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|doc| matches_filter(doc, &filter))
            .cloned())
    }
}
