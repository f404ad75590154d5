//! # 제네릭 엔티티 스토어
//!
//! 아이덴티티 프레임워크의 CRUD 호출을 문서 컬렉션 연산으로 옮기는 리포지토리입니다.
//! 엔티티 종류(컬렉션 이름, 이름 필드)와 식별자 변환 전략을 타입 파라미터로 받아
//! 역할과 사용자 모두 하나의 구현을 공유합니다.
//!
//! ## 연산 정책
//!
//! | 연산 | 컬렉션 연산 | 일치 문서 없음 |
//! |------|-------------|----------------|
//! | `create` | insert-one | 해당 없음 (이름 중복 검사 없음) |
//! | `update` | replace-one (upsert) | 삽입 후 `UpdateOutcome::Inserted` |
//! | `delete` | delete-one | `Ok(false)` |
//! | `find_by_id` / `find_by_name` | find-one | `Ok(None)` |
//! | `list` | find (빈 필터) | 빈 스트림 |
//!
//! ## 수명
//!
//! 스토어는 공유 데이터베이스 핸들(`Arc`)을 빌려 쓸 뿐 소유하지 않습니다.
//! `dispose()`는 스토어만 사용 불가 상태로 만들고 핸들은 닫지 않습니다.
//! 이미 폐기 검사를 통과해 진행 중인 연산은 그대로 완료되므로,
//! 폐기 시점과 진행 중인 호출의 순서는 호출자가 맞춰야 합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mongo_identity_store::db::MemoryDatabase;
//! use mongo_identity_store::domain::entities::roles::IdentityRole;
//! use mongo_identity_store::repositories::{EntityStore, RoleStore, UpdateOutcome};
//!
//! let store = RoleStore::new(Arc::new(MemoryDatabase::new("identity")));
//!
//! let mut role = IdentityRole::new("Admin");
//! store.create(&role).await?;
//!
//! role.name = "SuperAdmin".to_string();
//! assert_eq!(store.update(&role).await?, UpdateOutcome::Replaced);
//!
//! store.delete(&role).await?;
//! assert!(store.find_by_id(&role.id).await?.is_none());
//! ```

use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use async_trait::async_trait;
use futures_util::stream::{BoxStream, StreamExt, TryStreamExt};
use log::{debug, info};
use mongodb::bson::{doc, from_document, to_document, Bson, Document};
use crate::db::collection::{DocumentCollection, DocumentDatabase};
use crate::domain::entities::IdentityEntity;
use crate::errors::{StoreError, StoreResult};
use crate::repositories::key_coercion::{KeyCoercion, ObjectIdKeys};

const ID_FIELD: &str = "_id";

/// 엔티티 스트림 (커서 기반 지연 평가)
pub type EntityStream<E> = BoxStream<'static, StoreResult<E>>;

/// `update`의 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// 기존 문서를 교체함
    Replaced,
    /// 일치하는 문서가 없어 새로 삽입함 (upsert)
    Inserted,
}

/// 아이덴티티 프레임워크가 사용하는 엔티티 스토어 계약
#[async_trait]
pub trait EntityStore<E: IdentityEntity>: Send + Sync {
    /// 엔티티를 그대로 삽입합니다. 이름 중복은 검사하지 않습니다.
    async fn create(&self, entity: &E) -> StoreResult<()>;

    /// 식별자가 같은 문서를 교체하고, 없으면 삽입합니다.
    async fn update(&self, entity: &E) -> StoreResult<UpdateOutcome>;

    /// 식별자가 같은 문서를 삭제합니다. 없으면 `Ok(false)`입니다.
    async fn delete(&self, entity: &E) -> StoreResult<bool>;

    async fn find_by_id(&self, id: &E::Key) -> StoreResult<Option<E>>;

    /// 이름 필드의 정확한 일치로 조회합니다.
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<E>>;

    /// 컬렉션 전체를 스트림으로 읽습니다. 순서는 보장하지 않습니다.
    async fn list(&self) -> StoreResult<EntityStream<E>>;

    /// 컬렉션 전체를 메모리로 읽어옵니다.
    ///
    /// 작은 컬렉션(역할 등)용입니다. 큰 컬렉션은 [`EntityStore::list`]를 사용하세요.
    async fn list_all(&self) -> StoreResult<Vec<E>> {
        self.list().await?.try_collect().await
    }
}

/// [`DocumentDatabase`] 위에서 동작하는 제네릭 엔티티 스토어
///
/// - `E`: 엔티티 타입 (컬렉션 이름, 이름 필드 포함)
/// - `C`: 식별자 변환 전략 (기본값: [`ObjectIdKeys`])
pub struct DocumentEntityStore<E, C = ObjectIdKeys> {
    /// 공유 데이터베이스 핸들 (스토어가 닫지 않음)
    database: Arc<dyn DocumentDatabase>,
    collection: Arc<dyn DocumentCollection>,
    disposed: AtomicBool,
    _marker: PhantomData<fn() -> (E, C)>,
}

impl<E, C> DocumentEntityStore<E, C>
where
    E: IdentityEntity,
    C: KeyCoercion,
{
    pub fn new(database: Arc<dyn DocumentDatabase>) -> Self {
        let collection = database.collection(E::COLLECTION);
        debug!(
            "엔티티 스토어 생성: {}.{}",
            database.database_name(),
            E::COLLECTION
        );

        Self {
            database,
            collection,
            disposed: AtomicBool::new(false),
            _marker: PhantomData,
        }
    }

    pub fn collection_name(&self) -> &'static str {
        E::COLLECTION
    }

    /// 스토어가 빌려 쓰는 공유 핸들
    pub fn database(&self) -> &Arc<dyn DocumentDatabase> {
        &self.database
    }

    /// 스토어를 사용 불가 상태로 만듭니다. 공유 핸들은 닫지 않습니다.
    ///
    /// 여러 번 호출해도 안전합니다.
    pub fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::AcqRel) {
            debug!("엔티티 스토어 폐기: {}", E::COLLECTION);
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// 임의의 최상위 필드에 대한 정확한 일치로 첫 엔티티를 조회합니다.
    pub async fn find_one_by(
        &self,
        field: &str,
        value: impl Into<Bson> + Send,
    ) -> StoreResult<Option<E>> {
        self.ensure_not_disposed()?;

        let mut filter = Document::new();
        filter.insert(field, value.into());

        self.collection
            .find_one(filter)
            .await?
            .map(Self::decode)
            .transpose()
    }

    fn ensure_not_disposed(&self) -> StoreResult<()> {
        if self.is_disposed() {
            return Err(StoreError::ObjectDisposed(format!(
                "EntityStore<{}>",
                E::COLLECTION
            )));
        }
        Ok(())
    }

    /// 엔티티를 `_id`가 네이티브 식별자로 채워진 문서로 변환합니다.
    ///
    /// 문서로 직렬화되지 않는 엔티티는 `InvalidArgument`입니다.
    fn prepare(entity: &E) -> StoreResult<(Bson, Document)> {
        let native_id = C::to_native(entity.id())?;

        let mut document = to_document(entity).map_err(|e| {
            StoreError::InvalidArgument(format!(
                "entity for '{}' is not a document: {}",
                E::COLLECTION,
                e
            ))
        })?;
        document.insert(ID_FIELD, native_id.clone());

        Ok((native_id, document))
    }

    fn decode(document: Document) -> StoreResult<E> {
        Ok(from_document(document)?)
    }
}

#[async_trait]
impl<E, C> EntityStore<E> for DocumentEntityStore<E, C>
where
    E: IdentityEntity,
    C: KeyCoercion,
{
    async fn create(&self, entity: &E) -> StoreResult<()> {
        self.ensure_not_disposed()?;
        let (_, document) = Self::prepare(entity)?;

        self.collection.insert_one(document).await?;

        debug!("{} 생성: {}", E::COLLECTION, entity.name());
        Ok(())
    }

    async fn update(&self, entity: &E) -> StoreResult<UpdateOutcome> {
        self.ensure_not_disposed()?;
        let (native_id, document) = Self::prepare(entity)?;

        let result = self
            .collection
            .replace_one(doc! { "_id": native_id }, document, true)
            .await?;

        let outcome = if result.upserted_id.is_some() {
            UpdateOutcome::Inserted
        } else {
            UpdateOutcome::Replaced
        };

        match outcome {
            UpdateOutcome::Inserted => info!(
                "{} 업데이트 대상 {} 이(가) 없어 새 문서로 삽입됨",
                E::COLLECTION,
                entity.id()
            ),
            UpdateOutcome::Replaced => debug!("{} 교체: {}", E::COLLECTION, entity.id()),
        }

        Ok(outcome)
    }

    async fn delete(&self, entity: &E) -> StoreResult<bool> {
        self.ensure_not_disposed()?;
        let (native_id, _) = Self::prepare(entity)?;

        let deleted = self.collection.delete_one(doc! { "_id": native_id }).await?;

        if deleted == 0 {
            debug!("{} 삭제 대상 없음: {}", E::COLLECTION, entity.id());
        }
        Ok(deleted > 0)
    }

    async fn find_by_id(&self, id: &E::Key) -> StoreResult<Option<E>> {
        self.ensure_not_disposed()?;
        let native_id = C::to_native(id)?;

        self.collection
            .find_one(doc! { "_id": native_id })
            .await?
            .map(Self::decode)
            .transpose()
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<E>> {
        self.find_one_by(E::NAME_FIELD, name).await
    }

    async fn list(&self) -> StoreResult<EntityStream<E>> {
        self.ensure_not_disposed()?;

        let documents = self.collection.find(Document::new()).await?;
        Ok(documents
            .map(|item| item.and_then(Self::decode))
            .boxed())
    }
}
