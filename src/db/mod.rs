//! Database Connection Management Module
//!
//! 연결 문자열을 해석해 이름이 붙은 MongoDB 데이터베이스 핸들을 만듭니다.
//! 엔티티 스토어는 이 핸들을 [`DocumentDatabase`] 트레이트를 통해서만 사용합니다.
//!
//! # 연결 문자열 해석
//!
//! - `mongodb://` 또는 `mongodb+srv://`로 시작하면 MongoDB URL로 사용 (스킴만 소문자로 정규화)
//! - 그 외에는 연결 이름으로 보고 설정에서 연결 문자열을 조회
//! - 조회된 값이 MongoDB URL이 아니면 [`StoreError::Unsupported`]
//! - URL에 데이터베이스 이름이 없으면 [`StoreError::Configuration`]
//!
//! # 기본 사용법
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mongo_identity_store::db::Database;
//!
//! let database = Arc::new(Database::connect("mongodb://localhost:27017/identity").await?);
//! database.ping().await?;
//! ```

pub mod collection;
pub mod context;
pub mod memory;

use std::sync::Arc;
use async_trait::async_trait;
use futures_util::{StreamExt, TryStreamExt};
use log::{debug, info};
use mongodb::bson::{doc, Document};
use mongodb::{options::ClientOptions, Client};
use crate::config::DatabaseConfig;
use crate::errors::{StoreError, StoreResult};

pub use collection::{DocumentCollection, DocumentDatabase, DocumentStream, ReplaceResult};
pub use context::IdentityContext;
pub use memory::MemoryDatabase;

const MONGO_SCHEMES: [&str; 2] = ["mongodb://", "mongodb+srv://"];

/// 문자열이 MongoDB 연결 URL인지 확인합니다. (스킴 대소문자 무시)
pub fn is_mongo_url(value: &str) -> bool {
    normalize_mongo_url(value).is_some()
}

/// 스킴만 소문자로 바꾼 MongoDB URL을 반환합니다.
///
/// 드라이버는 소문자 스킴만 받습니다. 스킴 뒤(자격 증명, 호스트, 옵션)는 그대로 둡니다.
/// MongoDB URL이 아니면 `None`입니다.
pub fn normalize_mongo_url(value: &str) -> Option<String> {
    let trimmed = value.trim();

    MONGO_SCHEMES.iter().find_map(|scheme| {
        let prefix = trimmed.get(..scheme.len())?;
        if prefix.eq_ignore_ascii_case(scheme) {
            Some(format!("{}{}", scheme, &trimmed[scheme.len()..]))
        } else {
            None
        }
    })
}

/// 연결 이름 또는 연결 문자열을 MongoDB URL로 해석합니다.
///
/// # Arguments
///
/// * `name_or_connection_string` - MongoDB URL 또는 설정된 연결 이름
/// * `lookup` - 연결 이름으로 연결 문자열을 찾는 함수
///
/// # Errors
///
/// * `StoreError::Configuration` - 이름에 해당하는 연결 문자열이 없음
/// * `StoreError::Unsupported` - SQL 스타일 연결 문자열
pub fn resolve_connection_string<F>(name_or_connection_string: &str, lookup: F) -> StoreResult<String>
where
    F: FnOnce(&str) -> Option<String>,
{
    if let Some(url) = normalize_mongo_url(name_or_connection_string) {
        return Ok(url);
    }

    let configured = lookup(name_or_connection_string).ok_or_else(|| {
        StoreError::Configuration(format!(
            "No connection string named '{}' could be found",
            name_or_connection_string
        ))
    })?;

    normalize_mongo_url(&configured).ok_or_else(|| {
        StoreError::Unsupported(
            "SQL style connection strings are not supported. Please use a Mongo URL.".to_string(),
        )
    })
}

/// MongoDB 데이터베이스 연결 래퍼
///
/// 클라이언트는 내부적으로 커넥션 풀을 공유하므로 `Arc<Database>` 하나를
/// 여러 스토어가 함께 사용합니다. 스토어는 이 핸들을 닫지 않습니다.
#[derive(Clone)]
pub struct Database {
    /// MongoDB 클라이언트 인스턴스
    client: Client,
    /// 연결 문자열에 지정된 데이터베이스 이름
    database_name: String,
}

impl Database {
    /// 연결 이름 또는 MongoDB URL로 데이터베이스 핸들을 생성합니다.
    ///
    /// 연결 이름은 [`DatabaseConfig::connection_string`]으로 조회합니다.
    /// 서버에 접속하지는 않습니다. 연결 확인은 [`Database::ping`]을 사용하세요.
    pub async fn connect(name_or_connection_string: &str) -> StoreResult<Self> {
        let url = resolve_connection_string(name_or_connection_string, DatabaseConfig::connection_string)?;
        Self::from_url(&url).await
    }

    /// 설정된 기본 연결 이름(`DefaultConnection`)으로 연결합니다.
    pub async fn connect_default() -> StoreResult<Self> {
        Self::connect(&DatabaseConfig::connection_name()).await
    }

    async fn from_url(url: &str) -> StoreResult<Self> {
        let mut client_options = ClientOptions::parse(url).await?;

        let database_name = client_options.default_database.clone().ok_or_else(|| {
            StoreError::Configuration("No database name specified in connection string".to_string())
        })?;

        client_options.app_name = Some(DatabaseConfig::app_name());

        let client = Client::with_options(client_options)?;

        info!("MongoDB 핸들 생성: {}", database_name);

        Ok(Self {
            client,
            database_name,
        })
    }

    /// 서버에 `ping` 명령을 보내 연결 상태를 확인합니다.
    pub async fn ping(&self) -> StoreResult<()> {
        self.get_database().run_command(doc! { "ping": 1 }).await?;
        debug!("MongoDB ping 성공: {}", self.database_name);
        Ok(())
    }

    /// 드라이버의 `mongodb::Database` 인스턴스를 반환합니다.
    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    /// MongoDB 클라이언트 인스턴스를 반환합니다.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl DocumentDatabase for Database {
    fn database_name(&self) -> &str {
        &self.database_name
    }

    fn collection(&self, name: &str) -> Arc<dyn DocumentCollection> {
        Arc::new(MongoCollection {
            inner: self.get_database().collection::<Document>(name),
        })
    }
}

/// 드라이버 컬렉션 어댑터
struct MongoCollection {
    inner: mongodb::Collection<Document>,
}

#[async_trait]
impl DocumentCollection for MongoCollection {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn insert_one(&self, document: Document) -> StoreResult<()> {
        self.inner.insert_one(document).await?;
        Ok(())
    }

    async fn replace_one(
        &self,
        filter: Document,
        replacement: Document,
        upsert: bool,
    ) -> StoreResult<ReplaceResult> {
        let result = self
            .inner
            .replace_one(filter, replacement)
            .upsert(upsert)
            .await?;

        Ok(ReplaceResult {
            matched_count: result.matched_count,
            upserted_id: result.upserted_id,
        })
    }

    async fn delete_one(&self, filter: Document) -> StoreResult<u64> {
        let result = self.inner.delete_one(filter).await?;
        Ok(result.deleted_count)
    }

    async fn find(&self, filter: Document) -> StoreResult<DocumentStream> {
        let cursor = self.inner.find(filter).await?;
        Ok(cursor.map_err(StoreError::from).boxed())
    }

    async fn find_one(&self, filter: Document) -> StoreResult<Option<Document>> {
        Ok(self.inner.find_one(filter).await?)
    }
}
