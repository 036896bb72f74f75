use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::{PgPool, Postgres, Row, Transaction, postgres::PgRow};

use crate::document::{apply_decrement, into_object};
use crate::{
    DecrementOutcome, Document, DocumentPath, DocumentQuery, DocumentStoreError, Result,
    WriteFields, store::DocumentStore,
};

/// PostgreSQL-backed document store.
///
/// Each document is one JSONB row keyed by `(collection, id)`. Merging
/// writes run inside a transaction that holds the row lock, and server
/// timestamps come from the database clock.
#[derive(Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    /// Creates a new PostgreSQL document store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a pool to `database_url` and wraps it in a store.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self::new(pool))
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_document(collection: &str, row: PgRow) -> Result<Document> {
        let path = DocumentPath::new(collection, row.try_get::<String, _>("id")?);
        let data = into_object(&path, row.try_get::<Value, _>("data")?)?;

        Ok(Document {
            path,
            data,
            updated_at: row.try_get("updated_at")?,
        })
    }

    async fn database_now(tx: &mut Transaction<'_, Postgres>) -> Result<DateTime<Utc>> {
        Ok(sqlx::query_scalar("SELECT now()")
            .fetch_one(&mut **tx)
            .await?)
    }

    /// Loads a document body with a row lock held until the transaction ends.
    async fn lock_for_update(
        tx: &mut Transaction<'_, Postgres>,
        path: &DocumentPath,
    ) -> Result<Map<String, Value>> {
        let data: Option<Value> = sqlx::query_scalar(
            "SELECT data FROM documents WHERE collection = $1 AND id = $2 FOR UPDATE",
        )
        .bind(path.collection())
        .bind(path.id())
        .fetch_optional(&mut **tx)
        .await?;

        let data = data.ok_or_else(|| DocumentStoreError::NotFound(path.clone()))?;
        into_object(path, data)
    }

    async fn store_body(
        tx: &mut Transaction<'_, Postgres>,
        path: &DocumentPath,
        data: Map<String, Value>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            "UPDATE documents SET data = $3, updated_at = $4 WHERE collection = $1 AND id = $2",
        )
        .bind(path.collection())
        .bind(path.id())
        .bind(Value::Object(data))
        .bind(now)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>> {
        let row = sqlx::query(
            "SELECT id, data, updated_at FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(path.collection())
        .bind(path.id())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| Self::row_to_document(path.collection(), row))
            .transpose()
    }

    async fn query(&self, query: DocumentQuery) -> Result<Vec<Document>> {
        let mut sql =
            String::from("SELECT id, data, updated_at FROM documents WHERE collection = $1");
        let mut param_count = 1;

        for _ in &query.filters {
            sql.push_str(&format!(
                " AND data -> ${} = ${}",
                param_count + 1,
                param_count + 2
            ));
            param_count += 2;
        }

        sql.push_str(" ORDER BY id ASC");

        if query.limit.is_some() {
            param_count += 1;
            sql.push_str(&format!(" LIMIT ${param_count}"));
        }

        let mut sqlx_query = sqlx::query(&sql).bind(&query.collection);
        for (field, value) in &query.filters {
            sqlx_query = sqlx_query.bind(field).bind(value);
        }
        if let Some(limit) = query.limit {
            sqlx_query = sqlx_query.bind(limit as i64);
        }

        let rows = sqlx_query.fetch_all(&self.pool).await?;
        rows.into_iter()
            .map(|row| Self::row_to_document(&query.collection, row))
            .collect()
    }

    async fn set(&self, path: &DocumentPath, fields: WriteFields) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        let now = Self::database_now(&mut tx).await?;

        let mut data = Map::new();
        fields.apply_to(&mut data, now);

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ON CONFLICT (collection, id)
            DO UPDATE SET data = EXCLUDED.data, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(path.collection())
        .bind(path.id())
        .bind(Value::Object(data))
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn create(&self, path: &DocumentPath, fields: WriteFields) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        let now = Self::database_now(&mut tx).await?;

        let mut data = Map::new();
        fields.apply_to(&mut data, now);

        let inserted = sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ON CONFLICT (collection, id) DO NOTHING
            "#,
        )
        .bind(path.collection())
        .bind(path.id())
        .bind(Value::Object(data))
        .bind(now)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if inserted == 0 {
            return Err(DocumentStoreError::AlreadyExists(path.clone()));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn update(&self, path: &DocumentPath, fields: WriteFields) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        let now = Self::database_now(&mut tx).await?;

        let mut data = Self::lock_for_update(&mut tx, path).await?;
        fields.apply_to(&mut data, now);
        Self::store_body(&mut tx, path, data, now).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, path: &DocumentPath) -> Result<()> {
        sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(path.collection())
            .bind(path.id())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn decrement_if_sufficient(
        &self,
        path: &DocumentPath,
        field: &str,
        amount: u32,
    ) -> Result<DecrementOutcome> {
        let mut tx = self.pool.begin().await?;

        let mut data = Self::lock_for_update(&mut tx, path).await?;
        let outcome = apply_decrement(path, &mut data, field, amount)?;

        if let DecrementOutcome::Applied { .. } = outcome {
            let now = Self::database_now(&mut tx).await?;
            Self::store_body(&mut tx, path, data, now).await?;
            tx.commit().await?;
        } else {
            tracing::debug!(%path, field, amount, "conditional decrement refused");
            tx.rollback().await?;
        }

        Ok(outcome)
    }
}
