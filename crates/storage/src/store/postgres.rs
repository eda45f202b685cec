use async_trait::async_trait;
use serde_json::{Value, json};
use sqlx::{PgPool, Postgres, QueryBuilder, postgres::PgPoolOptions, types::Json};

use super::{
    Collection, Document, DocumentStore, Filter, ID_FIELD, PRESERVED_ON_UPSERT, Query, natural_key,
};
use crate::error::{Result, StorageError};

/// Store backed by a single PostgreSQL `documents` table holding JSONB.
///
/// Natural keys of upserted documents live in their own column with a unique
/// index, so `upsert_by_key` is one `INSERT ... ON CONFLICT` statement.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        tracing::debug!("PostgreSQL pool opened");

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::debug!("Document store migrations applied");
        Ok(())
    }
}

fn document_id(doc: &Document) -> Result<String> {
    doc.get(ID_FIELD)
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| StorageError::validation("document is missing a string id"))
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    match filter {
        Filter::All => {
            qb.push("TRUE");
        }
        Filter::Eq(field, value) => {
            qb.push("doc @> ");
            qb.push_bind(Json(json!({ field.as_str(): value })));
        }
        Filter::Contains(field, value) => {
            qb.push("doc @> ");
            qb.push_bind(Json(json!({ field.as_str(): [value] })));
        }
        Filter::In(field, values) => {
            let alternatives = values
                .iter()
                .map(|v| Filter::Eq(field.clone(), v.clone()))
                .collect();
            push_filter(qb, &Filter::Or(alternatives));
        }
        Filter::Gte(field, bound) => {
            qb.push("(doc ->> ");
            qb.push_bind(field.clone());
            qb.push(r#") COLLATE "C" >= "#);
            qb.push_bind(bound.clone());
        }
        Filter::Lt(field, bound) => {
            qb.push("(doc ->> ");
            qb.push_bind(field.clone());
            qb.push(r#") COLLATE "C" < "#);
            qb.push_bind(bound.clone());
        }
        Filter::And(filters) => push_group(qb, filters, " AND ", "TRUE"),
        Filter::Or(filters) => push_group(qb, filters, " OR ", "FALSE"),
    }
}

fn push_group(qb: &mut QueryBuilder<'_, Postgres>, filters: &[Filter], separator: &str, empty: &str) {
    if filters.is_empty() {
        qb.push(empty);
        return;
    }

    qb.push("(");
    for (i, filter) in filters.iter().enumerate() {
        if i > 0 {
            qb.push(separator);
        }
        push_filter(qb, filter);
    }
    qb.push(")");
}

/// `WHERE collection = $n AND <filter>`
fn push_scope(qb: &mut QueryBuilder<'_, Postgres>, collection: Collection, filter: &Filter) {
    qb.push(" WHERE collection = ");
    qb.push_bind(collection.as_str());
    qb.push(" AND ");
    push_filter(qb, filter);
}

/// Subquery selecting the id of the first document matching `filter`.
fn push_first_id(qb: &mut QueryBuilder<'_, Postgres>, collection: Collection, filter: &Filter) {
    qb.push("(SELECT id FROM documents");
    push_scope(qb, collection, filter);
    qb.push(" ORDER BY seq LIMIT 1)");
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert_one(&self, collection: Collection, doc: Document) -> Result<Document> {
        let id = document_id(&doc)?;

        let result = sqlx::query(
            "INSERT INTO documents (collection, id, doc) VALUES ($1, $2, $3)",
        )
        .bind(collection.as_str())
        .bind(&id)
        .bind(Json(&doc))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(doc),
            Err(e) => {
                let error = StorageError::from(e);
                if error.is_unique_violation() {
                    Err(StorageError::ConstraintViolation(format!(
                        "duplicate id in {}",
                        collection.as_str()
                    )))
                } else {
                    Err(error)
                }
            }
        }
    }

    async fn find_one(&self, collection: Collection, filter: &Filter) -> Result<Option<Document>> {
        let mut qb = QueryBuilder::new("SELECT doc FROM documents");
        push_scope(&mut qb, collection, filter);
        qb.push(" ORDER BY seq LIMIT 1");

        let doc = qb
            .build_query_scalar::<Json<Document>>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(doc.map(|Json(doc)| doc))
    }

    async fn find_many(&self, collection: Collection, query: &Query) -> Result<Vec<Document>> {
        let mut qb = QueryBuilder::new("SELECT doc FROM documents");
        push_scope(&mut qb, collection, &query.filter);

        match &query.sort {
            Some(sort) => {
                qb.push(" ORDER BY (doc -> ");
                qb.push_bind(sort.field.clone());
                qb.push(if sort.descending {
                    ") DESC NULLS LAST, seq"
                } else {
                    ") ASC NULLS FIRST, seq"
                });
            }
            None => {
                qb.push(" ORDER BY seq");
            }
        }

        if let Some(limit) = query.limit {
            qb.push(" LIMIT ");
            qb.push_bind(limit as i64);
        }

        let docs = qb
            .build_query_scalar::<Json<Document>>()
            .fetch_all(&self.pool)
            .await?;

        Ok(docs.into_iter().map(|Json(doc)| doc).collect())
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        mut patch: Document,
    ) -> Result<Option<Document>> {
        patch.remove(ID_FIELD);

        let mut qb = QueryBuilder::new("UPDATE documents SET doc = doc || ");
        qb.push_bind(Json(patch));
        qb.push(" WHERE collection = ");
        qb.push_bind(collection.as_str());
        qb.push(" AND id = ");
        push_first_id(&mut qb, collection, filter);
        qb.push(" RETURNING doc");

        let doc = qb
            .build_query_scalar::<Json<Document>>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(doc.map(|Json(doc)| doc))
    }

    async fn delete_one(&self, collection: Collection, filter: &Filter) -> Result<bool> {
        let mut qb = QueryBuilder::new("DELETE FROM documents WHERE collection = ");
        qb.push_bind(collection.as_str());
        qb.push(" AND id = ");
        push_first_id(&mut qb, collection, filter);

        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, collection: Collection, filter: &Filter) -> Result<u64> {
        let mut qb = QueryBuilder::new("DELETE FROM documents");
        push_scope(&mut qb, collection, filter);

        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM documents");
        push_scope(&mut qb, collection, filter);

        let count = qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn upsert_by_key(
        &self,
        collection: Collection,
        key_fields: &[&str],
        doc: Document,
    ) -> Result<Document> {
        let id = document_id(&doc)?;
        let key = serde_json::to_string(&natural_key(&doc, key_fields))?;

        let mut qb = QueryBuilder::new(
            "INSERT INTO documents (collection, id, natural_key, doc) VALUES (",
        );
        {
            let mut values = qb.separated(", ");
            values.push_bind(collection.as_str());
            values.push_bind(id);
            values.push_bind(key);
            values.push_bind(Json(doc));
        }
        qb.push(
            ") ON CONFLICT (collection, natural_key) DO UPDATE SET doc = documents.doc || (EXCLUDED.doc",
        );
        for field in PRESERVED_ON_UPSERT {
            qb.push(" - ");
            qb.push_bind(*field);
        }
        qb.push(") RETURNING doc");

        let Json(stored) = qb
            .build_query_scalar::<Json<Document>>()
            .fetch_one(&self.pool)
            .await?;

        Ok(stored)
    }
}
