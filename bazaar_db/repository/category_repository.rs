use sqlx::{Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;

use bazaar_app::repository::CategoryRepository;
use bazaar_domain::models::category::Category;
use bazaar_types::errors::{DbError, MarketError};

use crate::models as db_models;

#[derive(Clone)]
pub struct PostgresCategoryRepository<'a> {
    tx: Arc<Mutex<Transaction<'a, Postgres>>>,
}

impl<'a> PostgresCategoryRepository<'a> {
    pub fn new(tx: Arc<Mutex<Transaction<'a, Postgres>>>) -> Self {
        Self { tx }
    }
}

#[async_trait::async_trait]
impl<'a> CategoryRepository for PostgresCategoryRepository<'a> {
    async fn get_by_slug(&self, slug: &str) -> Result<Category, MarketError> {
        let mut tx_guard = self.tx.lock().await;
        let rec = sqlx::query_as::<_, db_models::Category>(
            r#"
            SELECT c.id, c.slug, c.name, c.parent_slug,
                   NOT EXISTS (
                       SELECT 1 FROM categories child
                       WHERE child.parent_slug = c.slug
                   ) AS leaf
            FROM categories c
            WHERE c.slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| MarketError::Db(DbError::Database(e)))?
        .ok_or_else(|| MarketError::Db(DbError::CategoryNotFound(slug.to_string())))?;

        Ok(rec.into())
    }
}
