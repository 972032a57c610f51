use sqlx::{Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use bazaar_app::repository::UserRepository;
use bazaar_domain::models::user::User;
use bazaar_types::errors::{AuthError, DbError, MarketError};

use crate::models as db_models;

#[derive(Clone)]
pub struct PostgresUserRepository<'a> {
    tx: Arc<Mutex<Transaction<'a, Postgres>>>,
}

impl<'a> PostgresUserRepository<'a> {
    pub fn new(tx: Arc<Mutex<Transaction<'a, Postgres>>>) -> Self {
        Self { tx }
    }
}

#[async_trait::async_trait]
impl<'a> UserRepository for PostgresUserRepository<'a> {
    async fn get_by_username(&self, username: &str) -> Result<User, MarketError> {
        let mut tx_guard = self.tx.lock().await;
        let rec = sqlx::query_as::<_, db_models::User>(
            r#"
            SELECT id, username, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| MarketError::Db(DbError::Database(e)))?
        .ok_or_else(|| MarketError::Auth(AuthError::UnknownUser(username.to_string())))?;

        Ok(rec.into())
    }

    async fn get_by_id(&self, user_id: Uuid) -> Result<User, MarketError> {
        let mut tx_guard = self.tx.lock().await;
        let rec = sqlx::query_as::<_, db_models::User>(
            r#"
            SELECT id, username, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| MarketError::Db(DbError::Database(e)))?
        .ok_or(MarketError::Db(DbError::UserByIdNotFound(user_id)))?;

        Ok(rec.into())
    }
}
