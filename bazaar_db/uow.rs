use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;

use bazaar_app::{
    repository::*,
    uow::{UnitOfWork, UnitOfWorkProvider},
};
use bazaar_types::errors::{DbError, MarketError};

use crate::repository::*;

#[derive(Debug, Clone)]
pub struct PostgresUnitOfWorkProvider {
    pool: PgPool,
}

impl PostgresUnitOfWorkProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UnitOfWorkProvider for PostgresUnitOfWorkProvider {
    async fn begin<'p>(&'p self) -> Result<Box<dyn UnitOfWork<'p> + 'p>, MarketError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| MarketError::Db(DbError::Database(e)))?;

        // Transaction must be 'static to be stored in Arc.
        let tx_arc = Arc::new(Mutex::new(tx));

        Ok(Box::new(PostgresUnitOfWork { tx: tx_arc }))
    }
}

#[derive(Debug, Clone)]
pub struct PostgresUnitOfWork<'a> {
    tx: Arc<Mutex<Transaction<'a, Postgres>>>,
}

#[async_trait::async_trait]
impl<'a> UnitOfWork<'a> for PostgresUnitOfWork<'a> {
    fn users(&self) -> Arc<dyn UserRepository + 'a> {
        Arc::new(PostgresUserRepository::new(self.tx.clone()))
    }

    fn categories(&self) -> Arc<dyn CategoryRepository + 'a> {
        Arc::new(PostgresCategoryRepository::new(self.tx.clone()))
    }

    fn listings(&self) -> Arc<dyn ListingRepository + 'a> {
        Arc::new(PostgresListingRepository::new(self.tx.clone()))
    }

    fn offers(&self) -> Arc<dyn OfferRepository + 'a> {
        Arc::new(PostgresOfferRepository::new(self.tx.clone()))
    }

    async fn commit(self: Box<Self>) -> Result<(), MarketError> {
        // Try to unwrap the Arc to get ownership of the Mutex<Transaction>.
        // If this fails, it means there are other references to the Arc,
        // the transaction cannot be committed (logical error) and will rollback on Drop.
        if let Ok(mutex) = Arc::try_unwrap(self.tx) {
            mutex
                .into_inner()
                .commit()
                .await
                .map_err(|e| MarketError::Db(DbError::Database(e)))?;
        } else {
            return Err(MarketError::Db(DbError::Transaction(
                "transaction still has multiple owners".to_string(),
            )));
        }
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), MarketError> {
        if let Ok(mutex) = Arc::try_unwrap(self.tx) {
            mutex
                .into_inner()
                .rollback()
                .await
                .map_err(|e| MarketError::Db(DbError::Database(e)))?;
        }
        Ok(())
    }
}
