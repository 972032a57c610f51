use bazaar_types::errors::MarketError;
use std::sync::Arc;

use crate::repository::*;

/// A Unit of Work (UoW) works as a provider for repositories
/// that all operate within a single transaction.
#[async_trait::async_trait]
pub trait UnitOfWork<'a>: Send + Sync {
    // Methods to access transactional repositories
    fn users(&self) -> Arc<dyn UserRepository + 'a>;
    fn categories(&self) -> Arc<dyn CategoryRepository + 'a>;
    fn listings(&self) -> Arc<dyn ListingRepository + 'a>;
    fn offers(&self) -> Arc<dyn OfferRepository + 'a>;

    // Transaction control methods
    // Consume self to ensure the UoW is not used after commit/rollback
    async fn commit(self: Box<Self>) -> Result<(), MarketError>;
    async fn rollback(self: Box<Self>) -> Result<(), MarketError>;
}

/// A factory for creating Unit of Work instances.
#[async_trait::async_trait]
pub trait UnitOfWorkProvider: Send + Sync {
    /// Begin a new Unit of Work (transaction).
    async fn begin<'p>(&'p self) -> Result<Box<dyn UnitOfWork<'p> + 'p>, MarketError>;
}
