use bazaar_domain::models::category::Category;
use bazaar_types::{Result, errors::MarketError};

#[async_trait::async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Gets a category by slug, with its leaf flag resolved against the
    /// current tree.
    async fn get_by_slug(&self, slug: &str) -> Result<Category, MarketError>;
}
