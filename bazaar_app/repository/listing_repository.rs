use uuid::Uuid;

use bazaar_domain::models::listing::Listing;
use bazaar_types::{Result, errors::MarketError};

#[async_trait::async_trait]
pub trait ListingRepository: Send + Sync {
    /// Persists a new listing together with its ordered image rows in one
    /// unit.
    async fn create(&self, listing: &Listing) -> Result<(), MarketError>;

    /// Gets a listing by its public id, images included. Soft-deleted
    /// listings are returned too; visibility filtering is the caller's
    /// decision so state conflicts stay distinguishable from not-found.
    async fn get_by_public_id(&self, public_id: &str) -> Result<Listing, MarketError>;

    /// Gets a listing by internal id, images included.
    async fn get_by_id(&self, listing_id: Uuid) -> Result<Listing, MarketError>;

    /// Saves listing fields and replaces the image rows with the listing's
    /// current image list.
    async fn save(&self, listing: &Listing) -> Result<(), MarketError>;

    /// Store-side view counter bump; each call is intentionally a new view.
    async fn increment_views(&self, public_id: &str) -> Result<(), MarketError>;
}
