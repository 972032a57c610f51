use uuid::Uuid;

use bazaar_domain::models::offer::PriceOffer;
use bazaar_types::{Result, errors::MarketError};

#[async_trait::async_trait]
pub trait OfferRepository: Send + Sync {
    /// Persists a new offer. The store enforces pending-offer uniqueness
    /// per (buyer, listing) as a backstop against concurrent creates.
    async fn create(&self, offer: &PriceOffer) -> Result<(), MarketError>;

    /// Gets an offer by its public id.
    async fn get_by_public_id(&self, public_id: &str) -> Result<PriceOffer, MarketError>;

    /// Saves an offer's mutable fields (status, message, updated_at).
    async fn save(&self, offer: &PriceOffer) -> Result<(), MarketError>;

    /// All offers on a listing, newest first.
    async fn list_by_listing(&self, listing_id: Uuid) -> Result<Vec<PriceOffer>, MarketError>;

    /// Pending offers on a listing; the accept cascade's working set.
    async fn list_pending_by_listing(
        &self,
        listing_id: Uuid,
    ) -> Result<Vec<PriceOffer>, MarketError>;

    /// Offers made by a buyer, newest first.
    async fn list_by_buyer(&self, buyer_id: Uuid) -> Result<Vec<PriceOffer>, MarketError>;

    /// Offers received across a seller's listings, newest first.
    async fn list_received_by_seller(
        &self,
        seller_id: Uuid,
    ) -> Result<Vec<PriceOffer>, MarketError>;

    /// Whether the buyer already has a pending offer on the listing.
    async fn exists_pending(
        &self,
        buyer_id: Uuid,
        listing_id: Uuid,
    ) -> Result<bool, MarketError>;

    /// The most recent accepted offer on the listing, if any; creation time
    /// descending breaks ties.
    async fn latest_accepted(&self, listing_id: Uuid)
    -> Result<Option<PriceOffer>, MarketError>;
}
