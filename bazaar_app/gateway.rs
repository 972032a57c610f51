use async_trait::async_trait;

use bazaar_domain::models::offer::OfferStatus;
use bazaar_types::errors::StorageError;

/// A raw image blob as submitted by the caller. Order of payloads within a
/// request is significant: the first becomes display order 0.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Port to the external object storage. Calls are synchronous from the
/// request's point of view and are never retried by the engine; a failed
/// upload fails the whole operation after compensation.
#[async_trait]
pub trait ObjectStorageGateway: Send + Sync {
    /// Stores a blob and returns its durable URL.
    async fn upload(&self, payload: &ImagePayload) -> Result<String, StorageError>;

    /// Deletes a single object. Best-effort from the engine's side.
    async fn delete_by_url(&self, url: &str) -> Result<(), StorageError>;

    /// Deletes a batch of objects. Best-effort from the engine's side.
    async fn delete_batch(&self, urls: &[String]) -> Result<(), StorageError>;
}

/// Port to the notification side channel. Fire-and-forget: the bus calls
/// these after the transaction commits and ignores failures beyond logging.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_new_offer(
        &self,
        seller_username: &str,
        buyer_username: &str,
        listing_public_id: &str,
    ) -> Result<(), String>;

    async fn notify_offer_status_change(
        &self,
        buyer_username: &str,
        listing_public_id: &str,
        status: OfferStatus,
    ) -> Result<(), String>;

    async fn notify_offer_canceled(
        &self,
        seller_username: &str,
        buyer_username: &str,
        listing_public_id: &str,
    ) -> Result<(), String>;
}
