use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_types::errors::DomainError;

use super::new_public_id;

/// Prefix applied to the message of a buyer-canceled offer so readers can
/// tell cancellation apart from a seller rejection.
pub const CANCELED_PREFIX: &str = "(canceled by buyer) ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
    /// Reserved for an external expiry process; nothing in the engine
    /// produces this status.
    Expired,
}

impl std::fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceOffer {
    pub id: Uuid,
    pub public_id: String,
    pub listing_id: Uuid,
    pub buyer_id: Uuid,
    pub amount: Decimal,
    pub message: Option<String>,
    pub status: OfferStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PriceOffer {
    pub fn new(listing_id: Uuid, buyer_id: Uuid, amount: Decimal, message: Option<String>) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            public_id: new_public_id(),
            listing_id,
            buyer_id,
            amount,
            message,
            status: OfferStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == OfferStatus::Pending
    }

    /// Seller accepts. The optional note replaces the offer message.
    pub fn accept(&mut self, note: Option<String>) -> Result<(), DomainError> {
        self.require_pending("accepted")?;
        self.status = OfferStatus::Accepted;
        if note.is_some() {
            self.message = note;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Seller rejects. The optional note replaces the offer message.
    pub fn reject(&mut self, note: Option<String>) -> Result<(), DomainError> {
        self.require_pending("rejected")?;
        self.status = OfferStatus::Rejected;
        if note.is_some() {
            self.message = note;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Buyer withdraws their own offer. Reuses the Rejected terminal state,
    /// prefixing the message so the two paths stay distinguishable.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        self.require_pending("canceled")?;
        self.status = OfferStatus::Rejected;
        let original = self.message.take().unwrap_or_default();
        self.message = Some(format!("{CANCELED_PREFIX}{original}"));
        self.updated_at = Utc::now();
        Ok(())
    }

    fn require_pending(&self, action: &'static str) -> Result<(), DomainError> {
        if self.is_pending() {
            Ok(())
        } else {
            Err(DomainError::OfferNotPending { action })
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::*;

    fn pending_offer() -> PriceOffer {
        PriceOffer::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Decimal::new(5000, 2),
            Some("Would you take $50?".to_string()),
        )
    }

    #[test]
    fn new_offer_is_pending() {
        let offer = pending_offer();
        assert_eq!(offer.status, OfferStatus::Pending);
        assert!(offer.is_pending());
    }

    #[test]
    fn accept_sets_status_and_note() {
        let mut offer = pending_offer();

        offer.accept(Some("Deal.".to_string())).unwrap();
        assert_eq!(offer.status, OfferStatus::Accepted);
        assert_eq!(offer.message.as_deref(), Some("Deal."));
    }

    #[test]
    fn accept_without_note_keeps_message() {
        let mut offer = pending_offer();

        offer.accept(None).unwrap();
        assert_eq!(offer.message.as_deref(), Some("Would you take $50?"));
    }

    #[test]
    fn accepted_offer_cannot_be_rejected_or_canceled() {
        let mut offer = pending_offer();
        offer.accept(None).unwrap();

        assert!(matches!(
            offer.reject(None).unwrap_err(),
            DomainError::OfferNotPending { .. }
        ));
        assert!(offer.cancel().is_err());
        assert_eq!(offer.status, OfferStatus::Accepted);
    }

    #[test]
    fn cancel_prefixes_and_preserves_message() {
        let mut offer = pending_offer();

        offer.cancel().unwrap();
        assert_eq!(offer.status, OfferStatus::Rejected);
        assert_eq!(
            offer.message.as_deref(),
            Some("(canceled by buyer) Would you take $50?")
        );
    }

    #[test]
    fn cancel_with_no_message_still_carries_marker() {
        let mut offer = PriceOffer::new(Uuid::new_v4(), Uuid::new_v4(), Decimal::ONE, None);

        offer.cancel().unwrap();
        assert_eq!(offer.message.as_deref(), Some(CANCELED_PREFIX));
    }
}
