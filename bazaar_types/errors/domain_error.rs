use thiserror::Error;

/// Errors for domain logic (negotiation and lifecycle rules).
///
/// Every variant is a state conflict: the entity exists and the caller is
/// allowed to touch it, but the operation is not legal in its current state.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Listing cannot go from {from} to {to}")]
    InvalidListingTransition { from: String, to: String },

    #[error("Only pending offers can be {action}")]
    OfferNotPending { action: &'static str },

    #[error("You cannot make an offer on your own listing")]
    SelfOffer,

    #[error("You already have a pending offer for this listing")]
    DuplicatePendingOffer,

    #[error("Listing is not open for offers")]
    ListingNotOfferable,

    #[error("Listing has been deleted")]
    ListingDeleted,

    #[error("Category '{0}' is not a leaf category")]
    NotLeafCategory(String),

    #[error("Offer amount must be greater than zero")]
    NonPositiveAmount,

    #[error("Offer amount cannot exceed the listing price")]
    AmountExceedsPrice,

    #[error("Unexpected target status '{0}' for this operation")]
    WrongTargetStatus(String),

    #[error("A listing allows at most {0} images")]
    TooManyImages(usize),
}
