use rust_decimal::Decimal;

use bazaar_domain::models::{
    listing::{Listing, ListingChanges, ListingDraft},
    offer::{OfferStatus, PriceOffer},
};

use crate::{cqrs::Command, gateway::ImagePayload};

/// Create a listing with zero or more image payloads, order-significant.
#[derive(Debug, Clone)]
pub struct CreateListing {
    pub username: String,
    pub draft: ListingDraft,
    pub images: Vec<ImagePayload>,
}

impl Command for CreateListing {
    type Output = Listing;
}

/// Partial update. The image field has three meanings: `None` leaves the
/// image set untouched, `Some(vec![])` clears it, and a non-empty list
/// replaces it wholesale.
#[derive(Debug, Clone)]
pub struct UpdateListing {
    pub listing_public_id: String,
    pub username: String,
    pub changes: ListingChanges,
    pub images: Option<Vec<ImagePayload>>,
}

impl Command for UpdateListing {
    type Output = Listing;
}

#[derive(Debug, Clone)]
pub struct DeleteListing {
    pub listing_public_id: String,
    pub username: String,
}

impl Command for DeleteListing {
    type Output = ();
}

#[derive(Debug, Clone)]
pub struct InactivateListing {
    pub listing_public_id: String,
    pub username: String,
}

impl Command for InactivateListing {
    type Output = ();
}

#[derive(Debug, Clone)]
pub struct ReactivateListing {
    pub listing_public_id: String,
    pub username: String,
}

impl Command for ReactivateListing {
    type Output = ();
}

#[derive(Debug, Clone)]
pub struct MarkListingSold {
    pub listing_public_id: String,
    pub username: String,
}

impl Command for MarkListingSold {
    type Output = ();
}

/// Public single-listing read. A command rather than a query because each
/// view persists a counter increment.
#[derive(Debug, Clone)]
pub struct ViewListing {
    pub listing_public_id: String,
    pub username: String,
}

impl Command for ViewListing {
    type Output = Listing;
}

#[derive(Debug, Clone)]
pub struct CreateOffer {
    pub listing_public_id: String,
    pub username: String,
    pub amount: Decimal,
    pub message: Option<String>,
}

impl Command for CreateOffer {
    type Output = PriceOffer;
}

/// Seller accepts an offer. `status` is the intended target status from the
/// request and must be `Accepted`; anything else is rejected so accept and
/// reject stay separate operations.
#[derive(Debug, Clone)]
pub struct AcceptOffer {
    pub offer_public_id: String,
    pub username: String,
    pub status: OfferStatus,
    pub note: Option<String>,
}

impl Command for AcceptOffer {
    type Output = PriceOffer;
}

#[derive(Debug, Clone)]
pub struct RejectOffer {
    pub offer_public_id: String,
    pub username: String,
    pub status: OfferStatus,
    pub note: Option<String>,
}

impl Command for RejectOffer {
    type Output = PriceOffer;
}

#[derive(Debug, Clone)]
pub struct CancelOffer {
    pub offer_public_id: String,
    pub username: String,
}

impl Command for CancelOffer {
    type Output = ();
}
