use bazaar_domain::models::offer::PriceOffer;

use crate::cqrs::Query;

/// Fetch a single offer; only the buyer or the listing's seller may see it.
#[derive(Debug, Clone)]
pub struct GetOffer {
    pub offer_public_id: String,
    pub username: String,
}

impl Query for GetOffer {
    type Output = PriceOffer;
}

/// All offers on a listing, seller-only.
#[derive(Debug, Clone)]
pub struct ListOffersForListing {
    pub listing_public_id: String,
    pub username: String,
}

impl Query for ListOffersForListing {
    type Output = Vec<PriceOffer>;
}

/// Offers the user has made as a buyer.
#[derive(Debug, Clone)]
pub struct ListSentOffers {
    pub username: String,
}

impl Query for ListSentOffers {
    type Output = Vec<PriceOffer>;
}

/// Offers received across all of the user's listings.
#[derive(Debug, Clone)]
pub struct ListReceivedOffers {
    pub username: String,
}

impl Query for ListReceivedOffers {
    type Output = Vec<PriceOffer>;
}

#[derive(Debug, Clone)]
pub struct HasPendingOffer {
    pub username: String,
    pub listing_public_id: String,
}

impl Query for HasPendingOffer {
    type Output = bool;
}

/// The current accepted offer on a listing: latest by creation time wins.
#[derive(Debug, Clone)]
pub struct GetAcceptedOffer {
    pub listing_public_id: String,
}

impl Query for GetAcceptedOffer {
    type Output = Option<PriceOffer>;
}
