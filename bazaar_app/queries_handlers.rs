mod get_accepted_offer;
mod get_offer;
mod has_pending_offer;
mod list_offers_for_listing;
mod list_received_offers;
mod list_sent_offers;

pub use get_accepted_offer::GetAcceptedOfferHandler;
pub use get_offer::GetOfferHandler;
pub use has_pending_offer::HasPendingOfferHandler;
pub use list_offers_for_listing::ListOffersForListingHandler;
pub use list_received_offers::ListReceivedOffersHandler;
pub use list_sent_offers::ListSentOffersHandler;
