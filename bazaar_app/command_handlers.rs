mod accept_offer;
mod cancel_offer;
mod create_listing;
mod create_offer;
mod delete_listing;
mod helpers;
mod inactivate_listing;
mod mark_listing_sold;
mod reactivate_listing;
mod reject_offer;
mod update_listing;
mod view_listing;

pub use accept_offer::AcceptOfferCommandHandler;
pub use cancel_offer::CancelOfferCommandHandler;
pub use create_listing::CreateListingCommandHandler;
pub use create_offer::CreateOfferCommandHandler;
pub use delete_listing::DeleteListingCommandHandler;
pub use inactivate_listing::InactivateListingCommandHandler;
pub use mark_listing_sold::MarkListingSoldCommandHandler;
pub use reactivate_listing::ReactivateListingCommandHandler;
pub use reject_offer::RejectOfferCommandHandler;
pub use update_listing::UpdateListingCommandHandler;
pub use view_listing::ViewListingCommandHandler;
