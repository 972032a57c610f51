mod category_repository;
mod listing_repository;
mod offer_repository;
mod user_repository;

pub use category_repository::CategoryRepository;
pub use listing_repository::ListingRepository;
pub use offer_repository::OfferRepository;
pub use user_repository::UserRepository;
