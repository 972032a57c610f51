mod category_repository;
mod listing_repository;
mod offer_repository;
mod user_repository;

pub use category_repository::PostgresCategoryRepository;
pub use listing_repository::PostgresListingRepository;
pub use offer_repository::PostgresOfferRepository;
pub use user_repository::PostgresUserRepository;
