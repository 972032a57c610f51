use thiserror::Error;
use uuid::Uuid;

/// Errors for db stuff.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Listing '{0}' not found")]
    ListingNotFound(String),

    #[error("Offer '{0}' not found")]
    OfferNotFound(String),

    #[error("Category '{0}' not found")]
    CategoryNotFound(String),

    #[error("User with ID {0} not found")]
    UserByIdNotFound(Uuid),

    #[error("Inconsistent record: {0}")]
    Inconsistent(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("Transaction error: {0}")]
    Transaction(String),
}
