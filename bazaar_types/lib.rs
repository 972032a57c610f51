pub mod errors;

pub use errors::{AuthError, DbError, DomainError, MarketError, Result, StorageError};
