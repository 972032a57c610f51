use thiserror::Error;

pub mod auth_error;
pub mod db_error;
pub mod domain_error;
pub mod storage_error;

pub use auth_error::AuthError;
pub use db_error::DbError;
pub use domain_error::DomainError;
pub use storage_error::StorageError;

pub type Result<T, E = MarketError> = std::result::Result<T, E>;

/// Top-level error for the marketplace engine.
///
/// The four domain-specific variants map one-to-one onto the outcomes an
/// embedding layer needs to distinguish: state conflicts (`Domain`),
/// ownership/identity failures (`Auth`), missing records and database
/// failures (`Db`), and object-storage failures (`Storage`).
#[derive(Debug, Error)]
pub enum MarketError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
