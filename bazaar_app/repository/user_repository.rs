use uuid::Uuid;

use bazaar_domain::models::user::User;
use bazaar_types::{Result, errors::MarketError};

/// Identity lookup for the calling side. Resolution fails closed: an
/// unknown username surfaces as an authorization error, never as an
/// anonymous default.
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Resolves a caller identity by username.
    async fn get_by_username(&self, username: &str) -> Result<User, MarketError>;

    /// Gets a user by internal id.
    async fn get_by_id(&self, user_id: Uuid) -> Result<User, MarketError>;
}
