use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A marketplace account, as the engine sees it. Credentials and sessions
/// live outside the engine; only identity crosses the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: Uuid, username: String) -> Self {
        Self {
            id,
            username,
            created_at: Utc::now(),
        }
    }
}
