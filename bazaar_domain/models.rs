use uuid::Uuid;

pub mod category;
pub mod listing;
pub mod offer;
pub mod user;

/// Opaque externally-exposed identifier, distinct from the internal key.
pub(crate) fn new_public_id() -> String {
    Uuid::new_v4().simple().to_string()
}
