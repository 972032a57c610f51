use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A node in the category tree. Listings may only attach to leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub parent_slug: Option<String>,
    /// Whether the node has no children. Maintained by the category store.
    pub leaf: bool,
}

impl Category {
    pub fn is_leaf(&self) -> bool {
        self.leaf
    }
}
