use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_types::errors::DomainError;

use super::new_public_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemCondition {
    New,
    LikeNew,
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingStatus {
    Active,
    Inactive,
    Sold,
    Deleted,
}

impl ListingStatus {
    /// Pure transition function for the listing lifecycle.
    ///
    /// Allowed moves: Active <-> Inactive, {Active, Inactive} -> Sold, and
    /// any non-Deleted state -> Deleted. Everything else is a state
    /// conflict; invalid transitions never silently no-op.
    pub fn transition(self, to: ListingStatus) -> Result<ListingStatus, DomainError> {
        use ListingStatus::*;

        let allowed = matches!(
            (self, to),
            (Active, Inactive)
                | (Inactive, Active)
                | (Active, Sold)
                | (Inactive, Sold)
                | (Active, Deleted)
                | (Inactive, Deleted)
                | (Sold, Deleted)
        );

        if allowed {
            Ok(to)
        } else {
            Err(DomainError::InvalidListingTransition {
                from: format!("{self:?}"),
                to: format!("{to:?}"),
            })
        }
    }
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// One image attached to a listing, owned exclusively by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingImage {
    pub url: String,
    pub display_order: u32,
    pub created_at: DateTime<Utc>,
}

/// Fields required to create a listing.
#[derive(Debug, Clone)]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub condition: ItemCondition,
    pub category_slug: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_negotiable: bool,
}

/// Partial update: a `Some` field overwrites, a `None` field is left alone.
#[derive(Debug, Clone, Default)]
pub struct ListingChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub condition: Option<ItemCondition>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_negotiable: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: Uuid,
    pub public_id: String,
    pub seller_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub condition: ItemCondition,
    pub status: ListingStatus,
    pub category_slug: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_negotiable: bool,
    pub view_count: u32,
    pub favorite_count: u32,
    pub images: Vec<ListingImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Listing {
    pub fn new(seller_id: Uuid, draft: ListingDraft) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            public_id: new_public_id(),
            seller_id,
            title: draft.title,
            description: draft.description,
            price: draft.price,
            condition: draft.condition,
            status: ListingStatus::Active,
            category_slug: draft.category_slug,
            latitude: draft.latitude,
            longitude: draft.longitude,
            is_negotiable: draft.is_negotiable,
            view_count: 0,
            favorite_count: 0,
            images: Vec::new(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Replaces the image set with the given URLs in submitted order,
    /// re-densifying display order from 0.
    pub fn set_images(&mut self, urls: Vec<String>) {
        let now = Utc::now();
        self.images = urls
            .into_iter()
            .enumerate()
            .map(|(order, url)| ListingImage {
                url,
                display_order: order as u32,
                created_at: now,
            })
            .collect();
        self.updated_at = now;
    }

    pub fn image_urls(&self) -> Vec<String> {
        self.images.iter().map(|i| i.url.clone()).collect()
    }

    pub fn apply(&mut self, changes: ListingChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(condition) = changes.condition {
            self.condition = condition;
        }
        if let Some(latitude) = changes.latitude {
            self.latitude = Some(latitude);
        }
        if let Some(longitude) = changes.longitude {
            self.longitude = Some(longitude);
        }
        if let Some(is_negotiable) = changes.is_negotiable {
            self.is_negotiable = is_negotiable;
        }
        self.updated_at = Utc::now();
    }

    pub fn inactivate(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition(ListingStatus::Inactive)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn reactivate(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition(ListingStatus::Active)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn mark_sold(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition(ListingStatus::Sold)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Soft delete: status and deletion timestamp are set together so the
    /// `Deleted` <-> `deleted_at` invariant has a single write site.
    pub fn delete(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition(ListingStatus::Deleted)?;
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    pub fn is_deleted(&self) -> bool {
        self.status == ListingStatus::Deleted
    }

    /// Offers may only target listings still visible for buying.
    pub fn is_offerable(&self) -> bool {
        self.status == ListingStatus::Active
    }

    pub fn record_view(&mut self) {
        self.view_count += 1;
    }
}
