use bazaar_domain::models::{self as domain_models, listing, offer};
use bazaar_types::errors::DbError;

use crate::models::{self as db_models};

impl From<db_models::ListingStatus> for listing::ListingStatus {
    fn from(status: db_models::ListingStatus) -> Self {
        match status {
            db_models::ListingStatus::Active => listing::ListingStatus::Active,
            db_models::ListingStatus::Inactive => listing::ListingStatus::Inactive,
            db_models::ListingStatus::Sold => listing::ListingStatus::Sold,
            db_models::ListingStatus::Deleted => listing::ListingStatus::Deleted,
        }
    }
}

impl From<listing::ListingStatus> for db_models::ListingStatus {
    fn from(status: listing::ListingStatus) -> Self {
        match status {
            listing::ListingStatus::Active => db_models::ListingStatus::Active,
            listing::ListingStatus::Inactive => db_models::ListingStatus::Inactive,
            listing::ListingStatus::Sold => db_models::ListingStatus::Sold,
            listing::ListingStatus::Deleted => db_models::ListingStatus::Deleted,
        }
    }
}

impl From<db_models::ItemCondition> for listing::ItemCondition {
    fn from(condition: db_models::ItemCondition) -> Self {
        match condition {
            db_models::ItemCondition::New => listing::ItemCondition::New,
            db_models::ItemCondition::LikeNew => listing::ItemCondition::LikeNew,
            db_models::ItemCondition::Good => listing::ItemCondition::Good,
            db_models::ItemCondition::Fair => listing::ItemCondition::Fair,
            db_models::ItemCondition::Poor => listing::ItemCondition::Poor,
        }
    }
}

impl From<listing::ItemCondition> for db_models::ItemCondition {
    fn from(condition: listing::ItemCondition) -> Self {
        match condition {
            listing::ItemCondition::New => db_models::ItemCondition::New,
            listing::ItemCondition::LikeNew => db_models::ItemCondition::LikeNew,
            listing::ItemCondition::Good => db_models::ItemCondition::Good,
            listing::ItemCondition::Fair => db_models::ItemCondition::Fair,
            listing::ItemCondition::Poor => db_models::ItemCondition::Poor,
        }
    }
}

impl From<db_models::OfferStatus> for offer::OfferStatus {
    fn from(status: db_models::OfferStatus) -> Self {
        match status {
            db_models::OfferStatus::Pending => offer::OfferStatus::Pending,
            db_models::OfferStatus::Accepted => offer::OfferStatus::Accepted,
            db_models::OfferStatus::Rejected => offer::OfferStatus::Rejected,
            db_models::OfferStatus::Expired => offer::OfferStatus::Expired,
        }
    }
}

impl From<offer::OfferStatus> for db_models::OfferStatus {
    fn from(status: offer::OfferStatus) -> Self {
        match status {
            offer::OfferStatus::Pending => db_models::OfferStatus::Pending,
            offer::OfferStatus::Accepted => db_models::OfferStatus::Accepted,
            offer::OfferStatus::Rejected => db_models::OfferStatus::Rejected,
            offer::OfferStatus::Expired => db_models::OfferStatus::Expired,
        }
    }
}

impl From<db_models::User> for domain_models::user::User {
    fn from(user: db_models::User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
        }
    }
}

impl From<db_models::Category> for domain_models::category::Category {
    fn from(category: db_models::Category) -> Self {
        Self {
            id: category.id,
            slug: category.slug,
            name: category.name,
            parent_slug: category.parent_slug,
            leaf: category.leaf,
        }
    }
}

impl From<db_models::PriceOffer> for offer::PriceOffer {
    fn from(row: db_models::PriceOffer) -> Self {
        Self {
            id: row.id,
            public_id: row.public_id,
            listing_id: row.listing_id,
            buyer_id: row.buyer_id,
            amount: row.amount,
            message: row.message,
            status: row.status.into(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A listing row together with its image rows, ready to hydrate the domain
/// model in one step.
pub struct ListingAggregate {
    pub listing: db_models::Listing,
    pub images: Vec<db_models::ListingImage>,
}

impl TryFrom<ListingAggregate> for listing::Listing {
    type Error = DbError;

    fn try_from(agg: ListingAggregate) -> Result<Self, Self::Error> {
        let row = agg.listing;
        let status: listing::ListingStatus = row.status.into();

        // The Deleted status and the deletion timestamp must move together;
        // a row with only one of the two is corrupt.
        match (status, row.deleted_at) {
            (listing::ListingStatus::Deleted, None) => {
                return Err(DbError::Inconsistent(format!(
                    "listing {} is DELETED without deleted_at",
                    row.public_id
                )));
            }
            (listing::ListingStatus::Active, Some(_))
            | (listing::ListingStatus::Inactive, Some(_))
            | (listing::ListingStatus::Sold, Some(_)) => {
                return Err(DbError::Inconsistent(format!(
                    "listing {} has deleted_at but is not DELETED",
                    row.public_id
                )));
            }
            _ => {}
        }

        let mut images = agg.images;
        images.sort_by_key(|i| i.display_order);

        Ok(Self {
            id: row.id,
            public_id: row.public_id,
            seller_id: row.seller_id,
            title: row.title,
            description: row.description,
            price: row.price,
            condition: row.condition.into(),
            status,
            category_slug: row.category_slug,
            latitude: row.latitude,
            longitude: row.longitude,
            is_negotiable: row.is_negotiable,
            view_count: row.view_count as u32,
            favorite_count: row.favorite_count as u32,
            images: images
                .into_iter()
                .map(|i| listing::ListingImage {
                    url: i.url,
                    display_order: i.display_order as u32,
                    created_at: i.created_at,
                })
                .collect(),
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}
