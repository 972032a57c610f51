use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{
    category::Category,
    listing::{ItemCondition, Listing, ListingDraft, ListingStatus},
    offer::{OfferStatus, PriceOffer},
    user::User,
};

#[derive(Default, Clone)]
pub struct UserFactoryOptions<'a> {
    pub id: Option<Uuid>,
    pub username: Option<&'a str>,
}

#[derive(Default, Clone)]
pub struct CategoryFactoryOptions<'a> {
    pub slug: Option<&'a str>,
    pub parent_slug: Option<&'a str>,
    pub leaf: Option<bool>,
}

#[derive(Default, Clone)]
pub struct ListingFactoryOptions<'a> {
    pub seller: Option<User>,
    pub title: Option<&'a str>,
    pub price: Option<Decimal>,
    pub condition: Option<ItemCondition>,
    pub status: Option<ListingStatus>,
    pub category_slug: Option<&'a str>,
    pub is_negotiable: Option<bool>,
    pub image_urls: Option<Vec<String>>,
}

#[derive(Default, Clone)]
pub struct OfferFactoryOptions<'a> {
    pub listing: Option<Listing>,
    pub buyer: Option<User>,
    pub amount: Option<Decimal>,
    pub message: Option<&'a str>,
    pub status: Option<OfferStatus>,
}

pub fn user_factory(options: UserFactoryOptions) -> User {
    let id = options.id.unwrap_or_else(Uuid::new_v4);
    let username = options
        .username
        .map(str::to_string)
        .unwrap_or_else(|| format!("user_{}", &id.simple().to_string()[..8]));

    User::new(id, username)
}

pub fn category_factory(options: CategoryFactoryOptions) -> Category {
    let slug = options.slug.unwrap_or("bikes").to_string();

    Category {
        id: Uuid::new_v4(),
        name: slug.clone(),
        slug,
        parent_slug: options.parent_slug.map(str::to_string),
        leaf: options.leaf.unwrap_or(true),
    }
}

pub fn listing_factory(options: ListingFactoryOptions) -> Listing {
    let seller = options
        .seller
        .unwrap_or_else(|| user_factory(Default::default()));

    let mut listing = Listing::new(
        seller.id,
        ListingDraft {
            title: options.title.unwrap_or("Road bike").to_string(),
            description: "Barely used".to_string(),
            price: options.price.unwrap_or_else(|| Decimal::new(6000, 2)),
            condition: options.condition.unwrap_or(ItemCondition::Good),
            category_slug: options.category_slug.unwrap_or("bikes").to_string(),
            latitude: None,
            longitude: None,
            is_negotiable: options.is_negotiable.unwrap_or(true),
        },
    );

    if let Some(urls) = options.image_urls {
        listing.set_images(urls);
    }

    // Factories may need terminal states the constructor forbids.
    if let Some(status) = options.status {
        listing.status = status;
        if status == ListingStatus::Deleted {
            listing.deleted_at = Some(listing.updated_at);
        }
    }

    listing
}

pub fn offer_factory(options: OfferFactoryOptions) -> PriceOffer {
    let listing = options
        .listing
        .unwrap_or_else(|| listing_factory(Default::default()));
    let buyer = options
        .buyer
        .unwrap_or_else(|| user_factory(Default::default()));

    let mut offer = PriceOffer::new(
        listing.id,
        buyer.id,
        options.amount.unwrap_or_else(|| Decimal::new(5000, 2)),
        options.message.map(str::to_string),
    );

    if let Some(status) = options.status {
        offer.status = status;
    }

    offer
}
