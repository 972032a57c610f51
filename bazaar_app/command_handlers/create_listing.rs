use std::sync::Arc;

use bazaar_domain::models::listing::Listing;
use bazaar_types::errors::{DomainError, MarketError};

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::CreateListing},
    gateway::ObjectStorageGateway,
    notification::NotificationOutbox,
    uow::UnitOfWork,
};

use super::helpers::upload_in_order;

pub struct CreateListingCommandHandler {
    storage: Arc<dyn ObjectStorageGateway>,
}

impl CreateListingCommandHandler {
    pub fn new(storage: Arc<dyn ObjectStorageGateway>) -> Self {
        Self { storage }
    }
}

#[async_trait::async_trait]
impl CommandHandler<CreateListing> for CreateListingCommandHandler {
    async fn handle(
        &self,
        command: CreateListing,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
        _outbox: &NotificationOutbox,
    ) -> Result<Listing, MarketError> {
        let seller = uow.users().get_by_username(&command.username).await?;

        let category = uow
            .categories()
            .get_by_slug(&command.draft.category_slug)
            .await?;
        if !category.is_leaf() {
            return Err(MarketError::Domain(DomainError::NotLeafCategory(
                category.slug,
            )));
        }

        if command.images.len() > config.max_images_per_listing {
            return Err(MarketError::Domain(DomainError::TooManyImages(
                config.max_images_per_listing,
            )));
        }

        // Upload first: the listing is only ever persisted with its full
        // image set, and a failed upload leaves no stored row behind.
        let urls = upload_in_order(self.storage.as_ref(), &command.images).await?;

        let mut listing = Listing::new(seller.id, command.draft);
        listing.set_images(urls);

        uow.listings().create(&listing).await?;

        Ok(listing)
    }
}
