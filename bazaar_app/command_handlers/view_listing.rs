use std::sync::Arc;

use bazaar_domain::models::listing::Listing;
use bazaar_types::errors::{DbError, MarketError};

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::ViewListing},
    notification::NotificationOutbox,
    uow::UnitOfWork,
};

/// Fetches one listing for display and bumps its view counter. The counter
/// is skipped when the viewer is the seller, so sellers refreshing their own
/// page don't inflate it.
pub struct ViewListingCommandHandler {}

impl ViewListingCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<ViewListing> for ViewListingCommandHandler {
    async fn handle(
        &self,
        command: ViewListing,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
        _outbox: &NotificationOutbox,
    ) -> Result<Listing, MarketError> {
        let user = uow.users().get_by_username(&command.username).await?;
        let mut listing = uow
            .listings()
            .get_by_public_id(&command.listing_public_id)
            .await?;

        // Soft-deleted listings are invisible here: not-found, not conflict.
        if listing.is_deleted() {
            return Err(MarketError::Db(DbError::ListingNotFound(
                command.listing_public_id,
            )));
        }

        if listing.seller_id != user.id {
            uow.listings().increment_views(&listing.public_id).await?;
            listing.record_view();
        }

        Ok(listing)
    }
}
