use std::sync::Arc;

use bazaar_types::errors::MarketError;

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::DeleteListing},
    notification::NotificationOutbox,
    uow::UnitOfWork,
};

use super::helpers::load_listing_for_seller;

pub struct DeleteListingCommandHandler {}

impl DeleteListingCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<DeleteListing> for DeleteListingCommandHandler {
    async fn handle(
        &self,
        command: DeleteListing,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
        _outbox: &NotificationOutbox,
    ) -> Result<(), MarketError> {
        let (_user, mut listing) =
            load_listing_for_seller(uow, &command.listing_public_id, &command.username).await?;

        // Soft delete: status and timestamp land together; image rows stay
        // with the dead listing and every not-deleted read path skips it.
        listing.delete()?;
        uow.listings().save(&listing).await?;

        Ok(())
    }
}
