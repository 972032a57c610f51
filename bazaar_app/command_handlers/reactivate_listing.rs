use std::sync::Arc;

use bazaar_types::errors::MarketError;

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::ReactivateListing},
    notification::NotificationOutbox,
    uow::UnitOfWork,
};

use super::helpers::load_listing_for_seller;

pub struct ReactivateListingCommandHandler {}

impl ReactivateListingCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<ReactivateListing> for ReactivateListingCommandHandler {
    async fn handle(
        &self,
        command: ReactivateListing,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
        _outbox: &NotificationOutbox,
    ) -> Result<(), MarketError> {
        let (_user, mut listing) =
            load_listing_for_seller(uow, &command.listing_public_id, &command.username).await?;

        listing.reactivate()?;
        uow.listings().save(&listing).await?;

        Ok(())
    }
}
