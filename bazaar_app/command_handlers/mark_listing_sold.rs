use std::sync::Arc;

use bazaar_types::errors::MarketError;

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::MarkListingSold},
    notification::NotificationOutbox,
    uow::UnitOfWork,
};

use super::helpers::load_listing_for_seller;

/// Marking as sold is a deliberate seller action; accepting an offer never
/// triggers it implicitly.
pub struct MarkListingSoldCommandHandler {}

impl MarkListingSoldCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<MarkListingSold> for MarkListingSoldCommandHandler {
    async fn handle(
        &self,
        command: MarkListingSold,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
        _outbox: &NotificationOutbox,
    ) -> Result<(), MarketError> {
        let (_user, mut listing) =
            load_listing_for_seller(uow, &command.listing_public_id, &command.username).await?;

        listing.mark_sold()?;
        uow.listings().save(&listing).await?;

        Ok(())
    }
}
