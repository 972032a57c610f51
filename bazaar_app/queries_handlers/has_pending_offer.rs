use async_trait::async_trait;
use std::sync::Arc;

use bazaar_types::errors::MarketError;

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::HasPendingOffer},
    uow::UnitOfWork,
};

pub struct HasPendingOfferHandler {}

impl HasPendingOfferHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<HasPendingOffer> for HasPendingOfferHandler {
    async fn handle(
        &self,
        query: HasPendingOffer,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<HasPendingOffer as Query>::Output, MarketError> {
        let user = uow.users().get_by_username(&query.username).await?;
        let listing = uow
            .listings()
            .get_by_public_id(&query.listing_public_id)
            .await?;

        uow.offers().exists_pending(user.id, listing.id).await
    }
}
