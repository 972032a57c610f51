use async_trait::async_trait;
use std::sync::Arc;

use bazaar_types::errors::{AuthError, MarketError};

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::ListOffersForListing},
    uow::UnitOfWork,
};

pub struct ListOffersForListingHandler {}

impl ListOffersForListingHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<ListOffersForListing> for ListOffersForListingHandler {
    async fn handle(
        &self,
        query: ListOffersForListing,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<ListOffersForListing as Query>::Output, MarketError> {
        let user = uow.users().get_by_username(&query.username).await?;
        let listing = uow
            .listings()
            .get_by_public_id(&query.listing_public_id)
            .await?;

        if listing.seller_id != user.id {
            return Err(MarketError::Auth(AuthError::NotListingSeller));
        }

        uow.offers().list_by_listing(listing.id).await
    }
}
