use async_trait::async_trait;
use std::sync::Arc;

use bazaar_types::errors::{DbError, MarketError};

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::GetAcceptedOffer},
    uow::UnitOfWork,
};

pub struct GetAcceptedOfferHandler {}

impl GetAcceptedOfferHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<GetAcceptedOffer> for GetAcceptedOfferHandler {
    async fn handle(
        &self,
        query: GetAcceptedOffer,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<GetAcceptedOffer as Query>::Output, MarketError> {
        let listing = uow
            .listings()
            .get_by_public_id(&query.listing_public_id)
            .await?;

        if listing.is_deleted() {
            return Err(MarketError::Db(DbError::ListingNotFound(
                query.listing_public_id,
            )));
        }

        uow.offers().latest_accepted(listing.id).await
    }
}

#[cfg(test)]
mod tests {
    use bazaar_domain::{
        models::offer::OfferStatus,
        test_utils::{OfferFactoryOptions, listing_factory, offer_factory, user_factory},
    };

    use super::*;
    use crate::test_utils::tests::MockUnitOfWork;

    #[tokio::test]
    async fn returns_none_when_nothing_was_accepted() {
        let mock = MockUnitOfWork::new();
        let listing = listing_factory(Default::default());
        mock.seed_listing(listing.clone());
        mock.seed_offer(offer_factory(OfferFactoryOptions {
            listing: Some(listing.clone()),
            ..Default::default()
        }));

        let uow: Box<dyn UnitOfWork<'_>> = Box::new(mock.clone());
        let result = GetAcceptedOfferHandler::new()
            .handle(
                GetAcceptedOffer {
                    listing_public_id: listing.public_id.clone(),
                },
                &uow,
                &Arc::new(Config::from_env()),
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn returns_the_accepted_offer() {
        let mock = MockUnitOfWork::new();
        let buyer = user_factory(Default::default());
        mock.seed_user(buyer.clone());
        let listing = listing_factory(Default::default());
        mock.seed_listing(listing.clone());
        let accepted = offer_factory(OfferFactoryOptions {
            listing: Some(listing.clone()),
            buyer: Some(buyer),
            status: Some(OfferStatus::Accepted),
            ..Default::default()
        });
        mock.seed_offer(accepted.clone());
        mock.seed_offer(offer_factory(OfferFactoryOptions {
            listing: Some(listing.clone()),
            status: Some(OfferStatus::Rejected),
            ..Default::default()
        }));

        let uow: Box<dyn UnitOfWork<'_>> = Box::new(mock.clone());
        let result = GetAcceptedOfferHandler::new()
            .handle(
                GetAcceptedOffer {
                    listing_public_id: listing.public_id.clone(),
                },
                &uow,
                &Arc::new(Config::from_env()),
            )
            .await
            .unwrap();
        assert_eq!(result.unwrap().public_id, accepted.public_id);
    }
}
