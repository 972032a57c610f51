use async_trait::async_trait;
use std::sync::Arc;

use bazaar_types::errors::{AuthError, MarketError};

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::GetOffer},
    uow::UnitOfWork,
};

pub struct GetOfferHandler {}

impl GetOfferHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<GetOffer> for GetOfferHandler {
    async fn handle(
        &self,
        query: GetOffer,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<GetOffer as Query>::Output, MarketError> {
        let user = uow.users().get_by_username(&query.username).await?;
        let offer = uow.offers().get_by_public_id(&query.offer_public_id).await?;
        let listing = uow.listings().get_by_id(offer.listing_id).await?;

        // Offers are private to their two parties.
        if user.id != offer.buyer_id && user.id != listing.seller_id {
            return Err(MarketError::Auth(AuthError::NotOfferParty));
        }

        Ok(offer)
    }
}

#[cfg(test)]
mod tests {
    use bazaar_domain::test_utils::{
        ListingFactoryOptions, OfferFactoryOptions, listing_factory, offer_factory, user_factory,
    };

    use super::*;
    use crate::test_utils::tests::MockUnitOfWork;

    #[tokio::test]
    async fn third_parties_cannot_read_an_offer() {
        let mock = MockUnitOfWork::new();
        let seller = user_factory(Default::default());
        let buyer = user_factory(Default::default());
        let stranger = user_factory(Default::default());
        for u in [&seller, &buyer, &stranger] {
            mock.seed_user(u.clone());
        }
        let listing = listing_factory(ListingFactoryOptions {
            seller: Some(seller.clone()),
            ..Default::default()
        });
        mock.seed_listing(listing.clone());
        let offer = offer_factory(OfferFactoryOptions {
            listing: Some(listing),
            buyer: Some(buyer.clone()),
            ..Default::default()
        });
        mock.seed_offer(offer.clone());
        let uow: Box<dyn UnitOfWork<'_>> = Box::new(mock.clone());
        let config = Arc::new(Config::from_env());
        let handler = GetOfferHandler::new();

        for allowed in [&buyer.username, &seller.username] {
            let result = handler
                .handle(
                    GetOffer {
                        offer_public_id: offer.public_id.clone(),
                        username: allowed.clone(),
                    },
                    &uow,
                    &config,
                )
                .await;
            assert!(result.is_ok());
        }

        let result = handler
            .handle(
                GetOffer {
                    offer_public_id: offer.public_id.clone(),
                    username: stranger.username.clone(),
                },
                &uow,
                &config,
            )
            .await;
        assert!(matches!(
            result.unwrap_err(),
            MarketError::Auth(AuthError::NotOfferParty)
        ));
    }
}
