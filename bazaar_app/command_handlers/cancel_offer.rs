use std::sync::Arc;

use bazaar_types::errors::{AuthError, MarketError};

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::CancelOffer},
    notification::{NotificationEvent, NotificationOutbox},
    uow::UnitOfWork,
};

pub struct CancelOfferCommandHandler {}

impl CancelOfferCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<CancelOffer> for CancelOfferCommandHandler {
    async fn handle(
        &self,
        command: CancelOffer,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
        outbox: &NotificationOutbox,
    ) -> Result<(), MarketError> {
        let user = uow.users().get_by_username(&command.username).await?;
        let mut offer = uow
            .offers()
            .get_by_public_id(&command.offer_public_id)
            .await?;

        if offer.buyer_id != user.id {
            return Err(MarketError::Auth(AuthError::NotOfferBuyer));
        }

        offer.cancel()?;
        uow.offers().save(&offer).await?;

        let listing = uow.listings().get_by_id(offer.listing_id).await?;
        let seller = uow.users().get_by_id(listing.seller_id).await?;
        outbox.push(NotificationEvent::OfferCanceled {
            seller_username: seller.username,
            buyer_username: user.username,
            listing_public_id: listing.public_id,
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bazaar_domain::{
        models::offer::{CANCELED_PREFIX, OfferStatus},
        test_utils::{
            ListingFactoryOptions, OfferFactoryOptions, listing_factory, offer_factory,
            user_factory,
        },
    };
    use bazaar_types::errors::DomainError;

    use super::*;
    use crate::test_utils::tests::MockUnitOfWork;

    fn fixture() -> (MockUnitOfWork, String, String, String) {
        let mock = MockUnitOfWork::new();
        let seller = user_factory(Default::default());
        let buyer = user_factory(Default::default());
        mock.seed_user(seller.clone());
        mock.seed_user(buyer.clone());
        let listing = listing_factory(ListingFactoryOptions {
            seller: Some(seller.clone()),
            ..Default::default()
        });
        mock.seed_listing(listing.clone());
        let offer = offer_factory(OfferFactoryOptions {
            listing: Some(listing),
            buyer: Some(buyer.clone()),
            message: Some("would you take less?"),
            ..Default::default()
        });
        mock.seed_offer(offer.clone());
        (mock, seller.username, buyer.username, offer.public_id)
    }

    async fn cancel(
        mock: &MockUnitOfWork,
        offer_public_id: &str,
        username: &str,
        outbox: &NotificationOutbox,
    ) -> Result<(), MarketError> {
        let uow: Box<dyn UnitOfWork<'_>> = Box::new(mock.clone());
        CancelOfferCommandHandler::new()
            .handle(
                CancelOffer {
                    offer_public_id: offer_public_id.to_string(),
                    username: username.to_string(),
                },
                &uow,
                &Arc::new(Config::from_env()),
                outbox,
            )
            .await
    }

    #[tokio::test]
    async fn cancel_marks_rejected_with_prefixed_message() {
        let (mock, seller, buyer, offer_id) = fixture();
        let outbox = NotificationOutbox::new();

        cancel(&mock, &offer_id, &buyer, &outbox).await.unwrap();

        let uow: Box<dyn UnitOfWork<'_>> = Box::new(mock.clone());
        let stored = uow.offers().get_by_public_id(&offer_id).await.unwrap();
        assert_eq!(stored.status, OfferStatus::Rejected);
        assert_eq!(
            stored.message.as_deref(),
            Some("(canceled by buyer) would you take less?")
        );
        assert!(stored.message.unwrap().starts_with(CANCELED_PREFIX));

        let events = outbox.drain();
        assert!(matches!(
            &events[..],
            [NotificationEvent::OfferCanceled { seller_username, .. }]
                if *seller_username == seller
        ));
    }

    #[tokio::test]
    async fn only_the_buyer_may_cancel() {
        let (mock, seller, _buyer, offer_id) = fixture();
        let outbox = NotificationOutbox::new();

        let result = cancel(&mock, &offer_id, &seller, &outbox).await;
        assert!(matches!(
            result.unwrap_err(),
            MarketError::Auth(AuthError::NotOfferBuyer)
        ));
    }

    #[tokio::test]
    async fn canceling_a_resolved_offer_is_a_conflict() {
        let (mock, _seller, buyer, offer_id) = fixture();
        let outbox = NotificationOutbox::new();

        cancel(&mock, &offer_id, &buyer, &outbox).await.unwrap();
        let result = cancel(&mock, &offer_id, &buyer, &outbox).await;
        assert!(matches!(
            result.unwrap_err(),
            MarketError::Domain(DomainError::OfferNotPending { .. })
        ));
    }
}
