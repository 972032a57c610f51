use std::sync::Arc;

use bazaar_domain::models::offer::{OfferStatus, PriceOffer};
use bazaar_types::errors::{AuthError, DomainError, MarketError};

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::RejectOffer},
    notification::{NotificationEvent, NotificationOutbox},
    uow::UnitOfWork,
};

pub struct RejectOfferCommandHandler {}

impl RejectOfferCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<RejectOffer> for RejectOfferCommandHandler {
    async fn handle(
        &self,
        command: RejectOffer,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
        outbox: &NotificationOutbox,
    ) -> Result<PriceOffer, MarketError> {
        if command.status != OfferStatus::Rejected {
            return Err(MarketError::Domain(DomainError::WrongTargetStatus(
                command.status.to_string(),
            )));
        }

        let user = uow.users().get_by_username(&command.username).await?;
        let mut offer = uow
            .offers()
            .get_by_public_id(&command.offer_public_id)
            .await?;
        let listing = uow.listings().get_by_id(offer.listing_id).await?;

        if listing.seller_id != user.id {
            return Err(MarketError::Auth(AuthError::NotListingSeller));
        }

        offer.reject(command.note)?;
        uow.offers().save(&offer).await?;

        let buyer = uow.users().get_by_id(offer.buyer_id).await?;
        outbox.push(NotificationEvent::OfferStatusChanged {
            buyer_username: buyer.username,
            listing_public_id: listing.public_id,
            status: OfferStatus::Rejected,
        });

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
            message: Some("any flexibility?"),
            ..Default::default()
        });
        mock.seed_offer(offer.clone());
        (mock, seller.username, buyer.username, offer.public_id)
    }

    async fn reject(
        mock: &MockUnitOfWork,
        offer_public_id: &str,
        username: &str,
        note: Option<&str>,
        outbox: &NotificationOutbox,
    ) -> Result<PriceOffer, MarketError> {
        let uow: Box<dyn UnitOfWork<'_>> = Box::new(mock.clone());
        RejectOfferCommandHandler::new()
            .handle(
                RejectOffer {
                    offer_public_id: offer_public_id.to_string(),
                    username: username.to_string(),
                    status: OfferStatus::Rejected,
                    note: note.map(str::to_string),
                },
                &uow,
                &Arc::new(Config::from_env()),
                outbox,
            )
            .await
    }

    #[tokio::test]
    async fn reject_with_note_replaces_message_and_notifies_buyer() {
        let (mock, seller, buyer, offer_id) = fixture();
        let outbox = NotificationOutbox::new();

        let rejected = reject(&mock, &offer_id, &seller, Some("Too low."), &outbox)
            .await
            .unwrap();
        assert_eq!(rejected.status, OfferStatus::Rejected);
        assert_eq!(rejected.message.as_deref(), Some("Too low."));

        let events = outbox.drain();
        assert!(matches!(
            &events[..],
            [NotificationEvent::OfferStatusChanged {
                buyer_username,
                status: OfferStatus::Rejected,
                ..
            }] if *buyer_username == buyer
        ));
    }

    #[tokio::test]
    async fn reject_without_note_keeps_buyer_message() {
        let (mock, seller, _buyer, offer_id) = fixture();
        let outbox = NotificationOutbox::new();

        let rejected = reject(&mock, &offer_id, &seller, None, &outbox)
            .await
            .unwrap();
        assert_eq!(rejected.message.as_deref(), Some("any flexibility?"));
    }

    #[tokio::test]
    async fn buyer_cannot_reject_their_own_offer() {
        let (mock, _seller, buyer, offer_id) = fixture();
        let outbox = NotificationOutbox::new();

        let result = reject(&mock, &offer_id, &buyer, None, &outbox).await;
        assert!(matches!(
            result.unwrap_err(),
            MarketError::Auth(AuthError::NotListingSeller)
        ));
    }

    #[tokio::test]
    async fn rejecting_twice_is_a_conflict() {
        let (mock, seller, _buyer, offer_id) = fixture();
        let outbox = NotificationOutbox::new();

        reject(&mock, &offer_id, &seller, None, &outbox)
            .await
            .unwrap();
        let result = reject(&mock, &offer_id, &seller, None, &outbox).await;
        assert!(matches!(
            result.unwrap_err(),
            MarketError::Domain(DomainError::OfferNotPending { .. })
        ));
    }
}
