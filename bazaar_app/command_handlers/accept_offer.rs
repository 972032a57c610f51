use std::sync::Arc;

use bazaar_domain::models::offer::{OfferStatus, PriceOffer};
use bazaar_types::errors::{AuthError, DomainError, MarketError};

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::AcceptOffer},
    notification::{NotificationEvent, NotificationOutbox},
    uow::UnitOfWork,
};

/// Accepting one pending offer atomically rejects every other pending offer
/// on the same listing; all the writes share the command's transaction.
pub struct AcceptOfferCommandHandler {}

impl AcceptOfferCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<AcceptOffer> for AcceptOfferCommandHandler {
    async fn handle(
        &self,
        command: AcceptOffer,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
        outbox: &NotificationOutbox,
    ) -> Result<PriceOffer, MarketError> {
        if command.status != OfferStatus::Accepted {
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

        offer.accept(command.note)?;
        uow.offers().save(&offer).await?;

        let buyer = uow.users().get_by_id(offer.buyer_id).await?;
        outbox.push(NotificationEvent::OfferStatusChanged {
            buyer_username: buyer.username,
            listing_public_id: listing.public_id.clone(),
            status: OfferStatus::Accepted,
        });

        // Cascade: every other pending offer on the listing loses.
        for mut other in uow.offers().list_pending_by_listing(listing.id).await? {
            if other.id == offer.id {
                continue;
            }
            other.reject(None)?;
            uow.offers().save(&other).await?;

            let other_buyer = uow.users().get_by_id(other.buyer_id).await?;
            outbox.push(NotificationEvent::OfferStatusChanged {
                buyer_username: other_buyer.username,
                listing_public_id: listing.public_id.clone(),
                status: OfferStatus::Rejected,
            });
        }

        Ok(offer)
    }
}
