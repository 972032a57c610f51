use std::sync::Arc;

use rust_decimal::Decimal;

use bazaar_domain::models::offer::PriceOffer;
use bazaar_types::errors::{DbError, DomainError, MarketError};

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::CreateOffer},
    notification::{NotificationEvent, NotificationOutbox},
    uow::UnitOfWork,
};

pub struct CreateOfferCommandHandler {}

impl CreateOfferCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<CreateOffer> for CreateOfferCommandHandler {
    async fn handle(
        &self,
        command: CreateOffer,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
        outbox: &NotificationOutbox,
    ) -> Result<PriceOffer, MarketError> {
        let buyer = uow.users().get_by_username(&command.username).await?;
        let listing = uow
            .listings()
            .get_by_public_id(&command.listing_public_id)
            .await?;

        if listing.is_deleted() {
            return Err(MarketError::Db(DbError::ListingNotFound(
                command.listing_public_id,
            )));
        }
        if !listing.is_offerable() {
            return Err(MarketError::Domain(DomainError::ListingNotOfferable));
        }
        if command.amount <= Decimal::ZERO {
            return Err(MarketError::Domain(DomainError::NonPositiveAmount));
        }
        if command.amount > listing.price {
            return Err(MarketError::Domain(DomainError::AmountExceedsPrice));
        }
        if listing.seller_id == buyer.id {
            return Err(MarketError::Domain(DomainError::SelfOffer));
        }
        if uow.offers().exists_pending(buyer.id, listing.id).await? {
            return Err(MarketError::Domain(DomainError::DuplicatePendingOffer));
        }

        let offer = PriceOffer::new(listing.id, buyer.id, command.amount, command.message);
        uow.offers().create(&offer).await?;

        let seller = uow.users().get_by_id(listing.seller_id).await?;
        outbox.push(NotificationEvent::NewOffer {
            seller_username: seller.username,
            buyer_username: buyer.username,
            listing_public_id: listing.public_id,
        });

        Ok(offer)
    }
}
