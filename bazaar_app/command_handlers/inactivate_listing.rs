use std::sync::Arc;

use bazaar_types::errors::MarketError;

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::InactivateListing},
    notification::NotificationOutbox,
    uow::UnitOfWork,
};

use super::helpers::load_listing_for_seller;

pub struct InactivateListingCommandHandler {}

impl InactivateListingCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<InactivateListing> for InactivateListingCommandHandler {
    async fn handle(
        &self,
        command: InactivateListing,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
        _outbox: &NotificationOutbox,
    ) -> Result<(), MarketError> {
        let (_user, mut listing) =
            load_listing_for_seller(uow, &command.listing_public_id, &command.username).await?;

        listing.inactivate()?;
        uow.listings().save(&listing).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bazaar_domain::{
        models::listing::ListingStatus,
        test_utils::{ListingFactoryOptions, listing_factory, user_factory},
    };
    use bazaar_types::errors::{AuthError, DomainError};

    use super::*;
    use crate::test_utils::tests::MockUnitOfWork;

    fn fixture(status: ListingStatus) -> (MockUnitOfWork, bazaar_domain::models::user::User, String) {
        let mock = MockUnitOfWork::new();
        let seller = user_factory(Default::default());
        mock.seed_user(seller.clone());
        let listing = listing_factory(ListingFactoryOptions {
            seller: Some(seller.clone()),
            status: Some(status),
            ..Default::default()
        });
        let public_id = listing.public_id.clone();
        mock.seed_listing(listing);
        (mock, seller, public_id)
    }

    #[tokio::test]
    async fn active_listing_becomes_inactive() {
        let (mock, seller, public_id) = fixture(ListingStatus::Active);
        let uow: Box<dyn UnitOfWork<'_>> = Box::new(mock.clone());

        InactivateListingCommandHandler::new()
            .handle(
                InactivateListing {
                    listing_public_id: public_id.clone(),
                    username: seller.username.clone(),
                },
                &uow,
                &Arc::new(Config::from_env()),
                &NotificationOutbox::new(),
            )
            .await
            .expect("inactivate should succeed");

        let stored = uow.listings().get_by_public_id(&public_id).await.unwrap();
        assert_eq!(stored.status, ListingStatus::Inactive);
    }

    #[tokio::test]
    async fn sold_listing_cannot_be_inactivated() {
        let (mock, seller, public_id) = fixture(ListingStatus::Sold);
        let uow: Box<dyn UnitOfWork<'_>> = Box::new(mock.clone());

        let result = InactivateListingCommandHandler::new()
            .handle(
                InactivateListing {
                    listing_public_id: public_id.clone(),
                    username: seller.username.clone(),
                },
                &uow,
                &Arc::new(Config::from_env()),
                &NotificationOutbox::new(),
            )
            .await;

        assert!(matches!(
            result.unwrap_err(),
            MarketError::Domain(DomainError::InvalidListingTransition { .. })
        ));
        let stored = uow.listings().get_by_public_id(&public_id).await.unwrap();
        assert_eq!(stored.status, ListingStatus::Sold);
    }

    #[tokio::test]
    async fn only_the_seller_may_inactivate() {
        let (mock, _seller, public_id) = fixture(ListingStatus::Active);
        let other = user_factory(Default::default());
        mock.seed_user(other.clone());
        let uow: Box<dyn UnitOfWork<'_>> = Box::new(mock.clone());

        let result = InactivateListingCommandHandler::new()
            .handle(
                InactivateListing {
                    listing_public_id: public_id.clone(),
                    username: other.username.clone(),
                },
                &uow,
                &Arc::new(Config::from_env()),
                &NotificationOutbox::new(),
            )
            .await;

        assert!(matches!(
            result.unwrap_err(),
            MarketError::Auth(AuthError::NotListingSeller)
        ));
        let stored = uow.listings().get_by_public_id(&public_id).await.unwrap();
        assert_eq!(stored.status, ListingStatus::Active);
    }
}
