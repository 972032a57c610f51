use std::sync::Arc;

use tracing::warn;

use bazaar_domain::models::listing::Listing;
use bazaar_types::errors::{DomainError, MarketError};

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::UpdateListing},
    gateway::ObjectStorageGateway,
    notification::NotificationOutbox,
    uow::UnitOfWork,
};

use super::helpers::{load_listing_for_seller, upload_in_order};

pub struct UpdateListingCommandHandler {
    storage: Arc<dyn ObjectStorageGateway>,
}

impl UpdateListingCommandHandler {
    pub fn new(storage: Arc<dyn ObjectStorageGateway>) -> Self {
        Self { storage }
    }
}

#[async_trait::async_trait]
impl CommandHandler<UpdateListing> for UpdateListingCommandHandler {
    async fn handle(
        &self,
        command: UpdateListing,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
        _outbox: &NotificationOutbox,
    ) -> Result<Listing, MarketError> {
        let (_user, mut listing) =
            load_listing_for_seller(uow, &command.listing_public_id, &command.username).await?;

        if listing.is_deleted() {
            return Err(MarketError::Domain(DomainError::ListingDeleted));
        }

        listing.apply(command.changes);

        // Image directive: absent = untouched, empty = clear, non-empty =
        // replace wholesale.
        if let Some(payloads) = command.images {
            if payloads.len() > config.max_images_per_listing {
                return Err(MarketError::Domain(DomainError::TooManyImages(
                    config.max_images_per_listing,
                )));
            }

            let old_urls = listing.image_urls();
            if !old_urls.is_empty() {
                // Old images leave the compensation scope once this delete
                // runs; an upload failure below does not restore them.
                if let Err(delete_err) = self.storage.delete_batch(&old_urls).await {
                    warn!(%delete_err, "batch delete of replaced images failed");
                }
            }

            let urls = upload_in_order(self.storage.as_ref(), &payloads).await?;
            listing.set_images(urls);
        }

        uow.listings().save(&listing).await?;

        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use bazaar_domain::{
        models::listing::{ListingChanges, ListingStatus},
        test_utils::{ListingFactoryOptions, listing_factory, user_factory},
    };
    use bazaar_types::errors::{AuthError, StorageError};

    use super::*;
    use crate::{
        gateway::ImagePayload,
        test_utils::tests::{MockObjectStorage, MockUnitOfWork},
    };

    fn payload(name: &str) -> ImagePayload {
        ImagePayload {
            filename: name.to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![0u8; 16],
        }
    }

    struct Fixture {
        mock: MockUnitOfWork,
        uow: Box<dyn UnitOfWork<'static>>,
        config: Arc<Config>,
        storage: MockObjectStorage,
        seller: bazaar_domain::models::user::User,
        listing_public_id: String,
    }

    async fn fixture_with_images(count: usize) -> Fixture {
        let mock = MockUnitOfWork::new();
        let seller = user_factory(Default::default());
        mock.seed_user(seller.clone());

        let storage = MockObjectStorage::new();
        let mut urls = Vec::new();
        for i in 0..count {
            urls.push(
                storage
                    .upload(&payload(&format!("old-{i}.jpg")))
                    .await
                    .unwrap(),
            );
        }

        let listing = listing_factory(ListingFactoryOptions {
            seller: Some(seller.clone()),
            image_urls: Some(urls),
            ..Default::default()
        });
        let listing_public_id = listing.public_id.clone();
        mock.seed_listing(listing);

        Fixture {
            uow: Box::new(mock.clone()),
            mock,
            config: Arc::new(Config::from_env()),
            storage,
            seller,
            listing_public_id,
        }
    }

    #[tokio::test]
    async fn absent_images_leave_gateway_untouched() {
        let f = fixture_with_images(2).await;
        let handler = UpdateListingCommandHandler::new(Arc::new(f.storage.clone()));

        let command = UpdateListing {
            listing_public_id: f.listing_public_id.clone(),
            username: f.seller.username.clone(),
            changes: ListingChanges {
                title: Some("Touring bike".to_string()),
                ..Default::default()
            },
            images: None,
        };

        let listing = handler
            .handle(command, &f.uow, &f.config, &NotificationOutbox::new())
            .await
            .expect("update should succeed");

        assert_eq!(listing.title, "Touring bike");
        assert_eq!(listing.images.len(), 2);
        assert_eq!(f.storage.stored_urls().len(), 2);
        assert!(f.storage.deleted_urls().is_empty());
    }

    #[tokio::test]
    async fn empty_image_list_clears_images_and_still_applies_fields() {
        let f = fixture_with_images(2).await;
        let handler = UpdateListingCommandHandler::new(Arc::new(f.storage.clone()));

        let command = UpdateListing {
            listing_public_id: f.listing_public_id.clone(),
            username: f.seller.username.clone(),
            changes: ListingChanges {
                price: Some(Decimal::new(4500, 2)),
                ..Default::default()
            },
            images: Some(vec![]),
        };

        let listing = handler
            .handle(command, &f.uow, &f.config, &NotificationOutbox::new())
            .await
            .expect("update should succeed");

        assert!(listing.images.is_empty());
        assert_eq!(listing.price, Decimal::new(4500, 2));
        assert!(f.storage.stored_urls().is_empty());
        assert_eq!(f.storage.deleted_urls().len(), 2);

        let stored = f
            .uow
            .listings()
            .get_by_public_id(&f.listing_public_id)
            .await
            .unwrap();
        assert!(stored.images.is_empty());
        assert_eq!(stored.price, Decimal::new(4500, 2));
    }

    #[tokio::test]
    async fn replacement_uploads_in_order_after_deleting_old() {
        let f = fixture_with_images(2).await;
        let handler = UpdateListingCommandHandler::new(Arc::new(f.storage.clone()));

        let command = UpdateListing {
            listing_public_id: f.listing_public_id.clone(),
            username: f.seller.username.clone(),
            changes: Default::default(),
            images: Some(vec![payload("new-0.jpg"), payload("new-1.jpg")]),
        };

        let listing = handler
            .handle(command, &f.uow, &f.config, &NotificationOutbox::new())
            .await
            .expect("update should succeed");

        assert_eq!(listing.images.len(), 2);
        let orders: Vec<u32> = listing.images.iter().map(|i| i.display_order).collect();
        assert_eq!(orders, vec![0, 1]);
        assert!(listing.images.iter().all(|i| i.url.contains("new-")));
        // Both old URLs are gone from the gateway.
        assert!(f.storage.stored_urls().iter().all(|u| u.contains("new-")));
    }

    #[tokio::test]
    async fn failed_replacement_upload_compensates_only_new_uploads() {
        let f = fixture_with_images(2).await;
        // Uploads 0..1 were the old images; the next two are the new batch,
        // and the second of those fails.
        f.storage.fail_upload_at(3);
        let handler = UpdateListingCommandHandler::new(Arc::new(f.storage.clone()));

        let command = UpdateListing {
            listing_public_id: f.listing_public_id.clone(),
            username: f.seller.username.clone(),
            changes: Default::default(),
            images: Some(vec![payload("new-0.jpg"), payload("new-1.jpg")]),
        };

        let result = handler
            .handle(command, &f.uow, &f.config, &NotificationOutbox::new())
            .await;

        assert!(matches!(
            result.unwrap_err(),
            MarketError::Storage(StorageError::Upload(_))
        ));
        // Old images were deleted (not restored), the new upload was
        // compensated: the gateway holds nothing from this listing.
        assert!(f.storage.stored_urls().is_empty());

        // The listing row was not saved: images unchanged in the store.
        let stored = f
            .uow
            .listings()
            .get_by_public_id(&f.listing_public_id)
            .await
            .unwrap();
        assert_eq!(stored.images.len(), 2);
    }

    #[tokio::test]
    async fn non_seller_gets_authorization_error() {
        let f = fixture_with_images(1).await;
        let intruder = user_factory(Default::default());
        f.mock.seed_user(intruder.clone());

        let handler = UpdateListingCommandHandler::new(Arc::new(f.storage.clone()));

        let command = UpdateListing {
            listing_public_id: f.listing_public_id.clone(),
            username: intruder.username.clone(),
            changes: ListingChanges {
                title: Some("hijacked".to_string()),
                ..Default::default()
            },
            images: None,
        };

        let result = handler
            .handle(command, &f.uow, &f.config, &NotificationOutbox::new())
            .await;

        assert!(matches!(
            result.unwrap_err(),
            MarketError::Auth(AuthError::NotListingSeller)
        ));

        let stored = f
            .uow
            .listings()
            .get_by_public_id(&f.listing_public_id)
            .await
            .unwrap();
        assert_ne!(stored.title, "hijacked");
    }

    #[tokio::test]
    async fn deleted_listing_cannot_be_updated() {
        let f = fixture_with_images(0).await;
        let mut listing = f
            .uow
            .listings()
            .get_by_public_id(&f.listing_public_id)
            .await
            .unwrap();
        listing.delete().unwrap();
        f.mock.seed_listing(listing);

        let handler = UpdateListingCommandHandler::new(Arc::new(f.storage.clone()));

        let command = UpdateListing {
            listing_public_id: f.listing_public_id.clone(),
            username: f.seller.username.clone(),
            changes: Default::default(),
            images: None,
        };

        let result = handler
            .handle(command, &f.uow, &f.config, &NotificationOutbox::new())
            .await;

        assert!(matches!(
            result.unwrap_err(),
            MarketError::Domain(DomainError::ListingDeleted)
        ));
    }

    #[tokio::test]
    async fn sold_listing_still_accepts_field_edits() {
        // ListingStatus::Sold listings accept non-image field updates; the
        // lifecycle only forbids status transitions, not edits.
        let mock = MockUnitOfWork::new();
        let seller = user_factory(Default::default());
        mock.seed_user(seller.clone());
        let listing = listing_factory(ListingFactoryOptions {
            seller: Some(seller.clone()),
            status: Some(ListingStatus::Sold),
            ..Default::default()
        });
        let public_id = listing.public_id.clone();
        mock.seed_listing(listing);
        let uow: Box<dyn UnitOfWork<'_>> = Box::new(mock.clone());

        let storage = MockObjectStorage::new();
        let handler = UpdateListingCommandHandler::new(Arc::new(storage));

        let command = UpdateListing {
            listing_public_id: public_id,
            username: seller.username.clone(),
            changes: ListingChanges {
                description: Some("sold, archived description".to_string()),
                ..Default::default()
            },
            images: None,
        };

        let listing = handler
            .handle(command, &uow, &Arc::new(Config::from_env()), &NotificationOutbox::new())
            .await
            .expect("update should succeed");
        assert_eq!(listing.status, ListingStatus::Sold);
    }
}
