#[cfg(any(test, feature = "test-utils"))]
pub mod tests {
    use async_trait::async_trait;
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };
    use uuid::Uuid;

    use bazaar_domain::models::{
        category::Category,
        listing::Listing,
        offer::{OfferStatus, PriceOffer},
        user::User,
    };
    use bazaar_types::errors::{AuthError, DbError, MarketError, StorageError};

    use crate::{
        gateway::{ImagePayload, Notifier, ObjectStorageGateway},
        repository::{CategoryRepository, ListingRepository, OfferRepository, UserRepository},
        uow::{UnitOfWork, UnitOfWorkProvider},
    };

    pub fn assert_handler_success<T>(result: Result<T, MarketError>) {
        if let Err(e) = result {
            panic!("handler failed: {e}");
        }
    }

    #[derive(Default, Clone)]
    pub struct MockUserRepository {
        users: Arc<Mutex<HashMap<Uuid, User>>>,
    }

    impl MockUserRepository {
        pub fn add_user(&self, user: User) {
            self.users.lock().unwrap().insert(user.id, user);
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn get_by_username(&self, username: &str) -> Result<User, MarketError> {
            self.users
                .lock()
                .unwrap()
                .values()
                .find(|u| u.username == username)
                .cloned()
                .ok_or_else(|| MarketError::Auth(AuthError::UnknownUser(username.to_string())))
        }

        async fn get_by_id(&self, user_id: Uuid) -> Result<User, MarketError> {
            self.users
                .lock()
                .unwrap()
                .get(&user_id)
                .cloned()
                .ok_or_else(|| MarketError::Db(DbError::UserByIdNotFound(user_id)))
        }
    }

    #[derive(Default, Clone)]
    pub struct MockCategoryRepository {
        categories: Arc<Mutex<HashMap<String, Category>>>,
    }

    impl MockCategoryRepository {
        pub fn add_category(&self, category: Category) {
            self.categories
                .lock()
                .unwrap()
                .insert(category.slug.clone(), category);
        }
    }

    #[async_trait]
    impl CategoryRepository for MockCategoryRepository {
        async fn get_by_slug(&self, slug: &str) -> Result<Category, MarketError> {
            self.categories
                .lock()
                .unwrap()
                .get(slug)
                .cloned()
                .ok_or_else(|| MarketError::Db(DbError::CategoryNotFound(slug.to_string())))
        }
    }

    #[derive(Default, Clone)]
    pub struct MockListingRepository {
        listings: Arc<Mutex<HashMap<Uuid, Listing>>>,
    }

    impl MockListingRepository {
        pub fn store(&self) -> Arc<Mutex<HashMap<Uuid, Listing>>> {
            self.listings.clone()
        }

        pub fn add_listing(&self, listing: Listing) {
            self.listings.lock().unwrap().insert(listing.id, listing);
        }
    }

    #[async_trait]
    impl ListingRepository for MockListingRepository {
        async fn create(&self, listing: &Listing) -> Result<(), MarketError> {
            self.listings
                .lock()
                .unwrap()
                .insert(listing.id, listing.clone());
            Ok(())
        }

        async fn get_by_public_id(&self, public_id: &str) -> Result<Listing, MarketError> {
            self.listings
                .lock()
                .unwrap()
                .values()
                .find(|l| l.public_id == public_id)
                .cloned()
                .ok_or_else(|| MarketError::Db(DbError::ListingNotFound(public_id.to_string())))
        }

        async fn get_by_id(&self, listing_id: Uuid) -> Result<Listing, MarketError> {
            self.listings
                .lock()
                .unwrap()
                .get(&listing_id)
                .cloned()
                .ok_or_else(|| MarketError::Db(DbError::ListingNotFound(listing_id.to_string())))
        }

        async fn save(&self, listing: &Listing) -> Result<(), MarketError> {
            self.listings
                .lock()
                .unwrap()
                .insert(listing.id, listing.clone());
            Ok(())
        }

        async fn increment_views(&self, public_id: &str) -> Result<(), MarketError> {
            let mut listings = self.listings.lock().unwrap();
            let listing = listings
                .values_mut()
                .find(|l| l.public_id == public_id)
                .ok_or_else(|| MarketError::Db(DbError::ListingNotFound(public_id.to_string())))?;
            listing.view_count += 1;
            Ok(())
        }
    }

    #[derive(Default, Clone)]
    pub struct MockOfferRepository {
        offers: Arc<Mutex<HashMap<Uuid, PriceOffer>>>,
        // Shared with the listing mock so seller-side queries can join.
        listings: Arc<Mutex<HashMap<Uuid, Listing>>>,
    }

    impl MockOfferRepository {
        pub fn with_listings(listings: Arc<Mutex<HashMap<Uuid, Listing>>>) -> Self {
            Self {
                offers: Default::default(),
                listings,
            }
        }

        pub fn add_offer(&self, offer: PriceOffer) {
            self.offers.lock().unwrap().insert(offer.id, offer);
        }
    }

    #[async_trait]
    impl OfferRepository for MockOfferRepository {
        async fn create(&self, offer: &PriceOffer) -> Result<(), MarketError> {
            self.offers.lock().unwrap().insert(offer.id, offer.clone());
            Ok(())
        }

        async fn get_by_public_id(&self, public_id: &str) -> Result<PriceOffer, MarketError> {
            self.offers
                .lock()
                .unwrap()
                .values()
                .find(|o| o.public_id == public_id)
                .cloned()
                .ok_or_else(|| MarketError::Db(DbError::OfferNotFound(public_id.to_string())))
        }

        async fn save(&self, offer: &PriceOffer) -> Result<(), MarketError> {
            self.offers.lock().unwrap().insert(offer.id, offer.clone());
            Ok(())
        }

        async fn list_by_listing(&self, listing_id: Uuid) -> Result<Vec<PriceOffer>, MarketError> {
            let mut offers: Vec<PriceOffer> = self
                .offers
                .lock()
                .unwrap()
                .values()
                .filter(|o| o.listing_id == listing_id)
                .cloned()
                .collect();
            offers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(offers)
        }

        async fn list_pending_by_listing(
            &self,
            listing_id: Uuid,
        ) -> Result<Vec<PriceOffer>, MarketError> {
            Ok(self
                .offers
                .lock()
                .unwrap()
                .values()
                .filter(|o| o.listing_id == listing_id && o.status == OfferStatus::Pending)
                .cloned()
                .collect())
        }

        async fn list_by_buyer(&self, buyer_id: Uuid) -> Result<Vec<PriceOffer>, MarketError> {
            let mut offers: Vec<PriceOffer> = self
                .offers
                .lock()
                .unwrap()
                .values()
                .filter(|o| o.buyer_id == buyer_id)
                .cloned()
                .collect();
            offers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(offers)
        }

        async fn list_received_by_seller(
            &self,
            seller_id: Uuid,
        ) -> Result<Vec<PriceOffer>, MarketError> {
            let listing_ids: Vec<Uuid> = self
                .listings
                .lock()
                .unwrap()
                .values()
                .filter(|l| l.seller_id == seller_id)
                .map(|l| l.id)
                .collect();

            let mut offers: Vec<PriceOffer> = self
                .offers
                .lock()
                .unwrap()
                .values()
                .filter(|o| listing_ids.contains(&o.listing_id))
                .cloned()
                .collect();
            offers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(offers)
        }

        async fn exists_pending(
            &self,
            buyer_id: Uuid,
            listing_id: Uuid,
        ) -> Result<bool, MarketError> {
            Ok(self.offers.lock().unwrap().values().any(|o| {
                o.buyer_id == buyer_id
                    && o.listing_id == listing_id
                    && o.status == OfferStatus::Pending
            }))
        }

        async fn latest_accepted(
            &self,
            listing_id: Uuid,
        ) -> Result<Option<PriceOffer>, MarketError> {
            Ok(self
                .offers
                .lock()
                .unwrap()
                .values()
                .filter(|o| o.listing_id == listing_id && o.status == OfferStatus::Accepted)
                .max_by_key(|o| o.created_at)
                .cloned())
        }
    }

    /// In-memory object storage. `fail_upload_at(n)` makes the n-th upload
    /// (0-based, counted across the mock's lifetime) fail, which is how the
    /// saga compensation paths get exercised.
    #[derive(Default, Clone)]
    pub struct MockObjectStorage {
        stored: Arc<Mutex<Vec<String>>>,
        deleted: Arc<Mutex<Vec<String>>>,
        upload_count: Arc<Mutex<usize>>,
        fail_at: Arc<Mutex<Option<usize>>>,
    }

    impl MockObjectStorage {
        pub fn new() -> Self {
            Default::default()
        }

        pub fn fail_upload_at(&self, index: usize) {
            *self.fail_at.lock().unwrap() = Some(index);
        }

        pub fn stored_urls(&self) -> Vec<String> {
            self.stored.lock().unwrap().clone()
        }

        pub fn deleted_urls(&self) -> Vec<String> {
            self.deleted.lock().unwrap().clone()
        }

        pub fn contains(&self, url: &str) -> bool {
            self.stored.lock().unwrap().iter().any(|u| u == url)
        }
    }

    #[async_trait]
    impl ObjectStorageGateway for MockObjectStorage {
        async fn upload(&self, payload: &ImagePayload) -> Result<String, StorageError> {
            let mut count = self.upload_count.lock().unwrap();
            let index = *count;
            *count += 1;

            if *self.fail_at.lock().unwrap() == Some(index) {
                return Err(StorageError::Upload(format!(
                    "injected failure at upload {index}"
                )));
            }

            let url = format!("https://storage.test/{index}-{}", payload.filename);
            self.stored.lock().unwrap().push(url.clone());
            Ok(url)
        }

        async fn delete_by_url(&self, url: &str) -> Result<(), StorageError> {
            self.stored.lock().unwrap().retain(|u| u != url);
            self.deleted.lock().unwrap().push(url.to_string());
            Ok(())
        }

        async fn delete_batch(&self, urls: &[String]) -> Result<(), StorageError> {
            for url in urls {
                self.stored.lock().unwrap().retain(|u| u != url);
                self.deleted.lock().unwrap().push(url.clone());
            }
            Ok(())
        }
    }

    /// Records every notification; optionally fails each call to prove the
    /// engine never lets notifier errors affect command outcomes.
    #[derive(Default, Clone)]
    pub struct MockNotifier {
        pub calls: Arc<Mutex<Vec<String>>>,
        fail: Arc<Mutex<bool>>,
    }

    impl MockNotifier {
        pub fn new() -> Self {
            Default::default()
        }

        pub fn fail_all(&self) {
            *self.fail.lock().unwrap() = true;
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) -> Result<(), String> {
            self.calls.lock().unwrap().push(call);
            if *self.fail.lock().unwrap() {
                Err("injected notifier failure".to_string())
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl Notifier for MockNotifier {
        async fn notify_new_offer(
            &self,
            seller_username: &str,
            buyer_username: &str,
            listing_public_id: &str,
        ) -> Result<(), String> {
            self.record(format!(
                "new_offer:{seller_username}:{buyer_username}:{listing_public_id}"
            ))
        }

        async fn notify_offer_status_change(
            &self,
            buyer_username: &str,
            listing_public_id: &str,
            status: OfferStatus,
        ) -> Result<(), String> {
            self.record(format!(
                "status_change:{buyer_username}:{listing_public_id}:{status}"
            ))
        }

        async fn notify_offer_canceled(
            &self,
            seller_username: &str,
            buyer_username: &str,
            listing_public_id: &str,
        ) -> Result<(), String> {
            self.record(format!(
                "canceled:{seller_username}:{buyer_username}:{listing_public_id}"
            ))
        }
    }

    #[derive(Clone)]
    pub struct MockUnitOfWork {
        users: Arc<MockUserRepository>,
        categories: Arc<MockCategoryRepository>,
        listings: Arc<MockListingRepository>,
        offers: Arc<MockOfferRepository>,

        // Flags to check if commit/rollback was called
        committed: Arc<Mutex<bool>>,
        rolled_back: Arc<Mutex<bool>>,
    }

    impl MockUnitOfWork {
        pub fn new() -> Self {
            let listings = Arc::new(MockListingRepository::default());
            let offers = Arc::new(MockOfferRepository::with_listings(listings.store()));

            Self {
                users: Arc::new(MockUserRepository::default()),
                categories: Arc::new(MockCategoryRepository::default()),
                listings,
                offers,
                committed: Arc::new(Mutex::new(false)),
                rolled_back: Arc::new(Mutex::new(false)),
            }
        }

        pub fn was_committed(&self) -> bool {
            *self.committed.lock().unwrap()
        }

        pub fn was_rolled_back(&self) -> bool {
            *self.rolled_back.lock().unwrap()
        }

        // Seeding helpers: tests insert fixtures through the same shared
        // state the handler-visible trait objects read.
        pub fn seed_user(&self, user: User) {
            self.users.add_user(user);
        }

        pub fn seed_category(&self, category: Category) {
            self.categories.add_category(category);
        }

        pub fn seed_listing(&self, listing: Listing) {
            self.listings.add_listing(listing);
        }

        pub fn seed_offer(&self, offer: PriceOffer) {
            self.offers.add_offer(offer);
        }
    }

    impl Default for MockUnitOfWork {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl<'a> UnitOfWork<'a> for MockUnitOfWork {
        fn users(&self) -> Arc<dyn UserRepository + 'a> {
            self.users.clone()
        }

        fn categories(&self) -> Arc<dyn CategoryRepository + 'a> {
            self.categories.clone()
        }

        fn listings(&self) -> Arc<dyn ListingRepository + 'a> {
            self.listings.clone()
        }

        fn offers(&self) -> Arc<dyn OfferRepository + 'a> {
            self.offers.clone()
        }

        async fn commit(self: Box<Self>) -> Result<(), MarketError> {
            *self.committed.lock().unwrap() = true;
            Ok(())
        }

        async fn rollback(self: Box<Self>) -> Result<(), MarketError> {
            *self.rolled_back.lock().unwrap() = true;
            Ok(())
        }
    }

    /// Hands out clones of one shared mock UoW so bus-level tests can seed
    /// state before executing and inspect it afterwards.
    pub struct MockUnitOfWorkProvider {
        template: MockUnitOfWork,
    }

    impl MockUnitOfWorkProvider {
        pub fn new() -> Self {
            Self {
                template: MockUnitOfWork::new(),
            }
        }

        pub fn uow(&self) -> MockUnitOfWork {
            self.template.clone()
        }
    }

    #[async_trait]
    impl UnitOfWorkProvider for MockUnitOfWorkProvider {
        async fn begin<'p>(&'p self) -> Result<Box<dyn UnitOfWork<'p> + 'p>, MarketError> {
            let uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(self.template.clone());
            Ok(uow)
        }
    }
}
