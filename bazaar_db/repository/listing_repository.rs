use sqlx::{Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use bazaar_app::repository::ListingRepository;
use bazaar_domain::models::listing::Listing;
use bazaar_types::errors::{DbError, MarketError};

use crate::{mapping::ListingAggregate, models as db_models};

#[derive(Clone)]
pub struct PostgresListingRepository<'a> {
    tx: Arc<Mutex<Transaction<'a, Postgres>>>,
}

impl<'a> PostgresListingRepository<'a> {
    pub fn new(tx: Arc<Mutex<Transaction<'a, Postgres>>>) -> Self {
        Self { tx }
    }

    async fn hydrate(
        &self,
        tx_guard: &mut Transaction<'a, Postgres>,
        row: db_models::Listing,
    ) -> Result<Listing, MarketError> {
        let images = sqlx::query_as::<_, db_models::ListingImage>(
            r#"
            SELECT listing_id, url, display_order, created_at
            FROM listing_images
            WHERE listing_id = $1
            ORDER BY display_order
            "#,
        )
        .bind(row.id)
        .fetch_all(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| MarketError::Db(DbError::Database(e)))?;

        let listing =
            Listing::try_from(ListingAggregate { listing: row, images }).map_err(MarketError::Db)?;
        Ok(listing)
    }

    async fn replace_images(
        &self,
        tx_guard: &mut Transaction<'a, Postgres>,
        listing: &Listing,
    ) -> Result<(), MarketError> {
        sqlx::query("DELETE FROM listing_images WHERE listing_id = $1")
            .bind(listing.id)
            .execute(&mut *tx_guard.as_mut())
            .await
            .map_err(|e| MarketError::Db(DbError::Database(e)))?;

        for image in &listing.images {
            sqlx::query(
                r#"
                INSERT INTO listing_images (listing_id, url, display_order, created_at)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(listing.id)
            .bind(&image.url)
            .bind(image.display_order as i32)
            .bind(image.created_at)
            .execute(&mut *tx_guard.as_mut())
            .await
            .map_err(|e| MarketError::Db(DbError::Database(e)))?;
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl<'a> ListingRepository for PostgresListingRepository<'a> {
    async fn create(&self, listing: &Listing) -> Result<(), MarketError> {
        let mut tx_guard = self.tx.lock().await;

        sqlx::query(
            r#"
            INSERT INTO listings
                (id, public_id, seller_id, title, description, price, condition,
                 status, category_slug, latitude, longitude, is_negotiable,
                 view_count, favorite_count, created_at, updated_at, deleted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(listing.id)
        .bind(&listing.public_id)
        .bind(listing.seller_id)
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(listing.price)
        .bind(db_models::ItemCondition::from(listing.condition))
        .bind(db_models::ListingStatus::from(listing.status))
        .bind(&listing.category_slug)
        .bind(listing.latitude)
        .bind(listing.longitude)
        .bind(listing.is_negotiable)
        .bind(listing.view_count as i32)
        .bind(listing.favorite_count as i32)
        .bind(listing.created_at)
        .bind(listing.updated_at)
        .bind(listing.deleted_at)
        .execute(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| MarketError::Db(DbError::Database(e)))?;

        self.replace_images(&mut tx_guard, listing).await
    }

    /// Returns the row regardless of soft-delete state; callers decide
    /// whether a deleted listing reads as not-found or as a conflict.
    async fn get_by_public_id(&self, public_id: &str) -> Result<Listing, MarketError> {
        let mut tx_guard = self.tx.lock().await;
        let row = sqlx::query_as::<_, db_models::Listing>(
            r#"
            SELECT id, public_id, seller_id, title, description, price, condition,
                   status, category_slug, latitude, longitude, is_negotiable,
                   view_count, favorite_count, created_at, updated_at, deleted_at
            FROM listings
            WHERE public_id = $1
            "#,
        )
        .bind(public_id)
        .fetch_optional(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| MarketError::Db(DbError::Database(e)))?
        .ok_or_else(|| MarketError::Db(DbError::ListingNotFound(public_id.to_string())))?;

        self.hydrate(&mut tx_guard, row).await
    }

    async fn get_by_id(&self, listing_id: Uuid) -> Result<Listing, MarketError> {
        let mut tx_guard = self.tx.lock().await;
        let row = sqlx::query_as::<_, db_models::Listing>(
            r#"
            SELECT id, public_id, seller_id, title, description, price, condition,
                   status, category_slug, latitude, longitude, is_negotiable,
                   view_count, favorite_count, created_at, updated_at, deleted_at
            FROM listings
            WHERE id = $1
            "#,
        )
        .bind(listing_id)
        .fetch_optional(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| MarketError::Db(DbError::Database(e)))?
        .ok_or_else(|| MarketError::Db(DbError::ListingNotFound(listing_id.to_string())))?;

        self.hydrate(&mut tx_guard, row).await
    }

    async fn save(&self, listing: &Listing) -> Result<(), MarketError> {
        let mut tx_guard = self.tx.lock().await;

        let result = sqlx::query(
            r#"
            UPDATE listings
            SET title = $2, description = $3, price = $4, condition = $5,
                status = $6, latitude = $7, longitude = $8, is_negotiable = $9,
                updated_at = $10, deleted_at = $11
            WHERE id = $1
            "#,
        )
        .bind(listing.id)
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(listing.price)
        .bind(db_models::ItemCondition::from(listing.condition))
        .bind(db_models::ListingStatus::from(listing.status))
        .bind(listing.latitude)
        .bind(listing.longitude)
        .bind(listing.is_negotiable)
        .bind(listing.updated_at)
        .bind(listing.deleted_at)
        .execute(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| MarketError::Db(DbError::Database(e)))?;

        if result.rows_affected() == 0 {
            return Err(MarketError::Db(DbError::ListingNotFound(
                listing.public_id.clone(),
            )));
        }

        self.replace_images(&mut tx_guard, listing).await
    }

    /// Counter bump in SQL so concurrent views never lose increments.
    async fn increment_views(&self, public_id: &str) -> Result<(), MarketError> {
        let mut tx_guard = self.tx.lock().await;

        let result = sqlx::query(
            "UPDATE listings SET view_count = view_count + 1 WHERE public_id = $1",
        )
        .bind(public_id)
        .execute(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| MarketError::Db(DbError::Database(e)))?;

        if result.rows_affected() == 0 {
            return Err(MarketError::Db(DbError::ListingNotFound(
                public_id.to_string(),
            )));
        }

        Ok(())
    }
}
