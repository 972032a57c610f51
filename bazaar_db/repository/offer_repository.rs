use sqlx::{Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use bazaar_app::repository::OfferRepository;
use bazaar_domain::models::offer::PriceOffer;
use bazaar_types::errors::{DbError, DomainError, MarketError};

use crate::models as db_models;

const OFFER_COLUMNS: &str =
    "id, public_id, listing_id, buyer_id, amount, message, status, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresOfferRepository<'a> {
    tx: Arc<Mutex<Transaction<'a, Postgres>>>,
}

impl<'a> PostgresOfferRepository<'a> {
    pub fn new(tx: Arc<Mutex<Transaction<'a, Postgres>>>) -> Self {
        Self { tx }
    }
}

#[async_trait::async_trait]
impl<'a> OfferRepository for PostgresOfferRepository<'a> {
    async fn create(&self, offer: &PriceOffer) -> Result<(), MarketError> {
        let mut tx_guard = self.tx.lock().await;

        sqlx::query(
            r#"
            INSERT INTO price_offers
                (id, public_id, listing_id, buyer_id, amount, message, status,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(offer.id)
        .bind(&offer.public_id)
        .bind(offer.listing_id)
        .bind(offer.buyer_id)
        .bind(offer.amount)
        .bind(&offer.message)
        .bind(db_models::OfferStatus::from(offer.status))
        .bind(offer.created_at)
        .bind(offer.updated_at)
        .execute(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| {
            // The partial unique index on (buyer_id, listing_id) catches the
            // race two concurrent creates can slip past the handler check.
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                MarketError::Domain(DomainError::DuplicatePendingOffer)
            } else {
                MarketError::Db(DbError::Database(e))
            }
        })?;

        Ok(())
    }

    async fn get_by_public_id(&self, public_id: &str) -> Result<PriceOffer, MarketError> {
        let mut tx_guard = self.tx.lock().await;
        let rec = sqlx::query_as::<_, db_models::PriceOffer>(&format!(
            "SELECT {OFFER_COLUMNS} FROM price_offers WHERE public_id = $1"
        ))
        .bind(public_id)
        .fetch_optional(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| MarketError::Db(DbError::Database(e)))?
        .ok_or_else(|| MarketError::Db(DbError::OfferNotFound(public_id.to_string())))?;

        Ok(rec.into())
    }

    async fn save(&self, offer: &PriceOffer) -> Result<(), MarketError> {
        let mut tx_guard = self.tx.lock().await;

        let result = sqlx::query(
            r#"
            UPDATE price_offers
            SET status = $2, message = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(offer.id)
        .bind(db_models::OfferStatus::from(offer.status))
        .bind(&offer.message)
        .bind(offer.updated_at)
        .execute(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| MarketError::Db(DbError::Database(e)))?;

        if result.rows_affected() == 0 {
            return Err(MarketError::Db(DbError::OfferNotFound(
                offer.public_id.clone(),
            )));
        }

        Ok(())
    }

    async fn list_by_listing(&self, listing_id: Uuid) -> Result<Vec<PriceOffer>, MarketError> {
        let mut tx_guard = self.tx.lock().await;
        let recs = sqlx::query_as::<_, db_models::PriceOffer>(&format!(
            r#"
            SELECT {OFFER_COLUMNS} FROM price_offers
            WHERE listing_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(listing_id)
        .fetch_all(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| MarketError::Db(DbError::Database(e)))?;

        Ok(recs.into_iter().map(Into::into).collect())
    }

    async fn list_pending_by_listing(
        &self,
        listing_id: Uuid,
    ) -> Result<Vec<PriceOffer>, MarketError> {
        let mut tx_guard = self.tx.lock().await;
        let recs = sqlx::query_as::<_, db_models::PriceOffer>(&format!(
            r#"
            SELECT {OFFER_COLUMNS} FROM price_offers
            WHERE listing_id = $1 AND status = 'PENDING'
            ORDER BY created_at DESC
            "#
        ))
        .bind(listing_id)
        .fetch_all(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| MarketError::Db(DbError::Database(e)))?;

        Ok(recs.into_iter().map(Into::into).collect())
    }

    async fn list_by_buyer(&self, buyer_id: Uuid) -> Result<Vec<PriceOffer>, MarketError> {
        let mut tx_guard = self.tx.lock().await;
        let recs = sqlx::query_as::<_, db_models::PriceOffer>(&format!(
            r#"
            SELECT {OFFER_COLUMNS} FROM price_offers
            WHERE buyer_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(buyer_id)
        .fetch_all(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| MarketError::Db(DbError::Database(e)))?;

        Ok(recs.into_iter().map(Into::into).collect())
    }

    async fn list_received_by_seller(
        &self,
        seller_id: Uuid,
    ) -> Result<Vec<PriceOffer>, MarketError> {
        let mut tx_guard = self.tx.lock().await;
        let recs = sqlx::query_as::<_, db_models::PriceOffer>(
            r#"
            SELECT o.id, o.public_id, o.listing_id, o.buyer_id, o.amount,
                   o.message, o.status, o.created_at, o.updated_at
            FROM price_offers o
            JOIN listings l ON l.id = o.listing_id
            WHERE l.seller_id = $1
            ORDER BY o.created_at DESC
            "#,
        )
        .bind(seller_id)
        .fetch_all(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| MarketError::Db(DbError::Database(e)))?;

        Ok(recs.into_iter().map(Into::into).collect())
    }

    async fn exists_pending(&self, buyer_id: Uuid, listing_id: Uuid) -> Result<bool, MarketError> {
        let mut tx_guard = self.tx.lock().await;
        let exists: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM price_offers
                WHERE buyer_id = $1 AND listing_id = $2 AND status = 'PENDING'
            )
            "#,
        )
        .bind(buyer_id)
        .bind(listing_id)
        .fetch_one(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| MarketError::Db(DbError::Database(e)))?;

        Ok(exists.0)
    }

    async fn latest_accepted(
        &self,
        listing_id: Uuid,
    ) -> Result<Option<PriceOffer>, MarketError> {
        let mut tx_guard = self.tx.lock().await;
        let rec = sqlx::query_as::<_, db_models::PriceOffer>(&format!(
            r#"
            SELECT {OFFER_COLUMNS} FROM price_offers
            WHERE listing_id = $1 AND status = 'ACCEPTED'
            ORDER BY created_at DESC
            LIMIT 1
            "#
        ))
        .bind(listing_id)
        .fetch_optional(&mut *tx_guard.as_mut())
        .await
        .map_err(|e| MarketError::Db(DbError::Database(e)))?;

        Ok(rec.map(Into::into))
    }
}
