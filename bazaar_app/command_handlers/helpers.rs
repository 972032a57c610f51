use tracing::warn;

use bazaar_domain::models::{listing::Listing, user::User};
use bazaar_types::errors::{AuthError, MarketError};

use crate::{
    gateway::{ImagePayload, ObjectStorageGateway},
    uow::UnitOfWork,
};

/// Resolves the caller and the listing, and verifies the caller is the
/// listing's seller. Ownership mismatch is an authorization error, distinct
/// from not-found, so callers can tell "doesn't exist" from "not yours".
pub async fn load_listing_for_seller(
    uow: &Box<dyn UnitOfWork<'_> + '_>,
    listing_public_id: &str,
    username: &str,
) -> Result<(User, Listing), MarketError> {
    let user = uow.users().get_by_username(username).await?;
    let listing = uow.listings().get_by_public_id(listing_public_id).await?;

    if listing.seller_id != user.id {
        return Err(MarketError::Auth(AuthError::NotListingSeller));
    }

    Ok((user, listing))
}

/// Uploads payloads one at a time, in submitted order. On the first failure
/// every URL uploaded so far in this call is deleted again (best-effort;
/// a failed compensating delete is logged and never masks the upload error)
/// and the upload error is surfaced.
pub async fn upload_in_order(
    storage: &dyn ObjectStorageGateway,
    payloads: &[ImagePayload],
) -> Result<Vec<String>, MarketError> {
    let mut uploaded: Vec<String> = Vec::with_capacity(payloads.len());

    for payload in payloads {
        match storage.upload(payload).await {
            Ok(url) => uploaded.push(url),
            Err(upload_err) => {
                for url in &uploaded {
                    if let Err(delete_err) = storage.delete_by_url(url).await {
                        warn!(%url, %delete_err, "compensating delete failed");
                    }
                }
                return Err(MarketError::Storage(upload_err));
            }
        }
    }

    Ok(uploaded)
}
