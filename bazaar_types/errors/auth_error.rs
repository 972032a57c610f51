use thiserror::Error;

/// Errors for ownership and identity checks.
///
/// Returned distinctly from not-found errors so callers can tell "doesn't
/// exist" from "not yours". An unknown caller identity fails closed here
/// rather than falling back to an anonymous user.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Unknown user '{0}'")]
    UnknownUser(String),

    #[error("You are not the seller of this listing")]
    NotListingSeller,

    #[error("Not your offer")]
    NotOfferBuyer,

    #[error("You are not allowed to view this offer")]
    NotOfferParty,
}
