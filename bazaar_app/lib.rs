// CreateListing
// UpdateListing
// DeleteListing
// InactivateListing
// ReactivateListing
// MarkListingSold
// ViewListing
// CreateOffer
// AcceptOffer
// RejectOffer
// CancelOffer

pub mod bus;
pub mod command_handlers;
pub mod config;
pub mod cqrs;
pub mod gateway;
pub mod notification;
pub mod queries_handlers;
pub mod repository;
pub mod uow;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
