use std::sync::Mutex;

use tracing::warn;

use bazaar_domain::models::offer::OfferStatus;

use crate::gateway::Notifier;

/// An offer/listing event to be pushed through the notification side
/// channel once the owning transaction has committed.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationEvent {
    NewOffer {
        seller_username: String,
        buyer_username: String,
        listing_public_id: String,
    },
    OfferStatusChanged {
        buyer_username: String,
        listing_public_id: String,
        status: OfferStatus,
    },
    OfferCanceled {
        seller_username: String,
        buyer_username: String,
        listing_public_id: String,
    },
}

/// Per-execution buffer for notification events.
///
/// Handlers push events while the unit of work is open; the bus drains the
/// outbox only after a successful commit, so a rolled-back command never
/// notifies anyone.
#[derive(Default)]
pub struct NotificationOutbox {
    events: Mutex<Vec<NotificationEvent>>,
}

impl NotificationOutbox {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push(&self, event: NotificationEvent) {
        self.events.lock().unwrap().push(event);
    }

    pub fn drain(&self) -> Vec<NotificationEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }

    /// Sends every buffered event through the notifier. Failures are logged
    /// and swallowed; notification is never part of the command outcome.
    pub async fn dispatch(&self, notifier: &dyn Notifier) {
        for event in self.drain() {
            let result = match &event {
                NotificationEvent::NewOffer {
                    seller_username,
                    buyer_username,
                    listing_public_id,
                } => {
                    notifier
                        .notify_new_offer(seller_username, buyer_username, listing_public_id)
                        .await
                }
                NotificationEvent::OfferStatusChanged {
                    buyer_username,
                    listing_public_id,
                    status,
                } => {
                    notifier
                        .notify_offer_status_change(buyer_username, listing_public_id, *status)
                        .await
                }
                NotificationEvent::OfferCanceled {
                    seller_username,
                    buyer_username,
                    listing_public_id,
                } => {
                    notifier
                        .notify_offer_canceled(seller_username, buyer_username, listing_public_id)
                        .await
                }
            };

            if let Err(reason) = result {
                warn!(?event, %reason, "notification delivery failed");
            }
        }
    }
}
