use async_trait::async_trait;
use bazaar_types::errors::MarketError;
use std::sync::Arc;

use crate::{config::Config, notification::NotificationOutbox, uow::UnitOfWork};

/// A marker trait for Command structs.
/// Commands are operations that change the state of the system.
/// Unlike queries they may still return the record they created or mutated,
/// so the trait carries an output type.
pub trait Command: Send + Sync {
    /// The data type that this command will return on success.
    type Output: Send + Sync;
}

/// A trait for handlers that execute Commands.
/// It receives the command and a Unit of Work (&Box<dyn UnitOfWork...>) to use.
/// It should NOT manage the transaction lifecycle (commit/rollback);
/// that is the job of the MarketBus. Notifications go into the outbox and
/// are dispatched by the bus after the transaction commits.
#[async_trait]
pub trait CommandHandler<C: Command> {
    async fn handle(
        &self,
        cmd: C,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
        outbox: &NotificationOutbox,
    ) -> Result<C::Output, MarketError>;
}
