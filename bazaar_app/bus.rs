use std::sync::Arc;

use bazaar_types::{Result, errors::MarketError};

use crate::{
    config::Config,
    cqrs::{Command, CommandHandler, Query, QueryHandler},
    gateway::Notifier,
    notification::NotificationOutbox,
    uow::UnitOfWorkProvider,
};

/// MarketBus (Mediator)
/// This struct is the central entry point for all engine operations.
/// It does not contain any business logic itself.
/// Its primary roles are:
/// 1. Managing Unit of Work (transaction) lifecycles.
/// 2. Dispatching Commands and Queries to their respective handlers.
/// 3. Delivering buffered notifications after a successful commit.
pub struct MarketBus {
    config: Arc<Config>,
    uow_provider: Arc<dyn UnitOfWorkProvider>,
    notifier: Arc<dyn Notifier>,
}

impl MarketBus {
    pub fn new(
        config: Arc<Config>,
        uow_provider: Arc<dyn UnitOfWorkProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            uow_provider,
            notifier,
        }
    }

    /// Executes a command.
    /// A command is an operation that modifies the system state.
    /// This method manages the transaction:
    /// - It begins a Unit of Work.
    /// - It passes the UoW and a fresh notification outbox to the handler.
    /// - If the handler succeeds, it commits the UoW, then dispatches the
    ///   outbox; notification failures are logged inside the outbox and do
    ///   not change the result.
    /// - If the handler fails, it rolls back the UoW and drops the outbox.
    pub async fn execute<C, H>(&self, cmd: C, handler: H) -> Result<C::Output, MarketError>
    where
        C: Command,
        H: CommandHandler<C>,
    {
        let uow = self.uow_provider.begin().await?;
        let outbox = NotificationOutbox::new();

        match handler.handle(cmd, &uow, &self.config, &outbox).await {
            Ok(output) => {
                uow.commit().await?; // Commit on success
                outbox.dispatch(self.notifier.as_ref()).await;
                Ok(output)
            }
            Err(e) => {
                uow.rollback().await?; // Rollback on failure
                Err(e)
            }
        }
    }

    /// Executes a query.
    /// A query is an operation that reads system state and returns data.
    /// It should *never* modify the state.
    /// This method ensures the transaction is *always* rolled back.
    pub async fn query<Q, H>(&self, query: Q, handler: H) -> Result<Q::Output, MarketError>
    where
        Q: Query,
        H: QueryHandler<Q>,
    {
        let uow = self.uow_provider.begin().await?;

        let result = handler.handle(query, &uow, &self.config).await;

        // Always rollback a query, as it should never write data.
        uow.rollback().await?;

        result
    }
}
