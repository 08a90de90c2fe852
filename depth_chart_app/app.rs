use std::sync::Arc;

use depth_chart_types::errors::ApplicationError;

use crate::{
    config::Config,
    cqrs::{Command, CommandHandler, Query, QueryHandler},
    events::{ChartObserver, TracingChartObserver},
    locks::ChartLocks,
    uow::UnitOfWorkProvider,
};

/// AppBus (Mediator)
/// This struct is the central entry point for all application logic.
/// It does not contain any business logic itself.
/// Its primary roles are:
/// 1. Managing Unit of Work (transaction) lifecycles.
/// 2. Serialising commands that touch the same depth chart.
/// 3. Dispatching Commands and Queries to their respective handlers.
/// 4. Publishing chart events of committed commands.
pub struct AppBus {
    config: Arc<Config>,
    uow_provider: Arc<dyn UnitOfWorkProvider>,
    locks: ChartLocks,
    observer: Arc<dyn ChartObserver>,
}

impl AppBus {
    pub fn new(config: Arc<Config>, uow_provider: Arc<dyn UnitOfWorkProvider>) -> Self {
        Self::with_observer(config, uow_provider, Arc::new(TracingChartObserver))
    }

    pub fn with_observer(
        config: Arc<Config>,
        uow_provider: Arc<dyn UnitOfWorkProvider>,
        observer: Arc<dyn ChartObserver>,
    ) -> Self {
        let locks = ChartLocks::new(config.lock_policy);
        Self {
            config,
            uow_provider,
            locks,
            observer,
        }
    }

    /// Executes a command.
    /// A command is an operation that modifies one depth chart.
    /// This method manages the transaction:
    /// - It takes the lock of the command's chart.
    /// - It begins a Unit of Work.
    /// - It passes the UoW to the handler.
    /// - If the handler succeeds, it commits the UoW, then publishes the
    ///   handler's chart event.
    /// - If the handler fails, it rolls back the UoW.
    ///
    /// The lock is released only after commit/rollback.
    pub async fn execute<C, H>(&self, cmd: C, handler: H) -> Result<C::Output, ApplicationError>
    where
        C: Command,
        H: CommandHandler<C> + Send + Sync,
    {
        let key = cmd.chart_key().clone();
        let _guard = self.locks.acquire(&key).await;
        tracing::debug!(%key, "Executing command");

        let uow = self.uow_provider.begin().await?;

        match handler.handle(cmd, &uow, &self.config).await {
            Ok(outcome) => {
                uow.commit().await?; // Commit on success
                if let Some(event) = &outcome.event {
                    self.observer.notify(event);
                }
                Ok(outcome.output)
            }
            Err(e) => {
                tracing::debug!(%key, "Command failed, rolling back: {e}");
                uow.rollback().await?; // Rollback on failure
                Err(e)
            }
        }
    }

    /// Executes a query.
    /// A query is an operation that reads system state and returns data.
    /// It should *never* modify the state.
    /// This method ensures the transaction is *always* rolled back.
    pub async fn query<Q, H>(&self, query: Q, handler: H) -> Result<Q::Output, ApplicationError>
    where
        Q: Query,
        H: QueryHandler<Q> + Send + Sync,
    {
        let uow = self.uow_provider.begin().await?;

        let result = handler.handle(query, &uow, &self.config).await;

        // Always rollback a query, as it should never write data.
        uow.rollback().await?;

        result
    }
}
