use async_trait::async_trait;
use std::sync::Arc;

use depth_chart_types::{chart::ChartKey, errors::ApplicationError};

use crate::{config::Config, events::ChartEvent, uow::UnitOfWork};

/// A trait for Command structs.
/// Commands are operations that change the state of a single depth chart.
pub trait Command: Send + Sync {
    /// What the command hands back to the caller.
    type Output: Send;

    /// The chart this command mutates. The AppBus never runs two commands
    /// on the same chart at the same time.
    fn chart_key(&self) -> &ChartKey;
}

/// What a handler hands back to the AppBus: the caller's output and the
/// chart event to publish once the transaction has been committed.
#[derive(Debug)]
pub struct Outcome<T> {
    pub output: T,
    pub event: Option<ChartEvent>,
}

impl<T> Outcome<T> {
    pub fn new(output: T, event: ChartEvent) -> Self {
        Self {
            output,
            event: Some(event),
        }
    }

    /// Nothing changed, nothing to publish.
    pub fn unchanged(output: T) -> Self {
        Self {
            output,
            event: None,
        }
    }
}

/// A trait for handlers that execute Commands.
/// It receives the command and a Unit of Work (&Box<dyn UnitOfWork...>) to use.
/// It should NOT manage the transaction lifecycle (commit/rollback);
/// that is the job of the AppBus.
#[async_trait]
pub trait CommandHandler<C: Command> {
    async fn handle(
        &self,
        cmd: C,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
    ) -> Result<Outcome<C::Output>, ApplicationError>;
}
