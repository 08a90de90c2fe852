use std::sync::Arc;

use depth_chart_core::models::depth_chart::DepthChart;
use depth_chart_types::errors::ApplicationError;

use crate::{
    config::Config,
    cqrs::{CommandHandler, Outcome, commands::AddPlayerToDepthChart},
    events::{ChartChange, ChartEvent},
    uow::UnitOfWork,
};

pub struct AddPlayerToDepthChartCommandHandler {}

impl AddPlayerToDepthChartCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<AddPlayerToDepthChart> for AddPlayerToDepthChartCommandHandler {
    async fn handle(
        &self,
        command: AddPlayerToDepthChart,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<Outcome<()>, ApplicationError> {
        let charts = uow.depth_charts();
        charts.lock_namespace(&command.key).await?;

        let player = uow.players().save(&command.player).await?;

        let entries = charts.list_ordered(&command.key).await?;
        let mut chart = DepthChart::new(command.key, entries);
        let changed = chart.insert(player, command.placement)?;

        charts.save_all(&changed).await?;

        Ok(Outcome::new(
            (),
            ChartEvent::new(ChartChange::Added, &chart),
        ))
    }
}
