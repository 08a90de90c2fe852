use std::sync::Arc;

use depth_chart_core::models::depth_chart::{DepthChart, DepthChartEntry};
use depth_chart_types::errors::ApplicationError;

use crate::{
    config::Config,
    cqrs::{CommandHandler, Outcome, commands::RemovePlayerFromDepthChart},
    events::{ChartChange, ChartEvent},
    uow::UnitOfWork,
};

pub struct RemovePlayerFromDepthChartCommandHandler {}

impl RemovePlayerFromDepthChartCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<RemovePlayerFromDepthChart> for RemovePlayerFromDepthChartCommandHandler {
    async fn handle(
        &self,
        command: RemovePlayerFromDepthChart,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<Outcome<Option<DepthChartEntry>>, ApplicationError> {
        let charts = uow.depth_charts();
        charts.lock_namespace(&command.key).await?;

        let Some(removed) = charts
            .delete_and_return(&command.key, command.number)
            .await?
        else {
            tracing::info!(
                "Player #{} is not in the depth chart for {}",
                command.number,
                command.key
            );
            return Ok(Outcome::unchanged(None));
        };

        let remaining = charts.list_ordered(&command.key).await?;
        let mut chart = DepthChart::new(command.key, remaining);
        let changed = chart.compact();
        if !changed.is_empty() {
            charts.save_all(&changed).await?;
        }

        Ok(Outcome::new(
            Some(removed),
            ChartEvent::new(ChartChange::Removed, &chart),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use depth_chart_core::test_utils::{chart_factory, qb_key};

    use super::*;
    use crate::test_utils::tests::MockUnitOfWork;

    async fn seed(uow: &Box<dyn UnitOfWork<'_> + '_>, numbers: &[u32]) {
        let chart = chart_factory(qb_key(), numbers);
        uow.depth_charts().save_all(chart.entries()).await.unwrap();
    }

    async fn ordering(uow: &Box<dyn UnitOfWork<'_> + '_>) -> Vec<(u32, u32)> {
        uow.depth_charts()
            .list_ordered(&qb_key())
            .await
            .unwrap()
            .iter()
            .map(|e| (e.rank, e.player.number))
            .collect()
    }

    fn command(number: u32) -> RemovePlayerFromDepthChart {
        RemovePlayerFromDepthChart {
            key: qb_key(),
            number,
        }
    }

    #[tokio::test]
    async fn test_remove_starter_compacts_from_one() {
        let config = Arc::new(Config::default());
        let mock_uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(MockUnitOfWork::new());
        let handler = RemovePlayerFromDepthChartCommandHandler::new();
        seed(&mock_uow, &[1, 2, 3]).await;

        let outcome = handler.handle(command(1), &mock_uow, &config).await.unwrap();
        let removed = outcome
            .output
            .expect("player 1 should have been removed");

        assert_eq!(removed.player.number, 1);
        assert_eq!(removed.rank, 1);
        assert_eq!(ordering(&mock_uow).await, vec![(1, 2), (2, 3)]);

        let event = outcome.event.expect("a removal reports the chart");
        assert_eq!(event.change, ChartChange::Removed);
        assert_eq!(event.ordering, vec![(1, 2), (2, 3)]);
    }

    #[tokio::test]
    async fn test_remove_backup_leaves_players_ahead_untouched() {
        let config = Arc::new(Config::default());
        let mock_uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(MockUnitOfWork::new());
        let handler = RemovePlayerFromDepthChartCommandHandler::new();
        seed(&mock_uow, &[1, 2, 3, 4]).await;

        handler.handle(command(3), &mock_uow, &config).await.unwrap();

        assert_eq!(ordering(&mock_uow).await, vec![(1, 1), (2, 2), (3, 4)]);
    }

    #[tokio::test]
    async fn test_remove_last_player_empties_the_chart() {
        let config = Arc::new(Config::default());
        let mock_uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(MockUnitOfWork::new());
        let handler = RemovePlayerFromDepthChartCommandHandler::new();
        seed(&mock_uow, &[7]).await;

        let outcome = handler.handle(command(7), &mock_uow, &config).await.unwrap();

        assert!(outcome.output.is_some());
        assert!(ordering(&mock_uow).await.is_empty());
    }

    #[tokio::test]
    async fn test_remove_unknown_player_is_a_no_op() {
        let config = Arc::new(Config::default());
        let mock_uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(MockUnitOfWork::new());
        let handler = RemovePlayerFromDepthChartCommandHandler::new();
        seed(&mock_uow, &[1, 2]).await;

        let outcome = handler.handle(command(99), &mock_uow, &config).await.unwrap();

        assert!(outcome.output.is_none());
        assert!(outcome.event.is_none());
        assert_eq!(ordering(&mock_uow).await, vec![(1, 1), (2, 2)]);
    }
}
