use async_trait::async_trait;
use std::sync::Arc;

use depth_chart_core::models::depth_chart::DepthChart;
use depth_chart_types::errors::ApplicationError;

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::GetBackups},
    uow::UnitOfWork,
};

pub struct GetBackupsHandler {}

impl GetBackupsHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<GetBackups> for GetBackupsHandler {
    async fn handle(
        &self,
        query: GetBackups,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<GetBackups as Query>::Output, ApplicationError> {
        // One read: the rank of the player and the players behind it come
        // from the same snapshot.
        let entries = uow.depth_charts().list_ordered(&query.key).await?;
        let chart = DepthChart::new(query.key, entries);

        let Some(backups) = chart.backups_of(query.number) else {
            tracing::info!(
                "Player #{} is not in the depth chart for {}",
                query.number,
                chart.key()
            );
            return Ok(Vec::new());
        };

        if backups.is_empty() {
            tracing::info!(
                "No backups found for player #{} in {}",
                query.number,
                chart.key()
            );
        }

        Ok(backups)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use depth_chart_core::{
        models::depth_chart::DepthChartEntry,
        test_utils::{PlayerFactoryOptions, chart_factory, player_factory, qb_key},
    };
    use depth_chart_types::chart::{ChartKey, Placement, Position, TeamScope};

    use super::*;
    use crate::{
        repository::{DepthChartRepository, PlayerRepository},
        test_utils::tests::{MockDepthChartRepository, MockPlayerRepository, MockUnitOfWork},
    };

    async fn backups(uow: &Box<dyn UnitOfWork<'_> + '_>, key: ChartKey, number: u32) -> Vec<u32> {
        let config = Arc::new(Config::default());
        GetBackupsHandler::new()
            .handle(GetBackups { key, number }, uow, &config)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.number)
            .collect()
    }

    #[tokio::test]
    async fn test_backups_are_everybody_behind_in_order() {
        let mock_uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(MockUnitOfWork::new());
        let chart = chart_factory(qb_key(), &[1, 2, 3, 4]);
        mock_uow.depth_charts().save_all(chart.entries()).await.unwrap();

        assert_eq!(backups(&mock_uow, qb_key(), 2).await, vec![3, 4]);
        assert_eq!(backups(&mock_uow, qb_key(), 1).await, vec![2, 3, 4]);
    }

    #[tokio::test]
    async fn test_last_player_has_no_backups() {
        let mock_uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(MockUnitOfWork::new());
        let chart = chart_factory(qb_key(), &[1, 2]);
        mock_uow.depth_charts().save_all(chart.entries()).await.unwrap();

        assert!(backups(&mock_uow, qb_key(), 2).await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_player_has_no_backups() {
        let mock_uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(MockUnitOfWork::new());
        let chart = chart_factory(qb_key(), &[1, 2]);
        mock_uow.depth_charts().save_all(chart.entries()).await.unwrap();

        assert!(backups(&mock_uow, qb_key(), 42).await.is_empty());

        // Ranked at QB does not mean ranked at DT.
        let dt = ChartKey::new(qb_key().scope, Position::new("DT").unwrap());
        assert!(backups(&mock_uow, dt, 1).await.is_empty());
    }

    /// Chart store where another writer inserts #99 at the top right after
    /// every read, like a concurrent transaction committing between two
    /// statements.
    struct ShiftingDepthChartRepository {
        inner: MockDepthChartRepository,
    }

    impl ShiftingDepthChartRepository {
        async fn insert_starter(&self, key: &ChartKey) {
            let entries = self.inner.list_ordered(key).await.unwrap();
            let mut chart = DepthChart::new(key.clone(), entries);
            if chart.find(99).is_some() {
                return;
            }
            let starter = player_factory(PlayerFactoryOptions {
                number: Some(99),
                ..Default::default()
            });
            let changed = chart.insert(starter, Placement::At(1)).unwrap();
            self.inner.save_all(&changed).await.unwrap();
        }
    }

    #[async_trait]
    impl DepthChartRepository for ShiftingDepthChartRepository {
        async fn list_ordered(
            &self,
            key: &ChartKey,
        ) -> Result<Vec<DepthChartEntry>, ApplicationError> {
            let entries = self.inner.list_ordered(key).await?;
            self.insert_starter(key).await;
            Ok(entries)
        }

        async fn find_by_player(
            &self,
            key: &ChartKey,
            number: u32,
        ) -> Result<Option<DepthChartEntry>, ApplicationError> {
            let entry = self.inner.find_by_player(key, number).await?;
            self.insert_starter(key).await;
            Ok(entry)
        }

        async fn list_below(
            &self,
            key: &ChartKey,
            rank: u32,
        ) -> Result<Vec<DepthChartEntry>, ApplicationError> {
            let entries = self.inner.list_below(key, rank).await?;
            self.insert_starter(key).await;
            Ok(entries)
        }

        async fn save_all(&self, entries: &[DepthChartEntry]) -> Result<(), ApplicationError> {
            self.inner.save_all(entries).await
        }

        async fn delete_and_return(
            &self,
            key: &ChartKey,
            number: u32,
        ) -> Result<Option<DepthChartEntry>, ApplicationError> {
            self.inner.delete_and_return(key, number).await
        }

        async fn list_all(
            &self,
            scope: &TeamScope,
        ) -> Result<Vec<DepthChartEntry>, ApplicationError> {
            self.inner.list_all(scope).await
        }

        async fn lock_namespace(&self, key: &ChartKey) -> Result<(), ApplicationError> {
            self.inner.lock_namespace(key).await
        }
    }

    struct ShiftingUnitOfWork {
        depth_charts: Arc<ShiftingDepthChartRepository>,
        players: Arc<MockPlayerRepository>,
    }

    #[async_trait]
    impl<'a> UnitOfWork<'a> for ShiftingUnitOfWork {
        fn depth_charts(&self) -> Arc<dyn DepthChartRepository + 'a> {
            self.depth_charts.clone()
        }

        fn players(&self) -> Arc<dyn PlayerRepository + 'a> {
            self.players.clone()
        }

        async fn commit(self: Box<Self>) -> Result<(), ApplicationError> {
            Ok(())
        }

        async fn rollback(self: Box<Self>) -> Result<(), ApplicationError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_backups_come_from_a_single_snapshot() {
        let inner = MockDepthChartRepository::new();
        let chart = chart_factory(qb_key(), &[1, 2, 3, 4]);
        inner.save_all(chart.entries()).await.unwrap();

        let uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(ShiftingUnitOfWork {
            depth_charts: Arc::new(ShiftingDepthChartRepository {
                inner: inner.clone(),
            }),
            players: Arc::new(MockPlayerRepository::default()),
        });

        let got = backups(&uow, qb_key(), 2).await;

        assert!(!got.contains(&2), "player #2 listed as its own backup");
        assert_eq!(got, vec![3, 4]);
        // The concurrent insert did land.
        assert_eq!(inner.ordering(&qb_key())[0], (1, 99));
    }
}
