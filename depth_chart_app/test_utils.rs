#[cfg(not(tarpaulin_include))]
pub mod tests {
    use async_trait::async_trait;
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    use depth_chart_core::models::{depth_chart::DepthChartEntry, player::Player};
    use depth_chart_types::{
        chart::{ChartKey, TeamScope},
        errors::{ApplicationError, DbError},
    };

    use crate::{
        events::{ChartEvent, ChartObserver},
        repository::{DepthChartRepository, PlayerRepository},
        uow::{UnitOfWork, UnitOfWorkProvider},
    };

    /// In-memory chart store. Enforces the same uniqueness rules as the
    /// database, checked once per batch like a deferred constraint.
    #[derive(Default, Clone)]
    pub struct MockDepthChartRepository {
        entries: Arc<Mutex<Vec<DepthChartEntry>>>,
    }

    impl MockDepthChartRepository {
        pub fn new() -> Self {
            Default::default()
        }

        /// `(rank, player number)` of a chart, ordered by rank.
        pub fn ordering(&self, key: &ChartKey) -> Vec<(u32, u32)> {
            let mut entries: Vec<(u32, u32)> = self
                .entries
                .lock()
                .unwrap()
                .iter()
                .filter(|e| &e.key == key)
                .map(|e| (e.rank, e.player.number))
                .collect();
            entries.sort();
            entries
        }

        fn sorted(&self, filter: impl Fn(&DepthChartEntry) -> bool) -> Vec<DepthChartEntry> {
            let mut entries: Vec<DepthChartEntry> = self
                .entries
                .lock()
                .unwrap()
                .iter()
                .filter(|e| filter(e))
                .cloned()
                .collect();
            entries.sort_by_key(|e| e.rank);
            entries
        }
    }

    #[async_trait]
    impl DepthChartRepository for MockDepthChartRepository {
        async fn list_ordered(
            &self,
            key: &ChartKey,
        ) -> Result<Vec<DepthChartEntry>, ApplicationError> {
            // Give concurrent writers a chance to interleave.
            tokio::task::yield_now().await;
            Ok(self.sorted(|e| &e.key == key))
        }

        async fn find_by_player(
            &self,
            key: &ChartKey,
            number: u32,
        ) -> Result<Option<DepthChartEntry>, ApplicationError> {
            Ok(self
                .sorted(|e| &e.key == key && e.player.number == number)
                .pop())
        }

        async fn list_below(
            &self,
            key: &ChartKey,
            rank: u32,
        ) -> Result<Vec<DepthChartEntry>, ApplicationError> {
            Ok(self.sorted(|e| &e.key == key && e.rank > rank))
        }

        async fn save_all(&self, batch: &[DepthChartEntry]) -> Result<(), ApplicationError> {
            let mut entries = self.entries.lock().unwrap();
            let mut next = entries.clone();

            for entry in batch {
                match next
                    .iter_mut()
                    .find(|e| e.key == entry.key && e.player.id == entry.player.id)
                {
                    Some(existing) => *existing = entry.clone(),
                    None => next.push(entry.clone()),
                }
            }

            for entry in batch {
                let same_chart = || next.iter().filter(|e| e.key == entry.key);
                if same_chart().filter(|e| e.rank == entry.rank).count() > 1 {
                    return Err(DbError::UniqueViolation {
                        constraint: "unq_team_position_depth".to_string(),
                    }
                    .into());
                }
                if same_chart()
                    .filter(|e| e.player.number == entry.player.number)
                    .count()
                    > 1
                {
                    return Err(DbError::UniqueViolation {
                        constraint: "unq_team_position_player".to_string(),
                    }
                    .into());
                }
            }

            *entries = next;
            Ok(())
        }

        async fn delete_and_return(
            &self,
            key: &ChartKey,
            number: u32,
        ) -> Result<Option<DepthChartEntry>, ApplicationError> {
            let mut entries = self.entries.lock().unwrap();
            Ok(entries
                .iter()
                .position(|e| &e.key == key && e.player.number == number)
                .map(|index| entries.remove(index)))
        }

        async fn list_all(
            &self,
            scope: &TeamScope,
        ) -> Result<Vec<DepthChartEntry>, ApplicationError> {
            Ok(self.sorted(|e| &e.key.scope == scope))
        }

        async fn lock_namespace(&self, _key: &ChartKey) -> Result<(), ApplicationError> {
            Ok(())
        }
    }

    #[derive(Default, Clone)]
    pub struct MockPlayerRepository {
        players: Arc<Mutex<HashMap<(TeamScope, u32), Player>>>,
    }

    #[async_trait]
    impl PlayerRepository for MockPlayerRepository {
        async fn save(&self, player: &Player) -> Result<Player, ApplicationError> {
            let mut players = self.players.lock().unwrap();
            let stored = players
                .entry((player.scope.clone(), player.number))
                .and_modify(|existing| existing.name = player.name.clone())
                .or_insert_with(|| player.clone());
            Ok(stored.clone())
        }

        async fn find_by_number(
            &self,
            scope: &TeamScope,
            number: u32,
        ) -> Result<Option<Player>, ApplicationError> {
            Ok(self
                .players
                .lock()
                .unwrap()
                .get(&(scope.clone(), number))
                .cloned())
        }
    }

    #[derive(Default)]
    pub struct MockUnitOfWork {
        depth_charts: Arc<MockDepthChartRepository>,
        players: Arc<MockPlayerRepository>,

        // Counters to check if commit/rollback was called
        commits: Arc<Mutex<usize>>,
        rollbacks: Arc<Mutex<usize>>,

        // Makes commit fail like a deferred constraint check would
        failing_commits: Arc<Mutex<bool>>,
    }

    impl MockUnitOfWork {
        pub fn new() -> Self {
            Default::default()
        }
    }

    #[async_trait]
    impl<'a> UnitOfWork<'a> for MockUnitOfWork {
        fn depth_charts(&self) -> Arc<dyn DepthChartRepository + 'a> {
            self.depth_charts.clone()
        }

        fn players(&self) -> Arc<dyn PlayerRepository + 'a> {
            self.players.clone()
        }

        async fn commit(self: Box<Self>) -> Result<(), ApplicationError> {
            if *self.failing_commits.lock().unwrap() {
                return Err(DbError::UniqueViolation {
                    constraint: "unq_team_position_depth".to_string(),
                }
                .into());
            }
            *self.commits.lock().unwrap() += 1;
            Ok(())
        }

        async fn rollback(self: Box<Self>) -> Result<(), ApplicationError> {
            *self.rollbacks.lock().unwrap() += 1;
            Ok(())
        }
    }

    /// Hands out units of work sharing the same in-memory repositories,
    /// so what a command writes is visible to later queries.
    /// Rollback does not undo writes.
    #[derive(Default, Clone)]
    pub struct MockUnitOfWorkProvider {
        pub depth_charts: Arc<MockDepthChartRepository>,
        pub players: Arc<MockPlayerRepository>,
        commits: Arc<Mutex<usize>>,
        rollbacks: Arc<Mutex<usize>>,
        failing_commits: Arc<Mutex<bool>>,
    }

    impl MockUnitOfWorkProvider {
        pub fn new() -> Self {
            Default::default()
        }

        /// Every following commit fails with a unique violation.
        pub fn fail_commits(&self) {
            *self.failing_commits.lock().unwrap() = true;
        }

        pub fn commits(&self) -> usize {
            *self.commits.lock().unwrap()
        }

        pub fn rollbacks(&self) -> usize {
            *self.rollbacks.lock().unwrap()
        }
    }

    #[async_trait]
    impl UnitOfWorkProvider for MockUnitOfWorkProvider {
        async fn begin<'p>(&'p self) -> Result<Box<dyn UnitOfWork<'p> + 'p>, ApplicationError> {
            let uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(MockUnitOfWork {
                depth_charts: self.depth_charts.clone(),
                players: self.players.clone(),
                commits: self.commits.clone(),
                rollbacks: self.rollbacks.clone(),
                failing_commits: self.failing_commits.clone(),
            });
            Ok(uow)
        }
    }

    /// Keeps every event it is notified of.
    #[derive(Default)]
    pub struct RecordingChartObserver {
        events: Mutex<Vec<ChartEvent>>,
    }

    impl RecordingChartObserver {
        pub fn new() -> Self {
            Default::default()
        }

        pub fn events(&self) -> Vec<ChartEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl ChartObserver for RecordingChartObserver {
        fn notify(&self, event: &ChartEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }
}
