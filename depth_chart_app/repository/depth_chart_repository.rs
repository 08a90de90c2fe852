use depth_chart_core::models::depth_chart::DepthChartEntry;
use depth_chart_types::{
    chart::{ChartKey, TeamScope},
    errors::ApplicationError,
};

#[async_trait::async_trait]
pub trait DepthChartRepository: Send + Sync {
    /// Entries of one chart, ordered by rank. Empty for an unknown chart.
    async fn list_ordered(&self, key: &ChartKey) -> Result<Vec<DepthChartEntry>, ApplicationError>;

    /// Entry of player `number` in the chart, if ranked.
    async fn find_by_player(
        &self,
        key: &ChartKey,
        number: u32,
    ) -> Result<Option<DepthChartEntry>, ApplicationError>;

    /// Entries ranked strictly behind `rank`, ordered by rank.
    async fn list_below(
        &self,
        key: &ChartKey,
        rank: u32,
    ) -> Result<Vec<DepthChartEntry>, ApplicationError>;

    /// Upserts entries by (chart, player).
    async fn save_all(&self, entries: &[DepthChartEntry]) -> Result<(), ApplicationError>;

    /// Removes the entry of player `number` and returns it, `None` when absent.
    async fn delete_and_return(
        &self,
        key: &ChartKey,
        number: u32,
    ) -> Result<Option<DepthChartEntry>, ApplicationError>;

    /// Every entry of every chart of the team, in no particular order.
    async fn list_all(&self, scope: &TeamScope) -> Result<Vec<DepthChartEntry>, ApplicationError>;

    /// Blocks other writers of the chart until the current transaction ends.
    async fn lock_namespace(&self, key: &ChartKey) -> Result<(), ApplicationError>;
}
