use async_trait::async_trait;
use std::sync::Arc;

use depth_chart_core::models::depth_chart::full_depth_chart;
use depth_chart_types::errors::ApplicationError;

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::GetFullDepthChart},
    uow::UnitOfWork,
};

pub struct GetFullDepthChartHandler {}

impl GetFullDepthChartHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<GetFullDepthChart> for GetFullDepthChartHandler {
    async fn handle(
        &self,
        query: GetFullDepthChart,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<GetFullDepthChart as Query>::Output, ApplicationError> {
        let entries = uow.depth_charts().list_all(&query.scope).await?;
        let full = full_depth_chart(entries);

        for (position, players) in &full {
            let players = players
                .iter()
                .map(|p| format!("(#{}, {})", p.number, p.name))
                .collect::<Vec<_>>()
                .join(", ");
            tracing::info!("{} {position} - {players}", query.scope);
        }

        Ok(full)
    }
}
