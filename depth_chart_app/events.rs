use serde::Serialize;
use std::fmt;

use depth_chart_core::models::depth_chart::DepthChart;
use depth_chart_types::chart::ChartKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartChange {
    Added,
    Removed,
}

/// Snapshot of a depth chart right after a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartEvent {
    pub change: ChartChange,
    pub key: ChartKey,
    /// `(rank, player number)` in chart order.
    pub ordering: Vec<(u32, u32)>,
}

impl ChartEvent {
    pub fn new(change: ChartChange, chart: &DepthChart) -> Self {
        Self {
            change,
            key: chart.key().clone(),
            ordering: chart.ordering(),
        }
    }
}

impl fmt::Display for ChartEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self.change {
            ChartChange::Added => "Player added to",
            ChartChange::Removed => "Player removed from",
        };
        let ordering = self
            .ordering
            .iter()
            .map(|(rank, number)| format!("(rank={rank}, number={number})"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{action} depth chart {}: {ordering}", self.key)
    }
}

/// Receives a `ChartEvent` after every successful mutation.
pub trait ChartObserver: Send + Sync {
    fn notify(&self, event: &ChartEvent);
}

/// Default observer, writes every event to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingChartObserver;

impl ChartObserver for TracingChartObserver {
    fn notify(&self, event: &ChartEvent) {
        tracing::info!(key = %event.key, change = ?event.change, "{event}");
    }
}
