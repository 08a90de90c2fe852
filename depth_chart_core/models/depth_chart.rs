use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use depth_chart_types::{
    chart::{ChartKey, Placement, Position, STARTER_RANK},
    errors::ChartError,
};

use super::player::Player;

/// A player holding a rank in one depth chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthChartEntry {
    pub key: ChartKey,
    pub player: Player,
    pub rank: u32,
}

/// Full depth chart of a team, each position ordered from starter to last backup.
pub type FullDepthChart = HashMap<Position, Vec<Player>>;

/// In-memory view of the ranking of a single position.
///
/// Entries are kept sorted by rank. Every mutating method returns the entries
/// whose rank changed (or that are new), which is exactly what has to be
/// written back to the store.
#[derive(Debug, Clone)]
pub struct DepthChart {
    key: ChartKey,
    entries: Vec<DepthChartEntry>,
}

impl DepthChart {
    pub fn new(key: ChartKey, mut entries: Vec<DepthChartEntry>) -> Self {
        entries.sort_by_key(|e| e.rank);
        Self { key, entries }
    }

    pub fn key(&self) -> &ChartKey {
        &self.key
    }

    pub fn entries(&self) -> &[DepthChartEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, number: u32) -> Option<&DepthChartEntry> {
        self.entries.iter().find(|e| e.player.number == number)
    }

    /// Rank the next appended player gets.
    pub fn next_rank(&self) -> u32 {
        STARTER_RANK + self.entries.len() as u32
    }

    /// Turns a placement into a concrete rank.
    ///
    /// Explicit ranks must fall in `STARTER_RANK..=next_rank()`, anything else
    /// would leave a hole in the chart.
    pub fn resolve(&self, placement: Placement) -> Result<u32, ChartError> {
        let max = self.next_rank();
        match placement {
            Placement::Append => Ok(max),
            Placement::At(rank) if (STARTER_RANK..=max).contains(&rank) => Ok(rank),
            Placement::At(rank) => Err(ChartError::RankOutOfRange {
                key: self.key.clone(),
                requested: rank,
                max,
            }),
        }
    }

    /// Inserts a player, shifting the occupant of the target rank and
    /// everybody behind it back by one.
    pub fn insert(
        &mut self,
        player: Player,
        placement: Placement,
    ) -> Result<Vec<DepthChartEntry>, ChartError> {
        if self.find(player.number).is_some() {
            return Err(ChartError::PlayerAlreadyRanked {
                key: self.key.clone(),
                number: player.number,
            });
        }

        let rank = self.resolve(placement)?;

        let mut changed: Vec<DepthChartEntry> = self
            .entries
            .iter_mut()
            .filter(|e| e.rank >= rank)
            .map(|e| {
                e.rank += 1;
                e.clone()
            })
            .collect();

        let entry = DepthChartEntry {
            key: self.key.clone(),
            player,
            rank,
        };
        let index = self.entries.partition_point(|e| e.rank < rank);
        self.entries.insert(index, entry.clone());

        changed.insert(0, entry);
        Ok(changed)
    }

    /// Renumbers the chart from `STARTER_RANK` keeping the current order.
    pub fn compact(&mut self) -> Vec<DepthChartEntry> {
        let mut changed = Vec::new();
        for (rank, entry) in (STARTER_RANK..).zip(self.entries.iter_mut()) {
            if entry.rank != rank {
                entry.rank = rank;
                changed.push(entry.clone());
            }
        }
        changed
    }

    /// Players ranked behind `number`, closest first.
    /// Returns `None` when `number` is not in the chart at all.
    pub fn backups_of(&self, number: u32) -> Option<Vec<Player>> {
        let rank = self.find(number)?.rank;
        Some(
            self.entries
                .iter()
                .filter(|e| e.rank > rank)
                .map(|e| e.player.clone())
                .collect(),
        )
    }

    /// `(rank, player number)` pairs in chart order.
    pub fn ordering(&self) -> Vec<(u32, u32)> {
        self.entries
            .iter()
            .map(|e| (e.rank, e.player.number))
            .collect()
    }

}

/// Groups entries of any number of charts by position, each ordered by rank.
pub fn full_depth_chart(entries: impl IntoIterator<Item = DepthChartEntry>) -> FullDepthChart {
    let mut grouped: HashMap<Position, Vec<DepthChartEntry>> = HashMap::new();
    for entry in entries {
        grouped
            .entry(entry.key.position.clone())
            .or_default()
            .push(entry);
    }

    grouped
        .into_iter()
        .map(|(position, mut entries)| {
            entries.sort_by_key(|e| e.rank);
            (position, entries.into_iter().map(|e| e.player).collect())
        })
        .collect()
}
