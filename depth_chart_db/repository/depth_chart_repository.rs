use chrono::Utc;
use sqlx::{Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use depth_chart_app::repository::DepthChartRepository;
use depth_chart_core::models::depth_chart::DepthChartEntry;
use depth_chart_types::{
    chart::{ChartKey, TeamScope},
    errors::{ApplicationError, DbError},
};

use crate::{
    mapping::{into_entries, to_db_int},
    models::{self as db_models},
};

const SELECT_ENTRIES: &str = r#"
    SELECT e.sport, e.team, e.position, e.depth,
           p.id AS player_id, p.name AS player_name,
           p.number AS player_number, p.position AS player_position
    FROM depth_chart_entries e
    JOIN players p ON p.id = e.player_id
"#;

/// Implements DepthChartRepository and operates on transactions.
#[derive(Clone)]
pub struct PostgresDepthChartRepository<'a> {
    tx: Arc<Mutex<Transaction<'a, Postgres>>>,
}

impl<'a> PostgresDepthChartRepository<'a> {
    pub fn new(tx: Arc<Mutex<Transaction<'a, Postgres>>>) -> Self {
        Self { tx }
    }
}

#[async_trait::async_trait]
impl<'a> DepthChartRepository for PostgresDepthChartRepository<'a> {
    async fn list_ordered(&self, key: &ChartKey) -> Result<Vec<DepthChartEntry>, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let sql = format!(
            "{SELECT_ENTRIES} WHERE e.sport = $1 AND e.team = $2 AND e.position = $3 ORDER BY e.depth"
        );
        let rows = sqlx::query_as::<_, db_models::DepthChartEntry>(&sql)
            .bind(&key.scope.sport)
            .bind(&key.scope.team)
            .bind(key.position.as_str())
            .fetch_all(&mut *tx_guard.as_mut())
            .await
            .map_err(DbError::from)?;

        Ok(into_entries(rows)?)
    }

    async fn find_by_player(
        &self,
        key: &ChartKey,
        number: u32,
    ) -> Result<Option<DepthChartEntry>, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let sql = format!(
            "{SELECT_ENTRIES} WHERE e.sport = $1 AND e.team = $2 AND e.position = $3 AND p.number = $4"
        );
        let row = sqlx::query_as::<_, db_models::DepthChartEntry>(&sql)
            .bind(&key.scope.sport)
            .bind(&key.scope.team)
            .bind(key.position.as_str())
            .bind(to_db_int(number, "number")?)
            .fetch_optional(&mut *tx_guard.as_mut())
            .await
            .map_err(DbError::from)?;

        Ok(row.map(DepthChartEntry::try_from).transpose()?)
    }

    async fn list_below(
        &self,
        key: &ChartKey,
        rank: u32,
    ) -> Result<Vec<DepthChartEntry>, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let sql = format!(
            "{SELECT_ENTRIES} WHERE e.sport = $1 AND e.team = $2 AND e.position = $3 AND e.depth > $4 ORDER BY e.depth"
        );
        let rows = sqlx::query_as::<_, db_models::DepthChartEntry>(&sql)
            .bind(&key.scope.sport)
            .bind(&key.scope.team)
            .bind(key.position.as_str())
            .bind(to_db_int(rank, "depth")?)
            .fetch_all(&mut *tx_guard.as_mut())
            .await
            .map_err(DbError::from)?;

        Ok(into_entries(rows)?)
    }

    async fn save_all(&self, entries: &[DepthChartEntry]) -> Result<(), ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        let now = Utc::now();

        for entry in entries {
            sqlx::query(
                r#"
                INSERT INTO depth_chart_entries (
                    id, sport, team, position, player_id, depth, created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
                ON CONFLICT (sport, team, position, player_id) DO UPDATE
                SET
                    depth = EXCLUDED.depth,
                    updated_at = EXCLUDED.updated_at
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&entry.key.scope.sport)
            .bind(&entry.key.scope.team)
            .bind(entry.key.position.as_str())
            .bind(entry.player.id)
            .bind(to_db_int(entry.rank, "depth")?)
            .bind(now)
            .execute(&mut *tx_guard.as_mut())
            .await
            .map_err(DbError::from)?;
        }

        tracing::debug!("Saved {} depth chart entries", entries.len());
        Ok(())
    }

    async fn delete_and_return(
        &self,
        key: &ChartKey,
        number: u32,
    ) -> Result<Option<DepthChartEntry>, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let row = sqlx::query_as::<_, db_models::DepthChartEntry>(
            r#"
            DELETE FROM depth_chart_entries e
            USING players p
            WHERE p.id = e.player_id
              AND e.sport = $1 AND e.team = $2 AND e.position = $3
              AND p.number = $4
            RETURNING e.sport, e.team, e.position, e.depth,
                      p.id AS player_id, p.name AS player_name,
                      p.number AS player_number, p.position AS player_position
            "#,
        )
        .bind(&key.scope.sport)
        .bind(&key.scope.team)
        .bind(key.position.as_str())
        .bind(to_db_int(number, "number")?)
        .fetch_optional(&mut *tx_guard.as_mut())
        .await
        .map_err(DbError::from)?;

        Ok(row.map(DepthChartEntry::try_from).transpose()?)
    }

    async fn list_all(&self, scope: &TeamScope) -> Result<Vec<DepthChartEntry>, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let sql = format!(
            "{SELECT_ENTRIES} WHERE e.sport = $1 AND e.team = $2 ORDER BY e.position, e.depth"
        );
        let rows = sqlx::query_as::<_, db_models::DepthChartEntry>(&sql)
            .bind(&scope.sport)
            .bind(&scope.team)
            .fetch_all(&mut *tx_guard.as_mut())
            .await
            .map_err(DbError::from)?;

        Ok(into_entries(rows)?)
    }

    async fn lock_namespace(&self, key: &ChartKey) -> Result<(), ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        // Released by Postgres at commit or rollback.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(key.to_string())
            .execute(&mut *tx_guard.as_mut())
            .await
            .map_err(DbError::from)?;

        Ok(())
    }
}
