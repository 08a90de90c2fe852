use chrono::Utc;
use sqlx::{Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;

use depth_chart_app::repository::PlayerRepository;
use depth_chart_core::models::player::Player;
use depth_chart_types::{
    chart::TeamScope,
    errors::{ApplicationError, DbError},
};

use crate::{mapping::to_db_int, models::{self as db_models}};

/// Implements PlayerRepository and operates on transactions.
#[derive(Clone)]
pub struct PostgresPlayerRepository<'a> {
    tx: Arc<Mutex<Transaction<'a, Postgres>>>,
}

impl<'a> PostgresPlayerRepository<'a> {
    pub fn new(tx: Arc<Mutex<Transaction<'a, Postgres>>>) -> Self {
        Self { tx }
    }
}

#[async_trait::async_trait]
impl<'a> PlayerRepository for PostgresPlayerRepository<'a> {
    async fn save(&self, player: &Player) -> Result<Player, ApplicationError> {
        // The home position is the one of the first registration; ranking a
        // player at another position must not move its other charts.
        let mut tx_guard = self.tx.lock().await;

        let row = sqlx::query_as::<_, db_models::Player>(
            r#"
            INSERT INTO players (id, sport, team, name, number, position, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            ON CONFLICT (sport, team, number) DO UPDATE
            SET
                name = EXCLUDED.name,
                updated_at = EXCLUDED.updated_at
            RETURNING id, sport, team, name, number, position
            "#,
        )
        .bind(player.id)
        .bind(&player.scope.sport)
        .bind(&player.scope.team)
        .bind(&player.name)
        .bind(to_db_int(player.number, "number")?)
        .bind(player.position.as_str())
        .bind(Utc::now())
        .fetch_one(&mut *tx_guard.as_mut())
        .await
        .map_err(DbError::from)?;

        Ok(Player::try_from(row)?)
    }

    async fn find_by_number(
        &self,
        scope: &TeamScope,
        number: u32,
    ) -> Result<Option<Player>, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let row = sqlx::query_as::<_, db_models::Player>(
            r#"
            SELECT id, sport, team, name, number, position
            FROM players
            WHERE sport = $1 AND team = $2 AND number = $3
            "#,
        )
        .bind(&scope.sport)
        .bind(&scope.team)
        .bind(to_db_int(number, "number")?)
        .fetch_optional(&mut *tx_guard.as_mut())
        .await
        .map_err(DbError::from)?;

        Ok(row.map(Player::try_from).transpose()?)
    }
}
