use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow, Clone)]
pub struct Player {
    pub id: Uuid,
    pub sport: String,
    pub team: String,
    pub name: String,
    pub number: i32,
    pub position: String,
}

/// A depth chart row joined with the player holding it.
#[derive(Debug, FromRow, Clone)]
pub struct DepthChartEntry {
    pub sport: String,
    pub team: String,
    pub position: String,
    pub depth: i32,
    pub player_id: Uuid,
    pub player_name: String,
    pub player_number: i32,
    pub player_position: String,
}
