use depth_chart_core::models::player::Player;
use depth_chart_types::{chart::TeamScope, errors::ApplicationError};

#[async_trait::async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Saves a player by team and number (creates if new, updates the name if exists).
    /// Returns the stored player: its id and home position win over the given ones.
    async fn save(&self, player: &Player) -> Result<Player, ApplicationError>;

    /// Returns a player by team and number.
    async fn find_by_number(
        &self,
        scope: &TeamScope,
        number: u32,
    ) -> Result<Option<Player>, ApplicationError>;
}
