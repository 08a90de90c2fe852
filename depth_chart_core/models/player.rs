use serde::{Deserialize, Serialize};
use uuid::Uuid;

use depth_chart_types::{
    chart::{Position, TeamScope, check_player_number},
    errors::ChartError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub scope: TeamScope,
    pub name: String,
    /// Jersey number, unique within the team.
    pub number: u32,
    /// Position the player is primarily listed at.
    pub position: Position,
}

impl Player {
    pub fn new(
        scope: TeamScope,
        name: &str,
        number: u32,
        position: Position,
    ) -> Result<Self, ChartError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ChartError::InvalidPlayer(format!(
                "player #{number} has an empty name"
            )));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            scope,
            name: name.to_string(),
            number: check_player_number(number)?,
            position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_trims_name() {
        let scope = TeamScope::new("nfl", "tampa-bay").unwrap();
        let player = Player::new(scope, "  Tom Brady ", 12, Position::new("QB").unwrap()).unwrap();

        assert_eq!(player.name, "Tom Brady");
        assert_eq!(player.number, 12);
    }

    #[test]
    fn test_new_player_rejects_empty_name() {
        let scope = TeamScope::new("nfl", "tampa-bay").unwrap();
        let result = Player::new(scope, "   ", 12, Position::new("QB").unwrap());

        assert!(matches!(result, Err(ChartError::InvalidPlayer(_))));
    }

    #[test]
    fn test_new_player_rejects_numbers_a_store_cannot_hold() {
        let scope = TeamScope::new("nfl", "tampa-bay").unwrap();
        let result = Player::new(scope, "Tom Brady", 3_000_000_000, Position::new("QB").unwrap());

        assert!(matches!(result, Err(ChartError::InvalidPlayer(_))));
    }
}
