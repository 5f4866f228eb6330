use serde::{Deserialize, Serialize};
use std::ops::Index;
use thiserror::Error;

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayerNum {
    P1,
    P2,
}

impl PlayerNum {
    pub fn other(&self) -> PlayerNum {
        match self {
            PlayerNum::P1 => PlayerNum::P2,
            PlayerNum::P2 => PlayerNum::P1,
        }
    }
}

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("A color must be selected for each player")]
    MissingColor,
    #[error("Both players selected the color {0}")]
    IdenticalColors(String),
}

/// The color a player picked to tell their pieces apart.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PlayerColor(String);

impl PlayerColor {
    pub fn new(color: &str) -> Result<Self, SetupError> {
        let color = color.trim();
        if color.is_empty() {
            return Err(SetupError::MissingColor);
        }
        Ok(PlayerColor(color.to_string()))
    }

    pub fn get(&self) -> &str {
        &self.0
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Player {
    color: PlayerColor,
}

impl Player {
    pub fn new(color: PlayerColor) -> Self {
        Player { color }
    }

    pub fn color(&self) -> &PlayerColor {
        &self.color
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Players([Player; 2]);

impl Index<PlayerNum> for Players {
    type Output = Player;
    fn index(&self, index: PlayerNum) -> &Self::Output {
        match index {
            PlayerNum::P1 => &self.0[0],
            PlayerNum::P2 => &self.0[1],
        }
    }
}

impl Players {
    // Enforce the following constraint:
    // - the two players are told apart by color
    pub fn new(players: [Player; 2]) -> Result<Self, SetupError> {
        if players[0].color() == players[1].color() {
            return Err(SetupError::IdenticalColors(
                players[0].color().get().to_string(),
            ));
        }
        Ok(Players(players))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(PlayerNum::P1.other(), PlayerNum::P2);
        assert_eq!(PlayerNum::P2.other(), PlayerNum::P1);
    }

    #[test]
    fn test_construct_player_color() {
        assert!(PlayerColor::new("").is_err());
        assert!(PlayerColor::new("   ").is_err());
        let color = PlayerColor::new(" red ").unwrap();
        assert_eq!(color.get(), "red");
    }

    #[test]
    fn test_construct_players() {
        let red = Player::new(PlayerColor::new("red").unwrap());
        let same_red = Player::new(PlayerColor::new("red").unwrap());
        assert!(Players::new([red.clone(), same_red]).is_err());

        let blue = Player::new(PlayerColor::new("blue").unwrap());
        let players = Players::new([red, blue]).unwrap();
        assert_eq!(players[PlayerNum::P1].color().get(), "red");
        assert_eq!(players[PlayerNum::P2].color().get(), "blue");
    }
}
