use crate::client::SendMsg;
use crate::connect_four::{
    Column, DropOutcome, Game, GameError, Grid, Player, PlayerColor, PlayerNum, Players,
};
use crate::messages::{Outcome, RawMove, Response};
use crate::util;
use hashbrown::HashMap;
use serde::Serialize;
use serde_json::from_str;
use tracing::{info, warn};
use uuid::Uuid;

/// One independent game per session; sessions share nothing.
pub type Sessions = HashMap<String, Session>;

pub fn session_id() -> String {
    Uuid::new_v4().as_simple().to_string()
}

#[derive(Clone, Debug)]
enum ProtocolState {
    // Color choices collected so far; the game starts once both are present
    // and distinct
    Setup([Option<PlayerColor>; 2]),
    InGame(Game),
    // true means that the player wants another game, false means they don't
    NewGame([Option<bool>; 2]),
    End,
}

/// Drives one Connect Four game from JSON messages, notifying both clients
/// through whatever transport they registered.
#[derive(Clone, Debug)]
pub struct Session {
    protocol_state: ProtocolState,
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session {
            protocol_state: ProtocolState::Setup([None, None]),
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.protocol_state, ProtocolState::End)
    }

    #[tracing::instrument(skip(client, opponent))]
    pub fn handle_message(
        &mut self,
        player_num: PlayerNum,
        msg: &str,
        client: &impl SendMsg,
        opponent: &impl SendMsg,
    ) {
        use ProtocolState::*;
        self.protocol_state = match self.protocol_state.clone() {
            Setup(choices) => {
                let color: String = match from_str(msg) {
                    Ok(color) => color,
                    Err(err) => {
                        warn!("Failed to deserialize input into a color choice: {}", err);
                        return;
                    }
                };
                let color = match PlayerColor::new(&color) {
                    Ok(color) => color,
                    Err(err) => {
                        warn!("Rejected color choice: {}", err);
                        send_message(
                            client,
                            Response::ColorRejected {
                                reason: err.to_string(),
                            },
                        );
                        return;
                    }
                };
                process_color_choice(choices, player_num, color, client, opponent)
            }
            InGame(game) => {
                let raw_move: RawMove = match from_str(msg) {
                    Ok(raw_move) => raw_move,
                    Err(err) => {
                        warn!("Failed to deserialize input into a move: {}", err);
                        return;
                    }
                };
                process_move(game, player_num, raw_move, client, opponent)
            }
            NewGame(choices) => {
                let choice: bool = match from_str(msg) {
                    Ok(choice) => choice,
                    Err(err) => {
                        warn!("Failed to deserialize input into a new-game choice: {}", err);
                        return;
                    }
                };
                process_new_game_choice(choices, player_num, choice, client, opponent)
            }
            End => End,
        };
    }
}

fn process_color_choice(
    choices: [Option<PlayerColor>; 2],
    player_num: PlayerNum,
    color: PlayerColor,
    client: &impl SendMsg,
    opponent: &impl SendMsg,
) -> ProtocolState {
    let choices = match player_num {
        PlayerNum::P1 => [Some(color), choices[1].clone()],
        PlayerNum::P2 => [choices[0].clone(), Some(color)],
    };
    match choices {
        [Some(color1), Some(color2)] => {
            let players =
                match Players::new([Player::new(color1.clone()), Player::new(color2.clone())]) {
                    Ok(players) => players,
                    Err(err) => {
                        warn!("Rejected color choice: {}", err);
                        send_message(
                            client,
                            Response::ColorRejected {
                                reason: err.to_string(),
                            },
                        );
                        // The latest chooser re-picks; the earlier choice stands
                        return match player_num {
                            PlayerNum::P1 => ProtocolState::Setup([None, Some(color2)]),
                            PlayerNum::P2 => ProtocolState::Setup([Some(color1), None]),
                        };
                    }
                };
            let game = Game::new(Grid::default(), players);
            info!("Game started");
            let client_msg = Response::GameStart {
                grid: game.grid().clone(),
                player: game.players()[player_num].clone(),
                player_num,
            };
            let opponent_msg = Response::GameStart {
                grid: game.grid().clone(),
                player: game.players()[player_num.other()].clone(),
                player_num: player_num.other(),
            };
            send_messages(client, client_msg, opponent, opponent_msg);
            ProtocolState::InGame(game)
        }
        choices => {
            send_message(client, Response::ColorAccepted { player_num });
            ProtocolState::Setup(choices)
        }
    }
}

fn process_move(
    mut game: Game,
    player_num: PlayerNum,
    raw_move: RawMove,
    client: &impl SendMsg,
    opponent: &impl SendMsg,
) -> ProtocolState {
    // The engine tracks whose turn it is; the session only checks that the
    // message came from that player's client.
    if player_num != game.current_player() {
        warn!("Move from {:?} arrived out of turn", player_num);
        send_message(
            client,
            Response::MoveRejected {
                reason: "It is not your turn".to_string(),
            },
        );
        return ProtocolState::InGame(game);
    }
    let column = match Column::new(game.grid(), raw_move.column) {
        Ok(column) => column,
        Err(err) => {
            warn!("Rejected move: {}", err);
            send_message(
                client,
                Response::MoveRejected {
                    reason: err.to_string(),
                },
            );
            return ProtocolState::InGame(game);
        }
    };
    match game.drop_piece(column) {
        Ok(DropOutcome::Placed { row, column }) => {
            let response = Response::PiecePlaced {
                row,
                column,
                player_num,
                grid: game.grid().clone(),
            };
            send_messages(client, response.clone(), opponent, response);
            ProtocolState::InGame(game)
        }
        Ok(DropOutcome::ColumnFull) => {
            send_message(
                client,
                Response::ColumnFull {
                    column: raw_move.column,
                },
            );
            ProtocolState::InGame(game)
        }
        Ok(DropOutcome::Win { player_num: winner }) => {
            info!("Game won by {:?}", winner);
            send_game_end(&game, client, Outcome::Win, opponent, Outcome::Lose);
            ProtocolState::NewGame([None, None])
        }
        Ok(DropOutcome::Draw) => {
            info!("Game drawn");
            send_game_end(&game, client, Outcome::Draw, opponent, Outcome::Draw);
            ProtocolState::NewGame([None, None])
        }
        Err(err @ GameError::GameOver) => {
            // Terminal outcomes leave the InGame state, so a finished game
            // should never still be here
            warn!("Rejected move: {}", err);
            send_message(
                client,
                Response::MoveRejected {
                    reason: err.to_string(),
                },
            );
            ProtocolState::NewGame([None, None])
        }
    }
}

fn process_new_game_choice(
    choices: [Option<bool>; 2],
    player_num: PlayerNum,
    choice: bool,
    client: &impl SendMsg,
    opponent: &impl SendMsg,
) -> ProtocolState {
    let choices = match player_num {
        PlayerNum::P1 => [Some(choice), choices[1]],
        PlayerNum::P2 => [choices[0], Some(choice)],
    };
    match choices {
        [Some(true), Some(true)] => {
            // Colors are picked afresh for the next game
            send_messages(client, Response::SetupOpen, opponent, Response::SetupOpen);
            ProtocolState::Setup([None, None])
        }
        [_, Some(false)] | [Some(false), _] => ProtocolState::End,
        _ => ProtocolState::NewGame(choices),
    }
}

fn send_game_end(
    game: &Game,
    client: &impl SendMsg,
    client_outcome: Outcome,
    opponent: &impl SendMsg,
    opponent_outcome: Outcome,
) {
    let client_msg = Response::GameEnd {
        outcome: client_outcome,
        grid: game.grid().clone(),
    };
    let opponent_msg = Response::GameEnd {
        outcome: opponent_outcome,
        grid: game.grid().clone(),
    };
    send_messages(client, client_msg, opponent, opponent_msg);
}

fn send_message<M: Serialize>(client: &impl SendMsg, message: M) {
    // If the message fails to send even after retries, there's not much we can do but proceed
    let _ = util::retry(1, || client.send(&serde_json::to_string(&message).unwrap()));
}

fn send_messages<M1: Serialize, M2: Serialize>(
    client1: &impl SendMsg,
    message1: M1,
    client2: &impl SendMsg,
    message2: M2,
) {
    send_message(client1, message1);
    send_message(client2, message2);
}
