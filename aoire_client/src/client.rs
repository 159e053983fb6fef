use std::time::Instant;

use gomoku::{select_move, Board, ClientMessage, HubMessage, Owner};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{ClientError, Config, Transport};

/// The outcome of one game from one agent's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub is_winner: bool,
    pub starting_player_index: usize,
}

/// The results of all games one agent played in a room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub user_agent: Option<String>,
    pub player_index: usize,
    pub results: Vec<GameResult>,
}

/// A Gomoku agent connected to the hub.
///
/// Holds the agent's replica of the board, which is only ever changed by
/// the hub's state updates, never by the agent's own moves directly.
pub struct Client<T> {
    transport: T,
    config: Config,
    /// Assigned by the hub on `join()`.
    player_index: Option<usize>,
    /// Set by `start()`.
    starting_player_index: Option<usize>,
    board: Board,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T, config: Config) -> Self {
        let board = Board::new(config.game.board_size);
        Self {
            transport,
            config,
            player_index: None,
            starting_player_index: None,
            board,
        }
    }

    pub fn player_index(&self) -> Option<usize> {
        self.player_index
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn user_agent(&self) -> Option<String> {
        self.config.identity.as_ref().map(|identity| identity.user_agent())
    }

    /// Asks the hub to join `room` for `num_games` games, and returns the
    /// player index the hub assigned.
    pub fn join(&mut self, room: &str, num_games: usize) -> Result<usize, ClientError> {
        self.transport.send(&ClientMessage::StartGame {
            game_type: self.config.game.game_type.clone(),
            room: String::from(room),
            n_games: num_games,
            user_agent: self.user_agent(),
        })?;
        match self.transport.receive()? {
            HubMessage::YouAre { index } => {
                debug!(room, player_index = index, "Joined room");
                self.player_index = Some(index);
                Ok(index)
            }
            other => Err(unexpected_message("YouAre", &other)),
        }
    }

    /// Waits for the next game to start, and returns the index of the
    /// player who moves first.
    pub fn start(&mut self) -> Result<usize, ClientError> {
        let player_index = self.player_index.ok_or(ClientError::NotJoined)?;
        match self.transport.receive()? {
            HubMessage::Started {
                player_index: starting_player_index,
            } => {
                debug!(player_index, starting_player_index, "Game started");
                self.board = Board::new(self.config.game.board_size);
                self.starting_player_index = Some(starting_player_index);
                Ok(starting_player_index)
            }
            other => Err(unexpected_message("Started", &other)),
        }
    }

    /// Plays one ply.
    ///
    /// If `active_player_index` is this agent, a move is selected and sent
    /// first. In any case, the hub's state update for this ply is then
    /// applied to the board. Returns the result if the ply ended the game.
    pub fn turn(&mut self, active_player_index: usize) -> Result<Option<GameResult>, ClientError> {
        let player_index = self.player_index.ok_or(ClientError::NotJoined)?;
        let starting_player_index = self.starting_player_index.ok_or(ClientError::NotStarted)?;
        let my_turn = active_player_index == player_index;
        if my_turn {
            self.make_move(player_index)?;
        }

        // Whoever moved, the hub sends the update to every player in the room
        let (index, winner) = match self.transport.receive()? {
            HubMessage::StateUpdate { index, winner } => (index, winner),
            other => return Err(unexpected_message("StateUpdate", &other)),
        };
        let owner = if my_turn { Owner::Own } else { Owner::Opponent };
        let coord = self
            .board
            .place(index, owner)
            .map_err(|err| ClientError::BoardConsistencyViolation { player_index, err })?;
        debug!(player_index, active_player_index, %coord, ?winner, "Applied state update");

        Ok(winner.map(|winner| {
            debug!("Final board of player {}:\n{}", player_index, self.board);
            GameResult {
                is_winner: winner == player_index,
                starting_player_index,
            }
        }))
    }

    /// Joins `room` and plays `num_games` games in it.
    pub fn play_games(&mut self, room: &str, num_games: usize) -> Result<PlayerReport, ClientError> {
        let player_index = self.join(room, num_games)?;
        let num_players = self.config.game.num_players;
        let mut results = Vec::with_capacity(num_games);
        for game_idx in 0..num_games {
            let mut active_player_index = self.start()?;
            let result = loop {
                if let Some(result) = self.turn(active_player_index)? {
                    break result;
                }
                active_player_index = (active_player_index + 1) % num_players;
            };
            info!(player_index, game_idx, is_winner = result.is_winner, "Game over");
            results.push(result);
        }
        Ok(PlayerReport {
            user_agent: self.user_agent(),
            player_index,
            results,
        })
    }

    fn make_move(&mut self, player_index: usize) -> Result<(), ClientError> {
        let t_start = Instant::now();
        let target = select_move(&self.board, self.config.game.move_time_limit())
            .ok_or(ClientError::NoLegalMove { player_index })?;
        let index = self
            .board
            .flatten(target)
            .ok_or(ClientError::NoLegalMove { player_index })?;
        info!(
            player_index,
            %target,
            elapsed_ms = t_start.elapsed().as_millis() as u64,
            "Moving"
        );
        self.transport.send(&ClientMessage::Move { index })
    }
}

fn unexpected_message(expected: &'static str, received: &HubMessage) -> ClientError {
    ClientError::UnexpectedMessageType {
        expected,
        received: received.kind(),
    }
}
