use tracing::{debug, info, warn};

use crate::{Client, ClientError, GameResult, PlayerReport, Transport};

/// The player index whose results a session reports.
pub const REPORTING_PLAYER_INDEX: usize = 0;

/// Several local agents playing each other in one room.
pub struct Session<T> {
    room: String,
    num_games: usize,
    participants: Vec<Client<T>>,
}

impl<T> Session<T> {
    pub fn participants(&self) -> &[Client<T>] {
        &self.participants
    }
}

impl<T: Transport> Session<T> {
    /// Returns an error if there are fewer than two participants, or if the
    /// participants are not configured for the same game: every one of them
    /// must expect as many players as there are participants, and the same
    /// board size.
    pub fn new(room: &str, participants: Vec<Client<T>>, num_games: usize) -> Result<Self, ClientError> {
        let num_participants = participants.len();
        if num_participants < 2 {
            return Err(ClientError::TooFewParticipants { num_participants });
        }
        let board_size = participants[0].config().game.board_size;
        for participant in &participants {
            let game = &participant.config().game;
            if game.num_players != num_participants {
                return Err(ClientError::PlayerCountMismatch {
                    num_participants,
                    num_players: game.num_players,
                });
            }
            if game.board_size != board_size {
                return Err(ClientError::BoardSizeMismatch {
                    expected: board_size,
                    received: game.board_size,
                });
            }
        }
        Ok(Self {
            room: String::from(room),
            num_games,
            participants,
        })
    }

    /// Plays all games, driving the participants one after another on the
    /// current thread, and returns the report of player 0.
    ///
    /// In every ply, the participant whose turn it is goes first, since the
    /// hub only sends out the state update once it has received the move.
    /// The other participants then only apply the update.
    pub fn run(&mut self) -> Result<PlayerReport, ClientError> {
        select_reporter(self.play_all()?)
    }

    /// Like [`Self::run()`], but returns the reports of all participants, in
    /// participant order.
    pub fn play_all(&mut self) -> Result<Vec<PlayerReport>, ClientError> {
        let player_indices = self
            .participants
            .iter_mut()
            .map(|participant| participant.join(&self.room, self.num_games))
            .collect::<Result<Vec<usize>, ClientError>>()?;

        let mut results = vec![Vec::with_capacity(self.num_games); self.participants.len()];
        for game_idx in 0..self.num_games {
            let starting_player_index = self.start_game()?;
            let outcomes = self.play_game(game_idx, starting_player_index)?;
            let winner = player_indices
                .iter()
                .zip(&outcomes)
                .find(|(_, outcome)| outcome.is_winner)
                .map(|(&player_index, _)| player_index);
            info!(
                room = %self.room,
                game_idx,
                starting_player_index,
                ?winner,
                "Game over"
            );
            for (participant_results, outcome) in results.iter_mut().zip(outcomes) {
                participant_results.push(outcome);
            }
        }

        Ok(self
            .participants
            .iter()
            .zip(player_indices)
            .zip(results)
            .map(|((participant, player_index), results)| PlayerReport {
                user_agent: participant.user_agent(),
                player_index,
                results,
            })
            .collect())
    }

    // Every participant waits for the game to start; they must agree on who
    // moves first.
    fn start_game(&mut self) -> Result<usize, ClientError> {
        let mut starting_player_index = None;
        for participant in &mut self.participants {
            let received = participant.start()?;
            let expected = *starting_player_index.get_or_insert(received);
            if expected != received {
                return Err(ClientError::StartingPlayerMismatch { expected, received });
            }
        }
        starting_player_index.ok_or(ClientError::TooFewParticipants { num_participants: 0 })
    }

    // Returns the result of every participant, in participant order.
    fn play_game(&mut self, game_idx: usize, starting_player_index: usize) -> Result<Vec<GameResult>, ClientError> {
        let num_players = self.participants.len();
        let mut active_player_index = starting_player_index;
        let mut num_plies = 0;
        loop {
            let actor = self
                .participants
                .iter()
                .position(|participant| participant.player_index() == Some(active_player_index));
            let mut outcomes = vec![None; num_players];
            if let Some(actor) = actor {
                outcomes[actor] = self.participants[actor].turn(active_player_index)?;
            }
            for (idx, participant) in self.participants.iter_mut().enumerate() {
                if Some(idx) != actor {
                    outcomes[idx] = participant.turn(active_player_index)?;
                }
            }
            num_plies += 1;

            if outcomes.iter().all(Option::is_some) {
                debug!(game_idx, num_plies, "Game finished");
                return Ok(outcomes.into_iter().flatten().collect());
            }
            if outcomes.iter().any(Option::is_some) {
                return Err(ClientError::OutcomeMismatch { game_idx });
            }
            active_player_index = (active_player_index + 1) % num_players;
        }
    }
}

impl<T: Transport + Send> Session<T> {
    /// Plays all games with every participant on its own thread, and returns
    /// the report of player 0.
    ///
    /// Each participant simply plays through its games, relying on the hub
    /// to order the messages on each connection. Waits for all participants
    /// to finish, so a single stuck participant stalls the whole session.
    pub fn run_concurrently(&mut self) -> Result<PlayerReport, ClientError> {
        select_reporter(self.play_all_concurrently()?)
    }

    /// Like [`Self::run_concurrently()`], but returns the reports of all
    /// participants, in participant order.
    pub fn play_all_concurrently(&mut self) -> Result<Vec<PlayerReport>, ClientError> {
        let room = self.room.as_str();
        let num_games = self.num_games;
        let reports: Vec<Result<PlayerReport, ClientError>> = std::thread::scope(|scope| {
            let handles: Vec<_> = self
                .participants
                .iter_mut()
                .map(|participant| scope.spawn(move || participant.play_games(room, num_games)))
                .collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle.join().unwrap_or_else(|_| {
                        warn!(room, "Participant thread panicked");
                        Err(ClientError::ParticipantPanicked)
                    })
                })
                .collect()
        });

        let reports = reports.into_iter().collect::<Result<Vec<_>, _>>()?;
        for report in &reports {
            debug!(room, player_index = report.player_index, results = ?report.results, "Participant finished");
        }
        Ok(reports)
    }
}

fn select_reporter(reports: Vec<PlayerReport>) -> Result<PlayerReport, ClientError> {
    reports
        .into_iter()
        .find(|report| report.player_index == REPORTING_PLAYER_INDEX)
        .ok_or(ClientError::MissingReporter)
}
