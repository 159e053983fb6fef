use gomoku::IllegalPlacement;

#[derive(Debug)]
/// Error type for everything that can go wrong while talking to the hub.
///
/// None of these are recoverable: the agent that hits one stops playing.
pub enum ClientError {
    /// The hub address does not form a valid URL.
    InvalidAddress(url::ParseError),
    /// The connection could not be established, or broke down.
    Transport(tungstenite::Error),
    /// A frame that is not a text frame was received.
    ProtocolFraming { frame_kind: &'static str },
    /// A text frame did not contain a valid message.
    Decode(serde_json::Error),
    /// An outgoing message could not be serialized.
    Encode(serde_json::Error),
    /// The hub sent a different message than the protocol prescribes.
    UnexpectedMessageType {
        expected: &'static str,
        received: &'static str,
    },
    /// The hub reported a move that does not fit the local board, i.e. the
    /// local replica has diverged from the hub's state.
    BoardConsistencyViolation {
        player_index: usize,
        err: IllegalPlacement,
    },
    /// `start()` or `turn()` was called before `join()`.
    NotJoined,
    /// `turn()` was called before `start()`.
    NotStarted,
    /// It's this agent's turn, but the board is full.
    NoLegalMove { player_index: usize },
    /// Participants of a session disagree on who starts a game.
    StartingPlayerMismatch { expected: usize, received: usize },
    /// Some participants of a session saw the game end on a ply, others didn't.
    OutcomeMismatch { game_idx: usize },
    /// A session needs at least two participants.
    TooFewParticipants { num_participants: usize },
    /// A participant is configured for a different number of players than
    /// the session has participants.
    PlayerCountMismatch {
        num_participants: usize,
        num_players: usize,
    },
    /// Participants of a session are configured for different board sizes.
    BoardSizeMismatch { expected: usize, received: usize },
    /// No participant of a session was assigned player index 0.
    MissingReporter,
    /// A participant running on its own thread panicked.
    ParticipantPanicked,
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::InvalidAddress(err) => Some(err),
            ClientError::Transport(err) => Some(err),
            ClientError::Decode(err) | ClientError::Encode(err) => Some(err),
            ClientError::BoardConsistencyViolation { err, .. } => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::InvalidAddress(_) => write!(f, "Invalid hub address"),
            ClientError::Transport(_) => write!(f, "Connection to the hub failed"),
            ClientError::ProtocolFraming { frame_kind } => {
                write!(f, "Expected a text frame from the hub, got a {} frame", frame_kind)
            }
            ClientError::Decode(_) => write!(f, "Could not decode a message from the hub"),
            ClientError::Encode(_) => write!(f, "Could not encode a message for the hub"),
            ClientError::UnexpectedMessageType { expected, received } => write!(
                f,
                "Expected a {} message from the hub, got {}",
                expected, received
            ),
            ClientError::BoardConsistencyViolation { player_index, .. } => write!(
                f,
                "The board of player {} is out of sync with the hub",
                player_index
            ),
            ClientError::NotJoined => write!(f, "The agent has not joined a room yet"),
            ClientError::NotStarted => write!(f, "No game has been started yet"),
            ClientError::NoLegalMove { player_index } => write!(
                f,
                "Player {} is supposed to move, but the board is full",
                player_index
            ),
            ClientError::StartingPlayerMismatch { expected, received } => write!(
                f,
                "Participants disagree on the starting player: {} vs. {}",
                expected, received
            ),
            ClientError::OutcomeMismatch { game_idx } => write!(
                f,
                "Participants disagree on whether game {} has ended",
                game_idx
            ),
            ClientError::TooFewParticipants { num_participants } => write!(
                f,
                "A session needs at least two participants, got {}",
                num_participants
            ),
            ClientError::PlayerCountMismatch {
                num_participants,
                num_players,
            } => write!(
                f,
                "The session has {} participants, but a participant expects {} players",
                num_participants, num_players
            ),
            ClientError::BoardSizeMismatch { expected, received } => write!(
                f,
                "Participants disagree on the board size: {} vs. {}",
                expected, received
            ),
            ClientError::MissingReporter => {
                write!(f, "No participant was assigned player index 0")
            }
            ClientError::ParticipantPanicked => write!(f, "A participant panicked"),
        }
    }
}

impl From<tungstenite::Error> for ClientError {
    fn from(err: tungstenite::Error) -> Self {
        ClientError::Transport(err)
    }
}
