//! Error types for roster setup and round scoring.

use thiserror::Error;

/// Roster confirmation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("At least 2 players are required")]
    TooFewPlayers,
    #[error("At most 6 players can play")]
    TooManyPlayers,
    #[error("Player names must be unique")]
    DuplicateNames,
}

/// An action was attempted while its preconditions do not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("Please select the auction winner first")]
    NoAuctionWinner,
    #[error("Please enter the promised score first")]
    NoPromise,
    #[error("Please enter the initial bid first")]
    NoInitialBid,
    #[error("Please enter valid scores for all players")]
    InvalidScore { player: usize },
    #[error("No player at position {index}")]
    InvalidPlayer { index: usize },
    #[error("No game in progress")]
    NotStarted,
    #[error("A game is already in progress")]
    AlreadyStarted,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    State(#[from] StateError),
}
