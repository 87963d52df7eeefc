//! Game rules and fixed names shared by the engine, persistence, and the
//! offline cache.

/// First player to reach or exceed this total ends the game.
pub const WINNING_SCORE: i32 = 500;

/// Totals at or above this (but below `WINNING_SCORE`) are highlighted.
pub const WARNING_SCORE: i32 = 400;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;

/// Player names are truncated to this many characters while typing.
pub const MAX_NAME_LEN: usize = 20;

/// Upper bound for bid inputs. Applied at the route, not by the ledger.
pub const MAX_BID: i32 = 500;

/// Bound on one player's score for a single round, either sign. Entered
/// scores are clamped to it.
pub const MAX_ROUND_SCORE: i32 = 1000;

/// localStorage keys
pub const KEY_PLAYERS: &str = "huutopussi-players";
pub const KEY_GAME_STARTED: &str = "huutopussi-game-started";
pub const KEY_SCORES: &str = "huutopussi-scores";
pub const KEY_ROUNDS: &str = "huutopussi-rounds";
pub const KEY_AUCTION: &str = "huutopussi-auction";

pub const ALL_KEYS: [&str; 5] = [
    KEY_PLAYERS,
    KEY_GAME_STARTED,
    KEY_SCORES,
    KEY_ROUNDS,
    KEY_AUCTION,
];

/// Cache bucket for the current app version. Bump on every release so
/// activation evicts the previous bucket.
pub const CACHE_NAME: &str = "huutopussi-tracker-v2";
