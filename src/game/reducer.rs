//! Action-in, state-out transitions over the whole application state.
//!
//! `reduce` never mutates its input: a failed action leaves the caller's
//! state exactly as it was, and a successful one hands back the next state
//! for the caller to store and persist.

use crate::game::error::{GameError, StateError};
use crate::game::ledger::Game;
use crate::game::roster::RosterDraft;

/// Everything the UI shows: the setup draft, and the game once started.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub setup: RosterDraft,
    pub game: Option<Game>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    SettingUp,
    Playing,
    Ended,
}

impl AppState {
    pub fn phase(&self) -> Phase {
        match &self.game {
            None => Phase::SettingUp,
            Some(g) if g.is_ended() => Phase::Ended,
            Some(_) => Phase::Playing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Setup
    AddSlot,
    RemoveSlot(usize),
    UpdateSlot { index: usize, text: String },
    StartGame,

    // Auction
    SetAuctionWinner(Option<usize>),
    SetInitialBid(i32),
    SetPromiseIncreased(bool),
    SetFinalPromise(i32),

    // Working round
    SetPlayerDelta { player: usize, delta: i32 },
    ApplyPromiseSuccess,
    ApplyPromiseFailure,
    ApplyZeroTrickPenalty,
    /// `scores` carries raw per-player inputs when the form submits them.
    CommitRound { scores: Option<Vec<String>> },
    UndoLastRound,

    Reset,
}

/// Apply `action` to a copy of `state`.
pub fn reduce(state: &AppState, action: Action) -> Result<AppState, GameError> {
    let mut next = state.clone();

    match action {
        Action::Reset => {
            log::info!("game reset");
            return Ok(AppState::default());
        }
        Action::AddSlot => setup_mut(&mut next)?.add_slot(),
        Action::RemoveSlot(index) => setup_mut(&mut next)?.remove_slot(index),
        Action::UpdateSlot { index, text } => setup_mut(&mut next)?.update_slot(index, &text),
        Action::StartGame => {
            let roster = setup_mut(&mut next)?.confirm()?;
            log::info!("game started with {} players", roster.len());
            next.game = Some(Game::new(roster));
            next.setup = RosterDraft::default();
        }
        Action::SetAuctionWinner(winner) => game_mut(&mut next)?.set_auction_winner(winner)?,
        Action::SetInitialBid(bid) => game_mut(&mut next)?.set_initial_bid(bid),
        Action::SetPromiseIncreased(flag) => game_mut(&mut next)?.set_promise_increased(flag),
        Action::SetFinalPromise(promise) => game_mut(&mut next)?.set_final_promise(promise),
        Action::SetPlayerDelta { player, delta } => {
            game_mut(&mut next)?.set_player_delta(player, delta)?
        }
        Action::ApplyPromiseSuccess => game_mut(&mut next)?.apply_promise_success()?,
        Action::ApplyPromiseFailure => game_mut(&mut next)?.apply_promise_failure()?,
        Action::ApplyZeroTrickPenalty => game_mut(&mut next)?.apply_zero_trick_penalty()?,
        Action::CommitRound { scores } => {
            let game = game_mut(&mut next)?;
            match scores {
                Some(inputs) => game.commit_round_with(&inputs)?,
                None => game.commit_round()?,
            };
        }
        Action::UndoLastRound => {
            game_mut(&mut next)?.undo_last_round();
        }
    }

    Ok(next)
}

fn setup_mut(state: &mut AppState) -> Result<&mut RosterDraft, StateError> {
    if state.game.is_some() {
        return Err(StateError::AlreadyStarted);
    }
    Ok(&mut state.setup)
}

fn game_mut(state: &mut AppState) -> Result<&mut Game, StateError> {
    state.game.as_mut().ok_or(StateError::NotStarted)
}
