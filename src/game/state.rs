//! Global application state container.
//!
//! Uses `thread_local!` + `RefCell` for safe mutable access in single-threaded
//! WASM. The Service Worker keeps the WASM module alive, so state persists
//! across `handle_request` calls until the worker is recycled; the page then
//! restores it from localStorage via `/api/game/restore`.

use std::cell::RefCell;

use crate::game::error::GameError;
use crate::game::reducer::{reduce, Action, AppState};
use crate::storage::Snapshot;

thread_local! {
    static STATE: RefCell<AppState> = RefCell::new(AppState::default());
}

/// Execute a closure with read access to the state.
pub fn with_state<F, R>(f: F) -> R
where
    F: FnOnce(&AppState) -> R,
{
    STATE.with(|s| f(&s.borrow()))
}

/// Replace the entire state (used by restore, import, and tests).
pub fn replace_state(new_state: AppState) {
    STATE.with(|s| {
        *s.borrow_mut() = new_state;
    });
}

/// Run `action` through the reducer and keep the result. On error the stored
/// state is left untouched.
pub fn dispatch(action: Action) -> Result<(), GameError> {
    STATE.with(|s| -> Result<(), GameError> {
        let next = reduce(&s.borrow(), action)?;
        *s.borrow_mut() = next;
        Ok(())
    })
}

/// Apply several actions as one step: either all of them land or none do.
pub fn dispatch_all(actions: Vec<Action>) -> Result<(), GameError> {
    STATE.with(|s| -> Result<(), GameError> {
        let next = actions
            .into_iter()
            .try_fold(s.borrow().clone(), |state, action| reduce(&state, action))?;
        *s.borrow_mut() = next;
        Ok(())
    })
}

/// Export the entire state as snapshot JSON.
pub fn export_state_json() -> String {
    with_state(|state| {
        serde_json::to_string(&Snapshot::capture(state)).unwrap_or_else(|_| "{}".to_string())
    })
}

/// Import state from snapshot JSON.
pub fn import_state_json(json: &str) -> Result<(), String> {
    let snap: Snapshot =
        serde_json::from_str(json).map_err(|e| format!("Invalid game state JSON: {}", e))?;
    let state = snap.try_into_state().map_err(|e| e.to_string())?;
    replace_state(state);
    Ok(())
}
