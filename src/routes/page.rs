//! `/api/page`: the top-level view. Shows the roster setup until a game
//! starts, then the score tracker.
//!
//! Mutating routes funnel through [`after_action`], which re-renders the page
//! and appends the localStorage write-through for the new state.

use crate::game::error::GameError;
use crate::game::state::with_state;
use crate::routes::{score, setup};
use crate::storage::{self, ScriptStore};

/// Handle GET /api/page
pub fn handle_page_get(_query: &str) -> String {
    render_page(None)
}

/// Render whichever view matches the current state, with an optional error
/// banner.
pub fn render_page(error: Option<&str>) -> String {
    with_state(|state| match &state.game {
        None => setup::render_setup_panel(&state.setup, error),
        Some(game) => score::render_score_tracker(game, error),
    })
}

/// Script that mirrors the current state into localStorage.
pub fn persist_script() -> String {
    let mut store = ScriptStore::new();
    with_state(|state| storage::save(state, &mut store));
    store.render_script()
}

/// Page after a dispatched action: persisted on success, error banner and no
/// write on failure.
pub fn after_action(result: Result<(), GameError>) -> String {
    match result {
        Ok(()) => {
            let mut html = render_page(None);
            html.push_str(&persist_script());
            html
        }
        Err(e) => render_page(Some(&e.to_string())),
    }
}

/// Shared error banner markup.
pub fn render_error(error: Option<&str>) -> String {
    match error {
        Some(msg) => format!(
            r#"<div class="text-red-500 text-sm text-center" role="alert">{}</div>"#,
            crate::routes::util::escape_html(msg)
        ),
        None => String::new(),
    }
}
