//! `/api/game/*` routes: reset, restore from localStorage, and
//! export/import of the whole game.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::constants::ALL_KEYS;
use crate::game::reducer::Action;
use crate::game::state;
use crate::routes::page::{after_action, persist_script, render_page};
use crate::routes::util::{get_param, parse_form_body};
use crate::storage::{self, MemoryStore};

// ── POST /api/game/reset ───────────────────────────────────────────

/// Handle POST /api/game/reset
/// Clears roster and ledger and removes every persisted key.
pub fn handle_reset_post(_body: &str) -> String {
    after_action(state::dispatch(Action::Reset))
}

// ── POST /api/game/restore ─────────────────────────────────────────

/// Handle POST /api/game/restore
/// Body: each localStorage key this app uses, URL-encoded, e.g.
/// `huutopussi-players=%5B%22Alice%22...&huutopussi-game-started=true`.
/// Called on page load. Missing or malformed values fall back to defaults.
pub fn handle_restore_post(body: &str) -> String {
    let params = parse_form_body(body);
    let store: MemoryStore = params
        .into_iter()
        .filter(|(k, _)| ALL_KEYS.contains(&k.as_str()))
        .collect();
    state::replace_state(storage::load(&store));
    log::debug!("state restored from {} stored keys", store.len());
    render_page(None)
}

// ── GET /api/game/state ────────────────────────────────────────────

/// Handle GET /api/game/state
/// Returns the full state as snapshot JSON.
pub fn handle_state_get(_query: &str) -> String {
    state::export_state_json()
}

// ── GET /api/game/export ───────────────────────────────────────────

/// Handle GET /api/game/export
/// Returns a <script> tag that downloads the game as a base64 text file.
pub fn handle_export_get(_query: &str) -> String {
    let encoded = URL_SAFE_NO_PAD.encode(state::export_state_json());
    format!(
        r#"<script>
(function() {{
  var b = new Blob(['{encoded}'], {{type: 'text/plain'}});
  var a = document.createElement('a');
  a.href = URL.createObjectURL(b);
  a.download = 'huutopussi-game.txt';
  a.click();
  URL.revokeObjectURL(a.href);
  console.log('[huutopussi] Game exported');
}})();
</script>"#
    )
}

// ── POST /api/game/import ──────────────────────────────────────────

/// Handle POST /api/game/import
/// Accepts `state={base64}` (or the bare file contents) as produced by
/// export. Plain snapshot JSON is accepted too.
pub fn handle_import_post(body: &str) -> String {
    let params = parse_form_body(body);
    let raw = get_param(&params, "state").unwrap_or(body.trim()).trim();

    match decode_import(raw).and_then(|json| state::import_state_json(&json)) {
        Ok(()) => {
            let mut html = String::from(
                r#"<span class="text-emerald-600">Game imported successfully</span>"#,
            );
            html.push_str(&persist_script());
            html
        }
        Err(e) => format!(r#"<span class="text-red-500">Import failed: {}</span>"#, e),
    }
}

fn decode_import(raw: &str) -> Result<String, String> {
    if raw.starts_with('{') {
        return Ok(raw.to_string());
    }
    let bytes = URL_SAFE_NO_PAD
        .decode(raw)
        .map_err(|e| format!("base64 decode error: {}", e))?;
    String::from_utf8(bytes).map_err(|e| format!("not UTF-8: {}", e))
}
