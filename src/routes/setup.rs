//! `/api/setup`: roster entry before a game starts.

use crate::constants::{MAX_NAME_LEN, MAX_PLAYERS, MIN_PLAYERS};
use crate::game::reducer::Action;
use crate::game::roster::RosterDraft;
use crate::game::state;
use crate::routes::page::{after_action, render_error, render_page};
use crate::routes::util::{escape_html, get_param, parse_form_body};

// ── POST /api/setup ────────────────────────────────────────────────

/// Handle POST /api/setup
/// Body params:
///   - action=add                        → add an empty name slot
///   - action=remove&index={n}           → remove slot n
///   - action=update&index={n}&name={s}  → set slot n's text
///   - action=start                      → confirm roster and start the game
///
/// Returns the re-rendered page.
pub fn handle_setup_post(body: &str) -> String {
    let params = parse_form_body(body);
    let action = get_param(&params, "action").unwrap_or("");
    let index: Option<usize> = get_param(&params, "index").and_then(|s| s.parse().ok());

    let action = match (action, index) {
        ("add", _) => Action::AddSlot,
        ("remove", Some(i)) => Action::RemoveSlot(i),
        ("update", Some(i)) => Action::UpdateSlot {
            index: i,
            text: get_param(&params, "name").unwrap_or("").to_string(),
        },
        ("start", _) => Action::StartGame,
        ("remove" | "update", None) => {
            return r#"<span class="text-red-500">Missing or invalid index parameter</span>"#
                .to_string();
        }
        _ => return render_page(None),
    };

    after_action(state::dispatch(action))
}

// ── Rendering ──────────────────────────────────────────────────────

/// Render the roster setup card.
pub fn render_setup_panel(draft: &RosterDraft, error: Option<&str>) -> String {
    let slots = draft.slots();
    let mut html = String::with_capacity(2048);

    html.push_str(r#"<div class="bg-white rounded-xl shadow-lg p-6 space-y-6">"#);
    html.push_str(r#"<div class="text-center">"#);
    html.push_str(r#"<h1 class="text-3xl font-bold text-gray-900 mb-2">🃏 Huutopussi</h1>"#);
    html.push_str(r#"<p class="text-gray-600">Score Tracker</p></div>"#);

    html.push_str(r#"<div class="space-y-4">"#);
    html.push_str(r#"<h2 class="text-xl font-semibold text-gray-800">Add Players</h2>"#);

    for (i, name) in slots.iter().enumerate() {
        html.push_str(r#"<div class="flex gap-2">"#);
        html.push_str(&format!(
            r##"<input type="text" name="name" value="{}" placeholder="Player {}" maxlength="{}" class="flex-1 px-3 py-2 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-green-500" hx-post="/api/setup" hx-trigger="change" hx-vals='{{"action":"update","index":"{}"}}' hx-target="#app" hx-swap="innerHTML">"##,
            escape_html(name),
            i + 1,
            MAX_NAME_LEN,
            i
        ));
        if slots.len() > MIN_PLAYERS {
            html.push_str(&format!(
                r##"<button class="px-3 py-2 bg-red-500 text-white rounded-lg hover:bg-red-600 transition-colors" hx-post="/api/setup" hx-vals='{{"action":"remove","index":"{}"}}' hx-target="#app" hx-swap="innerHTML" aria-label="Remove player">&#x2715;</button>"##,
                i
            ));
        }
        html.push_str("</div>");
    }

    if slots.len() < MAX_PLAYERS {
        html.push_str(
            r##"<button class="w-full py-2 border-2 border-dashed border-gray-300 text-gray-600 rounded-lg hover:border-green-500 hover:text-green-500 transition-colors" hx-post="/api/setup" hx-vals='{"action":"add"}' hx-target="#app" hx-swap="innerHTML">+ Add Player</button>"##,
        );
    }

    html.push_str(&render_error(error));

    html.push_str(
        r##"<button class="w-full py-3 bg-green-600 text-white font-semibold rounded-lg hover:bg-green-700 transition-colors" hx-post="/api/setup" hx-vals='{"action":"start"}' hx-target="#app" hx-swap="innerHTML">Start Game</button>"##,
    );
    html.push_str("</div>");

    html.push_str(r#"<div class="text-xs text-gray-500 text-center"><p>Huutopussi is a Finnish card game where players try to reach 500 points first.</p></div>"#);
    html.push_str("</div>");
    html
}
