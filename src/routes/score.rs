//! `/api/score/*` routes: auction entry, round deltas, quick actions,
//! commit/undo, and the score tracker view.

use crate::constants::{MAX_BID, MAX_ROUND_SCORE, WARNING_SCORE, WINNING_SCORE};
use crate::game::ledger::{Game, RoundEntry};
use crate::game::reducer::Action;
use crate::game::state::{self, with_state};
use crate::routes::page::{after_action, render_error, render_page};
use crate::routes::util::{escape_html, get_all, get_param, parse_form_body};

/// Number inputs behave like `parseInt(v) || 0`: anything unparseable is 0.
/// Out-of-range values saturate before the caller's clamp.
fn parse_number(raw: &str) -> i32 {
    raw.trim()
        .parse::<i64>()
        .map(|v| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
        .unwrap_or(0)
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw, "true" | "on" | "1")
}

// ── POST /api/score/auction ────────────────────────────────────────

/// Handle POST /api/score/auction
/// Body params (any subset, applied together):
///   - winner={n}     → auction winner index, `-1` or empty clears it
///   - bid={n}        → initial bid, clamped to 0..=500
///   - increased={b}  → promise raised flag
///   - final={n}      → raised promise, clamped to 0..=500
pub fn handle_auction_post(body: &str) -> String {
    let params = parse_form_body(body);
    let mut actions = Vec::new();

    if let Some(w) = get_param(&params, "winner") {
        let winner = w.trim().parse::<i64>().ok().and_then(|i| usize::try_from(i).ok());
        actions.push(Action::SetAuctionWinner(winner));
    }
    if let Some(b) = get_param(&params, "bid") {
        actions.push(Action::SetInitialBid(parse_number(b).clamp(0, MAX_BID)));
    }
    if let Some(f) = get_param(&params, "increased") {
        actions.push(Action::SetPromiseIncreased(parse_flag(f)));
    }
    if let Some(f) = get_param(&params, "final") {
        actions.push(Action::SetFinalPromise(parse_number(f).clamp(0, MAX_BID)));
    }

    after_action(state::dispatch_all(actions))
}

// ── POST /api/score/delta ──────────────────────────────────────────

/// Handle POST /api/score/delta
/// Body: player={n}&value={n}. The score inputs post under their own name,
/// so `score={n}` is accepted in place of `value`. Values are clamped to
/// ±1000.
pub fn handle_delta_post(body: &str) -> String {
    let params = parse_form_body(body);
    let player: usize = match get_param(&params, "player").and_then(|s| s.parse().ok()) {
        Some(p) => p,
        None => {
            return r#"<span class="text-red-500">Missing or invalid player parameter</span>"#
                .to_string();
        }
    };
    let raw = get_param(&params, "value")
        .or_else(|| get_param(&params, "score"))
        .unwrap_or("");
    let delta = parse_number(raw).clamp(-MAX_ROUND_SCORE, MAX_ROUND_SCORE);
    after_action(state::dispatch(Action::SetPlayerDelta { player, delta }))
}

// ── POST /api/score/apply ──────────────────────────────────────────

/// Handle POST /api/score/apply
/// Body: action=success|failure|penalty
pub fn handle_apply_post(body: &str) -> String {
    let params = parse_form_body(body);
    let action = match get_param(&params, "action").unwrap_or("") {
        "success" => Action::ApplyPromiseSuccess,
        "failure" => Action::ApplyPromiseFailure,
        "penalty" => Action::ApplyZeroTrickPenalty,
        _ => return render_page(None),
    };
    after_action(state::dispatch(action))
}

// ── POST /api/score/commit ─────────────────────────────────────────

/// Handle POST /api/score/commit
/// Body: optional `score={n}` fields, one per player in roster order. When
/// absent, the working deltas already held are committed.
pub fn handle_commit_post(body: &str) -> String {
    let params = parse_form_body(body);
    let scores = get_all(&params, "score");
    let scores = if scores.is_empty() { None } else { Some(scores) };
    after_action(state::dispatch(Action::CommitRound { scores }))
}

// ── POST /api/score/undo ───────────────────────────────────────────

/// Handle POST /api/score/undo
pub fn handle_undo_post(_body: &str) -> String {
    after_action(state::dispatch(Action::UndoLastRound))
}

// ── GET /api/score/totals ──────────────────────────────────────────

/// Handle GET /api/score/totals
/// Returns running totals as a JSON array (`[]` before a game starts).
pub fn handle_totals_get(_query: &str) -> String {
    with_state(|s| {
        let totals = s.game.as_ref().map(Game::totals).unwrap_or_default();
        serde_json::to_string(&totals).unwrap_or_else(|_| "[]".to_string())
    })
}

// ── Rendering ──────────────────────────────────────────────────────

const INPUT_CLASS: &str = "w-full px-2 py-1 border border-gray-300 rounded focus:outline-none focus:ring-2 focus:ring-green-500 text-center text-gray-900";

/// Render the whole score tracker card for a running game.
pub fn render_score_tracker(game: &Game, error: Option<&str>) -> String {
    let mut html = String::with_capacity(8192);
    let names = game.roster().names();

    html.push_str(r#"<div class="bg-white rounded-xl shadow-lg overflow-hidden">"#);

    // Header
    html.push_str(r#"<div class="bg-green-600 text-white p-4"><div class="flex justify-between items-center">"#);
    html.push_str(r#"<h1 class="text-xl font-bold">🃏 Huutopussi</h1>"#);
    html.push_str(
        r##"<button class="text-sm bg-green-700 px-3 py-1 rounded hover:bg-green-800 transition-colors" hx-post="/api/game/reset" hx-confirm="Start a new game? Current scores will be lost." hx-target="#app" hx-swap="innerHTML">New Game</button>"##,
    );
    html.push_str("</div>");
    html.push_str(&format!(
        r#"<p class="text-green-100 text-sm">Round {}</p></div>"#,
        game.current_round()
    ));

    if let Some(w) = game.winner() {
        html.push_str(&format!(
            r#"<div class="bg-yellow-400 text-yellow-900 p-4 text-center font-bold">🎉 Game Over! Winner: {} 🎉</div>"#,
            escape_html(&names[w])
        ));
    }

    html.push_str(&render_error(error));

    if !game.is_ended() {
        html.push_str(&render_round_input(game));
    }

    html.push_str(&render_history(game));

    html.push_str(r#"<div class="p-4 bg-gray-50 border-t text-xs text-gray-700"><p><strong>Goal:</strong> Be the first to reach 500 points. Highest score wins!</p></div>"#);
    html.push_str("</div>");
    html
}

/// Auction controls, per-player inputs, quick actions, and the commit button.
fn render_round_input(game: &Game) -> String {
    let names = game.roster().names();
    let working = game.working();
    let auction = &working.auction;
    let mut html = String::with_capacity(4096);

    html.push_str(r#"<div class="p-4 bg-gray-50 space-y-4">"#);

    // Auction
    html.push_str(r#"<div><h3 class="font-semibold mb-3 text-gray-800">Auction:</h3><div class="grid grid-cols-1 gap-3 mb-3">"#);
    html.push_str(r#"<div><label class="text-sm font-medium text-gray-700 block mb-1" for="auctionWinner">Auction Winner:</label>"#);
    html.push_str(
        r##"<select id="auctionWinner" name="winner" class="w-full px-2 py-1 border border-gray-300 rounded focus:outline-none focus:ring-2 focus:ring-green-500 text-gray-900" hx-post="/api/score/auction" hx-trigger="change" hx-target="#app" hx-swap="innerHTML">"##,
    );
    html.push_str(&format!(
        r#"<option value="-1"{}>Select winner...</option>"#,
        if auction.auction_winner.is_none() { " selected" } else { "" }
    ));
    for (i, name) in names.iter().enumerate() {
        let selected = if auction.auction_winner == Some(i) { " selected" } else { "" };
        html.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            i,
            selected,
            escape_html(name)
        ));
    }
    html.push_str("</select></div>");

    html.push_str(r#"<div class="grid grid-cols-2 gap-2"><div>"#);
    html.push_str(r#"<label class="text-sm font-medium text-gray-800 block mb-1" for="initialBid">Initial Bid:</label>"#);
    html.push_str(&format!(
        r##"<input type="number" id="initialBid" name="bid" value="{}" placeholder="0" min="0" max="{}" class="{}" hx-post="/api/score/auction" hx-trigger="change" hx-target="#app" hx-swap="innerHTML">"##,
        blank_if_zero(auction.initial_bid),
        MAX_BID,
        INPUT_CLASS
    ));
    html.push_str("</div>");
    html.push_str(&format!(
        r##"<div class="flex items-center"><label class="flex items-center space-x-2"><input type="checkbox" class="rounded"{} hx-post="/api/score/auction" hx-vals='{{"increased":"{}"}}' hx-target="#app" hx-swap="innerHTML"><span class="text-sm text-gray-800">Promise increased?</span></label></div>"##,
        if auction.promise_increased { " checked" } else { "" },
        !auction.promise_increased
    ));
    html.push_str("</div>");

    if auction.promise_increased {
        html.push_str(r#"<div><label class="text-sm font-medium text-gray-800 block mb-1" for="finalPromise">Final Promise:</label>"#);
        html.push_str(&format!(
            r##"<input type="number" id="finalPromise" name="final" value="{}" placeholder="0" min="{}" max="{}" class="{}" hx-post="/api/score/auction" hx-trigger="change" hx-target="#app" hx-swap="innerHTML"></div>"##,
            blank_if_zero(auction.final_promise),
            auction.initial_bid,
            MAX_BID,
            INPUT_CLASS
        ));
    }
    html.push_str("</div></div>");

    // Round scores
    html.push_str(r#"<div id="round-scores"><h3 class="font-semibold mb-3 text-gray-800">Round Scores:</h3><div class="grid grid-cols-2 gap-2 mb-4">"#);
    for (i, name) in names.iter().enumerate() {
        html.push_str(&format!(
            r##"<div class="space-y-1"><label class="text-sm font-medium text-gray-800 block truncate">{}</label><input type="number" name="score" value="{}" placeholder="0" class="{}" hx-post="/api/score/delta" hx-trigger="change" hx-vals='{{"player":"{}"}}' hx-target="#app" hx-swap="innerHTML"></div>"##,
            escape_html(name),
            blank_if_zero(working.deltas[i]),
            INPUT_CLASS,
            i
        ));
    }
    html.push_str("</div></div>");

    // Quick actions
    html.push_str(r#"<div class="space-y-2">"#);
    let promise = auction.effective_promise();
    if let Some(w) = auction.auction_winner {
        if promise > 0 {
            let who = escape_html(&names[w]);
            html.push_str(r#"<div class="grid grid-cols-2 gap-2">"#);
            html.push_str(&format!(
                r##"<button class="py-2 bg-green-500 text-white font-semibold rounded hover:bg-green-600 transition-colors text-sm" hx-post="/api/score/apply" hx-vals='{{"action":"success"}}' hx-target="#app" hx-swap="innerHTML">Set Promise ({}: +{})</button>"##,
                who, promise
            ));
            html.push_str(&format!(
                r##"<button class="py-2 bg-red-500 text-white font-semibold rounded hover:bg-red-600 transition-colors text-sm" hx-post="/api/score/apply" hx-vals='{{"action":"failure"}}' hx-target="#app" hx-swap="innerHTML">Fail Promise ({}: -{})</button>"##,
                who, promise
            ));
            html.push_str("</div>");
        }
    }
    if game.penalty_applicable() {
        html.push_str(&format!(
            r##"<button class="w-full py-2 bg-orange-500 text-white font-semibold rounded hover:bg-orange-600 transition-colors text-sm" hx-post="/api/score/apply" hx-vals='{{"action":"penalty"}}' hx-target="#app" hx-swap="innerHTML">Apply Negative Initial Bid to Players with No Tricks (-{})</button>"##,
            auction.initial_bid
        ));
    }
    html.push_str("</div>");

    html.push_str(
        r##"<button class="w-full py-2 bg-green-600 text-white font-semibold rounded hover:bg-green-700 transition-colors" hx-post="/api/score/commit" hx-include="#round-scores" hx-target="#app" hx-swap="innerHTML">Add Round</button>"##,
    );
    html.push_str("</div>");
    html
}

/// Round history table with the totals row.
fn render_history(game: &Game) -> String {
    let names = game.roster().names();
    let entries = game.ledger().entries();
    let mut html = String::with_capacity(4096);

    html.push_str(r#"<div class="p-4"><div class="flex justify-between items-center mb-3">"#);
    html.push_str(r#"<h3 class="font-semibold text-gray-800">Score History:</h3>"#);
    if !entries.is_empty() {
        html.push_str(
            r##"<button class="text-sm text-red-600 hover:text-red-800" hx-post="/api/score/undo" hx-target="#app" hx-swap="innerHTML">Delete Last</button>"##,
        );
    }
    html.push_str("</div>");

    html.push_str(r#"<div class="overflow-x-auto"><table class="w-full text-sm"><thead><tr class="border-b">"#);
    html.push_str(r#"<th class="text-left py-2 font-medium text-gray-800">Round</th>"#);
    html.push_str(r#"<th class="text-left py-2 font-medium text-gray-800 min-w-20">Auction</th>"#);
    for name in names {
        html.push_str(&format!(
            r#"<th class="text-center py-2 px-1 font-medium text-gray-800 truncate max-w-16">{}</th>"#,
            escape_html(name)
        ));
    }
    html.push_str("</tr></thead><tbody>");

    for entry in entries {
        html.push_str(r#"<tr class="border-b">"#);
        html.push_str(&format!(
            r#"<td class="py-2 font-medium text-gray-900">{}</td>"#,
            entry.round
        ));
        html.push_str(&render_auction_cell(entry, names));
        for s in &entry.scores {
            html.push_str(&format!(
                r#"<td class="text-center py-2 px-1 text-gray-900">{}</td>"#,
                s
            ));
        }
        html.push_str("</tr>");
    }

    html.push_str(r#"<tr class="border-t-2 font-bold bg-gray-50"><td class="py-2 text-gray-900">Total</td><td class="py-2"></td>"#);
    for total in game.totals() {
        html.push_str(&format!(
            r#"<td class="text-center py-2 px-1 {}">{}</td>"#,
            total_class(total),
            total
        ));
    }
    html.push_str("</tr></tbody></table></div>");

    if entries.is_empty() {
        html.push_str(r#"<div class="text-center text-gray-700 py-8">No rounds played yet. Add scores above to start tracking!</div>"#);
    }
    html.push_str("</div>");
    html
}

fn render_auction_cell(entry: &RoundEntry, names: &[String]) -> String {
    let Some(name) = entry.auction_winner.and_then(|w| names.get(w)) else {
        return r#"<td class="py-2 px-1 text-xs"><span class="text-gray-500">-</span></td>"#
            .to_string();
    };
    let raised = if entry.was_raised() {
        format!(r#"<span class="text-orange-600"> → {}</span>"#, entry.final_promise)
    } else {
        String::new()
    };
    format!(
        r#"<td class="py-2 px-1 text-xs"><div class="space-y-1"><div class="font-medium text-blue-600">{}</div><div class="text-gray-700">{}{}</div></div></td>"#,
        escape_html(name),
        entry.initial_bid,
        raised
    )
}

fn total_class(total: i32) -> &'static str {
    if total >= WINNING_SCORE {
        "text-green-600 font-bold"
    } else if total >= WARNING_SCORE {
        "text-orange-600"
    } else {
        "text-gray-900"
    }
}

/// Number inputs show an empty box for 0.
fn blank_if_zero(n: i32) -> String {
    if n == 0 { String::new() } else { n.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::reducer::AppState;
    use crate::game::state::replace_state;
    use crate::routes::setup::handle_setup_post;

    fn reset_state() {
        replace_state(AppState::default());
    }

    fn start_three() {
        reset_state();
        handle_setup_post("action=add");
        handle_setup_post("action=update&index=0&name=Alice");
        handle_setup_post("action=update&index=1&name=Bob");
        handle_setup_post("action=update&index=2&name=Carla");
        handle_setup_post("action=start");
    }

    fn totals() -> String {
        handle_totals_get("")
    }

    #[test]
    fn totals_empty_before_start() {
        reset_state();
        assert_eq!(totals(), "[]");
    }

    #[test]
    fn two_round_scenario_through_routes() {
        start_three();
        handle_auction_post("winner=0&bid=120");
        let html = handle_apply_post("action=success");
        assert!(html.contains("Set Promise (Alice: +120)"));
        handle_commit_post("");
        assert_eq!(totals(), "[120,0,0]");

        handle_auction_post("winner=1&bid=400&increased=true&final=450");
        handle_apply_post("action=failure");
        let html = handle_commit_post("");
        assert_eq!(totals(), "[120,-450,0]");
        assert!(html.contains("Round 3"));
        assert!(html.contains("→ 450"));
        assert!(!html.contains("Game Over"));
        reset_state();
    }

    #[test]
    fn commit_without_winner_shows_error() {
        start_three();
        let html = handle_commit_post("score=10&score=0&score=0");
        assert!(html.contains("Please select the auction winner first"));
        assert!(!html.contains("localStorage"));
        assert_eq!(totals(), "[0,0,0]");
        reset_state();
    }

    #[test]
    fn tracker_controls_target_app_and_include_scores() {
        start_three();
        handle_auction_post("winner=0&bid=120");
        let html = handle_delta_post("player=1&value=5");
        assert!(html.contains(r##"hx-include="#round-scores""##));
        assert!(html.contains(r#"<div id="round-scores">"#));
        assert!(!html.contains("Delete Last"));
        handle_commit_post("");
        let html = render_page(None);
        assert!(html.contains(r##"hx-post="/api/score/undo" hx-target="#app""##));
        assert!(html.contains(r##"hx-post="/api/game/reset" hx-confirm"##));
        reset_state();
    }

    #[test]
    fn commit_with_form_scores() {
        start_three();
        handle_auction_post("winner=2&bid=150");
        handle_commit_post("score=30&score=&score=150");
        assert_eq!(totals(), "[30,0,150]");
        reset_state();
    }

    #[test]
    fn oversized_deltas_are_clamped_and_commit_twice() {
        start_three();
        for _ in 0..2 {
            handle_auction_post("winner=1");
            handle_delta_post("player=1&value=2000000000");
            handle_commit_post("");
        }
        assert_eq!(totals(), "[0,2000,0]");

        handle_auction_post("winner=0");
        handle_delta_post("player=0&score=-99999999999");
        handle_commit_post("score=-5000000000&score=&score=3000000000");
        assert_eq!(totals(), "[-1000,2000,1000]");
        reset_state();
    }

    #[test]
    fn commit_with_non_numeric_score_is_rejected() {
        start_three();
        handle_auction_post("winner=2");
        let html = handle_commit_post("score=30&score=lots&score=150");
        assert!(html.contains("valid scores"));
        assert_eq!(totals(), "[0,0,0]");
        reset_state();
    }

    #[test]
    fn delta_route_overwrites_and_parses_loosely() {
        start_three();
        handle_delta_post("player=1&value=45");
        handle_delta_post("player=1&value=x");
        with_state(|s| assert_eq!(s.game.as_ref().unwrap().working().deltas, vec![0, 0, 0]));
        handle_delta_post("player=2&value=-20");
        with_state(|s| assert_eq!(s.game.as_ref().unwrap().working().deltas, vec![0, 0, -20]));
        let html = handle_delta_post("value=5");
        assert!(html.contains("Missing or invalid player"));
        reset_state();
    }

    #[test]
    fn bid_is_clamped() {
        start_three();
        handle_auction_post("bid=9000");
        with_state(|s| assert_eq!(s.game.as_ref().unwrap().working().auction.initial_bid, MAX_BID));
        handle_auction_post("bid=-5");
        with_state(|s| assert_eq!(s.game.as_ref().unwrap().working().auction.initial_bid, 0));
        reset_state();
    }

    #[test]
    fn penalty_button_and_action() {
        start_three();
        let html = handle_auction_post("winner=0&bid=120");
        assert!(html.contains("Apply Negative Initial Bid to Players with No Tricks (-120)"));
        handle_delta_post("player=1&value=40");
        handle_apply_post("action=penalty");
        with_state(|s| {
            assert_eq!(s.game.as_ref().unwrap().working().deltas, vec![0, 40, -120]);
        });
        reset_state();
    }

    #[test]
    fn quick_actions_hidden_without_preconditions() {
        start_three();
        let html = render_page(None);
        assert!(!html.contains("Set Promise"));
        assert!(!html.contains("Apply Negative Initial Bid"));
        reset_state();
    }

    #[test]
    fn game_over_banner_and_undo() {
        start_three();
        for _ in 0..5 {
            handle_auction_post("winner=0&bid=120");
            handle_apply_post("action=success");
            handle_commit_post("");
        }
        let html = render_page(None);
        assert!(html.contains("Game Over! Winner: Alice"));
        assert!(!html.contains("Add Round"));
        assert!(html.contains("text-green-600 font-bold"));

        let html = handle_undo_post("");
        assert!(!html.contains("Game Over"));
        assert!(html.contains("Add Round"));
        assert!(html.contains("text-orange-600\">480"));
        reset_state();
    }

    #[test]
    fn undo_on_empty_ledger_keeps_page() {
        start_three();
        let html = handle_undo_post("");
        assert!(html.contains("Round 1"));
        assert!(html.contains("No rounds played yet"));
        reset_state();
    }

    #[test]
    fn raised_promise_shows_final_input() {
        start_three();
        let html = handle_auction_post("increased=true");
        assert!(html.contains("Final Promise:"));
        let html = handle_auction_post("increased=false");
        assert!(!html.contains("Final Promise:"));
        reset_state();
    }
}
