//! Huutopussi score tracker: in-browser WASM server.
//!
//! Exports `handle_request(method, path, query, body)` for the Service Worker
//! bridge to call, plus a handful of `sw_*` helpers the worker uses for its
//! offline cache decisions. Uses `matchit` for URL routing: the same router
//! engine that powers Axum.

use wasm_bindgen::prelude::*;

pub mod constants;
pub mod game;
pub mod logging;
pub mod offline;
pub mod routes;
pub mod storage;

/// Process an HTTP-like request and return an HTML fragment.
///
/// Called from JavaScript (Service Worker) via wasm-bindgen.
///
/// # Arguments
/// * `method`: HTTP method (e.g., "GET", "POST")
/// * `path`  : URL path (e.g., "/api/page")
/// * `query` : Query string (e.g., "?foo=bar")
/// * `body`  : Request body (e.g., POST form data). Empty string for GET requests.
///
/// # Returns
/// An HTML string fragment suitable for HTMX to swap into `#app`, or JSON for
/// the state/totals endpoints.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    let mut router = matchit::Router::new();

    router.insert("/api/page", "page").ok();

    router.insert("/api/setup", "setup").ok();

    router.insert("/api/score/auction", "score_auction").ok();
    router.insert("/api/score/delta", "score_delta").ok();
    router.insert("/api/score/apply", "score_apply").ok();
    router.insert("/api/score/commit", "score_commit").ok();
    router.insert("/api/score/undo", "score_undo").ok();
    router.insert("/api/score/totals", "score_totals").ok();

    router.insert("/api/game/reset", "game_reset").ok();
    router.insert("/api/game/restore", "game_restore").ok();
    router.insert("/api/game/state", "game_state").ok();
    router.insert("/api/game/export", "game_export").ok();
    router.insert("/api/game/import", "game_import").ok();

    match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            ("page", "GET") => routes::page::handle_page_get(query),

            ("setup", "POST") => routes::setup::handle_setup_post(body),

            ("score_auction", "POST") => routes::score::handle_auction_post(body),
            ("score_delta", "POST") => routes::score::handle_delta_post(body),
            ("score_apply", "POST") => routes::score::handle_apply_post(body),
            ("score_commit", "POST") => routes::score::handle_commit_post(body),
            ("score_undo", "POST") => routes::score::handle_undo_post(body),
            ("score_totals", "GET") => routes::score::handle_totals_get(query),

            ("game_reset", "POST") => routes::game::handle_reset_post(body),
            ("game_restore", "POST") => routes::game::handle_restore_post(body),
            ("game_state", "GET") => routes::game::handle_state_get(query),
            ("game_export", "GET") => routes::game::handle_export_get(query),
            ("game_import", "POST") => routes::game::handle_import_post(body),

            _ => method_not_allowed(),
        },
        Err(_) => not_found(),
    }
}

fn not_found() -> String {
    r#"<span class="text-red-500">404 — route not found</span>"#.to_string()
}

fn method_not_allowed() -> String {
    r#"<span class="text-red-500">405 — method not allowed</span>"#.to_string()
}

// ── Service Worker helpers ─────────────────────────────────────────
//
// The worker shim does the Cache Storage and network I/O; every decision it
// makes goes through `OfflineCache` for this build's bucket.

use offline::{FetchRequest, FetchResponse, OfflineCache, ResponseType};

/// Name of the cache bucket for this build.
#[wasm_bindgen]
pub fn sw_cache_name() -> String {
    OfflineCache::default().name().to_string()
}

/// Whether the worker should answer this fetch itself.
#[wasm_bindgen]
pub fn sw_should_intercept(method: &str, url: &str) -> bool {
    let request = FetchRequest {
        method: method.to_string(),
        url: url.to_string(),
    };
    OfflineCache::default().intercepts(&request)
}

/// Whether a network response may be stored. `response_type` is
/// `Response.type` ("basic", "cors", ...).
#[wasm_bindgen]
pub fn sw_should_store(status: u16, response_type: &str) -> bool {
    let response = FetchResponse {
        status,
        kind: ResponseType::parse(response_type),
        body: Vec::new(),
    };
    OfflineCache::default().should_store(&response)
}

/// Cache key to fall back to when the network fails for `url`, or an empty
/// string when there is no fallback.
#[wasm_bindgen]
pub fn sw_offline_fallback(url: &str) -> String {
    OfflineCache::default()
        .offline_fallback(url)
        .unwrap_or_default()
}

/// Given the JSON array of existing cache names, return the JSON array of
/// names activation should delete.
#[wasm_bindgen]
pub fn sw_stale_caches(names_json: &str) -> String {
    let names: Vec<String> = serde_json::from_str(names_json).unwrap_or_default();
    let stale = OfflineCache::default().stale_caches(&names);
    serde_json::to_string(&stale).unwrap_or_else(|_| "[]".to_string())
}
