//! Persistence adapter: mirrors the application state into a string-keyed
//! store (the browser's localStorage in production).
//!
//! The WASM module can't reach localStorage from the worker, so production
//! writes go through [`ScriptStore`], which records each set/remove and
//! renders them as a `<script>` the page runs after swapping in the fragment.
//! Reads happen once at page load: the page posts the raw stored values to
//! `/api/game/restore`, they land in a [`MemoryStore`], and [`load`] rebuilds
//! the state from it.
//!
//! Each key is written independently with no versioning. Missing or
//! malformed values are treated as absent.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::constants::{ALL_KEYS, KEY_AUCTION, KEY_GAME_STARTED, KEY_PLAYERS, KEY_ROUNDS, KEY_SCORES};
use crate::game::error::ValidationError;
use crate::game::ledger::{AuctionRecord, Game, Ledger, RoundEntry, WorkingRound};
use crate::game::reducer::AppState;
use crate::game::roster::PlayerRoster;

/// Synchronous string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<(String, String)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.items.remove(key);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum StoreOp {
    Set(String, String),
    Remove(String),
}

/// Write-only store that replays its operations as localStorage calls.
#[derive(Debug, Clone, Default)]
pub struct ScriptStore {
    ops: Vec<StoreOp>,
}

impl ScriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the recorded operations as a `<script>` block. Empty when
    /// nothing was recorded.
    pub fn render_script(&self) -> String {
        if self.ops.is_empty() {
            return String::new();
        }
        let mut js = String::with_capacity(256);
        js.push_str("<script>");
        for op in &self.ops {
            match op {
                StoreOp::Set(k, v) => {
                    js.push_str(&format!("localStorage.setItem({},{});", js_string(k), js_string(v)))
                }
                StoreOp::Remove(k) => {
                    js.push_str(&format!("localStorage.removeItem({});", js_string(k)))
                }
            }
        }
        js.push_str("</script>");
        js
    }
}

impl KeyValueStore for ScriptStore {
    /// Reads are never served from the write log.
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, key: &str, value: &str) {
        self.ops.push(StoreOp::Set(key.to_string(), value.to_string()));
    }

    fn remove(&mut self, key: &str) {
        self.ops.push(StoreOp::Remove(key.to_string()));
    }
}

/// Quote a value as a JS string literal that is safe inside `<script>`.
fn js_string(value: &str) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/")
}

/// Flat image of everything persisted. Also the export/import format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub players: Vec<String>,
    pub started: bool,
    pub scores: Vec<RoundEntry>,
    pub rounds: Vec<i32>,
    pub auction: AuctionRecord,
}

impl Snapshot {
    pub fn capture(state: &AppState) -> Self {
        match &state.game {
            None => Self::default(),
            Some(game) => Self {
                players: game.roster().names().to_vec(),
                started: true,
                scores: game.ledger().entries().to_vec(),
                rounds: game.working().deltas.clone(),
                auction: game.working().auction.clone(),
            },
        }
    }

    /// Rebuild application state. An unstarted snapshot, or one whose roster
    /// no longer validates, yields a fresh setup screen.
    pub fn into_state(self) -> AppState {
        self.try_into_state().unwrap_or_else(|e| {
            log::warn!("stored roster rejected ({e}), starting over");
            AppState::default()
        })
    }

    /// Like [`Snapshot::into_state`], but a started snapshot with an invalid
    /// roster is an error instead of a fresh setup screen.
    pub fn try_into_state(self) -> Result<AppState, ValidationError> {
        if !self.started {
            return Ok(AppState::default());
        }
        let roster = PlayerRoster::from_names(self.players)?;
        let working = WorkingRound {
            deltas: self.rounds,
            auction: self.auction,
        };
        Ok(AppState {
            game: Some(Game::restore(roster, Ledger::from_entries(self.scores), working)),
            ..AppState::default()
        })
    }
}

/// Write the full current state. A state without a game clears every key.
pub fn save(state: &AppState, store: &mut impl KeyValueStore) {
    if state.game.is_none() {
        clear(store);
        return;
    }
    let snap = Snapshot::capture(state);
    write_json(store, KEY_PLAYERS, &snap.players);
    store.set(KEY_GAME_STARTED, "true");
    write_json(store, KEY_SCORES, &snap.scores);
    write_json(store, KEY_ROUNDS, &snap.rounds);
    write_json(store, KEY_AUCTION, &snap.auction);
}

/// Rebuild state from the store, defaulting anything missing or malformed.
pub fn load(store: &impl KeyValueStore) -> AppState {
    let snap = Snapshot {
        players: read_json(store, KEY_PLAYERS).unwrap_or_default(),
        started: store.get(KEY_GAME_STARTED).as_deref() == Some("true"),
        scores: read_json(store, KEY_SCORES).unwrap_or_default(),
        rounds: read_json(store, KEY_ROUNDS).unwrap_or_default(),
        auction: read_json(store, KEY_AUCTION).unwrap_or_default(),
    };
    snap.into_state()
}

/// Remove every key this app writes.
pub fn clear(store: &mut impl KeyValueStore) {
    for key in ALL_KEYS {
        store.remove(key);
    }
}

fn write_json<T: Serialize>(store: &mut impl KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => store.set(key, &json),
        Err(e) => log::warn!("could not encode {key}: {e}"),
    }
}

fn read_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("ignoring malformed {key}: {e}");
            None
        }
    }
}
