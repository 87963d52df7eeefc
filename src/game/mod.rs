//! Game module: roster setup, the round ledger, and the reducer that drives
//! them. State lives in WASM memory (thread_local) for the lifetime of the
//! worker and is mirrored to localStorage after every change.

pub mod error;
pub mod ledger;
pub mod reducer;
pub mod roster;
pub mod state;
