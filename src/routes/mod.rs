//! Route handlers. Each takes the raw query or form body and returns an HTML
//! (or JSON) fragment.

pub mod game;
pub mod page;
pub mod score;
pub mod setup;
pub mod util;
