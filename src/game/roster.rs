//! Player roster setup: the editable list of name slots shown before a game
//! starts, and the confirmed roster it produces.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::constants::{MAX_NAME_LEN, MAX_PLAYERS, MIN_PLAYERS};
use crate::game::error::ValidationError;

/// Confirmed, ordered player names. Fixed for the lifetime of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerRoster(Vec<String>);

impl PlayerRoster {
    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Build a roster from already-stored names, re-running confirmation so a
    /// tampered store can't produce an invalid roster. Long names are cut to
    /// `MAX_NAME_LEN` the way typing would have cut them.
    pub fn from_names(names: Vec<String>) -> Result<Self, ValidationError> {
        let slots: Vec<String> = names
            .iter()
            .map(|n| n.chars().take(MAX_NAME_LEN).collect())
            .collect();
        RosterDraft { slots }.confirm()
    }
}

/// Working list of candidate names. Starts with two empty slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterDraft {
    slots: Vec<String>,
}

impl Default for RosterDraft {
    fn default() -> Self {
        Self {
            slots: vec![String::new(); MIN_PLAYERS],
        }
    }
}

impl RosterDraft {
    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    /// Append an empty slot. No-op at the player cap.
    pub fn add_slot(&mut self) {
        if self.slots.len() < MAX_PLAYERS {
            self.slots.push(String::new());
        }
    }

    /// Remove the slot at `index`. No-op at the minimum or when out of range.
    pub fn remove_slot(&mut self, index: usize) {
        if self.slots.len() > MIN_PLAYERS && index < self.slots.len() {
            self.slots.remove(index);
        }
    }

    /// Replace the text at `index`, truncated to `MAX_NAME_LEN` characters.
    pub fn update_slot(&mut self, index: usize, text: &str) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = text.chars().take(MAX_NAME_LEN).collect();
        }
    }

    /// Trim every slot, drop the empty ones, and validate what remains.
    /// Duplicate detection is case-sensitive.
    pub fn confirm(&self) -> Result<PlayerRoster, ValidationError> {
        let names: Vec<String> = self
            .slots
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if names.len() < MIN_PLAYERS {
            return Err(ValidationError::TooFewPlayers);
        }
        if names.len() > MAX_PLAYERS {
            return Err(ValidationError::TooManyPlayers);
        }

        let mut seen = HashSet::with_capacity(names.len());
        if !names.iter().all(|n| seen.insert(n.as_str())) {
            return Err(ValidationError::DuplicateNames);
        }

        Ok(PlayerRoster(names))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(names: &[&str]) -> RosterDraft {
        RosterDraft {
            slots: names.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn starts_with_two_empty_slots() {
        let d = RosterDraft::default();
        assert_eq!(d.slots(), &["", ""]);
    }

    #[test]
    fn add_slot_caps_at_six() {
        let mut d = RosterDraft::default();
        for _ in 0..10 {
            d.add_slot();
        }
        assert_eq!(d.slots().len(), MAX_PLAYERS);
    }

    #[test]
    fn remove_slot_keeps_two() {
        let mut d = draft(&["a", "b", "c"]);
        d.remove_slot(0);
        assert_eq!(d.slots(), &["b", "c"]);
        d.remove_slot(0);
        assert_eq!(d.slots(), &["b", "c"]);
    }

    #[test]
    fn remove_slot_out_of_range_is_noop() {
        let mut d = draft(&["a", "b", "c"]);
        d.remove_slot(7);
        assert_eq!(d.slots().len(), 3);
    }

    #[test]
    fn update_slot_truncates_to_twenty_chars() {
        let mut d = RosterDraft::default();
        d.update_slot(1, "Äänekoski-Jyväskylä-Kuopio");
        assert_eq!(d.slots()[1].chars().count(), MAX_NAME_LEN);
        assert!(d.slots()[1].starts_with("Äänekoski"));
    }

    #[test]
    fn confirm_keeps_input_order_and_trims() {
        let roster = draft(&["  Alice ", "", "Bob", "Carla"]).confirm().unwrap();
        assert_eq!(roster.names(), &["Alice", "Bob", "Carla"]);
    }

    #[test]
    fn confirm_accepts_two_to_six() {
        for n in MIN_PLAYERS..=MAX_PLAYERS {
            let names: Vec<String> = (0..n).map(|i| format!("P{i}")).collect();
            let roster = RosterDraft { slots: names.clone() }.confirm().unwrap();
            assert_eq!(roster.names(), names.as_slice());
        }
    }

    #[test]
    fn confirm_rejects_too_few() {
        assert_eq!(draft(&["", "  "]).confirm(), Err(ValidationError::TooFewPlayers));
        assert_eq!(draft(&["Alice", " "]).confirm(), Err(ValidationError::TooFewPlayers));
    }

    #[test]
    fn confirm_rejects_duplicates_after_trim() {
        assert_eq!(
            draft(&["Alice", " Alice"]).confirm(),
            Err(ValidationError::DuplicateNames)
        );
    }

    #[test]
    fn confirm_rejects_more_than_six() {
        let d = draft(&["A", "B", "C", "D", "E", "F", "G"]);
        assert_eq!(d.confirm(), Err(ValidationError::TooManyPlayers));
    }

    #[test]
    fn stored_names_are_capped_and_cut_to_length() {
        let seven: Vec<String> = "ABCDEFG".chars().map(String::from).collect();
        assert_eq!(
            PlayerRoster::from_names(seven),
            Err(ValidationError::TooManyPlayers)
        );

        let long = "Maija-Liisa Kuusinen-Virtanen".to_string();
        let roster = PlayerRoster::from_names(vec![long, "Bob".into()]).unwrap();
        assert_eq!(roster.name(0), Some("Maija-Liisa Kuusinen"));
        assert_eq!(roster.name(0).map(|n| n.chars().count()), Some(MAX_NAME_LEN));
    }

    #[test]
    fn duplicates_are_case_sensitive() {
        assert!(draft(&["alice", "Alice"]).confirm().is_ok());
    }
}
