//! Round ledger: the scoring engine.
//!
//! A running game holds the committed rounds plus one working round: the
//! per-player deltas being entered and the auction for the hand being
//! played. Quick actions (promise made, promise failed, zero-trick penalty)
//! write into the working deltas; `commit_round` moves the working round into
//! the ledger and checks the game-end threshold.
//!
//! A working delta of exactly 0 doubles as "nothing entered yet". The
//! zero-trick penalty relies on that, so a player who genuinely scored 0 is
//! indistinguishable from one not yet recorded.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_ROUND_SCORE, WINNING_SCORE};
use crate::game::error::StateError;
use crate::game::roster::PlayerRoster;

/// Stored as a signed index where any negative value means "unset", which is
/// what the web front end has always written.
mod winner_index {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<usize>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(i) => s.serialize_i64(*i as i64),
            None => s.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<usize>, D::Error> {
        let raw = Option::<i64>::deserialize(d)?;
        Ok(raw.and_then(|i| usize::try_from(i).ok()))
    }
}

/// Bidding outcome for one hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuctionRecord {
    #[serde(with = "winner_index")]
    pub auction_winner: Option<usize>,
    pub initial_bid: i32,
    pub promise_increased: bool,
    /// Only meaningful while `promise_increased` is set.
    pub final_promise: i32,
}

impl AuctionRecord {
    /// The amount the winner is held to: the raised promise if there was one,
    /// otherwise the opening bid.
    pub fn effective_promise(&self) -> i32 {
        if self.promise_increased {
            self.final_promise
        } else {
            self.initial_bid
        }
    }
}

/// One committed round. Field names match the persisted JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoundEntry {
    /// 1-based, always equal to the entry's position in the ledger.
    pub round: usize,
    pub scores: Vec<i32>,
    #[serde(with = "winner_index")]
    pub auction_winner: Option<usize>,
    pub initial_bid: i32,
    pub promise_increased: bool,
    /// Effective promise at commit time.
    pub final_promise: i32,
}

impl RoundEntry {
    fn new(round: usize, scores: Vec<i32>, auction: &AuctionRecord) -> Self {
        Self {
            round,
            scores,
            auction_winner: auction.auction_winner,
            initial_bid: auction.initial_bid,
            promise_increased: auction.promise_increased,
            final_promise: auction.effective_promise(),
        }
    }

    /// True when the promise was raised above the opening bid.
    pub fn was_raised(&self) -> bool {
        self.promise_increased && self.initial_bid > 0 && self.final_promise > self.initial_bid
    }
}

/// Ordered committed rounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: Vec<RoundEntry>,
}

impl Ledger {
    /// Adopt stored entries, renumbering them so `round` matches position.
    pub fn from_entries(mut entries: Vec<RoundEntry>) -> Self {
        for (i, e) in entries.iter_mut().enumerate() {
            e.round = i + 1;
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[RoundEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, scores: Vec<i32>, auction: &AuctionRecord) -> usize {
        let round = self.entries.len() + 1;
        self.entries.push(RoundEntry::new(round, scores, auction));
        round
    }

    fn pop(&mut self) -> Option<RoundEntry> {
        self.entries.pop()
    }

    /// Per-player sum of every committed delta. Entries shorter than the
    /// roster contribute nothing for the missing players. Sums saturate, so
    /// tampered stored rounds can't overflow.
    pub fn totals(&self, players: usize) -> Vec<i32> {
        let mut totals = vec![0i32; players];
        for entry in &self.entries {
            for (total, &delta) in totals.iter_mut().zip(&entry.scores) {
                *total = total.saturating_add(delta);
            }
        }
        totals
    }
}

/// Uncommitted round: deltas being entered plus the current auction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingRound {
    pub deltas: Vec<i32>,
    pub auction: AuctionRecord,
}

impl WorkingRound {
    pub fn new(players: usize) -> Self {
        Self {
            deltas: vec![0; players],
            auction: AuctionRecord::default(),
        }
    }
}

/// Result of a successful commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitOutcome {
    pub round: usize,
    /// True only for the commit that moved the game from playing to ended.
    pub ended_game: bool,
}

/// A running game: roster, committed rounds, the working round, and the
/// game-ended flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    roster: PlayerRoster,
    ledger: Ledger,
    working: WorkingRound,
    ended: bool,
}

impl Game {
    pub fn new(roster: PlayerRoster) -> Self {
        let working = WorkingRound::new(roster.len());
        Self {
            roster,
            ledger: Ledger::default(),
            working,
            ended: false,
        }
    }

    /// Rebuild a game from persisted parts. A working round whose length
    /// doesn't match the roster is discarded, as is an out-of-range winner.
    /// `ended` is recomputed from the restored totals.
    pub fn restore(roster: PlayerRoster, ledger: Ledger, mut working: WorkingRound) -> Self {
        let players = roster.len();
        if working.deltas.len() != players {
            working.deltas = vec![0; players];
        }
        if working.auction.auction_winner.is_some_and(|w| w >= players) {
            working.auction.auction_winner = None;
        }
        let mut game = Self {
            roster,
            ledger,
            working,
            ended: false,
        };
        game.ended = game.threshold_reached();
        game
    }

    pub fn roster(&self) -> &PlayerRoster {
        &self.roster
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn working(&self) -> &WorkingRound {
        &self.working
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Number of the round currently being entered.
    pub fn current_round(&self) -> usize {
        self.ledger.len() + 1
    }

    pub fn totals(&self) -> Vec<i32> {
        self.ledger.totals(self.roster.len())
    }

    /// Once ended, the first player holding the highest total.
    pub fn winner(&self) -> Option<usize> {
        if !self.ended {
            return None;
        }
        let totals = self.totals();
        let max = *totals.iter().max()?;
        totals.iter().position(|&t| t == max)
    }

    fn threshold_reached(&self) -> bool {
        self.totals().iter().any(|&t| t >= WINNING_SCORE)
    }

    fn check_player(&self, index: usize) -> Result<(), StateError> {
        if index < self.roster.len() {
            Ok(())
        } else {
            Err(StateError::InvalidPlayer { index })
        }
    }

    // ── Auction ────────────────────────────────────────────────────

    pub fn set_auction_winner(&mut self, winner: Option<usize>) -> Result<(), StateError> {
        if let Some(i) = winner {
            self.check_player(i)?;
        }
        self.working.auction.auction_winner = winner;
        Ok(())
    }

    pub fn set_initial_bid(&mut self, bid: i32) {
        self.working.auction.initial_bid = bid;
    }

    pub fn set_promise_increased(&mut self, increased: bool) {
        self.working.auction.promise_increased = increased;
    }

    pub fn set_final_promise(&mut self, promise: i32) {
        self.working.auction.final_promise = promise;
    }

    // ── Working deltas ─────────────────────────────────────────────

    /// Overwrite one player's working delta.
    pub fn set_player_delta(&mut self, index: usize, delta: i32) -> Result<(), StateError> {
        self.check_player(index)?;
        self.working.deltas[index] = delta;
        Ok(())
    }

    fn promise_target(&self) -> Result<(usize, i32), StateError> {
        let winner = self
            .working
            .auction
            .auction_winner
            .ok_or(StateError::NoAuctionWinner)?;
        let promise = self.working.auction.effective_promise();
        if promise <= 0 {
            return Err(StateError::NoPromise);
        }
        Ok((winner, promise))
    }

    /// Credit the auction winner with the promise.
    pub fn apply_promise_success(&mut self) -> Result<(), StateError> {
        let (winner, promise) = self.promise_target()?;
        self.working.deltas[winner] = promise;
        Ok(())
    }

    /// Charge the auction winner the promise.
    pub fn apply_promise_failure(&mut self) -> Result<(), StateError> {
        let (winner, promise) = self.promise_target()?;
        self.working.deltas[winner] = -promise;
        Ok(())
    }

    /// Charge the opening bid to every non-winner whose working delta is
    /// still 0. Players with a nonzero delta are left alone.
    pub fn apply_zero_trick_penalty(&mut self) -> Result<(), StateError> {
        let bid = self.working.auction.initial_bid;
        if bid <= 0 {
            return Err(StateError::NoInitialBid);
        }
        let winner = self.working.auction.auction_winner;
        for (i, delta) in self.working.deltas.iter_mut().enumerate() {
            if *delta == 0 && winner != Some(i) {
                *delta = -bid;
            }
        }
        Ok(())
    }

    /// Whether the zero-trick penalty would change anything right now.
    pub fn penalty_applicable(&self) -> bool {
        let winner = self.working.auction.auction_winner;
        self.working.auction.initial_bid > 0
            && self
                .working
                .deltas
                .iter()
                .enumerate()
                .any(|(i, &d)| d == 0 && winner != Some(i))
    }

    // ── Commit / undo ──────────────────────────────────────────────

    /// Append the working round to the ledger and reset it.
    pub fn commit_round(&mut self) -> Result<CommitOutcome, StateError> {
        if self.working.auction.auction_winner.is_none() {
            return Err(StateError::NoAuctionWinner);
        }

        let players = self.roster.len();
        let finished = std::mem::replace(&mut self.working, WorkingRound::new(players));
        let round = self.ledger.push(finished.deltas, &finished.auction);

        let was_ended = self.ended;
        self.ended = was_ended || self.threshold_reached();
        let ended_game = self.ended && !was_ended;

        log::debug!("round {round} committed, totals {:?}", self.totals());
        if ended_game {
            log::info!("game ended after round {round}");
        }
        Ok(CommitOutcome { round, ended_game })
    }

    /// Commit using raw score inputs, one per player, as a form submits them.
    /// Empty inputs count as 0. Any non-numeric input rejects the whole
    /// commit without touching the working round.
    pub fn commit_round_with(&mut self, inputs: &[String]) -> Result<CommitOutcome, StateError> {
        if self.working.auction.auction_winner.is_none() {
            return Err(StateError::NoAuctionWinner);
        }
        let deltas = parse_round_scores(inputs, self.roster.len())?;
        let saved = std::mem::replace(&mut self.working.deltas, deltas);
        self.commit_round().inspect_err(|_| self.working.deltas = saved)
    }

    /// Drop the most recent round. The working round is reset rather than
    /// restored from the removed entry. Returns false when there was nothing
    /// to undo.
    pub fn undo_last_round(&mut self) -> bool {
        let Some(removed) = self.ledger.pop() else {
            return false;
        };
        self.working = WorkingRound::new(self.roster.len());
        self.ended = self.threshold_reached();
        log::debug!("round {} undone", removed.round);
        true
    }
}

/// Parse one score input per player, clamped to `MAX_ROUND_SCORE` either way.
pub fn parse_round_scores(inputs: &[String], players: usize) -> Result<Vec<i32>, StateError> {
    (0..players)
        .map(|player| {
            let raw = inputs
                .get(player)
                .ok_or(StateError::InvalidScore { player })?
                .trim();
            if raw.is_empty() {
                return Ok(0);
            }
            raw.parse::<i64>()
                .map(|v| v.clamp(-i64::from(MAX_ROUND_SCORE), i64::from(MAX_ROUND_SCORE)) as i32)
                .map_err(|_| StateError::InvalidScore { player })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::roster::RosterDraft;

    fn game(names: &[&str]) -> Game {
        let mut draft = RosterDraft::default();
        for _ in 2..names.len() {
            draft.add_slot();
        }
        for (i, n) in names.iter().enumerate() {
            draft.update_slot(i, n);
        }
        Game::new(draft.confirm().unwrap())
    }

    fn alice_bob_carla() -> Game {
        game(&["Alice", "Bob", "Carla"])
    }

    fn win_round(g: &mut Game, winner: usize, bid: i32) -> CommitOutcome {
        g.set_auction_winner(Some(winner)).unwrap();
        g.set_initial_bid(bid);
        g.apply_promise_success().unwrap();
        g.commit_round().unwrap()
    }

    #[test]
    fn new_game_has_zeroed_working_round() {
        let g = alice_bob_carla();
        assert_eq!(g.working().deltas, vec![0, 0, 0]);
        assert_eq!(g.working().auction, AuctionRecord::default());
        assert_eq!(g.current_round(), 1);
        assert!(!g.is_ended());
    }

    #[test]
    fn effective_promise_prefers_raised_value() {
        let mut a = AuctionRecord {
            auction_winner: Some(0),
            initial_bid: 120,
            promise_increased: false,
            final_promise: 200,
        };
        assert_eq!(a.effective_promise(), 120);
        a.promise_increased = true;
        assert_eq!(a.effective_promise(), 200);
    }

    #[test]
    fn two_round_scenario() {
        let mut g = alice_bob_carla();
        g.set_auction_winner(Some(0)).unwrap();
        g.set_initial_bid(120);
        g.apply_promise_success().unwrap();
        assert_eq!(g.working().deltas, vec![120, 0, 0]);
        g.commit_round().unwrap();
        assert_eq!(g.totals(), vec![120, 0, 0]);

        g.set_auction_winner(Some(1)).unwrap();
        g.set_initial_bid(400);
        g.set_promise_increased(true);
        g.set_final_promise(450);
        g.apply_promise_failure().unwrap();
        assert_eq!(g.working().deltas, vec![0, -450, 0]);
        g.commit_round().unwrap();
        assert_eq!(g.totals(), vec![120, -450, 0]);
        assert!(!g.is_ended());

        let second = &g.ledger().entries()[1];
        assert_eq!(second.round, 2);
        assert_eq!(second.auction_winner, Some(1));
        assert_eq!(second.final_promise, 450);
        assert!(second.was_raised());
    }

    #[test]
    fn fifth_win_ends_game() {
        let mut g = alice_bob_carla();
        for _ in 0..4 {
            let outcome = win_round(&mut g, 0, 120);
            assert!(!outcome.ended_game);
        }
        assert_eq!(g.totals()[0], 480);
        assert!(!g.is_ended());

        let outcome = win_round(&mut g, 0, 120);
        assert!(outcome.ended_game);
        assert!(g.is_ended());
        assert_eq!(g.totals(), vec![600, 0, 0]);
        assert_eq!(g.winner(), Some(0));
    }

    #[test]
    fn commit_after_end_does_not_retrigger() {
        let mut g = alice_bob_carla();
        let outcome = win_round(&mut g, 2, 500);
        assert!(outcome.ended_game);
        let outcome = win_round(&mut g, 2, 10);
        assert!(!outcome.ended_game);
        assert!(g.is_ended());
    }

    #[test]
    fn commit_requires_winner() {
        let mut g = alice_bob_carla();
        g.set_player_delta(0, 50).unwrap();
        assert_eq!(g.commit_round(), Err(StateError::NoAuctionWinner));
        assert!(g.ledger().is_empty());
        assert_eq!(g.working().deltas, vec![50, 0, 0]);
    }

    #[test]
    fn commit_resets_working_round() {
        let mut g = alice_bob_carla();
        g.set_auction_winner(Some(1)).unwrap();
        g.set_initial_bid(150);
        g.set_player_delta(2, 35).unwrap();
        g.commit_round().unwrap();
        assert_eq!(g.working(), &WorkingRound::new(3));
        assert_eq!(g.ledger().entries()[0].scores, vec![0, 0, 35]);
    }

    #[test]
    fn set_player_delta_overwrites() {
        let mut g = alice_bob_carla();
        g.set_player_delta(1, 40).unwrap();
        g.set_player_delta(1, 25).unwrap();
        assert_eq!(g.working().deltas[1], 25);
        assert_eq!(
            g.set_player_delta(3, 1),
            Err(StateError::InvalidPlayer { index: 3 })
        );
    }

    #[test]
    fn set_auction_winner_validates_index() {
        let mut g = alice_bob_carla();
        assert_eq!(
            g.set_auction_winner(Some(5)),
            Err(StateError::InvalidPlayer { index: 5 })
        );
        g.set_auction_winner(Some(2)).unwrap();
        g.set_auction_winner(None).unwrap();
        assert_eq!(g.working().auction.auction_winner, None);
    }

    #[test]
    fn promise_actions_need_winner_and_positive_promise() {
        let mut g = alice_bob_carla();
        g.set_initial_bid(100);
        assert_eq!(g.apply_promise_success(), Err(StateError::NoAuctionWinner));
        g.set_auction_winner(Some(0)).unwrap();
        g.set_initial_bid(0);
        assert_eq!(g.apply_promise_failure(), Err(StateError::NoPromise));
        g.set_initial_bid(100);
        g.set_promise_increased(true);
        assert_eq!(g.apply_promise_success(), Err(StateError::NoPromise));
    }

    #[test]
    fn promise_success_overwrites_prior_delta() {
        let mut g = alice_bob_carla();
        g.set_auction_winner(Some(0)).unwrap();
        g.set_initial_bid(130);
        g.set_player_delta(0, 75).unwrap();
        g.apply_promise_success().unwrap();
        assert_eq!(g.working().deltas[0], 130);
        g.apply_promise_failure().unwrap();
        assert_eq!(g.working().deltas[0], -130);
    }

    #[test]
    fn penalty_skips_winner_and_nonzero_deltas() {
        let mut g = game(&["A", "B", "C", "D"]);
        g.set_auction_winner(Some(0)).unwrap();
        g.set_initial_bid(150);
        g.set_player_delta(1, 20).unwrap();
        g.apply_zero_trick_penalty().unwrap();
        assert_eq!(g.working().deltas, vec![0, 20, -150, -150]);
    }

    #[test]
    fn penalty_without_winner_hits_every_zero() {
        let mut g = alice_bob_carla();
        g.set_initial_bid(110);
        g.set_player_delta(2, 5).unwrap();
        g.apply_zero_trick_penalty().unwrap();
        assert_eq!(g.working().deltas, vec![-110, -110, 5]);
    }

    #[test]
    fn penalty_needs_positive_bid() {
        let mut g = alice_bob_carla();
        assert_eq!(g.apply_zero_trick_penalty(), Err(StateError::NoInitialBid));
        assert!(!g.penalty_applicable());
        g.set_initial_bid(120);
        assert!(g.penalty_applicable());
    }

    #[test]
    fn penalty_ignores_raised_promise() {
        let mut g = alice_bob_carla();
        g.set_auction_winner(Some(1)).unwrap();
        g.set_initial_bid(120);
        g.set_promise_increased(true);
        g.set_final_promise(200);
        g.apply_zero_trick_penalty().unwrap();
        assert_eq!(g.working().deltas, vec![-120, 0, -120]);
    }

    #[test]
    fn undo_on_empty_ledger_is_noop() {
        let mut g = alice_bob_carla();
        g.set_player_delta(0, 10).unwrap();
        assert!(!g.undo_last_round());
        assert_eq!(g.working().deltas[0], 10);
    }

    #[test]
    fn undo_recomputes_end_and_resets_working() {
        let mut g = alice_bob_carla();
        for _ in 0..5 {
            win_round(&mut g, 0, 120);
        }
        assert!(g.is_ended());
        g.set_auction_winner(Some(1)).unwrap();

        assert!(g.undo_last_round());
        assert_eq!(g.ledger().len(), 4);
        assert!(!g.is_ended());
        assert_eq!(g.totals(), vec![480, 0, 0]);
        assert_eq!(g.working(), &WorkingRound::new(3));
        assert_eq!(g.winner(), None);
    }

    #[test]
    fn undo_keeps_end_when_still_over_threshold() {
        let mut g = alice_bob_carla();
        win_round(&mut g, 1, 500);
        win_round(&mut g, 1, 20);
        assert!(g.undo_last_round());
        assert!(g.is_ended());
    }

    #[test]
    fn totals_follow_commits_and_undos() {
        let mut g = alice_bob_carla();
        let rounds = [[10, -20, 30], [5, 5, 5], [-100, 0, 60]];
        for r in &rounds {
            g.set_auction_winner(Some(0)).unwrap();
            for (i, d) in r.iter().enumerate() {
                g.set_player_delta(i, *d).unwrap();
            }
            g.commit_round().unwrap();
        }
        assert_eq!(g.totals(), vec![-85, -15, 95]);
        g.undo_last_round();
        assert_eq!(g.totals(), vec![15, -15, 35]);
        let rounds: Vec<usize> = g.ledger().entries().iter().map(|e| e.round).collect();
        assert_eq!(rounds, vec![1, 2]);
    }

    #[test]
    fn commit_with_inputs_parses_scores() {
        let mut g = alice_bob_carla();
        g.set_auction_winner(Some(2)).unwrap();
        let inputs = vec!["15".to_string(), "".to_string(), " -40 ".to_string()];
        g.commit_round_with(&inputs).unwrap();
        assert_eq!(g.ledger().entries()[0].scores, vec![15, 0, -40]);
    }

    #[test]
    fn commit_with_non_numeric_input_fails_atomically() {
        let mut g = alice_bob_carla();
        g.set_auction_winner(Some(2)).unwrap();
        g.set_player_delta(0, 7).unwrap();
        let inputs = vec!["1".to_string(), "abc".to_string(), "3".to_string()];
        assert_eq!(
            g.commit_round_with(&inputs),
            Err(StateError::InvalidScore { player: 1 })
        );
        assert!(g.ledger().is_empty());
        assert_eq!(g.working().deltas, vec![7, 0, 0]);
    }

    #[test]
    fn commit_with_missing_inputs_fails() {
        let mut g = alice_bob_carla();
        g.set_auction_winner(Some(0)).unwrap();
        let inputs = vec!["1".to_string()];
        assert_eq!(
            g.commit_round_with(&inputs),
            Err(StateError::InvalidScore { player: 1 })
        );
    }

    #[test]
    fn winner_is_first_of_tied_maximum() {
        let mut g = alice_bob_carla();
        g.set_auction_winner(Some(1)).unwrap();
        g.set_player_delta(1, 520).unwrap();
        g.set_player_delta(2, 520).unwrap();
        g.commit_round().unwrap();
        assert_eq!(g.winner(), Some(1));
    }

    #[test]
    fn restore_recomputes_end_and_sanitizes_working() {
        let roster = PlayerRoster::from_names(vec!["A".into(), "B".into()]).unwrap();
        let ledger = Ledger::from_entries(vec![RoundEntry {
            round: 7,
            scores: vec![510, 0],
            ..RoundEntry::default()
        }]);
        let mut working = WorkingRound::new(5);
        working.auction.auction_winner = Some(4);
        let g = Game::restore(roster, ledger, working);
        assert!(g.is_ended());
        assert_eq!(g.ledger().entries()[0].round, 1);
        assert_eq!(g.working().deltas, vec![0, 0]);
        assert_eq!(g.working().auction.auction_winner, None);
    }

    #[test]
    fn huge_stored_rounds_saturate_totals() {
        let roster = PlayerRoster::from_names(vec!["A".into(), "B".into()]).unwrap();
        let big = RoundEntry {
            scores: vec![2_000_000_000, -2_000_000_000],
            ..RoundEntry::default()
        };
        let ledger = Ledger::from_entries(vec![big.clone(), big]);
        let g = Game::restore(roster, ledger, WorkingRound::new(2));
        assert_eq!(g.totals(), vec![i32::MAX, i32::MIN]);
        assert!(g.is_ended());
        assert_eq!(g.winner(), Some(0));
    }

    #[test]
    fn commit_inputs_are_clamped_per_round() {
        let mut g = alice_bob_carla();
        g.set_auction_winner(Some(0)).unwrap();
        let inputs = vec![
            "2000000000".to_string(),
            "-99999999999".to_string(),
            "999".to_string(),
        ];
        g.commit_round_with(&inputs).unwrap();
        assert_eq!(
            g.ledger().entries()[0].scores,
            vec![MAX_ROUND_SCORE, -MAX_ROUND_SCORE, 999]
        );
    }

    #[test]
    fn auction_json_uses_minus_one_for_unset() {
        let json = serde_json::to_string(&AuctionRecord::default()).unwrap();
        assert!(json.contains(r#""auctionWinner":-1"#));
        let parsed: AuctionRecord =
            serde_json::from_str(r#"{"auctionWinner":2,"initialBid":130}"#).unwrap();
        assert_eq!(parsed.auction_winner, Some(2));
        assert_eq!(parsed.initial_bid, 130);
        assert!(!parsed.promise_increased);
    }
}
