//! Heads-up win/tie probabilities for two hole-card hands on a partial board.
//!
//! Two strategies share one validated `Deal`:
//!   - exact: every completion of the board, via `Completions`
//!   - Monte Carlo: random completions drawn from a caller-supplied RNG
//!
//! Both have rayon-sharded variants. Shards own their own `Deck` copy and
//! RNG and only hand back a `Tally`, which is summed at the end.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, HoleCards};
use crate::completions::{binomial, Completions};
use crate::deck::Deck;
use crate::error::{OddsError, OddsResult};
use crate::hand_evaluator::{compare_hands, Outcome};

/// Trials used before the flop when no count is given.
pub const PREFLOP_TRIALS: usize = 100_000;

/// Monte Carlo trials per parallel batch.
const BATCH_SIZE: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityResult {
    pub win: f64,
    pub tie: f64,
    pub lose: f64,
    pub samples: u64,
}

impl EquityResult {
    pub fn equity(&self) -> f64 {
        self.win + self.tie / 2.0
    }
}

impl fmt::Display for EquityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Win {:.3}% | Tie {:.3}% | Lose {:.3}% (equity: {:.3}%)",
            self.win * 100.0,
            self.tie * 100.0,
            self.lose * 100.0,
            self.equity() * 100.0,
        )
    }
}

// -------------------------------------------------------------------------
// Tally
// -------------------------------------------------------------------------

/// Raw win/tie/loss counts from the hero's side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub wins: u64,
    pub ties: u64,
    pub losses: u64,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Tie => self.ties += 1,
            Outcome::Loss => self.losses += 1,
        }
    }

    pub fn merge(self, other: Tally) -> Tally {
        Tally {
            wins: self.wins + other.wins,
            ties: self.ties + other.ties,
            losses: self.losses + other.losses,
        }
    }

    pub fn total(&self) -> u64 {
        self.wins + self.ties + self.losses
    }

    fn into_result(self) -> EquityResult {
        let total = self.total() as f64;
        EquityResult {
            win: self.wins as f64 / total,
            tie: self.ties as f64 / total,
            lose: self.losses as f64 / total,
            samples: self.total(),
        }
    }
}

// -------------------------------------------------------------------------
// Deal validation
// -------------------------------------------------------------------------

/// Validated inputs plus the deck of cards still unseen.
#[derive(Debug, Clone)]
pub struct Deal {
    pub hero: HoleCards,
    pub villain: HoleCards,
    board: [Card; 5],
    known: usize,
    pub deck: Deck,
}

impl Deal {
    /// Checks board size (0, 3, 4 or 5) and that no card appears twice.
    pub fn new(hero: &HoleCards, villain: &HoleCards, board: &[Card]) -> OddsResult<Self> {
        match board.len() {
            0 | 3 | 4 | 5 => {}
            n => return Err(OddsError::InvalidBoardSize(n)),
        }

        let mut deck = Deck::new();
        for card in hero.cards().iter().chain(villain.cards().iter()).chain(board) {
            if !deck.contains(card) {
                return Err(OddsError::DuplicateCard(*card));
            }
            deck.remove(card)?;
        }

        let mut full = [hero.0; 5];
        full[..board.len()].copy_from_slice(board);
        Ok(Deal {
            hero: *hero,
            villain: *villain,
            board: full,
            known: board.len(),
            deck,
        })
    }

    pub fn known_board(&self) -> &[Card] {
        &self.board[..self.known]
    }

    /// Cards still to come.
    pub fn missing(&self) -> usize {
        5 - self.known
    }

    /// Number of distinct completions of the board.
    pub fn completion_count(&self) -> u64 {
        binomial(self.deck.len(), self.missing())
    }

    fn showdown(&self, board: &[Card; 5]) -> OddsResult<Outcome> {
        compare_hands(&self.hero, &self.villain, board)
    }

    /// One random runout on a private copy of the deck.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> OddsResult<Outcome> {
        let mut deck = self.deck;
        let mut board = self.board;
        for slot in board[self.known..].iter_mut() {
            *slot = deck.draw(rng)?;
        }
        self.showdown(&board)
    }

    fn tally_completions(&self, remaining: &[Card], completions: Completions) -> OddsResult<Tally> {
        let mut tally = Tally::default();
        let mut board = self.board;
        for combo in completions {
            for (slot, &i) in board[self.known..].iter_mut().zip(combo.iter()) {
                *slot = remaining[i];
            }
            tally.record(self.showdown(&board)?);
        }
        Ok(tally)
    }

    fn run_trials<R: Rng + ?Sized>(
        &self,
        trials: usize,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> OddsResult<Tally> {
        let mut tally = Tally::default();
        for _ in 0..trials {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                break;
            }
            tally.record(self.sample(rng)?);
        }
        Ok(tally)
    }
}

// -------------------------------------------------------------------------
// Exact enumeration
// -------------------------------------------------------------------------

/// Enumerate every completion of the board.
pub fn odds_exact(hero: &HoleCards, villain: &HoleCards, board: &[Card]) -> OddsResult<EquityResult> {
    let deal = Deal::new(hero, villain, board)?;
    let remaining = deal.deck.cards();
    log::debug!(
        "exact enumeration: {} completions of {} cards",
        deal.completion_count(),
        deal.missing()
    );

    let tally = deal.tally_completions(&remaining, Completions::new(remaining.len(), deal.missing()))?;
    debug_assert_eq!(tally.total(), deal.completion_count());
    Ok(tally.into_result())
}

/// Exact enumeration sharded over rayon by the first completion index.
pub fn odds_exact_parallel(
    hero: &HoleCards,
    villain: &HoleCards,
    board: &[Card],
) -> OddsResult<EquityResult> {
    let deal = Deal::new(hero, villain, board)?;
    let remaining = deal.deck.cards();
    let (n, k) = (remaining.len(), deal.missing());
    log::debug!(
        "parallel exact enumeration: {} completions over {} shards",
        deal.completion_count(),
        n
    );

    let shards = (0..n)
        .into_par_iter()
        .map(|first| deal.tally_completions(&remaining, Completions::shard(n, k, first)))
        .collect::<OddsResult<Vec<Tally>>>()?;
    let tally = shards.into_iter().fold(Tally::default(), Tally::merge);
    debug_assert_eq!(tally.total(), deal.completion_count());
    Ok(tally.into_result())
}

// -------------------------------------------------------------------------
// Monte Carlo
// -------------------------------------------------------------------------

/// Estimate odds from `trials` random completions drawn with `rng`.
pub fn odds_monte_carlo<R: Rng + ?Sized>(
    trials: usize,
    hero: &HoleCards,
    villain: &HoleCards,
    board: &[Card],
    rng: &mut R,
) -> OddsResult<EquityResult> {
    if trials == 0 {
        return Err(OddsError::InvalidTrials(trials));
    }
    let deal = Deal::new(hero, villain, board)?;
    log::debug!("monte carlo: {} trials, {} cards to come", trials, deal.missing());
    Ok(deal.run_trials(trials, rng, None)?.into_result())
}

/// Monte Carlo that stops early once `cancel` is raised. Whatever trials
/// finished before that still make a valid estimate.
pub fn odds_monte_carlo_cancellable<R: Rng + ?Sized>(
    trials: usize,
    hero: &HoleCards,
    villain: &HoleCards,
    board: &[Card],
    rng: &mut R,
    cancel: &AtomicBool,
) -> OddsResult<EquityResult> {
    if trials == 0 {
        return Err(OddsError::InvalidTrials(trials));
    }
    let deal = Deal::new(hero, villain, board)?;
    let tally = deal.run_trials(trials, rng, Some(cancel))?;
    if tally.total() == 0 {
        return Err(OddsError::NoTrialsCompleted);
    }
    if (tally.total() as usize) < trials {
        log::debug!("monte carlo cancelled after {} of {} trials", tally.total(), trials);
    }
    Ok(tally.into_result())
}

/// Monte Carlo split into fixed-size batches across rayon. Each batch seeds
/// its own generator from `seed` and its batch number, so the result depends
/// only on `seed` and `trials`, not on the thread count.
pub fn odds_monte_carlo_parallel(
    trials: usize,
    hero: &HoleCards,
    villain: &HoleCards,
    board: &[Card],
    seed: u64,
) -> OddsResult<EquityResult> {
    if trials == 0 {
        return Err(OddsError::InvalidTrials(trials));
    }
    let deal = Deal::new(hero, villain, board)?;
    let num_batches = trials.div_ceil(BATCH_SIZE);
    log::debug!("parallel monte carlo: {} trials in {} batches", trials, num_batches);

    let batches = (0..num_batches)
        .into_par_iter()
        .map(|batch| {
            let mut rng = SmallRng::seed_from_u64(batch_seed(seed, batch));
            let size = if batch == num_batches - 1 {
                trials - batch * BATCH_SIZE
            } else {
                BATCH_SIZE
            };
            deal.run_trials(size, &mut rng, None)
        })
        .collect::<OddsResult<Vec<Tally>>>()?;
    Ok(batches.into_iter().fold(Tally::default(), Tally::merge).into_result())
}

fn batch_seed(seed: u64, batch: usize) -> u64 {
    seed ^ (batch as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

// -------------------------------------------------------------------------
// Strategy selection
// -------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    Exact,
    MonteCarlo { trials: usize },
}

impl Strategy {
    /// Exact once the flop is out, sampling before it.
    pub fn for_board(board_len: usize) -> Strategy {
        if board_len >= 3 {
            Strategy::Exact
        } else {
            Strategy::MonteCarlo {
                trials: PREFLOP_TRIALS,
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Exact => write!(f, "exact enumeration"),
            Strategy::MonteCarlo { trials } => write!(f, "monte carlo ({} trials)", trials),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OddsConfig {
    /// `None` picks by board size.
    pub strategy: Option<Strategy>,
    /// `None` seeds from entropy.
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl OddsConfig {
    pub fn resolve_strategy(&self, board_len: usize) -> Strategy {
        self.strategy.unwrap_or_else(|| Strategy::for_board(board_len))
    }
}

/// Run whichever strategy `config` resolves to.
pub fn compute_odds(
    config: &OddsConfig,
    hero: &HoleCards,
    villain: &HoleCards,
    board: &[Card],
) -> OddsResult<EquityResult> {
    let strategy = config.resolve_strategy(board.len());
    log::debug!("strategy: {} (parallel: {})", strategy, config.parallel);

    match strategy {
        Strategy::Exact if config.parallel => odds_exact_parallel(hero, villain, board),
        Strategy::Exact => odds_exact(hero, villain, board),
        Strategy::MonteCarlo { trials } => {
            let seed = config.seed.unwrap_or_else(rand::random::<u64>);
            if config.parallel {
                odds_monte_carlo_parallel(trials, hero, villain, board, seed)
            } else {
                let mut rng = SmallRng::seed_from_u64(seed);
                odds_monte_carlo(trials, hero, villain, board, &mut rng)
            }
        }
    }
}
