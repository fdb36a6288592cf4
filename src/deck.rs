//! The 52-card universe as a live-card bitmask.
//!
//! `Deck` is `Copy`: every evaluation path owns its own copy and removes
//! cards from it without touching anyone else's.

use rand::Rng;

use crate::card_encoding::{card_bit, index_to_card};
use crate::cards::Card;
use crate::error::{OddsError, OddsResult};

const FULL_MASK: u64 = (1u64 << 52) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deck {
    live: u64,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// All 52 cards.
    pub fn new() -> Self {
        Deck { live: FULL_MASK }
    }

    pub fn len(&self) -> usize {
        self.live.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.live & card_bit(card) != 0
    }

    /// Remove a card, failing if it has already been removed.
    pub fn remove(&mut self, card: &Card) -> OddsResult<()> {
        let bit = card_bit(card);
        if self.live & bit == 0 {
            return Err(OddsError::CardNotFound(*card));
        }
        self.live &= !bit;
        Ok(())
    }

    /// The `n`-th remaining card in ascending index order.
    pub fn card_at(&self, n: usize) -> Option<Card> {
        if n >= self.len() {
            return None;
        }
        let mut mask = self.live;
        for _ in 0..n {
            mask &= mask - 1;
        }
        Some(index_to_card(mask.trailing_zeros() as u8))
    }

    /// Remaining cards in ascending index order.
    pub fn cards(&self) -> Vec<Card> {
        let mut out = Vec::with_capacity(self.len());
        let mut mask = self.live;
        while mask != 0 {
            out.push(index_to_card(mask.trailing_zeros() as u8));
            mask &= mask - 1;
        }
        out
    }

    /// Remove and return a uniformly random remaining card.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> OddsResult<Card> {
        let n = self.len();
        if n == 0 {
            return Err(OddsError::DeckExhausted);
        }
        let card = self
            .card_at(rng.gen_range(0..n))
            .ok_or(OddsError::DeckExhausted)?;
        self.remove(&card)?;
        Ok(card)
    }
}
