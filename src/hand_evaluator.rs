//! Five-card categorisation, best-of-seven selection and tie-breaking.
//!
//! Every detector takes a hand sorted ascending by rank and returns the
//! comparison keys for its category, least significant first. Keys are
//! compared from the back, so the last card is the one that decides first.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, HoleCards, Rank};
use crate::error::{OddsError, OddsResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum HandCategory {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
}

impl HandCategory {
    /// 1 (high card) through 9 (straight flush).
    pub fn rank(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        };
        f.write_str(name)
    }
}

/// Result of a head-to-head comparison from the first player's point of view.
/// The discriminants follow the -1 / 0 / 1 convention (first wins / tie /
/// second wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum Outcome {
    Win = -1,
    Tie = 0,
    Loss = 1,
}

impl Outcome {
    pub fn sign(self) -> i8 {
        self as i8
    }
}

/// A categorised hand together with its tie-break keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedHand {
    pub category: HandCategory,
    pub keys: Vec<Card>,
}

impl RankedHand {
    pub fn compare(&self, other: &RankedHand) -> OddsResult<Outcome> {
        match self.category.cmp(&other.category) {
            std::cmp::Ordering::Greater => Ok(Outcome::Win),
            std::cmp::Ordering::Less => Ok(Outcome::Loss),
            std::cmp::Ordering::Equal => break_tie(&self.keys, &other.keys),
        }
    }
}

// -------------------------------------------------------------------------
// Detectors
// -------------------------------------------------------------------------

type Detector = fn(&[Card; 5]) -> Option<Vec<Card>>;

/// Highest category first; the first match wins.
const DETECTORS: [(HandCategory, Detector); 9] = [
    (HandCategory::StraightFlush, straight_flush),
    (HandCategory::FourOfAKind, four_of_a_kind),
    (HandCategory::FullHouse, full_house),
    (HandCategory::Flush, flush),
    (HandCategory::Straight, straight),
    (HandCategory::ThreeOfAKind, three_of_a_kind),
    (HandCategory::TwoPair, two_pair),
    (HandCategory::OnePair, one_pair),
    (HandCategory::HighCard, high_card),
];

fn is_wheel(hand: &[Card; 5]) -> bool {
    hand[0].rank == Rank::Two
        && hand[1].rank == Rank::Three
        && hand[2].rank == Rank::Four
        && hand[3].rank == Rank::Five
        && hand[4].rank == Rank::Ace
}

/// Key card of a straight: the top card, or the Five for A-2-3-4-5.
fn straight_high(hand: &[Card; 5]) -> Option<Card> {
    if is_wheel(hand) {
        return Some(hand[3]);
    }
    let consecutive = hand
        .windows(2)
        .all(|w| w[0].rank.successor() == Some(w[1].rank));
    consecutive.then_some(hand[4])
}

fn is_flush(hand: &[Card; 5]) -> bool {
    hand.iter().all(|c| c.suit == hand[0].suit)
}

pub fn straight_flush(hand: &[Card; 5]) -> Option<Vec<Card>> {
    if !is_flush(hand) {
        return None;
    }
    straight_high(hand).map(|high| vec![high])
}

pub fn four_of_a_kind(hand: &[Card; 5]) -> Option<Vec<Card>> {
    if hand[0].rank == hand[3].rank {
        return Some(vec![hand[4], hand[0]]);
    }
    if hand[1].rank == hand[4].rank {
        return Some(vec![hand[0], hand[4]]);
    }
    None
}

pub fn full_house(hand: &[Card; 5]) -> Option<Vec<Card>> {
    if hand[0].rank != hand[1].rank || hand[3].rank != hand[4].rank {
        return None;
    }
    // Trips low (XXXYY) or trips high (XXYYY); the trip card goes last.
    if hand[1].rank == hand[2].rank {
        return Some(vec![hand[4], hand[0]]);
    }
    if hand[2].rank == hand[3].rank {
        return Some(vec![hand[0], hand[4]]);
    }
    None
}

pub fn flush(hand: &[Card; 5]) -> Option<Vec<Card>> {
    is_flush(hand).then(|| hand.to_vec())
}

pub fn straight(hand: &[Card; 5]) -> Option<Vec<Card>> {
    straight_high(hand).map(|high| vec![high])
}

pub fn three_of_a_kind(hand: &[Card; 5]) -> Option<Vec<Card>> {
    if hand[0].rank == hand[2].rank {
        return Some(vec![hand[3], hand[4], hand[0]]);
    }
    if hand[1].rank == hand[3].rank {
        return Some(vec![hand[0], hand[4], hand[1]]);
    }
    if hand[2].rank == hand[4].rank {
        return Some(vec![hand[0], hand[1], hand[2]]);
    }
    None
}

pub fn two_pair(hand: &[Card; 5]) -> Option<Vec<Card>> {
    let r = |i: usize| hand[i].rank;
    if r(0) == r(1) && r(3) == r(4) {
        return Some(vec![hand[2], hand[0], hand[3]]);
    }
    if r(0) == r(1) && r(2) == r(3) {
        return Some(vec![hand[4], hand[0], hand[2]]);
    }
    if r(1) == r(2) && r(3) == r(4) {
        return Some(vec![hand[0], hand[1], hand[3]]);
    }
    None
}

/// Three kickers ascending, then one card of the pair.
pub fn one_pair(hand: &[Card; 5]) -> Option<Vec<Card>> {
    let i = (1..5).rev().find(|&i| hand[i].rank == hand[i - 1].rank)?;
    let mut keys: Vec<Card> = hand
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != i && j != i - 1)
        .map(|(_, c)| *c)
        .collect();
    keys.push(hand[i]);
    Some(keys)
}

pub fn high_card(hand: &[Card; 5]) -> Option<Vec<Card>> {
    Some(hand.to_vec())
}

// -------------------------------------------------------------------------
// Evaluation
// -------------------------------------------------------------------------

/// Categorise exactly five cards (any order).
pub fn evaluate_five(mut hand: [Card; 5]) -> OddsResult<RankedHand> {
    hand.sort();
    DETECTORS
        .iter()
        .find_map(|&(category, detect)| detect(&hand).map(|keys| RankedHand { category, keys }))
        .ok_or(OddsError::NoCategoryMatched)
}

/// Compare two key lists from the last (most significant) position down.
pub fn break_tie(first: &[Card], second: &[Card]) -> OddsResult<Outcome> {
    if first.len() != second.len() {
        return Err(OddsError::KeyLengthMismatch {
            left: first.len(),
            right: second.len(),
        });
    }
    for (a, b) in first.iter().rev().zip(second.iter().rev()) {
        if a.rank > b.rank {
            return Ok(Outcome::Win);
        }
        if a.rank < b.rank {
            return Ok(Outcome::Loss);
        }
    }
    Ok(Outcome::Tie)
}

/// Best five-card hand out of two hole cards plus a complete board.
pub fn best_hand(hole: &HoleCards, board: &[Card]) -> OddsResult<RankedHand> {
    if board.len() != 5 {
        return Err(OddsError::InvalidBoardSize(board.len()));
    }
    let mut seven = [hole.0; 7];
    seven[1] = hole.1;
    seven[2..].copy_from_slice(board);

    let mut best: Option<RankedHand> = None;
    for (skip_a, skip_b) in (0..7usize).tuple_combinations() {
        let mut five = [seven[0]; 5];
        for (slot, card) in five.iter_mut().zip(
            seven
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != skip_a && i != skip_b)
                .map(|(_, c)| c),
        ) {
            *slot = *card;
        }

        let candidate = evaluate_five(five)?;
        let replace = match &best {
            None => true,
            Some(current) => candidate.compare(current)? == Outcome::Win,
        };
        if replace {
            best = Some(candidate);
        }
    }
    best.ok_or(OddsError::NoCategoryMatched)
}

/// Showdown between two players on a complete board.
pub fn compare_hands(hero: &HoleCards, villain: &HoleCards, board: &[Card]) -> OddsResult<Outcome> {
    let hero_best = best_hand(hero, board)?;
    let villain_best = best_hand(villain, board)?;
    hero_best.compare(&villain_best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, parse_hole};

    fn five(notation: &str) -> [Card; 5] {
        let cards = parse_cards(notation).unwrap();
        let mut hand: [Card; 5] = cards.try_into().unwrap();
        hand.sort();
        hand
    }

    fn ranks(keys: &[Card]) -> Vec<Rank> {
        keys.iter().map(|c| c.rank).collect()
    }

    #[test]
    fn wheel_key_is_the_five() {
        let hand = five("As2h3d4c5s");
        assert_eq!(ranks(&straight(&hand).unwrap()), vec![Rank::Five]);
        let suited = five("Ah2h3h4h5h");
        assert_eq!(ranks(&straight_flush(&suited).unwrap()), vec![Rank::Five]);
    }

    #[test]
    fn no_wraparound_straight() {
        assert!(straight(&five("QsKhAd2c3s")).is_none());
    }

    #[test]
    fn quads_key_order() {
        let low = five("3s3h3d3cKs");
        assert_eq!(ranks(&four_of_a_kind(&low).unwrap()), vec![Rank::King, Rank::Three]);
        let high = five("2sKhKdKcKs");
        assert_eq!(ranks(&four_of_a_kind(&high).unwrap()), vec![Rank::Two, Rank::King]);
    }

    #[test]
    fn full_house_trips_last() {
        let trips_low = five("4s4h4dJcJs");
        assert_eq!(ranks(&full_house(&trips_low).unwrap()), vec![Rank::Jack, Rank::Four]);
        let trips_high = five("4s4hJdJcJs");
        assert_eq!(ranks(&full_house(&trips_high).unwrap()), vec![Rank::Four, Rank::Jack]);
    }

    #[test]
    fn trips_kickers_ascending() {
        let hand = five("9s9h9d2cKs");
        assert_eq!(
            ranks(&three_of_a_kind(&hand).unwrap()),
            vec![Rank::Two, Rank::King, Rank::Nine]
        );
    }

    #[test]
    fn two_pair_keys() {
        let hand = five("3s3hKdKc7s");
        assert_eq!(
            ranks(&two_pair(&hand).unwrap()),
            vec![Rank::Seven, Rank::Three, Rank::King]
        );
        let kicker_low = five("2s3h3dKcKs");
        assert_eq!(
            ranks(&two_pair(&kicker_low).unwrap()),
            vec![Rank::Two, Rank::Three, Rank::King]
        );
    }

    #[test]
    fn one_pair_moves_pair_last() {
        let hand = five("2s7h7dJcKs");
        assert_eq!(
            ranks(&one_pair(&hand).unwrap()),
            vec![Rank::Two, Rank::Jack, Rank::King, Rank::Seven]
        );
        let low_pair = five("2s2h7dJcKs");
        assert_eq!(
            ranks(&one_pair(&low_pair).unwrap()),
            vec![Rank::Seven, Rank::Jack, Rank::King, Rank::Two]
        );
    }

    #[test]
    fn priority_picks_highest() {
        assert_eq!(evaluate_five(five("9h8h7h6h5h")).unwrap().category, HandCategory::StraightFlush);
        assert_eq!(evaluate_five(five("9s9h9dKcKs")).unwrap().category, HandCategory::FullHouse);
        assert_eq!(evaluate_five(five("9s9h9d9cKs")).unwrap().category, HandCategory::FourOfAKind);
        assert_eq!(evaluate_five(five("2d9d4dKdJd")).unwrap().category, HandCategory::Flush);
    }

    #[test]
    fn break_tie_is_antisymmetric() {
        let a = evaluate_five(five("2s7h7dJcKs")).unwrap();
        let b = evaluate_five(five("3s7c7sJdKh")).unwrap();
        assert_eq!(break_tie(&a.keys, &b.keys).unwrap(), Outcome::Loss);
        assert_eq!(break_tie(&b.keys, &a.keys).unwrap(), Outcome::Win);
        assert_eq!(break_tie(&a.keys, &a.keys).unwrap(), Outcome::Tie);
    }

    #[test]
    fn break_tie_rejects_length_mismatch() {
        let a = five("2s7h7dJcKs");
        assert_eq!(
            break_tie(&a[..3], &a[..4]),
            Err(OddsError::KeyLengthMismatch { left: 3, right: 4 })
        );
    }

    #[test]
    fn best_hand_requires_full_board() {
        let hole = parse_hole("AsAh").unwrap();
        let board = parse_cards("2s7h9d").unwrap();
        assert_eq!(best_hand(&hole, &board), Err(OddsError::InvalidBoardSize(3)));
    }

    #[test]
    fn best_hand_uses_one_hole_card() {
        let hole = parse_hole("Ah2c").unwrap();
        let board = parse_cards("KhQhJhTh3d").unwrap();
        let best = best_hand(&hole, &board).unwrap();
        assert_eq!(best.category, HandCategory::StraightFlush);
        assert_eq!(ranks(&best.keys), vec![Rank::Ace]);
    }

    #[test]
    fn outcome_signs() {
        assert_eq!(Outcome::Win.sign(), -1);
        assert_eq!(Outcome::Tie.sign(), 0);
        assert_eq!(Outcome::Loss.sign(), 1);
    }
}
