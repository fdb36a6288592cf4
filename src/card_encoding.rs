//! Maps between `Card` structs and u8 indices (0-51) used by the deck mask.
//!
//! Encoding: index = rank * 4 + suit
//!   rank: 0=Two, 1=Three, ..., 12=Ace
//!   suit: 0=Spades, 1=Hearts, 2=Diamonds, 3=Clubs

use crate::cards::{Card, Suit, ALL_RANKS, ALL_SUITS};

pub fn card_to_index(card: &Card) -> u8 {
    let suit_idx = match card.suit {
        Suit::Spades => 0,
        Suit::Hearts => 1,
        Suit::Diamonds => 2,
        Suit::Clubs => 3,
    };
    card.rank.index() * 4 + suit_idx
}

pub fn index_to_card(index: u8) -> Card {
    Card::new(ALL_RANKS[(index / 4) as usize], ALL_SUITS[(index % 4) as usize])
}

/// Bit for a card within a 52-bit mask.
#[inline]
pub fn card_bit(card: &Card) -> u64 {
    1u64 << card_to_index(card)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Rank;

    #[test]
    fn every_index_maps_back() {
        for i in 0..52u8 {
            let card = index_to_card(i);
            assert_eq!(card_to_index(&card), i, "index {} did not map back", i);
        }
    }

    #[test]
    fn known_cards() {
        assert_eq!(card_to_index(&Card::new(Rank::Two, Suit::Spades)), 0);
        assert_eq!(card_to_index(&Card::new(Rank::Ace, Suit::Clubs)), 51);
        assert_eq!(card_to_index(&Card::new(Rank::Ace, Suit::Spades)), 48);
    }

    #[test]
    fn index_order_follows_rank() {
        // Ascending index means non-decreasing rank.
        for i in 1..52u8 {
            assert!(index_to_card(i - 1).rank <= index_to_card(i).rank);
        }
    }
}
