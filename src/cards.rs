//! Card model: suits, ranks, cards and hole-card pairs, plus the textual
//! notation used on the command line (`As`, `Td`, `2c`, ...).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{OddsError, OddsResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

pub const ALL_SUITS: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

impl Suit {
    pub fn to_char(self) -> char {
        match self {
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
        }
    }

    pub fn from_char(c: char) -> Option<Suit> {
        match c.to_ascii_lowercase() {
            's' => Some(Suit::Spades),
            'h' => Some(Suit::Hearts),
            'd' => Some(Suit::Diamonds),
            'c' => Some(Suit::Clubs),
            _ => None,
        }
    }
}

/// Card rank, indexed 0 (Two) through 12 (Ace).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Two = 0,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

pub const ALL_RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

impl Rank {
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Rank from its face value, 2 through 14.
    pub fn from_value(value: u8) -> Option<Rank> {
        value.checked_sub(2).and_then(|i| ALL_RANKS.get(i as usize)).copied()
    }

    /// The next rank up. Straights never wrap, so the Ace has no successor.
    pub fn successor(self) -> Option<Rank> {
        ALL_RANKS.get(self as usize + 1).copied()
    }

    pub fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    pub fn from_char(c: char) -> Option<Rank> {
        match c.to_ascii_uppercase() {
            '2' => Some(Rank::Two),
            '3' => Some(Rank::Three),
            '4' => Some(Rank::Four),
            '5' => Some(Rank::Five),
            '6' => Some(Rank::Six),
            '7' => Some(Rank::Seven),
            '8' => Some(Rank::Eight),
            '9' => Some(Rank::Nine),
            'T' => Some(Rank::Ten),
            'J' => Some(Rank::Jack),
            'Q' => Some(Rank::Queen),
            'K' => Some(Rank::King),
            'A' => Some(Rank::Ace),
            _ => None,
        }
    }
}

/// A playing card. Ordering is by rank first, with suit only separating
/// equal ranks so that `Ord` stays consistent with `Eq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Card { rank, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit.to_char())
    }
}

/// One player's two private cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HoleCards(pub Card, pub Card);

impl HoleCards {
    pub fn new(first: Card, second: Card) -> OddsResult<Self> {
        if first == second {
            return Err(OddsError::DuplicateCard(first));
        }
        Ok(HoleCards(first, second))
    }

    pub fn cards(&self) -> [Card; 2] {
        [self.0, self.1]
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a single card such as `As`, `td` or `10h`.
pub fn parse_card(notation: &str) -> OddsResult<Card> {
    let s = notation.trim();
    let invalid = || OddsError::InvalidCard(notation.to_string());

    let mut chars = s.chars();
    let suit_char = chars.next_back().ok_or_else(invalid)?;
    let rank_str = chars.as_str();

    let rank = match rank_str {
        "10" => Rank::Ten,
        r if r.chars().count() == 1 => r.chars().next().and_then(Rank::from_char).ok_or_else(invalid)?,
        _ => return Err(invalid()),
    };
    let suit = Suit::from_char(suit_char).ok_or_else(invalid)?;
    Ok(Card::new(rank, suit))
}

/// Parse one `suit,value` card such as `s,14` or `h,2`. Returns `None` when
/// the text is not in that form at all.
fn parse_suit_value(segment: &str) -> Option<OddsResult<Card>> {
    let (suit, value) = segment.split_once(',')?;
    let mut suit_chars = suit.trim().chars();
    let suit = match (suit_chars.next().and_then(Suit::from_char), suit_chars.next()) {
        (Some(suit), None) => suit,
        _ => return None,
    };
    let value: u8 = value.trim().parse().ok()?;
    Some(
        Rank::from_value(value)
            .map(|rank| Card::new(rank, suit))
            .ok_or_else(|| OddsError::InvalidCard(segment.trim().to_string())),
    )
}

/// Parse a run of cards like `2s7h9d`, `2s,7h,9d` or `2s 7h 9d`. The
/// `suit,value` form separated by `;` (`s,14;h,14`) is accepted as well.
/// Does not check the count; callers validate board size separately.
pub fn parse_cards(notation: &str) -> OddsResult<Vec<Card>> {
    let mut cards = Vec::new();
    for segment in notation.split(';') {
        match parse_suit_value(segment) {
            Some(card) => cards.push(card?),
            None => cards.extend(parse_compact(segment)?),
        }
    }
    Ok(cards)
}

fn parse_compact(notation: &str) -> OddsResult<Vec<Card>> {
    let compact: String = notation
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();

    let mut cards = Vec::new();
    let mut rest = compact.as_str();
    while !rest.is_empty() {
        let len = if rest.starts_with("10") { 3 } else { 2 };
        if rest.len() < len || !rest.is_char_boundary(len) {
            return Err(OddsError::InvalidCard(rest.to_string()));
        }
        let (head, tail) = rest.split_at(len);
        cards.push(parse_card(head)?);
        rest = tail;
    }
    Ok(cards)
}

/// Parse a board, rejecting sizes other than 0, 3, 4 or 5.
pub fn parse_board(notation: &str) -> OddsResult<Vec<Card>> {
    let cards = parse_cards(notation)?;
    match cards.len() {
        0 | 3 | 4 | 5 => Ok(cards),
        n => Err(OddsError::InvalidBoardSize(n)),
    }
}

/// Parse exactly two distinct cards.
pub fn parse_hole(notation: &str) -> OddsResult<HoleCards> {
    let cards = parse_cards(notation)?;
    match cards.as_slice() {
        [a, b] => HoleCards::new(*a, *b),
        _ => Err(OddsError::InvalidCard(format!(
            "expected two hole cards, got '{}'",
            notation
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_standard_notation() {
        assert_eq!(parse_card("As").unwrap(), Card::new(Rank::Ace, Suit::Spades));
        assert_eq!(parse_card("td").unwrap(), Card::new(Rank::Ten, Suit::Diamonds));
        assert_eq!(parse_card("10h").unwrap(), Card::new(Rank::Ten, Suit::Hearts));
        assert_eq!(parse_card("2C").unwrap(), Card::new(Rank::Two, Suit::Clubs));
    }

    #[test]
    fn rejects_bad_cards() {
        assert!(matches!(parse_card("1s"), Err(OddsError::InvalidCard(_))));
        assert!(matches!(parse_card("Ax"), Err(OddsError::InvalidCard(_))));
        assert!(matches!(parse_card(""), Err(OddsError::InvalidCard(_))));
        assert!(matches!(parse_card("AKs"), Err(OddsError::InvalidCard(_))));
    }

    #[test]
    fn board_separators() {
        let a = parse_board("2s7h9d").unwrap();
        let b = parse_board("2s, 7h; 9d").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
        assert!(parse_board("").unwrap().is_empty());
    }

    #[test]
    fn board_size_checked() {
        assert_eq!(parse_board("2s7h"), Err(OddsError::InvalidBoardSize(2)));
        assert_eq!(
            parse_board("2s7h9dJcKhAs"),
            Err(OddsError::InvalidBoardSize(6))
        );
    }

    #[test]
    fn hole_requires_two_distinct() {
        assert!(parse_hole("AsAh").is_ok());
        assert!(matches!(parse_hole("AsAs"), Err(OddsError::DuplicateCard(_))));
        assert!(parse_hole("As").is_err());
        assert!(parse_hole("AsAhAd").is_err());
    }

    #[test]
    fn ordering_is_by_rank() {
        let mut cards = parse_cards("KhAs2dTc").unwrap();
        cards.sort();
        let ranks: Vec<Rank> = cards.iter().map(|c| c.rank).collect();
        assert_eq!(ranks, vec![Rank::Two, Rank::Ten, Rank::King, Rank::Ace]);
    }

    #[test]
    fn successor_does_not_wrap() {
        assert_eq!(Rank::Four.successor(), Some(Rank::Five));
        assert_eq!(Rank::Ace.successor(), None);
    }

    #[test]
    fn suit_value_notation() {
        let hole = parse_hole("s,14;h,14").unwrap();
        assert_eq!(hole, parse_hole("AsAh").unwrap());

        let board = parse_board("d, 10; c,2;s,11").unwrap();
        assert_eq!(board, parse_cards("Td2cJs").unwrap());

        assert!(matches!(parse_cards("s,15"), Err(OddsError::InvalidCard(_))));
        assert!(matches!(parse_cards("s,1"), Err(OddsError::InvalidCard(_))));
        assert!(matches!(parse_cards("x,14"), Err(OddsError::InvalidCard(_))));
    }

    #[test]
    fn rank_from_face_value() {
        assert_eq!(Rank::from_value(2), Some(Rank::Two));
        assert_eq!(Rank::from_value(14), Some(Rank::Ace));
        assert_eq!(Rank::from_value(0), None);
        assert_eq!(Rank::from_value(15), None);
    }

    #[test]
    fn display_round_trips() {
        let card = Card::new(Rank::Queen, Suit::Hearts);
        assert_eq!(card.to_string(), "Qh");
        assert_eq!(parse_card(&card.to_string()).unwrap(), card);
    }
}
