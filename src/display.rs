//! Terminal rendering for cards and odds results.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Table};

use crate::cards::{Card, HoleCards, Suit};
use crate::equity::{EquityResult, Strategy};
use crate::error::OddsResult;
use crate::hand_evaluator::best_hand;

pub fn suit_symbol(suit: Suit) -> char {
    match suit {
        Suit::Spades => '♠',
        Suit::Hearts => '♥',
        Suit::Diamonds => '♦',
        Suit::Clubs => '♣',
    }
}

/// Rank plus suit symbol, red for hearts and diamonds.
pub fn pretty_card(card: &Card) -> String {
    let text = format!("{}{}", card.rank.to_char(), suit_symbol(card.suit));
    match card.suit {
        Suit::Hearts | Suit::Diamonds => text.red().bold().to_string(),
        Suit::Spades | Suit::Clubs => text.bold().to_string(),
    }
}

pub fn pretty_cards(cards: &[Card]) -> String {
    cards.iter().map(pretty_card).collect::<Vec<_>>().join(" ")
}

pub fn pretty_hole(hole: &HoleCards) -> String {
    pretty_cards(&hole.cards())
}

fn pct(x: f64) -> String {
    format!("{:.3}%", x * 100.0)
}

/// Hole cards, followed by the made hand once the board is complete.
fn hand_cell(hole: &HoleCards, board: &[Card]) -> OddsResult<String> {
    if board.len() < 5 {
        return Ok(pretty_hole(hole));
    }
    let best = best_hand(hole, board)?;
    Ok(format!("{} ({})", pretty_hole(hole), best.category))
}

/// Summary table for one matchup.
pub fn results_table(
    hero: &HoleCards,
    villain: &HoleCards,
    board: &[Card],
    strategy: Strategy,
    result: &EquityResult,
) -> OddsResult<Table> {
    let board_text = if board.is_empty() {
        "(preflop)".dimmed().to_string()
    } else {
        pretty_cards(board)
    };

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["", "Hand", "Win", "Tie", "Equity"]);
    table.add_row(vec![
        Cell::new("Hero"),
        Cell::new(hand_cell(hero, board)?),
        Cell::new(pct(result.win)).set_alignment(CellAlignment::Right),
        Cell::new(pct(result.tie)).set_alignment(CellAlignment::Right),
        Cell::new(pct(result.equity())).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Villain"),
        Cell::new(hand_cell(villain, board)?),
        Cell::new(pct(result.lose)).set_alignment(CellAlignment::Right),
        Cell::new(pct(result.tie)).set_alignment(CellAlignment::Right),
        Cell::new(pct(result.lose + result.tie / 2.0)).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Board"),
        Cell::new(board_text),
        Cell::new(format!("{} via {}", result.samples, strategy)),
        Cell::new(""),
        Cell::new(""),
    ]);
    Ok(table)
}
