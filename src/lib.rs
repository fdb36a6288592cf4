pub mod card_encoding;
pub mod cards;
pub mod cli;
pub mod completions;
pub mod deck;
pub mod display;
pub mod equity;
pub mod error;
pub mod hand_evaluator;
