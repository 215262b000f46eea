//! # quickdraw-engine: Five-Card Poker Mini-Game Core
//!
//! Deterministic rules and state for a five-card poker picking game: deck
//! construction, hand ranking, scoring, level progression, power-up hand
//! synthesis, and a selection gate that serializes overlapping input events
//! into one state transition at a time.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and the 52-card universe
//! - [`deck`] - Fisher–Yates shuffling with a seeded ChaCha20 RNG
//! - [`hand`] - Ten-category hand evaluation and point totals
//! - [`synth`] - Building a hand of a requested category from a card pool
//! - [`rules`] - Time bonus, leftover penalty, level goals, phase schedule
//! - [`session`] - Session state, hand submission, level transitions, power-ups
//! - [`gate`] - Per-session selection gate for concurrent intents
//! - [`logger`] - Selection trace observers and JSONL hand records
//! - [`errors`] - Error types for engine operations
//!
//! ## Quick Start
//!
//! ```rust
//! use quickdraw_engine::cards::{Card, Rank, Suit};
//! use quickdraw_engine::hand::{evaluate_hand, HandCategory};
//!
//! let cards = [
//!     Card::new(Rank::Ten, Suit::Hearts),
//!     Card::new(Rank::Jack, Suit::Hearts),
//!     Card::new(Rank::Queen, Suit::Hearts),
//!     Card::new(Rank::King, Suit::Hearts),
//!     Card::new(Rank::Ace, Suit::Hearts),
//! ];
//!
//! let result = evaluate_hand(&cards);
//! assert_eq!(result.category, HandCategory::RoyalFlush);
//! assert_eq!(result.total_points, HandCategory::RoyalFlush.base_points() + 60);
//! ```
//!
//! ## Selecting Cards
//!
//! All writes to a running game go through a [`gate::SelectionGate`]:
//!
//! ```rust
//! use quickdraw_engine::gate::{RejectReason, SelectionGate, SelectionOutcome};
//! use quickdraw_engine::session::{GameMode, SessionState};
//!
//! let gate = SelectionGate::new(SessionState::new(GameMode::Classic, 42));
//! let card = gate.snapshot().deck[0];
//!
//! assert!(gate.select(card).is_accepted());
//! assert_eq!(
//!     gate.select(card),
//!     SelectionOutcome::Rejected(RejectReason::AlreadySelected)
//! );
//! ```

pub mod cards;
pub mod deck;
pub mod errors;
pub mod gate;
pub mod hand;
pub mod logger;
pub mod rules;
pub mod session;
pub mod synth;
