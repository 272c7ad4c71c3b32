//! # holdem-engine: Texas Hold'em Room Engine
//!
//! A deterministic multiplayer Texas Hold'em engine. Given a room snapshot and
//! one betting action it returns the next snapshot: dealing, blinds, turn
//! order, street progression, pot accounting and showdown settlement. The
//! engine performs no I/O; persisting rooms and notifying clients is left to
//! the caller.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card), labels and parsing
//! - [`deck`] - Deck construction and Fisher–Yates shuffling with a pluggable RNG
//! - [`hand`] - Five-card scoring, score comparison and best-of-seven search
//! - [`player`] - Lobby and in-hand player records, player actions
//! - [`rules`] - Action validation against the current bet
//! - [`game`] - In-hand state and turn order
//! - [`engine`] - Hand start, action application, street advance and showdown
//! - [`room`] - Room lifecycle (create, join, start)
//! - [`logger`] - Finished-hand records serialized as JSONL
//! - [`errors`] - Error types for rejected operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::engine::apply_action;
//! use holdem_engine::player::{PlayerAction, User};
//! use holdem_engine::room::{create_room, join_room, start_game, RoomStatus};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let room = create_room(&User::new("a", "A"));
//! let room = join_room(&room, &User::new("b", "B")).unwrap();
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let room = start_game(&room, &mut rng).unwrap();
//! assert_eq!(room.status, RoomStatus::Playing);
//!
//! let game = room.game.as_ref().unwrap();
//! assert_eq!(game.pot, 3);
//! let to_act = game.player_to_act().unwrap().id.clone();
//! let room = apply_action(&room, &to_act, PlayerAction::Fold).unwrap();
//! assert_eq!(room.status, RoomStatus::Waiting);
//! ```
//!
//! ## Hand Evaluation
//!
//! ```rust
//! use holdem_engine::cards::Card;
//! use holdem_engine::hand::{best_hand, Category};
//!
//! let cards: Vec<Card> = ["A♠", "K♠", "Q♠", "J♠", "10♠", "2♣", "3♦"]
//!     .iter()
//!     .map(|s| s.parse().unwrap())
//!     .collect();
//! let best = best_hand(&cards).unwrap();
//! assert_eq!(best.score.category, Category::StraightFlush);
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod room;
pub mod rules;
