//! Matchbox learning for tic-tac-toe.
//!
//! Every canonical board position owns a "matchbox": a vector of bead counts,
//! one per cell. The agent draws a bead to pick its move, and after each
//! decisive game the winner's choices gain a bead while the loser's lose one.
//!
//! # Architecture
//!
//! ```text
//! GameSession (matchbox-engine)
//!     ↓ asks for moves
//! agent::choose_move ── WeightStore ── WeightVector::pick
//!     ↓ produces
//! Move log (I / M / R / F / W / C)
//!     ↓ replayed by
//! learning::learn_from_games
//!     ↓ adjusts
//! WeightStore
//! ```
//!
//! # Modules
//!
//! - [`weights`] - a single matchbox and weighted sampling
//! - [`store`] - lazily populated table of matchboxes
//! - [`agent`] - the matchbox move picker
//! - [`learning`] - move log parsing and credit assignment
//! - [`self_play`] - agent-versus-agent training runs
//!
//! # Example
//!
//! ```
//! use matchbox_training::{WeightStore, self_play};
//! use rand::SeedableRng as _;
//!
//! let mut store = WeightStore::new();
//! let mut rng = rand_pcg::Pcg32::seed_from_u64(0);
//! let (stats, _, _) = self_play::self_play_and_learn(&mut store, 10, &mut rng).unwrap();
//! assert_eq!(stats.games, 10);
//! ```

pub use self::store::{DEFAULT_INITIAL_WEIGHT, WeightStore};

pub mod agent;
pub mod learning;
pub mod self_play;
pub mod store;
pub mod weights;
