//! tilt-2048: a 2048 session engine for square boards of any size
//!
//! This crate provides:
//! - A tilt engine (`engine` module) that slides and merges tiles toward any of
//!   the four edges through one general line pass, with the merge-once rule
//!   and the "leading two of three" tie-break
//! - Terminal-state detection (winning tile present, or no move left)
//! - A [`Session`] holding the board, running score, best-score watermark and
//!   a change observer, with a canonical text rendering
//!
//! Quick start:
//! ```
//! use tilt_2048::{Direction, Session};
//!
//! let mut s = Session::new(4).unwrap();
//! s.add_tile(2, 0, 0).unwrap();
//! s.add_tile(2, 0, 3).unwrap();
//! assert!(s.tilt(Direction::North));
//! assert_eq!(s.score(), 4);
//! assert_eq!(s.tile_at(0, 3).unwrap().map(|t| t.value()), Some(4));
//! ```
//!
//! Seeded random play:
//! ```
//! use tilt_2048::{Direction, Session};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut s = Session::new(4).unwrap();
//! s.add_random_tile(&mut rng);
//! s.add_random_tile(&mut rng);
//!
//! let mut moves = 0u32;
//! for dir in Direction::ALL.into_iter().cycle().take(16) {
//!     if s.is_game_over() {
//!         break;
//!     }
//!     if s.tilt(dir) {
//!         s.add_random_tile(&mut rng);
//!         moves += 1;
//!     }
//! }
//! assert!(moves > 0);
//! println!("{s}");
//! ```
//!
pub mod config;
pub mod engine;
pub mod error;
pub mod session;

pub use config::SessionConfig;
pub use engine::{Direction, Grid, Tile, TileId, TiltOutcome};
pub use error::{GameError, Result};
pub use session::{Observer, Session};
