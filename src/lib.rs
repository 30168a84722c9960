//! Conway's Game of Life on a toroidal grid, with per-cell change reporting.

pub mod engine;
pub mod pattern;
pub mod pos;
pub mod torus;

pub use engine::{ChangeListener, GameEngineWindow, GameOfLife, NoopListener};
pub use pattern::{PatternDecoder, PatternError, Plaintext, RunLengthEncoded};
pub use pos::Pos2;
pub use torus::Torus;
