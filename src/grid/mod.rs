//! The board and its gravity.
//!
//! - `Grid`: the `rows × cols` tile array with bounds-checked accessors,
//!   swap, removal and reshuffle
//! - `collapse`: per-column compaction and refill
//! - `notation`: text form of a board (`Display` / `FromStr`)

mod board;
mod collapse;
mod notation;

pub use board::Grid;
pub use collapse::{CollapseResult, CreatedTile, MovedTile};
