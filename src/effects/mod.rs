//! Special tile effects.
//!
//! - `area`: the shape each special kind clears
//! - `SpecialResolver`: expands an area through every special tile it
//!   touches (chain reaction)
//!
//! ## Termination
//!
//! The chain keeps one visited set for the whole reaction. A position is
//! added to the result and, if special, queued at most once, so the queue
//! drains on any finite grid even when special tiles sit in each other's
//! areas.

mod area;
mod chain;

pub use area::area;
pub use chain::SpecialResolver;
