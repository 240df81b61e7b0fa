//! Color matching.
//!
//! A click on a color tile removes the 4-connected region of that color
//! when it reaches the configured minimum size. Large regions upgrade the
//! clicked tile into a special tile instead of removing it.

mod resolver;

pub use resolver::MatchResolver;
