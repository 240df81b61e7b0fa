//! Player-invoked boosters: the area bomb and the two-pick swap.
//!
//! Boosters sit outside the normal match flow. Each spends its own charge
//! counter; the swap additionally costs a move, which the orchestrator
//! charges when the coordinator reports a completed swap.

mod coordinator;

pub use coordinator::{BoosterAction, BoosterCoordinator, BoosterKind, BoosterState};
