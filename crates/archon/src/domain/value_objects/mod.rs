//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod chain_stage;

pub use chain_stage::*;
