//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Transcript: Append-only session conversation record
//! - Session: Explicit per-user interaction context with credentials
//! - Analysis: Validated structured output of the reasoning stage
//! - Exchange: Result of one full chain invocation

mod analysis;
mod exchange;
mod session;
mod transcript;

pub use analysis::*;
pub use exchange::*;
pub use session::*;
pub use transcript::*;
