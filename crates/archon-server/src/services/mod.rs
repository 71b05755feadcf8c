//! Services
//!
//! The model-chain orchestrator, its OpenRouter adapter, the in-memory
//! session store, and the advisor use-case service that ties them together.

pub mod advisor;
pub mod chain;
pub mod openrouter;
pub mod session_store;

pub use advisor::{AdvisorService, ChainFactory, OpenRouterChainFactory};
pub use chain::ModelChain;
pub use openrouter::OpenRouterModel;
pub use session_store::SessionStore;
