//! Service Ports
//!
//! Abstract interfaces for external services.

mod chat_model;

pub use chat_model::*;
