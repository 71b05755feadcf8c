//! Archon Domain Library
//!
//! Core domain types and interfaces for the Archon system architect advisor.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Transcript, Session, Analysis, Exchange)
//!   - `value_objects/`: Immutable value types (ChainStage)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `services/`: External service interfaces (chat model endpoint)
//!
//! # Usage
//!
//! ```rust,ignore
//! use archon::domain::{Session, Transcript, ArchitectureAnalysis};
//! use archon::ports::ChatModel;
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    ArchitectureAnalysis, ChainError, ChainOutcome, ChainStage, ComponentSpec, DataStoreSpec,
    Role, Session, SessionCredentials, Transcript, TranscriptEntry,
};
pub use ports::{
    ChatMessage, ChatModel, CompletionOptions, CompletionResponse, MessageRole, TokenUsage,
};
