//! A small conversational agent harness.
//!
//! The crate wires the `colloquy-core` state store to the outside world:
//! - A language model abstraction (`LanguageModel`) with an OpenAI client and a
//!   scripted `StubModel`.
//! - Tool handlers and a `ToolRegistry`, plus four mock tools.
//! - A `ConversationalAgent` that thinks, answers and logs every turn.
//! - Configuration and log setup for the `colloquy` binary.

mod agent;
pub mod config;
mod error;
mod llm;
pub mod reasoning;
pub mod telemetry;
mod tool;
pub mod tools;

pub use agent::ConversationalAgent;
pub use colloquy_core::{
    ActionType, Agent, AgentAction, AgentSummary, AgentThought, CoreError, ErrorKind, Memory,
    Message, Parameters, Role, Tool, ToolParameter,
};
pub use config::{AgentConfig, AppConfig, LoggingConfig, ModelConfig};
pub use error::{ColloquyError, Result};
pub use llm::{build_model, LanguageModel, OpenAIClient, StubModel};
pub use tool::{parameters_from, parse_parameters, ToolHandler, ToolRegistry};
pub use tools::default_toolkit;
