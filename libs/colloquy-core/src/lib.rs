//! Agent state and interaction log.
//!
//! The crate holds everything an agent accumulates over a conversation:
//! - Identity and the tool catalogue (`Agent`, `Tool`).
//! - The message history, seeded with the system prompt (`Message`, `Role`).
//! - Memories with a validated importance score (`Memory`).
//! - Append-only thought and action logs (`AgentThought`, `AgentAction`).
//!
//! Nothing here performs I/O or logs; every operation returns a value or a
//! `CoreError`.

mod action;
mod agent;
mod error;
mod memory;
mod message;
mod tool;

pub use action::{ActionType, AgentAction, AgentThought};
pub use agent::{Agent, AgentSummary};
pub use error::{CoreError, ErrorKind, Result};
pub use memory::{Memory, DEFAULT_IMPORTANCE, MAX_IMPORTANCE, MIN_IMPORTANCE};
pub use message::{Message, Role};
pub use tool::{Tool, ToolParameter};

/// Parameter mapping handed to tools and stored on actions.
pub type Parameters = serde_json::Map<String, serde_json::Value>;
