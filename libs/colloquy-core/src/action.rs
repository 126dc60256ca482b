use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::Parameters;

/// A recorded step of the agent's internal reasoning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentThought {
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl AgentThought {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Response,
    ToolUse,
}

/// Something the agent did during a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentAction {
    pub action_type: ActionType,
    pub content: Option<String>,
    pub tool_name: Option<String>,
    pub tool_parameters: Option<Parameters>,
    pub timestamp: DateTime<Utc>,
}

impl AgentAction {
    pub fn response(content: impl Into<String>) -> Self {
        Self {
            action_type: ActionType::Response,
            content: Some(content.into()),
            tool_name: None,
            tool_parameters: None,
            timestamp: Utc::now(),
        }
    }

    pub fn tool_use(tool_name: impl Into<String>, parameters: Parameters) -> Self {
        Self {
            action_type: ActionType::ToolUse,
            content: None,
            tool_name: Some(tool_name.into()),
            tool_parameters: Some(parameters),
            timestamp: Utc::now(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Tool parameters only make sense next to a tool name, and a tool use
    /// must name its tool.
    pub fn validate(&self) -> Result<()> {
        if self.tool_parameters.is_some() && self.tool_name.is_none() {
            return Err(CoreError::InconsistentAction(
                "tool parameters given without a tool name".into(),
            ));
        }
        if self.action_type == ActionType::ToolUse && self.tool_name.is_none() {
            return Err(CoreError::InconsistentAction(
                "tool_use action is missing a tool name".into(),
            ));
        }
        Ok(())
    }
}
