use serde::Serialize;
use uuid::Uuid;

use crate::action::{AgentAction, AgentThought};
use crate::error::{CoreError, Result};
use crate::memory::Memory;
use crate::message::{Message, Role};
use crate::tool::Tool;

/// Aggregate root holding an agent's identity, tool catalogue and logs.
///
/// Every log only grows. The first message is the system prompt given to
/// [`Agent::create`]; later appends land after it.
#[derive(Debug, Clone, Serialize)]
pub struct Agent {
    id: String,
    name: String,
    description: String,
    available_tools: Vec<Tool>,
    messages: Vec<Message>,
    memories: Vec<Memory>,
    thoughts: Vec<AgentThought>,
    actions: Vec<AgentAction>,
}

/// Counters over an agent's logs plus the most recent thought.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentSummary {
    pub messages: usize,
    pub memories: usize,
    pub thoughts: usize,
    pub actions: usize,
    pub tools: usize,
    pub latest_thought: Option<String>,
}

impl Agent {
    pub fn create(
        name: impl Into<String>,
        description: impl Into<String>,
        system_prompt: impl Into<String>,
    ) -> Result<Self> {
        let system_prompt = system_prompt.into();
        if system_prompt.trim().is_empty() {
            return Err(CoreError::EmptySystemPrompt);
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            available_tools: Vec::new(),
            messages: vec![Message::system(system_prompt)],
            memories: Vec::new(),
            thoughts: Vec::new(),
            actions: Vec::new(),
        })
    }

    /// Adds a tool to the catalogue. A name already in the catalogue is rejected.
    pub fn register_tool(&mut self, tool: Tool) -> Result<()> {
        if self.tool(&tool.name).is_some() {
            return Err(CoreError::DuplicateTool(tool.name));
        }
        self.available_tools.push(tool);
        Ok(())
    }

    pub fn record_memory(
        &mut self,
        content: impl Into<String>,
        source: impl Into<String>,
        importance: i64,
    ) -> Result<&Memory> {
        let memory = Memory::new(content, source, importance)?;
        self.memories.push(memory);
        Ok(&self.memories[self.memories.len() - 1])
    }

    pub fn append_message(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(Message::new(role, content));
    }

    pub fn record_thought(&mut self, content: impl Into<String>) -> &AgentThought {
        self.thoughts.push(AgentThought::new(content));
        &self.thoughts[self.thoughts.len() - 1]
    }

    pub fn record_action(&mut self, action: AgentAction) -> Result<()> {
        action.validate()?;
        self.actions.push(action);
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn system_prompt(&self) -> &str {
        &self.messages[0].content
    }

    pub fn available_tools(&self) -> &[Tool] {
        &self.available_tools
    }

    pub fn tool(&self, name: &str) -> Option<&Tool> {
        self.available_tools.iter().find(|tool| tool.name == name)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn memories(&self) -> &[Memory] {
        &self.memories
    }

    pub fn thoughts(&self) -> &[AgentThought] {
        &self.thoughts
    }

    pub fn latest_thought(&self) -> Option<&AgentThought> {
        self.thoughts.last()
    }

    pub fn actions(&self) -> &[AgentAction] {
        &self.actions
    }

    pub fn summary(&self) -> AgentSummary {
        AgentSummary {
            messages: self.messages.len(),
            memories: self.memories.len(),
            thoughts: self.thoughts.len(),
            actions: self.actions.len(),
            tools: self.available_tools.len(),
            latest_thought: self.latest_thought().map(|t| t.content.clone()),
        }
    }
}
