use std::sync::Arc;

use colloquy_core::{
    Agent, AgentAction, AgentSummary, CoreError, Memory, Parameters, Role, Tool,
    DEFAULT_IMPORTANCE, MAX_IMPORTANCE, MIN_IMPORTANCE,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{ColloquyError, Result};
use crate::llm::LanguageModel;
use crate::reasoning::{format_tools_for_prompt, response_messages, thinking_messages};
use crate::tool::ToolRegistry;

/// Drives turns against a language model and records them in an [`Agent`].
///
/// Each turn makes two sequential model calls: one to think, one to answer.
/// Tools are advertised in both prompts but never dispatched by the turn
/// itself; [`ConversationalAgent::invoke_tool`] is the explicit way to run one.
pub struct ConversationalAgent<M: LanguageModel + ?Sized> {
    state: Agent,
    model: Arc<M>,
    tools: ToolRegistry,
    default_importance: i64,
}

impl<M: LanguageModel + ?Sized> ConversationalAgent<M> {
    pub fn new(
        model: Arc<M>,
        name: impl Into<String>,
        description: impl Into<String>,
        system_prompt: impl Into<String>,
    ) -> Result<Self> {
        let state = Agent::create(name, description, system_prompt)?;
        info!(agent_id = state.id(), name = state.name(), "created agent");
        Ok(Self {
            state,
            model,
            tools: ToolRegistry::new(),
            default_importance: DEFAULT_IMPORTANCE,
        })
    }

    /// Importance used by [`ConversationalAgent::remember`].
    pub fn with_default_importance(mut self, importance: i64) -> Result<Self> {
        if !(MIN_IMPORTANCE..=MAX_IMPORTANCE).contains(&importance) {
            return Err(CoreError::InvalidImportance(importance).into());
        }
        self.default_importance = importance;
        Ok(self)
    }

    /// Advertises every handler in `tools` and keeps them for dispatch.
    pub fn with_tools(mut self, tools: ToolRegistry) -> Result<Self> {
        for descriptor in tools.descriptors() {
            self.add_tool(descriptor)?;
        }
        self.tools = tools;
        Ok(self)
    }

    pub fn add_tool(&mut self, tool: Tool) -> Result<()> {
        let name = tool.name.clone();
        self.state.register_tool(tool)?;
        info!(tool = %name, "added tool");
        Ok(())
    }

    pub fn add_memory(
        &mut self,
        content: impl Into<String>,
        source: impl Into<String>,
        importance: i64,
    ) -> Result<Memory> {
        let memory = self.state.record_memory(content, source, importance)?.clone();
        info!(memory_id = memory.id(), importance = memory.importance(), "added memory");
        Ok(memory)
    }

    /// Records a memory at the default importance.
    pub fn remember(
        &mut self,
        content: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<Memory> {
        self.add_memory(content, source, self.default_importance)
    }

    pub fn state(&self) -> &Agent {
        &self.state
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn summary(&self) -> AgentSummary {
        self.state.summary()
    }

    pub fn format_tools_for_prompt(&self) -> String {
        format_tools_for_prompt(self.state.available_tools())
    }

    /// Asks the model how it would approach `user_input` and records the thought.
    pub async fn think(&mut self, user_input: &str) -> Result<String> {
        let messages = thinking_messages(user_input, self.state.available_tools());
        debug!(prompt = %messages[1].content, "thinking");
        let thought = self.model.complete_chat(&messages).await?;
        Ok(self.state.record_thought(thought).content.clone())
    }

    /// Runs one turn and returns the assistant reply.
    pub async fn process_user_input(&mut self, user_input: &str) -> Result<String> {
        self.state.append_message(Role::User, user_input);

        self.think(user_input).await?;

        let messages = response_messages(
            self.state.system_prompt(),
            user_input,
            self.state.available_tools(),
        );
        let response = self.model.complete_chat(&messages).await?;

        self.state
            .record_action(AgentAction::response(response.clone()))?;
        self.state.append_message(Role::Assistant, response.clone());

        info!(
            messages = self.state.messages().len(),
            thoughts = self.state.thoughts().len(),
            "turn complete"
        );
        Ok(response)
    }

    /// Dispatches a tool by name and records the call as a `tool_use` action.
    ///
    /// The tool must be both advertised and backed by a handler.
    pub async fn invoke_tool(&mut self, name: &str, params: Parameters) -> Result<Value> {
        if self.state.tool(name).is_none() {
            return Err(ColloquyError::ToolNotFound(name.to_string()));
        }
        let output = match self.tools.call(name, &params).await {
            Ok(output) => output,
            Err(err) => {
                warn!(tool = name, error = %err, "tool call failed");
                return Err(err);
            }
        };
        self.state.record_action(
            AgentAction::tool_use(name, params).with_content(output.to_string()),
        )?;
        info!(tool = name, "tool call recorded");
        Ok(output)
    }

    /// The whole aggregate as pretty-printed JSON.
    pub fn transcript_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.state)?)
    }
}
