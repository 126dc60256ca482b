//! The "think before answering" step of a turn.

use colloquy_core::{Message, Tool};

pub const THINKING_SYSTEM_PROMPT: &str = "You are an AI assistant thinking step by step about how to respond to a user. \
Think through what tools might be useful and how to structure your response.";

/// Renders the tool catalogue the way both prompts embed it.
pub fn format_tools_for_prompt(tools: &[Tool]) -> String {
    if tools.is_empty() {
        return "No tools available.".to_string();
    }

    tools
        .iter()
        .map(|tool| {
            let params = tool
                .parameters()
                .iter()
                .map(|param| {
                    if tool.is_required(&param.name) {
                        format!("{} (required)", param.name)
                    } else {
                        param.name.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "Tool: {}\nDescription: {}\nParameters: {}\n",
                tool.name, tool.description, params
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn thinking_messages(user_input: &str, tools: &[Tool]) -> Vec<Message> {
    vec![
        Message::system(THINKING_SYSTEM_PROMPT),
        Message::user(format!(
            "User input: {user_input}\n\nAvailable tools:\n{}\n\nThink step by step about how to respond to this user request.",
            format_tools_for_prompt(tools)
        )),
    ]
}

pub fn response_messages(system_prompt: &str, user_input: &str, tools: &[Tool]) -> Vec<Message> {
    vec![
        Message::system(system_prompt),
        Message::user(format!(
            "Available tools:\n{}\n\nUser input: {user_input}",
            format_tools_for_prompt(tools)
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use colloquy_core::Role;

    #[test]
    fn formats_empty_catalogue() {
        assert_eq!(format_tools_for_prompt(&[]), "No tools available.");
    }

    #[test]
    fn marks_required_parameters() {
        let tools = vec![
            Tool::new("web_search", "Search the web for information")
                .with_required_parameter("query", "The search query")
                .with_parameter("num_results", "Number of results"),
            Tool::new("get_time", "Get the current date and time"),
        ];
        assert_eq!(
            format_tools_for_prompt(&tools),
            "Tool: web_search\nDescription: Search the web for information\nParameters: query (required), num_results\n\n\
             Tool: get_time\nDescription: Get the current date and time\nParameters: \n"
        );
    }

    #[test]
    fn thinking_prompt_carries_input_and_tools() {
        let messages = thinking_messages("what's 2+2?", &[Tool::new("calculator", "Math")]);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[1].content.starts_with("User input: what's 2+2?"));
        assert!(messages[1].content.contains("Tool: calculator"));
    }
}
