//! Full turns through `ConversationalAgent` with a scripted model.

use std::io::Write;

use colloquy::{
    build_model, default_toolkit, parameters_from, ActionType, AppConfig, ColloquyError,
    ConversationalAgent, Role, StubModel,
};
use serde_json::json;
use tempfile::NamedTempFile;

#[tokio::test]
async fn two_turns_grow_every_log() {
    let model = StubModel::new(vec![
        "Greeting, answer briefly.".into(),
        "Hi there".into(),
        "Use the calculator.".into(),
        "It is 4.".into(),
    ]);
    let mut agent = ConversationalAgent::new(model.clone(), "Helper", "Helps", "You are helpful")
        .unwrap()
        .with_tools(default_toolkit().unwrap())
        .unwrap();

    assert_eq!(agent.process_user_input("Hello").await.unwrap(), "Hi there");
    assert_eq!(agent.process_user_input("2 + 2?").await.unwrap(), "It is 4.");

    let summary = agent.summary();
    assert_eq!(summary.messages, 5);
    assert_eq!(summary.thoughts, 2);
    assert_eq!(summary.actions, 2);
    assert_eq!(summary.tools, 4);
    assert_eq!(summary.latest_thought.as_deref(), Some("Use the calculator."));

    let roles: Vec<Role> = agent.state().messages().iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![Role::System, Role::User, Role::Assistant, Role::User, Role::Assistant]
    );

    // The turn advertises tools but never runs one on its own.
    assert!(agent
        .state()
        .actions()
        .iter()
        .all(|a| a.action_type == ActionType::Response));
    assert_eq!(model.requests().len(), 4);
}

#[tokio::test]
async fn explicit_tool_use_is_logged_between_turns() {
    let model = StubModel::new(vec!["think".into(), "The weather is fine.".into()]);
    let mut agent = ConversationalAgent::new(model, "Helper", "Helps", "You are helpful")
        .unwrap()
        .with_tools(default_toolkit().unwrap())
        .unwrap();

    let report = agent
        .invoke_tool("get_weather", parameters_from(json!({"location": "London, UK"})))
        .await
        .unwrap();
    assert_eq!(report["location"], "London, UK");

    let failed = agent
        .invoke_tool("calculator", parameters_from(json!({"expression": "1 / 0"})))
        .await
        .unwrap();
    assert_eq!(failed["error"], "division by zero");

    agent.process_user_input("How's the weather?").await.unwrap();

    let kinds: Vec<ActionType> = agent.state().actions().iter().map(|a| a.action_type).collect();
    assert_eq!(
        kinds,
        vec![ActionType::ToolUse, ActionType::ToolUse, ActionType::Response]
    );
}

#[tokio::test]
async fn stub_provider_from_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[agent]\nname='Offline'\nsystem_prompt='Be brief.'\n[model]\nprovider='stub'"
    )
    .unwrap();

    let config = AppConfig::from_file(file.path()).unwrap();
    assert!(!config.model.needs_api_key());

    let model = build_model(&config.model).unwrap();
    let mut agent = ConversationalAgent::new(
        model,
        config.agent.name.clone(),
        config.agent.description.clone(),
        config.agent.system_prompt.clone(),
    )
    .unwrap();

    let reply = agent.process_user_input("ping").await.unwrap();
    assert!(reply.starts_with("(echo) "));
    assert_eq!(agent.state().system_prompt(), "Be brief.");
    assert_eq!(agent.state().name(), "Offline");
}

#[tokio::test]
async fn blank_system_prompt_is_refused() {
    let result = ConversationalAgent::new(StubModel::echo(), "A", "B", "  ");
    assert!(matches!(result, Err(ColloquyError::State(_))));
}
