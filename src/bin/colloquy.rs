//! colloquy - interactive conversational agent
//!
//! Reads user input line by line, runs a think-then-answer turn for each one
//! and keeps the whole exchange in the agent's interaction log.

use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colloquy::telemetry::init_tracing;
use colloquy::{
    build_model, default_toolkit, parse_parameters, AppConfig, ConversationalAgent, LanguageModel,
};
use tokio::io::{self, AsyncBufReadExt, BufReader};

const EXIT_WORDS: [&str; 3] = ["exit", "quit", "bye"];

/// Chat with a tool-aware assistant that records its thoughts and actions
#[derive(Parser, Debug)]
#[command(name = "colloquy", author, version, about)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "COLLOQUY_CONFIG")]
    config: Option<PathBuf>,

    /// Model provider (`openai` or `stub`)
    #[arg(long)]
    provider: Option<String>,

    /// Model name passed to the provider
    #[arg(long)]
    model: Option<String>,

    /// Log filter, e.g. `info` or `colloquy=debug`
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_env_or_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => AppConfig::from_env(),
    };
    if let Some(provider) = cli.provider {
        config.model.provider = provider.to_ascii_lowercase();
    }
    if let Some(model) = cli.model {
        config.model.model = model;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_tracing(&config.logging)?;

    if config.model.needs_api_key() {
        if let Err(err) = config.model.require_api_key() {
            tracing::error!("{err}");
            return Err(err.into());
        }
    }

    let model = build_model(&config.model)?;
    let mut agent = ConversationalAgent::new(
        model,
        config.agent.name.clone(),
        config.agent.description.clone(),
        config.agent.system_prompt.clone(),
    )?
    .with_tools(default_toolkit()?)?
    .with_default_importance(config.agent.default_importance)?;

    agent.add_memory(
        "Python is a high-level, interpreted programming language known for its readability and versatility.",
        "agent_knowledge_base",
        7,
    )?;
    agent.add_memory(
        "The user seems to prefer concise, direct answers.",
        "user_preference_analysis",
        6,
    )?;

    print_banner(&agent);
    run_repl(&mut agent).await
}

fn print_banner(agent: &ConversationalAgent<dyn LanguageModel>) {
    let state = agent.state();
    let tool_names: Vec<&str> = state
        .available_tools()
        .iter()
        .map(|tool| tool.name.as_str())
        .collect();
    println!("🤖 {} initialized!", state.name());
    println!("Description: {}", state.description());
    println!("Available tools: {}", tool_names.join(", "));
    println!("Type 'exit' to quit, '/tool <name> <json>' to run a tool, '/remember <fact>' to add a memory, '/dump' for the log.");
    println!("{}", "-".repeat(50));
}

async fn run_repl(agent: &mut ConversationalAgent<dyn LanguageModel>) -> Result<()> {
    let mut lines = BufReader::new(io::stdin()).lines();

    loop {
        print!("You: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if EXIT_WORDS.contains(&input.to_lowercase().as_str()) {
            println!("🤖 Goodbye!");
            break;
        }

        if input == "/dump" {
            println!("{}", agent.transcript_json()?);
            continue;
        }

        if let Some(rest) = input.strip_prefix("/tool ") {
            run_tool_command(agent, rest).await;
            continue;
        }

        if let Some(fact) = input.strip_prefix("/remember ") {
            match agent.remember(fact.trim(), "user") {
                Ok(memory) => println!("🧠 remembered (importance {})", memory.importance()),
                Err(err) => println!("⚠️  {err}"),
            }
            continue;
        }

        match agent.process_user_input(input).await {
            Ok(response) => println!("\n🤖: {response}\n"),
            Err(err) => {
                tracing::error!(error = %err, "turn failed");
                println!("\n⚠️  {err}\n");
            }
        }

        if input.eq_ignore_ascii_case("debug") {
            print_debug(agent);
        }
    }

    Ok(())
}

async fn run_tool_command(agent: &mut ConversationalAgent<dyn LanguageModel>, rest: &str) {
    let (name, raw_params) = match rest.trim().split_once(char::is_whitespace) {
        Some((name, params)) => (name, params.trim()),
        None => (rest.trim(), "{}"),
    };
    let params = match parse_parameters(raw_params) {
        Ok(params) => params,
        Err(err) => {
            println!("⚠️  {err}");
            return;
        }
    };
    match agent.invoke_tool(name, params).await {
        Ok(output) => println!("🔧 {name}: {output}"),
        Err(err) => println!("⚠️  {err}"),
    }
}

fn print_debug(agent: &ConversationalAgent<dyn LanguageModel>) {
    let summary = agent.summary();
    println!("\n--- AGENT DEBUG INFO ---");
    println!("Messages: {}", summary.messages);
    println!("Thoughts: {}", summary.thoughts);
    println!(
        "Latest thought: {}",
        summary.latest_thought.as_deref().unwrap_or("None")
    );
    println!("Actions: {}", summary.actions);
    println!("Memories: {}", summary.memories);
    println!("--- END DEBUG INFO ---\n");
}
