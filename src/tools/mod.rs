//! Mock tools the harness ships with.
//!
//! - Weather: canned conditions for a location
//! - Search: fabricated result listings
//! - Calculator: restricted arithmetic evaluation
//! - Time: current date and time
//!
//! Each tool exposes a descriptor factory (what the agent advertises) and a
//! handler (what the registry dispatches to).

pub mod calculator;
pub mod expression;
pub mod search;
pub mod time;
pub mod weather;

use colloquy_core::Parameters;
use serde_json::Value;

pub use calculator::{calculator_tool, CalculatorTool};
pub use search::{search_tool, SearchResult, SearchTool};
pub use time::{time_tool, TimeTool};
pub use weather::{weather_tool, WeatherTool};

use crate::error::{ColloquyError, Result};
use crate::tool::ToolRegistry;

/// Registry with the weather, search, calculator and time tools, in that order.
pub fn default_toolkit() -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(WeatherTool)?;
    registry.register(SearchTool)?;
    registry.register(CalculatorTool)?;
    registry.register(TimeTool)?;
    Ok(registry)
}

pub(crate) fn string_param(input: &Parameters, field: &str, tool_name: &str) -> Result<String> {
    match input.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Null) | None => Err(ColloquyError::InvalidToolInput {
            name: tool_name.to_string(),
            missing: vec![field.to_string()],
        }),
        Some(other) => Ok(other.to_string()),
    }
}
