use async_trait::async_trait;
use chrono::Utc;
use colloquy_core::{Parameters, Tool};
use serde_json::{json, Value};

use super::string_param;
use crate::error::Result;
use crate::tool::ToolHandler;

pub fn weather_tool() -> Tool {
    Tool::new(
        "get_weather",
        "Get current weather information for a location",
    )
    .with_required_parameter(
        "location",
        "The city and state or country (e.g., 'New York, NY' or 'London, UK')",
    )
}

/// Canned weather report; no network access.
pub struct WeatherTool;

#[async_trait]
impl ToolHandler for WeatherTool {
    fn descriptor(&self) -> Tool {
        weather_tool()
    }

    async fn call(&self, input: &Parameters) -> Result<Value> {
        let location = string_param(input, "location", "get_weather")?;
        Ok(json!({
            "location": location,
            "temperature": 72,
            "condition": "Partly Cloudy",
            "humidity": 45,
            "wind_speed": 8,
            "timestamp": Utc::now().to_rfc3339(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::parameters_from;

    #[tokio::test]
    async fn reports_for_location() {
        let report = WeatherTool
            .call(&parameters_from(json!({"location": "Paris"})))
            .await
            .unwrap();
        assert_eq!(report["location"], "Paris");
        assert_eq!(report["temperature"], 72);
        assert_eq!(report["condition"], "Partly Cloudy");
        assert!(report["timestamp"].is_string());
    }
}
