use async_trait::async_trait;
use chrono::{DateTime, Utc};
use colloquy_core::{Parameters, Tool};
use serde_json::{json, Value};

use crate::error::Result;
use crate::tool::ToolHandler;

pub fn time_tool() -> Tool {
    Tool::new("get_time", "Get the current date and time")
        .with_parameter("timezone", "Optional timezone (default: UTC)")
}

/// Reports the current UTC time. The timezone is echoed back as a label only.
pub struct TimeTool;

#[async_trait]
impl ToolHandler for TimeTool {
    fn descriptor(&self) -> Tool {
        time_tool()
    }

    async fn call(&self, input: &Parameters) -> Result<Value> {
        let timezone = input.get("timezone").and_then(Value::as_str);
        Ok(time_report(Utc::now(), timezone))
    }
}

pub fn time_report(now: DateTime<Utc>, timezone: Option<&str>) -> Value {
    json!({
        "datetime": now.to_rfc3339(),
        "date": now.format("%Y-%m-%d").to_string(),
        "time": now.format("%H:%M:%S").to_string(),
        "timezone": timezone.filter(|tz| !tz.trim().is_empty()).unwrap_or("UTC"),
    })
}
