//! Calculator tool.
//!
//! Evaluates a restricted arithmetic expression. Parse and arithmetic
//! failures come back as `{expression, error}` rather than as an `Err`, so the
//! turn keeps going and the failure can still be logged.

use async_trait::async_trait;
use colloquy_core::{Parameters, Tool};
use serde_json::{json, Value};

use super::expression::evaluate;
use super::string_param;
use crate::error::Result;
use crate::tool::ToolHandler;

pub fn calculator_tool() -> Tool {
    Tool::new("calculator", "Perform a mathematical calculation").with_required_parameter(
        "expression",
        "The mathematical expression to evaluate (e.g., '2 + 2')",
    )
}

pub struct CalculatorTool;

#[async_trait]
impl ToolHandler for CalculatorTool {
    fn descriptor(&self) -> Tool {
        calculator_tool()
    }

    async fn call(&self, input: &Parameters) -> Result<Value> {
        let expression = string_param(input, "expression", "calculator")?;
        Ok(calculate(&expression))
    }
}

pub fn calculate(expression: &str) -> Value {
    match evaluate(expression) {
        Ok(result) => json!({ "expression": expression, "result": number_value(result) }),
        Err(err) => json!({ "expression": expression, "error": err.to_string() }),
    }
}

// Whole results are reported as integers, the way `2 + 2` reads as 4.
fn number_value(value: f64) -> Value {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        json!(value as i64)
    } else {
        json!(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::parameters_from;

    #[tokio::test]
    async fn evaluates_expressions() {
        let result = CalculatorTool
            .call(&parameters_from(json!({"expression": "2 + 2"})))
            .await
            .unwrap();
        assert_eq!(result, json!({"expression": "2 + 2", "result": 4}));

        assert_eq!(calculate("7 / 2")["result"], 3.5);
        assert_eq!(calculate("(1 + 2) * 3")["result"], 9);
    }

    #[test]
    fn reports_failures_as_results() {
        let result = calculate("1 / 0");
        assert_eq!(result["expression"], "1 / 0");
        assert_eq!(result["error"], "division by zero");
        assert!(result.get("result").is_none());

        assert!(calculate("__import__('os').system('ls')")["error"].is_string());
        assert!(calculate("2 +")["error"].is_string());
    }

    #[test]
    fn overflow_comes_back_as_error() {
        let expression = format!("1{} * 10", "0".repeat(308));
        let result = calculate(&expression);
        assert_eq!(result["error"], "result is out of range");
        assert!(result.get("result").is_none());
    }

    #[test]
    fn descriptor_requires_expression() {
        let tool = calculator_tool();
        assert_eq!(tool.name, "calculator");
        assert_eq!(tool.required_parameters(), ["expression".to_string()]);
    }
}
