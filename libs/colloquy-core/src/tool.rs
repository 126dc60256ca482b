use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::Parameters;

/// One named argument a tool accepts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    pub description: String,
}

/// Static description of a capability the agent may use.
///
/// A descriptor carries no implementation. Parameters keep the order they were
/// declared in, and every required name is one of the declared parameters.
/// Deserialized descriptors are checked for the same rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ToolRecord")]
pub struct Tool {
    pub name: String,
    pub description: String,
    parameters: Vec<ToolParameter>,
    required_parameters: Vec<String>,
}

#[derive(Deserialize)]
struct ToolRecord {
    name: String,
    description: String,
    #[serde(default)]
    parameters: Vec<ToolParameter>,
    #[serde(default)]
    required_parameters: Vec<String>,
}

impl TryFrom<ToolRecord> for Tool {
    type Error = CoreError;

    fn try_from(record: ToolRecord) -> Result<Self> {
        if let Some(ghost) = record
            .required_parameters
            .iter()
            .find(|name| !record.parameters.iter().any(|p| &p.name == *name))
        {
            return Err(CoreError::UndeclaredParameter {
                tool: record.name,
                parameter: ghost.clone(),
            });
        }
        Ok(Self {
            name: record.name,
            description: record.description,
            parameters: record.parameters,
            required_parameters: record.required_parameters,
        })
    }
}

impl Tool {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
            required_parameters: Vec::new(),
        }
    }

    /// Declares an optional parameter. Redeclaring a name replaces its description.
    pub fn with_parameter(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        let name = name.into();
        let description = description.into();
        match self.parameters.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.description = description,
            None => self.parameters.push(ToolParameter { name, description }),
        }
        self
    }

    pub fn with_required_parameter(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let mut tool = self.with_parameter(name.clone(), description);
        if !tool.required_parameters.contains(&name) {
            tool.required_parameters.push(name);
        }
        tool
    }

    pub fn parameters(&self) -> &[ToolParameter] {
        &self.parameters
    }

    pub fn required_parameters(&self) -> &[String] {
        &self.required_parameters
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required_parameters.iter().any(|r| r == name)
    }

    /// True when every required parameter name is a key of `params`.
    pub fn validate_parameters(&self, params: &Parameters) -> bool {
        self.required_parameters
            .iter()
            .all(|name| params.contains_key(name))
    }

    pub fn missing_parameters<'a>(&'a self, params: &Parameters) -> Vec<&'a str> {
        self.required_parameters
            .iter()
            .filter(|name| !params.contains_key(name.as_str()))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn weather() -> Tool {
        Tool::new("get_weather", "Get current weather information for a location")
            .with_required_parameter("location", "The city and state or country")
    }

    fn params(value: serde_json::Value) -> Parameters {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn validates_required_parameters() {
        let tool = weather();
        assert!(tool.validate_parameters(&params(json!({"location": "Paris"}))));
        assert!(!tool.validate_parameters(&params(json!({}))));
        assert_eq!(tool.missing_parameters(&params(json!({}))), vec!["location"]);
    }

    #[test]
    fn tool_without_requirements_accepts_anything() {
        let tool = Tool::new("get_time", "Get the current date and time")
            .with_parameter("timezone", "Optional timezone");
        assert!(tool.validate_parameters(&Parameters::new()));
        assert!(!tool.is_required("timezone"));
    }

    #[test]
    fn keeps_declaration_order() {
        let tool = Tool::new("web_search", "Search the web")
            .with_required_parameter("query", "The search query")
            .with_parameter("num_results", "Number of results");
        let names: Vec<&str> = tool.parameters().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["query", "num_results"]);
        assert_eq!(tool.required_parameters(), ["query".to_string()]);
    }

    #[test]
    fn deserializing_rejects_undeclared_requirements() {
        let err = serde_json::from_value::<Tool>(json!({
            "name": "broken",
            "description": "Requires a parameter it never declares",
            "parameters": [],
            "required_parameters": ["ghost"],
        }))
        .unwrap_err();
        assert!(err.to_string().contains("undeclared parameter `ghost`"));

        let value = serde_json::to_value(weather()).unwrap();
        assert_eq!(serde_json::from_value::<Tool>(value).unwrap(), weather());
    }
}
