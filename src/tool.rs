use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use colloquy_core::{Parameters, Tool};
use serde_json::Value;

use crate::error::{ColloquyError, Result};

/// Executable side of a tool. The descriptor it returns is what the agent
/// advertises; `call` only runs once the required parameters are present.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    fn descriptor(&self) -> Tool;

    async fn call(&self, input: &Parameters) -> Result<Value>;
}

/// Maps tool names to their handlers, in registration order.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    order: Vec<String>,
    tools: HashMap<String, (Tool, Arc<dyn ToolHandler>)>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: ToolHandler + 'static>(&mut self, handler: T) -> Result<()> {
        let descriptor = handler.descriptor();
        if self.tools.contains_key(&descriptor.name) {
            return Err(colloquy_core::CoreError::DuplicateTool(descriptor.name).into());
        }
        self.order.push(descriptor.name.clone());
        self.tools
            .insert(descriptor.name.clone(), (descriptor, Arc::new(handler)));
        Ok(())
    }

    pub fn names(&self) -> Vec<String> {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn descriptor(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name).map(|(descriptor, _)| descriptor)
    }

    pub fn descriptors(&self) -> Vec<Tool> {
        self.order
            .iter()
            .filter_map(|name| self.descriptor(name).cloned())
            .collect()
    }

    pub async fn call(&self, name: &str, input: &Parameters) -> Result<Value> {
        let (descriptor, handler) = self
            .tools
            .get(name)
            .ok_or_else(|| ColloquyError::ToolNotFound(name.to_string()))?;

        let missing = descriptor.missing_parameters(input);
        if !missing.is_empty() {
            return Err(ColloquyError::InvalidToolInput {
                name: name.to_string(),
                missing: missing.into_iter().map(String::from).collect(),
            });
        }

        handler.call(input).await
    }
}

/// Converts a JSON value into a parameter map; anything but an object is empty.
pub fn parameters_from(value: Value) -> Parameters {
    match value {
        Value::Object(map) => map,
        _ => Parameters::new(),
    }
}

/// Parses user-supplied JSON text. Only an object is accepted.
pub fn parse_parameters(raw: &str) -> Result<Parameters> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ColloquyError::InvalidParameters(format!(
            "got `{other}`"
        ))),
        Err(err) => Err(ColloquyError::InvalidParameters(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Echo(&'static str);

    #[async_trait]
    impl ToolHandler for Echo {
        fn descriptor(&self) -> Tool {
            Tool::new(self.0, "Echoes the `text` field back")
                .with_required_parameter("text", "Text to echo")
        }

        async fn call(&self, input: &Parameters) -> Result<Value> {
            Ok(Value::Object(input.clone()))
        }
    }

    #[tokio::test]
    async fn keeps_registration_order() {
        let mut registry = ToolRegistry::new();
        registry.register(Echo("second")).unwrap();
        registry.register(Echo("a_first")).unwrap();

        assert_eq!(registry.names(), vec!["second", "a_first"]);
        let names: Vec<String> = registry.descriptors().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["second", "a_first"]);
    }

    #[tokio::test]
    async fn rejects_duplicates() {
        let mut registry = ToolRegistry::new();
        registry.register(Echo("echo")).unwrap();
        assert!(registry.register(Echo("echo")).is_err());
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn validates_before_calling() {
        let mut registry = ToolRegistry::new();
        registry.register(Echo("echo")).unwrap();

        let err = registry.call("echo", &Parameters::new()).await.unwrap_err();
        assert!(matches!(err, ColloquyError::InvalidToolInput { ref missing, .. } if missing == &["text"]));

        let output = registry
            .call("echo", &parameters_from(json!({"text": "ping"})))
            .await
            .unwrap();
        assert_eq!(output["text"], "ping");

        assert!(matches!(
            registry.call("missing", &Parameters::new()).await,
            Err(ColloquyError::ToolNotFound(_))
        ));
    }

    #[test]
    fn parses_only_json_objects() {
        let params = parse_parameters(r#"{"expression": "1 + 1"}"#).unwrap();
        assert_eq!(params["expression"], "1 + 1");

        for raw in ["[1, 2]", "42", "\"text\"", "{not json"] {
            assert!(matches!(
                parse_parameters(raw),
                Err(ColloquyError::InvalidParameters(_))
            ));
        }
        assert_eq!(
            parse_parameters("[1,2]").unwrap_err().to_string(),
            "parameters must be a JSON object: got `[1,2]`"
        );
    }
}
