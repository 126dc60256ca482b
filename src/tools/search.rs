use async_trait::async_trait;
use colloquy_core::{Parameters, Tool};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::string_param;
use crate::error::Result;
use crate::tool::ToolHandler;

const DEFAULT_RESULTS: usize = 5;
const MAX_RESULTS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

pub fn search_tool() -> Tool {
    Tool::new("web_search", "Search the web for information")
        .with_required_parameter("query", "The search query")
        .with_parameter("num_results", "Number of results to return (default: 5)")
}

/// Fabricated search results; no network access.
pub struct SearchTool;

#[async_trait]
impl ToolHandler for SearchTool {
    fn descriptor(&self) -> Tool {
        search_tool()
    }

    async fn call(&self, input: &Parameters) -> Result<Value> {
        let query = string_param(input, "query", "web_search")?;
        let requested = input
            .get("num_results")
            .and_then(|v| {
                v.as_i64()
                    .or_else(|| v.as_str().and_then(|s| s.trim().parse::<i64>().ok()))
            })
            .map(|n| n.max(0) as usize)
            .unwrap_or(DEFAULT_RESULTS);
        Ok(json!({ "query": query, "results": mock_results(&query, requested) }))
    }
}

pub fn mock_results(query: &str, requested: usize) -> Vec<SearchResult> {
    (1..=requested.min(MAX_RESULTS))
        .map(|i| SearchResult {
            title: format!("Result {i} for '{query}'"),
            url: format!("https://example.com/result{i}"),
            snippet: format!("This is a snippet of information related to {query}..."),
        })
        .collect()
}
