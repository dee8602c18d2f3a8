use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Action definition advertised to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value, // JSON Schema
}

/// Result from action execution, always returned as data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ActionResult {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            success: true,
            content: Some(content.into()),
            error: None,
            data: None,
        }
    }

    pub fn success_with_data(content: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            content: Some(content.into()),
            error: None,
            data: Some(data),
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            content: None,
            error: Some(error.into()),
            data: None,
        }
    }
}

/// Trait for implementing actions
#[async_trait]
pub trait Action: Send + Sync {
    /// Get the definition advertised for this action
    fn definition(&self) -> ActionDefinition;

    /// Execute the action with the given argument bag.
    ///
    /// Validation and capability errors may be returned either as an
    /// `ActionResult` with `success: false` or as `Err`; the registry folds
    /// `Err` into a failure result at the dispatch boundary.
    async fn execute(&self, params: Value) -> Result<ActionResult>;
}

/// Registry of all available actions.
///
/// Populated once at startup and read-only afterwards.
pub struct ActionRegistry {
    actions: HashMap<String, Arc<dyn Action>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// Register an action under its declared name
    pub fn register(&mut self, action: Arc<dyn Action>) {
        let def = action.definition();
        self.actions.insert(def.name, action);
    }

    /// Get an action by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Action>> {
        self.actions.get(name)
    }

    /// Get all action definitions
    pub fn definitions(&self) -> Vec<ActionDefinition> {
        self.actions.values().map(|a| a.definition()).collect()
    }

    /// Dispatch a named request to its action.
    ///
    /// Never propagates a fault across the boundary: an unknown name or an
    /// error escaping the action is converted into a failure result.
    pub async fn execute(&self, name: &str, params: Value) -> ActionResult {
        let Some(action) = self.actions.get(name) else {
            tracing::warn!("Dispatch of unknown action: {}", name);
            return ActionResult::error(format!("Unknown action: {}", name));
        };

        match action.execute(params).await {
            Ok(result) => {
                if let Some(err) = &result.error {
                    tracing::warn!("Action {} rejected: {}", name, err);
                }
                result
            }
            Err(e) => {
                tracing::warn!("Action {} failed: {}", name, e);
                ActionResult::error(format!("{} failed: {}", name, e))
            }
        }
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
