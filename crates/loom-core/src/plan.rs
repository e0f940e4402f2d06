//! The project plan produced by requirement analysis.
//!
//! A plan is an opaque JSON object whose shape varies by project. Only the
//! presence of the `frontend` and `backend` top-level keys is load-bearing:
//! it decides which fixed file sets materialization produces. Everything else
//! is stored and returned verbatim.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::CoreError;

pub const FRONTEND_SECTION: &str = "frontend";
pub const BACKEND_SECTION: &str = "backend";

/// Files produced when the plan declares a `frontend` section.
pub const FRONTEND_FILES: &[&str] = &[
    "frontend/src/pages/index.tsx",
    "frontend/src/components/Layout.tsx",
    "frontend/src/utils/api.ts",
    "frontend/src/styles/globals.css",
];

/// Files produced when the plan declares a `backend` section.
pub const BACKEND_FILES: &[&str] = &[
    "backend/main.py",
    "backend/models/database.py",
    "backend/services/auth.py",
    "backend/utils/helpers.py",
];

/// Structured project plan (architecture, stack, files, modules, API, data model).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Plan(Map<String, Value>);

impl Plan {
    /// Parse a completion body as a plan. The body must be a JSON object.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the text is not JSON or is JSON of
    /// another shape (array, string, number).
    pub fn parse(text: &str) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_str(text.trim())
            .map_err(|e| CoreError::Validation(format!("plan is not valid JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Wrap an already-decoded JSON value.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `value` is not an object.
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(CoreError::Validation(format!(
                "plan must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    #[must_use]
    pub fn has_section(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Paths materialization must produce, frontend set first.
    #[must_use]
    pub fn file_paths(&self) -> Vec<&'static str> {
        let mut paths = Vec::new();
        if self.has_section(FRONTEND_SECTION) {
            paths.extend_from_slice(FRONTEND_FILES);
        }
        if self.has_section(BACKEND_SECTION) {
            paths.extend_from_slice(BACKEND_FILES);
        }
        paths
    }

    /// Pretty-printed JSON, used as context in generation prompts.
    #[must_use]
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| "{}".to_string())
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_object_plan() {
        let plan = Plan::parse(r#"{"frontend": {"framework": "next"}, "backend": {}}"#).unwrap();
        assert!(plan.has_section("frontend"));
        assert!(plan.has_section("backend"));
        assert!(!plan.has_section("database"));
    }

    #[test]
    fn parse_rejects_non_json() {
        let err = Plan::parse("Sure! Here is your plan:").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn parse_rejects_non_object() {
        assert!(Plan::parse("[1, 2, 3]").is_err());
        assert!(Plan::parse("\"frontend\"").is_err());
    }

    #[test]
    fn file_paths_full_stack() {
        let plan = Plan::parse(r#"{"frontend": {}, "backend": {}}"#).unwrap();
        let paths = plan.file_paths();
        assert_eq!(paths.len(), 8);
        assert_eq!(&paths[..4], FRONTEND_FILES);
        assert_eq!(&paths[4..], BACKEND_FILES);
    }

    #[test]
    fn file_paths_backend_only() {
        let plan = Plan::parse(r#"{"backend": {"language": "python"}}"#).unwrap();
        assert_eq!(plan.file_paths(), BACKEND_FILES.to_vec());
    }

    #[test]
    fn other_sections_contribute_nothing() {
        let plan = Plan::parse(r#"{"architecture": "monolith", "database": {}}"#).unwrap();
        assert!(plan.file_paths().is_empty());
    }

    #[test]
    fn plan_passes_through_verbatim() {
        let raw = serde_json::json!({
            "architecture": "client-server",
            "stack": ["react", "fastapi"],
            "frontend": {"pages": ["index"]}
        });
        let plan = Plan::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&plan).unwrap(), raw);
    }
}
