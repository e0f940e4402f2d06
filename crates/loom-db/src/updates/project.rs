//! Project update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
}

impl ProjectUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.description.is_none() && self.project_type.is_none()
    }
}

#[derive(Default)]
pub struct ProjectUpdateBuilder(ProjectUpdate);

impl ProjectUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ProjectUpdate::default())
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.0.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn project_type(mut self, project_type: impl Into<String>) -> Self {
        self.0.project_type = Some(project_type.into());
        self
    }

    #[must_use]
    pub fn build(self) -> ProjectUpdate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_only_changed_fields() {
        let update = ProjectUpdateBuilder::new().project_type("cli").build();
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"project_type": "cli"}));
        assert!(!update.is_empty());
        assert!(ProjectUpdate::default().is_empty());
    }
}
