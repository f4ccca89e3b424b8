use super::resource::{HubView, ResourceMetadata};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyStatusName {
    InViolation,
    InViolationOverridden,
    NotInViolation,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentVersionStatusCount {
    pub name: PolicyStatusName,
    pub value: u64,
}

/// BOM-wide policy status of a project version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionBomPolicyStatusView {
    #[serde(default)]
    pub overall_status: Option<PolicyStatusName>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub component_version_status_counts: Vec<ComponentVersionStatusCount>,
    #[serde(rename = "_meta", default)]
    pub meta: ResourceMetadata,
}

impl HubView for VersionBomPolicyStatusView {
    fn meta(&self) -> &ResourceMetadata {
        &self.meta
    }
}

impl VersionBomPolicyStatusView {
    pub fn count_of(&self, name: PolicyStatusName) -> Option<&ComponentVersionStatusCount> {
        self.component_version_status_counts
            .iter()
            .find(|count| count.name == name)
    }
}

/// Human-readable summary of a version's policy status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyStatusDescription {
    pub in_violation: u64,
    pub in_violation_overridden: u64,
    pub not_in_violation: u64,
    pub message: String,
}

impl PolicyStatusDescription {
    pub fn new(status: &VersionBomPolicyStatusView) -> Self {
        let value = |name| status.count_of(name).map(|count| count.value).unwrap_or(0);
        let in_violation = value(PolicyStatusName::InViolation);
        let in_violation_overridden = value(PolicyStatusName::InViolationOverridden);
        let not_in_violation = value(PolicyStatusName::NotInViolation);

        let message = if status.component_version_status_counts.is_empty() {
            "The Hub found no components.".to_string()
        } else {
            format!(
                "The Hub found: {} components in violation, {} components in violation, but overridden, and {} components not in violation.",
                in_violation, in_violation_overridden, not_in_violation
            )
        };

        Self {
            in_violation,
            in_violation_overridden,
            not_in_violation,
            message,
        }
    }
}
