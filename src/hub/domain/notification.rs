use super::component::VulnerabilitySourceQualifiedId;
use super::resource::{HubView, ResourceMetadata};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A notification as listed by the hub, before its content is interpreted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNotification {
    #[serde(rename = "type")]
    pub type_tag: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub content: serde_json::Value,
    #[serde(rename = "_meta", default)]
    pub meta: ResourceMetadata,
}

impl RawNotification {
    /// One-line description used in error messages
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{} notification created at {}",
            self.type_tag,
            self.created_at.to_rfc3339()
        );
        if let Some(href) = &self.meta.href {
            summary.push_str(&format!(" ({})", href));
        }
        summary
    }

    #[cfg(test)]
    pub(crate) fn for_tests(type_tag: &str) -> Self {
        Self {
            type_tag: type_tag.to_string(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            content_type: None,
            content: serde_json::Value::Null,
            meta: ResourceMetadata::default(),
        }
    }
}

impl HubView for RawNotification {
    fn meta(&self) -> &ResourceMetadata {
        &self.meta
    }
}

/// Notification kinds that produce content items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NotificationKind {
    PolicyViolation,
    PolicyViolationCleared,
    PolicyOverride,
    Vulnerability,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 4] = [
        Self::PolicyViolation,
        Self::PolicyViolationCleared,
        Self::PolicyOverride,
        Self::Vulnerability,
    ];

    /// The `type` value the hub uses for this kind
    pub fn type_tag(self) -> &'static str {
        match self {
            Self::PolicyViolation => "RULE_VIOLATION",
            Self::PolicyViolationCleared => "RULE_VIOLATION_CLEARED",
            Self::PolicyOverride => "POLICY_OVERRIDE",
            Self::Vulnerability => "VULNERABILITY",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_tag())
    }
}

/// Content of a rule violation or a cleared rule violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyViolationContent {
    pub project_name: String,
    #[serde(default)]
    pub project_version_name: Option<String>,
    pub project_version_link: String,
    #[serde(default)]
    pub component_version_statuses: Vec<ComponentVersionStatus>,
}

/// One affected component version inside a policy notification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentVersionStatus {
    #[serde(default)]
    pub component_name: Option<String>,
    #[serde(default)]
    pub component_link: Option<String>,
    #[serde(default)]
    pub component_version_link: Option<String>,
    #[serde(default)]
    pub bom_component_version_policy_status_link: Option<String>,
    /// Policy rule URLs embedded in the notification
    #[serde(default)]
    pub policies: Vec<String>,
    #[serde(default)]
    pub component_issue_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyOverrideContent {
    pub project_name: String,
    #[serde(default)]
    pub project_version_name: Option<String>,
    pub project_version_link: String,
    #[serde(default)]
    pub component_name: Option<String>,
    #[serde(default)]
    pub component_version_name: Option<String>,
    #[serde(default)]
    pub component_link: Option<String>,
    #[serde(default)]
    pub component_version_link: Option<String>,
    #[serde(default)]
    pub bom_component_version_policy_status_link: Option<String>,
    #[serde(default)]
    pub policies: Vec<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl PolicyOverrideContent {
    /// The overridden component as a single policy entry
    pub fn as_component_status(&self) -> ComponentVersionStatus {
        ComponentVersionStatus {
            component_name: self.component_name.clone(),
            component_link: self.component_link.clone(),
            component_version_link: self.component_version_link.clone(),
            bom_component_version_policy_status_link: self
                .bom_component_version_policy_status_link
                .clone(),
            policies: self.policies.clone(),
            component_issue_link: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityContent {
    #[serde(default)]
    pub component_name: Option<String>,
    #[serde(default)]
    pub version_name: Option<String>,
    #[serde(default)]
    pub component_version_link: Option<String>,
    #[serde(default)]
    pub new_vulnerability_count: u32,
    #[serde(default)]
    pub updated_vulnerability_count: u32,
    #[serde(default)]
    pub deleted_vulnerability_count: u32,
    #[serde(default)]
    pub new_vulnerability_ids: Vec<VulnerabilitySourceQualifiedId>,
    #[serde(default)]
    pub updated_vulnerability_ids: Vec<VulnerabilitySourceQualifiedId>,
    #[serde(default)]
    pub deleted_vulnerability_ids: Vec<VulnerabilitySourceQualifiedId>,
    #[serde(default)]
    pub affected_project_versions: Vec<AffectedProjectVersion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedProjectVersion {
    pub project_name: String,
    #[serde(default)]
    pub project_version_name: Option<String>,
    pub project_version_link: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NotificationContent {
    PolicyViolation(PolicyViolationContent),
    PolicyViolationCleared(PolicyViolationContent),
    PolicyOverride(PolicyOverrideContent),
    Vulnerability(VulnerabilityContent),
    /// A type the crate does not interpret; yields no content items
    Untyped,
}

/// A classified notification: the raw envelope plus its typed content
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub raw: RawNotification,
    pub content: NotificationContent,
}

impl Notification {
    pub fn kind(&self) -> Option<NotificationKind> {
        match self.content {
            NotificationContent::PolicyViolation(_) => Some(NotificationKind::PolicyViolation),
            NotificationContent::PolicyViolationCleared(_) => {
                Some(NotificationKind::PolicyViolationCleared)
            }
            NotificationContent::PolicyOverride(_) => Some(NotificationKind::PolicyOverride),
            NotificationContent::Vulnerability(_) => Some(NotificationKind::Vulnerability),
            NotificationContent::Untyped => None,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.raw.created_at
    }
}
