use super::component::{ComponentVersionView, PolicyRuleView, VulnerabilitySourceQualifiedId};
use super::notification::NotificationKind;
use super::project::FullProjectVersionView;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Kind-specific part of a content item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ContentPayload {
    #[serde(rename_all = "camelCase")]
    PolicyViolation {
        component_url: Option<String>,
        policy_rules: Vec<PolicyRuleView>,
    },
    #[serde(rename_all = "camelCase")]
    PolicyViolationCleared {
        component_url: Option<String>,
        policy_rules: Vec<PolicyRuleView>,
    },
    #[serde(rename_all = "camelCase")]
    PolicyOverride {
        component_url: Option<String>,
        policy_rules: Vec<PolicyRuleView>,
        first_name: Option<String>,
        last_name: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Vulnerability {
        added: Vec<VulnerabilitySourceQualifiedId>,
        updated: Vec<VulnerabilitySourceQualifiedId>,
        deleted: Vec<VulnerabilitySourceQualifiedId>,
    },
}

impl ContentPayload {
    pub fn kind(&self) -> NotificationKind {
        match self {
            ContentPayload::PolicyViolation { .. } => NotificationKind::PolicyViolation,
            ContentPayload::PolicyViolationCleared { .. } => {
                NotificationKind::PolicyViolationCleared
            }
            ContentPayload::PolicyOverride { .. } => NotificationKind::PolicyOverride,
            ContentPayload::Vulnerability { .. } => NotificationKind::Vulnerability,
        }
    }

    /// Rules behind a policy item; empty for vulnerability items
    pub fn policy_rules(&self) -> &[PolicyRuleView] {
        match self {
            ContentPayload::PolicyViolation { policy_rules, .. }
            | ContentPayload::PolicyViolationCleared { policy_rules, .. }
            | ContentPayload::PolicyOverride { policy_rules, .. } => policy_rules,
            ContentPayload::Vulnerability { .. } => &[],
        }
    }
}

/// A normalized event about one component version in one project version.
///
/// Identity is `(created_at, component_version_url, project_version)`: two
/// items built from the same notification twice compare equal, whatever their
/// payload. Ordering is by creation time, then by
/// `projectName:versionName:componentVersionUrl`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationContentItem {
    pub created_at: DateTime<Utc>,
    pub project_version: FullProjectVersionView,
    pub component_name: Option<String>,
    pub component_version: Option<ComponentVersionView>,
    pub component_version_url: Option<String>,
    #[serde(flatten)]
    pub payload: ContentPayload,
}

impl NotificationContentItem {
    pub fn kind(&self) -> NotificationKind {
        self.payload.kind()
    }

    /// Secondary sort key; absent parts are skipped rather than left empty
    pub fn tie_key(&self) -> String {
        [
            Some(self.project_version.project_name.as_str()),
            Some(self.project_version.project_version_name.as_str()),
            self.component_version_url.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(":")
    }
}

impl PartialEq for NotificationContentItem {
    fn eq(&self, other: &Self) -> bool {
        self.created_at == other.created_at
            && self.component_version_url == other.component_version_url
            && self.project_version == other.project_version
    }
}

impl Eq for NotificationContentItem {}

impl Hash for NotificationContentItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.created_at.hash(state);
        self.component_version_url.hash(state);
        self.project_version.hash(state);
    }
}

impl Ord for NotificationContentItem {
    fn cmp(&self, other: &Self) -> Ordering {
        self.created_at
            .cmp(&other.created_at)
            .then_with(|| self.tie_key().cmp(&other.tie_key()))
            // Keeps the order total over the fields equality looks at
            .then_with(|| self.component_version_url.cmp(&other.component_version_url))
            .then_with(|| self.project_version.cmp(&other.project_version))
    }
}

impl PartialOrd for NotificationContentItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
