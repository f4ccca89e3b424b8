use super::project::ComplexLicenseView;
use super::resource::{HubView, ResourceMetadata};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentVersionView {
    #[serde(default)]
    pub version_name: Option<String>,
    #[serde(default)]
    pub released_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub license: Option<ComplexLicenseView>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(rename = "_meta", default)]
    pub meta: ResourceMetadata,
}

impl HubView for ComponentVersionView {
    fn meta(&self) -> &ResourceMetadata {
        &self.meta
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRuleView {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub overridable: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(rename = "_meta", default)]
    pub meta: ResourceMetadata,
}

impl HubView for PolicyRuleView {
    fn meta(&self) -> &ResourceMetadata {
        &self.meta
    }
}

/// Policy status of one BOM component; its `policy-rule` links name the
/// rules currently in play for that component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomComponentPolicyStatusView {
    #[serde(default)]
    pub approval_status: Option<String>,
    #[serde(rename = "_meta", default)]
    pub meta: ResourceMetadata,
}

impl HubView for BomComponentPolicyStatusView {
    fn meta(&self) -> &ResourceMetadata {
        &self.meta
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilitySourceQualifiedId {
    pub source: String,
    pub vulnerability_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_rule_deserializes() {
        let json = r#"{
            "name": "No GPL",
            "description": "Blocks GPL licensed components",
            "enabled": true,
            "overridable": true,
            "createdBy": "sysadmin",
            "_meta": {"href": "https://hub/api/policy-rules/00000000-0000-0000-0000-000000000001"}
        }"#;
        let rule: PolicyRuleView = serde_json::from_str(json).unwrap();
        assert_eq!(rule.name, "No GPL");
        assert_eq!(rule.enabled, Some(true));
        assert_eq!(rule.created_by.as_deref(), Some("sysadmin"));
        assert!(rule.href().is_ok());
    }

    #[test]
    fn test_vulnerability_id_uses_camel_case() {
        let json = r#"{"source": "NVD", "vulnerabilityId": "CVE-2024-0001"}"#;
        let id: VulnerabilitySourceQualifiedId = serde_json::from_str(json).unwrap();
        assert_eq!(id.source, "NVD");
        assert_eq!(id.vulnerability_id, "CVE-2024-0001");
    }
}
