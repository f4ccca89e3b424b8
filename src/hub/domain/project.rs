use super::resource::{link, HubView, NamedView, ResourceMetadata};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "_meta", default)]
    pub meta: ResourceMetadata,
}

impl HubView for ProjectView {
    fn meta(&self) -> &ResourceMetadata {
        &self.meta
    }
}

impl NamedView for ProjectView {
    const KIND: &'static str = "project";

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexLicenseView {
    #[serde(default)]
    pub license_display: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectVersionView {
    pub version_name: String,
    #[serde(default)]
    pub distribution: Option<String>,
    #[serde(default)]
    pub phase: Option<String>,
    #[serde(default)]
    pub license: Option<ComplexLicenseView>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub release_comments: Option<String>,
    #[serde(default)]
    pub released_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(rename = "_meta", default)]
    pub meta: ResourceMetadata,
}

impl HubView for ProjectVersionView {
    fn meta(&self) -> &ResourceMetadata {
        &self.meta
    }
}

impl NamedView for ProjectVersionView {
    const KIND: &'static str = "project version";

    fn name(&self) -> &str {
        &self.version_name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CodeLocationType {
    BomImport,
    Scan,
    #[serde(other)]
    Other,
}

impl CodeLocationType {
    /// Query parameter value the hub expects for this type
    pub fn as_query_value(self) -> &'static str {
        match self {
            CodeLocationType::BomImport => "BOM_IMPORT",
            CodeLocationType::Scan => "SCAN",
            CodeLocationType::Other => "OTHER",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeLocationView {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub location_type: Option<CodeLocationType>,
    #[serde(default)]
    pub mapped_project_version: Option<String>,
    #[serde(rename = "_meta", default)]
    pub meta: ResourceMetadata,
}

impl HubView for CodeLocationView {
    fn meta(&self) -> &ResourceMetadata {
        &self.meta
    }
}

/// Denormalized snapshot of a project version as carried by content items.
///
/// Link fields are best effort: a link the hub did not publish is `None`.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct FullProjectVersionView {
    pub project_name: String,
    pub project_version_name: String,
    pub distribution: Option<String>,
    pub phase: Option<String>,
    pub license: Option<String>,
    pub nickname: Option<String>,
    pub release_comments: Option<String>,
    pub released_on: Option<DateTime<Utc>>,
    pub source: Option<String>,
    pub url: Option<String>,
    pub code_locations_link: Option<String>,
    pub components_link: Option<String>,
    pub policy_status_link: Option<String>,
    pub project_link: Option<String>,
    pub risk_profile_link: Option<String>,
    pub version_report_link: Option<String>,
    pub vulnerable_components_link: Option<String>,
}

impl FullProjectVersionView {
    pub fn from_version(project_name: impl Into<String>, version: &ProjectVersionView) -> Self {
        Self {
            project_name: project_name.into(),
            project_version_name: version.version_name.clone(),
            distribution: version.distribution.clone(),
            phase: version.phase.clone(),
            license: version
                .license
                .as_ref()
                .and_then(|license| license.license_display.clone()),
            nickname: version.nickname.clone(),
            release_comments: version.release_comments.clone(),
            released_on: version.released_on,
            source: version.source.clone(),
            url: version.meta.href.clone(),
            code_locations_link: version.first_link_safely(link::CODE_LOCATIONS),
            components_link: version.first_link_safely(link::COMPONENTS),
            policy_status_link: version.first_link_safely(link::POLICY_STATUS),
            project_link: version.first_link_safely(link::PROJECT),
            risk_profile_link: version.first_link_safely(link::RISK_PROFILE),
            version_report_link: version.first_link_safely(link::VERSION_REPORT),
            vulnerable_components_link: version.first_link_safely(link::VULNERABLE_COMPONENTS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version_json() -> &'static str {
        r#"{
            "versionName": "1.0.0",
            "distribution": "EXTERNAL",
            "phase": "RELEASED",
            "license": {"licenseDisplay": "Apache License 2.0"},
            "nickname": "first",
            "releasedOn": "2024-01-15T00:00:00.000Z",
            "_meta": {
                "href": "https://hub/api/projects/p1/versions/v1",
                "links": [
                    {"rel": "codelocations", "href": "https://hub/api/projects/p1/versions/v1/codelocations"},
                    {"rel": "policy-status", "href": "https://hub/api/projects/p1/versions/v1/policy-status"},
                    {"rel": "project", "href": "https://hub/api/projects/p1"}
                ]
            }
        }"#
    }

    #[test]
    fn test_full_project_version_copies_scalars_and_links() {
        let version: ProjectVersionView = serde_json::from_str(version_json()).unwrap();
        let full = FullProjectVersionView::from_version("demo", &version);

        assert_eq!(full.project_name, "demo");
        assert_eq!(full.project_version_name, "1.0.0");
        assert_eq!(full.distribution.as_deref(), Some("EXTERNAL"));
        assert_eq!(full.license.as_deref(), Some("Apache License 2.0"));
        assert_eq!(full.url.as_deref(), Some("https://hub/api/projects/p1/versions/v1"));
        assert_eq!(
            full.policy_status_link.as_deref(),
            Some("https://hub/api/projects/p1/versions/v1/policy-status")
        );
        assert_eq!(full.project_link.as_deref(), Some("https://hub/api/projects/p1"));
    }

    #[test]
    fn test_missing_links_become_none() {
        let version: ProjectVersionView = serde_json::from_str(version_json()).unwrap();
        let full = FullProjectVersionView::from_version("demo", &version);
        assert!(full.risk_profile_link.is_none());
        assert!(full.version_report_link.is_none());
        assert!(full.vulnerable_components_link.is_none());
        assert!(full.release_comments.is_none());
    }

    #[test]
    fn test_code_location_type_parses_unknown_values() {
        let json = r#"{"type": "SNIPPET", "mappedProjectVersion": "https://hub/v"}"#;
        let location: CodeLocationView = serde_json::from_str(json).unwrap();
        assert_eq!(location.location_type, Some(CodeLocationType::Other));

        let json = r#"{"type": "BOM_IMPORT"}"#;
        let location: CodeLocationView = serde_json::from_str(json).unwrap();
        assert_eq!(location.location_type, Some(CodeLocationType::BomImport));
        assert!(location.mapped_project_version.is_none());
    }
}
