use crate::shared::HubError;
use serde::{Deserialize, Serialize};

/// Link relations the hub publishes in a resource's `_meta.links`
pub mod link {
    pub const SCANS: &str = "scans";
    pub const VERSIONS: &str = "versions";
    pub const CODE_LOCATIONS: &str = "codelocations";
    pub const COMPONENTS: &str = "components";
    pub const POLICY_STATUS: &str = "policy-status";
    pub const PROJECT: &str = "project";
    pub const RISK_PROFILE: &str = "riskProfile";
    pub const VERSION_REPORT: &str = "versionReport";
    pub const VULNERABLE_COMPONENTS: &str = "vulnerable-components";
    pub const POLICY_RULE: &str = "policy-rule";
}

/// The `_meta` block every hub resource carries: its own href and typed links
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceMetadata {
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub links: Vec<ResourceLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceLink {
    pub rel: String,
    pub href: String,
}

impl ResourceMetadata {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            links: Vec::new(),
        }
    }

    pub fn with_link(mut self, rel: impl Into<String>, href: impl Into<String>) -> Self {
        self.links.push(ResourceLink {
            rel: rel.into(),
            href: href.into(),
        });
        self
    }
}

/// Link resolution over a resource's `_meta` block.
///
/// `href` and `first_link` fail when the link is absent; `first_link_safely`
/// is the best-effort variant used for denormalized snapshots.
pub trait HubView {
    fn meta(&self) -> &ResourceMetadata;

    /// Short human-readable description used in error messages
    fn describe(&self) -> String {
        self.meta()
            .href
            .clone()
            .unwrap_or_else(|| "a resource without href".to_string())
    }

    fn href(&self) -> Result<&str, HubError> {
        self.meta()
            .href
            .as_deref()
            .ok_or_else(|| HubError::MissingLink {
                rel: "href".to_string(),
                resource: self.describe(),
            })
    }

    fn first_link(&self, rel: &str) -> Result<&str, HubError> {
        self.meta()
            .links
            .iter()
            .find(|link| link.rel == rel)
            .map(|link| link.href.as_str())
            .ok_or_else(|| HubError::MissingLink {
                rel: rel.to_string(),
                resource: self.describe(),
            })
    }

    fn first_link_safely(&self, rel: &str) -> Option<String> {
        self.first_link(rel).ok().map(str::to_string)
    }

    fn links(&self, rel: &str) -> Vec<String> {
        self.meta()
            .links
            .iter()
            .filter(|link| link.rel == rel)
            .map(|link| link.href.clone())
            .collect()
    }
}

/// A resource that can be looked up by exact name
pub trait NamedView: HubView {
    /// Resource kind used in not-found messages
    const KIND: &'static str;

    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain(ResourceMetadata);

    impl HubView for Plain {
        fn meta(&self) -> &ResourceMetadata {
            &self.0
        }
    }

    fn sample() -> Plain {
        Plain(
            ResourceMetadata::new("https://hub/api/projects/1/versions/2")
                .with_link(link::POLICY_RULE, "https://hub/api/policy-rules/a")
                .with_link(link::POLICY_RULE, "https://hub/api/policy-rules/b")
                .with_link(link::CODE_LOCATIONS, "https://hub/api/projects/1/versions/2/codelocations"),
        )
    }

    #[test]
    fn test_href_and_first_link() {
        let view = sample();
        assert_eq!(view.href().unwrap(), "https://hub/api/projects/1/versions/2");
        assert_eq!(
            view.first_link(link::POLICY_RULE).unwrap(),
            "https://hub/api/policy-rules/a"
        );
    }

    #[test]
    fn test_links_returns_every_match_in_order() {
        let view = sample();
        assert_eq!(
            view.links(link::POLICY_RULE),
            vec![
                "https://hub/api/policy-rules/a".to_string(),
                "https://hub/api/policy-rules/b".to_string()
            ]
        );
        assert!(view.links(link::SCANS).is_empty());
    }

    #[test]
    fn test_missing_link_is_an_error_but_safe_lookup_is_not() {
        let view = sample();
        let err = view.first_link(link::RISK_PROFILE).unwrap_err();
        assert!(matches!(err, HubError::MissingLink { ref rel, .. } if rel == "riskProfile"));
        assert!(view.first_link_safely(link::RISK_PROFILE).is_none());
    }

    #[test]
    fn test_missing_href() {
        let view = Plain(ResourceMetadata::default());
        assert!(view.href().is_err());
        assert_eq!(view.describe(), "a resource without href");
    }

    #[test]
    fn test_metadata_deserializes_hub_meta_block() {
        let json = r#"{
            "href": "https://hub/api/codelocations/7",
            "links": [{"rel": "scans", "href": "https://hub/api/codelocations/7/scan-summaries"}]
        }"#;
        let meta: ResourceMetadata = serde_json::from_str(json).unwrap();
        let view = Plain(meta);
        assert_eq!(
            view.first_link(link::SCANS).unwrap(),
            "https://hub/api/codelocations/7/scan-summaries"
        );
    }
}
