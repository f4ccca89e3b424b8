use crate::hub::domain::{
    link, BomComponentPolicyStatusView, ComponentVersionStatus, ComponentVersionView,
    ContentPayload, FullProjectVersionView, HubView, Notification, NotificationContent,
    NotificationContentItem, PolicyOverrideContent, PolicyRuleView, PolicyViolationContent,
    ProjectVersionView, RawNotification, VulnerabilityContent,
};
use crate::hub::policies::{rule_accepted, PolicyRuleFilter};
use crate::ports::outbound::ResourceFetcher;
use crate::shared::HubError;
use futures::future::try_join_all;

/// Where the policy rules of a component entry come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSource {
    /// The `policy-rule` links of the entry's BOM component policy status.
    /// Entries without a policy status link have no rules and yield no item.
    PolicyStatus,
    /// The rule URLs embedded in the notification entry
    Embedded,
}

/// Turns one classified notification into content items.
///
/// Untyped notifications yield nothing. Any failure aborts this notification
/// only and comes back as [`HubError::Transform`].
pub async fn transform_notification<F: ResourceFetcher>(
    fetcher: &F,
    notification: &Notification,
    filter: Option<&PolicyRuleFilter>,
) -> Result<Vec<NotificationContentItem>, HubError> {
    let raw = &notification.raw;
    match &notification.content {
        NotificationContent::PolicyViolation(content) => {
            transform_policy_violation(
                fetcher,
                raw,
                content,
                RuleSource::PolicyStatus,
                filter,
                |component_url, policy_rules| ContentPayload::PolicyViolation {
                    component_url,
                    policy_rules,
                },
            )
            .await
        }
        NotificationContent::PolicyViolationCleared(content) => {
            transform_policy_violation(
                fetcher,
                raw,
                content,
                RuleSource::Embedded,
                filter,
                |component_url, policy_rules| ContentPayload::PolicyViolationCleared {
                    component_url,
                    policy_rules,
                },
            )
            .await
        }
        NotificationContent::PolicyOverride(content) => {
            transform_policy_override(fetcher, raw, content, filter).await
        }
        NotificationContent::Vulnerability(content) => {
            transform_vulnerability(fetcher, raw, content).await
        }
        NotificationContent::Untyped => Ok(Vec::new()),
    }
}

async fn transform_policy_violation<F, B>(
    fetcher: &F,
    raw: &RawNotification,
    content: &PolicyViolationContent,
    rule_source: RuleSource,
    filter: Option<&PolicyRuleFilter>,
    build_payload: B,
) -> Result<Vec<NotificationContentItem>, HubError>
where
    F: ResourceFetcher,
    B: Fn(Option<String>, Vec<PolicyRuleView>) -> ContentPayload,
{
    let project_version = resolve_project_version(
        fetcher,
        raw,
        &content.project_name,
        &content.project_version_link,
    )
    .await?;
    process_policy_entries(
        fetcher,
        raw,
        &project_version,
        &content.component_version_statuses,
        rule_source,
        filter,
        build_payload,
    )
    .await
}

async fn transform_policy_override<F: ResourceFetcher>(
    fetcher: &F,
    raw: &RawNotification,
    content: &PolicyOverrideContent,
    filter: Option<&PolicyRuleFilter>,
) -> Result<Vec<NotificationContentItem>, HubError> {
    let project_version = resolve_project_version(
        fetcher,
        raw,
        &content.project_name,
        &content.project_version_link,
    )
    .await?;
    let entries = [content.as_component_status()];
    process_policy_entries(
        fetcher,
        raw,
        &project_version,
        &entries,
        RuleSource::PolicyStatus,
        filter,
        |component_url, policy_rules| ContentPayload::PolicyOverride {
            component_url,
            policy_rules,
            first_name: content.first_name.clone(),
            last_name: content.last_name.clone(),
        },
    )
    .await
}

/// One item per affected project version, ids copied as the hub sent them
async fn transform_vulnerability<F: ResourceFetcher>(
    fetcher: &F,
    raw: &RawNotification,
    content: &VulnerabilityContent,
) -> Result<Vec<NotificationContentItem>, HubError> {
    let component_version_link = content.component_version_link.as_deref();
    let component_version = resolve_component_version(fetcher, component_version_link)
        .await
        .map_err(|e| HubError::transform(raw, component_version_link, e))?;

    let mut items = Vec::with_capacity(content.affected_project_versions.len());
    for affected in &content.affected_project_versions {
        let project_version = resolve_project_version(
            fetcher,
            raw,
            &affected.project_name,
            &affected.project_version_link,
        )
        .await?;
        items.push(NotificationContentItem {
            created_at: raw.created_at,
            project_version,
            component_name: content.component_name.clone(),
            component_version: component_version.clone(),
            component_version_url: content.component_version_link.clone(),
            payload: ContentPayload::Vulnerability {
                added: content.new_vulnerability_ids.clone(),
                updated: content.updated_vulnerability_ids.clone(),
                deleted: content.deleted_vulnerability_ids.clone(),
            },
        });
    }
    Ok(items)
}

/// Shared per-entry loop of the three policy kinds
async fn process_policy_entries<F, B>(
    fetcher: &F,
    raw: &RawNotification,
    project_version: &FullProjectVersionView,
    entries: &[ComponentVersionStatus],
    rule_source: RuleSource,
    filter: Option<&PolicyRuleFilter>,
    build_payload: B,
) -> Result<Vec<NotificationContentItem>, HubError>
where
    F: ResourceFetcher,
    B: Fn(Option<String>, Vec<PolicyRuleView>) -> ContentPayload,
{
    let mut items = Vec::new();
    for entry in entries {
        let component_version_link = entry.component_version_link.as_deref();
        let (component_version, policy_rules) =
            resolve_policy_entry(fetcher, entry, rule_source, filter)
                .await
                .map_err(|e| HubError::transform(raw, component_version_link, e))?;
        if policy_rules.is_empty() {
            continue;
        }
        items.push(NotificationContentItem {
            created_at: raw.created_at,
            project_version: project_version.clone(),
            component_name: entry.component_name.clone(),
            component_version,
            component_version_url: entry.component_version_link.clone(),
            payload: build_payload(entry.component_link.clone(), policy_rules),
        });
    }
    Ok(items)
}

async fn resolve_policy_entry<F: ResourceFetcher>(
    fetcher: &F,
    entry: &ComponentVersionStatus,
    rule_source: RuleSource,
    filter: Option<&PolicyRuleFilter>,
) -> Result<(Option<ComponentVersionView>, Vec<PolicyRuleView>), HubError> {
    let component_version =
        resolve_component_version(fetcher, entry.component_version_link.as_deref()).await?;
    let rule_urls = policy_rule_urls(fetcher, entry, rule_source).await?;
    let policy_rules = fetch_matching_rules(fetcher, &rule_urls, filter).await?;
    Ok((component_version, policy_rules))
}

/// Fetches the project version at `project_version_link` and snapshots it
pub async fn resolve_project_version<F: ResourceFetcher>(
    fetcher: &F,
    raw: &RawNotification,
    project_name: &str,
    project_version_link: &str,
) -> Result<FullProjectVersionView, HubError> {
    let version: ProjectVersionView = fetcher
        .get_item(project_version_link)
        .await
        .map_err(|e| {
            HubError::transform(
                raw,
                Some(project_version_link),
                HubError::from_fetch(project_version_link, e),
            )
        })?;
    let mut snapshot = FullProjectVersionView::from_version(project_name, &version);
    if snapshot.url.is_none() {
        snapshot.url = Some(project_version_link.to_string());
    }
    Ok(snapshot)
}

/// A blank or absent link resolves to `None` without a request
pub async fn resolve_component_version<F: ResourceFetcher>(
    fetcher: &F,
    component_version_link: Option<&str>,
) -> Result<Option<ComponentVersionView>, HubError> {
    let Some(url) = non_blank(component_version_link) else {
        return Ok(None);
    };
    fetcher
        .get_item(url)
        .await
        .map(Some)
        .map_err(|e| HubError::from_fetch(url, e))
}

pub async fn policy_rule_urls<F: ResourceFetcher>(
    fetcher: &F,
    entry: &ComponentVersionStatus,
    rule_source: RuleSource,
) -> Result<Vec<String>, HubError> {
    match rule_source {
        RuleSource::Embedded => Ok(entry.policies.clone()),
        RuleSource::PolicyStatus => {
            let Some(url) =
                non_blank(entry.bom_component_version_policy_status_link.as_deref())
            else {
                return Ok(Vec::new());
            };
            let status: BomComponentPolicyStatusView = fetcher
                .get_item(url)
                .await
                .map_err(|e| HubError::from_fetch(url, e))?;
            Ok(status.links(link::POLICY_RULE))
        }
    }
}

/// Fetches each rule, keeping the ones `filter` accepts, in URL order
pub async fn fetch_matching_rules<F: ResourceFetcher>(
    fetcher: &F,
    rule_urls: &[String],
    filter: Option<&PolicyRuleFilter>,
) -> Result<Vec<PolicyRuleView>, HubError> {
    let rules = try_join_all(rule_urls.iter().map(|url| async move {
        fetcher
            .get_item::<PolicyRuleView>(url)
            .await
            .map_err(|e| HubError::from_fetch(url, e))
    }))
    .await?;
    Ok(rules
        .into_iter()
        .filter(|rule| rule_accepted(filter, rule))
        .collect())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
