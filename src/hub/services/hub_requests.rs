use crate::hub::domain::{
    link, CodeLocationType, CodeLocationView, HubView, ProjectVersionView, ProjectView,
    RawNotification, ScanSummaryView, VersionBomPolicyStatusView,
};
use crate::ports::outbound::{PagedQuery, ResourceFetcher};
use crate::shared::Result;
use chrono::{DateTime, SecondsFormat, Utc};

pub const PROJECTS_PATH: &str = "/api/projects";
pub const CODE_LOCATIONS_PATH: &str = "/api/codelocations";
pub const NOTIFICATIONS_PATH: &str = "/api/notifications";

fn api_url<F: ResourceFetcher>(fetcher: &F, path: &str) -> String {
    format!("{}{}", fetcher.base_url().trim_end_matches('/'), path)
}

/// Date format the notification endpoint accepts, e.g. `2024-05-01T12:00:00.000Z`
pub fn format_hub_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub async fn project_by_name<F: ResourceFetcher>(
    fetcher: &F,
    project_name: &str,
) -> Result<ProjectView> {
    let query =
        PagedQuery::new(api_url(fetcher, PROJECTS_PATH)).with_q(format!("name:{}", project_name));
    fetcher.fetch_by_exact_name(&query, project_name).await
}

pub async fn project_version_by_name<F: ResourceFetcher>(
    fetcher: &F,
    project: &ProjectView,
    version_name: &str,
) -> Result<ProjectVersionView> {
    let versions_url = project.first_link(link::VERSIONS)?;
    let query = PagedQuery::new(versions_url).with_q(format!("versionName:{}", version_name));
    fetcher.fetch_by_exact_name(&query, version_name).await
}

pub async fn code_locations_of_type<F: ResourceFetcher>(
    fetcher: &F,
    location_type: CodeLocationType,
) -> Result<Vec<CodeLocationView>> {
    let query = PagedQuery::new(api_url(fetcher, CODE_LOCATIONS_PATH))
        .with_parameter("codeLocationType", location_type.as_query_value());
    fetcher.get_all(&query).await
}

pub async fn scan_summaries_of<F: ResourceFetcher>(
    fetcher: &F,
    code_location: &CodeLocationView,
) -> Result<Vec<ScanSummaryView>> {
    let scans_url = code_location.first_link(link::SCANS)?;
    fetcher.get_all(&PagedQuery::new(scans_url)).await
}

/// Every notification created in `[start, end]`, in the order the hub lists them
pub async fn notifications_between<F: ResourceFetcher>(
    fetcher: &F,
    start: &DateTime<Utc>,
    end: &DateTime<Utc>,
) -> Result<Vec<RawNotification>> {
    let query = PagedQuery::new(api_url(fetcher, NOTIFICATIONS_PATH))
        .with_parameter("startDate", format_hub_date(start))
        .with_parameter("endDate", format_hub_date(end));
    fetcher.get_all(&query).await
}

pub async fn policy_status_of<F: ResourceFetcher>(
    fetcher: &F,
    version: &ProjectVersionView,
) -> Result<VersionBomPolicyStatusView> {
    let policy_status_url = version.first_link(link::POLICY_STATUS)?;
    fetcher.get_item(policy_status_url).await
}
