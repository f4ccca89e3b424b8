use crate::hub::domain::PolicyStatusDescription;
use crate::hub::services::hub_requests;
use crate::ports::outbound::ResourceFetcher;
use crate::shared::HubError;

/// DescribePolicyStatusUseCase - summarizes the BOM policy status of a
/// project version
pub struct DescribePolicyStatusUseCase<F> {
    fetcher: F,
}

impl<F: ResourceFetcher> DescribePolicyStatusUseCase<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub async fn execute(
        &self,
        project_name: &str,
        version_name: &str,
    ) -> Result<PolicyStatusDescription, HubError> {
        let target = format!("policy status of {}/{}", project_name, version_name);
        let project = hub_requests::project_by_name(&self.fetcher, project_name)
            .await
            .map_err(|e| HubError::from_fetch(&target, e))?;
        let version = hub_requests::project_version_by_name(&self.fetcher, &project, version_name)
            .await
            .map_err(|e| HubError::from_fetch(&target, e))?;
        let status = hub_requests::policy_status_of(&self.fetcher, &version)
            .await
            .map_err(|e| HubError::from_fetch(&target, e))?;
        Ok(PolicyStatusDescription::new(&status))
    }
}
