use super::{AzureDevOpsClient, PullRequestService};
use crate::domain::pull_request::{CreatePullRequest, PullRequest, Repository};
use crate::error::Result;

impl PullRequestService for AzureDevOpsClient {
    fn fetch_repository(&self, project: &str, name: &str) -> Result<Repository> {
        let url = self.url(&[project, "_apis", "git", "repositories", name]);
        self.get(&url)
    }

    fn create_pull_request(
        &self,
        project: &str,
        repository_id: &str,
        request: &CreatePullRequest,
    ) -> Result<PullRequest> {
        let url = self.url(&[
            project,
            "_apis",
            "git",
            "repositories",
            repository_id,
            "pullrequests",
        ]);
        tracing::debug!(
            source = %request.source_ref_name,
            target = %request.target_ref_name,
            "creating pull request"
        );
        self.post(&url, request)
    }
}
