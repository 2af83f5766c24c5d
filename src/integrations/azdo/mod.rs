#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
//! Azure DevOps REST integration
//!
//! The workflows only see the two traits below; [`AzureDevOpsClient`]
//! implements both over the REST API.

mod client;
mod pull_requests;
mod work_items;

pub use client::{AzureDevOpsClient, API_VERSION, DEFAULT_BASE_URL};

use crate::domain::pull_request::{CreatePullRequest, PullRequest, Repository};
use crate::domain::work_item::WorkItem;
use crate::error::Result;

/// Source of work item metadata
pub trait WorkItemTracker {
    fn fetch_work_item(&self, id: u32) -> Result<WorkItem>;
}

/// Repository lookup and pull request creation
pub trait PullRequestService {
    fn fetch_repository(&self, project: &str, name: &str) -> Result<Repository>;

    fn create_pull_request(
        &self,
        project: &str,
        repository_id: &str,
        request: &CreatePullRequest,
    ) -> Result<PullRequest>;
}
