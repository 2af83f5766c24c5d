//! Pull request payloads exchanged with Azure Repos

use serde::{Deserialize, Serialize};

use crate::domain::naming::format_ref_name;

/// A Git repository as returned by the repositories endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    pub id: String,
    pub name: String,
}

/// Reference to a work item linked from a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkItemRef {
    /// The API expects the numeric ID as a string
    pub id: String,
}

/// Request body for creating a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePullRequest {
    pub source_ref_name: String,
    pub target_ref_name: String,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub work_item_refs: Vec<WorkItemRef>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_draft: bool,
}

impl CreatePullRequest {
    /// Build a request from branch names, normalizing both to full refs
    ///
    /// `work_item_id` of 0 means no work item is linked.
    pub fn new(
        source_branch: &str,
        target_branch: &str,
        title: &str,
        description: &str,
        is_draft: bool,
        work_item_id: u32,
    ) -> Self {
        let work_item_refs = if work_item_id > 0 {
            vec![WorkItemRef {
                id: work_item_id.to_string(),
            }]
        } else {
            Vec::new()
        };

        Self {
            source_ref_name: format_ref_name(source_branch),
            target_ref_name: format_ref_name(target_branch),
            title: title.to_string(),
            description: description.to_string(),
            work_item_refs,
            is_draft,
        }
    }
}

/// A created pull request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    pub pull_request_id: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source_ref_name: String,
    #[serde(default)]
    pub target_ref_name: String,
    #[serde(default)]
    pub status: String,
}

impl PullRequest {
    /// Browser URL of the pull request
    pub fn web_url(&self, organization: &str, project: &str, repository: &str) -> String {
        format!(
            "https://dev.azure.com/{organization}/{project}/_git/{repository}/pullrequest/{}",
            self.pull_request_id
        )
    }
}
