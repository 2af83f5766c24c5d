use serde::Deserialize;

use super::{AzureDevOpsClient, WorkItemTracker};
use crate::domain::work_item::WorkItem;
use crate::error::{DexError, Result};

#[derive(Debug, Deserialize)]
struct WorkItemResponse {
    id: u32,
    #[serde(default)]
    fields: WorkItemFields,
}

#[derive(Debug, Default, Deserialize)]
struct WorkItemFields {
    #[serde(rename = "System.WorkItemType")]
    work_item_type: Option<String>,
    #[serde(rename = "System.Title")]
    title: Option<String>,
    #[serde(rename = "System.State")]
    state: Option<String>,
    #[serde(rename = "System.AssignedTo")]
    assigned_to: Option<Identity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Identity {
    display_name: Option<String>,
}

impl From<WorkItemResponse> for WorkItem {
    fn from(response: WorkItemResponse) -> Self {
        let fields = response.fields;
        let mut item = Self::new(response.id);
        if let Some(work_item_type) = fields.work_item_type {
            item = item.with_type(work_item_type);
        }
        if let Some(title) = fields.title {
            item = item.with_title(title);
        }
        if let Some(state) = fields.state {
            item = item.with_state(state);
        }
        if let Some(name) = fields.assigned_to.and_then(|identity| identity.display_name) {
            item = item.with_assignee(name);
        }
        item
    }
}

impl WorkItemTracker for AzureDevOpsClient {
    fn fetch_work_item(&self, id: u32) -> Result<WorkItem> {
        let url = self.url(&["_apis", "wit", "workitems", &id.to_string()]);
        match self.get::<WorkItemResponse>(&url) {
            Ok(response) => Ok(response.into()),
            Err(DexError::Transport {
                status: Some(404), ..
            }) => Err(DexError::not_found(format!("work item {id} not found"))),
            Err(e) => Err(e),
        }
    }
}
