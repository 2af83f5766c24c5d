//! Work item record as seen by the workflows

pub const UNKNOWN_TYPE: &str = "unknown";
pub const UNASSIGNED: &str = "Unassigned";

/// A tracked unit of work, decoded once when fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub id: u32,
    /// Type as the tracker reports it, e.g. "User Story"
    pub work_item_type: String,
    pub title: String,
    pub state: String,
    pub assigned_to: String,
}

impl WorkItem {
    /// Work item with tracker defaults for every field not yet known
    pub fn new(id: u32) -> Self {
        Self {
            id,
            work_item_type: UNKNOWN_TYPE.to_string(),
            title: String::new(),
            state: String::new(),
            assigned_to: UNASSIGNED.to_string(),
        }
    }

    #[must_use]
    pub fn with_type(mut self, work_item_type: impl Into<String>) -> Self {
        self.work_item_type = work_item_type.into();
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    #[must_use]
    pub fn with_assignee(mut self, assigned_to: impl Into<String>) -> Self {
        self.assigned_to = assigned_to.into();
        self
    }

    /// Browser URL of the work item
    pub fn web_url(&self, organization: &str) -> String {
        format!(
            "https://dev.azure.com/{organization}/_workitems/edit/{}",
            self.id
        )
    }
}
