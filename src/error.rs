//! Error taxonomy shared by the integrations and the workflow service
//!
//! Every failure is terminal for the current invocation. Nothing is retried and
//! partial workflow progress is never rolled back.

use std::fmt;

use thiserror::Error;

/// Coarse classification of a [`DexError`], used by callers and tests to
/// branch on the failure without matching every variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Transport,
    GitCommand,
    Config,
    Credential,
}

/// Named steps of the start-work-item workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStep {
    Verifying,
    CheckingOutBase,
    Creating,
    Committing,
    Pushing,
}

impl WorkflowStep {
    /// One-based position shown in progress output
    pub const fn number(self) -> u8 {
        match self {
            Self::Verifying => 1,
            Self::CheckingOutBase => 2,
            Self::Creating => 3,
            Self::Committing => 4,
            Self::Pushing => 5,
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Verifying => "verify work item",
            Self::CheckingOutBase => "resolve base branch",
            Self::Creating => "create branch",
            Self::Committing => "link work item",
            Self::Pushing => "push branch",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum DexError {
    /// Bad user input: ID format, slug grammar, empty required field
    #[error("{0}")]
    Validation(String),

    /// Missing work item, credential or branch target
    #[error("{message}{}", hint_suffix(.hint.as_deref()))]
    NotFound {
        message: String,
        hint: Option<String>,
    },

    /// Branch already exists, source equals target
    #[error("{0}")]
    Conflict(String),

    /// Non-2xx response or network failure
    #[error("{}", transport_message(.status.to_owned(), .body))]
    Transport { status: Option<u16>, body: String },

    /// Non-zero exit from a git subprocess
    #[error("git {operation} failed: {stderr}")]
    GitCommand { operation: String, stderr: String },

    /// Config file could not be read, parsed or written
    #[error("{0}")]
    Config(String),

    /// Keychain access failed for a reason other than a missing entry
    #[error("{0}")]
    Credential(String),

    /// A start-work-item step failed
    #[error("step {} ({step}) failed: {source}", .step.number())]
    Step {
        step: WorkflowStep,
        #[source]
        source: Box<DexError>,
    },
}

fn hint_suffix(hint: Option<&str>) -> String {
    hint.map(|h| format!(". {h}")).unwrap_or_default()
}

fn transport_message(status: Option<u16>, body: &str) -> String {
    match status {
        Some(code) => format!("API request failed with status {code}: {body}"),
        None => format!("request failed: {body}"),
    }
}

impl DexError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            hint: None,
        }
    }

    pub fn not_found_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    pub fn git(operation: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::GitCommand {
            operation: operation.into(),
            stderr: stderr.into(),
        }
    }

    /// Wrap this error as the failure of a workflow step
    #[must_use]
    pub fn at_step(self, step: WorkflowStep) -> Self {
        Self::Step {
            step,
            source: Box::new(self),
        }
    }

    /// Root classification, looking through step wrapping
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::GitCommand { .. } => ErrorKind::GitCommand,
            Self::Config(_) => ErrorKind::Config,
            Self::Credential(_) => ErrorKind::Credential,
            Self::Step { source, .. } => source.kind(),
        }
    }

    /// The step that failed, if this error came out of the start-work-item workflow
    pub const fn failed_step(&self) -> Option<WorkflowStep> {
        match self {
            Self::Step { step, .. } => Some(*step),
            _ => None,
        }
    }
}

pub type Result<T, E = DexError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_steps_numbered_in_order() {
        let steps = [
            (WorkflowStep::Verifying, "verify work item"),
            (WorkflowStep::CheckingOutBase, "resolve base branch"),
            (WorkflowStep::Creating, "create branch"),
            (WorkflowStep::Committing, "link work item"),
            (WorkflowStep::Pushing, "push branch"),
        ];
        for (i, (step, name)) in steps.into_iter().enumerate() {
            assert_eq!(usize::from(step.number()), i + 1);
            assert_eq!(step.to_string(), name);
        }
    }

    #[test]
    fn test_not_found_includes_hint() {
        let err = DexError::not_found_with_hint(
            "no credentials found for organization contoso",
            "run 'dex auth login' first",
        );
        assert_eq!(
            err.to_string(),
            "no credentials found for organization contoso. run 'dex auth login' first"
        );
    }

    #[test]
    fn test_not_found_without_hint() {
        let err = DexError::not_found("work item 7 not found");
        assert_eq!(err.to_string(), "work item 7 not found");
    }

    #[test]
    fn test_transport_with_status() {
        let err = DexError::Transport {
            status: Some(401),
            body: "unauthorized".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API request failed with status 401: unauthorized"
        );
    }

    #[test]
    fn test_transport_without_status() {
        let err = DexError::Transport {
            status: None,
            body: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "request failed: connection refused");
    }

    #[test]
    fn test_step_wrapping_keeps_root_kind() {
        let err = DexError::conflict("branch 'bug/1/x' already exists").at_step(WorkflowStep::Creating);
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.failed_step(), Some(WorkflowStep::Creating));
        assert_eq!(
            err.to_string(),
            "step 3 (create branch) failed: branch 'bug/1/x' already exists"
        );
    }

    #[test]
    fn test_git_command_names_operation() {
        let err = DexError::git("push", "remote rejected");
        assert_eq!(err.kind(), ErrorKind::GitCommand);
        assert_eq!(err.to_string(), "git push failed: remote rejected");
    }
}
