#![allow(clippy::missing_errors_doc)]
//! Workflow orchestration for branches, work items and pull requests
//!
//! Every workflow is synchronous and fail-fast. Nothing is retried and a
//! failure part way through the start-work-item sequence leaves earlier steps
//! in place.

use std::path::Path;

use crate::color::{self, ColorMode};
use crate::config::Settings;
use crate::domain::naming::{extract_work_item_id, is_valid_slug, BranchDescriptor};
use crate::domain::pull_request::{CreatePullRequest, PullRequest};
use crate::domain::work_item::WorkItem;
use crate::error::{DexError, Result, WorkflowStep};
use crate::integrations::azdo::{PullRequestService, WorkItemTracker};
use crate::integrations::credentials::normalize_organization;
use crate::integrations::git::GitClient;

/// Sink for human-readable workflow progress
pub trait ProgressReporter {
    /// Announce a numbered step before it runs
    fn step(&self, step: WorkflowStep, message: &str);

    fn success(&self, message: &str);

    fn info(&self, message: &str);

    /// Labelled details belonging to the previous line
    fn details(&self, items: &[String]);
}

impl<R: ProgressReporter + ?Sized> ProgressReporter for &R {
    fn step(&self, step: WorkflowStep, message: &str) {
        (**self).step(step, message);
    }

    fn success(&self, message: &str) {
        (**self).success(message);
    }

    fn info(&self, message: &str) {
        (**self).info(message);
    }

    fn details(&self, items: &[String]) {
        (**self).details(items);
    }
}

/// Progress written to stderr through the color module
#[derive(Debug, Clone, Copy)]
pub struct StderrReporter {
    color_mode: ColorMode,
}

impl StderrReporter {
    pub const fn new(color_mode: ColorMode) -> Self {
        Self { color_mode }
    }
}

impl ProgressReporter for StderrReporter {
    fn step(&self, step: WorkflowStep, message: &str) {
        eprintln!(
            "{}",
            color::info(self.color_mode, format!("Step {}: {message}", step.number()))
        );
    }

    fn success(&self, message: &str) {
        eprintln!("{}", color::success(self.color_mode, message));
    }

    fn info(&self, message: &str) {
        eprintln!("{}", color::info(self.color_mode, message));
    }

    fn details(&self, items: &[String]) {
        color::print_tree(self.color_mode, items);
    }
}

fn check_work_item_id(work_item_id: u32) -> Result<()> {
    if work_item_id == 0 {
        return Err(DexError::validation(format!(
            "invalid work item ID: {work_item_id}"
        )));
    }
    Ok(())
}

/// Validated input of the create-branch workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBranchRequest {
    pub work_item_id: u32,
    pub description: String,
    pub base: Option<String>,
}

impl CreateBranchRequest {
    pub fn new(work_item_id: u32, description: &str, base: Option<&str>) -> Result<Self> {
        check_work_item_id(work_item_id)?;
        if !is_valid_slug(description) {
            return Err(DexError::validation(
                "description must be lowercase with hyphens only (e.g., add-login-feature)",
            ));
        }
        Ok(Self {
            work_item_id,
            description: description.to_string(),
            base: base.filter(|b| !b.is_empty()).map(str::to_string),
        })
    }
}

/// Validated input of the start-work-item workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartWorkItemRequest {
    pub work_item_id: u32,
    pub base: Option<String>,
}

impl StartWorkItemRequest {
    pub fn new(work_item_id: u32, base: Option<&str>) -> Result<Self> {
        check_work_item_id(work_item_id)?;
        Ok(Self {
            work_item_id,
            base: base.filter(|b| !b.is_empty()).map(str::to_string),
        })
    }
}

/// Caller input for pull request creation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestOptions {
    /// Defaults to the current branch
    pub source: Option<String>,
    pub target: String,
    pub title: String,
    pub description: String,
    /// Explicit work item; otherwise parsed from the source branch name
    pub work_item_id: Option<u32>,
    pub draft: bool,
}

/// Everything resolved locally before any API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestPlan {
    pub organization: String,
    pub project: String,
    pub repository: String,
    pub source: String,
    pub target: String,
    /// 0 when no work item is linked
    pub work_item_id: u32,
    pub request: CreatePullRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchOutcome {
    pub branch_name: String,
    pub base_branch: String,
    pub work_item: WorkItem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartOutcome {
    pub branch_name: String,
    pub base_branch: String,
    pub work_item: WorkItem,
    pub commit_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestOutcome {
    pub pull_request: PullRequest,
    pub web_url: String,
}

/// What a planned pull request will contain, one `Label: value` per line
pub fn pull_request_details(plan: &PullRequestPlan) -> Vec<String> {
    let mut details = vec![
        format!("Source: {}", plan.source),
        format!("Target: {}", plan.target),
        format!("Title: {}", plan.request.title),
    ];
    if plan.request.is_draft {
        details.push("Draft: yes".to_string());
    }
    if plan.work_item_id > 0 {
        details.push(format!("Work Item: #{}", plan.work_item_id));
    }
    details
}

/// Message of the empty commit that marks the start of work on an item
pub fn start_commit_message(work_item: &WorkItem) -> String {
    format!("Start work on #{}: {}", work_item.id, work_item.title)
}

/// Workflow service that sequences git and Azure DevOps calls
pub struct WorkflowService<G, R>
where
    G: GitClient,
    R: ProgressReporter,
{
    git_client: G,
    reporter: R,
}

impl<G, R> WorkflowService<G, R>
where
    G: GitClient,
    R: ProgressReporter,
{
    pub const fn new(git_client: G, reporter: R) -> Self {
        Self {
            git_client,
            reporter,
        }
    }

    pub const fn git(&self) -> &G {
        &self.git_client
    }

    pub fn ensure_repository(&self, path: &Path) -> Result<()> {
        if self.git_client.is_repository(path) {
            Ok(())
        } else {
            Err(DexError::validation(
                "not a git repository. Please run this command from within a git repository",
            ))
        }
    }

    fn ensure_branch_absent(&self, path: &Path, branch_name: &str) -> Result<()> {
        if self.git_client.branch_exists(path, branch_name)? {
            return Err(DexError::conflict(format!(
                "branch '{branch_name}' already exists"
            )));
        }
        Ok(())
    }

    /// Create `{type}/{id}/{description}` from the given or default base
    pub fn create_branch<T: WorkItemTracker>(
        &self,
        tracker: &T,
        path: &Path,
        request: &CreateBranchRequest,
    ) -> Result<BranchOutcome> {
        self.ensure_repository(path)?;

        let work_item = tracker.fetch_work_item(request.work_item_id)?;
        tracing::debug!(
            id = request.work_item_id,
            work_item_type = %work_item.work_item_type,
            title = %work_item.title,
            "fetched work item"
        );

        let branch_name = BranchDescriptor::with_slug(
            &work_item.work_item_type,
            request.work_item_id,
            &request.description,
        )
        .to_string();
        self.ensure_branch_absent(path, &branch_name)?;

        let base_branch = match &request.base {
            Some(base) => base.clone(),
            None => self.git_client.default_branch(path)?,
        };

        self.reporter
            .info(&format!("Creating branch: {branch_name} (from {base_branch})"));
        self.git_client
            .create_branch(path, &branch_name, &base_branch)?;

        Ok(BranchOutcome {
            branch_name,
            base_branch,
            work_item,
        })
    }

    /// Verify, branch, commit and push for a work item
    pub fn start_work_item<T: WorkItemTracker>(
        &self,
        tracker: &T,
        path: &Path,
        request: &StartWorkItemRequest,
    ) -> Result<StartOutcome> {
        self.ensure_repository(path)?;
        let id = request.work_item_id;

        self.reporter.step(
            WorkflowStep::Verifying,
            &format!("Verifying work item #{id} exists..."),
        );
        let work_item = tracker
            .fetch_work_item(id)
            .map_err(|e| e.at_step(WorkflowStep::Verifying))?;
        self.reporter.success(&format!(
            "Work item found: {} #{id} - {}",
            work_item.work_item_type, work_item.title
        ));

        let base_branch = self
            .resolve_start_base(path, request.base.as_deref())
            .map_err(|e| e.at_step(WorkflowStep::CheckingOutBase))?;

        let branch_name =
            BranchDescriptor::from_title(&work_item.work_item_type, id, &work_item.title)
                .to_string();
        self.reporter.step(
            WorkflowStep::Creating,
            &format!("Creating branch '{branch_name}' from '{base_branch}'..."),
        );
        self.ensure_branch_absent(path, &branch_name)
            .and_then(|()| {
                self.git_client
                    .create_branch(path, &branch_name, &base_branch)
            })
            .map_err(|e| e.at_step(WorkflowStep::Creating))?;
        self.reporter
            .success(&format!("Branch created: {branch_name}"));

        let commit_message = start_commit_message(&work_item);
        self.reporter.step(
            WorkflowStep::Committing,
            &format!("Linking branch to work item #{id}..."),
        );
        self.git_client
            .commit(path, &commit_message)
            .map_err(|e| e.at_step(WorkflowStep::Committing))?;
        self.reporter
            .success("Commit created with work item reference");

        self.reporter
            .step(WorkflowStep::Pushing, "Pushing branch to remote...");
        self.git_client
            .push(path, &branch_name)
            .map_err(|e| e.at_step(WorkflowStep::Pushing))?;
        self.reporter.success("Branch pushed to remote");

        Ok(StartOutcome {
            branch_name,
            base_branch,
            work_item,
            commit_message,
        })
    }

    fn resolve_start_base(&self, path: &Path, base: Option<&str>) -> Result<String> {
        if let Some(base) = base {
            self.reporter.step(
                WorkflowStep::CheckingOutBase,
                &format!("Checking out base branch '{base}'..."),
            );
            self.git_client.checkout(path, base)?;
            self.reporter
                .success(&format!("Checked out branch: {base}"));
            return Ok(base.to_string());
        }

        let current = self.git_client.current_branch(path)?;
        self.reporter.step(
            WorkflowStep::CheckingOutBase,
            &format!("Using current branch '{current}' as base"),
        );
        Ok(current)
    }

    /// Resolve branches, work item link and target settings without any API call
    pub fn plan_pull_request(
        &self,
        path: &Path,
        options: &PullRequestOptions,
        settings: &Settings,
    ) -> Result<PullRequestPlan> {
        if options.title.trim().is_empty() {
            return Err(DexError::validation("pull request title cannot be empty"));
        }
        self.ensure_repository(path)?;

        let source = match options.source.as_deref().filter(|s| !s.is_empty()) {
            Some(source) => source.to_string(),
            None => self.git_client.current_branch(path)?,
        };
        if source == options.target {
            return Err(DexError::conflict(format!(
                "source branch cannot be the same as target branch: {source}"
            )));
        }

        let work_item_id = options.work_item_id.unwrap_or_else(|| {
            let id = extract_work_item_id(&source);
            if id > 0 {
                tracing::debug!(id, branch = %source, "linking work item from branch name");
            }
            id
        });

        let (organization, project, repository) = settings.pull_request_target()?;
        let request = CreatePullRequest::new(
            &source,
            &options.target,
            &options.title,
            &options.description,
            options.draft,
            work_item_id,
        );

        Ok(PullRequestPlan {
            organization: normalize_organization(organization),
            project: project.to_string(),
            repository: repository.to_string(),
            source,
            target: options.target.clone(),
            work_item_id,
            request,
        })
    }

    /// Look up the repository and create the planned pull request
    pub fn submit_pull_request<P: PullRequestService>(
        &self,
        service: &P,
        plan: &PullRequestPlan,
    ) -> Result<PullRequestOutcome> {
        self.reporter.info("Creating pull request...");
        self.reporter.details(&pull_request_details(plan));

        let repository = service.fetch_repository(&plan.project, &plan.repository)?;
        tracing::debug!(id = %repository.id, name = %repository.name, "resolved repository");

        let pull_request =
            service.create_pull_request(&plan.project, &repository.id, &plan.request)?;
        let web_url = pull_request.web_url(&plan.organization, &plan.project, &plan.repository);

        Ok(PullRequestOutcome {
            pull_request,
            web_url,
        })
    }

    pub fn create_pull_request<P: PullRequestService>(
        &self,
        service: &P,
        path: &Path,
        options: &PullRequestOptions,
        settings: &Settings,
    ) -> Result<PullRequestOutcome> {
        let plan = self.plan_pull_request(path, options, settings)?;
        self.submit_pull_request(service, &plan)
    }
}
