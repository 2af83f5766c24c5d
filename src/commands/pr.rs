//! Pull request command - create a pull request from a branch

use anyhow::Result;

use crate::color::{self, ColorMode};
use crate::commands::common::{
    connect, current_dir, load_settings, parse_work_item_id, GlobalOptions, Spinning,
};
use crate::integrations::git::RealGitClient;
use crate::service::{PullRequestOptions, PullRequestOutcome, StderrReporter, WorkflowService};

/// Arguments of `dex pr create` as given on the command line
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    pub target: String,
    pub title: String,
    pub source: Option<String>,
    pub description: String,
    pub work_item_id: Option<String>,
    pub draft: bool,
    pub repository: Option<String>,
}

pub fn cmd_pr_create(options: &GlobalOptions, args: CreateArgs) -> Result<()> {
    let color_mode = options.color_mode;
    let work_item_id = args
        .work_item_id
        .as_deref()
        .map(parse_work_item_id)
        .transpose()?;

    let cwd = current_dir()?;
    let service = WorkflowService::new(RealGitClient, StderrReporter::new(color_mode));
    service.ensure_repository(&cwd)?;

    let settings = load_settings(options)?;
    let settings = settings.with_repository(args.repository.as_deref());

    let pr_options = PullRequestOptions {
        source: args.source,
        target: args.target,
        title: args.title,
        description: args.description,
        work_item_id,
        draft: args.draft,
    };
    let plan = service.plan_pull_request(&cwd, &pr_options, &settings)?;

    let client = connect(&settings)?;
    let outcome = service.submit_pull_request(&Spinning::new(&client, color_mode), &plan)?;

    print_outcome(color_mode, &outcome);
    println!("{}", outcome.web_url);
    Ok(())
}

fn print_outcome(color_mode: ColorMode, outcome: &PullRequestOutcome) {
    eprintln!(
        "{}",
        color::success(
            color_mode,
            format!(
                "Successfully created pull request #{}",
                outcome.pull_request.pull_request_id
            )
        )
    );
    color::print_tree(
        color_mode,
        &[format!("URL: {}", color_mode.colorize_url(&outcome.web_url))],
    );
}
