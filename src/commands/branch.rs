//! Branch command - create a work item branch

use anyhow::Result;

use crate::color;
use crate::commands::common::{
    connect, current_dir, load_settings, parse_work_item_id, GlobalOptions, Spinning,
};
use crate::integrations::git::RealGitClient;
use crate::service::{CreateBranchRequest, StderrReporter, WorkflowService};

/// Create `{type}/{id}/{description}` for a work item
///
/// Arguments and the working tree are checked before the config, keychain or
/// network are touched.
pub fn cmd_branch_create(
    options: &GlobalOptions,
    work_item_id: &str,
    description: &str,
    from: Option<&str>,
) -> Result<()> {
    let color_mode = options.color_mode;
    let request = CreateBranchRequest::new(parse_work_item_id(work_item_id)?, description, from)?;

    let cwd = current_dir()?;
    let service = WorkflowService::new(RealGitClient, StderrReporter::new(color_mode));
    service.ensure_repository(&cwd)?;

    let settings = load_settings(options)?;
    let client = connect(&settings)?;

    let outcome = service.create_branch(&Spinning::new(&client, color_mode), &cwd, &request)?;

    eprintln!(
        "{}",
        color::success(
            color_mode,
            format!(
                "Successfully created branch: {}",
                color_mode.colorize_branch(&outcome.branch_name)
            )
        )
    );
    eprintln!(
        "{}",
        color::tree_item(
            color_mode,
            format!(
                "Work Item: {} - {}",
                color_mode.colorize_work_item(&format!("#{}", outcome.work_item.id)),
                outcome.work_item.title
            ),
            false,
            1
        )
    );
    eprintln!(
        "{}",
        color::tree_item(
            color_mode,
            format!("Type: {}", outcome.work_item.work_item_type),
            true,
            1
        )
    );

    Ok(())
}
