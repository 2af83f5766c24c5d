//! Work item commands - show details and start work

use anyhow::Result;

use crate::color;
use crate::commands::common::{
    connect, current_dir, load_settings, parse_work_item_id, GlobalOptions, Spinning,
};
use crate::domain::work_item::WorkItem;
use crate::integrations::azdo::WorkItemTracker;
use crate::integrations::git::RealGitClient;
use crate::service::{StartWorkItemRequest, StderrReporter, WorkflowService};

const RULE: &str = "─────────────────────────────────────────";

/// Plain-text details block printed by `workitem show`
pub fn format_work_item(item: &WorkItem, organization: &str) -> String {
    format!(
        "Work Item #{}\n{RULE}\nTitle:       {}\nType:        {}\nState:       {}\nAssigned To: {}\nURL:         {}\n",
        item.id,
        item.title,
        item.work_item_type,
        item.state,
        item.assigned_to,
        item.web_url(organization)
    )
}

pub fn cmd_show(options: &GlobalOptions, work_item_id: &str) -> Result<()> {
    let id = parse_work_item_id(work_item_id)?;
    let settings = load_settings(options)?;
    let client = connect(&settings)?;

    let item = Spinning::new(&client, options.color_mode).fetch_work_item(id)?;
    print!("{}", format_work_item(&item, client.organization()));
    Ok(())
}

pub fn cmd_start(options: &GlobalOptions, work_item_id: &str, from: Option<&str>) -> Result<()> {
    let color_mode = options.color_mode;
    let request = StartWorkItemRequest::new(parse_work_item_id(work_item_id)?, from)?;

    let cwd = current_dir()?;
    let service = WorkflowService::new(RealGitClient, StderrReporter::new(color_mode));
    service.ensure_repository(&cwd)?;

    let settings = load_settings(options)?;
    let client = connect(&settings)?;

    let outcome = service.start_work_item(&Spinning::new(&client, color_mode), &cwd, &request)?;

    eprintln!();
    eprintln!(
        "{}",
        color::success(
            color_mode,
            format!(
                "Successfully started work on work item {}",
                color_mode.colorize_work_item(&format!("#{}", outcome.work_item.id))
            )
        )
    );
    eprintln!(
        "{}",
        color::tree_item(
            color_mode,
            format!("Branch: {}", color_mode.colorize_branch(&outcome.branch_name)),
            false,
            1
        )
    );
    eprintln!(
        "{}",
        color::tree_item(
            color_mode,
            format!(
                "Work Item: {} #{} - {}",
                outcome.work_item.work_item_type, outcome.work_item.id, outcome.work_item.title
            ),
            true,
            1
        )
    );

    Ok(())
}
