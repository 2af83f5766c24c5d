use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::env::CompleteEnv;

use dex_cli::cli::{
    AuthCommand, BranchCommand, Cli, Commands, ConfigCommand, PrCommand, WorkItemCommand,
};
use dex_cli::commands::{self, common::GlobalOptions, pr::CreateArgs};
use dex_cli::{color, logging};

fn main() -> ExitCode {
    // Handle dynamic completion via COMPLETE environment variable
    CompleteEnv::with_factory(Cli::command).complete();

    let cli = Cli::parse();
    logging::init(cli.debug);

    // Resolve color mode from CLI flag and environment variables
    let color_mode = color::ColorMode::resolve(cli.color);
    let options = GlobalOptions {
        organization: cli.org,
        project: cli.project,
        color_mode,
    };

    match run(cli.command, &options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", color::error(color_mode, error_message(&err)));
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, options: &GlobalOptions) -> Result<()> {
    match command {
        Commands::Auth { action } => match action {
            AuthCommand::Login => commands::auth::cmd_login(options),
            AuthCommand::Logout => commands::auth::cmd_logout(options),
            AuthCommand::Status => commands::auth::cmd_status(options),
        },
        Commands::Branch {
            action:
                BranchCommand::Create {
                    work_item_id,
                    description,
                    from,
                },
        } => commands::branch::cmd_branch_create(
            options,
            &work_item_id,
            &description,
            from.as_deref(),
        ),
        Commands::WorkItem { action } => match action {
            WorkItemCommand::Show { work_item_id } => {
                commands::workitem::cmd_show(options, &work_item_id)
            }
            WorkItemCommand::Start { work_item_id, from } => {
                commands::workitem::cmd_start(options, &work_item_id, from.as_deref())
            }
        },
        Commands::Pr {
            action:
                PrCommand::Create {
                    target,
                    title,
                    source,
                    description,
                    workitem,
                    draft,
                    repo,
                },
        } => commands::pr::cmd_pr_create(
            options,
            CreateArgs {
                target,
                title,
                source,
                description,
                work_item_id: workitem,
                draft,
                repository: repo,
            },
        ),
        Commands::Config { action } => match action {
            ConfigCommand::Show => commands::config::cmd_config_show(),
            ConfigCommand::Set { key, value } => {
                commands::config::cmd_config_set(&key, &value, options.color_mode)
            }
        },
        Commands::Completion { shell } => commands::completion::cmd_completion(&shell),
    }
}

/// Join the error chain, skipping causes already spelled out by their parent
fn error_message(err: &anyhow::Error) -> String {
    let mut message = String::new();
    for cause in err.chain() {
        let text = cause.to_string();
        if message.contains(&text) {
            continue;
        }
        if !message.is_empty() {
            message.push_str(": ");
        }
        message.push_str(&text);
    }
    message
}
