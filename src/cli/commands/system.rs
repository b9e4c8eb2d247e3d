use std::path::PathBuf;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::utils::build_info;

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "save",
            "Write clients and invoices to disk",
            "save [path]",
            cmd_save,
        ),
        CommandDefinition::new("version", "Show build metadata", "version", cmd_version),
        CommandDefinition::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandDefinition::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_save(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = args
        .first()
        .map(|raw| PathBuf::from(*raw))
        .unwrap_or_else(|| context.book_path.clone());
    context.controller.service().save_to_path(&path)?;
    output::success(format!("Book saved to {}.", path.display()));
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Balance Core {}", meta.version));
    output::row(format!("CLI version  : {}", build_info::CLI_VERSION));
    output::row(format!("Build hash   : {}", meta.revision()));
    output::row(format!("Built at     : {}", meta.timestamp));
    output::row(format!("Target       : {}", meta.target));
    output::row(format!("Profile      : {}", meta.profile));
    output::row(format!("Rustc        : {}", meta.rustc));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(command) = args.first().map(|name| name.to_lowercase()) {
        if let Some(command) = context.registry.get(&command) {
            help::print_command(command);
        } else {
            context.suggest_command(args[0]);
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
