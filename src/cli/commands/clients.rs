use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;
use crate::domain::{Client, Displayable};

use super::{required, roster_client, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("clients", "List the client roster", "clients", cmd_clients),
        CommandDefinition::new(
            "add-client",
            "Create a client and select it",
            "add-client <name>",
            cmd_add_client,
        ),
        CommandDefinition::new(
            "remove-client",
            "Delete a client and all of its invoices",
            "remove-client <name>",
            cmd_remove_client,
        ),
        CommandDefinition::new(
            "select-client",
            "Show only the invoices of one client",
            "select-client <name>",
            cmd_select_client,
        ),
        CommandDefinition::new(
            "all-invoices",
            "Clear the client filter",
            "all-invoices",
            cmd_all_invoices,
        ),
    ]
}

fn cmd_clients(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let view = context.controller.view();
    output::section("Clients");
    if view.clients().is_empty() {
        output::info("No clients yet. Use `add-client <name>`.");
        return Ok(());
    }
    let selected = view.selected_client();
    for client in view.clients() {
        let marker = if Some(client) == selected { '*' } else { ' ' };
        output::row(format!("{marker} {}", client.display_label()));
    }
    Ok(())
}

fn cmd_add_client(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = required(args, 0, "add-client <name>")?;
    let client = context.controller.new_client(Client::new(name))?;
    output::success(format!("Client `{}` added.", client.identifier()));
    Ok(())
}

fn cmd_remove_client(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = required(args, 0, "remove-client <name>")?;
    let client = roster_client(context, name)?;
    context.controller.delete_client(&client)?;
    output::success(format!("Client `{name}` removed."));
    Ok(())
}

fn cmd_select_client(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = required(args, 0, "select-client <name>")?;
    let client = roster_client(context, name)?;
    context.controller.select_client(Some(&client))?;
    Ok(())
}

fn cmd_all_invoices(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.controller.show_all_invoices();
    Ok(())
}
