use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::domain::{Displayable, Revenue};
use crate::view::ScopeState;

use super::{parse_number, required, roster_client, CommandDefinition};

const ADD_INVOICE_USAGE: &str = "add-invoice <client> <day> <month> <year> <amount>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "invoices",
            "List the invoices of the active scope",
            "invoices",
            cmd_invoices,
        ),
        CommandDefinition::new("years", "List the selectable years", "years", cmd_years),
        CommandDefinition::new(
            "show",
            "Summarize the active filters and revenue",
            "show",
            cmd_show,
        ),
        CommandDefinition::new(
            "select-year",
            "Show the invoices of another year",
            "select-year <year>",
            cmd_select_year,
        ),
        CommandDefinition::new(
            "add-invoice",
            "Record an invoice for a client",
            ADD_INVOICE_USAGE,
            cmd_add_invoice,
        ),
        CommandDefinition::new(
            "remove-invoice",
            "Delete the invoice on a listed row",
            "remove-invoice <row>",
            cmd_remove_invoice,
        ),
        CommandDefinition::new(
            "select-invoice",
            "Mark a listed row as selected",
            "select-invoice <row>",
            cmd_select_invoice,
        ),
    ]
}

fn cmd_invoices(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let view = context.controller.view();
    output::section("Invoices");
    let selected = view.selected_invoice();
    for (row, invoice) in view.invoices().iter().enumerate() {
        let marker = if Some(row) == selected { '*' } else { ' ' };
        output::row(format!("{marker} [{row}] {}", invoice.display_label()));
    }
    let label = context.decorate_label(view.revenue_label());
    if !label.is_empty() {
        output::revenue(label);
    }
    Ok(())
}

fn cmd_years(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let view = context.controller.view();
    output::section("Years");
    for year in view.years() {
        let marker = if Some(*year) == view.selected_year() { '*' } else { ' ' };
        output::row(format!("{marker} {year}"));
    }
    Ok(())
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let view = context.controller.view();
    output::section("Balance");
    let scope = match view.scope() {
        ScopeState::Idle => "nothing selected",
        ScopeState::ClientSelected => "client only",
        ScopeState::YearSelected => "year",
        ScopeState::ClientAndYearSelected => "client and year",
    };
    output::row(format!("Scope   : {scope}"));
    if !view.scope().has_scope() {
        output::hint("No year is selected. Use `years` and `select-year <year>`.");
    }
    if let Some(year) = view.selected_year() {
        output::row(format!("Year    : {year}"));
    }
    if let Some(client) = view.selected_client() {
        output::row(format!("Client  : {client}"));
    }
    output::row(format!("Invoices: {}", view.invoices().len()));
    let label = context.decorate_label(view.revenue_label());
    if !label.is_empty() {
        output::revenue(label);
    }
    Ok(())
}

fn cmd_select_year(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let year = parse_number(required(args, 0, "select-year <year>")?, "year")?;
    context.controller.select_year(year)?;
    Ok(())
}

fn cmd_add_invoice(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() != 5 {
        return Err(CommandError::InvalidArguments(format!(
            "usage: {ADD_INVOICE_USAGE}"
        )));
    }
    let client = roster_client(context, args[0])?;
    let day = parse_number(args[1], "day")?;
    let month = parse_number(args[2], "month")?;
    let year = parse_number(args[3], "year")?;
    let revenue = Revenue::parse(args[4])?;
    let invoice = context
        .controller
        .add_invoice_from_fields(&client, day, month, year, revenue)?;
    output::success(format!("Invoice `{invoice}` recorded."));
    Ok(())
}

fn cmd_remove_invoice(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let row: usize = parse_number(required(args, 0, "remove-invoice <row>")?, "row")?;
    let invoice = context
        .controller
        .view()
        .ledger()
        .get(row)
        .cloned()
        .ok_or_else(|| CommandError::InvalidArguments(format!("no invoice on row {row}")))?;
    context.controller.delete_invoice(&invoice)?;
    output::success(format!("Invoice `{invoice}` removed."));
    Ok(())
}

fn cmd_select_invoice(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let row = parse_number(required(args, 0, "select-invoice <row>")?, "row")?;
    context.controller.select_invoice(Some(row))?;
    Ok(())
}
