//! Command handlers: one per user action plus a few read-only views.

use crate::{
    core::services::SummaryService,
    currency::format_signed_amount,
    ledger::{TransactionFilter, TransactionId},
    utils::build_info,
};

use super::core::{CommandError, CommandResult};
use super::output;
use super::registry::{CommandEntry, CommandRegistry};
use super::shell_context::ShellContext;
use super::view::LedgerView;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in definitions() {
        registry.register(entry);
    }
    registry.alias("rm", "remove");
    registry.alias("delete", "remove");
    registry.alias("ls", "list");
    registry.alias("quit", "exit");
}

fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record an income or expense",
            "add <description> <amount> <income|expense>",
            cmd_add,
        ),
        CommandEntry::new(
            "remove",
            "Delete a transaction by id",
            "remove <id>",
            cmd_remove,
        ),
        CommandEntry::new(
            "filter",
            "Choose which transactions are listed",
            "filter <all|income|expenses>",
            cmd_filter,
        ),
        CommandEntry::new("list", "Show transactions for the active filter", "list", cmd_list),
        CommandEntry::new("totals", "Show income, expenses and balance", "totals", cmd_totals),
        CommandEntry::new("help", "List available commands", "help", cmd_help),
        CommandEntry::new("version", "Show build information", "version", cmd_version),
        CommandEntry::new("exit", "Leave the shell", "exit", cmd_exit),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [description, amount, kind] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: add <description> <amount> <income|expense>".into(),
        ));
    };
    let id = context.session.submit_transaction(description, amount, kind)?;
    if let Some(txn) = context.session.store().get(id) {
        output::success(format!(
            "Added `{}` ({}) with id {}.",
            txn.description,
            format_signed_amount(txn.amount),
            id
        ));
    }
    render_all(context);
    Ok(())
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw_id] = args else {
        return Err(CommandError::InvalidArguments("usage: remove <id>".into()));
    };
    let id: TransactionId = raw_id.trim().parse().map_err(|_| {
        CommandError::InvalidArguments(format!("invalid transaction id `{}`", raw_id))
    })?;
    match context.session.delete_transaction(id)? {
        Some(txn) => output::success(format!("Removed `{}`.", txn.description)),
        None => output::info(format!("No transaction with id {}.", id)),
    }
    render_all(context);
    Ok(())
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [value] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: filter <all|income|expenses>".into(),
        ));
    };
    let filter: TransactionFilter = value.parse()?;
    context.session.select_filter(filter);
    output::info(format!("Showing {} transactions.", filter));
    render_rows(context);
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    render_rows(context);
    Ok(())
}

fn cmd_totals(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    render_totals(context);
    Ok(())
}

fn cmd_help(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Commands");
    for entry in context.registry.list() {
        println!("  {:<48} {}", entry.usage, entry.description);
    }
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::info(build_info::current().summary());
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

fn render_rows(context: &ShellContext) {
    let view = LedgerView::from_session(&context.session);
    output::section(format!("Transactions ({})", view.filter));
    for line in view.render_rows() {
        println!("{}", line);
    }
}

fn render_totals(context: &ShellContext) {
    let view = LedgerView::from_session(&context.session);
    output::section("Totals");
    for line in view.render_totals() {
        println!("{}", line);
    }
    let (income, expenses) = SummaryService::counts(context.session.store().ledger());
    output::info(format!("{} income, {} expense entries.", income, expenses));
}

fn render_all(context: &ShellContext) {
    render_rows(context);
    render_totals(context);
}
