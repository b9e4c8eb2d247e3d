use std::collections::HashMap;

pub mod clients;
pub mod config;
pub mod invoices;
pub mod system;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::domain::Client;

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(clients::definitions());
    commands.extend(invoices::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.commands.get(name).map(|definition| definition.handler)
    }
}

/// Returns the positional argument at `index` or a usage error.
pub(crate) fn required<'a>(args: &[&'a str], index: usize, usage: &str) -> Result<&'a str, CommandError> {
    args.get(index)
        .copied()
        .ok_or_else(|| CommandError::InvalidArguments(format!("usage: {usage}")))
}

pub(crate) fn parse_number<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a valid {what}")))
}

/// Resolves a roster entry by its identifier.
pub(crate) fn roster_client(context: &ShellContext, name: &str) -> Result<Client, CommandError> {
    context
        .controller
        .view()
        .roster()
        .find_by_identifier(name)
        .cloned()
        .ok_or_else(|| CommandError::InvalidArguments(format!("unknown client `{name}`")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_keeps_definition_order() {
        let registry = CommandRegistry::new(all_definitions());
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names.first(), Some(&"clients"));
        assert!(names.contains(&"add-invoice"));
        assert!(registry.handler("exit").is_some());
        assert!(registry.get("nope").is_none());
    }

    #[test]
    fn missing_arguments_report_usage() {
        let err = required(&["a"], 1, "add-client <name>").unwrap_err();
        assert_eq!(err.to_string(), "usage: add-client <name>");
        assert_eq!(parse_number::<i32>("2019", "year").unwrap(), 2019);
        assert!(parse_number::<i32>("soon", "year").is_err());
    }
}
