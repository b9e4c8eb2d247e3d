use std::path::PathBuf;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;

use super::{parse_number, CommandDefinition};

const CONFIG_USAGE: &str = "config [show|set <year-span|currency|data-file> <value>]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "config",
        "View and change shell preferences",
        CONFIG_USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_ascii_lowercase()).as_deref() {
        None | Some("show") => {
            show_config(context);
            Ok(())
        }
        Some("set") if args.len() >= 3 => set_config_value(context, args[1], &args[2..].join(" ")),
        _ => Err(CommandError::InvalidArguments(format!("usage: {CONFIG_USAGE}"))),
    }
}

fn show_config(context: &ShellContext) {
    let config = &context.config;
    output::section("Configuration");
    output::row(format!("year-span : {}", config.year_span));
    let currency = if config.currency_symbol.is_empty() {
        "(none)"
    } else {
        config.currency_symbol.as_str()
    };
    output::row(format!("currency  : {currency}"));
    output::row(format!("data-file : {}", context.book_path.display()));
    output::row(format!("stored in : {}", context.config_manager.path().display()));
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let value = value.trim();
    match key.to_ascii_lowercase().as_str() {
        "year-span" => {
            let span: i32 = parse_number(value, "year span")?;
            if span < 0 {
                return Err(CommandError::InvalidArguments(
                    "year span cannot be negative".into(),
                ));
            }
            context.config.year_span = span;
            context.controller.set_year_span(span);
        }
        "currency" => {
            context.config.currency_symbol = value.to_string();
        }
        "data-file" => {
            context.config.data_file = match value {
                "" | "default" => None,
                path => Some(PathBuf::from(path)),
            };
            context.book_path = context
                .config
                .book_path_in(context.config_manager.base_dir());
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown setting `{other}`; expected year-span, currency or data-file"
            )))
        }
    }
    context.config_manager.save(&context.config)?;
    tracing::info!(key, value, "configuration updated");
    output::success(format!("`{key}` set."));
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cli::core::process_script;
    use crate::config::ConfigManager;
    use tempfile::TempDir;

    #[test]
    fn settings_are_persisted() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let app = process_script(
            manager,
            &["config set currency EUR", "config set year-span 5"],
        )
        .unwrap();

        let reloaded = ConfigManager::with_base_dir(dir.path().to_path_buf())
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(reloaded.currency_symbol, "EUR");
        assert_eq!(reloaded.year_span, 5);
        assert_eq!(app.config, reloaded);
    }

    #[test]
    fn negative_spans_are_rejected() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let app = process_script(manager, &["config set year-span -1"]).unwrap();
        assert_eq!(app.config.year_span, crate::core::dates::DEFAULT_YEAR_SPAN);
    }
}
