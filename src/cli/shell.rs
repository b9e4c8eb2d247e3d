use std::{
    borrow::Cow,
    fmt,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use crate::cli::core::{CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output;
use crate::errors::CliError;

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os("BALANCE_CORE_CLI_SCRIPT").is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    let mut helper = CommandHelper::new(context.command_names());
    helper.refresh(context);
    editor.set_helper(Some(helper));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    let label = context.decorate_label(context.controller.view().revenue_label());
    if !label.is_empty() {
        output::revenue(label);
    }

    loop {
        if !context.running {
            break;
        }
        let prompt = context.prompt();
        let line = editor.readline(&prompt);

        match line {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                editor.add_history_entry(trimmed).ok();

                let outcome = handle_line(context, trimmed);
                if let Some(helper) = editor.helper_mut() {
                    helper.refresh(context);
                }
                match outcome {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err)?,
                }
            }
            Err(ReadlineError::Interrupted) => {
                output::hint("Type `exit` or press Ctrl-D to leave the shell.");
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if !context.running {
            break;
        }
        let line = line?;
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(&err.message);
            return Ok(LoopControl::Continue);
        }
    };

    if tokens.is_empty() {
        return Ok(LoopControl::Continue);
    }

    let raw = &tokens[0];
    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

    context.last_command = Some(line.trim().to_string());
    tracing::debug!(command = %command, "dispatching");

    context.begin_command();
    let outcome = context.dispatch(&command, raw, &args);
    context.render_changes();
    tracing::debug!(status = %context.status(), "command finished");

    match outcome {
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(LoopControl::Exit)
        }
        other => other,
    }
}

/// Line-editor helper: completes command words, then client identifiers or
/// years depending on the command being typed.
struct CommandHelper {
    commands: Vec<String>,
    clients: Vec<String>,
    years: Vec<String>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names
            .into_iter()
            .map(|name| name.to_ascii_lowercase())
            .collect();
        commands.sort();
        commands.dedup();
        Self {
            commands,
            clients: Vec::new(),
            years: Vec::new(),
        }
    }

    fn refresh(&mut self, context: &ShellContext) {
        let view = context.controller.view();
        self.clients = view
            .clients()
            .iter()
            .map(|client| client.identifier().to_string())
            .collect();
        self.years = view.years().iter().map(ToString::to_string).collect();
    }

    fn argument_candidates(&self, command: &str, position: usize) -> &[String] {
        match (command, position) {
            ("remove-client" | "select-client" | "add-invoice", 0) => &self.clients,
            ("select-year", 0) | ("add-invoice", 3) => &self.years,
            _ => &[],
        }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let needle = &prefix[start..];
        let words: Vec<&str> = prefix[..start].split_whitespace().collect();

        let pool: &[String] = match words.split_first() {
            None => &self.commands,
            Some((command, args)) => {
                self.argument_candidates(&command.to_ascii_lowercase(), args.len())
            }
        };
        let candidates = pool
            .iter()
            .filter(|candidate| {
                candidate
                    .to_ascii_lowercase()
                    .starts_with(&needle.to_ascii_lowercase())
            })
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate.clone(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        match parse_command_line(ctx.input()) {
            Ok(_) => Ok(ValidationResult::Valid(None)),
            Err(err) => Ok(ValidationResult::Invalid(Some(format!("  ({err})")))),
        }
    }
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_names_stay_one_argument() {
        let tokens = parse_command_line("add-client \"Acme Corp\"").unwrap();
        assert_eq!(tokens, vec!["add-client", "Acme Corp"]);
    }

    #[test]
    fn unbalanced_quotes_are_rejected() {
        assert!(parse_command_line("add-client \"Acme").is_err());
    }

    #[test]
    fn completion_candidates_are_sorted_and_unique() {
        let helper = CommandHelper::new(vec!["years", "add-client", "years"]);
        assert_eq!(helper.commands, vec!["add-client", "years"]);
    }

    #[test]
    fn arguments_complete_from_the_roster_and_years() {
        let mut helper = CommandHelper::new(vec!["select-client", "add-invoice"]);
        helper.clients = vec!["acme".into()];
        helper.years = vec!["2019".into()];
        assert_eq!(helper.argument_candidates("select-client", 0), ["acme"]);
        assert_eq!(helper.argument_candidates("add-invoice", 3), ["2019"]);
        assert!(helper.argument_candidates("add-invoice", 1).is_empty());
        assert!(helper.argument_candidates("clients", 0).is_empty());
    }
}
