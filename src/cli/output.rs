use colored::Colorize;
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::RwLock;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
    /// The aggregated revenue label of the active scope.
    Revenue,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OutputPreferences {
    /// No ANSI styling; used for scripts and `NO_COLOR` terminals.
    pub plain: bool,
    pub quiet: bool,
}

static PREFERENCES: Lazy<RwLock<OutputPreferences>> =
    Lazy::new(|| RwLock::new(OutputPreferences::default()));

pub fn set_preferences(prefs: OutputPreferences) {
    if let Ok(mut guard) = PREFERENCES.write() {
        *guard = prefs;
    }
}

fn preferences() -> OutputPreferences {
    PREFERENCES
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn should_skip(kind: MessageKind, prefs: &OutputPreferences) -> bool {
    prefs.quiet && matches!(kind, MessageKind::Hint | MessageKind::Section)
}

fn build_label(kind: MessageKind) -> (&'static str, &'static str) {
    match kind {
        MessageKind::Info => ("INFO", "[i]"),
        MessageKind::Success => ("SUCCESS", "[ok]"),
        MessageKind::Warning => ("WARNING", "[!]"),
        MessageKind::Error => ("ERROR", "[x]"),
        MessageKind::Hint => ("HINT", "[?]"),
        MessageKind::Section => ("INFO", ""),
        MessageKind::Revenue => ("REVENUE", "[=]"),
    }
}

fn apply_style(kind: MessageKind, message: impl fmt::Display, prefs: &OutputPreferences) -> String {
    let text = message.to_string();

    let formatted = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        _ => {
            let (label, icon) = build_label(kind);
            format!("{label}: {icon} {text}")
        }
    };

    if prefs.plain {
        return formatted;
    }

    match kind {
        MessageKind::Success => formatted.bright_green().to_string(),
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::Error => formatted.bright_red().to_string(),
        MessageKind::Hint => formatted.bright_cyan().to_string(),
        MessageKind::Section => formatted.bold().to_string(),
        MessageKind::Revenue => formatted.bright_blue().bold().to_string(),
        MessageKind::Info => formatted,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let prefs = preferences();
    if should_skip(kind, &prefs) {
        return;
    }
    let formatted = apply_style(kind, message, &prefs);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn revenue(label: impl fmt::Display) {
    print(MessageKind::Revenue, label);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Prints an indented line without a label, for list rows.
pub fn row(text: impl fmt::Display) {
    println!("  {}", text);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_output_keeps_label_and_icon() {
        let prefs = OutputPreferences {
            plain: true,
            quiet: false,
        };
        assert_eq!(
            apply_style(MessageKind::Success, "saved", &prefs),
            "SUCCESS: [ok] saved"
        );
        assert_eq!(apply_style(MessageKind::Section, " Years ", &prefs), "=== Years ===");
        assert_eq!(
            apply_style(MessageKind::Revenue, "total revenue for 2019 is 1.00", &prefs),
            "REVENUE: [=] total revenue for 2019 is 1.00"
        );
    }

    #[test]
    fn quiet_mode_drops_hints_only() {
        let prefs = OutputPreferences {
            plain: true,
            quiet: true,
        };
        assert!(should_skip(MessageKind::Hint, &prefs));
        assert!(!should_skip(MessageKind::Error, &prefs));
        assert!(!should_skip(MessageKind::Revenue, &prefs));
    }
}
