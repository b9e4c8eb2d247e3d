use std::path::PathBuf;

use crate::config::{Config, ConfigManager};
use crate::core::services::InMemoryBook;
use crate::core::BalanceController;
use crate::view::ViewSnapshot;

use super::commands::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub controller: BalanceController<InMemoryBook>,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub book_path: PathBuf,
    pub(crate) last_snapshot: ViewSnapshot,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn status(&self) -> String {
        let view = self.controller.view();
        format!(
            "ShellContext {{ mode: {:?}, running: {}, last_command: {:?}, scope: {:?} }}",
            self.mode,
            self.running,
            self.last_command,
            view.scope()
        )
    }
}
