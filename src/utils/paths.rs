use dirs::home_dir;
use std::{
    env,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".balance_core";
const CONFIG_FILE: &str = "config.json";
const BOOK_FILE: &str = "book.json";

/// Returns the application-specific data directory, defaulting to `~/.balance_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("BALANCE_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Default location of the shell's client and invoice book.
pub fn book_file_in(base: &Path) -> PathBuf {
    base.join(BOOK_FILE)
}
