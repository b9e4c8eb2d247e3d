//! `balance_cli`: a line-oriented shell over [`crate::core::BalanceController`].

pub mod commands;
pub mod core;
pub mod help;
pub mod output;
mod shell;
pub mod shell_context;

pub use shell::run_cli;
