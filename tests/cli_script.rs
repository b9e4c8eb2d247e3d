mod common;

use assert_cmd::Command;
use chrono::{Datelike, Local};
use predicates::str::contains;

fn balance_cli(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("balance_cli").unwrap();
    cmd.env("BALANCE_CORE_CLI_SCRIPT", "1")
        .env("BALANCE_CORE_HOME", home)
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn script_mode_runs_basic_flow() {
    let home = common::temp_home();
    let year = Local::now().year();
    let book = home.join("saved.json");
    let input = format!(
        "add-client acme\nadd-invoice acme 1 1 {year} 10.20\ninvoices\nsave {}\nexit\n",
        book.display()
    );

    balance_cli(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Client `acme` added."))
        .stdout(contains(format!(
            "total revenue of invoices for client acme in {year} is 10.20"
        )));

    let json = std::fs::read_to_string(book).unwrap();
    assert!(json.contains("\"acme\""));
}

#[test]
fn saved_book_is_reloaded_on_start() {
    let home = common::temp_home();
    let year = Local::now().year();
    let first = format!("add-client acme\nadd-invoice acme 1 1 {year} 3\nsave\n");
    balance_cli(&home).write_stdin(first).assert().success();

    balance_cli(&home)
        .write_stdin("show\n")
        .assert()
        .success()
        .stdout(contains(format!("total revenue for {year} is 3.00")));
}

#[test]
fn invalid_dates_are_reported() {
    let home = common::temp_home();
    balance_cli(&home)
        .write_stdin("add-client acme\nadd-invoice acme 31 2 2020 5\n")
        .assert()
        .success()
        .stdout(contains("the date 31/2/2020 is not valid"));
}

#[test]
fn unknown_commands_get_a_suggestion() {
    let home = common::temp_home();
    balance_cli(&home)
        .write_stdin("clinets\n")
        .assert()
        .success()
        .stdout(contains("Suggestion: `clients`?"));
}
