mod common;

use assert_cmd::Command;
use bill_query::utils::persistence::save_ledger_to_file;
use predicates::{prelude::*, str::contains};
use tempfile::TempDir;

fn ledger_file(temp: &TempDir) -> String {
    let path = temp.path().join("ledger.json");
    save_ledger_to_file(&common::fixture_ledger(), &path).unwrap();
    path.display().to_string()
}

fn cli(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bill_query_cli").unwrap();
    cmd.env("BILL_QUERY_HOME", temp.path())
        .env("BILL_QUERY_NOW", "2024-05-20T12:00:00")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn parse_prints_parsed_query_json() {
    let temp = TempDir::new().unwrap();
    cli(&temp)
        .args(["parse", "超过100元的消费"])
        .assert()
        .success()
        .stdout(contains("\"operator\": \"greater_than\""));
}

#[test]
fn ask_renders_json_result() {
    let temp = TempDir::new().unwrap();
    let ledger = ledger_file(&temp);
    cli(&temp)
        .args(["ask", &ledger, "1", "星巴克花了多少", "--json"])
        .assert()
        .success()
        .stdout(contains("\"query_type\": \"merchant_amount\""))
        .stdout(contains("\"total_amount\": 77.0"));
}

#[test]
fn ask_renders_human_readable_result() {
    let temp = TempDir::new().unwrap();
    let ledger = ledger_file(&temp);
    cli(&temp)
        .args(["ask", &ledger, "1", "今天花了多少"])
        .assert()
        .success()
        .stdout(contains("时间段支出"))
        .stdout(contains("¥50.00"));
}

#[test]
fn shell_script_mode_answers_each_line() {
    let temp = TempDir::new().unwrap();
    let ledger = ledger_file(&temp);
    cli(&temp)
        .env("BILL_QUERY_CLI_SCRIPT", "1")
        .args(["shell", &ledger, "1"])
        .write_stdin("消费趋势\n对比\nexit\n花了多少钱\n")
        .assert()
        .success()
        .stdout(contains("消费趋势"))
        .stdout(contains("环比"))
        .stdout(contains("总支出").not());
}

#[test]
fn bad_arguments_exit_with_usage() {
    let temp = TempDir::new().unwrap();
    cli(&temp)
        .args(["ask", "ledger.json"])
        .assert()
        .code(1)
        .stderr(contains("Usage: bill_query_cli"));
}

#[test]
fn unreadable_ledger_fails() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.json").display().to_string();
    cli(&temp)
        .args(["ask", &missing, "1", "对比"])
        .assert()
        .code(1)
        .stderr(contains("IO error"));
}

#[test]
fn default_config_is_read_from_the_home_directory() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.json"),
        r#"{ "similarity_threshold": 0.99 }"#,
    )
    .unwrap();
    cli(&temp)
        .args(["parse", "对比上个月"])
        .assert()
        .success()
        .stdout(contains("\"intent\": \"unknown\""));
}

#[test]
fn plain_errors_carry_no_ansi_codes() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.json").display().to_string();
    cli(&temp)
        .env_remove("NO_COLOR")
        .args(["--plain", "ask", &missing, "1", "对比"])
        .assert()
        .code(1)
        .stderr(contains("ERROR: IO error"))
        .stderr(predicate::function(|stderr: &str| {
            stderr
                .lines()
                .filter(|line| line.contains("ERROR:"))
                .all(|line| line.starts_with("ERROR:") && !line.contains('\u{1b}'))
        }));
}
