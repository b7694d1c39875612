use std::io::{self, BufRead};

use rustyline::{error::ReadlineError, DefaultEditor};

use crate::cli::{output, render, CliError, OutputFormat};
use crate::core::BillQueryService;
use crate::domain::UserId;

const SCRIPT_ENV: &str = "BILL_QUERY_CLI_SCRIPT";
const PROMPT: &str = "bill> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// Interactive query loop. With `BILL_QUERY_CLI_SCRIPT` set, lines are read
/// from stdin without line editing.
pub fn run_shell(
    service: &BillQueryService,
    user_id: UserId,
    format: OutputFormat,
) -> Result<(), CliError> {
    if std::env::var_os(SCRIPT_ENV).is_some() {
        run_script(service, user_id, format)
    } else {
        run_interactive(service, user_id, format)
    }
}

fn run_interactive(
    service: &BillQueryService,
    user_id: UserId,
    format: OutputFormat,
) -> Result<(), CliError> {
    let mut editor = DefaultEditor::new()?;
    output::info("输入问题查询账单, exit 退出");

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                if handle_line(service, user_id, format, trimmed)? == LoopControl::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                output::info("再见");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(
    service: &BillQueryService,
    user_id: UserId,
    format: OutputFormat,
) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if handle_line(service, user_id, format, trimmed)? == LoopControl::Exit {
            break;
        }
    }
    Ok(())
}

/// Query failures are reported and the loop keeps going; only output
/// failures abort it.
pub(crate) fn handle_line(
    service: &BillQueryService,
    user_id: UserId,
    format: OutputFormat,
    line: &str,
) -> Result<LoopControl, CliError> {
    if matches!(line.to_lowercase().as_str(), "exit" | "quit") {
        return Ok(LoopControl::Exit);
    }

    match service.ask(line, user_id) {
        Ok((_, result)) => match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            OutputFormat::Pretty => render::print_result(&result),
        },
        Err(err) => output::error(err),
    }
    Ok(LoopControl::Continue)
}
