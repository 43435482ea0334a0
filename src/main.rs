//! prompt-launch binary entry point.

use std::process::ExitCode;

use prompt_launcher::cli;
use prompt_launcher::ui::output;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
