use log::error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match jotters::ui::io::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
