use std::process::ExitCode;

use modinit::ui::output;

fn main() -> ExitCode {
    match modinit::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
