use std::process::ExitCode;

use archive_manager::errors::{ArchiveError, EXIT_FATAL, EXIT_UNCAUGHT};
use archive_manager::output as out;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = archive_manager::cli::parse();
    match app::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            if e.downcast_ref::<ArchiveError>().is_some() {
                ExitCode::from(EXIT_FATAL)
            } else {
                ExitCode::from(EXIT_UNCAUGHT)
            }
        }
    }
}
