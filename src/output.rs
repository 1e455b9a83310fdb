//! User-facing console lines, colored only when stdout is a TTY.
//! Log records go through tracing; these are for the final word to the user.

use owo_colors::OwoColorize;

use crate::archive::{EntryOutcome, Summary};

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Final report: one line of counts, then each failure on its own line.
pub fn print_summary(summary: &Summary) {
    if summary.outcomes.is_empty() && !summary.cancelled {
        print_info("Nothing to archive.");
        return;
    }
    if summary.cancelled {
        print_warn(&format!("Stopped early: {summary}"));
    } else if summary.failed() > 0 {
        print_warn(&format!("Finished with failures: {summary}"));
    } else {
        print_success(&format!("Archived: {summary}"));
    }
    for failure in summary.failures() {
        if let EntryOutcome::Failed { source, error, .. } = failure {
            print_error(&format!("{}: {}", source.display(), error));
        }
    }
}
