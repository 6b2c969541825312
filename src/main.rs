// Sat Oct 17 2026 - Alex

use colored::Colorize;
use padding_finder::engine::PipelineError;
use padding_finder::ui::cli;

fn main() {
    if let Err(e) = cli::run() {
        match e.downcast_ref::<PipelineError>() {
            Some(err) if err.is_missing_debug_info() => eprintln!("{}", err),
            _ => eprintln!("{} {:#}", "[!]".red(), e),
        }
        std::process::exit(1);
    }
}
