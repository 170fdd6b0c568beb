use bulma_css_vars::cli::{self, Cli};
use bulma_css_vars::logger::{init_logger, level_for_verbosity};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logger(level_for_verbosity(cli.verbose)) {
        eprintln!("failed to initialize logging: {}", e);
    }

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[Bulma CSS Vars] {}", e);
            ExitCode::FAILURE
        }
    }
}
