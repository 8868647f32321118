//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use intermodal_cli::CliError;

fn main() {
    match intermodal_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("intermodal: {err}");
            std::process::exit(1);
        }
    }
}
