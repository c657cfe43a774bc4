//! Entry point for the `tourplan` command-line interface.
#![forbid(unsafe_code)]

use tourplan_cli::CliError;

fn main() {
    env_logger::init();
    match tourplan_cli::run() {
        Ok(()) => {}
        // Clap renders help, version and usage errors itself.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("tourplan: {err}");
            std::process::exit(1);
        }
    }
}
