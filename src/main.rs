use clap::Parser;
use docs_explorer::{Cli, exit_code_for, logging, run_with};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run_with(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = exit_code_for(&err);
            // Source failures were already rendered for the user.
            if code == 1 {
                eprintln!("error: {err:#}");
            }
            ExitCode::from(code)
        }
    }
}
