mod cli;
mod commands;
mod table;

use std::process::ExitCode;

use clap::Parser;
use gostop_backend::telemetry;
use tracing::error;

use crate::cli::Cli;
use crate::commands::LedgerSession;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    telemetry::init_cli_tracing(cli.verbose);

    let session = match LedgerSession::open(cli.env.into(), cli.db.into()).await {
        Ok(session) => session,
        Err(e) => {
            error!(error = %e, "could not open ledger");
            eprintln!("gostop-ledger: {e}");
            return ExitCode::FAILURE;
        }
    };

    match session.run(cli.command).await {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("gostop-ledger: {e}");
            ExitCode::FAILURE
        }
    }
}
