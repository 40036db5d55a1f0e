use crate::report::{
    run_compare, run_import, run_payload, run_score, run_validate, CompareArgs, ImportArgs,
    RunArgs, ScoreArgs, ValidateArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use org_realign::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Organizational Realignment",
    about = "Score organizational assessments and compare restructuring scenarios",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run the algorithm suite over an assessment JSON file
    Score(ScoreArgs),
    /// Check an assessment JSON file for data-quality problems
    Validate(ValidateArgs),
    /// Compare a baseline and a proposed organization
    Compare(CompareArgs),
    /// Convert position and org-unit CSV exports into an organization chart
    ImportPositions(ImportArgs),
    /// Run the span-of-control and culture checks over a payload file
    Run(RunArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Validate(args) => run_validate(args),
        Command::Compare(args) => run_compare(args),
        Command::ImportPositions(args) => run_import(args),
        Command::Run(args) => run_payload(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["org-realign-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn import_positions_accepts_optional_org_units() {
        let cli = Cli::try_parse_from([
            "org-realign-api",
            "import-positions",
            "--positions",
            "positions.csv",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::ImportPositions(args)) => assert!(args.org_units.is_none()),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn compare_requires_both_snapshots() {
        let result = Cli::try_parse_from(["org-realign-api", "compare", "--baseline", "a.json"]);
        assert!(result.is_err());
    }
}
