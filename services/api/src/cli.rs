use crate::batch::{run_demo, run_evaluate, run_hr_update, DemoArgs, EvaluateArgs, HrUpdateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use grant_eligibility::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Grant Eligibility",
    about = "Determine which research grants each researcher on a roster may apply for",
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
    /// Evaluate a researchers roster CSV and write it back with eligibility columns
    Evaluate(EvaluateArgs),
    /// Refresh the researchers roster from a new HR staff export
    HrUpdate(HrUpdateArgs),
    /// Evaluate a generated roster with one PhD defense per day
    Demo(DemoArgs),
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
        Command::Evaluate(args) => run_evaluate(args),
        Command::HrUpdate(args) => run_hr_update(args),
        Command::Demo(args) => run_demo(args),
    }
}
