use crate::demo::{run_demo, run_rate, run_score, DemoArgs, RateArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use trust_engine::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Trust Engine",
    about = "Score peer-to-peer loan applicants and serve the trust scoring API",
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
    /// Score an evidence payload read from a JSON file
    Score(ScoreArgs),
    /// Look up the advisory interest rate for a trust score
    Rate(RateArgs),
    /// Score the bundled demo applicants and print a portfolio summary
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
        Command::Score(args) => run_score(args),
        Command::Rate(args) => run_rate(args),
        Command::Demo(args) => run_demo(args),
    }
}
