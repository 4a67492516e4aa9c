use crate::commands::{run_insight, run_predict, run_regions, InsightArgs, PredictArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use price_insight::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "London Price Insight",
    about = "Serve and explore synthetic London house-price predictions from the command line",
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
    /// Generate a synthetic price prediction for a single property
    Predict(PredictArgs),
    /// Print the price outlook summary for a postcode district
    Insight(InsightArgs),
    /// List the outcode reference table
    Regions,
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
        Command::Predict(args) => run_predict(args).await,
        Command::Insight(args) => run_insight(args),
        Command::Regions => run_regions(),
    }
}
