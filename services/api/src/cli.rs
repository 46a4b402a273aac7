use crate::commands::{
    run_average, run_eligible, run_list, run_match, run_required, AverageArgs, EligibleArgs,
    ListArgs, MatchArgs, RequiredArgs,
};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use afaqi::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Afaqi Explorer",
    about = "Match Moroccan bac students with post-bac schools and simulate bac averages",
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
    /// Rank schools for a student profile and optionally export the report
    Match(MatchArgs),
    /// Bac grade simulator
    Simulate {
        #[command(subcommand)]
        command: SimulateCommand,
    },
    /// Browse the school catalog
    Schools {
        #[command(subcommand)]
        command: SchoolsCommand,
    },
    /// Walk through matching, simulation and recommendations on sample data
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum SimulateCommand {
    /// Compute the final bac average from the three exam grades
    Average(AverageArgs),
    /// Solve for the national exam grade needed to reach a target average
    Required(RequiredArgs),
}

#[derive(Subcommand, Debug)]
enum SchoolsCommand {
    /// List schools open to a given bac average
    Eligible(EligibleArgs),
    /// Filter the school directory
    List(ListArgs),
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
        Command::Match(args) => run_match(args),
        Command::Simulate {
            command: SimulateCommand::Average(args),
        } => run_average(args),
        Command::Simulate {
            command: SimulateCommand::Required(args),
        } => run_required(args),
        Command::Schools {
            command: SchoolsCommand::Eligible(args),
        } => run_eligible(args),
        Command::Schools {
            command: SchoolsCommand::List(args),
        } => run_list(args),
        Command::Demo(args) => run_demo(args),
    }
}
