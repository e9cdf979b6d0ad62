use clap::{Parser, Subcommand};

mod commands;
mod logger;

#[derive(Parser)]
#[command(name = "prospect", version, about = "Prospect CLI -- simulated discovery sessions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a live session on the wall clock
    Run(commands::session::RunArgs),
    /// Run a session on a virtual clock and print the outcome
    Simulate(commands::session::SimulateArgs),
    /// List the category catalog
    Categories {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let config = prospect_core::Config::load_or_default();
    logger::init_logging(&config.log.level);

    let result = match cli.command {
        Commands::Run(args) => commands::session::run(args, config),
        Commands::Simulate(args) => commands::session::simulate(args, config),
        Commands::Categories { json } => commands::categories::run(json),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
