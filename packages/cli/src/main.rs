#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Terminal front end for the Camden strategy deck.
//!
//! ```text
//! camden_cli top [--limit 20] [--data data.csv]
//! camden_cli commodities [--reveal]
//! camden_cli stations
//! camden_cli cycle
//! camden_cli check
//! camden_cli serve
//! ```
//!
//! Running `camden_cli` with no subcommand enters an interactive menu that
//! keeps its own reveal toggle for the commodity table.

mod render;

use std::path::PathBuf;

use camden_commodity::{RevealState, table_for};
use camden_config::DeckConfig;
use camden_incident::load::load_incidents;
use camden_incident::ranking::rank_top_locations;
use clap::{Parser, Subcommand};
use dialoguer::Select;

#[derive(Parser)]
#[command(name = "camden_cli", about = "Camden public safety strategy deck")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the locations with the most incidents
    Top {
        /// Number of locations to keep (defaults to the configured value)
        #[arg(long)]
        limit: Option<usize>,
        /// Incident table to read instead of the configured one
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// Show legal imports against the illicit drug market
    Commodities {
        /// Include the illicit market row
        #[arg(long)]
        reveal: bool,
    },
    /// Show the transport hub facts
    Stations,
    /// Print the supply cycle diagram as Graphviz DOT
    Cycle,
    /// Check that the data file and slide images exist
    Check,
    /// Start the API server
    Serve,
}

/// Interactive menu entries.
#[derive(Clone, Copy)]
enum Action {
    Top,
    Commodities,
    Reveal,
    Reset,
    Stations,
    Cycle,
    Check,
    Serve,
    Exit,
}

impl Action {
    const ALL: &[Self] = &[
        Self::Top,
        Self::Commodities,
        Self::Reveal,
        Self::Reset,
        Self::Stations,
        Self::Cycle,
        Self::Check,
        Self::Serve,
        Self::Exit,
    ];

    #[must_use]
    const fn label(self) -> &'static str {
        match self {
            Self::Top => "Top incident locations",
            Self::Commodities => "Commodity comparison",
            Self::Reveal => "Reveal illicit market",
            Self::Reset => "Hide illicit market",
            Self::Stations => "Transport hubs",
            Self::Cycle => "Supply cycle (DOT)",
            Self::Check => "Check assets",
            Self::Serve => "Start server",
            Self::Exit => "Exit",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    camden_cli_utils::init_logger();
    let cli = Cli::parse();
    let config = DeckConfig::from_env()?;

    let Some(command) = cli.command else {
        return interactive(config).await;
    };

    match command {
        Commands::Top { limit, data } => {
            let path = data.unwrap_or_else(|| config.data_path.clone());
            print_top(&path, limit.unwrap_or(config.top_n))?;
        }
        Commands::Commodities { reveal } => {
            let mut state = RevealState::new();
            if reveal {
                state.reveal();
            }
            print_commodities(state);
        }
        Commands::Stations => {
            print!("{}", render::stations(&camden_deck::stations::stations()));
        }
        Commands::Cycle => {
            print!("{}", camden_deck::cycle::supply_cycle().to_dot());
        }
        Commands::Check => {
            let report = camden_assets::check_integrity(
                std::slice::from_ref(&config.data_path),
                &config.image_paths(),
            );
            print!("{}", render::integrity(&report));
            report.ensure_data()?;
        }
        Commands::Serve => serve(config, false).await?,
    }

    Ok(())
}

async fn interactive(config: DeckConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("Camden Strategy Deck");
    println!();

    let labels: Vec<&str> = Action::ALL.iter().map(|a| a.label()).collect();
    let mut reveal = RevealState::new();

    loop {
        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        match Action::ALL[idx] {
            Action::Top => {
                if let Err(e) = print_top(&config.data_path, config.top_n) {
                    log::error!("Could not load incident data: {e}");
                }
            }
            Action::Commodities => print_commodities(reveal),
            Action::Reveal => {
                reveal.reveal();
                print_commodities(reveal);
            }
            Action::Reset => {
                reveal.reset();
                print_commodities(reveal);
            }
            Action::Stations => {
                print!("{}", render::stations(&camden_deck::stations::stations()));
            }
            Action::Cycle => print!("{}", camden_deck::cycle::supply_cycle().to_dot()),
            Action::Check => {
                let report = camden_assets::check_integrity(
                    std::slice::from_ref(&config.data_path),
                    &config.image_paths(),
                );
                print!("{}", render::integrity(&report));
            }
            Action::Serve => return serve(config, true).await,
            Action::Exit => return Ok(()),
        }

        println!();
    }
}

fn print_top(path: &std::path::Path, limit: usize) -> Result<(), camden_incident::IncidentError> {
    let records = load_incidents(path)?;
    let ranked = rank_top_locations(&records, limit);
    print!("{}", render::top_locations(&ranked));
    Ok(())
}

fn print_commodities(state: RevealState) {
    let rows = table_for(state);
    print!("{}", render::commodities(&rows, state.is_revealed()));
}

async fn serve(config: DeckConfig, prompt: bool) -> Result<(), Box<dyn std::error::Error>> {
    // The server uses actix-web's runtime, so we need to run it
    // in a blocking task to avoid nesting tokio runtimes.
    tokio::task::spawn_blocking(move || {
        let system = actix_web::rt::System::new();
        if prompt {
            system.block_on(camden_server::interactive::run(config))
        } else {
            system.block_on(camden_server::run_server(config))
        }
    })
    .await??;

    Ok(())
}
