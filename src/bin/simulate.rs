//! Monte Carlo blackjack simulation.

use std::io;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use twentyone::{
    DEALER_STANDS_ON, Outcome, SimulationOptions, SimulationReport, Simulator,
};

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Aligned text with a bar per outcome
    Table,
    /// JSON for a charting or reporting tool
    Json,
}

#[derive(Parser)]
#[command(
    name = "simulate",
    about = "Play many automated blackjack rounds and tally the outcomes"
)]
struct Args {
    /// Number of rounds to play
    #[arg(long, short = 'n', default_value_t = 1000)]
    rounds: u32,

    /// Seed for the random source
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Score at which the automated player stands
    #[arg(long, default_value_t = DEALER_STANDS_ON)]
    stand_on: u8,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Run rounds on all cores (requires the `parallel` feature)
    #[arg(long)]
    parallel: bool,
}

/// Tally keyed the way the chart labels its bars.
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct OutcomeCounts {
    player: u32,
    computer: u32,
    tie: u32,
}

#[derive(Serialize)]
struct JsonReport {
    rounds: u32,
    seed: u64,
    player_stands_on: u8,
    results: OutcomeCounts,
    player_naturals: u32,
    dealer_naturals: u32,
    player_busts: u32,
    dealer_busts: u32,
}

impl JsonReport {
    fn new(options: &SimulationOptions, report: &SimulationReport) -> Self {
        Self {
            rounds: report.rounds(),
            seed: options.seed,
            player_stands_on: options.player_stands_on,
            results: OutcomeCounts {
                player: report.tally.count(Outcome::PlayerWin),
                computer: report.tally.count(Outcome::DealerWin),
                tie: report.tally.count(Outcome::Tie),
            },
            player_naturals: report.player_naturals,
            dealer_naturals: report.dealer_naturals,
            player_busts: report.player_busts,
            dealer_busts: report.dealer_busts,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let options = SimulationOptions::default()
        .with_rounds(args.rounds)
        .with_seed(args.seed)
        .with_player_stands_on(args.stand_on);
    let simulator = Simulator::new(options);

    let report = match run(&simulator, args.parallel) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(rounds = report.rounds(), "simulation finished");

    match args.format {
        Format::Table => print_table(&options, &report),
        Format::Json => match serde_json::to_string_pretty(&JsonReport::new(&options, &report)) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        },
    }
    ExitCode::SUCCESS
}

#[cfg(feature = "parallel")]
fn run(simulator: &Simulator, parallel: bool) -> Result<SimulationReport, twentyone::RoundError> {
    if parallel {
        simulator.run_parallel()
    } else {
        simulator.run()
    }
}

#[cfg(not(feature = "parallel"))]
fn run(simulator: &Simulator, parallel: bool) -> Result<SimulationReport, twentyone::RoundError> {
    if parallel {
        tracing::warn!("built without the `parallel` feature; running sequentially");
    }
    simulator.run()
}

fn print_table(options: &SimulationOptions, report: &SimulationReport) {
    const WIDTH: usize = 60;
    const TEXT_WIDTH: usize = 24;
    const BAR_WIDTH: usize = 30;

    println!("{}", "-".repeat(WIDTH));
    println!(
        "{:-^WIDTH$}",
        format!(" results after {} simulations ", report.rounds())
    );
    for (outcome, count) in report.tally.iter() {
        let share = report.tally.share(outcome);
        let bar = "#".repeat((share * BAR_WIDTH as f64).round() as usize);
        let label = match outcome {
            Outcome::PlayerWin => "Player wins",
            Outcome::DealerWin => "Computer wins",
            Outcome::Tie => "Ties",
        };
        println!(
            "{label:<TEXT_WIDTH$}{count:>8} {:>6.1}%  {bar}",
            share * 100.0
        );
    }
    println!("{}", "-".repeat(WIDTH));
    println!("{:<TEXT_WIDTH$}{:>8}", "player naturals", report.player_naturals);
    println!("{:<TEXT_WIDTH$}{:>8}", "dealer naturals", report.dealer_naturals);
    println!("{:<TEXT_WIDTH$}{:>8}", "player busts", report.player_busts);
    println!("{:<TEXT_WIDTH$}{:>8}", "dealer busts", report.dealer_busts);
    println!(
        "{:<TEXT_WIDTH$}{:>8}",
        "player stands on", options.player_stands_on
    );
    println!("{:<TEXT_WIDTH$}{:>8}", "seed", options.seed);
    println!("{}", "-".repeat(WIDTH));
}
