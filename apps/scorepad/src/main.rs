//! Scorepad CLI - keeps score for a trick-guessing card game between invocations.
//!
//! Each command resumes the saved game, applies one step, and saves again.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use scorepad::domain::standings;
use scorepad::domain::state::Phase;
use scorepad::{AppError, Config, FileStore, GameFlow, SubmitOutcome};
use tracing::debug;

#[derive(Parser)]
#[command(name = "scorepad")]
#[command(about = "Score tracker for a trick-guessing card game")]
struct Cli {
    /// Saved-game file (overrides SCOREPAD_STORE_PATH)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start a new game, discarding any saved one
    New {
        /// Number of players (2-7)
        #[arg(short, long)]
        players: usize,

        /// Player names in seat order; blanks become "Player N"
        #[arg(long = "name")]
        names: Vec<String>,
    },
    /// Show the current round and totals
    Status,
    /// Enter every guess for the round, by seat, and lock them in
    Guess {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<i32>,
    },
    /// Enter every player's tricks won, by seat, and score the round
    Tricks {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<i32>,

        /// Accept a trick total that does not match the cards dealt
        #[arg(long)]
        force: bool,
    },
    /// Correct the tricks of a completed round
    Edit {
        /// Round number, starting at 1
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..=11))]
        round: u16,

        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<i32>,
    },
    /// Show every completed round
    History,
    /// Delete the saved game
    Reset,
}

/// Exit status when a round needs `--force` to be scored.
const NEEDS_CONFIRMATION: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config.with_store_path(cli.store.clone()),
        Err(e) => return fail(&e),
    };
    let mut log = config.log.clone();
    if cli.verbose {
        log.filter = "debug".to_string();
    }
    scorepad::telemetry::init_tracing(&log);
    debug!(store = %config.store_path.display(), "Configuration loaded");

    match run(cli.command, &config) {
        Ok(code) => code,
        Err(e) => fail(&e),
    }
}

fn fail(err: &AppError) -> ExitCode {
    eprintln!("error [{}]: {err}", err.code());
    ExitCode::FAILURE
}

fn run(command: Command, config: &Config) -> Result<ExitCode, AppError> {
    let mut flow = GameFlow::resume(FileStore::locked(&config.store_path)?)?;

    match command {
        Command::New { players, names } => {
            flow.restart(players, &names)?;
            print_status(&flow);
        }
        Command::Status => print_status(&flow),
        Command::Guess { values } => {
            for (player, value) in values.into_iter().enumerate() {
                flow.record_guess(player, value)?;
            }
            flow.submit_guesses()?;
            print_status(&flow);
        }
        Command::Tricks { values, force } => {
            for (player, value) in values.into_iter().enumerate() {
                flow.record_tricks(player, value)?;
            }
            match flow.submit_results(force)? {
                SubmitOutcome::Committed(record) => {
                    println!("Round {} scored.", record.round_index + 1);
                    print_status(&flow);
                }
                SubmitOutcome::NeedsConfirmation(warning) => {
                    let names = flow.game().map(|g| g.player_names.clone()).unwrap_or_default();
                    eprintln!("{}", warning.message(&names));
                    eprintln!("Nothing was scored. Re-run with --force to accept these totals.");
                    return Ok(ExitCode::from(NEEDS_CONFIRMATION));
                }
            }
        }
        Command::Edit { round, values } => {
            flow.begin_edit()?;
            flow.save_edit(usize::from(round) - 1, &values)?;
            println!("Round {round} updated; scores recalculated.");
            print_history(&flow);
        }
        Command::History => print_history(&flow),
        Command::Reset => {
            flow.new_game();
            println!("Saved game cleared.");
        }
    }

    if flow.last_save_failed() {
        eprintln!("warning: the game could not be saved; see the log for details");
    }
    Ok(ExitCode::SUCCESS)
}

fn print_status<S: scorepad::GameStore>(flow: &GameFlow<S>) {
    let (Some(game), Some(view)) = (flow.game(), flow.round_view()) else {
        println!("No game in progress. Start one with `scorepad new --players N`.");
        return;
    };

    if flow.phase() == Phase::GameOver {
        println!("Game over after {} rounds.", game.history().len());
    } else {
        println!(
            "Round {} of 11: {} cards, {} deals ({:?})",
            view.round_number,
            view.cards,
            game.player_name(view.dealer),
            flow.phase()
        );
    }

    println!("{:<4} {:<16} {:>5} {:>6} {:>6}", "seat", "player", "guess", "tricks", "total");
    for row in &view.rows {
        let dealer = if row.is_dealer { " (D)" } else { "" };
        println!(
            "{:<4} {:<16} {:>5} {:>6} {:>6}",
            row.player,
            format!("{}{dealer}", row.name),
            cell(row.guess),
            cell(row.tricks),
            row.total
        );
    }

    for warning in flow.warnings() {
        println!("! {}", warning.message(&game.player_names));
    }
    match standings::outcome_message(game).filter(|_| flow.outcome().is_some()) {
        Some(banner) => println!("{banner}"),
        None => println!("{}", standings::summary(game)),
    }
}

fn print_history<S: scorepad::GameStore>(flow: &GameFlow<S>) {
    let Some(game) = flow.game() else {
        println!("No game in progress.");
        return;
    };
    print!("{:<6} {:>5}", "round", "cards");
    for name in &game.player_names {
        print!(" {name:>14}");
    }
    println!();
    for row in flow.history_rows() {
        print!("{:<6} {:>5}", row.round_number, row.cards);
        for c in &row.cells {
            print!(" {c:>14}");
        }
        println!();
    }
    print!("{:<12}", "total");
    for score in game.scores() {
        print!(" {score:>14}");
    }
    println!();
    println!("{}", standings::summary(game));
}

fn cell(value: Option<u8>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
