use std::io;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use clue_cli::config::GameConfig;
use clue_cli::console::ConsoleTable;
use clue_cli::logging::init_logging;
use clue_core::AppInfo;
use clue_core::game::{GameEnd, GameState};

/// Command-line Cluedo for a shared terminal, with optional deduction agents.
#[derive(Debug, Parser)]
#[command(name = "clue", author, version, about = "Command-line Cluedo with deduction agents")]
struct Cli {
    /// Path to a YAML table configuration.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the number of players (2-6).
    #[arg(long, value_name = "COUNT")]
    players: Option<usize>,

    /// Seat (1-based) played by an agent; repeat for several seats.
    #[arg(long = "agent", value_name = "SEAT")]
    agents: Vec<u8>,

    /// Override the RNG seed for the envelope, the deal, and the dice.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Stop after this many full rounds without a winner.
    #[arg(long, value_name = "ROUNDS")]
    max_rounds: Option<u32>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Exit after validating the configuration (no game is played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_path(path)?,
        None => GameConfig::default(),
    };

    if let Some(players) = cli.players {
        config.players = players;
    }

    if !cli.agents.is_empty() {
        config.agents = Some(cli.agents);
    }

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    if let Some(max_rounds) = cli.max_rounds {
        config.max_rounds = Some(max_rounds);
    }

    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    config.validate()?;

    let _logging_guard = init_logging(&config.logging)?;
    let roles = config.roles();
    let mut game = match config.seed {
        Some(seed) => GameState::with_seed(&roles, seed)?,
        None => GameState::new(&roles)?,
    };
    let agent_count = game.players().iter().filter(|player| player.is_agent()).count();
    info!(
        version = AppInfo::version(),
        players = roles.len(),
        agents = agent_count,
        seed = game.seed(),
        "table ready"
    );

    println!("=== {} {} ===", AppInfo::name(), AppInfo::version());
    println!(
        "{} players ({agent_count} agent{}), seed {}",
        roles.len(),
        if agent_count == 1 { "" } else { "s" },
        game.seed()
    );

    if cli.validate_only {
        println!("Validation-only mode: game not started.");
        return Ok(());
    }

    let mut table = ConsoleTable::new(io::stdin().lock(), io::stdout());
    table.print_setup(&game).context("writing table setup")?;

    // Ctrl-C keeps the default handler and terminates without a summary.
    // Closing stdin (Ctrl-D) ends the game and still prints the envelope.
    let never_cancelled = AtomicBool::new(false);
    let summary = game.run(&mut table, config.max_rounds, &never_cancelled)?;

    match (summary.ended_by, summary.winner) {
        (GameEnd::Solved, Some(winner)) => {
            let name = game.player(winner).map(|player| player.name()).unwrap_or("?");
            println!("\nGAME OVER. Winner: {name} ({winner})");
        }
        (GameEnd::AllEliminated, _) => println!("\nGAME OVER. Every player was eliminated."),
        (GameEnd::RoundLimit, _) => {
            println!("\nGAME OVER. Round limit of {} reached.", summary.rounds)
        }
        (GameEnd::Interrupted, _) => {
            println!("\nGame ended by user before anyone solved the case.")
        }
        (GameEnd::Solved, None) => println!("\nGAME OVER."),
    }
    println!("The envelope held: {}.", game.solution());

    Ok(())
}
