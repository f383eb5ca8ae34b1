use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use sweeper_core::{CellCount, Coord, Difficulty, GameConfig, SaveState};

use game::GameSession;
use render::BoardView;
use settings::Settings;
use storage::Storage;

mod game;
mod render;
mod settings;
mod storage;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Directory holding the saved game and settings
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Force a seed instead of random
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a new game, replacing the saved one
    New(NewArgs),
    /// Reveal the cell at ROW COL
    Reveal { row: Coord, col: Coord },
    /// Toggle a flag on the cell at ROW COL
    Flag { row: Coord, col: Coord },
    /// Advance the game clock
    Tick {
        #[arg(default_value_t = 1)]
        seconds: u32,
    },
    /// Print the current board
    Show,
    /// Throw away the saved game and start over with the current settings
    Reset,
}

#[derive(clap::Args, Debug)]
struct NewArgs {
    /// Board preset: beginner, intermediate or expert
    #[arg(short, long, conflicts_with_all = ["rows", "cols", "mines"])]
    difficulty: Option<Difficulty>,

    #[arg(long, requires_all = ["cols", "mines"])]
    rows: Option<Coord>,

    #[arg(long, requires_all = ["rows", "mines"])]
    cols: Option<Coord>,

    #[arg(long, requires_all = ["rows", "cols"])]
    mines: Option<CellCount>,
}

impl NewArgs {
    fn game_config(&self, settings: &Settings) -> sweeper_core::Result<GameConfig> {
        match (self.difficulty, self.rows, self.cols, self.mines) {
            (Some(difficulty), ..) => Ok(difficulty.game_config()),
            (None, Some(rows), Some(cols), Some(mines)) => GameConfig::new((rows, cols), mines),
            _ => Ok(settings.game_config),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let storage = Storage::new(&args.data_dir);
    let mut settings = Settings::load(&storage);
    log::debug!(
        "settings: {:?} ({})",
        settings.game_config,
        settings
            .difficulty()
            .map_or_else(|| "custom".to_string(), |difficulty| difficulty.to_string())
    );

    let mut session = match &args.command {
        Command::New(new_args) => {
            let config = new_args
                .game_config(&settings)
                .context("invalid board size")?;
            if config != settings.game_config {
                settings.game_config = config;
                storage.save(&settings)?;
            }
            GameSession::new(config, seed)?
        }
        Command::Reset => {
            storage.remove::<SaveState>()?;
            GameSession::new(settings.game_config, seed)?
        }
        _ => GameSession::load_or_new(&storage, settings.game_config, seed)?,
    };

    match args.command {
        Command::Reveal { row, col } => {
            let outcome = session.board.reveal((row, col))?;
            log::info!(
                "revealed {} cells, now {:?}",
                outcome.changed.len(),
                outcome.status
            );
            session.mark_changed(outcome.has_update());
        }
        Command::Flag { row, col } => {
            let outcome = session.board.toggle_flag((row, col))?;
            session.mark_changed(outcome.has_update());
        }
        Command::Tick { seconds } => {
            for _ in 0..seconds {
                let ticked = session.board.tick();
                session.mark_changed(ticked);
                if !ticked {
                    break;
                }
            }
        }
        Command::New(_) | Command::Show | Command::Reset => {}
    }

    session.save_if_changed(&storage)?;
    print!("{}", BoardView(&session.board));
    if session.board.is_finished() {
        println!("Run `new` to play again.");
    }
    Ok(())
}
