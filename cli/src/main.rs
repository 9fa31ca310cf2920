use std::io::{self, BufRead, Write};

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use sweeper_core::*;

use command::{Command, HELP};

mod command;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl Preset {
    /// `(height, width, mines)`
    const fn dimensions(self) -> (Coord, Coord, CellCount) {
        match self {
            Self::Beginner => (8, 8, 10),
            Self::Intermediate => (16, 16, 40),
            Self::Expert => (16, 30, 99),
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Terminal minesweeper", long_about = None)]
struct Args {
    /// Starting dimensions and mine count
    #[arg(short, long, value_enum, default_value_t = Preset::Intermediate)]
    preset: Preset,

    /// Override the preset height
    #[arg(long)]
    height: Option<Coord>,

    /// Override the preset width
    #[arg(long)]
    width: Option<Coord>,

    /// Override the preset mine count
    #[arg(short, long)]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        let (height, width, mines) = self.preset.dimensions();
        GameConfig::new(
            self.height.unwrap_or(height),
            self.width.unwrap_or(width),
            self.mines.unwrap_or(mines),
        )
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let config = args.game_config()?;
    let placer = match args.seed {
        Some(seed) => RandomMinePlacer::new(seed),
        None => RandomMinePlacer::from_entropy(),
    };
    log::debug!("seed: {}", placer.seed());

    let mut engine = GameEngine::new(config, placer);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    render(&mut stdout, &engine)?;
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "{err:#}")?;
                continue;
            }
        };

        let updated = match command {
            Command::Reveal(coords) => engine.activate_primary(coords).map(|o| o.has_update()),
            Command::Mark(coords) => engine.activate_secondary(coords).map(|o| o.has_update()),
            Command::Reset => {
                engine.reset();
                Ok(true)
            }
            Command::Help => {
                writeln!(stdout, "{HELP}")?;
                Ok(false)
            }
            Command::Quit => break,
        };

        match updated {
            Ok(true) => render(&mut stdout, &engine)?,
            Ok(false) => {}
            Err(err) => writeln!(stdout, "{err}")?,
        }
    }

    Ok(())
}

fn render(out: &mut impl Write, engine: &GameEngine) -> io::Result<()> {
    let view = engine.view();
    write!(out, "{view}")?;
    writeln!(
        out,
        "flags: {}  revealed: {}",
        view.flags_remaining, view.revealed_count
    )?;
    match view.phase {
        Phase::InProgress => {}
        Phase::Won => writeln!(out, "You win! (n for a new board)")?,
        Phase::Lost => writeln!(out, "Boom. (n for a new board)")?,
    }
    out.flush()
}
