use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};

use irregular_connect_four::ai::{RolloutAgent, RolloutConfig};
use irregular_connect_four::config::AppConfig;
use irregular_connect_four::game::{BoardLayout, GameState};
use irregular_connect_four::session::{
    prompt_layout, prompt_mode, AiController, GameLoop, GameMode, HumanController,
};
use irregular_connect_four::ui::App;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    AiVsAi,
    HumanVsAi,
}

/// Play Connect Four on an irregular board against the rollout AI.
#[derive(Parser)]
#[command(name = "irregular_connect_four", about = "Irregular Connect Four")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Game type; asked on the console when omitted
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// The human opens (human-vs-ai only)
    #[arg(long)]
    human_first: bool,

    /// Column heights separated by spaces, e.g. "7 8 6 7 8 9 8 6"
    #[arg(long)]
    heights: Option<String>,

    /// Don't-care cells, e.g. "A3 B1"
    #[arg(long)]
    dont_care: Option<String>,

    /// Override rollouts per move
    #[arg(long)]
    simulations: Option<usize>,

    /// Seed the AI for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Run rollouts across threads
    #[arg(long)]
    parallel: bool,

    /// Play human-vs-ai in the terminal UI instead of the console
    #[arg(long)]
    tui: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(simulations) = cli.simulations {
        app_config.game.simulations = simulations;
    }
    if cli.seed.is_some() {
        app_config.game.seed = cli.seed;
    }
    if cli.parallel {
        app_config.game.parallel = true;
    }
    app_config.validate().context("invalid configuration")?;

    let (layout, mode) = {
        let stdin = io::stdin();
        read_setup(&cli, &mut stdin.lock(), &mut io::stdout())?
    };

    info!(
        "board [{}] dont-care [{}], {:?}, {} simulations",
        layout.heights_notation(),
        layout.dont_care_notation(),
        mode,
        app_config.game.simulations
    );

    match mode {
        GameMode::HumanVsAi { human_first } if cli.tui => {
            run_tui(layout, RolloutAgent::new(app_config.game), human_first)
        }
        _ => run_console(&layout, mode, &app_config.game),
    }
}

/// Settle the game type and board from flags, asking on the console for
/// whatever is missing. Game type and first mover come before the board.
fn read_setup<R: BufRead, W: Write>(
    cli: &Cli,
    input: &mut R,
    out: &mut W,
) -> Result<(BoardLayout, GameMode)> {
    let mode = match cli.mode {
        Some(ModeArg::AiVsAi) => GameMode::AiVsAi,
        Some(ModeArg::HumanVsAi) => GameMode::HumanVsAi {
            human_first: cli.human_first,
        },
        None if cli.tui => GameMode::HumanVsAi {
            human_first: cli.human_first,
        },
        None => prompt_mode(input, out).context("reading game type")?,
    };

    let layout = match (&cli.heights, &cli.dont_care) {
        (Some(heights), Some(dont_care)) => {
            BoardLayout::parse(heights, dont_care).context("invalid board from command line")?
        }
        _ => prompt_layout(input, out).context("reading board layout")?,
    };
    Ok((layout, mode))
}

fn run_console(layout: &BoardLayout, mode: GameMode, rollout: &RolloutConfig) -> Result<()> {
    let ai = |offset: u64| {
        let config = RolloutConfig {
            seed: rollout.seed.map(|s| s.wrapping_add(offset)),
            ..rollout.clone()
        };
        Box::new(AiController::new(Box::new(RolloutAgent::new(config))))
    };

    let state = GameState::new(layout, mode.first_player());
    let mut game = match mode {
        GameMode::AiVsAi => GameLoop::new(state, ai(0), ai(1), io::stdout()),
        GameMode::HumanVsAi { .. } => {
            let human = HumanController::new(io::stdin().lock());
            GameLoop::new(state, ai(0), Box::new(human), io::stdout())
        }
    };

    let report = game.run().context("game aborted")?;
    info!("{:?} after {} moves", report.outcome, report.moves);
    Ok(())
}

fn run_tui(layout: BoardLayout, agent: RolloutAgent, human_first: bool) -> Result<()> {
    let mut app = App::new(layout, agent, human_first);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("terminal UI failed")
}
