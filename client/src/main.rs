mod keys;
mod render;

use std::io::stdout;
use std::sync::Arc;

use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use tokio::sync::mpsc;

use snake_common::config::{GameConfig, YamlDocument};
use snake_common::controller::{ControllerCommand, FixedBoardSize, GameController, GameEvent};
use snake_common::games::snake::Difficulty;
use snake_common::logger::{self, LogTarget};
use snake_common::scores::{FileLocalScoreStore, FileRemoteScoreStore, HighScoreKeeper};
use snake_common::{Account, UserId, log};

use keys::spawn_key_reader;
use render::{TerminalRenderer, render_task};

#[derive(Parser)]
#[command(name = "snake_hub")]
struct Args {
    #[arg(long, default_value = "snake_hub.yaml")]
    config: String,

    /// Start a game right away at this difficulty (easy, medium, hard).
    #[arg(long)]
    difficulty: Option<Difficulty>,

    #[arg(long)]
    user_id: Option<String>,

    #[arg(long)]
    display_name: Option<String>,

    /// Log file; "-" logs to stderr.
    #[arg(long, default_value = "snake_hub.log")]
    log_file: String,

    #[arg(long)]
    use_log_prefix: bool,

    /// Fixed seed for reproducible food placement.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    no_bell: bool,
}

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Snake".to_string())
    } else {
        None
    };
    let target = if args.log_file == "-" {
        LogTarget::Stderr
    } else {
        LogTarget::File(args.log_file.clone())
    };
    logger::init_logger(prefix, target)?;

    let config = YamlDocument::<GameConfig, _>::from_yaml_file(&args.config).load()?;
    log!(
        "Loaded config from {}: {}x{} board, default difficulty {}",
        args.config,
        config.board_size,
        config.board_size,
        config.default_difficulty
    );

    let local = FileLocalScoreStore::from_file(&config.high_score_file);
    let remote = Arc::new(FileRemoteScoreStore::from_file(&config.remote_score_file));
    let scores = HighScoreKeeper::new(local, Some(remote));

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let mut controller = GameController::new(
        events_tx,
        scores,
        Box::new(FixedBoardSize::from_config(&config)),
    );
    if let Some(seed) = args.seed {
        controller = controller.with_seed(seed);
    }

    let guard = TerminalGuard::enter()?;

    let mut renderer = TerminalRenderer::new(stdout(), !args.no_bell);
    renderer.handle(&GameEvent::HighScoreChanged {
        high_score: controller.high_score(),
    })?;
    renderer.handle(&GameEvent::ReturnedToMenu)?;
    let render_handle = tokio::spawn(render_task(events_rx, renderer));

    let commands = controller.commands();
    if let Some(user_id) = args.user_id {
        let display_name = args.display_name.unwrap_or_else(|| user_id.clone());
        commands.send(ControllerCommand::SignIn(Account::new(UserId::new(user_id), display_name)))?;
    }
    if let Some(difficulty) = args.difficulty {
        commands.send(ControllerCommand::StartSession(difficulty))?;
    }
    spawn_key_reader(commands, config.default_difficulty);

    let controller = controller.run().await;
    let high_score = controller.high_score();

    drop(controller);
    let _ = render_handle.await;
    drop(guard);

    log!("Exiting, high score {}", high_score);
    println!("High score: {}", high_score);

    Ok(())
}
