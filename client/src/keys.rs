use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use snake_common::controller::ControllerCommand;
use snake_common::games::snake::{Difficulty, Direction};
use snake_common::log;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub const HELP: &str = "Arrows/WASD steer, p pause, n new game, e/m/h pick difficulty, Esc menu, o sign out, q quit";

pub fn map_key(key: KeyEvent, default_difficulty: Difficulty) -> Option<ControllerCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(ControllerCommand::Shutdown);
    }

    let command = match key.code {
        KeyCode::Up => ControllerCommand::Steer(Direction::Up),
        KeyCode::Down => ControllerCommand::Steer(Direction::Down),
        KeyCode::Left => ControllerCommand::Steer(Direction::Left),
        KeyCode::Right => ControllerCommand::Steer(Direction::Right),
        KeyCode::Esc => ControllerCommand::ReturnToMenu,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'p' | ' ' => ControllerCommand::TogglePause,
            'n' => ControllerCommand::StartSession(default_difficulty),
            'o' => ControllerCommand::SignOut,
            'q' => ControllerCommand::Shutdown,
            other => {
                let key = other.to_string();
                if let Ok(direction) = key.parse::<Direction>() {
                    ControllerCommand::Steer(direction)
                } else if let Ok(difficulty) = key.parse::<Difficulty>() {
                    ControllerCommand::StartSession(difficulty)
                } else {
                    return None;
                }
            }
        },
        _ => return None,
    };

    Some(command)
}

pub fn spawn_key_reader(
    commands: mpsc::UnboundedSender<ControllerCommand>,
    default_difficulty: Difficulty,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        while !commands.is_closed() {
            match event::poll(POLL_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    log!("Failed to poll keyboard: {}", e);
                    break;
                }
            }

            let key = match event::read() {
                Ok(Event::Key(key)) => key,
                Ok(_) => continue,
                Err(e) => {
                    log!("Failed to read keyboard: {}", e);
                    break;
                }
            };

            if let Some(command) = map_key(key, default_difficulty) {
                let quit = command == ControllerCommand::Shutdown;
                if commands.send(command).is_err() || quit {
                    return;
                }
            }
        }

        let _ = commands.send(ControllerCommand::Shutdown);
    })
}
