use tokio::sync::mpsc;

use crate::games::snake::{DeathReason, Difficulty, Direction, GameSession, SessionState, TickOutcome};
use crate::scores::{HighScoreKeeper, LocalScoreStore, RemoteScoreStore};
use crate::{Account, UserId, log};
use super::board_sizing::{BoardDimensions, BoardSizeProvider};
use super::events::{GameEvent, GameEventSink, SessionSummary, Sound, TickReport};
use super::input::DirectionBuffer;
use super::timer::TickTimer;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControllerCommand {
    StartSession(Difficulty),
    Steer(Direction),
    TogglePause,
    ReturnToMenu,
    SignIn(Account),
    SignOut,
    RemoteHighScoreLoaded { user_id: UserId, high_score: u32 },
    Shutdown,
}

pub struct GameController<E, L, R>
where
    E: GameEventSink,
    L: LocalScoreStore,
    R: RemoteScoreStore,
{
    session: Option<GameSession>,
    input: DirectionBuffer,
    timer: TickTimer,
    events: E,
    scores: HighScoreKeeper<L, R>,
    board_sizing: Box<dyn BoardSizeProvider + Send>,
    base_seed: Option<u64>,
    sessions_started: u64,
    commands_tx: mpsc::UnboundedSender<ControllerCommand>,
    commands_rx: Option<mpsc::UnboundedReceiver<ControllerCommand>>,
}

impl<E, L, R> GameController<E, L, R>
where
    E: GameEventSink,
    L: LocalScoreStore,
    R: RemoteScoreStore,
{
    pub fn new(
        events: E,
        scores: HighScoreKeeper<L, R>,
        board_sizing: Box<dyn BoardSizeProvider + Send>,
    ) -> Self {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        Self {
            session: None,
            input: DirectionBuffer::default(),
            timer: TickTimer::new(),
            events,
            scores,
            board_sizing,
            base_seed: None,
            sessions_started: 0,
            commands_tx,
            commands_rx: Some(commands_rx),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.base_seed = Some(seed);
        self
    }

    pub fn commands(&self) -> mpsc::UnboundedSender<ControllerCommand> {
        self.commands_tx.clone()
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn high_score(&self) -> u32 {
        self.scores.high_score()
    }

    pub fn account(&self) -> Option<&Account> {
        self.scores.account()
    }

    pub fn tick_period(&self) -> Option<std::time::Duration> {
        self.timer.period()
    }

    pub async fn run(mut self) -> Self {
        let Some(mut commands) = self.commands_rx.take() else {
            log!("Game controller is already running");
            return self;
        };

        loop {
            tokio::select! {
                command = commands.recv() => {
                    match command {
                        Some(command) => {
                            if !self.handle_command(command) {
                                break;
                            }
                        }
                        None => break,
                    }
                }
                _ = self.timer.tick() => self.on_tick(),
            }
        }

        self.timer.cancel();
        log!("Game controller stopped");
        self
    }

    pub fn handle_command(&mut self, command: ControllerCommand) -> bool {
        match command {
            ControllerCommand::StartSession(difficulty) => {
                if let Err(e) = self.start_session(difficulty) {
                    log!("Cannot start {} session: {}", difficulty, e);
                    self.events.publish(GameEvent::SessionRejected { reason: e });
                }
            }
            ControllerCommand::Steer(direction) => self.steer(direction),
            ControllerCommand::TogglePause => self.toggle_pause(),
            ControllerCommand::ReturnToMenu => self.return_to_menu(),
            ControllerCommand::SignIn(account) => self.sign_in(account),
            ControllerCommand::SignOut => {
                self.scores.sign_out();
                self.events.publish(GameEvent::AccountChanged { account: None });
                self.publish_high_score();
            }
            ControllerCommand::RemoteHighScoreLoaded { user_id, high_score } => {
                if self.scores.apply_remote_high_score(&user_id, high_score) {
                    self.publish_high_score();
                }
            }
            ControllerCommand::Shutdown => {
                self.timer.cancel();
                return false;
            }
        }
        true
    }

    pub fn start_session(&mut self, difficulty: Difficulty) -> Result<(), String> {
        self.discard_session();

        let dimensions = self.board_sizing.current_board_size();
        let seed = self.next_seed();
        let session = GameSession::new(dimensions.board_size, difficulty, seed)?;

        log!(
            "Starting {} session on a {}x{} board (seed {})",
            difficulty,
            dimensions.board_size,
            dimensions.board_size,
            seed
        );

        self.timer.arm(session.interval());
        self.events.publish(GameEvent::SessionStarted {
            difficulty,
            dimensions,
            snapshot: session.snapshot(),
            interval: session.interval(),
            high_score: self.scores.high_score(),
        });
        self.session = Some(session);
        Ok(())
    }

    pub fn start_prepared_session(&mut self, session: GameSession) {
        self.discard_session();

        let board_size = session.board_size().get();
        self.timer.arm(session.interval());
        self.events.publish(GameEvent::SessionStarted {
            difficulty: session.difficulty(),
            dimensions: BoardDimensions {
                board_size,
                tile_size: self.board_sizing.current_board_size().tile_size,
            },
            snapshot: session.snapshot(),
            interval: session.interval(),
            high_score: self.scores.high_score(),
        });
        self.session = Some(session);
    }

    pub fn on_tick(&mut self) {
        let Some(session) = self.session.as_mut() else {
            self.timer.cancel();
            return;
        };

        let outcome = session.tick(self.input.take());
        match outcome {
            TickOutcome::Idle => {
                self.timer.cancel();
                return;
            }
            TickOutcome::Moved => {}
            TickOutcome::Ate { interval, interval_changed, .. } => {
                if interval_changed {
                    self.timer.arm(interval);
                }
            }
            TickOutcome::GameOver(_) => self.timer.cancel(),
        }

        let state = session.state();
        self.events.publish(GameEvent::Tick(TickReport {
            tick: session.ticks(),
            snapshot: session.snapshot(),
            score: session.score(),
            interval: session.interval(),
            state,
            terminal: state.is_terminal(),
        }));

        match outcome {
            TickOutcome::Ate { .. } => self.events.publish(GameEvent::Sound(Sound::Eat)),
            TickOutcome::GameOver(reason) => {
                self.events.publish(GameEvent::Sound(Sound::GameOver));
                self.finish_session(reason);
            }
            _ => {}
        }
    }

    fn steer(&mut self, direction: Direction) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if session.state().is_terminal() {
            return;
        }
        self.input.offer(direction, session.direction());
    }

    fn toggle_pause(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match session.toggle_pause() {
            SessionState::Paused => {
                self.timer.cancel();
                self.events.publish(GameEvent::PauseToggled { paused: true });
            }
            SessionState::Running => {
                self.timer.arm(session.interval());
                self.events.publish(GameEvent::PauseToggled { paused: false });
            }
            SessionState::GameOver(_) => {}
        }
    }

    fn return_to_menu(&mut self) {
        if self.session.is_none() {
            return;
        }
        self.discard_session();
        self.events.publish(GameEvent::ReturnedToMenu);
    }

    fn sign_in(&mut self, account: Account) {
        if !self.scores.sign_in(account.clone()) {
            return;
        }
        self.events.publish(GameEvent::AccountChanged {
            account: Some(account),
        });

        let commands = self.commands_tx.clone();
        self.scores.refresh_remote(move |user_id, high_score| {
            let _ = commands.send(ControllerCommand::RemoteHighScoreLoaded { user_id, high_score });
        });
    }

    fn finish_session(&mut self, reason: DeathReason) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let final_score = session.score();
        let difficulty = session.difficulty();
        let ticks = session.ticks();

        let update = self.scores.record(final_score);
        log!(
            "Session over: {} after {} ticks, score {} (high score {})",
            reason,
            ticks,
            final_score,
            update.high_score
        );

        self.events.publish(GameEvent::SessionEnded(SessionSummary {
            difficulty,
            final_score,
            reason,
            ticks,
            high_score: update.high_score,
            is_new_record: update.is_new_record,
        }));
        if update.is_new_record {
            self.publish_high_score();
        }
    }

    fn discard_session(&mut self) {
        self.timer.cancel();
        self.input.clear();
        self.session = None;
    }

    fn publish_high_score(&mut self) {
        self.events.publish(GameEvent::HighScoreChanged {
            high_score: self.scores.high_score(),
        });
    }

    fn next_seed(&mut self) -> u64 {
        let n = self.sessions_started;
        self.sessions_started += 1;
        match self.base_seed {
            Some(seed) => seed.wrapping_add(n),
            None => rand::random(),
        }
    }
}
