use std::collections::HashSet;
use std::io::Write;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use tokio::sync::mpsc;

use snake_common::controller::{GameEvent, SessionSummary, Sound, TickReport};
use snake_common::games::snake::{BoardSnapshot, Cell, SessionState};
use crate::keys::HELP;

const HEAD: char = '@';
const BODY: char = 'o';
const FOOD: char = '*';
const EMPTY: char = ' ';
const WALL: char = '#';

pub fn render_board(snapshot: &BoardSnapshot) -> Vec<String> {
    let size = snapshot.board_size as i32;
    let head = snapshot.snake.first().copied();
    let body: HashSet<Cell> = snapshot.snake.iter().skip(1).copied().collect();

    let border: String = std::iter::repeat_n(WALL, snapshot.board_size as usize + 2).collect();
    let mut rows = Vec::with_capacity(snapshot.board_size as usize + 2);
    rows.push(border.clone());

    for y in 0..size {
        let mut row = String::with_capacity(border.len());
        row.push(WALL);
        for x in 0..size {
            let cell = Cell::new(x, y);
            row.push(if Some(cell) == head {
                HEAD
            } else if body.contains(&cell) {
                BODY
            } else if cell == snapshot.food {
                FOOD
            } else {
                EMPTY
            });
        }
        row.push(WALL);
        rows.push(row);
    }

    rows.push(border);
    rows
}

fn summary_text(summary: &SessionSummary) -> String {
    let mut text = format!(
        "Game over: the snake {}. Score {} on {} after {} ticks. High score {}.",
        summary.reason, summary.final_score, summary.difficulty, summary.ticks, summary.high_score
    );
    if summary.is_new_record {
        text.push_str(" New record!");
    }
    text
}

fn status_text(report: &TickReport, high_score: u32) -> String {
    let state = match report.state {
        SessionState::Running => "",
        SessionState::Paused => "  [paused]",
        SessionState::GameOver(_) => "  [game over]",
    };
    format!(
        "Score {}  Best {}  Step {}ms{}",
        report.score,
        high_score.max(report.score),
        report.interval.as_millis(),
        state
    )
}

pub struct TerminalRenderer<W: Write> {
    out: W,
    bell: bool,
    board_rows: u16,
    high_score: u32,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, bell: bool) -> Self {
        Self {
            out,
            bell,
            board_rows: 0,
            high_score: 0,
        }
    }

    fn draw_board(&mut self, snapshot: &BoardSnapshot) -> std::io::Result<()> {
        let rows = render_board(snapshot);
        if rows.len() as u16 != self.board_rows {
            queue!(self.out, Clear(ClearType::All))?;
            self.board_rows = rows.len() as u16;
        }
        for (y, row) in rows.iter().enumerate() {
            queue!(self.out, MoveTo(0, y as u16), Print(row))?;
        }
        Ok(())
    }

    fn draw_line(&mut self, offset: u16, text: &str) -> std::io::Result<()> {
        queue!(
            self.out,
            MoveTo(0, self.board_rows + offset),
            Clear(ClearType::CurrentLine),
            Print(text)
        )
    }

    fn message(&mut self, text: &str) -> std::io::Result<()> {
        self.draw_line(1, text)
    }

    pub fn handle(&mut self, event: &GameEvent) -> std::io::Result<()> {
        match event {
            GameEvent::SessionStarted { difficulty, dimensions, snapshot, interval, high_score } => {
                self.high_score = *high_score;
                self.draw_board(snapshot)?;
                self.draw_line(0, &format!("Score 0  Best {}  Step {}ms", high_score, interval.as_millis()))?;
                self.message(&format!(
                    "New {} game on a {}x{} board.",
                    difficulty, dimensions.board_size, dimensions.board_size
                ))?;
                self.draw_line(2, HELP)?;
            }
            GameEvent::SessionRejected { reason } => {
                self.message(&format!("Cannot start a game: {}", reason))?;
            }
            GameEvent::PauseToggled { paused } => {
                self.message(if *paused { "Paused, press p to resume." } else { "" })?;
            }
            GameEvent::Tick(report) => {
                self.draw_board(&report.snapshot)?;
                let status = status_text(report, self.high_score);
                self.draw_line(0, &status)?;
            }
            GameEvent::Sound(sound) => {
                if self.bell {
                    queue!(self.out, Print('\x07'))?;
                }
                if *sound == Sound::GameOver {
                    self.message("*crash*")?;
                }
            }
            GameEvent::SessionEnded(summary) => {
                self.high_score = summary.high_score;
                self.message(&summary_text(summary))?;
                self.draw_line(2, "Press n to play again, Esc for the menu or q to quit.")?;
            }
            GameEvent::ReturnedToMenu => {
                queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
                self.board_rows = 0;
                self.draw_line(0, &format!("Snake. Best {}", self.high_score))?;
                self.message("Press e, m or h to start.")?;
                self.draw_line(2, HELP)?;
            }
            GameEvent::HighScoreChanged { high_score } => {
                self.high_score = *high_score;
                self.message(&format!("High score: {}", high_score))?;
            }
            GameEvent::AccountChanged { account } => match account {
                Some(account) => self.message(&format!("Signed in as {}", account.display_name))?,
                None => self.message("Playing as guest")?,
            },
        }
        self.out.flush()
    }
}

pub async fn render_task<W: Write>(
    mut events: mpsc::UnboundedReceiver<GameEvent>,
    mut renderer: TerminalRenderer<W>,
) {
    while let Some(event) = events.recv().await {
        if renderer.handle(&event).is_err() {
            break;
        }
    }
}
