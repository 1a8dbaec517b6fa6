use std::collections::HashMap;
use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use rand::seq::SliceRandom;
use ratatui::{backend::Backend, style::Color, Terminal};
use tracing::{info, warn};

use super::game_view::{self, View};
use crate::ai::{self, Agent, SearchReport};
use crate::config::AppConfig;
use crate::error::ConfigError;
use crate::game::{GameOutcome, GameState, Mark, Pos};

const PALETTE: [Color; 10] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Magenta,
    Color::Blue,
    Color::LightRed,
    Color::LightGreen,
    Color::LightBlue,
    Color::LightMagenta,
];

pub struct App {
    config: AppConfig,
    game_state: GameState,
    cursor: Pos,
    agents: HashMap<Mark, Box<dyn Agent>>,
    colors: HashMap<Mark, Color>,
    last_report: Option<SearchReport>,
    message: Option<String>,
    show_debug: bool,
    should_quit: bool,
}

impl App {
    /// Set up a new game from validated configuration; computer players
    /// at the head of the turn order move right away.
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        let game_state = config.game.new_game()?;

        let mut palette = PALETTE;
        palette.shuffle(&mut rand::rng());
        let colors = config
            .game
            .players
            .iter()
            .zip(palette.iter().cycle())
            .map(|(player, &color)| (player.mark, color))
            .collect();

        let agents = config
            .game
            .players
            .iter()
            .filter_map(|player| {
                ai::agent_for(player.kind, &config.search).map(|agent| (player.mark, agent))
            })
            .collect();

        let mut app = App {
            cursor: center(&game_state),
            game_state,
            config,
            agents,
            colors,
            last_report: None,
            message: None,
            show_debug: false,
            should_quit: false,
        };
        app.start_game();
        Ok(app)
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal.draw(|f| self.render(f)).map_err(Into::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn cursor(&self) -> Pos {
        self.cursor
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let (height, width) = (
            self.game_state.board().height(),
            self.game_state.board().width(),
        );
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up => {
                self.cursor.row = self.cursor.row.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.cursor.row + 1 < height {
                    self.cursor.row += 1;
                }
            }
            KeyCode::Left => {
                self.cursor.col = self.cursor.col.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.cursor.col + 1 < width {
                    self.cursor.col += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.occupy_cursor();
            }
            KeyCode::Char('d') => {
                self.show_debug = !self.show_debug;
            }
            KeyCode::Char('r') => {
                self.restart();
            }
            _ => {}
        }
    }

    fn restart(&mut self) {
        match self.config.game.new_game() {
            Ok(state) => {
                self.cursor = center(&state);
                self.game_state = state;
                self.last_report = None;
                self.start_game();
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    fn start_game(&mut self) {
        info!(
            height = self.game_state.board().height(),
            width = self.game_state.board().width(),
            streak = self.game_state.streak(),
            "new game"
        );
        self.play_computer_turns();
        self.message = Some(if self.game_state.is_terminal() {
            self.status()
        } else {
            format!(
                "New game started! Goal is to occupy {} in a row. Current turn: {}",
                self.game_state.streak(),
                self.game_state.current_player().mark
            )
        });
    }

    /// Place the current player's mark under the cursor, then let the
    /// computer players answer.
    fn occupy_cursor(&mut self) {
        if !self.game_state.is_terminal() && self.game_state.current_player().is_computer() {
            return;
        }

        let mark = self.game_state.current_player().mark;
        match self.game_state.apply_move_mut(self.cursor) {
            Ok(()) => {
                info!(%mark, pos = %self.cursor, "human move");
                self.play_computer_turns();
                self.message = Some(self.status());
            }
            Err(e) => {
                self.message = Some(e.to_string());
            }
        }
    }

    fn play_computer_turns(&mut self) {
        while !self.game_state.is_terminal() {
            let mark = self.game_state.current_player().mark;
            let Some(agent) = self.agents.get_mut(&mark) else {
                break;
            };
            let Some(pos) = agent.select_move(&self.game_state) else {
                break;
            };
            if let Some(report) = agent.last_report() {
                self.last_report = Some(*report);
            }
            if let Err(e) = self.game_state.apply_move_mut(pos) {
                warn!(%mark, %pos, error = %e, "computer move rejected");
                break;
            }
            info!(%mark, %pos, agent = agent.name(), "computer move");
        }

        if let Some(outcome) = self.game_state.outcome() {
            info!(?outcome, "game over");
        }
    }

    fn status(&self) -> String {
        match self.game_state.outcome() {
            Some(GameOutcome::Winner(mark)) => format!("Game over. Winner is {mark}!"),
            Some(GameOutcome::Draw) => "Game over. Draw!".to_string(),
            None => format!("Current turn: {}", self.game_state.current_player().mark),
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let view = View {
            state: &self.game_state,
            cursor: self.cursor,
            colors: &self.colors,
            message: self.message.as_deref(),
            debug: self.show_debug.then_some(self.last_report.as_ref()),
        };
        game_view::render(frame, &view);
    }
}

fn center(state: &GameState) -> Pos {
    let board = state.board();
    Pos::new(board.height() / 2, board.width() / 2)
}
