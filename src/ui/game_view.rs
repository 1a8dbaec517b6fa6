use std::collections::HashMap;

use crate::ai::SearchReport;
use crate::game::{GameState, Mark, Pos, EMPTY_SYMBOL};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Everything the game screen shows.
pub struct View<'a> {
    pub state: &'a GameState,
    pub cursor: Pos,
    pub colors: &'a HashMap<Mark, Color>,
    pub message: Option<&'a str>,
    /// `Some` while the debug panel is open, holding the latest search report
    pub debug: Option<Option<&'a SearchReport>>,
}

impl View<'_> {
    fn color_of(&self, mark: Mark) -> Color {
        self.colors.get(&mark).copied().unwrap_or(Color::White)
    }
}

pub fn render(frame: &mut Frame, view: &View) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, view, chunks[0]);

    if let Some(report) = view.debug {
        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(34)])
            .split(chunks[1]);
        render_board(frame, view, middle[0]);
        render_debug(frame, view, report, middle[1]);
    } else {
        render_board(frame, view, chunks[1]);
    }

    render_message(frame, view.message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, view: &View, area: Rect) {
    let state = view.state;
    let current = state.current_player();

    let status = if state.is_terminal() {
        format!("Game Over  |  {} in a row", state.streak())
    } else {
        format!(
            "Current Player: {} ({})  |  {} in a row",
            current.mark,
            current.kind.name(),
            state.streak()
        )
    };

    let header = Paragraph::new(status)
        .style(
            Style::default()
                .fg(view.color_of(current.mark))
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Tic-Tac"));

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, view: &View, area: Rect) {
    let board = view.state.board();
    let mut lines = Vec::with_capacity(board.height() + 2);

    let rule = "═".repeat(board.width() * 3);
    lines.push(Line::from(format!("╔{rule}╗")));

    for row in 0..board.height() {
        let mut spans = vec![Span::raw("║")];
        for col in 0..board.width() {
            let pos = Pos::new(row, col);
            let (symbol, mut style) = match board.mark_at(pos) {
                Some(mark) => (
                    mark.symbol(),
                    Style::default()
                        .fg(view.color_of(mark))
                        .add_modifier(Modifier::BOLD),
                ),
                None => (EMPTY_SYMBOL, Style::default().fg(Color::DarkGray)),
            };
            if pos == view.cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(format!(" {symbol} "), style));
        }
        spans.push(Span::raw("║"));
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(format!("╚{rule}╝")));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_debug(frame: &mut Frame, view: &View, report: Option<&SearchReport>, area: Rect) {
    let state = view.state;
    let mut lines = vec![
        Line::from(format!("Current player: {}", state.current_player().mark)),
        Line::from(format!("Cursor:         {}", view.cursor)),
        Line::from(format!("Turns left:     {}", state.turns_left())),
    ];

    match report {
        Some(report) => {
            lines.push(Line::from(format!(
                "Last score:     {}",
                report.prediction.score
            )));
            lines.push(Line::from(format!(
                "Last move:      {}",
                report.prediction.pos
            )));
            lines.push(Line::from(format!("Search depth:   {}", report.horizon)));
            lines.push(Line::from(format!("Nodes searched: {}", report.nodes)));
            lines.push(Line::from(format!(
                "Search time:    {} ms",
                report.elapsed.as_millis()
            )));
        }
        None => lines.push(Line::from(Span::styled(
            "No search yet",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Debug"));
    frame.render_widget(panel, area);
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let msg_widget = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line = Line::from("Arrows: Move  |  Enter: Occupy  |  D: Debug  |  R: Restart  |  Q: Quit");

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
