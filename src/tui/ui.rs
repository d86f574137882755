//! Stateless UI rendering for the memory game.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use strum::IntoEnumIterator;

use super::app::{App, Screen};
use super::input::columns;
use crate::games::memory::{CardFace, CardView, Difficulty, Mode, format_record};

const CELL_WIDTH: u16 = 8;
const CELL_HEIGHT: u16 = 3;

/// Renders the current screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Title
        Constraint::Min(9),    // Body
        Constraint::Length(3), // Status
        Constraint::Length(1), // Help
    ])
    .split(frame.area());

    let title = Paragraph::new("Strictly Memory")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .centered();
    frame.render_widget(title, chunks[0]);

    match app.screen() {
        Screen::Menu => draw_menu(frame, chunks[1], app),
        Screen::Playing => draw_table(frame, chunks[1], app),
    }

    let status = Paragraph::new(status_text(app))
        .style(Style::default().fg(Color::Yellow))
        .centered()
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    let help = match app.screen() {
        Screen::Menu => "↑↓ mode  ←→ difficulty  Enter play  q quit",
        Screen::Playing => "arrows move  Enter flip  r reset  m menu  q quit",
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)).centered(),
        chunks[3],
    );
}

fn status_text(app: &App) -> String {
    if let Some(error) = app.error() {
        return error.to_string();
    }
    match app.screen() {
        Screen::Menu => {
            let selection = app.selection();
            match app.menu_best() {
                Some(best) => format!("Best: {}", format_record(selection.mode, best)),
                None => "No record yet".to_string(),
            }
        }
        Screen::Playing => {
            let view = app.session().sink();
            let mut text = match view.result() {
                Some(summary) => format!(
                    "{}  {}  {}  (Enter to play again)",
                    summary.outcome,
                    summary.current_text(),
                    summary.best_text()
                ),
                None => view.status_line(),
            };
            if let Some(warning) = view.warning() {
                text.push_str("  ! ");
                text.push_str(warning);
            }
            text
        }
    }
}

fn draw_menu(frame: &mut Frame, area: Rect, app: &App) {
    let selection = app.selection();
    let mut lines = vec![Line::from("Mode"), Line::from("")];
    for mode in Mode::iter() {
        lines.push(option_line(mode.label(), mode == selection.mode));
    }
    lines.push(Line::from(""));
    lines.push(Line::from("Difficulty"));
    lines.push(Line::from(""));
    let difficulties: Vec<String> = Difficulty::iter()
        .map(|d| {
            let profile = d.profile();
            let label = format!("{} ({} pairs)", d, profile.pair_count());
            if d == selection.difficulty {
                format!("[{}]", label)
            } else {
                format!(" {} ", label)
            }
        })
        .collect();
    lines.push(Line::from(difficulties.join("  ")));

    let menu = Paragraph::new(lines)
        .centered()
        .block(Block::default().borders(Borders::ALL).title("New game"));
    frame.render_widget(menu, area);
}

fn option_line(label: &str, selected: bool) -> Line<'static> {
    if selected {
        Line::styled(
            format!("> {} <", label),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    } else {
        Line::from(label.to_string())
    }
}

fn draw_table(frame: &mut Frame, area: Rect, app: &App) {
    let cards = app.session().sink().cards();
    if cards.is_empty() {
        return;
    }
    let cols = columns(cards.len());
    let rows = cards.len().div_ceil(cols);

    let grid = center_rect(area, CELL_WIDTH * cols as u16, CELL_HEIGHT * rows as u16);
    let row_areas = Layout::vertical(vec![Constraint::Length(CELL_HEIGHT); rows]).split(grid);

    for (row, row_area) in row_areas.iter().enumerate() {
        let cell_areas =
            Layout::horizontal(vec![Constraint::Length(CELL_WIDTH); cols]).split(*row_area);
        for (col, cell_area) in cell_areas.iter().enumerate() {
            let idx = row * cols + col;
            if let Some(card) = cards.get(idx) {
                draw_card(frame, *cell_area, card, idx == app.cursor());
            }
        }
    }
}

fn draw_card(frame: &mut Frame, area: Rect, card: &CardView, is_cursor: bool) {
    let (text, style) = match card.face {
        CardFace::Down => ("░░".to_string(), Style::default().fg(Color::Blue)),
        CardFace::Up(icon) => (icon.to_string(), Style::default().fg(Color::White)),
        CardFace::Matched(icon) => (icon.to_string(), Style::default().fg(Color::Green)),
    };
    let border = if is_cursor {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let cell = Paragraph::new(text)
        .style(style)
        .centered()
        .block(Block::default().borders(Borders::ALL).border_style(border));
    frame.render_widget(cell, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
