//! UI rendering for the keypad.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
    style::{Color, Style, Modifier},
};
use crate::InputAction;
use super::app::KeypadApp;

/// Buttons per keypad row.
pub const KEYPAD_COLUMNS: usize = 4;

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &KeypadApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    draw_display(frame, chunks[0], app);
    draw_keypad(frame, chunks[1], app);
    draw_reason(frame, chunks[2], app);
    draw_status(frame, chunks[3], app);
    draw_help(frame, chunks[4]);
}

/// Draw the value and the expression typed so far.
fn draw_display(frame: &mut Frame, area: Rect, app: &KeypadApp) {
    let base = if app.show_decimal { "dec" } else { "tern" };
    let content = vec![
        Line::from(Span::styled(
            app.display_text(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Right),
        Line::from(Span::styled(app.calc.expression(), Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Right),
    ];

    let paragraph = Paragraph::new(content)
        .block(Block::default()
            .title(format!(" Display ({}) ", base))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)));

    frame.render_widget(paragraph, area);
}

/// Draw the 14 buttons, greying out the disabled ones.
fn draw_keypad(frame: &mut Frame, area: Rect, app: &KeypadApp) {
    let enabled = app.calc.enabled();

    let lines: Vec<Line> = InputAction::ALL
        .chunks(KEYPAD_COLUMNS)
        .enumerate()
        .map(|(row, actions)| {
            let spans: Vec<Span> = actions
                .iter()
                .enumerate()
                .map(|(col, action)| {
                    let index = row * KEYPAD_COLUMNS + col;
                    let mut style = if enabled.is_enabled(*action) {
                        Style::default().fg(Color::White)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    };
                    if index == app.selected {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    Span::styled(format!(" {:^6} ", action.label()), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)));

    frame.render_widget(paragraph, area);
}

/// Draw why the highlighted button is disabled.
fn draw_reason(frame: &mut Frame, area: Rect, app: &KeypadApp) {
    let action = InputAction::ALL[app.selected];
    let text = match app.calc.enabled().reason(action) {
        Some(reason) => Span::styled(format!("{}: {}", action, reason), Style::default().fg(Color::Red)),
        None => Span::styled(format!("{}: available", action), Style::default().fg(Color::Green)),
    };

    let paragraph = Paragraph::new(Line::from(text))
        .block(Block::default()
            .title(" Button ")
            .borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

/// Draw status bar.
fn draw_status(frame: &mut Frame, area: Rect, app: &KeypadApp) {
    let status = Paragraph::new(app.status.clone())
        .style(Style::default().fg(Color::White))
        .block(Block::default()
            .title(" Status ")
            .borders(Borders::ALL));

    frame.render_widget(status, area);
}

/// Draw help panel.
fn draw_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(vec![
        Line::from("0-2 + - * / ( ) =  Enter: =  Bksp/c: CE  Del/a: AC  u/r: Undo/Redo"),
        Line::from("Arrows: select  Space: press  d: decimal  q: Quit"),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default()
        .title(" Help ")
        .borders(Borders::ALL));

    frame.render_widget(help, area);
}
