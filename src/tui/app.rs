//! Keypad application state and key handling.

use crate::{Calculator, EngineConfig, InputAction, Token};

/// Keypad application state.
pub struct KeypadApp {
    /// The calculator being driven.
    pub calc: Calculator,
    /// Index into [`InputAction::ALL`] of the highlighted button.
    pub selected: usize,
    /// Show the display in decimal instead of ternary.
    pub show_decimal: bool,
    /// Should we quit?
    pub should_quit: bool,
    /// Status message to display.
    pub status: String,
}

impl KeypadApp {
    /// Create a keypad around a fresh calculator.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            calc: Calculator::with_config(config),
            selected: 0,
            show_decimal: false,
            should_quit: false,
            status: "Ready. Type 0-2 + - * / ( ) =, 'd' for decimal, 'q' to quit.".into(),
        }
    }

    /// Press a button.
    pub fn press(&mut self, action: InputAction) {
        // The decimal view lasts until the next press.
        self.show_decimal = false;
        self.status = match self.calc.feed(action) {
            Ok(_) => self.calc.expression(),
            Err(e) => format!("Error: {}", e),
        };
    }

    /// Press the highlighted button.
    pub fn press_selected(&mut self) {
        self.press(InputAction::ALL[self.selected]);
    }

    /// Move the highlight by `delta` buttons, wrapping around.
    pub fn move_selection(&mut self, delta: isize) {
        let count = InputAction::COUNT as isize;
        self.selected = (self.selected as isize + delta).rem_euclid(count) as usize;
    }

    /// Text for the main display.
    pub fn display_text(&self) -> String {
        if self.show_decimal {
            self.calc.display().to_string()
        } else {
            self.calc.display_ternary().to_string()
        }
    }

    /// Map a typed character to a button, accepting lowercase controls too.
    pub fn action_for_char(c: char) -> Option<InputAction> {
        match c {
            'c' => Some(InputAction::ClearEntry),
            'a' => Some(InputAction::ClearAll),
            'u' => Some(InputAction::Undo),
            'r' => Some(InputAction::Redo),
            _ => InputAction::from_key(c),
        }
    }
}

/// Run the keypad until the user quits.
pub fn run_keypad(config: &EngineConfig) -> std::io::Result<()> {
    use crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    };
    use ratatui::prelude::*;
    use std::io::stdout;
    use std::time::Duration;

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = KeypadApp::new(config);

    loop {
        terminal.draw(|frame| {
            super::ui::draw(frame, &app);
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
                        KeyCode::Char('d') => app.show_decimal = !app.show_decimal,
                        KeyCode::Char(' ') => app.press_selected(),
                        KeyCode::Char(c) => {
                            if let Some(action) = KeypadApp::action_for_char(c) {
                                app.press(action);
                            }
                        }
                        KeyCode::Enter => app.press(InputAction::Token(Token::Equals)),
                        KeyCode::Backspace => app.press(InputAction::ClearEntry),
                        KeyCode::Delete => app.press(InputAction::ClearAll),
                        KeyCode::Left => app.move_selection(-1),
                        KeyCode::Right | KeyCode::Tab => app.move_selection(1),
                        KeyCode::Up => app.move_selection(-(super::ui::KEYPAD_COLUMNS as isize)),
                        KeyCode::Down => app.move_selection(super::ui::KEYPAD_COLUMNS as isize),
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(())
}
