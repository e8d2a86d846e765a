//! Terminal display surface for the door command sender.
//!
//! Two buttons, "Up" and "Down", a status line shown when non-empty, and a
//! "Sending..." line shown while a request is in flight. Both buttons are
//! disabled while sending.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph},
    Frame,
};
use strum::IntoEnumIterator;

use crate::api_client::Command;
use crate::sender::{DoorCommandSender, RequestState};
use crate::tracing::prelude::*;

const TITLE: &str = " Door Control ";
const SENDING: &str = "Sending...";

/// Interactive state of the terminal UI.
pub struct App {
    sender: DoorCommandSender,
    focus: Command,
    exit: bool,
}

impl App {
    pub fn new(sender: DoorCommandSender) -> Self {
        Self {
            sender,
            focus: Command::Up,
            exit: false,
        }
    }

    pub fn sender(&self) -> &DoorCommandSender {
        &self.sender
    }

    pub fn focus(&self) -> Command {
        self.focus
    }

    pub fn should_exit(&self) -> bool {
        self.exit
    }

    /// Apply a key press. Returns the command to send if the key activates a
    /// button and the buttons are enabled.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let activated = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.exit = true;
                None
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.exit = true;
                None
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Command::Up => Command::Down,
                    Command::Down => Command::Up,
                };
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => Some(self.focus),
            KeyCode::Char('u') | KeyCode::Char('U') => Some(Command::Up),
            KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::Down),
            _ => None,
        };

        match activated {
            Some(command) if self.sender.state().controls_enabled() => {
                self.focus = command;
                Some(command)
            }
            Some(command) => {
                trace!(%command, "Buttons disabled while sending");
                None
            }
            None => None,
        }
    }

    /// Start sending `command` in the background. Must be called from within
    /// a tokio runtime.
    pub fn activate(&self, command: Command) {
        let sender = self.sender.clone();
        tokio::spawn(async move {
            sender.send(command).await;
        });
    }

    pub fn draw(&self, frame: &mut Frame, state: &RequestState) {
        let [panel] = Layout::horizontal([Constraint::Length(36)])
            .flex(Flex::Center)
            .areas(frame.area());
        let [panel] = Layout::vertical([Constraint::Length(10)])
            .flex(Flex::Center)
            .areas(panel);

        let block = Block::bordered().title(Line::from(TITLE).centered());
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        let [_, buttons, _, status, sending] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let slots = Layout::horizontal(Command::iter().map(|_| Constraint::Length(10)))
            .flex(Flex::Center)
            .spacing(2)
            .split(buttons);
        for (command, area) in Command::iter().zip(slots.iter()) {
            self.draw_button(frame, *area, command, state);
        }

        if !state.status.is_empty() {
            frame.render_widget(
                Paragraph::new(state.status_text()).centered(),
                status,
            );
        }

        if state.loading {
            frame.render_widget(
                Paragraph::new(SENDING)
                    .centered()
                    .style(Style::default().fg(Color::Gray)),
                sending,
            );
        }
    }

    fn draw_button(&self, frame: &mut Frame, area: Rect, command: Command, state: &RequestState) {
        let color = match command {
            Command::Up => Color::Blue,
            Command::Down => Color::Green,
        };

        let mut style = if state.controls_enabled() {
            Style::default().fg(color)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        if command == self.focus && state.controls_enabled() {
            style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
        }

        let button = Paragraph::new(command.as_str())
            .centered()
            .style(style)
            .block(Block::bordered().border_style(style));
        frame.render_widget(button, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::DoorEndpoint;
    use crate::error::SendError;
    use crate::sender::Status;
    use async_trait::async_trait;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;
    use tokio::sync::Notify;

    struct HangingEndpoint {
        release: Notify,
    }

    #[async_trait]
    impl DoorEndpoint for HangingEndpoint {
        async fn post_command(&self, _command: Command) -> Result<(), SendError> {
            self.release.notified().await;
            Ok(())
        }
    }

    fn new_app() -> (App, Arc<HangingEndpoint>) {
        let endpoint = Arc::new(HangingEndpoint {
            release: Notify::new(),
        });
        (App::new(DoorCommandSender::new(endpoint.clone())), endpoint)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn render(app: &App, state: &RequestState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal.draw(|frame| app.draw(frame, state)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn keys_select_and_activate() {
        let (mut app, _) = new_app();
        assert_eq!(app.focus(), Command::Up);
        assert_eq!(app.handle_key(press(KeyCode::Enter)), Some(Command::Up));

        assert_eq!(app.handle_key(press(KeyCode::Right)), None);
        assert_eq!(app.focus(), Command::Down);
        assert_eq!(app.handle_key(press(KeyCode::Char(' '))), Some(Command::Down));

        assert_eq!(app.handle_key(press(KeyCode::Char('u'))), Some(Command::Up));
        assert_eq!(app.focus(), Command::Up);
        assert_eq!(app.handle_key(press(KeyCode::Char('d'))), Some(Command::Down));
    }

    #[test]
    fn quit_keys() {
        let (mut app, _) = new_app();
        assert!(!app.should_exit());
        app.handle_key(press(KeyCode::Char('q')));
        assert!(app.should_exit());

        let (mut app, _) = new_app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_exit());
    }

    #[tokio::test]
    async fn buttons_disabled_while_sending() {
        let (mut app, endpoint) = new_app();
        let mut rx = app.sender().subscribe();

        let command = app.handle_key(press(KeyCode::Enter)).unwrap();
        app.activate(command);
        rx.wait_for(|state| state.loading).await.unwrap();

        assert_eq!(app.handle_key(press(KeyCode::Enter)), None);
        assert_eq!(app.handle_key(press(KeyCode::Char('d'))), None);

        endpoint.release.notify_one();
        rx.wait_for(|state| !state.loading).await.unwrap();

        assert_eq!(app.sender().state().status_text(), "✓ Sent: Up");
        assert_eq!(app.handle_key(press(KeyCode::Char('d'))), Some(Command::Down));
    }

    #[test]
    fn idle_screen_has_buttons_only() {
        let (app, _) = new_app();
        let screen = render(&app, &RequestState::default());
        assert!(screen.contains("Door Control"));
        assert!(screen.contains("Up"));
        assert!(screen.contains("Down"));
        assert!(!screen.contains(SENDING));
        assert!(!screen.contains("Sent"));
    }

    #[test]
    fn buttons_render_left_to_right() {
        let (app, _) = new_app();
        let screen = render(&app, &RequestState::default());
        let row = screen
            .lines()
            .find(|line| line.contains("Up"))
            .unwrap();
        assert!(row.find("Up").unwrap() < row.find("Down").unwrap());
    }

    #[test]
    fn sending_screen_shows_indicator() {
        let (app, _) = new_app();
        let state = RequestState {
            loading: true,
            status: Status::Empty,
        };
        assert!(render(&app, &state).contains(SENDING));
    }

    #[test]
    fn result_screen_shows_status_line() {
        let (app, _) = new_app();
        let state = RequestState {
            loading: false,
            status: Status::Failed(SendError::Status(500)),
        };
        let screen = render(&app, &state);
        assert!(screen.contains("✗ Error: 500"));
        assert!(!screen.contains(SENDING));
    }
}
