use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::centered_rect;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginField {
    #[default]
    Operator,
    Password,
}

#[derive(Debug, Default)]
pub struct LoginState {
    pub operator: String,
    pub password: String,
    pub current_field: LoginField,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginAction {
    Quit,
    Submit { operator: String, password: String },
}

impl LoginState {
    pub fn new() -> Self {
        Self::default()
    }

    fn switch_field(&mut self) {
        self.current_field = match self.current_field {
            LoginField::Operator => LoginField::Password,
            LoginField::Password => LoginField::Operator,
        };
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Option<LoginAction> {
        match key {
            KeyCode::Esc => return Some(LoginAction::Quit),
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => self.switch_field(),
            KeyCode::Enter => {
                if self.current_field == LoginField::Operator {
                    self.switch_field();
                } else {
                    return Some(LoginAction::Submit {
                        operator: self.operator.clone(),
                        password: std::mem::take(&mut self.password),
                    });
                }
            }
            KeyCode::Char(c) => match self.current_field {
                LoginField::Operator => self.operator.push(c),
                LoginField::Password => self.password.push(c),
            },
            KeyCode::Backspace => {
                match self.current_field {
                    LoginField::Operator => self.operator.pop(),
                    LoginField::Password => self.password.pop(),
                };
            }
            _ => {}
        }
        None
    }
}

pub fn handle_input(state: &mut LoginState) -> Result<Option<LoginAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(state.handle_key(key.code));
    }
    Ok(None)
}

pub fn render_login<B: Backend>(f: &mut Frame<B>, state: &LoginState) {
    let area = centered_rect(50, 40, f.size());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(1),
            ]
            .as_ref(),
        )
        .split(area);

    let title = Paragraph::new("Ardent Soft Back-Office")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let fields = [
        (LoginField::Operator, "Operator", state.operator.clone()),
        (LoginField::Password, "Password", "*".repeat(state.password.chars().count())),
    ];
    for (i, (field, label, value)) in fields.into_iter().enumerate() {
        let style = if state.current_field == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let input = Paragraph::new(Spans::from(vec![
            Span::styled(format!("{}: ", label), style),
            Span::raw(value),
        ]))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(input, chunks[i + 1]);
    }

    let (text, style) = match &state.error {
        Some(error) => (error.clone(), Style::default().fg(Color::Red)),
        None => (
            "Tab - Switch field | Enter - Log in | Esc - Quit".to_string(),
            Style::default().fg(Color::Gray),
        ),
    };
    f.render_widget(Paragraph::new(text).style(style), chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn enter_moves_to_password_then_submits() {
        let mut state = LoginState::new();
        for c in "akmal".chars() {
            state.handle_key(KeyCode::Char(c));
        }
        assert_eq!(state.handle_key(KeyCode::Enter), None);
        for c in "pw".chars() {
            state.handle_key(KeyCode::Char(c));
        }
        state.handle_key(KeyCode::Char('x'));
        state.handle_key(KeyCode::Backspace);

        assert_eq!(
            state.handle_key(KeyCode::Enter),
            Some(LoginAction::Submit {
                operator: "akmal".into(),
                password: "pw".into()
            })
        );
        assert!(state.password.is_empty());
    }

    #[test]
    fn esc_quits() {
        assert_eq!(LoginState::new().handle_key(KeyCode::Esc), Some(LoginAction::Quit));
    }
}
