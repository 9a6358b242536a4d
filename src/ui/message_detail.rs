use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::{Message, MessageStatus};

pub struct MessageDetailState {
    pub message: Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageAction {
    Back,
    SetStatus(MessageStatus),
}

impl MessageDetailState {
    pub fn new(message: Message) -> Self {
        Self { message }
    }

    pub fn handle_key(&self, key: KeyCode) -> Option<MessageAction> {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => Some(MessageAction::Back),
            KeyCode::Char('r') => Some(MessageAction::SetStatus(MessageStatus::Replied)),
            KeyCode::Char('s') => Some(MessageAction::SetStatus(self.message.status.next())),
            _ => None,
        }
    }
}

pub fn handle_input(state: &MessageDetailState) -> Result<Option<MessageAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(state.handle_key(key.code));
    }
    Ok(None)
}

fn status_color(status: MessageStatus) -> Color {
    match status {
        MessageStatus::New => Color::Green,
        MessageStatus::Read => Color::Gray,
        MessageStatus::Replied => Color::Cyan,
    }
}

pub fn render_message_detail<B: Backend>(f: &mut Frame<B>, state: &MessageDetailState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(7),
                Constraint::Min(3),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.size());

    let message = &state.message;
    let label = Style::default().fg(Color::Yellow);

    let header = Paragraph::new(vec![
        Spans::from(vec![Span::styled("From: ", label), Span::raw(message.name.clone())]),
        Spans::from(vec![Span::styled("Email: ", label), Span::raw(message.email.clone())]),
        Spans::from(vec![Span::styled("Phone: ", label), Span::raw(message.phone.clone())]),
        Spans::from(vec![
            Span::styled("Received: ", label),
            Span::raw(message.created_at.format("%Y-%m-%d %H:%M").to_string()),
        ]),
        Spans::from(vec![
            Span::styled("Status: ", label),
            Span::styled(
                message.status.to_string(),
                Style::default()
                    .fg(status_color(message.status))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ])
    .block(Block::default().title("Message").borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let body = Paragraph::new(message.message.clone())
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, chunks[1]);

    let help = Paragraph::new("R - Mark replied | S - Next status | Esc - Back")
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn keys_map_to_status_changes() {
        let state = MessageDetailState::new(seed::messages().remove(1));

        assert_eq!(
            state.handle_key(KeyCode::Char('r')),
            Some(MessageAction::SetStatus(MessageStatus::Replied))
        );
        assert_eq!(
            state.handle_key(KeyCode::Char('s')),
            Some(MessageAction::SetStatus(MessageStatus::Replied))
        );
        assert_eq!(state.handle_key(KeyCode::Esc), Some(MessageAction::Back));
        assert_eq!(state.handle_key(KeyCode::Char('x')), None);
    }
}
