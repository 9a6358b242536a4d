use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::store::Draft;
use crate::ui::forms::{AdminEntity, FieldKind, FormField};

pub enum WizardAction<D> {
    Cancel,
    Save(D),
}

/// Form state for creating or editing one record
pub struct WizardState<T: AdminEntity> {
    /// `None` while creating
    pub editing_id: Option<i64>,
    pub fields: Vec<FormField>,
    pub current_field: usize,
    pub editing: bool,
    pub error: Option<String>,
    _entity: std::marker::PhantomData<T>,
}

impl<T: AdminEntity> WizardState<T> {
    pub fn new() -> Self {
        Self {
            editing_id: None,
            fields: T::form_fields(None),
            current_field: 0,
            editing: false,
            error: None,
            _entity: std::marker::PhantomData,
        }
    }

    pub fn from_existing(record: &T) -> Self {
        Self {
            editing_id: Some(record.id()),
            fields: T::form_fields(Some(record)),
            ..Self::new()
        }
    }

    fn current(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.current_field)
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.current_field = (self.current_field + 1) % self.fields.len();
        }
    }

    pub fn previous_field(&mut self) {
        if !self.fields.is_empty() {
            self.current_field = (self.current_field + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Enter starts typing into a text field and steps a choice field
    pub fn toggle_editing(&mut self) {
        if self.editing {
            self.editing = false;
            return;
        }
        let Some(field) = self.fields.get_mut(self.current_field) else {
            return;
        };
        if field.kind == FieldKind::Text {
            self.editing = true;
        } else {
            field.cycle(true);
        }
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }
        if let Some(field) = self.current() {
            match key {
                KeyCode::Char(c) => field.value.push(c),
                KeyCode::Backspace => {
                    field.value.pop();
                }
                _ => {}
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Option<WizardAction<T::Draft>> {
        match key {
            KeyCode::Esc => {
                if self.editing {
                    self.editing = false;
                } else {
                    return Some(WizardAction::Cancel);
                }
            }
            KeyCode::Enter => self.toggle_editing(),
            KeyCode::Up if !self.editing => self.previous_field(),
            KeyCode::Down | KeyCode::Tab if !self.editing => self.next_field(),
            KeyCode::Left if !self.editing => {
                if let Some(field) = self.current() {
                    field.cycle(false);
                }
            }
            KeyCode::Right if !self.editing => {
                if let Some(field) = self.current() {
                    field.cycle(true);
                }
            }
            KeyCode::Char('s') if !self.editing => {
                let draft = T::draft_from_form(&self.fields);
                match draft.validate() {
                    Ok(()) => {
                        self.error = None;
                        return Some(WizardAction::Save(draft));
                    }
                    Err(e) => self.error = Some(e.to_string()),
                }
            }
            _ if self.editing => self.edit_current_field(key),
            _ => {}
        }
        None
    }
}

pub fn handle_input<T: AdminEntity>(state: &mut WizardState<T>) -> Result<Option<WizardAction<T::Draft>>> {
    if let Event::Key(key) = event::read()? {
        return Ok(state.handle_key(key.code));
    }
    Ok(None)
}

pub fn render_wizard<B: Backend, T: AdminEntity>(f: &mut Frame<B>, state: &WizardState<T>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.size());

    let title_text = match state.editing_id {
        Some(_) => format!("Edit {}", T::SINGULAR),
        None => format!("New {}", T::SINGULAR),
    };

    let title = Paragraph::new(title_text)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    render_form(f, state, chunks[1]);

    let help_text = match (&state.error, state.editing) {
        (_, true) => "Enter - Save field | Esc - Stop editing".to_string(),
        (Some(error), false) => format!("{} | S - Save | Esc - Cancel", error),
        (None, false) => {
            "Enter - Edit field | Left/Right - Change option | Up/Down - Navigate | S - Save | Esc - Cancel"
                .to_string()
        }
    };
    let help_style = if state.error.is_some() && !state.editing {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Gray)
    };

    let help = Paragraph::new(help_text)
        .style(help_style)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

fn render_form<B: Backend, T: AdminEntity>(f: &mut Frame<B>, state: &WizardState<T>, area: Rect) {
    let items: Vec<ListItem> = state
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let selected = i == state.current_field;
            let label_style = if selected {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };

            let value = match field.kind {
                FieldKind::Choice(_) => format!("< {} >", field.value),
                FieldKind::Text if selected && state.editing => format!("{}|", field.value),
                FieldKind::Text => field.value.clone(),
            };
            let value_style = if selected && state.editing {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            ListItem::new(Spans::from(vec![
                Span::styled(format!("{}: ", field.label), label_style),
                Span::styled(value, value_style),
            ]))
        })
        .collect();

    // Keeps the focused field scrolled into view on small terminals
    let mut list_state = ListState::default();
    list_state.select(Some(state.current_field));

    let form_list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!("{} Details", T::SINGULAR)));

    f.render_stateful_widget(form_list, area, &mut list_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Partner, Project, ProjectStatus};
    use crate::seed;
    use crate::ui::forms::value;
    use pretty_assertions::assert_eq;

    fn type_text(state: &mut WizardState<Partner>, text: &str) {
        state.handle_key(KeyCode::Enter);
        for c in text.chars() {
            state.handle_key(KeyCode::Char(c));
        }
        state.handle_key(KeyCode::Enter);
    }

    #[test]
    fn save_is_refused_until_required_fields_are_filled() {
        let mut state = WizardState::<Partner>::new();

        assert!(state.handle_key(KeyCode::Char('s')).is_none());
        assert_eq!(state.error.as_deref(), Some("name is required"));

        type_text(&mut state, "Acme");
        state.next_field();
        type_text(&mut state, "Cloud");
        state.next_field();
        type_text(&mut state, "https://acme.io");
        state.next_field();
        type_text(&mut state, "Hosting");

        match state.handle_key(KeyCode::Char('s')) {
            Some(WizardAction::Save(draft)) => {
                assert_eq!(draft.name, "Acme");
                assert_eq!(draft.category, "Cloud");
                assert_eq!(draft.logo, "");
            }
            _ => panic!("expected save"),
        }
        assert_eq!(state.error, None);
    }

    #[test]
    fn typing_s_while_editing_is_text() {
        let mut state = WizardState::<Partner>::new();
        type_text(&mut state, "sss");
        assert_eq!(value(&state.fields, "name"), "sss");
    }

    #[test]
    fn esc_stops_editing_before_cancelling() {
        let mut state = WizardState::<Partner>::new();
        state.handle_key(KeyCode::Enter);
        assert!(state.editing);
        assert!(state.handle_key(KeyCode::Esc).is_none());
        assert!(!state.editing);
        assert!(matches!(state.handle_key(KeyCode::Esc), Some(WizardAction::Cancel)));
    }

    #[test]
    fn existing_record_saves_edited_choice() {
        let project = &seed::projects()[0];
        let mut state = WizardState::from_existing(project);
        assert_eq!(state.editing_id, Some(1));

        let status = state.fields.iter().position(|f| f.key == "status").unwrap();
        state.current_field = status;
        state.handle_key(KeyCode::Enter);
        assert!(!state.editing);

        match state.handle_key(KeyCode::Char('s')) {
            Some(WizardAction::Save(draft)) => {
                assert_eq!(draft.status, ProjectStatus::InProgress);
                assert_eq!(draft.client, "YOBIUM LLC");
            }
            _ => panic!("expected save"),
        }
    }

    #[test]
    fn navigation_wraps() {
        let mut state = WizardState::<Project>::new();
        state.previous_field();
        assert_eq!(state.current_field, state.fields.len() - 1);
        state.next_field();
        assert_eq!(state.current_field, 0);
    }
}
