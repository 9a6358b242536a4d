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

use crate::store::{ListManager, Query};
use crate::ui::centered_rect;
use crate::ui::forms::AdminEntity;

/// One list screen: a filtered snapshot of a collection plus the query that produced it
pub struct ListScreenState<T: AdminEntity> {
    items: Vec<T>,
    list_state: ListState,
    pub query: Query,
    pub search_mode: bool,
    active_facet: usize,
    show_delete_confirmation: bool,
    /// Last error or confirmation, shown in the footer
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    Back,
    New,
    Edit(i64),
    Delete(i64),
    Open(i64),
    /// The query changed and the snapshot must be rebuilt
    Refilter,
}

impl<T: AdminEntity> ListScreenState<T> {
    pub fn new(manager: &ListManager<T>) -> Self {
        let mut state = Self {
            items: Vec::new(),
            list_state: ListState::default(),
            query: Query::default(),
            search_mode: false,
            active_facet: 0,
            show_delete_confirmation: false,
            notice: None,
        };
        state.refresh(manager);
        state
    }

    /// Re-run the query, keeping the selection in range
    pub fn refresh(&mut self, manager: &ListManager<T>) {
        self.items = manager.query(&self.query).into_iter().cloned().collect();
        let selected = match self.list_state.selected() {
            _ if self.items.is_empty() => None,
            Some(i) => Some(i.min(self.items.len() - 1)),
            None => Some(0),
        };
        self.list_state.select(selected);
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.items.len() => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }

        let i = match self.list_state.selected() {
            Some(0) | None => self.items.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    pub fn selected(&self) -> Option<&T> {
        self.list_state.selected().and_then(|i| self.items.get(i))
    }

    fn selected_id(&self) -> Option<i64> {
        self.selected().map(|record| record.id())
    }

    fn cycle_facet(&mut self, forward: bool) -> Option<ListAction> {
        let facet = T::facets().get(self.active_facet)?;
        let next = self.query.filter(facet.key).cycle(facet.options, forward);
        self.query.set_filter(facet.key, next);
        Some(ListAction::Refilter)
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Option<ListAction> {
        if self.search_mode {
            return match key {
                KeyCode::Char(c) => {
                    self.query.search.push(c);
                    Some(ListAction::Refilter)
                }
                KeyCode::Backspace => {
                    self.query.search.pop();
                    Some(ListAction::Refilter)
                }
                KeyCode::Enter | KeyCode::Esc => {
                    self.search_mode = false;
                    None
                }
                _ => None,
            };
        }

        if self.show_delete_confirmation {
            match key {
                KeyCode::Char('y') => {
                    self.show_delete_confirmation = false;
                    return self.selected_id().map(ListAction::Delete);
                }
                KeyCode::Char('n') | KeyCode::Char('q') | KeyCode::Esc => {
                    self.show_delete_confirmation = false;
                }
                _ => {}
            }
            return None;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Esc => Some(ListAction::Back),
            KeyCode::Char('/') => {
                self.search_mode = true;
                None
            }
            KeyCode::Char('f') => self.cycle_facet(true),
            KeyCode::Char('F') => self.cycle_facet(false),
            KeyCode::Tab => {
                let count = T::facets().len();
                if count > 0 {
                    self.active_facet = (self.active_facet + 1) % count;
                }
                None
            }
            KeyCode::Char('n') if T::EDITABLE => Some(ListAction::New),
            KeyCode::Char('e') if T::EDITABLE => self.selected_id().map(ListAction::Edit),
            KeyCode::Char('d') => {
                if self.selected().is_some() {
                    self.show_delete_confirmation = true;
                }
                None
            }
            KeyCode::Enter => self.selected_id().map(|id| {
                if T::EDITABLE {
                    ListAction::Edit(id)
                } else {
                    ListAction::Open(id)
                }
            }),
            KeyCode::Down => {
                self.next();
                None
            }
            KeyCode::Up => {
                self.previous();
                None
            }
            _ => None,
        }
    }
}

pub fn handle_input<T: AdminEntity>(state: &mut ListScreenState<T>) -> Result<Option<ListAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(state.handle_key(key.code));
    }
    Ok(None)
}

pub fn render_list<B: Backend, T: AdminEntity>(frame: &mut Frame<B>, state: &mut ListScreenState<T>) {
    let size = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ].as_ref())
        .split(size);

    render_query_bar::<B, T>(frame, state, chunks[0]);

    let items: Vec<ListItem> = state
        .items
        .iter()
        .map(|record| ListItem::new(Spans::from(Span::raw(record.row()))))
        .collect();

    let title = format!("{} ({})", T::TITLE, state.items().len());
    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(list, chunks[1], &mut state.list_state);

    let help = if state.search_mode {
        "Type to search | <Enter>/<Esc> Done".to_string()
    } else if T::EDITABLE {
        "</> Search | <F> Filter | <Tab> Next filter | <N> New | <E> Edit | <D> Delete | <Esc> Back"
            .to_string()
    } else {
        "</> Search | <F> Filter | <Enter> Open | <D> Delete | <Esc> Back".to_string()
    };
    let footer = match &state.notice {
        Some(notice) => format!("{} | {}", notice, help),
        None => help,
    };

    let buttons = Paragraph::new(footer)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));

    frame.render_widget(buttons, chunks[2]);

    if state.show_delete_confirmation {
        render_delete_confirmation(frame, size, T::SINGULAR);
    }
}

fn render_query_bar<B: Backend, T: AdminEntity>(frame: &mut Frame<B>, state: &ListScreenState<T>, area: Rect) {
    let search_style = if state.search_mode {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::styled("Search: ", search_style),
        Span::raw(state.query.search.clone()),
    ];
    if state.search_mode {
        spans.push(Span::raw("|"));
    }

    for (i, facet) in T::facets().iter().enumerate() {
        let style = if i == state.active_facet {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{}: {}", facet.label, state.query.filter(facet.key).label()),
            style,
        ));
    }

    let bar = Paragraph::new(Spans::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(bar, area);
}

fn render_delete_confirmation<B: Backend>(frame: &mut Frame<B>, size: Rect, singular: &str) {
    let popup_area = centered_rect(50, 20, size);

    let popup = Paragraph::new(vec![
        Spans::from(""),
        Spans::from(format!("Delete this {}?", singular.to_lowercase())),
        Spans::from(""),
        Spans::from("<Y> Yes  <N> No"),
    ])
    .block(Block::default().title("Confirm Delete").borders(Borders::ALL))
    .style(Style::default().fg(Color::White).bg(Color::Black));

    frame.render_widget(popup, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Message, Partner, Project};
    use crate::seed;
    use crate::store::FilterValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn search_mode_collects_text() {
        let manager = ListManager::new(seed::partners());
        let mut state = ListScreenState::<Partner>::new(&manager);

        assert_eq!(state.handle_key(KeyCode::Char('/')), None);
        assert_eq!(state.handle_key(KeyCode::Char('g')), Some(ListAction::Refilter));
        state.refresh(&manager);
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items()[0].name, "Google");

        state.handle_key(KeyCode::Enter);
        assert!(!state.search_mode);
        assert_eq!(state.handle_key(KeyCode::Esc), Some(ListAction::Back));
    }

    #[test]
    fn delete_requires_confirmation() {
        let manager = ListManager::new(seed::partners());
        let mut state = ListScreenState::<Partner>::new(&manager);
        state.next();

        assert_eq!(state.handle_key(KeyCode::Char('d')), None);
        assert_eq!(state.handle_key(KeyCode::Char('e')), None);
        assert_eq!(state.handle_key(KeyCode::Char('y')), Some(ListAction::Delete(2)));

        state.handle_key(KeyCode::Char('d'));
        assert_eq!(state.handle_key(KeyCode::Esc), None);
        assert_eq!(state.handle_key(KeyCode::Char('y')), None);
    }

    #[test]
    fn facet_cycling_updates_query() {
        let manager = ListManager::new(seed::projects());
        let mut state = ListScreenState::<Project>::new(&manager);

        assert_eq!(state.handle_key(KeyCode::Char('f')), Some(ListAction::Refilter));
        assert_eq!(state.query.filter("category"), &FilterValue::Is("Web".into()));
        state.refresh(&manager);
        assert!(state.items().is_empty());
        assert_eq!(state.selected(), None);

        state.handle_key(KeyCode::Tab);
        state.handle_key(KeyCode::Char('F'));
        assert_eq!(state.query.filter("status"), &FilterValue::Is("inProgress".into()));
    }

    #[test]
    fn messages_open_instead_of_edit() {
        let manager = ListManager::new(seed::messages());
        let mut state = ListScreenState::<Message>::new(&manager);

        assert_eq!(state.handle_key(KeyCode::Char('n')), None);
        assert_eq!(state.handle_key(KeyCode::Enter), Some(ListAction::Open(1)));
        state.previous();
        assert_eq!(state.handle_key(KeyCode::Enter), Some(ListAction::Open(2)));
    }

    #[test]
    fn refresh_clamps_selection_after_delete() {
        let mut manager = ListManager::new(seed::partners());
        let mut state = ListScreenState::<Partner>::new(&manager);
        state.next();
        manager.delete(2);
        state.refresh(&manager);
        assert_eq!(state.selected().map(|p| p.id), Some(1));
    }
}
