use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::backoffice::{DashboardStats, DateRange};
use crate::models::MessageStatus;
use crate::session::AdminSession;
use crate::ui::components::date_input::{DateInputState, render_date_input};

/// Back-office sections reachable from the dashboard menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Projects,
    Team,
    Testimonials,
    Partners,
    Messages,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Projects,
        Section::Team,
        Section::Testimonials,
        Section::Partners,
        Section::Messages,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Projects => "Projects",
            Section::Team => "Team",
            Section::Testimonials => "Testimonials",
            Section::Partners => "Partners",
            Section::Messages => "Messages",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardFocus {
    Menu,
    From,
    To,
}

pub struct DashboardState {
    operator: String,
    menu_state: ListState,
    pub stats: DashboardStats,
    pub focus: DashboardFocus,
    pub range_enabled: bool,
    pub from: DateInputState,
    pub to: DateInputState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction {
    Quit,
    Logout,
    Open(Section),
    /// The stats must be recomputed for the new date range
    RangeChanged,
}

impl DashboardState {
    /// Only reachable with a session, which the login screen hands out
    pub fn new(session: &AdminSession, stats: DashboardStats, today: NaiveDate) -> Self {
        let mut menu_state = ListState::default();
        menu_state.select(Some(0));
        let year_start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);

        Self {
            operator: session.operator().to_string(),
            menu_state,
            stats,
            focus: DashboardFocus::Menu,
            range_enabled: false,
            from: DateInputState::new(year_start),
            to: DateInputState::new(today),
        }
    }

    pub fn range(&self) -> Option<DateRange> {
        self.range_enabled.then_some(DateRange {
            from: self.from.date,
            to: self.to.date,
        })
    }

    pub fn selected_section(&self) -> Section {
        self.menu_state
            .selected()
            .and_then(|i| Section::ALL.get(i).copied())
            .unwrap_or(Section::Projects)
    }

    fn move_selection(&mut self, forward: bool) {
        let len = Section::ALL.len();
        let i = self.menu_state.selected().unwrap_or(0);
        let next = if forward { (i + 1) % len } else { (i + len - 1) % len };
        self.menu_state.select(Some(next));
    }

    fn focused_date(&mut self) -> Option<&mut DateInputState> {
        match self.focus {
            DashboardFocus::Menu => None,
            DashboardFocus::From => Some(&mut self.from),
            DashboardFocus::To => Some(&mut self.to),
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Option<DashboardAction> {
        if let Some(date) = self.focused_date() {
            if date.editing {
                return match key {
                    KeyCode::Enter | KeyCode::Esc => {
                        date.toggle_editing();
                        self.range_enabled.then_some(DashboardAction::RangeChanged)
                    }
                    other => {
                        date.handle_key(other);
                        None
                    }
                };
            }
        }

        match key {
            KeyCode::Char('q') | KeyCode::Esc => Some(DashboardAction::Quit),
            KeyCode::Char('l') => Some(DashboardAction::Logout),
            KeyCode::Char('r') => {
                self.range_enabled = !self.range_enabled;
                Some(DashboardAction::RangeChanged)
            }
            KeyCode::Tab => {
                self.focus = match self.focus {
                    DashboardFocus::Menu => DashboardFocus::From,
                    DashboardFocus::From => DashboardFocus::To,
                    DashboardFocus::To => DashboardFocus::Menu,
                };
                None
            }
            KeyCode::Up if self.focus == DashboardFocus::Menu => {
                self.move_selection(false);
                None
            }
            KeyCode::Down if self.focus == DashboardFocus::Menu => {
                self.move_selection(true);
                None
            }
            KeyCode::Enter => match self.focused_date() {
                Some(date) => {
                    date.toggle_editing();
                    None
                }
                None => Some(DashboardAction::Open(self.selected_section())),
            },
            _ => None,
        }
    }
}

pub fn handle_input(state: &mut DashboardState) -> Result<Option<DashboardAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(state.handle_key(key.code));
    }
    Ok(None)
}

pub fn render_dashboard<B: Backend>(f: &mut Frame<B>, state: &mut DashboardState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.size());

    let title = Paragraph::new(format!("Ardent Soft Back-Office | logged in as {}", state.operator))
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(rows[1]);

    let items: Vec<ListItem> = Section::ALL
        .iter()
        .map(|section| ListItem::new(section.title()))
        .collect();
    let menu_style = if state.focus == DashboardFocus::Menu {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let menu = List::new(items)
        .block(Block::default().title(Span::styled("Sections", menu_style)).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
    f.render_stateful_widget(menu, columns[0], &mut state.menu_state);

    render_stats(f, state, columns[1]);

    let dates = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(rows[2]);
    render_date_input(f, dates[0], "From", &state.from, state.focus == DashboardFocus::From);
    render_date_input(f, dates[1], "To", &state.to, state.focus == DashboardFocus::To);

    let help = Paragraph::new(
        "Enter - Open | Tab - Focus dates | R - Toggle date range | L - Log out | Q - Quit",
    )
    .style(Style::default().fg(Color::Gray))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, rows[3]);
}

fn stat_line(label: &str, value: String) -> Spans<'static> {
    Spans::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(Color::Yellow)),
        Span::raw(value),
    ])
}

fn render_stats<B: Backend>(f: &mut Frame<B>, state: &DashboardState, area: Rect) {
    let stats = &state.stats;
    let mut lines = vec![
        stat_line("Projects", stats.total_projects.to_string()),
        stat_line(
            "  completed / in progress",
            format!("{} / {}", stats.completed_projects, stats.in_progress_projects),
        ),
    ];
    for (category, count) in &stats.projects_by_category {
        lines.push(stat_line(&format!("  {}", category), count.to_string()));
    }
    lines.push(stat_line("Team members", stats.total_team_members.to_string()));
    lines.push(stat_line(
        "Testimonials",
        format!("{} (avg rating {:.1})", stats.total_testimonials, stats.average_rating),
    ));
    lines.push(stat_line("Partners", stats.total_partners.to_string()));
    lines.push(stat_line(
        "Messages",
        MessageStatus::ALL
            .iter()
            .map(|status| format!("{} {}", stats.messages.get(*status), status))
            .collect::<Vec<_>>()
            .join(", "),
    ));

    let title = match state.range() {
        Some(range) => format!("Overview {} to {}", range.from, range.to),
        None => "Overview (all time)".to_string(),
    };

    let panel = Paragraph::new(lines).block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(panel, area);
}
