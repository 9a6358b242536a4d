//! The back-office terminal UI: screen routing and the main loop.

use std::io;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::{info, warn};
use tui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};

use crate::backoffice::AdminStore;
use crate::config::Config;
use crate::db;
use crate::models::{Message, Partner, Project, TeamMember, Testimonial};
use crate::session::AdminSession;
use crate::store::Collection;
use crate::ui::{
    dashboard::{DashboardAction, DashboardState, Section, render_dashboard, handle_input as handle_dashboard_input},
    forms::AdminEntity,
    list::{ListAction, ListScreenState, render_list, handle_input as handle_list_input},
    login::{LoginAction, LoginState, render_login, handle_input as handle_login_input},
    message_detail::{MessageAction, MessageDetailState, render_message_detail, handle_input as handle_message_input},
    wizard::{WizardAction, WizardState, render_wizard, handle_input as handle_wizard_input},
};

// Represents the current screen in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppScreen {
    Login,
    Dashboard,
    List(Section),
    Wizard(Section),
    MessageDetail,
}

/// What a screen handler asks the loop to do next
enum Transition {
    Stay,
    To(AppScreen),
    OpenMessage(i64),
    Quit,
}

/// List and form state of one section
struct SectionState<T: AdminEntity> {
    list: Option<ListScreenState<T>>,
    wizard: Option<WizardState<T>>,
}

impl<T: AdminEntity> Default for SectionState<T> {
    fn default() -> Self {
        Self {
            list: None,
            wizard: None,
        }
    }
}

impl<T: AdminEntity> SectionState<T> {
    fn open(&mut self, collection: &Collection<T>) {
        self.list = Some(ListScreenState::new(collection.manager()));
        self.wizard = None;
    }

    fn refresh(&mut self, collection: &Collection<T>) {
        if let Some(list) = &mut self.list {
            list.refresh(collection.manager());
        }
    }

    fn notify(&mut self, notice: String) {
        if let Some(list) = &mut self.list {
            list.notice = Some(notice);
        }
    }
}

// Main application state
struct AppState {
    config: Config,
    store: AdminStore,
    session: Option<AdminSession>,
    screen: AppScreen,
    login_state: LoginState,
    dashboard_state: Option<DashboardState>,
    projects: SectionState<Project>,
    team: SectionState<TeamMember>,
    testimonials: SectionState<Testimonial>,
    partners: SectionState<Partner>,
    messages: SectionState<Message>,
    message_detail_state: Option<MessageDetailState>,
}

impl AppState {
    fn new(config: Config, store: AdminStore) -> Self {
        Self {
            config,
            store,
            session: None,
            screen: AppScreen::Login,
            login_state: LoginState::new(),
            dashboard_state: None,
            projects: SectionState::default(),
            team: SectionState::default(),
            testimonials: SectionState::default(),
            partners: SectionState::default(),
            messages: SectionState::default(),
            message_detail_state: None,
        }
    }

    /// The dashboard and everything behind it need a session
    fn show_dashboard(&mut self) {
        let Some(session) = &self.session else {
            self.screen = AppScreen::Login;
            return;
        };

        match &mut self.dashboard_state {
            Some(state) => state.stats = self.store.stats(state.range()),
            None => {
                let today = chrono::Local::now().date_naive();
                self.dashboard_state = Some(DashboardState::new(session, self.store.stats(None), today));
            }
        }
        self.screen = AppScreen::Dashboard;
    }

    fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            info!("{} logged out", session.operator());
        }
        self.dashboard_state = None;
        self.login_state = LoginState::new();
        self.screen = AppScreen::Login;
    }

    fn open_section(&mut self, section: Section) {
        match section {
            Section::Projects => self.projects.open(&self.store.projects),
            Section::Team => self.team.open(&self.store.team),
            Section::Testimonials => self.testimonials.open(&self.store.testimonials),
            Section::Partners => self.partners.open(&self.store.partners),
            Section::Messages => self.messages.open(&self.store.messages),
        }
        self.screen = AppScreen::List(section);
    }
}

pub async fn run(config: Config) -> Result<()> {
    let db = db::init(&config).await?;
    let store = AdminStore::open(db).await?;

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app_state = AppState::new(config, store);
    let result = run_app(&mut terminal, &mut app_state).await;

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app_state: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| render_screen(f, app_state))?;

        let transition = match app_state.screen {
            AppScreen::Login => handle_login_screen(app_state)?,
            AppScreen::Dashboard => handle_dashboard_screen(app_state)?,
            AppScreen::List(section) => handle_section_list(app_state, section).await?,
            AppScreen::Wizard(section) => handle_section_wizard(app_state, section).await?,
            AppScreen::MessageDetail => handle_message_detail_screen(app_state).await?,
        };

        match transition {
            Transition::Stay => {}
            Transition::Quit => break,
            Transition::To(AppScreen::Dashboard) => app_state.show_dashboard(),
            Transition::To(screen) => app_state.screen = screen,
            Transition::OpenMessage(id) => open_message(app_state, id).await,
        }
    }

    Ok(())
}

fn render_screen<B: Backend>(f: &mut Frame<B>, app_state: &mut AppState) {
    match app_state.screen {
        AppScreen::Login => render_login(f, &app_state.login_state),
        AppScreen::Dashboard => {
            if let Some(state) = &mut app_state.dashboard_state {
                render_dashboard(f, state);
            }
        }
        AppScreen::List(section) => match section {
            Section::Projects => render_section_list(f, &mut app_state.projects),
            Section::Team => render_section_list(f, &mut app_state.team),
            Section::Testimonials => render_section_list(f, &mut app_state.testimonials),
            Section::Partners => render_section_list(f, &mut app_state.partners),
            Section::Messages => render_section_list(f, &mut app_state.messages),
        },
        AppScreen::Wizard(section) => match section {
            Section::Projects => render_section_wizard(f, &app_state.projects),
            Section::Team => render_section_wizard(f, &app_state.team),
            Section::Testimonials => render_section_wizard(f, &app_state.testimonials),
            Section::Partners => render_section_wizard(f, &app_state.partners),
            Section::Messages => render_section_wizard(f, &app_state.messages),
        },
        AppScreen::MessageDetail => {
            if let Some(state) = &app_state.message_detail_state {
                render_message_detail(f, state);
            }
        }
    }
}

fn render_section_list<B: Backend, T: AdminEntity>(f: &mut Frame<B>, section: &mut SectionState<T>) {
    if let Some(list) = &mut section.list {
        render_list(f, list);
    }
}

fn render_section_wizard<B: Backend, T: AdminEntity>(f: &mut Frame<B>, section: &SectionState<T>) {
    if let Some(wizard) = &section.wizard {
        render_wizard(f, wizard);
    }
}

fn handle_login_screen(app_state: &mut AppState) -> Result<Transition> {
    match handle_login_input(&mut app_state.login_state)? {
        Some(LoginAction::Quit) => Ok(Transition::Quit),
        Some(LoginAction::Submit { operator, password }) => {
            match AdminSession::login(&app_state.config, &operator, &password) {
                Ok(session) => {
                    info!("{} logged in", session.operator());
                    app_state.session = Some(session);
                    app_state.login_state = LoginState::new();
                    Ok(Transition::To(AppScreen::Dashboard))
                }
                Err(e) => {
                    warn!("Login refused: {}", e);
                    app_state.login_state.error = Some(e.to_string());
                    Ok(Transition::Stay)
                }
            }
        }
        None => Ok(Transition::Stay),
    }
}

fn handle_dashboard_screen(app_state: &mut AppState) -> Result<Transition> {
    let Some(state) = &mut app_state.dashboard_state else {
        return Ok(Transition::To(AppScreen::Login));
    };

    match handle_dashboard_input(state)? {
        Some(DashboardAction::Quit) => return Ok(Transition::Quit),
        Some(DashboardAction::Logout) => app_state.logout(),
        Some(DashboardAction::Open(section)) => app_state.open_section(section),
        Some(DashboardAction::RangeChanged) => {
            state.stats = app_state.store.stats(state.range());
        }
        None => {}
    }
    Ok(Transition::Stay)
}

async fn handle_section_list(app_state: &mut AppState, section: Section) -> Result<Transition> {
    let store = &mut app_state.store;
    match section {
        Section::Projects => handle_list_screen(section, &mut store.projects, &mut app_state.projects).await,
        Section::Team => handle_list_screen(section, &mut store.team, &mut app_state.team).await,
        Section::Testimonials => {
            handle_list_screen(section, &mut store.testimonials, &mut app_state.testimonials).await
        }
        Section::Partners => handle_list_screen(section, &mut store.partners, &mut app_state.partners).await,
        Section::Messages => handle_list_screen(section, &mut store.messages, &mut app_state.messages).await,
    }
}

async fn handle_section_wizard(app_state: &mut AppState, section: Section) -> Result<Transition> {
    let store = &mut app_state.store;
    match section {
        Section::Projects => handle_wizard_screen(section, &mut store.projects, &mut app_state.projects).await,
        Section::Team => handle_wizard_screen(section, &mut store.team, &mut app_state.team).await,
        Section::Testimonials => {
            handle_wizard_screen(section, &mut store.testimonials, &mut app_state.testimonials).await
        }
        Section::Partners => handle_wizard_screen(section, &mut store.partners, &mut app_state.partners).await,
        Section::Messages => handle_wizard_screen(section, &mut store.messages, &mut app_state.messages).await,
    }
}

async fn handle_list_screen<T: AdminEntity>(
    section: Section,
    collection: &mut Collection<T>,
    state: &mut SectionState<T>,
) -> Result<Transition> {
    let Some(list) = &mut state.list else {
        return Ok(Transition::To(AppScreen::Dashboard));
    };

    match handle_list_input(list)? {
        Some(ListAction::Back) => return Ok(Transition::To(AppScreen::Dashboard)),
        Some(ListAction::New) => {
            state.wizard = Some(WizardState::new());
            return Ok(Transition::To(AppScreen::Wizard(section)));
        }
        Some(ListAction::Edit(id)) => {
            if let Some(record) = collection.manager().get(id) {
                state.wizard = Some(WizardState::from_existing(record));
                return Ok(Transition::To(AppScreen::Wizard(section)));
            }
        }
        Some(ListAction::Open(id)) => return Ok(Transition::OpenMessage(id)),
        Some(ListAction::Delete(id)) => {
            let notice = match collection.delete(id).await {
                Ok(Some(_)) => format!("Deleted {} {}", T::SINGULAR.to_lowercase(), id),
                Ok(None) => format!("{} {} no longer exists", T::SINGULAR, id),
                Err(e) => format!("Delete failed: {}", e),
            };
            list.notice = Some(notice);
            list.refresh(collection.manager());
        }
        Some(ListAction::Refilter) => list.refresh(collection.manager()),
        None => {}
    }
    Ok(Transition::Stay)
}

async fn handle_wizard_screen<T: AdminEntity>(
    section: Section,
    collection: &mut Collection<T>,
    state: &mut SectionState<T>,
) -> Result<Transition> {
    let Some(wizard) = &mut state.wizard else {
        return Ok(Transition::To(AppScreen::List(section)));
    };

    match handle_wizard_input(wizard)? {
        Some(WizardAction::Cancel) => {
            state.wizard = None;
            Ok(Transition::To(AppScreen::List(section)))
        }
        Some(WizardAction::Save(draft)) => {
            let saved = match wizard.editing_id {
                Some(id) => collection.update(id, draft).await,
                None => collection.create(draft).await,
            };
            match saved {
                Ok(record) => {
                    state.wizard = None;
                    state.refresh(collection);
                    state.notify(format!("Saved {} {}", T::SINGULAR.to_lowercase(), record.id()));
                    Ok(Transition::To(AppScreen::List(section)))
                }
                Err(e) => {
                    warn!("Failed to save {}: {}", T::SINGULAR.to_lowercase(), e);
                    wizard.error = Some(e.to_string());
                    Ok(Transition::Stay)
                }
            }
        }
        None => Ok(Transition::Stay),
    }
}

async fn open_message(app_state: &mut AppState, id: i64) {
    match app_state.store.messages.view(id).await {
        Ok(message) => {
            app_state.message_detail_state = Some(MessageDetailState::new(message));
            app_state.messages.refresh(&app_state.store.messages);
            app_state.screen = AppScreen::MessageDetail;
        }
        Err(e) => app_state.messages.notify(format!("Could not open message: {}", e)),
    }
}

async fn handle_message_detail_screen(app_state: &mut AppState) -> Result<Transition> {
    let Some(state) = &mut app_state.message_detail_state else {
        return Ok(Transition::To(AppScreen::List(Section::Messages)));
    };

    match handle_message_input(state)? {
        Some(MessageAction::Back) => {
            app_state.message_detail_state = None;
            app_state.messages.refresh(&app_state.store.messages);
            Ok(Transition::To(AppScreen::List(Section::Messages)))
        }
        Some(MessageAction::SetStatus(status)) => {
            match app_state.store.messages.set_status(state.message.id, status).await {
                Ok(message) => state.message = message,
                Err(e) => warn!("Failed to update message {}: {}", state.message.id, e),
            }
            Ok(Transition::Stay)
        }
        None => Ok(Transition::Stay),
    }
}
