use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::Paragraph,
    Frame,
};

use crate::api::ApiError;
use crate::models::{NewProject, Project};
use crate::ui::project_table::{render_project_table, ProjectTableAction, ProjectTableState};

/// The list screen: one of three mutually exclusive states.
pub enum HomeState {
    Loading,
    Failed(String),
    Loaded(ProjectTableState),
}

pub enum HomeAction {
    Quit,
    /// Start over from `Loading` and issue the list query again.
    Reload,
    Create(NewProject),
}

impl HomeState {
    /// Fold a list query result into the screen.
    ///
    /// A successful refetch keeps the current table (and its dialog state)
    /// and only swaps the rows.
    pub fn apply_query_result(&mut self, result: Result<Vec<Project>, ApiError>) {
        match result {
            Ok(projects) => match self {
                HomeState::Loaded(table) => table.replace_projects(projects),
                _ => *self = HomeState::Loaded(ProjectTableState::new(projects)),
            },
            Err(err) => *self = HomeState::Failed(err.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, HomeState::Loading)
    }

    pub fn table(&self) -> Option<&ProjectTableState> {
        match self {
            HomeState::Loaded(table) => Some(table),
            _ => None,
        }
    }

    pub fn table_mut(&mut self) -> Option<&mut ProjectTableState> {
        match self {
            HomeState::Loaded(table) => Some(table),
            _ => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Option<HomeAction> {
        if let HomeState::Loaded(table) = self {
            if table.is_dialog_open() {
                return table.handle_key(key).map(|ProjectTableAction::Create(input)| HomeAction::Create(input));
            }
        }

        match key {
            KeyCode::Char('q') | KeyCode::Esc => Some(HomeAction::Quit),
            KeyCode::Char('r') if matches!(self, HomeState::Failed(_)) => Some(HomeAction::Reload),
            _ => match self {
                HomeState::Loaded(table) => table
                    .handle_key(key)
                    .map(|ProjectTableAction::Create(input)| HomeAction::Create(input)),
                _ => None,
            },
        }
    }
}

pub fn render_home<B: Backend>(frame: &mut Frame<B>, state: &mut HomeState) {
    let size = frame.size();

    match state {
        HomeState::Loading => {
            frame.render_widget(Paragraph::new("Loading..."), size);
        }
        HomeState::Failed(message) => {
            frame.render_widget(Paragraph::new(format!("Error: {}", message)), size);
        }
        HomeState::Loaded(table) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(2), Constraint::Min(1)].as_ref())
                .split(size);

            let heading = Paragraph::new("Projects").style(Style::default().add_modifier(Modifier::BOLD));
            frame.render_widget(heading, chunks[0]);

            render_project_table(frame, table, chunks[1]);
        }
    }
}

pub fn handle_input(state: &mut HomeState) -> Result<Option<HomeAction>> {
    if let Event::Key(key) = event::read()? {
        if key.kind == KeyEventKind::Press {
            return Ok(state.handle_key(key.code));
        }
    }
    Ok(None)
}
