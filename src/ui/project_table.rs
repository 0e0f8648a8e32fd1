use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::models::{NewProject, Project};
use crate::ui::project_form::{render_project_form, FormAction, ProjectFormState};

/// Column titles, in display order.
pub const COLUMNS: [&str; 5] = ["Name", "Description", "Start Date", "End Date", "Actions"];

/// Label of the per-row action button.
pub const ROW_ACTION: &str = "View";

const WIDTHS: [Constraint; 5] = [
    Constraint::Percentage(20),
    Constraint::Percentage(36),
    Constraint::Percentage(15),
    Constraint::Percentage(15),
    Constraint::Percentage(14),
];

pub enum ProjectTableAction {
    Create(NewProject),
}

// Table of projects plus the shared creation dialog
pub struct ProjectTableState {
    projects: Vec<Project>,
    table_state: TableState,
    dialog_open: bool,
    form: ProjectFormState,
}

impl ProjectTableState {
    pub fn new(projects: Vec<Project>) -> Self {
        let mut table_state = TableState::default();
        if !projects.is_empty() {
            table_state.select(Some(0));
        }

        Self {
            projects,
            table_state,
            dialog_open: false,
            form: ProjectFormState::new(),
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Swap in a refetched list, keeping the selection in range.
    pub fn replace_projects(&mut self, projects: Vec<Project>) {
        let selected = match (self.table_state.selected(), projects.len()) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
        self.projects = projects;
        self.table_state.select(selected);
    }

    pub fn next(&mut self) {
        if self.projects.is_empty() {
            return;
        }

        let i = match self.table_state.selected() {
            Some(i) if i + 1 < self.projects.len() => i + 1,
            _ => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.projects.is_empty() {
            return;
        }

        let i = match self.table_state.selected() {
            Some(0) | None => self.projects.len() - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.table_state.selected().and_then(|i| self.projects.get(i))
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn form(&self) -> &ProjectFormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProjectFormState {
        &mut self.form
    }

    pub fn open_dialog(&mut self) {
        self.dialog_open = true;
    }

    /// Close without submitting; entered values are dropped.
    pub fn cancel_dialog(&mut self) {
        self.form.reset();
        self.dialog_open = false;
    }

    /// Cell text of every row, one entry per project.
    pub fn rows(&self) -> Vec<[String; 5]> {
        self.projects
            .iter()
            .map(|project| {
                [
                    project.name.clone(),
                    project.description.clone(),
                    project.start_date.clone(),
                    project.end_date.clone(),
                    format!("[{}]", ROW_ACTION),
                ]
            })
            .collect()
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Option<ProjectTableAction> {
        if self.dialog_open {
            match self.form.handle_key(key) {
                Some(FormAction::Cancel) => self.cancel_dialog(),
                Some(FormAction::Submit(input)) => {
                    self.dialog_open = false;
                    return Some(ProjectTableAction::Create(input));
                }
                None => {}
            }
            return None;
        }

        match key {
            KeyCode::Down => self.next(),
            KeyCode::Up => self.previous(),
            // The row action opens the creation dialog, whichever row it is on.
            KeyCode::Enter => {
                if self.selected_project().is_some() {
                    self.open_dialog();
                }
            }
            _ => {}
        }
        None
    }
}

pub fn render_project_table<B: Backend>(frame: &mut Frame<B>, state: &mut ProjectTableState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)].as_ref())
        .split(area);

    let header = Row::new(COLUMNS.to_vec())
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows: Vec<Row> = state.rows().into_iter().map(Row::new).collect();

    let table = Table::new(rows)
        .header(header)
        .block(Block::default().borders(Borders::ALL))
        .widths(&WIDTHS)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(table, chunks[0], &mut state.table_state);

    let buttons_text = if state.selected_project().is_some() {
        "<Enter> View | <Up/Down> Select | <Q> Quit"
    } else {
        "<Q> Quit"
    };

    let buttons = Paragraph::new(buttons_text)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));

    frame.render_widget(buttons, chunks[1]);

    if state.dialog_open {
        let popup_area = centered_rect(60, 70, frame.size());
        render_project_form(frame, &state.form, popup_area);
    }
}

// Helper function to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
