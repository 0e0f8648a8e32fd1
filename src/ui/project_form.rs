use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::NewProject;
use crate::ui::components::date_input::DateInputState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    StartDate,
    EndDate,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Description,
        FormField::StartDate,
        FormField::EndDate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Description => "Description",
            FormField::StartDate => "Start Date",
            FormField::EndDate => "End Date",
        }
    }

    /// Message shown when the field is left empty on submit.
    pub fn required_message(self) -> &'static str {
        match self {
            FormField::Name => "Please enter the project name",
            FormField::Description => "Please enter the project description",
            FormField::StartDate => "Please select the start date",
            FormField::EndDate => "Please select the end date",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, PartialEq)]
pub enum FormAction {
    Cancel,
    Submit(NewProject),
}

/// The four-field creation form.
pub struct ProjectFormState {
    pub name: String,
    pub description: String,
    pub start_date: DateInputState,
    pub end_date: DateInputState,
    pub current_field: FormField,
    pub editing: bool,
    errors: [Option<&'static str>; 4],
}

impl Default for ProjectFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectFormState {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            start_date: DateInputState::new(),
            end_date: DateInputState::new(),
            current_field: FormField::Name,
            editing: false,
            errors: [None; 4],
        }
    }

    /// Drop every entered value and message.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn error_for(&self, field: FormField) -> Option<&'static str> {
        self.errors[field.index()]
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            FormField::Name => FormField::Description,
            FormField::Description => FormField::StartDate,
            FormField::StartDate => FormField::EndDate,
            FormField::EndDate => FormField::Name,
        };
    }

    pub fn previous_field(&mut self) {
        self.current_field = match self.current_field {
            FormField::Name => FormField::EndDate,
            FormField::Description => FormField::Name,
            FormField::StartDate => FormField::Description,
            FormField::EndDate => FormField::StartDate,
        };
    }

    pub fn start_editing(&mut self) {
        self.editing = true;
        match self.current_field {
            FormField::StartDate => self.start_date.start_editing(),
            FormField::EndDate => self.end_date.start_editing(),
            _ => {}
        }
        self.errors[self.current_field.index()] = None;
    }

    pub fn stop_editing(&mut self) {
        self.editing = false;
        self.start_date.stop_editing();
        self.end_date.stop_editing();
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }
        self.errors[self.current_field.index()] = None;

        match self.current_field {
            FormField::Name => edit_text(&mut self.name, key),
            FormField::Description => edit_text(&mut self.description, key),
            FormField::StartDate => self.start_date.handle_input(key),
            FormField::EndDate => self.end_date.handle_input(key),
        }
    }

    /// Check the required-field rules. On success the create input is
    /// returned; otherwise every failing field gets its message.
    pub fn validate(&mut self) -> Option<NewProject> {
        self.errors = [None; 4];
        for field in FormField::ALL {
            let missing = match field {
                FormField::Name => self.name.is_empty(),
                FormField::Description => self.description.is_empty(),
                FormField::StartDate => self.start_date.date.is_none(),
                FormField::EndDate => self.end_date.date.is_none(),
            };
            if missing {
                self.errors[field.index()] = Some(field.required_message());
            }
        }

        match (self.start_date.date, self.end_date.date) {
            (Some(start_date), Some(end_date)) if self.errors.iter().all(Option::is_none) => Some(NewProject {
                name: self.name.clone(),
                description: self.description.clone(),
                start_date,
                end_date,
            }),
            _ => None,
        }
    }

    /// Validate and, when valid, clear the form and hand back the input.
    pub fn submit(&mut self) -> Option<NewProject> {
        let input = self.validate()?;
        self.reset();
        Some(input)
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Option<FormAction> {
        if self.editing {
            match key {
                KeyCode::Enter | KeyCode::Esc => self.stop_editing(),
                _ => self.edit_current_field(key),
            }
            return None;
        }

        match key {
            KeyCode::Esc => return Some(FormAction::Cancel),
            KeyCode::Enter => self.start_editing(),
            KeyCode::Up | KeyCode::BackTab => self.previous_field(),
            KeyCode::Down | KeyCode::Tab => self.next_field(),
            KeyCode::Char('s') => {
                if let Some(input) = self.submit() {
                    return Some(FormAction::Submit(input));
                }
            }
            _ => {}
        }
        None
    }

    fn display_value(&self, field: FormField) -> String {
        let editing_here = self.editing && self.current_field == field;
        match field {
            FormField::Name | FormField::Description => {
                let text = if field == FormField::Name { &self.name } else { &self.description };
                format!("{}{}", text, if editing_here { "|" } else { "" })
            }
            FormField::StartDate => self.start_date.display(),
            FormField::EndDate => self.end_date.display(),
        }
    }
}

fn edit_text(text: &mut String, key: KeyCode) {
    match key {
        KeyCode::Char(c) => text.push(c),
        KeyCode::Backspace => {
            text.pop();
        }
        _ => {}
    }
}

pub fn render_project_form<B: Backend>(f: &mut Frame<B>, state: &ProjectFormState, area: Rect) {
    f.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(3)].as_ref())
        .split(area);

    let mut lines = Vec::new();
    for field in FormField::ALL {
        let label_style = if field == state.current_field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let value_style = if field == state.current_field && state.editing {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        lines.push(Spans::from(vec![
            Span::styled(format!("* {}: ", field.label()), label_style),
            Span::styled(state.display_value(field), value_style),
        ]));
        match state.error_for(field) {
            Some(message) => lines.push(Spans::from(Span::styled(
                format!("  {}", message),
                Style::default().fg(Color::Red),
            ))),
            None => lines.push(Spans::from("")),
        }
    }

    let form = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Create Project"));
    f.render_widget(form, chunks[0]);

    let help_text = if state.editing {
        match state.current_field {
            FormField::Name | FormField::Description => "Enter - Done | Esc - Done",
            FormField::StartDate | FormField::EndDate => "Enter - Done | Left/Right - Switch date part | Esc - Done",
        }
    } else {
        "Enter - Edit field | Up/Down - Navigate fields | S - Create Project | Esc - Close"
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn type_text(form: &mut ProjectFormState, text: &str) {
        form.handle_key(KeyCode::Enter);
        for c in text.chars() {
            form.handle_key(KeyCode::Char(c));
        }
        form.handle_key(KeyCode::Enter);
    }

    fn filled() -> ProjectFormState {
        let mut form = ProjectFormState::new();
        form.name = "Apollo".to_string();
        form.description = "Moon landing".to_string();
        form.start_date.date = Some(ymd(2024, 1, 5));
        form.end_date.date = Some(ymd(2024, 12, 31));
        form
    }

    #[test]
    fn empty_submit_reports_every_field() {
        let mut form = ProjectFormState::new();
        assert_eq!(form.handle_key(KeyCode::Char('s')), None);

        for field in FormField::ALL {
            assert_eq!(form.error_for(field), Some(field.required_message()));
        }
    }

    #[test]
    fn one_missing_field_blocks_submit() {
        let mut form = filled();
        form.description.clear();

        assert_eq!(form.submit(), None);
        assert_eq!(form.error_for(FormField::Description), Some("Please enter the project description"));
        assert_eq!(form.error_for(FormField::Name), None);
        assert_eq!(form.name, "Apollo");
    }

    #[test]
    fn missing_end_date_message() {
        let mut form = filled();
        form.end_date.date = None;
        assert_eq!(form.submit(), None);
        assert_eq!(form.error_for(FormField::EndDate), Some("Please select the end date"));
    }

    #[test]
    fn valid_submit_clears_form() {
        let mut form = filled();
        let action = form.handle_key(KeyCode::Char('s'));

        assert_eq!(
            action,
            Some(FormAction::Submit(NewProject {
                name: "Apollo".to_string(),
                description: "Moon landing".to_string(),
                start_date: ymd(2024, 1, 5),
                end_date: ymd(2024, 12, 31),
            }))
        );
        assert!(form.name.is_empty());
        assert!(form.description.is_empty());
        assert_eq!(form.start_date.date, None);
        assert_eq!(form.end_date.date, None);
    }

    #[test]
    fn typing_fills_text_fields() {
        let mut form = ProjectFormState::new();
        type_text(&mut form, "Apolloo");
        form.handle_key(KeyCode::Enter);
        form.handle_key(KeyCode::Backspace);
        form.handle_key(KeyCode::Enter);
        form.handle_key(KeyCode::Down);
        type_text(&mut form, "Moon");

        assert_eq!(form.name, "Apollo");
        assert_eq!(form.description, "Moon");
        assert_eq!(form.current_field, FormField::Description);
    }

    #[test]
    fn editing_clears_the_field_message() {
        let mut form = ProjectFormState::new();
        form.submit();
        assert!(form.error_for(FormField::Name).is_some());

        type_text(&mut form, "x");
        assert_eq!(form.error_for(FormField::Name), None);
        assert!(form.error_for(FormField::Description).is_some());
    }

    #[test]
    fn editing_a_date_sets_it() {
        let mut form = ProjectFormState::new();
        form.next_field();
        form.next_field();
        form.handle_key(KeyCode::Enter);
        form.handle_key(KeyCode::Enter);
        assert!(form.start_date.date.is_some());
        assert!(form.end_date.date.is_none());
    }

    #[test]
    fn esc_cancels_only_outside_editing() {
        let mut form = ProjectFormState::new();
        form.handle_key(KeyCode::Enter);
        assert_eq!(form.handle_key(KeyCode::Esc), None);
        assert!(!form.editing);
        assert_eq!(form.handle_key(KeyCode::Esc), Some(FormAction::Cancel));
    }

    #[test]
    fn field_navigation_wraps() {
        let mut form = ProjectFormState::new();
        form.previous_field();
        assert_eq!(form.current_field, FormField::EndDate);
        form.next_field();
        assert_eq!(form.current_field, FormField::Name);
    }
}
