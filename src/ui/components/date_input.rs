use chrono::{Datelike, Local, NaiveDate};
use crossterm::event::KeyCode;

use crate::models::DATE_FORMAT;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DatePart {
    Year,
    Month,
    Day,
}

/// Keyboard entry for a date that starts out unset.
///
/// Digits are typed into the current part; a part is committed once it has
/// all its digits and forms a valid date. Left/Right move between parts.
#[derive(Debug, Clone)]
pub struct DateInputState {
    pub date: Option<NaiveDate>,
    pub editing: bool,
    pub date_part: DatePart,
    pub pending: String,
}

impl Default for DateInputState {
    fn default() -> Self {
        Self::new()
    }
}

impl DateInputState {
    pub fn new() -> Self {
        Self {
            date: None,
            editing: false,
            date_part: DatePart::Year,
            pending: String::new(),
        }
    }

    pub fn start_editing(&mut self) {
        self.start_editing_from(Local::now().date_naive());
    }

    /// Begin editing; an unset date is seeded with `today`.
    pub fn start_editing_from(&mut self, today: NaiveDate) {
        if self.date.is_none() {
            self.date = Some(today);
        }
        self.editing = true;
        self.date_part = DatePart::Year;
        self.pending.clear();
    }

    pub fn stop_editing(&mut self) {
        self.editing = false;
        self.pending.clear();
    }

    fn next_date_part(&mut self) {
        self.date_part = match self.date_part {
            DatePart::Year => DatePart::Month,
            DatePart::Month => DatePart::Day,
            DatePart::Day => DatePart::Year,
        };
        self.pending.clear();
    }

    fn previous_date_part(&mut self) {
        self.date_part = match self.date_part {
            DatePart::Year => DatePart::Day,
            DatePart::Month => DatePart::Year,
            DatePart::Day => DatePart::Month,
        };
        self.pending.clear();
    }

    pub fn handle_input(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }
        let Some(date) = self.date else {
            return;
        };

        match key {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.pending.push(c);
                let width = match self.date_part {
                    DatePart::Year => 4,
                    DatePart::Month | DatePart::Day => 2,
                };
                if self.pending.len() < width {
                    return;
                }

                if let Ok(value) = self.pending.parse::<u32>() {
                    let updated = match self.date_part {
                        DatePart::Year if (1900..=2100).contains(&value) => {
                            NaiveDate::from_ymd_opt(value as i32, date.month(), date.day())
                        }
                        DatePart::Month => NaiveDate::from_ymd_opt(date.year(), value, date.day()),
                        DatePart::Day => NaiveDate::from_ymd_opt(date.year(), date.month(), value),
                        _ => None,
                    };
                    if let Some(updated) = updated {
                        self.date = Some(updated);
                    }
                }
                self.pending.clear();
            }
            KeyCode::Backspace => {
                self.pending.pop();
            }
            KeyCode::Right => self.next_date_part(),
            KeyCode::Left => self.previous_date_part(),
            _ => {}
        }
    }

    pub fn display(&self) -> String {
        let Some(date) = self.date else {
            return String::new();
        };
        if !self.editing {
            return date.format(DATE_FORMAT).to_string();
        }

        let year = format!("{:04}", date.year());
        let month = format!("{:02}", date.month());
        let day = format!("{:02}", date.day());
        let marker = if self.pending.is_empty() {
            match self.date_part {
                DatePart::Year => "[YYYY]".to_string(),
                DatePart::Month => "[MM]".to_string(),
                DatePart::Day => "[DD]".to_string(),
            }
        } else {
            format!("[{}]", self.pending)
        };

        match self.date_part {
            DatePart::Year => format!("{}{}-{}-{}", year, marker, month, day),
            DatePart::Month => format!("{}-{}{}-{}", year, month, marker, day),
            DatePart::Day => format!("{}-{}-{}{}", year, month, day, marker),
        }
    }
}
