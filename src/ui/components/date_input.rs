use chrono::{Datelike, Months, NaiveDate};
use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    Year,
    Month,
    Day,
}

impl DatePart {
    fn width(&self) -> usize {
        match self {
            DatePart::Year => 4,
            DatePart::Month | DatePart::Day => 2,
        }
    }

    fn next(&self) -> Self {
        match self {
            DatePart::Year => DatePart::Month,
            DatePart::Month => DatePart::Day,
            DatePart::Day => DatePart::Year,
        }
    }

    fn previous(&self) -> Self {
        match self {
            DatePart::Year => DatePart::Day,
            DatePart::Month => DatePart::Year,
            DatePart::Day => DatePart::Month,
        }
    }
}

/// A date edited one part at a time, either by typing digits or stepping with Up/Down
#[derive(Debug, Clone)]
pub struct DateInputState {
    pub date: NaiveDate,
    pub editing: bool,
    pub part: DatePart,
    buffer: String,
}

impl DateInputState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            editing: false,
            part: DatePart::Year,
            buffer: String::new(),
        }
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
        self.part = DatePart::Year;
        self.buffer.clear();
    }

    /// Typed digits are committed once the part is complete; impossible dates are ignored
    pub fn handle_key(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        match key {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.buffer.push(c);
                if self.buffer.len() == self.part.width() {
                    if let Ok(value) = self.buffer.parse::<u32>() {
                        if let Some(date) = self.with_part(value) {
                            self.date = date;
                        }
                    }
                    self.buffer.clear();
                }
            }
            KeyCode::Backspace => {
                self.buffer.pop();
            }
            KeyCode::Up => self.step(true),
            KeyCode::Down => self.step(false),
            KeyCode::Right | KeyCode::Tab => {
                self.part = self.part.next();
                self.buffer.clear();
            }
            KeyCode::Left => {
                self.part = self.part.previous();
                self.buffer.clear();
            }
            _ => {}
        }
    }

    fn with_part(&self, value: u32) -> Option<NaiveDate> {
        let (year, month, day) = (self.date.year(), self.date.month(), self.date.day());
        match self.part {
            DatePart::Year => {
                let year = i32::try_from(value).ok().filter(|y| (1900..=2100).contains(y))?;
                NaiveDate::from_ymd_opt(year, month, day)
            }
            DatePart::Month => NaiveDate::from_ymd_opt(year, value, day),
            DatePart::Day => NaiveDate::from_ymd_opt(year, month, value),
        }
    }

    fn step(&mut self, up: bool) {
        let stepped = match (self.part, up) {
            (DatePart::Year, true) => self.date.checked_add_months(Months::new(12)),
            (DatePart::Year, false) => self.date.checked_sub_months(Months::new(12)),
            (DatePart::Month, true) => self.date.checked_add_months(Months::new(1)),
            (DatePart::Month, false) => self.date.checked_sub_months(Months::new(1)),
            (DatePart::Day, true) => self.date.succ_opt(),
            (DatePart::Day, false) => self.date.pred_opt(),
        };
        if let Some(date) = stepped {
            self.date = date;
        }
        self.buffer.clear();
    }

    pub fn display(&self) -> String {
        if !self.editing {
            return self.date.format("%Y-%m-%d").to_string();
        }

        let pending = if self.buffer.is_empty() {
            match self.part {
                DatePart::Year => "YYYY".to_string(),
                DatePart::Month => "MM".to_string(),
                DatePart::Day => "DD".to_string(),
            }
        } else {
            self.buffer.clone()
        };
        let year = self.date.format("%Y").to_string();
        let month = self.date.format("%m").to_string();
        let day = self.date.format("%d").to_string();

        match self.part {
            DatePart::Year => format!("{}[{}]-{}-{}", year, pending, month, day),
            DatePart::Month => format!("{}-{}[{}]-{}", year, month, pending, day),
            DatePart::Day => format!("{}-{}-{}[{}]", year, month, day, pending),
        }
    }
}

pub fn render_date_input<B: Backend>(
    frame: &mut Frame<B>,
    area: Rect,
    label: &str,
    state: &DateInputState,
    focused: bool,
) {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let value_style = if state.editing {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let input = Paragraph::new(Spans::from(vec![
        Span::styled(format!("{}: ", label), style),
        Span::styled(state.display(), value_style),
    ]))
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(input, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn type_digits(state: &mut DateInputState, digits: &str) {
        for c in digits.chars() {
            state.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn typing_replaces_each_part() {
        let mut state = DateInputState::new(date(2024, 1, 15));
        state.toggle_editing();
        type_digits(&mut state, "2023");
        state.handle_key(KeyCode::Right);
        type_digits(&mut state, "07");
        state.handle_key(KeyCode::Right);
        type_digits(&mut state, "31");
        assert_eq!(state.date, date(2023, 7, 31));
    }

    #[test]
    fn impossible_day_is_ignored() {
        let mut state = DateInputState::new(date(2023, 2, 10));
        state.toggle_editing();
        state.handle_key(KeyCode::Left);
        type_digits(&mut state, "30");
        assert_eq!(state.date, date(2023, 2, 10));
    }

    #[test]
    fn arrows_step_the_focused_part() {
        let mut state = DateInputState::new(date(2024, 1, 31));
        state.toggle_editing();
        state.handle_key(KeyCode::Right);
        state.handle_key(KeyCode::Up);
        assert_eq!(state.date, date(2024, 2, 29));
        state.handle_key(KeyCode::Right);
        state.handle_key(KeyCode::Up);
        assert_eq!(state.date, date(2024, 3, 1));
    }

    #[test]
    fn keys_are_ignored_unless_editing() {
        let mut state = DateInputState::new(date(2024, 1, 15));
        type_digits(&mut state, "1999");
        assert_eq!(state.date, date(2024, 1, 15));
        assert_eq!(state.display(), "2024-01-15");
    }

    #[test]
    fn display_marks_the_pending_part() {
        let mut state = DateInputState::new(date(2024, 1, 15));
        state.toggle_editing();
        assert_eq!(state.display(), "2024[YYYY]-01-15");
        type_digits(&mut state, "20");
        assert_eq!(state.display(), "2024[20]-01-15");
    }
}
