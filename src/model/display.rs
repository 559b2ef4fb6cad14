// File: ./src/model/display.rs
use crate::model::agenda::{Agenda, AgendaEntry};
use crate::model::item::{Category, RepeatRule, RepeatUnit, Schedule, Task, TaskState};
use chrono::NaiveDate;
use crossterm::style::{Color, Stylize};
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

/// Date format used when writing attribute lines back to text.
pub const CANONICAL_DATE_FORMAT: &str = "%d %b %Y";
const DISPLAY_DATE_FORMAT: &str = "%a %d %b %Y";

pub trait TaskDisplay {
    /// Renders the task in the category file syntax.
    fn to_text(&self) -> String;
    /// `--:--`, `HH:MM` or `HH:MM-HH:MM`.
    fn time_label(&self) -> String;
}

impl TaskDisplay for Task {
    fn to_text(&self) -> String {
        let mut lines = vec![format!("{} {}", self.state, self.summary)];
        if let Some(schedule) = &self.scheduled {
            lines.push(attribute("SCHEDULED:", &schedule_text(schedule)));
        }
        if let Some(deadline) = self.deadline {
            lines.push(attribute("DEADLINE:", &format_date(deadline)));
        }
        if let Some(priority) = self.priority {
            lines.push(attribute("PRIORITY:", &priority.to_string()));
        }
        if let Some(done) = self.repeated {
            lines.push(attribute("REPEATED:", &format_date(done)));
        }
        for item in &self.checklist {
            let mark = if item.checked { "[X]" } else { "[]" };
            lines.push(attribute(mark, &item.text));
        }
        for note in &self.notes {
            lines.push(attribute("NOTE:", note));
        }
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    fn time_label(&self) -> String {
        let Some(start) = self.scheduled.as_ref().and_then(|s| s.start_time) else {
            return "--:--".to_string();
        };
        match self.scheduled.as_ref().and_then(|s| s.end_time) {
            Some(end) => format!("{}-{}", start.format("%H:%M"), end.format("%H:%M")),
            None => start.format("%H:%M").to_string(),
        }
    }
}

fn attribute(key: &str, value: &str) -> String {
    if value.is_empty() {
        format!("* {}", key)
    } else {
        format!("* {} {}", key, value)
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(CANONICAL_DATE_FORMAT).to_string()
}

fn schedule_text(schedule: &Schedule) -> String {
    let mut s = format_date(schedule.date);
    if let Some(start) = schedule.start_time {
        s.push_str(&format!(" {}", start.format("%H:%M")));
        if let Some(end) = schedule.end_time {
            s.push_str(&format!("-{}", end.format("%H:%M")));
        }
    }
    if let Some(rule) = &schedule.repeat {
        s.push_str(&format!(" {}", repeat_suffix(rule)));
    }
    s
}

pub fn repeat_suffix(rule: &RepeatRule) -> String {
    format!("+{}{}", rule.count, rule.unit.suffix())
}

fn repeat_words(rule: &RepeatRule) -> String {
    let unit = match rule.unit {
        RepeatUnit::Day => "day",
        RepeatUnit::Week => "week",
        RepeatUnit::Month => "month",
        RepeatUnit::Year => "year",
    };
    if rule.count == 1 {
        format!("every {}", unit)
    } else {
        format!("every {} {}s", rule.count, unit)
    }
}

/// Terminal rendering of tasks, listings and agendas.
///
/// Output is returned as a string; `color` toggles ANSI styling.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    pub color: bool,
    pub today: NaiveDate,
}

impl Renderer {
    pub fn new(color: bool, today: NaiveDate) -> Self {
        Self { color, today }
    }

    fn paint(&self, text: &str, color: Option<Color>, dim: bool) -> String {
        if !self.color {
            return text.to_string();
        }
        let mut styled = text.stylize();
        if let Some(c) = color {
            styled = styled.with(c);
        }
        if dim {
            styled = styled.dim();
        }
        styled.to_string()
    }

    fn relative_date(&self, date: NaiveDate) -> String {
        if date == self.today {
            "Today".to_string()
        } else {
            date.format(DISPLAY_DATE_FORMAT).to_string()
        }
    }

    /// State token and summary on one line.
    pub fn task_headline(&self, task: &Task) -> String {
        let (token_color, dim_token, dim_summary) = match task.state {
            TaskState::Doing | TaskState::Next => (Some(Color::Green), false, false),
            TaskState::Todo => (Some(Color::Yellow), false, false),
            TaskState::Waiting | TaskState::Held => (Some(Color::Red), false, false),
            TaskState::Done => (Some(Color::Blue), false, true),
            TaskState::Event | TaskState::Backlog | TaskState::Cancelled => (None, true, true),
        };
        format!(
            "{} {}",
            self.paint(task.state.as_str(), token_color, dim_token),
            self.paint(&task.summary, None, dim_summary)
        )
    }

    /// Headline followed by checklist, notes and (unless `ignore_dates`) dates.
    pub fn task(&self, task: &Task, ignore_dates: bool) -> String {
        let mut out = self.task_headline(task);
        out.push('\n');
        for item in &task.checklist {
            let mark = if item.checked {
                self.paint("●", Some(Color::Green), false)
            } else {
                self.paint("○", Some(Color::Red), false)
            };
            let _ = writeln!(out, "  {} {}", mark, item.text);
        }
        for note in &task.notes {
            let _ = writeln!(out, "{}", self.paint(&format!("  - {}", note), None, true));
        }
        if ignore_dates {
            return out;
        }
        if let Some(schedule) = &task.scheduled {
            let mut line = format!("  Scheduled {}", self.relative_date(schedule.date));
            if schedule.start_time.is_some() {
                let _ = write!(line, " {}", task.time_label());
            }
            if let Some(rule) = &schedule.repeat {
                let _ = write!(line, ", {}", repeat_words(rule));
                if let Some(next) = task.next_open_occurrence(self.today) {
                    let _ = write!(line, " (next {})", self.relative_date(next));
                }
            }
            let _ = writeln!(out, "{}", line);
        }
        if let Some(deadline) = task.deadline {
            let _ = writeln!(out, "  Due {}", self.relative_date(deadline));
        }
        out
    }

    /// Tasks of one category in file order.
    pub fn tasks(&self, tasks: &[Task]) -> String {
        tasks.iter().map(|t| self.task(t, false)).collect()
    }

    pub fn categories(&self, categories: &[Category]) -> String {
        let mut out = String::new();
        for (i, category) in categories.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let _ = writeln!(out, "{}\n", category.name.to_uppercase());
            out.push_str(&self.tasks(&category.tasks));
        }
        out
    }

    /// Relative dates in the agenda ("Today") are relative to the agenda's date.
    pub fn agenda(&self, agenda: &Agenda<'_>) -> String {
        let anchored = Renderer {
            today: agenda.date,
            ..*self
        };
        let mut out = self.paint(
            &agenda.date.format(DISPLAY_DATE_FORMAT).to_string(),
            Some(Color::Blue),
            false,
        );
        out.push('\n');

        let scheduled: Vec<&AgendaEntry<'_>> = agenda.scheduled().collect();
        let deadlines: Vec<&AgendaEntry<'_>> = agenda.deadlines().collect();
        let width = agenda
            .entries
            .iter()
            .map(|e| e.category.width())
            .max()
            .unwrap_or(0);

        if scheduled.is_empty() {
            let empty = self.paint("No scheduled items", Some(Color::Green), false);
            let _ = writeln!(out, "\n{}", empty);
        } else {
            let title = self.paint("Agenda", Some(Color::Yellow), false);
            let _ = writeln!(out, "\n{}", title);
            let time_width = scheduled
                .iter()
                .map(|e| e.task.time_label().len())
                .max()
                .unwrap_or(0);
            for entry in scheduled {
                let time = entry.task.time_label();
                let _ = write!(
                    out,
                    "{:<tw$} {} ",
                    time,
                    self.paint(&pad(entry.category, width), None, true),
                    tw = time_width
                );
                out.push_str(&self.task(entry.task, true));
            }
        }

        if deadlines.is_empty() {
            let empty = self.paint("No upcoming deadlines", Some(Color::Green), false);
            let _ = writeln!(out, "\n{}", empty);
        } else {
            let title = self.paint("Upcoming deadlines", Some(Color::Yellow), false);
            let _ = writeln!(out, "\n{}", title);
            for entry in deadlines {
                let due = entry
                    .task
                    .deadline
                    .map(|d| anchored.relative_date(d))
                    .unwrap_or_default();
                let _ = writeln!(
                    out,
                    "{} {} {}",
                    due,
                    self.paint(&pad(entry.category, width), None, true),
                    self.task_headline(entry.task)
                );
            }
        }
        out
    }
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}
