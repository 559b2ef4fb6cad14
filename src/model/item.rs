// File: ./src/model/item.rs
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::cmp::Ordering;
use std::path::PathBuf;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The label written at the start of a task line.
///
/// States are authored by hand; nothing in the crate moves a task from one
/// state to another.
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskState {
    Doing,
    Next,
    Todo,
    Event,
    Waiting,
    Held,
    Backlog,
    Done,
    Cancelled,
}

impl TaskState {
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done | Self::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatUnit {
    Day,
    Week,
    Month,
    Year,
}

impl RepeatUnit {
    pub fn from_suffix(c: char) -> Option<Self> {
        match c {
            'd' => Some(Self::Day),
            'w' => Some(Self::Week),
            'm' => Some(Self::Month),
            'y' => Some(Self::Year),
            _ => None,
        }
    }

    pub fn suffix(&self) -> char {
        match self {
            Self::Day => 'd',
            Self::Week => 'w',
            Self::Month => 'm',
            Self::Year => 'y',
        }
    }
}

/// Repeat cadence of a schedule, e.g. `+2w`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub struct RepeatRule {
    pub count: u32,
    pub unit: RepeatUnit,
}

impl RepeatRule {
    pub fn new(count: u32, unit: RepeatUnit) -> Self {
        Self { count, unit }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Schedule {
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    /// Only set together with `start_time`.
    pub end_time: Option<NaiveTime>,
    pub repeat: Option<RepeatRule>,
}

impl Schedule {
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date,
            start_time: None,
            end_time: None,
            repeat: None,
        }
    }

    pub fn with_time(mut self, start: NaiveTime, end: Option<NaiveTime>) -> Self {
        self.start_time = Some(start);
        self.end_time = end;
        self
    }

    pub fn repeating(mut self, rule: RepeatRule) -> Self {
        self.repeat = Some(rule);
        self
    }

    pub fn is_repeating(&self) -> bool {
        self.repeat.is_some()
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct CheckItem {
    pub text: String,
    pub checked: bool,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Task {
    pub state: TaskState,
    pub summary: String,
    pub scheduled: Option<Schedule>,
    pub deadline: Option<NaiveDate>,
    pub priority: Option<i32>,
    pub notes: Vec<String>,
    pub checklist: Vec<CheckItem>,
    /// Latest occurrence of a repeating task that has been marked complete.
    pub repeated: Option<NaiveDate>,
    #[serde(skip)]
    pub source_order: usize,
}

impl Task {
    pub fn new(state: TaskState, summary: impl Into<String>) -> Self {
        Self {
            state,
            summary: summary.into(),
            scheduled: None,
            deadline: None,
            priority: None,
            notes: Vec::new(),
            checklist: Vec::new(),
            repeated: None,
            source_order: 0,
        }
    }

    pub fn is_repeating(&self) -> bool {
        self.scheduled.as_ref().is_some_and(Schedule::is_repeating)
    }

    /// Whether the cycle due on `occurrence` has already been marked done.
    pub fn is_cycle_done(&self, occurrence: NaiveDate) -> bool {
        self.repeated.is_some_and(|done| occurrence <= done)
    }

    /// Priority order: present values ascending, then tasks without one.
    pub fn compare_priority(&self, other: &Self) -> Ordering {
        match (self.priority, other.priority) {
            (Some(p1), Some(p2)) => p1.cmp(&p2),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Tasks parsed from one category file.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Category {
    pub name: String,
    #[serde(skip)]
    pub path: PathBuf,
    pub tasks: Vec<Task>,
}

impl Category {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, tasks: Vec<Task>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            tasks,
        }
    }
}
