// File: src/model/agenda.rs
//! Day-scoped agenda over tasks from any number of categories.

use crate::model::{Category, Task};
use chrono::NaiveDate;
use serde::Serialize;

pub const DEFAULT_DEADLINE_WARNING_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OccurrenceKind {
    Scheduled,
    DeadlineUpcoming,
}

/// One task on the agenda. A task matching both a schedule and a deadline on
/// the same day yields a single entry carrying both kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgendaEntry<'a> {
    pub category: &'a str,
    pub task: &'a Task,
    pub kinds: Vec<OccurrenceKind>,
    /// The occurrence that put the task on the agenda, when scheduled.
    pub occurrence: Option<NaiveDate>,
}

impl AgendaEntry<'_> {
    pub fn has(&self, kind: OccurrenceKind) -> bool {
        self.kinds.contains(&kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgendaEngine {
    pub deadline_warning_days: u32,
}

impl Default for AgendaEngine {
    fn default() -> Self {
        Self {
            deadline_warning_days: DEFAULT_DEADLINE_WARNING_DAYS,
        }
    }
}

impl AgendaEngine {
    pub fn new(deadline_warning_days: u32) -> Self {
        Self {
            deadline_warning_days,
        }
    }

    /// Builds the agenda for `date` from `(category, task)` pairs.
    ///
    /// Entries are ordered by priority, then by input order.
    pub fn agenda<'a, I>(&self, tasks: I, date: NaiveDate) -> Vec<AgendaEntry<'a>>
    where
        I: IntoIterator<Item = (&'a str, &'a Task)>,
    {
        let mut entries: Vec<AgendaEntry<'a>> = tasks
            .into_iter()
            .filter_map(|(category, task)| self.entry_for(category, task, date))
            .collect();

        // Stable: equal priorities keep input order.
        entries.sort_by(|a, b| a.task.compare_priority(b.task));
        entries
    }

    /// Agenda across categories, in category order then file order.
    pub fn for_categories<'a>(&self, categories: &'a [Category], date: NaiveDate) -> Agenda<'a> {
        let pairs = categories
            .iter()
            .flat_map(|c| c.tasks.iter().map(move |t| (c.name.as_str(), t)));
        Agenda {
            date,
            entries: self.agenda(pairs, date),
        }
    }

    fn entry_for<'a>(
        &self,
        category: &'a str,
        task: &'a Task,
        date: NaiveDate,
    ) -> Option<AgendaEntry<'a>> {
        let mut kinds = Vec::new();
        let occurrence = scheduled_occurrence(task, date);
        if occurrence.is_some() {
            kinds.push(OccurrenceKind::Scheduled);
        }
        if self.deadline_upcoming(task, date) {
            kinds.push(OccurrenceKind::DeadlineUpcoming);
        }
        if kinds.is_empty() {
            return None;
        }
        log::trace!("Agenda {}: '{}' in {} as {:?}", date, task.summary, category, kinds);
        Some(AgendaEntry {
            category,
            task,
            kinds,
            occurrence,
        })
    }

    /// Deadline within `[deadline - warning, deadline]` on an open task.
    pub fn deadline_upcoming(&self, task: &Task, date: NaiveDate) -> bool {
        let Some(deadline) = task.deadline else {
            return false;
        };
        if task.state.is_done() || date > deadline {
            return false;
        }
        (deadline - date).num_days() <= i64::from(self.deadline_warning_days)
    }
}

/// Agenda with the default deadline warning window.
pub fn agenda<'a, I>(tasks: I, date: NaiveDate) -> Vec<AgendaEntry<'a>>
where
    I: IntoIterator<Item = (&'a str, &'a Task)>,
{
    AgendaEngine::default().agenda(tasks, date)
}

/// The scheduled occurrence on `date`, if the task is due that day.
///
/// Repeating tasks ignore their literal state; a cycle is skipped once
/// `repeated` reaches it.
pub fn scheduled_occurrence(task: &Task, date: NaiveDate) -> Option<NaiveDate> {
    let schedule = task.scheduled.as_ref()?;
    if !schedule.occurs_on(date) {
        return None;
    }
    if schedule.is_repeating() && task.is_cycle_done(date) {
        return None;
    }
    Some(date)
}

/// A computed agenda for one date.
#[derive(Debug, Clone, Serialize)]
pub struct Agenda<'a> {
    pub date: NaiveDate,
    pub entries: Vec<AgendaEntry<'a>>,
}

impl<'a> Agenda<'a> {
    pub fn scheduled(&self) -> impl Iterator<Item = &AgendaEntry<'a>> {
        self.entries
            .iter()
            .filter(|e| e.has(OccurrenceKind::Scheduled))
    }

    pub fn deadlines(&self) -> impl Iterator<Item = &AgendaEntry<'a>> {
        self.entries
            .iter()
            .filter(|e| e.has(OccurrenceKind::DeadlineUpcoming))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
