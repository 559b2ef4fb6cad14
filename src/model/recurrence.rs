// File: ./src/model/recurrence.rs
use crate::model::item::{RepeatRule, RepeatUnit, Schedule, Task};
use chrono::{Datelike, Duration, Months, NaiveDate};

impl RepeatRule {
    /// Returns `start + k * cadence`.
    ///
    /// Month and year steps are calendar steps counted from `start`, with the
    /// day clamped to the length of the target month (31 Jan +1m -> 28 Feb).
    /// Returns None when the result leaves chrono's date range.
    pub fn nth(&self, start: NaiveDate, k: u32) -> Option<NaiveDate> {
        let steps = self.count.checked_mul(k)?;
        match self.unit {
            RepeatUnit::Day => start.checked_add_signed(Duration::try_days(i64::from(steps))?),
            RepeatUnit::Week => start.checked_add_signed(Duration::try_weeks(i64::from(steps))?),
            RepeatUnit::Month => start.checked_add_months(Months::new(steps)),
            RepeatUnit::Year => start.checked_add_months(Months::new(steps.checked_mul(12)?)),
        }
    }

    /// Index of the last occurrence on or before `date`, for `date >= start`.
    fn index_at(&self, start: NaiveDate, date: NaiveDate) -> Option<u32> {
        if self.count == 0 {
            return Some(0);
        }
        let count = i64::from(self.count);
        let estimate = match self.unit {
            RepeatUnit::Day => (date - start).num_days() / count,
            RepeatUnit::Week => (date - start).num_days() / (7 * count),
            RepeatUnit::Month => month_span(start, date) / count,
            RepeatUnit::Year => month_span(start, date) / (12 * count),
        };
        let mut k = u32::try_from(estimate).ok()?;
        // Clamped month arithmetic can land the estimate one cycle late.
        while k > 0 && self.nth(start, k)? > date {
            k -= 1;
        }
        Some(k)
    }
}

fn month_span(from: NaiveDate, to: NaiveDate) -> i64 {
    let from_months = i64::from(from.year()) * 12 + i64::from(from.month0());
    let to_months = i64::from(to.year()) * 12 + i64::from(to.month0());
    to_months - from_months
}

impl Schedule {
    /// The occurrence `Dk` whose cadence interval `[Dk, Dk+1)` contains `date`.
    ///
    /// A non-repeating schedule has the single occurrence `self.date`.
    /// Returns None when `date` precedes the first occurrence.
    pub fn occurrence_at(&self, date: NaiveDate) -> Option<NaiveDate> {
        if date < self.date {
            return None;
        }
        match &self.repeat {
            None => Some(self.date),
            Some(rule) => {
                let k = rule.index_at(self.date, date)?;
                rule.nth(self.date, k)
            }
        }
    }

    /// Whether an occurrence falls exactly on `date`.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        self.occurrence_at(date) == Some(date)
    }

    /// First occurrence strictly after `date`.
    pub fn next_occurrence_after(&self, date: NaiveDate) -> Option<NaiveDate> {
        if date < self.date {
            return Some(self.date);
        }
        let rule = self.repeat.as_ref()?;
        let k = rule.index_at(self.date, date)?;
        rule.nth(self.date, k.checked_add(1)?)
    }
}

impl Task {
    /// First occurrence on or after `from` whose cycle is not marked done.
    pub fn next_open_occurrence(&self, from: NaiveDate) -> Option<NaiveDate> {
        let schedule = self.scheduled.as_ref()?;
        let floor = match self.repeated {
            Some(done) if schedule.is_repeating() && done >= from => done,
            _ => from.pred_opt()?,
        };
        schedule.next_occurrence_after(floor)
    }
}
