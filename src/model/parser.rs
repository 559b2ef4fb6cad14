// File: src/model/parser.rs
use crate::error::ParseError;
use crate::model::{CheckItem, RepeatRule, RepeatUnit, Schedule, Task, TaskState};
use chrono::{Duration, NaiveDate, NaiveTime};
use std::str::FromStr;

/// Accepted date formats, e.g. `4 May 2021` or `04 December 2021`.
const DATE_FORMATS: [&str; 2] = ["%d %b %Y", "%d %B %Y"];
const TIME_FORMAT: &str = "%H:%M";

/// Parses the text of one category file into tasks, in file order.
///
/// Lines that are neither a task start nor a recognized attribute are
/// comments and skipped. A malformed value on a recognized attribute aborts
/// the parse with its line number.
pub fn parse(text: &str) -> Result<Vec<Task>, ParseError> {
    let mut tasks = Vec::new();
    let mut current: Option<PendingTask> = None;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some((state, summary)) = parse_task_start(line) {
            if let Some(pending) = current.take() {
                tasks.push(pending.finish()?);
            }
            let mut task = Task::new(state, summary);
            task.source_order = tasks.len();
            current = Some(PendingTask {
                task,
                repeated_line: None,
            });
            continue;
        }

        let Some(attr) = line.strip_prefix("* ") else {
            continue;
        };
        let Some(pending) = current.as_mut() else {
            continue;
        };
        pending.apply(attr.trim_start(), line_no)?;
    }

    if let Some(pending) = current.take() {
        tasks.push(pending.finish()?);
    }
    Ok(tasks)
}

struct PendingTask {
    task: Task,
    repeated_line: Option<usize>,
}

impl PendingTask {
    fn apply(&mut self, attr: &str, line_no: usize) -> Result<(), ParseError> {
        let (key, value) = match attr.split_once(char::is_whitespace) {
            Some((k, v)) => (k, v.trim()),
            None => (attr, ""),
        };
        let format_err = |field: &'static str| ParseError::Format {
            line: line_no,
            field,
            text: value.to_string(),
        };

        match key {
            "SCHEDULED:" => {
                let schedule = parse_schedule(value).ok_or_else(|| format_err("schedule"))?;
                self.task.scheduled = Some(schedule);
            }
            "DEADLINE:" => {
                let deadline = parse_date(value).ok_or_else(|| format_err("deadline"))?;
                self.task.deadline = Some(deadline);
            }
            "PRIORITY:" => {
                let priority = value.parse::<i32>().map_err(|_| format_err("priority"))?;
                self.task.priority = Some(priority);
            }
            "REPEATED:" => {
                let done = parse_date(value).ok_or_else(|| format_err("repeated date"))?;
                self.task.repeated = Some(done);
                self.repeated_line = Some(line_no);
            }
            "NOTE:" => self.task.notes.push(value.to_string()),
            "[]" | "[X]" => self.task.checklist.push(CheckItem {
                text: value.to_string(),
                checked: key == "[X]",
            }),
            _ => log::debug!("Skipping unknown attribute on line {}: '{}'", line_no, key),
        }
        Ok(())
    }

    fn finish(self) -> Result<Task, ParseError> {
        if let Some(line) = self.repeated_line
            && !self.task.is_repeating()
        {
            return Err(ParseError::Semantic {
                line,
                message: format!(
                    "REPEATED requires a repeating SCHEDULED on task '{}'",
                    self.task.summary
                ),
            });
        }
        Ok(self.task)
    }
}

fn parse_task_start(line: &str) -> Option<(TaskState, &str)> {
    let (token, rest) = line.split_once(char::is_whitespace)?;
    let state = TaskState::from_str(token).ok()?;
    let summary = rest.trim();
    if summary.is_empty() {
        return None;
    }
    Some((state, summary))
}

/// Parses `%d %b %Y` or `%d %B %Y`; month names are English.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let fields: Vec<&str> = s.split_whitespace().collect();
    let [_, _, year] = fields.as_slice() else {
        return None;
    };
    // chrono's %Y takes any width and a sign.
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Parses `HH:MM` or `HH:MM-HH:MM`. A range may not end before it starts.
pub fn parse_time_range(s: &str) -> Option<(NaiveTime, Option<NaiveTime>)> {
    let parse_one = |t: &str| {
        if t.len() != 5 {
            return None;
        }
        NaiveTime::parse_from_str(t, TIME_FORMAT).ok()
    };
    match s.split_once('-') {
        Some((start, end)) => {
            let (start, end) = (parse_one(start)?, parse_one(end)?);
            (end >= start).then_some((start, Some(end)))
        }
        None => Some((parse_one(s)?, None)),
    }
}

/// Parses a repeat suffix such as `+1d`, `+2w`, `+3m` or `+1y`.
pub fn parse_repeat(s: &str) -> Option<RepeatRule> {
    let body = s.strip_prefix('+')?;
    let unit = RepeatUnit::from_suffix(body.chars().last()?)?;
    let digits = &body[..body.len() - 1];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let count = digits.parse::<u32>().ok()?;
    if count == 0 {
        return None;
    }
    Some(RepeatRule::new(count, unit))
}

/// Parses `<date> [<time>[-<time>]] [+<n><unit>]`.
pub fn parse_schedule(s: &str) -> Option<Schedule> {
    let words: Vec<&str> = s.split_whitespace().collect();
    if words.len() < 3 {
        return None;
    }
    let mut schedule = Schedule::on(parse_date(&words[..3].join(" "))?);

    let mut rest = words[3..].iter().peekable();
    if let Some(word) = rest.next_if(|w| !w.starts_with('+')) {
        let (start, end) = parse_time_range(word)?;
        schedule = schedule.with_time(start, end);
    }
    if let Some(word) = rest.next() {
        schedule = schedule.repeating(parse_repeat(word)?);
    }
    if rest.next().is_some() {
        return None;
    }
    Some(schedule)
}

/// Resolves a date given on the command line.
///
/// Accepts the file date formats, `today`/`tomorrow`/`yesterday`, or a
/// signed day offset from `today` (`3`, `-1`).
pub fn parse_query_date(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim();
    if let Some(date) = parse_date(s) {
        return Some(date);
    }
    match s.to_lowercase().as_str() {
        "today" => return Some(today),
        "tomorrow" => return today.succ_opt(),
        "yesterday" => return today.pred_opt(),
        _ => {}
    }
    let days = s.parse::<i64>().ok()?;
    today.checked_add_signed(Duration::try_days(days)?)
}
