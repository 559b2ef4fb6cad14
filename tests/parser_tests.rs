// Tests for the category file parser.
use chrono::{NaiveDate, NaiveTime};
use plaintask::error::ParseError;
use plaintask::model::{CheckItem, RepeatRule, RepeatUnit, TaskState, parse};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn test_full_task() {
    let text = "\
DOING Write report
* SCHEDULED: 4 May 2021 09:00-10:30 +1w
* DEADLINE: 04 December 2021
* PRIORITY: 2
* NOTE: ask Sam for figures
* [X] outline
* [] draft
* NOTE: second note
";
    let tasks = parse(text).unwrap();
    assert_eq!(tasks.len(), 1);
    let t = &tasks[0];
    assert_eq!(t.state, TaskState::Doing);
    assert_eq!(t.summary, "Write report");

    let s = t.scheduled.as_ref().unwrap();
    assert_eq!(s.date, d(2021, 5, 4));
    assert_eq!(s.start_time, NaiveTime::from_hms_opt(9, 0, 0));
    assert_eq!(s.end_time, NaiveTime::from_hms_opt(10, 30, 0));
    assert_eq!(s.repeat, Some(RepeatRule::new(1, RepeatUnit::Week)));

    assert_eq!(t.deadline, Some(d(2021, 12, 4)));
    assert_eq!(t.priority, Some(2));
    assert_eq!(t.notes, vec!["ask Sam for figures", "second note"]);
    assert_eq!(
        t.checklist,
        vec![
            CheckItem {
                text: "outline".to_string(),
                checked: true
            },
            CheckItem {
                text: "draft".to_string(),
                checked: false
            },
        ]
    );
}

#[test]
fn test_checklist_variants() {
    let text = "TODO Pack\n* [X] done part\n* [] todo part\n* [ ] x\n* [x] lower\n";
    let tasks = parse(text).unwrap();
    let items: Vec<(&str, bool)> = tasks[0]
        .checklist
        .iter()
        .map(|c| (c.text.as_str(), c.checked))
        .collect();
    assert_eq!(items, vec![("done part", true), ("todo part", false)]);
}

#[test]
fn test_attributes_before_first_task_are_ignored() {
    let text = "* NOTE: orphan\n* PRIORITY: nonsense\nTODO First\n* NOTE: mine\n";
    let tasks = parse(text).unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].notes, vec!["mine"]);
    assert_eq!(tasks[0].priority, None);
}

#[test]
fn test_comments_and_unknown_lines_are_skipped() {
    let text = "\
# Groceries
Remember the list below.

TODO Milk
* LOCATION: corner shop
*NOTE: no space, so a comment
todo lowercase is not a state
* NOTE: semi-skimmed
DONE Bread
";
    let tasks = parse(text).unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].summary, "Milk");
    assert_eq!(tasks[0].notes, vec!["semi-skimmed"]);
    assert_eq!(tasks[1].state, TaskState::Done);
}

#[test]
fn test_all_state_tokens_start_tasks() {
    let text = "DOING a\nNEXT b\nTODO c\nEVENT d\nWAITING e\nHELD f\nBACKLOG g\nDONE h\nCANCELLED i\n";
    let states: Vec<TaskState> = parse(text).unwrap().iter().map(|t| t.state).collect();
    assert_eq!(
        states,
        vec![
            TaskState::Doing,
            TaskState::Next,
            TaskState::Todo,
            TaskState::Event,
            TaskState::Waiting,
            TaskState::Held,
            TaskState::Backlog,
            TaskState::Done,
            TaskState::Cancelled,
        ]
    );
}

#[test]
fn test_bare_state_token_is_not_a_task() {
    let tasks = parse("TODO\n* NOTE: dangling\nNEXT Real\n").unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].summary, "Real");
    assert!(tasks[0].notes.is_empty());
}

#[test]
fn test_repeated_keys_last_wins() {
    let tasks = parse("TODO x\n* PRIORITY: 3\n* PRIORITY: 1\n").unwrap();
    assert_eq!(tasks[0].priority, Some(1));
}

#[test]
fn test_malformed_values_report_line() {
    let cases = [
        ("TODO a\n* SCHEDULED: 2021-05-04\n", 2, "schedule"),
        ("TODO a\n\n* DEADLINE: 4 Mai 2021\n", 3, "deadline"),
        ("TODO a\n* PRIORITY: high\n", 2, "priority"),
        ("TODO a\n* SCHEDULED: 4 May 2021 +0d\n", 2, "schedule"),
        ("TODO a\n* SCHEDULED: 4 May 2021 25:00\n", 2, "schedule"),
        ("TODO a\n* SCHEDULED: 4 May 2021 +2w extra\n", 2, "schedule"),
        ("TODO a\n* SCHEDULED: 4 May 21\n", 2, "schedule"),
        ("TODO a\n* DEADLINE: 4 May +2021\n", 2, "deadline"),
        ("TODO a\n* SCHEDULED: 4 May 2021 10:00-09:00\n", 2, "schedule"),
        ("TODO a\n* SCHEDULED: 1 May 2021 +1w\n* REPEATED: yesterday\n", 3, "repeated date"),
    ];
    for (text, line, expected_field) in cases {
        match parse(text) {
            Err(ParseError::Format { line: l, field, .. }) => {
                assert_eq!(l, line, "line for {:?}", text);
                assert_eq!(field, expected_field, "field for {:?}", text);
            }
            other => panic!("expected format error for {:?}, got {:?}", text, other),
        }
    }
}

#[test]
fn test_format_error_message_names_text() {
    let err = parse("TODO a\n* DEADLINE: soon\n").unwrap_err();
    assert_eq!(err.to_string(), "line 2: invalid deadline 'soon'");
}

#[test]
fn test_repeated_without_repeating_schedule() {
    let no_schedule = "TODO a\n* REPEATED: 4 May 2021\n";
    let one_off = "TODO a\n* SCHEDULED: 1 May 2021\n* NOTE: x\n* REPEATED: 4 May 2021\nTODO b\n";
    for (text, line) in [(no_schedule, 2), (one_off, 4)] {
        let err = parse(text).unwrap_err();
        assert!(matches!(err, ParseError::Semantic { .. }), "{:?}", err);
        assert_eq!(err.line(), line);
    }
}

#[test]
fn test_parse_is_deterministic() {
    let text = "TODO a\n* SCHEDULED: 1 May 2021 +2w\n* REPEATED: 15 May 2021\nEVENT b\n";
    assert_eq!(parse(text).unwrap(), parse(text).unwrap());
}
