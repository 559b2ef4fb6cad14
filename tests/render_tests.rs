// Tests for plain (uncolored) terminal output and the controller commands.
use chrono::NaiveDate;
use plaintask::config::{Config, Overrides};
use plaintask::context::TestContext;
use plaintask::controller::TaskController;
use plaintask::model::{AgendaEngine, Category, Renderer, parse};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn controller(ctx: &TestContext) -> TaskController {
    let overrides = Overrides {
        todo_dir: Some(ctx.todo_dir()),
        editor: None,
    };
    TaskController::from_config(ctx, &Config::default(), &overrides, false, d(2021, 5, 4)).unwrap()
}

#[test]
fn test_task_listing() {
    let text = "\
TODO Water plants
* SCHEDULED: 3 May 2021 +2d
* [X] kitchen
* [] balcony
* NOTE: rainwater
TODO Taxes
* DEADLINE: 4 May 2021
";
    let renderer = Renderer::new(false, d(2021, 5, 4));
    let out = renderer.tasks(&parse(text).unwrap());
    assert_eq!(
        out,
        "\
TODO Water plants
  ● kitchen
  ○ balcony
  - rainwater
  Scheduled Mon 03 May 2021, every 2 days (next Wed 05 May 2021)
TODO Taxes
  Due Today
"
    );
}

#[test]
fn test_agenda_layout() {
    let home = Category::new(
        "home",
        "home.txt",
        parse("TODO Laundry\n* SCHEDULED: 4 May 2021 09:00\nTODO Rent\n* DEADLINE: 10 May 2021\n")
            .unwrap(),
    );
    let work = Category::new(
        "work-long",
        "work-long.txt",
        parse("NEXT Review\n* SCHEDULED: 4 May 2021\n* PRIORITY: 1\n").unwrap(),
    );
    let categories = vec![home, work];
    let agenda = AgendaEngine::default().for_categories(&categories, d(2021, 5, 4));
    let out = Renderer::new(false, d(2021, 5, 4)).agenda(&agenda);
    assert_eq!(
        out,
        "\
Tue 04 May 2021

Agenda
--:-- work-long NEXT Review
09:00 home      TODO Laundry

Upcoming deadlines
Mon 10 May 2021 home      TODO Rent
"
    );
}

#[test]
fn test_agenda_due_label_follows_query_date() {
    let home = Category::new(
        "home",
        "home.txt",
        parse("TODO Rent\n* DEADLINE: 5 May 2021\n").unwrap(),
    );
    let categories = vec![home];
    let agenda = AgendaEngine::default().for_categories(&categories, d(2021, 5, 5));
    let out = Renderer::new(false, d(2021, 5, 4)).agenda(&agenda);
    assert!(out.starts_with("Wed 05 May 2021\n"), "{}", out);
    assert!(out.contains("\nToday home TODO Rent\n"), "{}", out);
}

#[test]
fn test_empty_agenda_layout() {
    let categories: Vec<Category> = vec![];
    let agenda = AgendaEngine::default().for_categories(&categories, d(2021, 5, 4));
    let out = Renderer::new(false, d(2021, 5, 4)).agenda(&agenda);
    assert_eq!(
        out,
        "Tue 04 May 2021\n\nNo scheduled items\n\nNo upcoming deadlines\n"
    );
}

#[test]
fn test_controller_list_and_agenda() {
    let ctx = TestContext::new();
    ctx.write_category("home", "TODO Laundry\n* SCHEDULED: 4 May 2021\n");
    ctx.write_category("work", "DONE Report\n");
    let c = controller(&ctx);

    assert_eq!(
        c.list(None).unwrap(),
        "HOME\n\nTODO Laundry\n  Scheduled Today\n\nWORK\n\nDONE Report\n"
    );
    assert_eq!(c.list(Some("work")).unwrap(), "WORK\n\nDONE Report\n");

    let out = c.agenda(Some("tomorrow"), false).unwrap();
    assert!(out.starts_with("Wed 05 May 2021\n"));
    assert!(out.contains("No scheduled items"));

    let out = c.agenda(None, false).unwrap();
    assert!(out.contains("--:-- home TODO Laundry"));
}

#[test]
fn test_controller_agenda_json() {
    let ctx = TestContext::new();
    ctx.write_category(
        "home",
        "TODO Laundry\n* SCHEDULED: 4 May 2021\n* DEADLINE: 5 May 2021\n",
    );
    let out = controller(&ctx).agenda(Some("4 May 2021"), true).unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["date"], "2021-05-04");
    let entry = &json["entries"][0];
    assert_eq!(entry["category"], "home");
    assert_eq!(entry["task"]["state"], "TODO");
    assert_eq!(entry["task"]["summary"], "Laundry");
    assert_eq!(
        entry["kinds"],
        serde_json::json!(["scheduled", "deadline-upcoming"])
    );
}

#[test]
fn test_controller_refuses_partial_agenda() {
    let ctx = TestContext::new();
    ctx.write_category("home", "TODO Laundry\n* SCHEDULED: 4 May 2021\n");
    ctx.write_category("work", "TODO Broken\n* PRIORITY: urgent\n");
    let err = controller(&ctx).agenda(None, false).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("work"), "{}", message);
    assert!(message.contains("line 2"), "{}", message);
}
