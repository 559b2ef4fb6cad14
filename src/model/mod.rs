// File: ./src/model/mod.rs
pub mod agenda;
pub mod display;
pub mod item;
pub mod parser;
pub mod recurrence;

pub use agenda::{Agenda, AgendaEngine, AgendaEntry, OccurrenceKind};
pub use display::{Renderer, TaskDisplay};
pub use item::{CheckItem, Category, RepeatRule, RepeatUnit, Schedule, Task, TaskState};
pub use parser::parse;
