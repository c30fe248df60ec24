use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime, TimeZone, Utc};

use studyhub_lib::notes::parse_tags;
use studyhub_lib::reminders::{upcoming, Reminder, ReminderInput, ReminderKind};
use studyhub_lib::store::{Action, ActionOutput};

use crate::app::App;
use crate::render::terminal::{local_time, paint, Color};
use crate::OutputFormat;

/// Parse a local `YYYY-MM-DD HH:MM` timestamp
fn parse_local(at: &str) -> Result<chrono::DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(at.trim(), "%Y-%m-%d %H:%M")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD HH:MM", at))?;
    let local = Local
        .from_local_datetime(&naive)
        .earliest()
        .with_context(|| format!("'{}' does not exist in the local time zone", at))?;
    Ok(local.with_timezone(&Utc))
}

pub fn run_add(
    app: &mut App,
    title: &str,
    at: &str,
    focus_minutes: Option<u32>,
    tags: Option<&str>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let kind = match focus_minutes {
        Some(duration_minutes) => ReminderKind::Pomodoro { duration_minutes },
        None => ReminderKind::Reminder,
    };
    let input = ReminderInput {
        title: title.to_string(),
        date: parse_local(at)?,
        kind,
        tags: tags.map(parse_tags).unwrap_or_default(),
    };

    let output = app.store.dispatch(Action::AddReminder(input))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
        OutputFormat::Plain => {
            if let ActionOutput::Created { id } = output {
                let reminder = app.store.data().reminders.iter().find(|r| r.id == id);
                if let Some(reminder) = reminder {
                    println!(
                        "{} Reminder set: {} at {}",
                        paint("\u{2713}", Color::GREEN, use_color),
                        reminder.title,
                        local_time(reminder.date)
                    );
                }
            }
        }
    }

    Ok(())
}

pub fn run_list(app: &App, limit: usize, all: bool, format: &OutputFormat, use_color: bool) -> Result<()> {
    let reminders: Vec<Reminder> = if all {
        app.store.data().reminders.clone()
    } else {
        upcoming(&app.store.data().reminders, Utc::now(), limit)
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reminders)?),
        OutputFormat::Plain => {
            if reminders.is_empty() {
                println!("No upcoming reminders.");
                return Ok(());
            }

            for reminder in &reminders {
                let check = if reminder.completed { "[x]" } else { "[ ]" };
                let title = if reminder.completed {
                    paint(&reminder.title, Color::STRIKETHROUGH, use_color)
                } else {
                    reminder.title.clone()
                };
                let focus = match reminder.kind {
                    ReminderKind::Pomodoro { duration_minutes } => {
                        paint(&format!(" ({} min focus)", duration_minutes), Color::MAGENTA, use_color)
                    }
                    ReminderKind::Reminder => String::new(),
                };
                println!(
                    "{} {}  {}{}",
                    check,
                    paint(&local_time(reminder.date), Color::GRAY, use_color),
                    title,
                    focus
                );
            }
        }
    }

    Ok(())
}
