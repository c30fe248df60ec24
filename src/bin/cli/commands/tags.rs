use anyhow::Result;

use studyhub_lib::tags::{TagIndex, TaggedItem};

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, tag: Option<&str>, format: &OutputFormat, use_color: bool) -> Result<()> {
    let data = app.store.data();
    let index = TagIndex::build(&data.courses, &data.reminders, &data.notes);

    if let Some(tag) = tag {
        return run_items(&index, tag, format, use_color);
    }

    let mut tags = index.counts();
    tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = tags
                .iter()
                .map(|(tag, count)| serde_json::json!({ "tag": tag, "count": count }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if tags.is_empty() {
                println!("No tags found.");
                return Ok(());
            }

            let max_tag_len = tags.iter().map(|(t, _)| t.len()).max().unwrap_or(5).max(5);

            println!("{:<width$} Count", "Tag", width = max_tag_len + 1);
            println!("{} {}", "\u{2500}".repeat(max_tag_len + 1), "\u{2500}".repeat(6));

            for (tag, count) in &tags {
                println!("#{:<width$} {}", tag, count, width = max_tag_len);
            }

            println!("\n{} tags total", tags.len());
        }
    }

    Ok(())
}

fn run_items(index: &TagIndex, tag: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let items = index.items(tag);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(items)?),
        OutputFormat::Plain => {
            if items.is_empty() {
                println!("Nothing tagged #{}.", tag);
                return Ok(());
            }
            for item in items {
                let kind = match item {
                    TaggedItem::Course { .. } => "course",
                    TaggedItem::Reminder { .. } => "reminder",
                    TaggedItem::Note { .. } => "note",
                };
                println!("{} {}", paint(&format!("[{}]", kind), Color::GRAY, use_color), item.title());
            }
        }
    }

    Ok(())
}
