use anyhow::Result;

use studyhub_lib::notes::NoteSummary;

use crate::app::App;
use crate::render::terminal::{local_time, paint, render_note_content, Color};
use crate::OutputFormat;

pub fn run_list(app: &App, tag: Option<&str>, format: &OutputFormat, use_color: bool) -> Result<()> {
    let mut notes: Vec<NoteSummary> = app
        .store
        .data()
        .notes
        .iter()
        .filter(|n| tag.map_or(true, |t| n.tags.iter().any(|nt| nt.eq_ignore_ascii_case(t))))
        .map(NoteSummary::from)
        .collect();
    notes.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&notes)?),
        OutputFormat::Plain => {
            if notes.is_empty() {
                println!("No notes found.");
                return Ok(());
            }

            for note in &notes {
                let tags = if note.tags.is_empty() {
                    String::new()
                } else {
                    let joined: Vec<String> = note.tags.iter().map(|t| format!("#{}", t)).collect();
                    format!(" {}", paint(&joined.join(" "), Color::BLUE, use_color))
                };
                println!(
                    "{}  {}{}",
                    paint(&local_time(note.last_modified), Color::GRAY, use_color),
                    note.title,
                    tags
                );
            }
        }
    }

    Ok(())
}

pub fn run_show(app: &App, title: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let note = app.find_note(title)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&note)?),
        OutputFormat::Plain => {
            println!("{}", paint(&note.title, Color::BOLD, use_color));
            let mut meta = format!("Modified {}", local_time(note.last_modified));
            if !note.versions.is_empty() {
                meta.push_str(&format!(", {} earlier versions", note.versions.len()));
            }
            println!("{}", paint(&meta, Color::GRAY, use_color));
            if !note.tags.is_empty() {
                let tags: Vec<String> = note.tags.iter().map(|t| format!("#{}", t)).collect();
                println!("{}", paint(&tags.join(" "), Color::BLUE, use_color));
            }
            println!();

            for line in render_note_content(&note.content, "") {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
