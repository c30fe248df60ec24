use anyhow::Result;
use chrono::Utc;

use studyhub_lib::flashcards::DeckSummary;
use studyhub_lib::store::{Action, ActionOutput};

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run_list(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let now = Utc::now();
    let decks: Vec<DeckSummary> = app
        .store
        .data()
        .decks
        .iter()
        .map(|d| DeckSummary::from_deck(d, now))
        .collect();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&decks)?);
        }
        OutputFormat::Plain => {
            if decks.is_empty() {
                println!("No decks yet. Save a highlight with `add-card` to create one.");
                return Ok(());
            }

            let max_name_len = decks.iter().map(|d| d.name.len()).max().unwrap_or(4).max(4);
            println!("{:<width$} Cards  Due", "Deck", width = max_name_len + 1);
            println!("{}", "\u{2500}".repeat(max_name_len + 12));

            for deck in &decks {
                let due = format!("{}", deck.due_count);
                let due = if deck.due_count > 0 {
                    paint(&due, Color::YELLOW, use_color)
                } else {
                    due
                };
                println!("{:<width$} {:>5}  {}", deck.name, deck.card_count, due, width = max_name_len + 1);
            }
        }
    }

    Ok(())
}

/// Save a flashcard, into the deck of `note` when given
pub fn run_add(
    app: &mut App,
    note: Option<&str>,
    front: &str,
    back: &str,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let note_id = match note {
        Some(title) => Some(app.find_note(title)?.id),
        None => None,
    };

    let output = app.store.dispatch(Action::AddCardFromHighlight {
        note_id,
        front: front.to_string(),
        back: back.to_string(),
    })?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
        OutputFormat::Plain => {
            if let ActionOutput::CardAdded { deck_id, .. } = output {
                let deck = app
                    .store
                    .data()
                    .decks
                    .iter()
                    .find(|d| d.id == deck_id)
                    .map(|d| d.name.clone())
                    .unwrap_or_default();
                println!("{} Card saved to '{}'", paint("\u{2713}", Color::GREEN, use_color), deck);
            }
        }
    }

    Ok(())
}
