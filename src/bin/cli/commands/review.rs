use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use chrono::{Local, Utc};

use studyhub_lib::flashcards::algorithm::format_interval;
use studyhub_lib::flashcards::{preview_intervals, Rating, ReviewSession, SessionProgress};

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

/// Interactive review of the due cards of a deck
pub fn run(app: &mut App, deck_name: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let deck = app.find_deck(deck_name)?;

    let Some(mut session) = ReviewSession::start(&deck, Utc::now()) else {
        match format {
            OutputFormat::Json => println!("{}", serde_json::json!({ "reviewed": 0, "total": 0 })),
            OutputFormat::Plain => println!("Nothing due in '{}'. Come back later.", deck.name),
        }
        return Ok(());
    };

    if matches!(format, OutputFormat::Json) {
        bail!("Review is interactive; use --format plain");
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut reviewed = 0;

    println!(
        "{} {} card{} due\n",
        paint(&session.deck_name, Color::BOLD, use_color),
        session.len(),
        if session.len() == 1 { "" } else { "s" }
    );

    while let Some(card) = session.current().cloned() {
        println!(
            "{} {}",
            paint(&format!("[{}/{}]", session.position(), session.len()), Color::GRAY, use_color),
            paint(&card.front, Color::CYAN, use_color)
        );
        print!("  (Enter to reveal, q to quit) ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        if line?.trim() == "q" {
            break;
        }

        println!("  {}", card.back);
        let now = Local::now();
        let choices: Vec<String> = preview_intervals(&card, &now)
            .iter()
            .map(|(rating, days)| format!("{} ({})", rating, format_interval(*days)))
            .collect();

        let rating = loop {
            print!("  {} > ", choices.join(" / "));
            io::stdout().flush()?;
            let Some(line) = lines.next() else {
                return finish(reviewed, &session, use_color);
            };
            let line = line?;
            if line.trim() == "q" {
                return finish(reviewed, &session, use_color);
            }
            match line.parse::<Rating>() {
                Ok(rating) => break rating,
                Err(e) => println!("  {}", paint(&e, Color::RED, use_color)),
            }
        };

        let (result, progress) =
            session.rate(rating, |deck_id, card_id, rating| app.store.rate_card(deck_id, card_id, rating, &now))?;
        reviewed += 1;
        println!(
            "  {} next review in {}\n",
            paint("\u{2713}", Color::GREEN, use_color),
            format_interval(result.interval)
        );

        if progress == SessionProgress::Finished {
            break;
        }
    }

    finish(reviewed, &session, use_color)
}

fn finish(reviewed: usize, session: &ReviewSession, use_color: bool) -> Result<()> {
    let summary = format!("Reviewed {} of {} cards in '{}'", reviewed, session.len(), session.deck_name);
    println!("{}", paint(&summary, Color::BOLD, use_color));
    Ok(())
}
