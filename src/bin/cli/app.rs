use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use studyhub_lib::config::AppConfig;
use studyhub_lib::flashcards::Deck;
use studyhub_lib::notes::Note;
use studyhub_lib::pomodoro::PomodoroSequence;
use studyhub_lib::storage::FileStorage;
use studyhub_lib::store::StudyStore;

/// Shared application state for CLI commands
pub struct App {
    pub config: AppConfig,
    pub store: StudyStore,
}

impl App {
    /// Load the config and open the data directory
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = AppConfig::load(None).context("Failed to load configuration")?;
        if let Some(dir) = data_dir {
            config.data_dir = Some(dir);
        }

        let data_dir = config.resolve_data_dir().context("Failed to get data directory")?;
        let store = StudyStore::open(FileStorage::new(data_dir)).context("Failed to open study data")?;

        Ok(Self { config, store })
    }

    /// Find a deck by name (case-insensitive, exact then prefix match)
    pub fn find_deck(&self, name: &str) -> Result<Deck> {
        let decks = &self.store.data().decks;
        find_by_name(decks, name, "deck", |d| d.name.as_str()).cloned()
    }

    /// Find a note by title (case-insensitive, exact then prefix match)
    pub fn find_note(&self, title: &str) -> Result<Note> {
        let notes = &self.store.data().notes;
        find_by_name(notes, title, "note", |n| n.title.as_str()).cloned()
    }

    pub fn find_sequence(&self, name: &str) -> Result<PomodoroSequence> {
        let sequences = &self.store.data().pomodoro_sequences;
        find_by_name(sequences, name, "sequence", |s| s.name.as_str()).cloned()
    }
}

fn find_by_name<'a, T, F>(items: &'a [T], name: &str, kind: &str, name_of: F) -> Result<&'a T>
where
    F: Fn(&T) -> &str,
{
    let name_lower = name.to_lowercase();

    // Exact match first
    if let Some(item) = items.iter().find(|i| name_of(*i).to_lowercase() == name_lower) {
        return Ok(item);
    }

    let matches: Vec<&T> = items
        .iter()
        .filter(|i| name_of(*i).to_lowercase().starts_with(&name_lower))
        .collect();

    match matches.len() {
        0 if items.is_empty() => bail!("No {}s yet", kind),
        0 => {
            let available: Vec<String> = items.iter().map(|i| format!("  - {}", name_of(i))).collect();
            bail!("No {} matching '{}'. Available:\n{}", kind, name, available.join("\n"))
        }
        1 => Ok(matches[0]),
        _ => {
            let listed: Vec<String> = matches.iter().map(|i| format!("  - {}", name_of(*i))).collect();
            bail!("Ambiguous {} name '{}'. Matches:\n{}", kind, name, listed.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decks() -> Vec<Deck> {
        vec![
            Deck::new("Biology".to_string(), None),
            Deck::new("Biochemistry".to_string(), None),
            Deck::new("Rust".to_string(), None),
        ]
    }

    #[test]
    fn test_find_by_name_exact_prefix_and_ambiguous() {
        let decks = decks();
        fn name(deck: &Deck) -> &str {
            &deck.name
        }

        assert_eq!(find_by_name(&decks, "rust", "deck", name).unwrap().name, "Rust");
        assert_eq!(find_by_name(&decks, "biol", "deck", name).unwrap().name, "Biology");
        assert!(find_by_name(&decks, "bio", "deck", name).is_err());
        assert!(find_by_name(&decks, "chem", "deck", name).is_err());
    }
}
