mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "studyhub-cli", about = "StudyHub from the terminal", version)]
struct Cli {
    /// Use a specific data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List flashcard decks with due counts
    Decks,

    /// Review the due cards of a deck
    Review {
        /// Deck name (case-insensitive prefix match)
        deck: String,
    },

    /// Save a flashcard
    AddCard {
        /// Question side
        front: String,
        /// Answer side (use "-" to read from stdin)
        back: String,
        /// Put the card in the deck of this note
        #[arg(long)]
        note: Option<String>,
    },

    /// List notes, or show one
    Notes {
        /// Note title (case-insensitive prefix match)
        title: Option<String>,
        /// Only notes with this tag
        #[arg(long)]
        tag: Option<String>,
    },

    /// Add a reminder
    Remind {
        title: String,
        /// Local time, "YYYY-MM-DD HH:MM"
        #[arg(long)]
        at: String,
        /// Schedule a focus session of this many minutes
        #[arg(long)]
        focus: Option<u32>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },

    /// List upcoming reminders
    Reminders {
        /// Maximum results
        #[arg(long, default_value = "5")]
        limit: usize,
        /// Include past and completed reminders
        #[arg(long)]
        all: bool,
    },

    /// Run a pomodoro sequence
    Focus {
        /// Sequence name (defaults to the first sequence)
        #[arg(long)]
        sequence: Option<String>,
        /// Task recorded with each focus session
        #[arg(long)]
        task: Option<String>,
        /// Number of steps to run
        #[arg(long)]
        steps: Option<usize>,
    },

    /// Generate a course roadmap with the AI assistant
    Plan {
        subject: String,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },

    /// Level, streak and focus statistics
    Stats,

    /// List tags with counts, or the items carrying one tag
    Tags {
        tag: Option<String>,
    },
}

/// Resolve "-" as stdin
fn resolve_content(content: String) -> anyhow::Result<String> {
    if content == "-" {
        let mut buf = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)?;
        Ok(buf.trim_end().to_string())
    } else {
        Ok(content)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let mut app = app::App::new(cli.data_dir)?;
    let format = &cli.format;

    match cli.command {
        Command::Decks => commands::decks::run_list(&app, format, use_color)?,
        Command::Review { deck } => commands::review::run(&mut app, &deck, format, use_color)?,
        Command::AddCard { front, back, note } => {
            let back = resolve_content(back)?;
            commands::decks::run_add(&mut app, note.as_deref(), &front, &back, format, use_color)?;
        }
        Command::Notes { title: Some(title), .. } => commands::notes::run_show(&app, &title, format, use_color)?,
        Command::Notes { title: None, tag } => commands::notes::run_list(&app, tag.as_deref(), format, use_color)?,
        Command::Remind { title, at, focus, tags } => {
            commands::reminders::run_add(&mut app, &title, &at, focus, tags.as_deref(), format, use_color)?;
        }
        Command::Reminders { limit, all } => commands::reminders::run_list(&app, limit, all, format, use_color)?,
        Command::Focus { sequence, task, steps } => {
            commands::focus::run(&mut app, sequence.as_deref(), task.as_deref(), steps, format, use_color)?;
        }
        Command::Plan { subject, tags } => {
            commands::plan::run(&mut app, &subject, tags.as_deref(), format, use_color)?;
        }
        Command::Stats => commands::stats::run(&app, format, use_color)?,
        Command::Tags { tag } => commands::tags::run(&app, tag.as_deref(), format, use_color)?,
    }

    Ok(())
}
