use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;

use studyhub_lib::pomodoro::{format_clock, PomodoroTimer, StepCompletion};
use studyhub_lib::store::{Action, ActionOutput};

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

/// Run a pomodoro sequence in the terminal, recording each finished focus step.
/// `steps` limits how many steps run; the whole sequence runs by default.
pub fn run(
    app: &mut App,
    sequence: Option<&str>,
    task: Option<&str>,
    steps: Option<usize>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let sequence = match sequence {
        Some(name) => app.find_sequence(name)?,
        None => app
            .store
            .data()
            .pomodoro_sequences
            .first()
            .cloned()
            .context("No pomodoro sequences configured")?,
    };
    let total_steps = steps.unwrap_or(sequence.steps.len());

    let mut timer = PomodoroTimer::new(sequence)?;
    timer.set_task(task.unwrap_or_default().to_string());
    timer.start();

    let plain = matches!(format, OutputFormat::Plain);
    if plain {
        println!(
            "{} ({} step{})",
            paint(&timer.sequence().name, Color::BOLD, use_color),
            total_steps,
            if total_steps == 1 { "" } else { "s" }
        );
    }

    let mut recorded = Vec::new();
    for _ in 0..total_steps {
        let completion = loop {
            if plain {
                let step = timer.current_step();
                print!(
                    "\r{} {}  ",
                    paint(step.kind.label(), step_color(step.kind.is_focus()), use_color),
                    format_clock(timer.remaining_secs())
                );
                io::stdout().flush()?;
            }
            thread::sleep(Duration::from_secs(1));
            if let Some(completion) = timer.tick(Utc::now()) {
                break completion;
            }
        };

        if let Some(output) = record(app, &completion)? {
            if plain {
                print_progress(&completion, &output, use_color);
            }
            recorded.push(output);
        } else if plain {
            println!("\r{} done. Next: {}   ", completion.finished.kind.label(), completion.next.kind.label());
        }
        timer.start();
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&recorded)?),
        OutputFormat::Plain => println!("{}", paint("Sequence finished.", Color::BOLD, use_color)),
    }

    Ok(())
}

fn step_color(focus: bool) -> &'static str {
    if focus {
        Color::RED
    } else {
        Color::GREEN
    }
}

/// Store the session of a finished focus step
fn record(app: &mut App, completion: &StepCompletion) -> Result<Option<ActionOutput>> {
    let Some(session) = completion.session.clone() else {
        return Ok(None);
    };
    log::info!("Recording {} minute focus session '{}'", session.duration_minutes, session.task);
    Ok(Some(app.store.dispatch(Action::RecordFocusSession(session))?))
}

fn print_progress(completion: &StepCompletion, output: &ActionOutput, use_color: bool) {
    println!(
        "\r{} {} finished. Next: {}   ",
        paint("\u{2713}", Color::GREEN, use_color),
        completion.finished.kind.label(),
        completion.next.kind.label()
    );
    if let ActionOutput::Progress {
        xp_awarded,
        levels_gained,
        unlocked,
    } = output
    {
        println!("  +{} XP", xp_awarded);
        if *levels_gained > 0 {
            println!("  {}", paint("Level up!", Color::YELLOW, use_color));
        }
        for achievement in unlocked {
            println!("  {} {}", paint("Achievement unlocked:", Color::YELLOW, use_color), achievement);
        }
    }
}
