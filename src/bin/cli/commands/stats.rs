use anyhow::Result;
use chrono::Local;

use studyhub_lib::analytics::overview;

use crate::app::App;
use crate::render::terminal::{paint, progress_bar, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let data = app.store.data();
    let now = Local::now();
    let progress = data.progress(&now);
    let stats = overview(&data.pomodoro_sessions, &data.courses, &data.gamification, &progress, &now);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Plain => {
            println!(
                "{} {}  {} / {} XP",
                paint(&format!("Level {}", stats.level), Color::BOLD, use_color),
                progress_bar(stats.level_progress, 20),
                stats.xp,
                stats.xp_for_next_level
            );
            println!("Streak: {} day{}", stats.streak_days, if stats.streak_days == 1 { "" } else { "s" });

            println!("\n{}", paint("Focus hours, last 7 days", Color::BOLD, use_color));
            let max_hours = stats.weekly_hours.iter().map(|d| d.hours).fold(0.0_f64, f64::max);
            for day in &stats.weekly_hours {
                let percent = if max_hours > 0.0 { day.hours / max_hours * 100.0 } else { 0.0 };
                println!("  {:<3} {} {:.1}h", day.label, progress_bar(percent, 20), day.hours);
            }

            if !stats.courses.is_empty() {
                println!("\n{}", paint("Courses", Color::BOLD, use_color));
                for course in &stats.courses {
                    println!(
                        "  {} {:>3.0}%  {}",
                        progress_bar(course.progress, 20),
                        course.progress,
                        course.name
                    );
                }
            }

            println!("\n{}", paint("Achievements", Color::BOLD, use_color));
            for achievement in &stats.achievements {
                let (mark, color) = if achievement.unlocked {
                    ("\u{2605}", Color::YELLOW)
                } else {
                    ("\u{2606}", Color::GRAY)
                };
                println!(
                    "  {} {} {}",
                    paint(mark, color, use_color),
                    achievement.title,
                    paint(&format!("- {}", achievement.description), Color::GRAY, use_color)
                );
            }
        }
    }

    Ok(())
}
