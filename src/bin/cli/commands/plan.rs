use anyhow::{Context, Result};

use studyhub_lib::ai::{GeminiClient, StudyAssistant};
use studyhub_lib::notes::parse_tags;
use studyhub_lib::roadmap::find_course;
use studyhub_lib::store::{Action, ActionOutput};

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

/// Generate an AI study plan for `subject` and add it as a course
pub fn run(app: &mut App, subject: &str, tags: Option<&str>, format: &OutputFormat, use_color: bool) -> Result<()> {
    let client = GeminiClient::new(&app.config.ai)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    if matches!(format, OutputFormat::Plain) {
        println!("Generating a study plan for '{}'...", subject.trim());
    }
    let plan = runtime.block_on(client.generate_study_plan(subject.trim()))?;

    let output = app.store.dispatch(Action::AddCourseFromPlan {
        plan,
        tags: tags.map(parse_tags).unwrap_or_default(),
    })?;
    let ActionOutput::Created { id } = output else {
        anyhow::bail!("Unexpected result {:?}", output);
    };
    let course = find_course(&app.store.data().courses, id)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(course)?),
        OutputFormat::Plain => {
            println!("{}", paint(&course.name, Color::BOLD, use_color));
            if !course.description.is_empty() {
                println!("{}", course.description);
            }
            if !course.prerequisites.is_empty() {
                println!(
                    "{} {}",
                    paint("Prerequisites:", Color::GRAY, use_color),
                    course.prerequisites.join(", ")
                );
            }
            for (i, phase) in course.phases.iter().enumerate() {
                println!("\n{}", paint(&format!("{}. {}", i + 1, phase.title), Color::CYAN, use_color));
                for topic in &phase.topics {
                    println!("   [ ] {}", topic.text);
                }
            }
        }
    }

    Ok(())
}
