//! Built-in "MLOps career plan" course and its weekly reminders

use chrono::{DateTime, Days, Local, NaiveTime, TimeZone, Utc};
use uuid::Uuid;

use super::models::{Course, Phase, Topic};
use crate::reminders::{Reminder, ReminderKind};

const PLAN_NAMESPACE: Uuid = Uuid::from_u128(0x5d1e_9c0a_4b7f_4e21_9a3d_6c8f_0b2e_7a41);

const PHASES: [(&str, &[(&str, bool)]); 4] = [
    (
        "Phase 1: ML Foundations (Weeks 1-8)",
        &[
            ("Supervised Machine Learning (Course 1) - Complete Week 1 & 2", true),
            ("Neural Networks and Deep Learning - Complete foundational concepts", true),
            ("Machine Learning in Production - Complete all modules", true),
            ("Improving Deep Neural Networks - Complete regularization & optimization", true),
        ],
    ),
    (
        "Phase 2: MLOps Core (Weeks 9-16)",
        &[
            ("MLOps Specialization (Duke) - Course 1 & 2", false),
            ("Google Cloud MLOps: Getting Started", false),
            ("MLOps Specialization (Duke) - Course 3", false),
        ],
    ),
    (
        "Phase 3: Containers & Cloud (Weeks 17-20)",
        &[
            ("Docker & Kubernetes (IBM)", false),
            ("AWS ML Solutions (FREE!)", false),
            ("Docker & Kubernetes Masterclass (advanced)", false),
        ],
    ),
    (
        "Phase 4: Advanced & Projects (Weeks 21-24)",
        &[
            ("Advanced Learning Algorithms", true),
            ("Structuring Machine Learning Projects", true),
            ("Portfolio Project: Deploy with Docker + Kubernetes", false),
            ("Portfolio Project: Create CI/CD pipeline", false),
            ("Portfolio Project: Build MLflow tracking system", false),
            ("Portfolio Project: Deploy on AWS/GCP with monitoring", false),
        ],
    ),
];

const WEEKLY_REMINDERS: [(u64, &str); 10] = [
    (1, "Start Week 1-2: Supervised Machine Learning"),
    (3, "Start Week 3-4: Neural Networks and Deep Learning"),
    (5, "Start Week 5-6: Machine Learning in Production"),
    (7, "Start Week 7-8: Improving Deep Neural Networks"),
    (9, "Start Week 9-12: MLOps Specialization (Duke) - Course 1 & 2"),
    (13, "Start Week 13-16: Google Cloud MLOps & MLOps Tools"),
    (17, "Start Week 17-18: Docker & Kubernetes (IBM)"),
    (19, "Start Week 19-20: AWS ML & Advanced Kubernetes"),
    (21, "Start Week 21-22: Advanced Algorithms & Structuring Projects"),
    (23, "Start Week 23-24: MLOps Portfolio Projects"),
];

fn seed_id(name: &str) -> Uuid {
    Uuid::new_v5(&PLAN_NAMESPACE, name.as_bytes())
}

pub fn mlops_course() -> Course {
    let phases = PHASES
        .iter()
        .enumerate()
        .map(|(p, (title, topics))| Phase {
            id: seed_id(&format!("mlops-phase-{}", p + 1)),
            title: title.to_string(),
            topics: topics
                .iter()
                .enumerate()
                .map(|(t, (text, completed))| Topic {
                    id: seed_id(&format!("p{}-t{}", p + 1, t + 1)),
                    text: text.to_string(),
                    completed: *completed,
                    resources: Vec::new(),
                })
                .collect(),
        })
        .collect();

    Course {
        id: seed_id("mlops-course"),
        name: "MLOps Career Plan".to_string(),
        description: "A 24-week path from ML foundations to deployed MLOps portfolio projects.".to_string(),
        prerequisites: vec!["Python".to_string(), "Basic linear algebra".to_string()],
        phases,
        tags: vec!["mlops".to_string(), "career-plan".to_string()],
    }
}

/// Weekly reminders at 09:00 local time; week `n` falls on today + (n-1) weeks
pub fn mlops_reminders<Tz: TimeZone>(now: &DateTime<Tz>) -> Vec<Reminder> {
    let tz = now.timezone();
    let today = now.date_naive();

    WEEKLY_REMINDERS
        .iter()
        .filter_map(|(week, title)| {
            let nine = NaiveTime::from_hms_opt(9, 0, 0)?;
            let day = today.checked_add_days(Days::new((week - 1) * 7))?;
            let date = tz
                .from_local_datetime(&day.and_time(nine))
                .earliest()?
                .with_timezone(&Utc);
            Some(Reminder {
                id: seed_id(&format!("mlops-rem-{}", week)),
                title: format!("MLOps Plan: {}", title),
                date,
                completed: false,
                kind: ReminderKind::Reminder,
                tags: vec!["mlops".to_string(), "weekly-goal".to_string()],
            })
        })
        .collect()
}

/// Seed data for a fresh install, relative to the current local time
pub fn initial_roadmap() -> (Vec<Course>, Vec<Reminder>) {
    (vec![mlops_course()], mlops_reminders(&Local::now()))
}
