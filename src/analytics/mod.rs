//! Study analytics and gamification

pub mod gamification;

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use gamification::{Achievement, Gamification, QuizAttempt, StudyProgress, PERFECT_QUIZ_XP};

use crate::ai::WeeklyStats;
use crate::dashboard::Task;
use crate::pomodoro::PomodoroSession;
use crate::roadmap::Course;

/// Focus hours on one local day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayHours {
    pub date: NaiveDate,
    /// Short weekday name, e.g. "Mon"
    pub label: String,
    pub hours: f64,
}

/// Focus hours per day for the last 7 local days, oldest first
pub fn weekly_hours<Tz: TimeZone>(sessions: &[PomodoroSession], now: &DateTime<Tz>) -> Vec<DayHours> {
    let tz = now.timezone();
    let today = now.date_naive();
    let by_day = gamification::minutes_by_local_day(sessions, &tz);

    (0..7u64)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|date| {
            let minutes: u32 = by_day.iter().filter(|(d, _)| *d == date).map(|(_, m)| *m).sum();
            DayHours {
                date,
                label: date.weekday().to_string(),
                hours: f64::from(minutes) / 60.0,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCompletion {
    pub id: Uuid,
    pub name: String,
    pub completed: usize,
    pub remaining: usize,
    pub progress: f64,
}

pub fn course_completion(courses: &[Course]) -> Vec<CourseCompletion> {
    courses
        .iter()
        .map(|course| {
            let completed = course.completed_count();
            CourseCompletion {
                id: course.id,
                name: course.name.clone(),
                completed,
                remaining: course.topic_count() - completed,
                progress: course.progress(),
            }
        })
        .collect()
}

/// Inputs for the AI weekly report
pub fn weekly_stats<Tz: TimeZone>(
    sessions: &[PomodoroSession],
    tasks: &[Task],
    gamification: &Gamification,
    now: &DateTime<Tz>,
) -> WeeklyStats {
    let hours: f64 = weekly_hours(sessions, now).iter().map(|d| d.hours).sum();
    WeeklyStats {
        hours: (hours * 10.0).round() / 10.0,
        tasks: tasks.iter().filter(|t| t.completed).count(),
        achievements: gamification.unlocked_achievements.len(),
    }
}

/// Everything the analytics page shows
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    pub level: u32,
    pub xp: u32,
    pub xp_for_next_level: u32,
    pub level_progress: f64,
    pub streak_days: u32,
    pub weekly_hours: Vec<DayHours>,
    pub courses: Vec<CourseCompletion>,
    pub achievements: Vec<AchievementStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementStatus {
    pub id: Achievement,
    pub title: String,
    pub description: String,
    pub unlocked: bool,
}

pub fn overview<Tz: TimeZone>(
    sessions: &[PomodoroSession],
    courses: &[Course],
    gamification: &Gamification,
    progress: &StudyProgress,
    now: &DateTime<Tz>,
) -> AnalyticsOverview {
    AnalyticsOverview {
        level: gamification.level,
        xp: gamification.xp,
        xp_for_next_level: gamification.xp_for_next_level(),
        level_progress: gamification.level_progress(),
        streak_days: progress.streak_days(),
        weekly_hours: weekly_hours(sessions, now),
        courses: course_completion(courses),
        achievements: Achievement::ALL
            .iter()
            .map(|a| AchievementStatus {
                id: *a,
                title: a.title().to_string(),
                description: a.description().to_string(),
                unlocked: gamification.unlocked_achievements.contains(a),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roadmap::seed::mlops_course;
    use chrono::{Duration, Utc};

    fn now() -> DateTime<chrono::Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, 18, 0, 0).unwrap()
    }

    #[test]
    fn test_weekly_hours_covers_last_seven_days() {
        let sessions = vec![
            PomodoroSession::new("a", 90, now()),
            PomodoroSession::new("b", 30, now() - Duration::days(6)),
            PomodoroSession::new("too old", 600, now() - Duration::days(7)),
        ];

        let week = weekly_hours(&sessions, &now());
        assert_eq!(week.len(), 7);
        assert_eq!(week[6].date, now().date_naive());
        assert_eq!(week[6].label, "Mon");
        assert_eq!(week[6].hours, 1.5);
        assert_eq!(week[0].hours, 0.5);
        let total: f64 = week.iter().map(|d| d.hours).sum();
        assert_eq!(total, 2.0);
    }

    #[test]
    fn test_course_completion() {
        let completion = course_completion(&[mlops_course()]);
        assert_eq!(completion[0].completed, 6);
        assert_eq!(completion[0].remaining, 10);
        assert!((completion[0].progress - 37.5).abs() < 1e-9);
    }

    #[test]
    fn test_weekly_stats() {
        let sessions = vec![PomodoroSession::new("a", 100, now())];
        let tasks = vec![
            Task { id: Uuid::new_v4(), text: "done".into(), completed: true },
            Task { id: Uuid::new_v4(), text: "open".into(), completed: false },
        ];
        let mut gamification = Gamification::default();
        gamification.unlocked_achievements.insert(Achievement::FirstSession);

        let stats = weekly_stats(&sessions, &tasks, &gamification, &now());
        assert_eq!(stats.hours, 1.7);
        assert_eq!(stats.tasks, 1);
        assert_eq!(stats.achievements, 1);
    }
}
