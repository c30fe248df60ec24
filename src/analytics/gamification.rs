//! XP, levels and achievements

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pomodoro::PomodoroSession;

/// XP awarded for a quiz with every answer correct
pub const PERFECT_QUIZ_XP: u32 = 20;

const STREAK_DAYS: u64 = 7;
const NOTE_MASTER_NOTES: usize = 5;
const MARATHON_MINUTES: u32 = 300;
const QUIZ_WHIZ_RUN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Achievement {
    FirstSession,
    WeekStreak,
    NoteMaster,
    Marathon,
    QuizWhiz,
}

impl Achievement {
    pub const ALL: [Achievement; 5] = [
        Achievement::FirstSession,
        Achievement::WeekStreak,
        Achievement::NoteMaster,
        Achievement::Marathon,
        Achievement::QuizWhiz,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Achievement::FirstSession => "First Session",
            Achievement::WeekStreak => "Week Streak",
            Achievement::NoteMaster => "Note Master",
            Achievement::Marathon => "Marathon Runner",
            Achievement::QuizWhiz => "Quiz Whiz",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Achievement::FirstSession => "Complete your first Pomodoro session.",
            Achievement::WeekStreak => "Study every day for 7 days.",
            Achievement::NoteMaster => "Create 5 detailed notes.",
            Achievement::Marathon => "Study for 5 hours in a single day.",
            Achievement::QuizWhiz => "Ace 3 quizzes in a row.",
        }
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gamification {
    /// XP earned towards the next level
    pub xp: u32,
    pub level: u32,
    #[serde(default)]
    pub unlocked_achievements: BTreeSet<Achievement>,
}

impl Default for Gamification {
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
            unlocked_achievements: BTreeSet::new(),
        }
    }
}

impl Gamification {
    pub fn xp_for_next_level(&self) -> u32 {
        (self.level + 1) * 100
    }

    /// 0-100
    pub fn level_progress(&self) -> f64 {
        f64::from(self.xp) / f64::from(self.xp_for_next_level()) * 100.0
    }

    /// Add XP, levelling up as often as needed. Returns levels gained.
    pub fn award_xp(&mut self, amount: u32) -> u32 {
        self.xp = self.xp.saturating_add(amount);
        let mut gained = 0;
        while self.xp >= self.xp_for_next_level() {
            self.xp -= self.xp_for_next_level();
            self.level += 1;
            gained += 1;
        }
        if gained > 0 {
            log::info!("Reached level {}", self.level);
        }
        gained
    }

    /// Unlock every achievement earned by `progress`. Returns the new ones.
    pub fn unlock_earned(&mut self, progress: &StudyProgress) -> Vec<Achievement> {
        let mut unlocked = Vec::new();
        for achievement in Achievement::ALL {
            if !self.unlocked_achievements.contains(&achievement) && progress.has_earned(achievement) {
                self.unlocked_achievements.insert(achievement);
                unlocked.push(achievement);
            }
        }
        for achievement in &unlocked {
            log::info!("Achievement unlocked: {}", achievement);
        }
        unlocked
    }
}

/// A graded quiz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_id: Option<Uuid>,
    pub score: u32,
    pub total: u32,
    pub taken_at: DateTime<Utc>,
}

impl QuizAttempt {
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.score == self.total
    }
}

/// Facts the achievements are evaluated against, in the user's local days
#[derive(Debug, Clone, Default)]
pub struct StudyProgress {
    pub session_count: usize,
    pub note_count: usize,
    /// Local dates with at least one focus session, and minutes per date
    pub minutes_by_day: Vec<(NaiveDate, u32)>,
    pub today: Option<NaiveDate>,
    /// Most recent attempts last
    pub recent_quizzes_perfect: Vec<bool>,
}

impl StudyProgress {
    pub fn collect<Tz: TimeZone>(
        sessions: &[PomodoroSession],
        note_count: usize,
        quizzes: &[QuizAttempt],
        now: &DateTime<Tz>,
    ) -> Self {
        Self {
            session_count: sessions.len(),
            note_count,
            minutes_by_day: minutes_by_local_day(sessions, &now.timezone()),
            today: Some(now.date_naive()),
            recent_quizzes_perfect: quizzes.iter().map(QuizAttempt::is_perfect).collect(),
        }
    }

    fn minutes_on(&self, date: NaiveDate) -> u32 {
        self.minutes_by_day
            .iter()
            .filter(|(d, _)| *d == date)
            .map(|(_, m)| *m)
            .sum()
    }

    /// Consecutive local days with focus sessions, ending today (or
    /// yesterday when nothing has been done yet today)
    pub fn streak_days(&self) -> u32 {
        let Some(today) = self.today else {
            return 0;
        };
        let mut day = if self.minutes_on(today) > 0 {
            today
        } else {
            match today.checked_sub_days(Days::new(1)) {
                Some(d) => d,
                None => return 0,
            }
        };

        let mut streak = 0;
        while self.minutes_on(day) > 0 {
            streak += 1;
            match day.checked_sub_days(Days::new(1)) {
                Some(d) => day = d,
                None => break,
            }
        }
        streak
    }

    pub fn has_earned(&self, achievement: Achievement) -> bool {
        match achievement {
            Achievement::FirstSession => self.session_count >= 1,
            Achievement::WeekStreak => self.today.is_some_and(|today| {
                (0..STREAK_DAYS).all(|back| {
                    today
                        .checked_sub_days(Days::new(back))
                        .is_some_and(|d| self.minutes_on(d) > 0)
                })
            }),
            Achievement::NoteMaster => self.note_count >= NOTE_MASTER_NOTES,
            Achievement::Marathon => self.minutes_by_day.iter().any(|(_, m)| *m >= MARATHON_MINUTES),
            Achievement::QuizWhiz => {
                let attempts = &self.recent_quizzes_perfect;
                attempts.len() >= QUIZ_WHIZ_RUN && attempts[attempts.len() - QUIZ_WHIZ_RUN..].iter().all(|p| *p)
            }
        }
    }
}

/// Focus minutes grouped by local date, oldest first
pub fn minutes_by_local_day<Tz: TimeZone>(sessions: &[PomodoroSession], tz: &Tz) -> Vec<(NaiveDate, u32)> {
    let mut by_day: Vec<(NaiveDate, u32)> = Vec::new();
    for session in sessions {
        let date = session.completed_at.with_timezone(tz).date_naive();
        match by_day.iter_mut().find(|(d, _)| *d == date) {
            Some((_, minutes)) => *minutes += session.duration_minutes,
            None => by_day.push((date, session.duration_minutes)),
        }
    }
    by_day.sort_by_key(|(d, _)| *d);
    by_day
}
