//! Pomodoro sequences and session history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task name recorded when the user did not enter one
pub const UNTITLED_TASK: &str = "Untitled Focus Session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepKind {
    Pomodoro,
    ShortBreak,
    LongBreak,
}

impl StepKind {
    pub fn is_focus(self) -> bool {
        self == StepKind::Pomodoro
    }

    pub fn label(self) -> &'static str {
        match self {
            StepKind::Pomodoro => "Focus",
            StepKind::ShortBreak => "Short Break",
            StepKind::LongBreak => "Long Break",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroStep {
    #[serde(rename = "type")]
    pub kind: StepKind,
    pub duration_minutes: u32,
}

impl PomodoroStep {
    pub const fn new(kind: StepKind, duration_minutes: u32) -> Self {
        Self { kind, duration_minutes }
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_minutes.saturating_mul(60)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSequence {
    pub id: Uuid,
    pub name: String,
    pub steps: Vec<PomodoroStep>,
}

/// A completed focus step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSession {
    pub id: Uuid,
    pub task: String,
    pub duration_minutes: u32,
    pub completed_at: DateTime<Utc>,
}

impl PomodoroSession {
    pub fn new(task: &str, duration_minutes: u32, completed_at: DateTime<Utc>) -> Self {
        let task = task.trim();
        Self {
            id: Uuid::new_v4(),
            task: if task.is_empty() { UNTITLED_TASK.to_string() } else { task.to_string() },
            duration_minutes,
            completed_at,
        }
    }
}

const SEQUENCE_NAMESPACE: Uuid = Uuid::from_u128(0x8b0f_3e6d_21c4_4f5a_b7e9_1d2c_3a4b_5c6d);

/// Built-in sequences available on a fresh install
pub fn default_sequences() -> Vec<PomodoroSequence> {
    use StepKind::*;

    let standard = vec![
        PomodoroStep::new(Pomodoro, 25),
        PomodoroStep::new(ShortBreak, 5),
        PomodoroStep::new(Pomodoro, 25),
        PomodoroStep::new(ShortBreak, 5),
        PomodoroStep::new(Pomodoro, 25),
        PomodoroStep::new(ShortBreak, 5),
        PomodoroStep::new(Pomodoro, 25),
        PomodoroStep::new(LongBreak, 15),
    ];
    let deep_work = vec![
        PomodoroStep::new(Pomodoro, 50),
        PomodoroStep::new(ShortBreak, 10),
        PomodoroStep::new(Pomodoro, 50),
        PomodoroStep::new(LongBreak, 30),
    ];

    vec![
        PomodoroSequence {
            id: Uuid::new_v5(&SEQUENCE_NAMESPACE, b"standard"),
            name: "Standard Pomodoro".to_string(),
            steps: standard,
        },
        PomodoroSequence {
            id: Uuid::new_v5(&SEQUENCE_NAMESPACE, b"deep-work"),
            name: "Deep Work (50/10)".to_string(),
            steps: deep_work,
        },
    ]
}

/// Format seconds as `MM:SS`
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sequences() {
        let sequences = default_sequences();
        assert_eq!(sequences.len(), 2);

        let standard = &sequences[0];
        let focus: Vec<u32> = standard
            .steps
            .iter()
            .filter(|s| s.kind.is_focus())
            .map(|s| s.duration_minutes)
            .collect();
        assert_eq!(focus, vec![25, 25, 25, 25]);
        assert_eq!(standard.steps.last().unwrap().kind, StepKind::LongBreak);

        let deep: Vec<u32> = sequences[1].steps.iter().map(|s| s.duration_minutes).collect();
        assert_eq!(deep, vec![50, 10, 50, 30]);
    }

    #[test]
    fn test_session_task_defaults() {
        let session = PomodoroSession::new("   ", 25, Utc::now());
        assert_eq!(session.task, UNTITLED_TASK);
        assert_eq!(PomodoroSession::new(" Essay ", 25, Utc::now()).task, "Essay");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(25 * 60), "25:00");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(100 * 60 + 5), "100:05");
    }
}
