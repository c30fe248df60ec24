//! Pomodoro timer state machine
//!
//! The timer itself knows nothing about wall-clock scheduling: whoever owns
//! it calls [`PomodoroTimer::tick`] once per second.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::models::{format_clock, PomodoroSequence, PomodoroSession, PomodoroStep};
use crate::storage::{Result, StorageError};

#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    sequence: PomodoroSequence,
    step_index: usize,
    remaining_secs: u32,
    running: bool,
    task: String,
}

/// What happened when a step ran out (or was skipped)
#[derive(Debug, Clone, PartialEq)]
pub struct StepCompletion {
    pub finished: PomodoroStep,
    /// Present when the finished step was a focus step
    pub session: Option<PomodoroSession>,
    pub next: PomodoroStep,
}

/// Serializable view of the timer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub sequence_id: Uuid,
    pub sequence_name: String,
    pub step_index: usize,
    pub step_count: usize,
    pub step: PomodoroStep,
    pub remaining_secs: u32,
    pub clock: String,
    pub running: bool,
    pub task: String,
}

/// A sequence must have at least one step and no zero-length steps
pub fn validate_sequence(sequence: &PomodoroSequence) -> Result<()> {
    if sequence.steps.is_empty() {
        return Err(StorageError::InvalidOperation(format!(
            "Sequence '{}' has no steps",
            sequence.name
        )));
    }
    if sequence.steps.iter().any(|s| s.duration_minutes == 0) {
        return Err(StorageError::InvalidOperation(format!(
            "Sequence '{}' has a step without duration",
            sequence.name
        )));
    }
    Ok(())
}

impl PomodoroTimer {
    pub fn new(sequence: PomodoroSequence) -> Result<Self> {
        validate_sequence(&sequence)?;
        let remaining_secs = sequence.steps[0].duration_secs();
        Ok(Self {
            sequence,
            step_index: 0,
            remaining_secs,
            running: false,
            task: String::new(),
        })
    }

    pub fn current_step(&self) -> PomodoroStep {
        self.sequence.steps[self.step_index]
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn sequence(&self) -> &PomodoroSequence {
        &self.sequence
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Task name recorded with the next completed focus step
    pub fn set_task(&mut self, task: String) {
        self.task = task;
    }

    /// Stop and reload the full duration of the current step
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_secs = self.current_step().duration_secs();
    }

    /// Switch sequence, starting from its first step
    pub fn select(&mut self, sequence: PomodoroSequence) -> Result<()> {
        validate_sequence(&sequence)?;
        self.sequence = sequence;
        self.step_index = 0;
        self.reset();
        Ok(())
    }

    /// Advance one second. Returns the completion when the step runs out.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<StepCompletion> {
        if !self.running {
            return None;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            Some(self.complete_step(now))
        } else {
            None
        }
    }

    /// Finish the current step immediately
    pub fn skip(&mut self, now: DateTime<Utc>) -> StepCompletion {
        self.complete_step(now)
    }

    fn complete_step(&mut self, now: DateTime<Utc>) -> StepCompletion {
        let finished = self.current_step();
        let session = finished
            .kind
            .is_focus()
            .then(|| PomodoroSession::new(&self.task, finished.duration_minutes, now));

        self.step_index = (self.step_index + 1) % self.sequence.steps.len();
        self.reset();

        StepCompletion {
            finished,
            session,
            next: self.current_step(),
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            sequence_id: self.sequence.id,
            sequence_name: self.sequence.name.clone(),
            step_index: self.step_index,
            step_count: self.sequence.steps.len(),
            step: self.current_step(),
            remaining_secs: self.remaining_secs,
            clock: format_clock(self.remaining_secs),
            running: self.running,
            task: self.task.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pomodoro::models::{StepKind, UNTITLED_TASK};

    fn short_sequence() -> PomodoroSequence {
        PomodoroSequence {
            id: Uuid::new_v4(),
            name: "Short".to_string(),
            steps: vec![
                PomodoroStep::new(StepKind::Pomodoro, 1),
                PomodoroStep::new(StepKind::ShortBreak, 2),
            ],
        }
    }

    #[test]
    fn test_paused_timer_does_not_tick() {
        let mut timer = PomodoroTimer::new(short_sequence()).unwrap();
        assert!(timer.tick(Utc::now()).is_none());
        assert_eq!(timer.remaining_secs(), 60);
    }

    #[test]
    fn test_focus_step_completion_records_session_and_stops() {
        let mut timer = PomodoroTimer::new(short_sequence()).unwrap();
        timer.start();

        for _ in 0..59 {
            assert!(timer.tick(Utc::now()).is_none());
        }
        assert_eq!(timer.snapshot().clock, "00:01");

        let completion = timer.tick(Utc::now()).unwrap();
        let session = completion.session.unwrap();
        assert_eq!(session.task, UNTITLED_TASK);
        assert_eq!(session.duration_minutes, 1);
        assert_eq!(completion.next.kind, StepKind::ShortBreak);

        assert!(!timer.is_running());
        assert_eq!(timer.remaining_secs(), 120);
    }

    #[test]
    fn test_break_completion_wraps_without_session() {
        let mut timer = PomodoroTimer::new(short_sequence()).unwrap();
        timer.set_task("Essay".to_string());
        let focus = timer.skip(Utc::now());
        assert_eq!(focus.session.unwrap().task, "Essay");

        let brk = timer.skip(Utc::now());
        assert!(brk.session.is_none());
        assert_eq!(timer.snapshot().step_index, 0);
        assert_eq!(timer.current_step().kind, StepKind::Pomodoro);
    }

    #[test]
    fn test_reset_reloads_current_step() {
        let mut timer = PomodoroTimer::new(short_sequence()).unwrap();
        timer.start();
        timer.tick(Utc::now());
        timer.tick(Utc::now());
        timer.reset();
        assert!(!timer.is_running());
        assert_eq!(timer.remaining_secs(), 60);
    }

    #[test]
    fn test_select_starts_at_first_step() {
        let mut timer = PomodoroTimer::new(short_sequence()).unwrap();
        timer.skip(Utc::now());

        let mut other = short_sequence();
        other.steps[0].duration_minutes = 50;
        timer.select(other).unwrap();
        assert_eq!(timer.snapshot().step_index, 0);
        assert_eq!(timer.remaining_secs(), 50 * 60);
    }

    #[test]
    fn test_invalid_sequences_rejected() {
        let mut empty = short_sequence();
        empty.steps.clear();
        assert!(PomodoroTimer::new(empty).is_err());

        let mut zero = short_sequence();
        zero.steps[1].duration_minutes = 0;
        assert!(PomodoroTimer::new(zero).is_err());
    }
}
