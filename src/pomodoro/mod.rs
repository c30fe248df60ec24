//! Pomodoro sequences, the timer state machine and its background runner

pub mod models;
pub mod runner;
pub mod timer;

pub use models::*;
pub use runner::{PomodoroRunner, RunnerCommand};
pub use timer::{validate_sequence, PomodoroTimer, StepCompletion, TimerSnapshot};
