//! Pomodoro Runner
//!
//! Owns the single [`PomodoroTimer`] in a background tokio task, ticks it
//! once per second and records completed focus steps in the store.
//! Callers talk to it through [`PomodoroRunner::send`].

use std::time::Duration;

use chrono::Utc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

use super::timer::{PomodoroTimer, StepCompletion, TimerSnapshot};
use crate::storage::{Result, StorageError};
use crate::store::{lock_store, Action, ActionOutput, SharedStore};

/// Commands accepted by the runner
#[derive(Debug, Clone, PartialEq)]
pub enum RunnerCommand {
    Start,
    Pause,
    Reset,
    Skip,
    /// Switch to a stored sequence
    Select(Uuid),
    SetTask(String),
    Status,
}

enum RunnerMessage {
    Command(RunnerCommand, oneshot::Sender<Result<TimerSnapshot>>),
    Shutdown,
}

/// Handle to the background timer task
#[derive(Clone)]
pub struct PomodoroRunner {
    sender: mpsc::Sender<RunnerMessage>,
}

impl PomodoroRunner {
    /// Start the runner on the first stored sequence. Must be called inside
    /// a tokio runtime.
    pub fn spawn(store: SharedStore) -> Result<Self> {
        let sequence = {
            let guard = lock_store(&store)?;
            guard
                .data()
                .pomodoro_sequences
                .first()
                .cloned()
                .ok_or_else(|| StorageError::NotFound("No pomodoro sequence available".to_string()))?
        };
        let timer = PomodoroTimer::new(sequence)?;

        let (tx, rx) = mpsc::channel(32);
        tokio::spawn(async move {
            runner_loop(timer, store, rx).await;
        });

        Ok(Self { sender: tx })
    }

    /// Send a command and wait for the resulting timer state
    pub async fn send(&self, command: RunnerCommand) -> Result<TimerSnapshot> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(RunnerMessage::Command(command, reply))
            .await
            .map_err(|_| stopped())?;
        response.await.map_err(|_| stopped())?
    }

    pub async fn status(&self) -> Result<TimerSnapshot> {
        self.send(RunnerCommand::Status).await
    }

    pub fn shutdown(&self) {
        let _ = self.sender.try_send(RunnerMessage::Shutdown);
    }
}

fn stopped() -> StorageError {
    StorageError::InvalidOperation("Pomodoro runner has stopped".to_string())
}

async fn runner_loop(mut timer: PomodoroTimer, store: SharedStore, mut receiver: mpsc::Receiver<RunnerMessage>) {
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(completion) = timer.tick(Utc::now()) {
                    record_completion(&store, completion);
                }
            }

            msg = receiver.recv() => {
                match msg {
                    Some(RunnerMessage::Command(command, reply)) => {
                        let result = handle_command(&mut timer, &store, command);
                        let _ = reply.send(result);
                    }
                    Some(RunnerMessage::Shutdown) | None => {
                        log::info!("Pomodoro runner: shutting down");
                        break;
                    }
                }
            }
        }
    }
}

fn handle_command(timer: &mut PomodoroTimer, store: &SharedStore, command: RunnerCommand) -> Result<TimerSnapshot> {
    match command {
        RunnerCommand::Start => timer.start(),
        RunnerCommand::Pause => timer.pause(),
        RunnerCommand::Reset => timer.reset(),
        RunnerCommand::Skip => {
            let completion = timer.skip(Utc::now());
            record_completion(store, completion);
        }
        RunnerCommand::Select(id) => {
            let sequence = lock_store(store)?.data().sequence(id)?.clone();
            log::info!("Pomodoro runner: switching to '{}'", sequence.name);
            timer.select(sequence)?;
        }
        RunnerCommand::SetTask(task) => timer.set_task(task),
        RunnerCommand::Status => {}
    }
    Ok(timer.snapshot())
}

fn record_completion(store: &SharedStore, completion: StepCompletion) {
    log::info!(
        "{} finished, next up: {} ({} min)",
        completion.finished.kind.label(),
        completion.next.kind.label(),
        completion.next.duration_minutes
    );

    let Some(session) = completion.session else {
        return;
    };
    let task = session.task.clone();
    let result = lock_store(store).and_then(|mut guard| guard.dispatch(Action::RecordFocusSession(session)));
    match result {
        Ok(ActionOutput::Progress {
            xp_awarded,
            levels_gained,
            unlocked,
        }) => {
            log::info!(
                "Recorded focus session '{}': +{} XP, {} level(s), {} achievement(s)",
                task,
                xp_awarded,
                levels_gained,
                unlocked.len()
            );
        }
        Ok(_) => {}
        Err(e) => log::error!("Failed to record focus session '{}': {}", task, e),
    }
}
