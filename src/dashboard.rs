//! Dashboard: daily tasks, today's focus goal and widget ordering

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pomodoro::PomodoroSession;
use crate::storage::{Result, StorageError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

/// Add a task at the top of the list
pub fn add_task(tasks: &mut Vec<Task>, text: &str) -> Result<Uuid> {
    let text = text.trim();
    if text.is_empty() {
        return Err(StorageError::InvalidOperation("Task text cannot be empty".to_string()));
    }
    let task = Task {
        id: Uuid::new_v4(),
        text: text.to_string(),
        completed: false,
    };
    let id = task.id;
    tasks.insert(0, task);
    Ok(id)
}

pub fn toggle_task(tasks: &mut [Task], id: Uuid) -> Result<bool> {
    let task = tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| StorageError::NotFound(format!("Task {} not found", id)))?;
    task.completed = !task.completed;
    Ok(task.completed)
}

pub fn delete_task(tasks: &mut Vec<Task>, id: Uuid) -> Result<()> {
    let before = tasks.len();
    tasks.retain(|t| t.id != id);
    if tasks.len() == before {
        return Err(StorageError::NotFound(format!("Task {} not found", id)));
    }
    Ok(())
}

/// Today's focus minutes against the goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyGoal {
    pub completed_minutes: u32,
    pub goal_minutes: u32,
    /// 0-100
    pub progress: f64,
}

pub fn daily_goal<Tz: TimeZone>(sessions: &[PomodoroSession], goal_minutes: u32, now: &DateTime<Tz>) -> DailyGoal {
    let today = now.date_naive();
    let tz = now.timezone();
    let completed_minutes = sessions
        .iter()
        .filter(|s| s.completed_at.with_timezone(&tz).date_naive() == today)
        .map(|s| s.duration_minutes)
        .sum();

    let progress = if goal_minutes == 0 {
        0.0
    } else {
        (f64::from(completed_minutes) / f64::from(goal_minutes) * 100.0).min(100.0)
    };

    DailyGoal {
        completed_minutes,
        goal_minutes,
        progress,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Widget {
    Stats,
    Actions,
    Schedule,
    Tasks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Ordered dashboard widgets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetLayout(pub Vec<Widget>);

impl Default for WidgetLayout {
    fn default() -> Self {
        Self(vec![Widget::Stats, Widget::Actions, Widget::Schedule, Widget::Tasks])
    }
}

impl WidgetLayout {
    /// Swap a widget with its neighbour. Moving past either edge does nothing;
    /// returns whether the layout changed.
    pub fn move_widget(&mut self, widget: Widget, direction: MoveDirection) -> bool {
        let Some(index) = self.0.iter().position(|w| *w == widget) else {
            return false;
        };
        let target = match direction {
            MoveDirection::Up if index > 0 => index - 1,
            MoveDirection::Down if index + 1 < self.0.len() => index + 1,
            _ => return false,
        };
        self.0.swap(index, target);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_tasks_are_prepended_and_trimmed() {
        let mut tasks = Vec::new();
        add_task(&mut tasks, "Read chapter 3").unwrap();
        let id = add_task(&mut tasks, "  Flashcards  ").unwrap();
        assert_eq!(tasks[0].id, id);
        assert_eq!(tasks[0].text, "Flashcards");
        assert!(add_task(&mut tasks, "   ").is_err());
        assert_eq!(tasks.len(), 2);
    }

    #[test]
    fn test_toggle_and_delete_task() {
        let mut tasks = Vec::new();
        let id = add_task(&mut tasks, "Review").unwrap();
        assert!(toggle_task(&mut tasks, id).unwrap());
        delete_task(&mut tasks, id).unwrap();
        assert!(matches!(toggle_task(&mut tasks, id), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_daily_goal_counts_today_only_and_caps() {
        let now = Utc::now();
        let sessions = vec![
            PomodoroSession::new("a", 50, now),
            PomodoroSession::new("b", 50, now),
            PomodoroSession::new("old", 500, now - Duration::days(2)),
        ];

        let goal = daily_goal(&sessions, 120, &now);
        assert_eq!(goal.completed_minutes, 100);
        assert!((goal.progress - 100.0 * 100.0 / 120.0).abs() < 1e-9);

        assert_eq!(daily_goal(&sessions, 60, &now).progress, 100.0);
        assert_eq!(daily_goal(&sessions, 0, &now).progress, 0.0);
    }

    #[test]
    fn test_widget_moves() {
        let mut layout = WidgetLayout::default();
        assert!(!layout.move_widget(Widget::Stats, MoveDirection::Up));
        assert!(!layout.move_widget(Widget::Tasks, MoveDirection::Down));

        assert!(layout.move_widget(Widget::Tasks, MoveDirection::Up));
        assert_eq!(
            layout.0,
            vec![Widget::Stats, Widget::Actions, Widget::Tasks, Widget::Schedule]
        );
    }
}
