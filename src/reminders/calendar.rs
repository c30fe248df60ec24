//! Calendar views over reminders
//!
//! All grouping happens by local calendar date in the caller's time zone.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::models::Reminder;

/// One month laid out in Sunday-first weeks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    /// Each week has seven slots; slots outside the month are `None`
    pub weeks: Vec<Vec<Option<CalendarDay>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub reminders: Vec<Reminder>,
}

impl CalendarMonth {
    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.weeks.iter().flatten().flatten()
    }
}

/// Build the month grid, or `None` for an invalid year/month
pub fn month_view<Tz: TimeZone>(reminders: &[Reminder], year: i32, month: u32, tz: &Tz) -> Option<CalendarMonth> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let days_in_month = days_in_month(first)?;

    let leading = first.weekday().num_days_from_sunday() as usize;
    let mut slots: Vec<Option<CalendarDay>> = (0..leading).map(|_| None).collect();

    for date in first.iter_days().take(days_in_month as usize) {
        let mut on_day: Vec<Reminder> = reminders
            .iter()
            .filter(|r| local_date(&r.date, tz) == date)
            .cloned()
            .collect();
        on_day.sort_by_key(|r| r.date);
        slots.push(Some(CalendarDay { date, reminders: on_day }));
    }

    while slots.len() % 7 != 0 {
        slots.push(None);
    }

    let weeks = slots.chunks(7).map(|week| week.to_vec()).collect();
    Some(CalendarMonth { year, month, weeks })
}

/// Uncompleted focus-session reminders on today's local date, by time
pub fn todays_focus_sessions<Tz: TimeZone>(reminders: &[Reminder], now: &DateTime<Tz>) -> Vec<Reminder> {
    let today = now.date_naive();
    let tz = now.timezone();
    let mut sessions: Vec<Reminder> = reminders
        .iter()
        .filter(|r| !r.completed && r.kind.is_focus_session())
        .filter(|r| local_date(&r.date, &tz) == today)
        .cloned()
        .collect();
    sessions.sort_by_key(|r| r.date);
    sessions
}

/// Uncompleted reminders from `now` on, soonest first
pub fn upcoming(reminders: &[Reminder], now: DateTime<Utc>, limit: usize) -> Vec<Reminder> {
    let mut pending: Vec<Reminder> = reminders
        .iter()
        .filter(|r| !r.completed && r.date >= now)
        .cloned()
        .collect();
    pending.sort_by_key(|r| r.date);
    pending.truncate(limit);
    pending
}

fn local_date<Tz: TimeZone>(date: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    date.with_timezone(tz).date_naive()
}

fn days_in_month(first: NaiveDate) -> Option<u32> {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)?
    };
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminders::models::{ReminderInput, ReminderKind};
    use chrono::{Duration, FixedOffset};

    fn reminder(title: &str, date: DateTime<Utc>, kind: ReminderKind) -> Reminder {
        Reminder::from_input(ReminderInput {
            title: title.to_string(),
            date,
            kind,
            tags: Vec::new(),
        })
    }

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_month_grid_is_sunday_first() {
        // 1 May 2026 is a Friday
        let month = month_view(&[], 2026, 5, &Utc).unwrap();
        let first_week = &month.weeks[0];
        assert_eq!(first_week.len(), 7);
        assert!(first_week[..5].iter().all(Option::is_none));
        assert_eq!(first_week[5].as_ref().unwrap().date, NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());
        assert_eq!(month.days().count(), 31);
        assert!(month.weeks.iter().all(|w| w.len() == 7));
    }

    #[test]
    fn test_december_and_leap_february() {
        assert_eq!(month_view(&[], 2026, 12, &Utc).unwrap().days().count(), 31);
        assert_eq!(month_view(&[], 2028, 2, &Utc).unwrap().days().count(), 29);
        assert!(month_view(&[], 2026, 13, &Utc).is_none());
    }

    #[test]
    fn test_reminders_grouped_by_local_date() {
        let tz = FixedOffset::east_opt(3 * 3600).unwrap();
        // 22:30 UTC on the 3rd is 01:30 on the 4th at UTC+3
        let late = reminder("late", Utc.with_ymd_and_hms(2026, 5, 3, 22, 30, 0).unwrap(), ReminderKind::Reminder);
        let month = month_view(&[late], 2026, 5, &tz).unwrap();

        let fourth = month
            .days()
            .find(|d| d.date == NaiveDate::from_ymd_opt(2026, 5, 4).unwrap())
            .unwrap();
        assert_eq!(fourth.reminders.len(), 1);
    }

    #[test]
    fn test_todays_focus_sessions() {
        let now = utc(2026, 5, 4, 8);
        let focus = ReminderKind::Pomodoro { duration_minutes: 25 };
        let mut done = reminder("done", utc(2026, 5, 4, 9), focus);
        done.completed = true;

        let reminders = vec![
            reminder("afternoon", utc(2026, 5, 4, 15), focus),
            reminder("morning", utc(2026, 5, 4, 10), focus),
            reminder("plain", utc(2026, 5, 4, 11), ReminderKind::Reminder),
            reminder("tomorrow", utc(2026, 5, 5, 10), focus),
            done,
        ];

        let titles: Vec<String> = todays_focus_sessions(&reminders, &now)
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["morning", "afternoon"]);
    }

    #[test]
    fn test_upcoming_skips_past_and_completed() {
        let now = utc(2026, 5, 4, 12);
        let mut completed = reminder("completed", now + Duration::hours(1), ReminderKind::Reminder);
        completed.completed = true;
        let reminders = vec![
            reminder("past", now - Duration::hours(1), ReminderKind::Reminder),
            reminder("later", now + Duration::days(2), ReminderKind::Reminder),
            reminder("soon", now + Duration::hours(2), ReminderKind::Reminder),
            completed,
        ];

        let titles: Vec<String> = upcoming(&reminders, now, 5).into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["soon", "later"]);
        assert_eq!(upcoming(&reminders, now, 1).len(), 1);
    }
}
