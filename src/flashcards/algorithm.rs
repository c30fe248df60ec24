//! Simplified SM-2 spaced repetition
//!
//! Three ratings drive the schedule:
//! - again: interval resets to 1 day, ease factor kept
//! - good:  interval × ease factor, ease adjusted with quality 4
//! - easy:  interval × (ease factor + 0.15), ease adjusted with quality 5
//!
//! The ease adjustment is the SM-2 formula
//! `EF' = EF + (0.1 - (5-q) * (0.08 + (5-q) * 0.02))`, applied exactly as
//! written: it is 0.0 for q = 4 and +0.1 for q = 5.

use chrono::{DateTime, Days, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::models::{Flashcard, Rating, MIN_EASE_FACTOR};

/// Extra multiplier applied to the ease factor on an "easy" rating
const EASY_BONUS: f64 = 0.15;

/// Result of calculating the next review
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResult {
    pub interval: u32,
    pub ease_factor: f64,
    pub next_review: DateTime<Utc>,
}

impl ReviewResult {
    /// Store the computed schedule on a card
    pub fn apply_to(&self, card: &mut Flashcard) {
        card.interval = self.interval;
        card.ease_factor = self.ease_factor;
        card.next_review = self.next_review;
    }
}

/// SM-2 ease factor delta for a quality score (0-5)
pub fn ease_delta(quality: u8) -> f64 {
    let miss = f64::from(5 - quality.min(5));
    0.1 - miss * (0.08 + miss * 0.02)
}

/// Calculate the next interval, ease factor and due date for a rating.
///
/// `now` carries the caller's time zone so that the due date lands on the
/// same wall-clock time `interval` calendar days later.
pub fn calculate_next_review<Tz: TimeZone>(
    interval: u32,
    ease_factor: f64,
    rating: Rating,
    now: &DateTime<Tz>,
) -> ReviewResult {
    let (interval, adjusted) = match rating {
        Rating::Again => (1, ease_factor),
        Rating::Good => (scale_interval(interval, ease_factor), ease_factor),
        Rating::Easy => (scale_interval(interval, ease_factor + EASY_BONUS), ease_factor),
    };

    let ease_factor = match rating.quality() {
        Some(q) => adjusted + ease_delta(q),
        None => adjusted,
    }
    .max(MIN_EASE_FACTOR);

    ReviewResult {
        interval,
        ease_factor,
        next_review: add_calendar_days(now, interval),
    }
}

/// Convenience wrapper taking the card's current schedule
pub fn review_card<Tz: TimeZone>(card: &Flashcard, rating: Rating, now: &DateTime<Tz>) -> ReviewResult {
    calculate_next_review(card.interval, card.ease_factor, rating, now)
}

/// Intervals each rating would produce, for display next to the buttons
pub fn preview_intervals<Tz: TimeZone>(card: &Flashcard, now: &DateTime<Tz>) -> [(Rating, u32); 3] {
    Rating::ALL.map(|rating| (rating, review_card(card, rating, now).interval))
}

fn scale_interval(interval: u32, factor: f64) -> u32 {
    let scaled = (f64::from(interval) * factor).round();
    // `as` saturates on overflow
    (scaled as u32).max(1)
}

fn add_calendar_days<Tz: TimeZone>(now: &DateTime<Tz>, days: u32) -> DateTime<Utc> {
    now.clone()
        .checked_add_days(Days::new(u64::from(days)))
        .map(|due| due.with_timezone(&Utc))
        .or_else(|| {
            // Wall-clock time does not exist on the target day (DST gap)
            now.with_timezone(&Utc)
                .checked_add_signed(TimeDelta::days(i64::from(days)))
        })
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Format an interval in days to a short human-readable string
pub fn format_interval(days: u32) -> String {
    match days {
        0 => "now".to_string(),
        1..=6 => format!("{}d", days),
        7..=29 => format!("{}w", days / 7),
        30..=364 => format!("{}mo", days / 30),
        _ => format!("{}y", days / 365),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 14, 30, 0).unwrap()
    }

    fn card(interval: u32, ease_factor: f64) -> Flashcard {
        let mut card = Flashcard::new("front".into(), "back".into(), now());
        card.interval = interval;
        card.ease_factor = ease_factor;
        card
    }

    #[test]
    fn test_again_always_resets_interval() {
        for (interval, ease) in [(1, 2.5), (30, 1.3), (250, 3.1), (7, 1.9)] {
            let result = review_card(&card(interval, ease), Rating::Again, &now());
            assert_eq!(result.interval, 1);
            assert_eq!(result.ease_factor, ease);
        }
    }

    #[test]
    fn test_good_multiplies_by_ease() {
        let result = review_card(&card(1, 2.5), Rating::Good, &now());
        assert_eq!(result.interval, 3);
        assert!((result.ease_factor - (2.5 + ease_delta(4))).abs() < 1e-9);
        assert!(ease_delta(4).abs() < 1e-9);
    }

    #[test]
    fn test_easy_adds_bonus_to_multiplier() {
        let result = review_card(&card(3, 2.5), Rating::Easy, &now());
        // round(3 * 2.65) = 8
        assert_eq!(result.interval, 8);
        assert!((result.ease_factor - (2.5 + ease_delta(5))).abs() < 1e-9);
        assert!((ease_delta(5) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_ease_factor_floor() {
        for rating in Rating::ALL {
            for ease in [0.5, 1.0, 1.3, 1.31, 2.5] {
                let result = review_card(&card(4, ease), rating, &now());
                assert!(result.ease_factor >= MIN_EASE_FACTOR, "{} with {}", rating, ease);
            }
        }
    }

    #[test]
    fn test_low_ease_interval_never_drops_to_zero() {
        let result = review_card(&card(1, MIN_EASE_FACTOR), Rating::Good, &now());
        assert_eq!(result.interval, 1);
    }

    #[test]
    fn test_next_review_preserves_time_of_day() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let local_now = offset.with_ymd_and_hms(2026, 3, 30, 23, 15, 0).unwrap();

        let result = review_card(&card(1, 2.5), Rating::Good, &local_now);
        let due = result.next_review.with_timezone(&offset);

        assert_eq!(due.date_naive(), local_now.date_naive() + Days::new(3));
        assert_eq!(due.hour(), 23);
        assert_eq!(due.minute(), 15);
    }

    #[test]
    fn test_next_review_crosses_month_end() {
        let result = review_card(&card(20, 2.5), Rating::Good, &now());
        assert_eq!(result.interval, 50);
        assert_eq!(result.next_review, Utc.with_ymd_and_hms(2026, 4, 29, 14, 30, 0).unwrap());
    }

    #[test]
    fn test_preview_intervals() {
        let preview = preview_intervals(&card(4, 2.5), &now());
        assert_eq!(preview, [(Rating::Again, 1), (Rating::Good, 10), (Rating::Easy, 11)]);
    }

    #[test]
    fn test_apply_to_card() {
        let mut c = card(3, 2.5);
        review_card(&c, Rating::Easy, &now()).apply_to(&mut c);
        assert_eq!(c.interval, 8);
        assert!(c.next_review > now());
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(0), "now");
        assert_eq!(format_interval(1), "1d");
        assert_eq!(format_interval(5), "5d");
        assert_eq!(format_interval(7), "1w");
        assert_eq!(format_interval(14), "2w");
        assert_eq!(format_interval(30), "1mo");
        assert_eq!(format_interval(90), "3mo");
        assert_eq!(format_interval(365), "1y");
        assert_eq!(format_interval(730), "2y");
    }
}
