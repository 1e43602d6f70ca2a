//! Pure priority-tier and Eisenhower-quadrant classification.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};

use crate::validate::DATE_FORMAT;

/// Scores at or above this are high priority.
pub const HIGH_SCORE: f64 = 7.0;
/// Scores at or above this (and below [`HIGH_SCORE`]) are medium priority.
pub const MEDIUM_SCORE: f64 = 4.0;
/// Tasks due within this many days are urgent.
pub const URGENT_WITHIN_DAYS: i64 = 2;
/// Importance at or above this is important.
pub const IMPORTANT_FROM: f64 = 6.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Priority tier derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityTier {
    /// `score >= 7`.
    High,
    /// `4 <= score < 7`.
    Medium,
    /// Everything else.
    Low,
}

impl PriorityTier {
    /// Human label, e.g. `"High"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} priority", self.label())
    }
}

/// Maps a score onto its priority tier.
#[must_use]
pub fn tier_for_score(score: f64) -> PriorityTier {
    if score >= HIGH_SCORE {
        PriorityTier::High
    } else if score >= MEDIUM_SCORE {
        PriorityTier::Medium
    } else {
        PriorityTier::Low
    }
}

/// Formats a score rounded to two decimals, or `-` when it is not finite.
#[must_use]
pub fn format_score(score: f64) -> String {
    // Halves round toward positive infinity, so -0.125 becomes -0.12.
    let rounded = (score * 100.0 + 0.5).floor() / 100.0;
    // Normalises -0.0 to 0.0.
    let rounded = rounded + 0.0;
    if rounded.is_finite() {
        // Shortest representation: 8.5 stays "8.5", 8.456 becomes "8.46".
        format!("{rounded}")
    } else {
        "-".to_string()
    }
}

/// One of the four Eisenhower quadrants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    /// Urgent and important.
    DoNow,
    /// Important, not urgent.
    Schedule,
    /// Urgent, not important.
    Delegate,
    /// Neither urgent nor important.
    Eliminate,
}

impl Quadrant {
    /// All quadrants in display order.
    pub const ALL: [Self; 4] = [Self::DoNow, Self::Schedule, Self::Delegate, Self::Eliminate];

    /// Quadrant heading.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::DoNow => "Do now",
            Self::Schedule => "Schedule",
            Self::Delegate => "Delegate",
            Self::Eliminate => "Eliminate",
        }
    }

    /// Position in [`Quadrant::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::DoNow => 0,
            Self::Schedule => 1,
            Self::Delegate => 2,
            Self::Eliminate => 3,
        }
    }
}

/// Whole days from `now` until midnight UTC of `due_date`, rounded to the
/// nearest day. `None` when the date does not parse.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn days_until(due_date: &str, now: DateTime<Utc>) -> Option<i64> {
    let due = NaiveDate::parse_from_str(due_date.trim(), DATE_FORMAT).ok()?;
    let due = due.and_hms_opt(0, 0, 0)?.and_utc();
    let millis = (due - now).num_milliseconds() as f64;
    Some((millis / MILLIS_PER_DAY).round() as i64)
}

/// Classifies a task by urgency and importance.
///
/// Tasks whose due date cannot be read are never urgent.
#[must_use]
pub fn classify_quadrant(days_left: Option<i64>, importance: f64) -> Quadrant {
    let urgent = days_left.is_some_and(|d| d <= URGENT_WITHIN_DAYS);
    let important = importance >= IMPORTANT_FROM;
    match (urgent, important) {
        (true, true) => Quadrant::DoNow,
        (false, true) => Quadrant::Schedule,
        (true, false) => Quadrant::Delegate,
        (false, false) => Quadrant::Eliminate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 9, 30, 0).unwrap()
    }

    fn due_in(days: i64) -> String {
        (now() + Duration::days(days)).format(DATE_FORMAT).to_string()
    }

    #[test]
    fn tier_thresholds() {
        assert_eq!(tier_for_score(6.999), PriorityTier::Medium);
        assert_eq!(tier_for_score(7.0), PriorityTier::High);
        assert_eq!(tier_for_score(3.999), PriorityTier::Low);
        assert_eq!(tier_for_score(4.0), PriorityTier::Medium);
        assert_eq!(tier_for_score(-2.0), PriorityTier::Low);
    }

    #[test]
    fn tier_display_reads_as_label() {
        assert_eq!(PriorityTier::High.to_string(), "High priority");
    }

    #[test]
    fn score_formatting() {
        assert_eq!(format_score(8.456), "8.46");
        assert_eq!(format_score(8.5), "8.5");
        assert_eq!(format_score(3.0), "3");
        assert_eq!(format_score(f64::NAN), "-");
        assert_eq!(format_score(f64::INFINITY), "-");
    }

    #[test]
    fn format_score_rounds_negative_halves_up_without_negative_zero() {
        assert_eq!(format_score(-0.001), "0");
        assert_eq!(format_score(-0.004), "0");
        assert_eq!(format_score(-0.0), "0");
        assert_eq!(format_score(-0.125), "-0.12");
        assert_eq!(format_score(-1.5), "-1.5");
        assert_eq!(format_score(0.125), "0.13");
    }

    #[test]
    fn days_until_rounds_to_nearest_day() {
        assert_eq!(days_until(&due_in(1), now()), Some(1));
        assert_eq!(days_until(&due_in(10), now()), Some(10));
        assert_eq!(days_until(&due_in(0), now()), Some(0));
        assert_eq!(days_until(&due_in(-3), now()), Some(-3));
        assert_eq!(days_until("someday", now()), None);
    }

    #[test]
    fn eisenhower_quadrants() {
        let q = |days, importance| classify_quadrant(days_until(&due_in(days), now()), importance);
        assert_eq!(q(1, 8.0), Quadrant::DoNow);
        assert_eq!(q(10, 7.0), Quadrant::Schedule);
        assert_eq!(q(1, 3.0), Quadrant::Delegate);
        assert_eq!(q(10, 2.0), Quadrant::Eliminate);
    }

    #[test]
    fn overdue_counts_as_urgent_and_unparseable_does_not() {
        assert_eq!(classify_quadrant(Some(-5), 9.0), Quadrant::DoNow);
        assert_eq!(classify_quadrant(None, 9.0), Quadrant::Schedule);
        assert_eq!(classify_quadrant(None, f64::NAN), Quadrant::Eliminate);
    }
}
