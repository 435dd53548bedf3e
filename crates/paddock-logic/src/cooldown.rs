//! Cooldown countdown text.
//!
//! The formatter is a pure function of two instants; the UI re-invokes it
//! on its own tick to animate a countdown.
//!
//! | Remaining | Display |
//! |-----------|---------|
//! | ≤ 0 | `Ready to train` |
//! | < 1 hour | `30m remaining` |
//! | < 1 day | `2h remaining`, `2h 15m remaining` |
//! | < 7 days | `1 day`, `4 days` |
//! | ≥ 7 days | calendar date, `Oct 26, 2026` |

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::eligibility::Horse;

/// Remaining time at or above which the absolute date is shown.
pub const DATE_FORM_THRESHOLD_DAYS: i64 = 7;

/// A countdown, classified by which display form applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CooldownDisplay {
    Ready,
    Minutes(i64),
    Hours { hours: i64, minutes: i64 },
    Days(i64),
    Date(NaiveDate),
}

impl fmt::Display for CooldownDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => write!(f, "Ready to train"),
            Self::Minutes(m) => write!(f, "{m}m remaining"),
            Self::Hours { hours, minutes: 0 } => write!(f, "{hours}h remaining"),
            Self::Hours { hours, minutes } => write!(f, "{hours}h {minutes}m remaining"),
            Self::Days(1) => write!(f, "1 day"),
            Self::Days(n) => write!(f, "{n} days"),
            Self::Date(date) => write!(f, "{}", date.format("%b %-d, %Y")),
        }
    }
}

impl CooldownDisplay {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

fn remaining(cooldown: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (cooldown - now).max(Duration::zero())
}

/// Classify the time left until `cooldown`.
pub fn format_remaining(cooldown: DateTime<Utc>, now: DateTime<Utc>) -> CooldownDisplay {
    let left = remaining(cooldown, now);
    if left <= Duration::zero() {
        CooldownDisplay::Ready
    } else if left < Duration::hours(1) {
        // Sub-minute remainders still show "1m" rather than "0m".
        CooldownDisplay::Minutes(left.num_minutes().max(1))
    } else if left < Duration::days(1) {
        CooldownDisplay::Hours {
            hours: left.num_hours(),
            minutes: left.num_minutes() % 60,
        }
    } else if left < Duration::days(DATE_FORM_THRESHOLD_DAYS) {
        CooldownDisplay::Days(left.num_days())
    } else {
        CooldownDisplay::Date(cooldown.date_naive())
    }
}

/// Whole days left (floor); 0 once the cooldown has passed.
pub fn days_remaining(cooldown: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    remaining(cooldown, now).num_days()
}

/// Countdown for a horse, or `None` when it has no usable cooldown.
pub fn format_horse_cooldown(horse: &Horse, now: DateTime<Utc>) -> Option<CooldownDisplay> {
    horse
        .cooldown_until()
        .map(|at| format_remaining(at, now))
}
