//! Training rules — the tunable numbers behind eligibility and progression.
//!
//! Every engine function that depends on a bound (age window, cooldown
//! period, page size, score cap) reads it from [`TrainingRules`]. The
//! defaults match the live game; the harness can override any subset from
//! a TOML file because every field falls back to its default.
//!
//! ```
//! use paddock_logic::config::{validate_rules, TrainingRules};
//!
//! let rules = TrainingRules::default();
//! assert_eq!(rules.min_age, 3);
//! assert!(validate_rules(&rules).is_empty());
//! ```

use std::ops::RangeInclusive;

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Longest cooldown the rules accept.
pub const MAX_COOLDOWN_DAYS: u32 = 365;

/// Score ceilings shown to players.
///
/// A discipline score is capped at `discipline_cap` for display; trait and
/// groom bonuses can push the effective total above it within their ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoreCaps {
    pub discipline_cap: i32,
    pub trait_bonus_min: i32,
    pub trait_bonus_max: i32,
    pub groom_bonus_min: i32,
    pub groom_bonus_max: i32,
}

impl Default for ScoreCaps {
    fn default() -> Self {
        Self {
            discipline_cap: 100,
            trait_bonus_min: 10,
            trait_bonus_max: 20,
            groom_bonus_min: 5,
            groom_bonus_max: 15,
        }
    }
}

impl ScoreCaps {
    pub fn trait_bonus_range(&self) -> RangeInclusive<i32> {
        self.trait_bonus_min..=self.trait_bonus_max
    }

    pub fn groom_bonus_range(&self) -> RangeInclusive<i32> {
        self.groom_bonus_min..=self.groom_bonus_max
    }

    /// Highest total a discipline can show with both bonuses maxed out.
    pub fn max_effective_total(&self) -> i32 {
        self.discipline_cap
            .saturating_add(self.trait_bonus_max)
            .saturating_add(self.groom_bonus_max)
    }
}

/// Rules for who may train, how often, and how results are paged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrainingRules {
    /// Youngest age (years, inclusive) allowed to train.
    pub min_age: u32,
    /// Oldest age (years, inclusive) allowed to train.
    pub max_age: u32,
    /// Days a horse must rest after a session.
    pub cooldown_days: u32,
    /// Score increment a session grants before trait adjustments.
    pub base_gain: i32,
    /// Rows per page in history views.
    pub page_size: usize,
    pub caps: ScoreCaps,
}

impl Default for TrainingRules {
    fn default() -> Self {
        Self {
            min_age: 3,
            max_age: 20,
            cooldown_days: 7,
            base_gain: 5,
            page_size: 10,
            caps: ScoreCaps::default(),
        }
    }
}

impl TrainingRules {
    pub fn cooldown_period(&self) -> Duration {
        Duration::days(i64::from(self.cooldown_days))
    }
}

/// Rules validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// `min_age` is greater than `max_age`.
    AgeWindowInverted { min_age: u32, max_age: u32 },
    /// A zero cooldown would let a horse train every tick.
    ZeroCooldown,
    /// Cooldown longer than [`MAX_COOLDOWN_DAYS`].
    CooldownTooLong(u32),
    /// Base gain must be positive.
    NonPositiveBaseGain(i32),
    /// History pages need at least one row.
    ZeroPageSize,
    /// Discipline cap must be positive.
    NonPositiveCap(i32),
    /// A bonus range has `min > max` or a negative bound.
    InvalidBonusRange { name: &'static str, min: i32, max: i32 },
}

/// Validate training rules, returning all errors found.
pub fn validate_rules(rules: &TrainingRules) -> Vec<RulesError> {
    let mut errors = Vec::new();

    if rules.min_age > rules.max_age {
        errors.push(RulesError::AgeWindowInverted {
            min_age: rules.min_age,
            max_age: rules.max_age,
        });
    }
    if rules.cooldown_days == 0 {
        errors.push(RulesError::ZeroCooldown);
    }
    if rules.cooldown_days > MAX_COOLDOWN_DAYS {
        errors.push(RulesError::CooldownTooLong(rules.cooldown_days));
    }
    if rules.base_gain <= 0 {
        errors.push(RulesError::NonPositiveBaseGain(rules.base_gain));
    }
    if rules.page_size == 0 {
        errors.push(RulesError::ZeroPageSize);
    }
    if rules.caps.discipline_cap <= 0 {
        errors.push(RulesError::NonPositiveCap(rules.caps.discipline_cap));
    }

    let caps = &rules.caps;
    for (name, min, max) in [
        ("trait", caps.trait_bonus_min, caps.trait_bonus_max),
        ("groom", caps.groom_bonus_min, caps.groom_bonus_max),
    ] {
        if min < 0 || min > max {
            errors.push(RulesError::InvalidBonusRange { name, min, max });
        }
    }

    errors
}
