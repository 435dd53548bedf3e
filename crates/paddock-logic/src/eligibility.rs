//! Training eligibility — may this horse train right now?
//!
//! Eligibility is derived from a horse's age and cooldown relative to a
//! caller-supplied `now`; it is never stored. Age bounds are checked
//! before the cooldown, so a foal with a stale cooldown still reports
//! [`EligibilityState::TooYoung`].
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use paddock_logic::eligibility::{evaluate, EligibilityState, Horse};
//!
//! let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
//! let mut horse = Horse::new("h1", 6);
//! assert_eq!(evaluate(&horse, now), EligibilityState::Ready);
//!
//! horse.training_cooldown = Some((now + Duration::days(4)).into());
//! assert_eq!(evaluate(&horse, now), EligibilityState::Cooldown);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::TrainingRules;
use crate::timestamp::CooldownValue;

/// Training-relevant projection of a horse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Horse {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Age in whole years.
    pub age: u32,
    #[serde(default)]
    pub training_cooldown: Option<CooldownValue>,
    #[serde(default)]
    pub discipline_scores: BTreeMap<String, i32>,
}

impl Horse {
    pub fn new(id: impl Into<String>, age: u32) -> Self {
        Self {
            id: id.into(),
            name: None,
            age,
            training_cooldown: None,
            discipline_scores: BTreeMap::new(),
        }
    }

    /// Score in a discipline; disciplines never trained score 0.
    pub fn score(&self, discipline_id: &str) -> i32 {
        self.discipline_scores
            .get(discipline_id)
            .copied()
            .unwrap_or(0)
    }

    /// The cooldown as an instant.
    ///
    /// An unparseable cooldown counts as no cooldown; it is logged so bad
    /// save data is visible without blocking the horse.
    pub fn cooldown_until(&self) -> Option<DateTime<Utc>> {
        let value = self.training_cooldown.as_ref()?;
        match value.resolve() {
            Ok(at) => Some(at),
            Err(err) => {
                log::warn!("horse {}: ignoring cooldown ({})", self.id, err);
                None
            }
        }
    }

    /// True while a cooldown lies strictly in the future.
    pub fn is_cooling_down(&self, now: DateTime<Utc>) -> bool {
        self.cooldown_until().is_some_and(|at| at > now)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EligibilityState {
    Ready,
    Cooldown,
    TooYoung,
    TooOld,
}

impl EligibilityState {
    pub fn all() -> &'static [EligibilityState] {
        &[Self::Ready, Self::Cooldown, Self::TooYoung, Self::TooOld]
    }

    pub fn can_train(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::Cooldown => "Cooldown",
            Self::TooYoung => "Too Young",
            Self::TooOld => "Too Old",
        }
    }
}

impl fmt::Display for EligibilityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Evaluate eligibility with the default rules.
pub fn evaluate(horse: &Horse, now: DateTime<Utc>) -> EligibilityState {
    evaluate_with(horse, now, &TrainingRules::default())
}

/// Evaluate eligibility against explicit rules.
pub fn evaluate_with(horse: &Horse, now: DateTime<Utc>, rules: &TrainingRules) -> EligibilityState {
    if horse.age < rules.min_age {
        EligibilityState::TooYoung
    } else if horse.age > rules.max_age {
        EligibilityState::TooOld
    } else if horse.is_cooling_down(now) {
        EligibilityState::Cooldown
    } else {
        EligibilityState::Ready
    }
}

/// Per-state head counts for a collection of horses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCounts {
    pub ready: usize,
    pub cooldown: usize,
    pub too_young: usize,
    pub too_old: usize,
}

impl StateCounts {
    pub fn get(&self, state: EligibilityState) -> usize {
        match state {
            EligibilityState::Ready => self.ready,
            EligibilityState::Cooldown => self.cooldown,
            EligibilityState::TooYoung => self.too_young,
            EligibilityState::TooOld => self.too_old,
        }
    }

    pub fn total(&self) -> usize {
        self.ready + self.cooldown + self.too_young + self.too_old
    }

    fn bump(&mut self, state: EligibilityState) {
        match state {
            EligibilityState::Ready => self.ready += 1,
            EligibilityState::Cooldown => self.cooldown += 1,
            EligibilityState::TooYoung => self.too_young += 1,
            EligibilityState::TooOld => self.too_old += 1,
        }
    }
}

pub fn count_by_state(horses: &[Horse], now: DateTime<Utc>) -> StateCounts {
    count_by_state_with(horses, now, &TrainingRules::default())
}

pub fn count_by_state_with(
    horses: &[Horse],
    now: DateTime<Utc>,
    rules: &TrainingRules,
) -> StateCounts {
    let mut counts = StateCounts::default();
    for horse in horses {
        counts.bump(evaluate_with(horse, now, rules));
    }
    counts
}

pub fn filter_by_state(
    horses: &[Horse],
    state: EligibilityState,
    now: DateTime<Utc>,
) -> Vec<&Horse> {
    filter_by_state_with(horses, state, now, &TrainingRules::default())
}

pub fn filter_by_state_with<'a>(
    horses: &'a [Horse],
    state: EligibilityState,
    now: DateTime<Utc>,
    rules: &TrainingRules,
) -> Vec<&'a Horse> {
    horses
        .iter()
        .filter(|h| evaluate_with(h, now, rules) == state)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn horse_with_cooldown(age: u32, offset: Duration) -> Horse {
        let mut h = Horse::new("h", age);
        h.training_cooldown = Some((now() + offset).into());
        h
    }

    #[test]
    fn age_two_is_too_young() {
        assert_eq!(evaluate(&Horse::new("h", 2), now()), EligibilityState::TooYoung);
        assert_eq!(evaluate(&Horse::new("h", 0), now()), EligibilityState::TooYoung);
    }

    #[test]
    fn age_25_is_too_old() {
        assert_eq!(evaluate(&Horse::new("h", 25), now()), EligibilityState::TooOld);
    }

    #[test]
    fn age_bounds_inclusive() {
        assert_eq!(evaluate(&Horse::new("h", 3), now()), EligibilityState::Ready);
        assert_eq!(evaluate(&Horse::new("h", 20), now()), EligibilityState::Ready);
        assert_eq!(evaluate(&Horse::new("h", 21), now()), EligibilityState::TooOld);
    }

    #[test]
    fn past_cooldown_is_ready() {
        let h = horse_with_cooldown(3, Duration::seconds(-1));
        assert_eq!(evaluate(&h, now()), EligibilityState::Ready);
    }

    #[test]
    fn cooldown_exactly_now_is_ready() {
        let h = horse_with_cooldown(5, Duration::zero());
        assert_eq!(evaluate(&h, now()), EligibilityState::Ready);
    }

    #[test]
    fn future_cooldown_is_cooldown() {
        let h = horse_with_cooldown(6, Duration::days(4));
        assert_eq!(evaluate(&h, now()), EligibilityState::Cooldown);
    }

    #[test]
    fn age_checked_before_cooldown() {
        let young = horse_with_cooldown(1, Duration::days(4));
        let old = horse_with_cooldown(22, Duration::days(4));
        assert_eq!(evaluate(&young, now()), EligibilityState::TooYoung);
        assert_eq!(evaluate(&old, now()), EligibilityState::TooOld);
    }

    #[test]
    fn iso_string_cooldown_matches_instant() {
        let mut h = Horse::new("h", 6);
        h.training_cooldown = Some("2026-10-23T12:00:00Z".into());
        assert_eq!(evaluate(&h, now()), EligibilityState::Cooldown);
        h.training_cooldown = Some("2026-10-19T11:59:59Z".into());
        assert_eq!(evaluate(&h, now()), EligibilityState::Ready);
    }

    #[test]
    fn malformed_cooldown_counts_as_none() {
        let mut h = Horse::new("h", 6);
        h.training_cooldown = Some("soon".into());
        assert_eq!(h.cooldown_until(), None);
        assert_eq!(evaluate(&h, now()), EligibilityState::Ready);
    }

    #[test]
    fn custom_rules_move_bounds() {
        let rules = TrainingRules {
            min_age: 4,
            max_age: 15,
            ..TrainingRules::default()
        };
        assert_eq!(evaluate_with(&Horse::new("h", 3), now(), &rules), EligibilityState::TooYoung);
        assert_eq!(evaluate_with(&Horse::new("h", 16), now(), &rules), EligibilityState::TooOld);
    }

    #[test]
    fn missing_score_defaults_to_zero() {
        let mut h = Horse::new("h", 5);
        h.discipline_scores.insert("dressage".into(), 42);
        assert_eq!(h.score("dressage"), 42);
        assert_eq!(h.score("polo"), 0);
    }

    #[test]
    fn counts_agree_with_filters() {
        let horses = vec![
            Horse::new("a", 2),
            Horse::new("b", 5),
            horse_with_cooldown(7, Duration::hours(3)),
            Horse::new("d", 30),
            Horse::new("e", 10),
        ];
        let counts = count_by_state(&horses, now());
        assert_eq!(counts.total(), horses.len());
        for &state in EligibilityState::all() {
            assert_eq!(counts.get(state), filter_by_state(&horses, state, now()).len());
        }
        assert_eq!(counts.ready, 2);
        assert_eq!(counts.cooldown, 1);
    }

    #[test]
    fn horse_json_uses_api_field_names() {
        let json = r#"{
            "id": "h9",
            "age": 4,
            "trainingCooldown": "2026-10-20T00:00:00Z",
            "disciplineScores": {"racing": 12}
        }"#;
        let h: Horse = serde_json::from_str(json).unwrap();
        assert_eq!(h.score("racing"), 12);
        assert_eq!(evaluate(&h, now()), EligibilityState::Cooldown);
    }

    #[test]
    fn horse_json_with_null_cooldown() {
        let h: Horse =
            serde_json::from_str(r#"{"id": "h1", "age": 4, "trainingCooldown": null}"#).unwrap();
        assert!(h.training_cooldown.is_none());
        assert_eq!(evaluate(&h, now()), EligibilityState::Ready);
    }
}
