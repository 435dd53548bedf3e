//! Training sessions — the eligibility check and the training step itself.
//!
//! These helpers package the eligibility and progression rules into the
//! shapes the game's training flow exchanges: a verdict before the player
//! commits, and `{ new_score, score_gain, next_eligible_date }` after.
//! Nothing here reads a clock; `now` always comes from the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::TrainingRules;
use crate::disciplines::Discipline;
use crate::eligibility::{evaluate_with, EligibilityState, Horse};
use crate::error::{Result, TrainingError};
use crate::history::TrainingHistoryEntry;
use crate::modifiers::{applicable_modifiers, TraitModifier};
use crate::progression::{self, ScoreProgression};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityVerdict {
    pub horse_id: String,
    pub discipline: String,
    /// `None` when the discipline is unknown.
    pub state: Option<EligibilityState>,
    pub eligible: bool,
    pub reason: String,
    /// Set while the horse is cooling down.
    pub next_eligible_date: Option<DateTime<Utc>>,
}

/// Check whether `horse` may train `discipline_id` at `now`.
pub fn check_eligibility(
    horse: &Horse,
    discipline_id: &str,
    now: DateTime<Utc>,
    rules: &TrainingRules,
) -> EligibilityVerdict {
    let mut verdict = EligibilityVerdict {
        horse_id: horse.id.clone(),
        discipline: discipline_id.to_string(),
        state: None,
        eligible: false,
        reason: String::new(),
        next_eligible_date: None,
    };

    if Discipline::from_id(discipline_id).is_none() {
        verdict.reason = format!("Unknown discipline: {discipline_id}");
        return verdict;
    }

    let state = evaluate_with(horse, now, rules);
    verdict.state = Some(state);
    verdict.eligible = state.can_train();
    verdict.reason = match state {
        EligibilityState::Ready => "Horse is ready to train".to_string(),
        EligibilityState::Cooldown => "Horse is still on training cooldown".to_string(),
        EligibilityState::TooYoung => {
            format!("Horse must be at least {} years old to train", rules.min_age)
        }
        EligibilityState::TooOld => {
            format!("Horses older than {} years cannot train", rules.max_age)
        }
    };
    if state == EligibilityState::Cooldown {
        verdict.next_eligible_date = horse.cooldown_until();
    }
    verdict
}

/// A request to train one horse in one discipline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingRequest {
    pub discipline: String,
    /// Overrides [`TrainingRules::base_gain`] when set.
    #[serde(default)]
    pub base_gain: Option<i32>,
    /// Id for the recorded history entry; derived from horse, discipline and time when absent.
    #[serde(default)]
    pub entry_id: Option<String>,
}

impl TrainingRequest {
    pub fn new(discipline: impl Into<String>) -> Self {
        Self {
            discipline: discipline.into(),
            base_gain: None,
            entry_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingOutcome {
    pub new_score: i32,
    pub score_gain: i32,
    pub next_eligible_date: DateTime<Utc>,
    pub progression: ScoreProgression,
    pub entry: TrainingHistoryEntry,
    /// The horse after the session: raw score written back, cooldown restarted.
    pub horse: Horse,
}

/// Run one training session.
///
/// Fails for unknown disciplines and for horses that are not `Ready`.
/// Scores are stored raw (uncapped) so the history arithmetic stays exact.
pub fn train(
    horse: &Horse,
    request: &TrainingRequest,
    modifiers: &[TraitModifier],
    now: DateTime<Utc>,
    rules: &TrainingRules,
) -> Result<TrainingOutcome> {
    let discipline = Discipline::from_id(&request.discipline)
        .ok_or_else(|| TrainingError::UnknownDiscipline(request.discipline.clone()))?;

    let state = evaluate_with(horse, now, rules);
    if !state.can_train() {
        log::debug!("horse {} rejected for {}: {}", horse.id, discipline.id(), state);
        return Err(TrainingError::NotEligible {
            horse_id: horse.id.clone(),
            state,
        });
    }

    let applied = applicable_modifiers(discipline.id(), modifiers);
    let trait_names: Vec<String> = applied.iter().map(|m| m.trait_name.clone()).collect();
    let previous = horse.score(discipline.id());
    let base_gain = request.base_gain.unwrap_or(rules.base_gain);
    let progression = progression::apply(previous, base_gain, applied);

    let next_eligible_date = now
        .checked_add_signed(rules.cooldown_period())
        .ok_or(TrainingError::CooldownOutOfRange {
            days: rules.cooldown_days,
        })?;
    let entry_id = request
        .entry_id
        .clone()
        .unwrap_or_else(|| format!("{}-{}-{}", horse.id, discipline.id(), now.timestamp()));
    let mut entry =
        TrainingHistoryEntry::new(entry_id, now, discipline.id(), previous, progression.new_score);
    if !trait_names.is_empty() {
        entry = entry.with_traits(trait_names);
    }

    let mut updated = horse.clone();
    updated
        .discipline_scores
        .insert(discipline.id().to_string(), progression.new_score);
    updated.training_cooldown = Some(next_eligible_date.into());

    log::debug!(
        "horse {} trained {}: {} -> {} {}",
        horse.id,
        discipline.id(),
        previous,
        progression.new_score,
        progression.summary()
    );

    Ok(TrainingOutcome {
        new_score: progression.new_score,
        score_gain: progression.score_gain,
        next_eligible_date,
        progression,
        entry,
        horse: updated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn ready_horse() -> Horse {
        let mut h = Horse::new("h1", 6);
        h.discipline_scores.insert("dressage".into(), 40);
        h
    }

    #[test]
    fn verdict_for_ready_horse() {
        let v = check_eligibility(&ready_horse(), "dressage", now(), &TrainingRules::default());
        assert!(v.eligible);
        assert_eq!(v.state, Some(EligibilityState::Ready));
        assert_eq!(v.next_eligible_date, None);
    }

    #[test]
    fn verdict_for_cooling_horse_has_date() {
        let mut h = ready_horse();
        let until = now() + Duration::days(2);
        h.training_cooldown = Some(until.into());
        let v = check_eligibility(&h, "dressage", now(), &TrainingRules::default());
        assert!(!v.eligible);
        assert_eq!(v.state, Some(EligibilityState::Cooldown));
        assert_eq!(v.next_eligible_date, Some(until));
    }

    #[test]
    fn verdict_for_unknown_discipline() {
        let v = check_eligibility(&ready_horse(), "jousting", now(), &TrainingRules::default());
        assert!(!v.eligible);
        assert_eq!(v.state, None);
        assert!(v.reason.contains("jousting"));
    }

    #[test]
    fn verdict_reason_names_age_bound() {
        let v = check_eligibility(&Horse::new("foal", 1), "racing", now(), &TrainingRules::default());
        assert_eq!(v.state, Some(EligibilityState::TooYoung));
        assert!(v.reason.contains('3'));
    }

    #[test]
    fn train_rejects_cooldown_past_date_range() {
        let rules = TrainingRules {
            cooldown_days: 200_000_000,
            ..TrainingRules::default()
        };
        let err = train(&ready_horse(), &TrainingRequest::new("dressage"), &[], now(), &rules)
            .unwrap_err();
        assert_eq!(err, TrainingError::CooldownOutOfRange { days: 200_000_000 });
    }

    #[test]
    fn train_updates_score_and_cooldown() {
        let rules = TrainingRules::default();
        let mods = [
            TraitModifier::new("bold", "Bold", 2).for_all(),
            TraitModifier::new("nervous", "Nervous", -1).for_disciplines(["dressage"]),
            TraitModifier::new("fast", "Fast", 4).for_disciplines(["racing"]),
        ];
        let out = train(&ready_horse(), &TrainingRequest::new("dressage"), &mods, now(), &rules)
            .unwrap();
        assert_eq!(out.score_gain, 6);
        assert_eq!(out.new_score, 46);
        assert_eq!(out.next_eligible_date, now() + Duration::days(7));
        assert_eq!(out.horse.score("dressage"), 46);
        assert_eq!(evaluate_with(&out.horse, now(), &rules), EligibilityState::Cooldown);
        assert_eq!(out.entry.score_gain, 6);
        assert_eq!(out.entry.previous_score, 40);
        assert_eq!(out.entry.trait_names(), ["Bold".to_string(), "Nervous".to_string()]);
        assert_eq!(out.entry.id, format!("h1-dressage-{}", now().timestamp()));
    }

    #[test]
    fn train_without_traits_records_none() {
        let out = train(
            &ready_horse(),
            &TrainingRequest::new("polo"),
            &[],
            now(),
            &TrainingRules::default(),
        )
        .unwrap();
        assert_eq!(out.new_score, 5);
        assert_eq!(out.entry.traits, None);
    }

    #[test]
    fn train_rejects_cooling_horse() {
        let mut h = ready_horse();
        h.training_cooldown = Some((now() + Duration::hours(1)).into());
        let err = train(&h, &TrainingRequest::new("dressage"), &[], now(), &TrainingRules::default())
            .unwrap_err();
        assert_eq!(
            err,
            TrainingError::NotEligible {
                horse_id: "h1".into(),
                state: EligibilityState::Cooldown
            }
        );
    }

    #[test]
    fn train_rejects_unknown_discipline() {
        let err = train(
            &ready_horse(),
            &TrainingRequest::new("jousting"),
            &[],
            now(),
            &TrainingRules::default(),
        )
        .unwrap_err();
        assert_eq!(err, TrainingError::UnknownDiscipline("jousting".into()));
    }

    #[test]
    fn request_overrides_base_gain_and_id() {
        let request = TrainingRequest {
            discipline: "dressage".into(),
            base_gain: Some(8),
            entry_id: Some("session-42".into()),
        };
        let out = train(&ready_horse(), &request, &[], now(), &TrainingRules::default()).unwrap();
        assert_eq!(out.score_gain, 8);
        assert_eq!(out.entry.id, "session-42");
    }

    #[test]
    fn scores_above_cap_are_stored_raw() {
        let mut h = ready_horse();
        h.discipline_scores.insert("dressage".into(), 99);
        let out = train(&h, &TrainingRequest::new("dressage"), &[], now(), &TrainingRules::default())
            .unwrap();
        assert_eq!(out.horse.score("dressage"), 104);
        assert_eq!(out.progression.display_score(100), 100);
    }
}
