//! Score progression — previous score + base gain + trait bonus.
//!
//! The calculator does arithmetic only. `new_score` is the raw, uncapped
//! value; clamping to the display cap is left to [`ScoreProgression::display_score`]
//! so history keeps `score_gain == new_score - previous_score` exactly.
//! Arithmetic saturates at the `i32` bounds rather than wrapping.

use serde::{Deserialize, Serialize};

use crate::modifiers::{applicable_modifiers, net_effect, NetEffect, TraitModifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreProgression {
    pub previous_score: i32,
    pub base_score_gain: i32,
    /// Net sum of the applied modifier effects.
    pub trait_bonus: i32,
    pub score_gain: i32,
    /// Raw result, not clamped.
    pub new_score: i32,
    pub net: NetEffect,
}

impl ScoreProgression {
    /// `new_score` clamped to `[0, cap]`.
    pub fn display_score(&self, cap: i32) -> i32 {
        self.new_score.clamp(0, cap.max(0))
    }

    /// Breakdown for the result toast, e.g. `(+5 base, +2 trait bonus, -1 trait penalty)`.
    ///
    /// Bonus and penalty are listed separately (not netted); zero parts are omitted,
    /// so a session without penalties reads `(+5 base, +2 trait bonus)`.
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("{:+} base", self.base_score_gain)];
        if self.net.positive_sum > 0 {
            parts.push(format!("+{} trait bonus", self.net.positive_sum));
        }
        if self.net.negative_sum > 0 {
            parts.push(format!("-{} trait penalty", self.net.negative_sum));
        }
        format!("({})", parts.join(", "))
    }
}

/// Apply a session's gain to `previous_score`.
pub fn apply<'a, I>(previous_score: i32, base_gain: i32, modifiers: I) -> ScoreProgression
where
    I: IntoIterator<Item = &'a TraitModifier>,
{
    let net = net_effect(base_gain, modifiers);
    ScoreProgression {
        previous_score,
        base_score_gain: base_gain,
        trait_bonus: net.trait_bonus(),
        score_gain: net.total,
        new_score: previous_score.saturating_add(net.total),
        net,
    }
}

/// [`apply`] using only the modifiers that affect `discipline_id`.
pub fn apply_for_discipline(
    previous_score: i32,
    base_gain: i32,
    discipline_id: &str,
    modifiers: &[TraitModifier],
) -> ScoreProgression {
    apply(
        previous_score,
        base_gain,
        applicable_modifiers(discipline_id, modifiers),
    )
}
