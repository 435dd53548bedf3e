//! Trait modifiers — how a horse's traits bend the gain of a session.
//!
//! Each modifier carries a signed `effect`. Its category (positive,
//! negative, neutral) is derived from the sign, never stored, so the two
//! cannot disagree. A modifier applies to a discipline when its affected
//! set names the discipline or is the `"all"` sentinel.
//!
//! # Net effect
//!
//! `total = base + positive_sum - negative_sum`, where `negative_sum` is
//! kept as a magnitude for breakdown text (`"10 + 3 - 2"`). Neutral
//! modifiers contribute to neither sum.
//!
//! ```
//! use paddock_logic::modifiers::{net_effect, TraitModifier};
//!
//! let mods = [
//!     TraitModifier::new("bold", "Bold", 2).for_all(),
//!     TraitModifier::new("nervous", "Nervous", -1).for_all(),
//! ];
//! let net = net_effect(5, &mods);
//! assert_eq!(net.total, 6);
//! assert_eq!((net.positive_sum, net.negative_sum), (2, 1));
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Sentinel in `affectedDisciplines` meaning every discipline.
pub const ALL_DISCIPLINES: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierCategory {
    Positive,
    Negative,
    Neutral,
}

impl ModifierCategory {
    pub fn of(effect: i32) -> Self {
        match effect {
            e if e > 0 => Self::Positive,
            e if e < 0 => Self::Negative,
            _ => Self::Neutral,
        }
    }
}

/// Which disciplines a modifier touches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawAffected", into = "RawAffected")]
pub enum AffectedDisciplines {
    All,
    Only(BTreeSet<String>),
}

impl AffectedDisciplines {
    pub fn contains(&self, discipline_id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(ids) => ids.contains(discipline_id),
        }
    }
}

impl Default for AffectedDisciplines {
    fn default() -> Self {
        Self::Only(BTreeSet::new())
    }
}

/// Wire shape: either the `"all"` string or a list of ids (which may itself
/// contain `"all"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawAffected {
    Sentinel(String),
    List(Vec<String>),
}

impl From<RawAffected> for AffectedDisciplines {
    fn from(raw: RawAffected) -> Self {
        let ids = match raw {
            RawAffected::Sentinel(id) => vec![id],
            RawAffected::List(ids) => ids,
        };
        if ids.iter().any(|id| id == ALL_DISCIPLINES) {
            Self::All
        } else {
            Self::Only(ids.into_iter().collect())
        }
    }
}

impl From<AffectedDisciplines> for RawAffected {
    fn from(affected: AffectedDisciplines) -> Self {
        match affected {
            AffectedDisciplines::All => RawAffected::Sentinel(ALL_DISCIPLINES.to_string()),
            AffectedDisciplines::Only(ids) => RawAffected::List(ids.into_iter().collect()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitModifier {
    pub trait_id: String,
    pub trait_name: String,
    pub effect: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub affected_disciplines: AffectedDisciplines,
}

impl TraitModifier {
    /// A modifier that affects no discipline until scoped with
    /// [`for_all`](Self::for_all) or [`for_disciplines`](Self::for_disciplines).
    pub fn new(trait_id: impl Into<String>, trait_name: impl Into<String>, effect: i32) -> Self {
        Self {
            trait_id: trait_id.into(),
            trait_name: trait_name.into(),
            effect,
            description: String::new(),
            affected_disciplines: AffectedDisciplines::default(),
        }
    }

    pub fn for_all(mut self) -> Self {
        self.affected_disciplines = AffectedDisciplines::All;
        self
    }

    pub fn for_disciplines<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.affected_disciplines =
            AffectedDisciplines::Only(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn category(&self) -> ModifierCategory {
        ModifierCategory::of(self.effect)
    }

    pub fn applies_to(&self, discipline_id: &str) -> bool {
        self.affected_disciplines.contains(discipline_id)
    }
}

/// Modifiers that apply to `discipline_id`, in input order.
pub fn applicable_modifiers<'a>(
    discipline_id: &str,
    modifiers: &'a [TraitModifier],
) -> Vec<&'a TraitModifier> {
    modifiers
        .iter()
        .filter(|m| m.applies_to(discipline_id))
        .collect()
}

/// Modifiers split by category. Every group is present, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupedModifiers<'a> {
    pub positive: Vec<&'a TraitModifier>,
    pub negative: Vec<&'a TraitModifier>,
    pub neutral: Vec<&'a TraitModifier>,
}

impl<'a> GroupedModifiers<'a> {
    pub fn get(&self, category: ModifierCategory) -> &[&'a TraitModifier] {
        match category {
            ModifierCategory::Positive => &self.positive,
            ModifierCategory::Negative => &self.negative,
            ModifierCategory::Neutral => &self.neutral,
        }
    }

    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len() + self.neutral.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn group_by_category<'a, I>(modifiers: I) -> GroupedModifiers<'a>
where
    I: IntoIterator<Item = &'a TraitModifier>,
{
    let mut groups = GroupedModifiers::default();
    for m in modifiers {
        match m.category() {
            ModifierCategory::Positive => groups.positive.push(m),
            ModifierCategory::Negative => groups.negative.push(m),
            ModifierCategory::Neutral => groups.neutral.push(m),
        }
    }
    groups
}

/// Base gain adjusted by a set of modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetEffect {
    pub base_gain: i32,
    pub total: i32,
    pub positive_sum: i32,
    /// Magnitude of the negative effects (always ≥ 0).
    pub negative_sum: i32,
}

impl NetEffect {
    pub fn base_only(base_gain: i32) -> Self {
        Self {
            base_gain,
            total: base_gain,
            positive_sum: 0,
            negative_sum: 0,
        }
    }

    /// Net modifier contribution (`positive_sum - negative_sum`).
    pub fn trait_bonus(&self) -> i32 {
        self.positive_sum.saturating_sub(self.negative_sum)
    }

    /// Arithmetic breakdown such as `"10 + 3 - 2"`; zero sums are omitted.
    pub fn breakdown(&self) -> String {
        let mut out = self.base_gain.to_string();
        if self.positive_sum > 0 {
            out.push_str(&format!(" + {}", self.positive_sum));
        }
        if self.negative_sum > 0 {
            out.push_str(&format!(" - {}", self.negative_sum));
        }
        out
    }
}

/// Sum the modifier effects on top of `base_gain`.
///
/// Sums saturate at the `i32` bounds instead of wrapping.
pub fn net_effect<'a, I>(base_gain: i32, modifiers: I) -> NetEffect
where
    I: IntoIterator<Item = &'a TraitModifier>,
{
    let mut positive_sum: i32 = 0;
    let mut negative_sum: i32 = 0;
    for m in modifiers {
        match m.category() {
            ModifierCategory::Positive => positive_sum = positive_sum.saturating_add(m.effect),
            ModifierCategory::Negative => {
                negative_sum = negative_sum.saturating_add(m.effect.saturating_abs())
            }
            ModifierCategory::Neutral => {}
        }
    }
    NetEffect {
        base_gain,
        total: base_gain
            .saturating_add(positive_sum)
            .saturating_sub(negative_sum),
        positive_sum,
        negative_sum,
    }
}

/// What a trait panel should show for one discipline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TraitAnalysis<'a> {
    /// No modifier applies; show the minimal display.
    NoModifiers { base_gain: i32 },
    Modifiers {
        groups: GroupedModifiers<'a>,
        net: NetEffect,
    },
}

impl TraitAnalysis<'_> {
    pub fn net(&self) -> NetEffect {
        match self {
            Self::NoModifiers { base_gain } => NetEffect::base_only(*base_gain),
            Self::Modifiers { net, .. } => *net,
        }
    }

    pub fn has_modifiers(&self) -> bool {
        matches!(self, Self::Modifiers { .. })
    }

    /// Modifiers exist but cancel out (or are all zero).
    pub fn is_neutral(&self) -> bool {
        match self {
            Self::NoModifiers { .. } => false,
            Self::Modifiers { net, .. } => net.trait_bonus() == 0,
        }
    }
}

pub fn analyze<'a, I>(base_gain: i32, modifiers: I) -> TraitAnalysis<'a>
where
    I: IntoIterator<Item = &'a TraitModifier>,
{
    let groups = group_by_category(modifiers);
    if groups.is_empty() {
        return TraitAnalysis::NoModifiers { base_gain };
    }
    let net = net_effect(
        base_gain,
        groups
            .positive
            .iter()
            .chain(&groups.negative)
            .chain(&groups.neutral)
            .copied(),
    );
    TraitAnalysis::Modifiers { groups, net }
}

/// [`analyze`] restricted to the modifiers that apply to `discipline_id`.
pub fn analyze_for_discipline<'a>(
    base_gain: i32,
    discipline_id: &str,
    modifiers: &'a [TraitModifier],
) -> TraitAnalysis<'a> {
    analyze(base_gain, applicable_modifiers(discipline_id, modifiers))
}
