//! Display labels for identifiers — catalog names first, humanized ids otherwise.
//!
//! Discipline ids, trait ids and other snake_case keys reach the UI from
//! save data that may be newer (or older) than the catalog. Instead of
//! failing, an unknown key is shown in humanized form:
//! `trainability_boost` → `Trainability Boost`.
//!
//! All fallback naming goes through [`label_for`], so the rule lives here
//! and nowhere else.

use std::borrow::Cow;

/// A source of known display names keyed by id.
pub trait LabelSource {
    fn known_label(&self, key: &str) -> Option<&'static str>;
}

/// Fixed `(id, name)` table, for small registries such as trait names.
#[derive(Debug, Clone, Copy)]
pub struct StaticLabels(pub &'static [(&'static str, &'static str)]);

impl LabelSource for StaticLabels {
    fn known_label(&self, key: &str) -> Option<&'static str> {
        self.0
            .iter()
            .find(|(id, _)| *id == key)
            .map(|(_, name)| *name)
    }
}

/// Resolve a display label: the source's name if known, otherwise [`humanize`].
pub fn label_for<'a, S: LabelSource + ?Sized>(source: &S, key: &'a str) -> Cow<'a, str> {
    match source.known_label(key) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(humanize(key)),
    }
}

/// Turn an identifier into a title-cased label.
///
/// Underscores and hyphens become word breaks, runs of separators collapse,
/// and each word gets an upper-case first letter with the rest lower-cased.
pub fn humanize(key: &str) -> String {
    key.split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRAITS: StaticLabels = StaticLabels(&[("bold", "Bold"), ("quick_learner", "Quick Learner")]);

    #[test]
    fn humanize_snake_case() {
        assert_eq!(humanize("trainability_boost"), "Trainability Boost");
        assert_eq!(humanize("unknown_trait"), "Unknown Trait");
    }

    #[test]
    fn humanize_collapses_separators_and_case() {
        assert_eq!(humanize("__SHOW--jumping_"), "Show Jumping");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn known_label_wins() {
        assert_eq!(label_for(&TRAITS, "quick_learner"), "Quick Learner");
        assert!(matches!(label_for(&TRAITS, "bold"), Cow::Borrowed(_)));
    }

    #[test]
    fn unknown_label_falls_back() {
        assert_eq!(label_for(&TRAITS, "iron_hooves"), "Iron Hooves");
    }
}
