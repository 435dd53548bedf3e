//! Discipline catalog — the 23 training disciplines and their categories.
//!
//! The catalog is `'static` data: four categories (Western 7, English 6,
//! Specialized 7, Racing 3), each discipline with a stable snake_case id
//! and a display name. Save data refers to disciplines by id; lookups for
//! ids the catalog does not know fall back to a humanized label.
//!
//! ```
//! use paddock_logic::disciplines::{category_of, display_name, DisciplineCategory};
//!
//! assert_eq!(display_name("show_jumping"), "Show Jumping");
//! assert_eq!(category_of("reining"), Some(DisciplineCategory::Western));
//! assert_eq!(display_name("ice_dancing"), "Ice Dancing");
//! ```

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::labels::{self, LabelSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DisciplineCategory {
    Western,
    English,
    Specialized,
    Racing,
}

impl DisciplineCategory {
    pub fn all() -> &'static [DisciplineCategory] {
        &[Self::Western, Self::English, Self::Specialized, Self::Racing]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Western => "Western",
            Self::English => "English",
            Self::Specialized => "Specialized",
            Self::Racing => "Racing",
        }
    }
}

impl fmt::Display for DisciplineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static description of one discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisciplineInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub category: DisciplineCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Discipline {
    // Western
    WesternPleasure = 0,
    Reining = 1,
    Cutting = 2,
    BarrelRacing = 3,
    Roping = 4,
    TeamPenning = 5,
    Rodeo = 6,
    // English
    Hunter = 7,
    Saddleseat = 8,
    Endurance = 9,
    Eventing = 10,
    Dressage = 11,
    ShowJumping = 12,
    // Specialized
    Vaulting = 13,
    Polo = 14,
    CrossCountry = 15,
    CombinedDriving = 16,
    FineHarness = 17,
    Gaited = 18,
    Gymkhana = 19,
    // Racing
    Steeplechase = 20,
    Racing = 21,
    HarnessRacing = 22,
}

impl Discipline {
    pub fn info(&self) -> DisciplineInfo {
        use DisciplineCategory::*;
        let (id, name, category) = match self {
            Self::WesternPleasure => ("western_pleasure", "Western Pleasure", Western),
            Self::Reining => ("reining", "Reining", Western),
            Self::Cutting => ("cutting", "Cutting", Western),
            Self::BarrelRacing => ("barrel_racing", "Barrel Racing", Western),
            Self::Roping => ("roping", "Roping", Western),
            Self::TeamPenning => ("team_penning", "Team Penning", Western),
            Self::Rodeo => ("rodeo", "Rodeo", Western),
            Self::Hunter => ("hunter", "Hunter", English),
            Self::Saddleseat => ("saddleseat", "Saddleseat", English),
            Self::Endurance => ("endurance", "Endurance", English),
            Self::Eventing => ("eventing", "Eventing", English),
            Self::Dressage => ("dressage", "Dressage", English),
            Self::ShowJumping => ("show_jumping", "Show Jumping", English),
            Self::Vaulting => ("vaulting", "Vaulting", Specialized),
            Self::Polo => ("polo", "Polo", Specialized),
            Self::CrossCountry => ("cross_country", "Cross Country", Specialized),
            Self::CombinedDriving => ("combined_driving", "Combined Driving", Specialized),
            Self::FineHarness => ("fine_harness", "Fine Harness", Specialized),
            Self::Gaited => ("gaited", "Gaited", Specialized),
            Self::Gymkhana => ("gymkhana", "Gymkhana", Specialized),
            Self::Steeplechase => ("steeplechase", "Steeplechase", DisciplineCategory::Racing),
            Self::Racing => ("racing", "Racing", DisciplineCategory::Racing),
            Self::HarnessRacing => ("harness_racing", "Harness Racing", DisciplineCategory::Racing),
        };
        DisciplineInfo { id, name, category }
    }

    /// All disciplines in catalog order (grouped by category).
    pub fn all() -> &'static [Discipline] {
        &[
            Self::WesternPleasure,
            Self::Reining,
            Self::Cutting,
            Self::BarrelRacing,
            Self::Roping,
            Self::TeamPenning,
            Self::Rodeo,
            Self::Hunter,
            Self::Saddleseat,
            Self::Endurance,
            Self::Eventing,
            Self::Dressage,
            Self::ShowJumping,
            Self::Vaulting,
            Self::Polo,
            Self::CrossCountry,
            Self::CombinedDriving,
            Self::FineHarness,
            Self::Gaited,
            Self::Gymkhana,
            Self::Steeplechase,
            Self::Racing,
            Self::HarnessRacing,
        ]
    }

    pub fn from_id(id: &str) -> Option<Discipline> {
        Self::all().iter().copied().find(|d| d.id() == id)
    }

    pub fn id(&self) -> &'static str {
        self.info().id
    }

    pub fn name(&self) -> &'static str {
        self.info().name
    }

    pub fn category(&self) -> DisciplineCategory {
        self.info().category
    }
}

/// Catalog order, grouped by category.
pub fn list_disciplines() -> Vec<DisciplineInfo> {
    Discipline::all().iter().map(Discipline::info).collect()
}

/// All disciplines sorted by display name, for selector lists.
pub fn list_alphabetical() -> Vec<DisciplineInfo> {
    let mut list = list_disciplines();
    list.sort_by_key(|d| d.name);
    list
}

/// Disciplines grouped under their category, categories in catalog order.
pub fn grouped_by_category() -> Vec<(DisciplineCategory, Vec<DisciplineInfo>)> {
    DisciplineCategory::all()
        .iter()
        .map(|&cat| {
            let members = list_disciplines()
                .into_iter()
                .filter(|d| d.category == cat)
                .collect();
            (cat, members)
        })
        .collect()
}

pub fn count_in(category: DisciplineCategory) -> usize {
    Discipline::all()
        .iter()
        .filter(|d| d.category() == category)
        .count()
}

pub fn find(id: &str) -> Option<DisciplineInfo> {
    Discipline::from_id(id).map(|d| d.info())
}

pub fn category_of(id: &str) -> Option<DisciplineCategory> {
    Discipline::from_id(id).map(|d| d.category())
}

/// Catalog name for `id`, or its humanized form when the id is unknown.
pub fn display_name(id: &str) -> Cow<'_, str> {
    labels::label_for(&Catalog, id)
}

/// The catalog as a [`LabelSource`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Catalog;

impl LabelSource for Catalog {
    fn known_label(&self, key: &str) -> Option<&'static str> {
        Discipline::from_id(key).map(|d| d.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_23_disciplines() {
        assert_eq!(Discipline::all().len(), 23);
        assert_eq!(list_disciplines().len(), 23);
    }

    #[test]
    fn category_partition() {
        assert_eq!(count_in(DisciplineCategory::Western), 7);
        assert_eq!(count_in(DisciplineCategory::English), 6);
        assert_eq!(count_in(DisciplineCategory::Specialized), 7);
        assert_eq!(count_in(DisciplineCategory::Racing), 3);
    }

    #[test]
    fn ids_and_names_unique() {
        let ids: HashSet<_> = Discipline::all().iter().map(|d| d.id()).collect();
        let names: HashSet<_> = Discipline::all().iter().map(|d| d.name()).collect();
        assert_eq!(ids.len(), 23);
        assert_eq!(names.len(), 23);
    }

    #[test]
    fn repr_matches_catalog_order() {
        for (i, d) in Discipline::all().iter().enumerate() {
            assert_eq!(*d as usize, i);
        }
    }

    #[test]
    fn ids_round_trip() {
        for d in Discipline::all() {
            assert_eq!(Discipline::from_id(d.id()), Some(*d));
        }
        assert_eq!(Discipline::from_id("jousting"), None);
    }

    #[test]
    fn alphabetical_order() {
        let names: Vec<_> = list_alphabetical().iter().map(|d| d.name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.first(), Some(&"Barrel Racing"));
        assert_eq!(names.last(), Some(&"Western Pleasure"));
    }

    #[test]
    fn grouped_order_follows_categories() {
        let groups = grouped_by_category();
        let cats: Vec<_> = groups.iter().map(|(c, _)| *c).collect();
        assert_eq!(cats, DisciplineCategory::all());
        let sizes: Vec<_> = groups.iter().map(|(_, g)| g.len()).collect();
        assert_eq!(sizes, vec![7, 6, 7, 3]);
    }

    #[test]
    fn lookups() {
        assert_eq!(category_of("dressage"), Some(DisciplineCategory::English));
        assert_eq!(category_of("harness_racing"), Some(DisciplineCategory::Racing));
        assert_eq!(category_of("nope"), None);
        assert_eq!(find("polo").map(|d| d.name), Some("Polo"));
    }

    #[test]
    fn unknown_ids_are_humanized() {
        assert_eq!(display_name("western_pleasure"), "Western Pleasure");
        assert_eq!(display_name("mounted_archery"), "Mounted Archery");
    }
}
