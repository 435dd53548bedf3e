//! Training history — sorting, paging and summaries over past sessions.
//!
//! History entries are immutable records. Views over them (sort order,
//! current page, gain styling) are derived on demand from the entries and
//! the caller's view parameters.
//!
//! # Sorting
//!
//! Sortable columns are date, discipline (by display name) and score gain.
//! Clicking the active column flips its direction; clicking a new column
//! starts ascending. Sorting is stable, so equal keys keep their recorded
//! order.
//!
//! # Paging
//!
//! Pages are 1-based and never wrap: the first page has no previous page,
//! the last has no next, and asking for a page past the end is an error.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::disciplines;
use crate::error::{Result, TrainingError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingHistoryEntry {
    pub id: String,
    pub date: DateTime<Utc>,
    pub discipline: String,
    pub previous_score: i32,
    pub new_score: i32,
    pub score_gain: i32,
    /// Names of the traits that applied; `None` when the session recorded none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traits: Option<Vec<String>>,
}

impl TrainingHistoryEntry {
    /// Build an entry; `score_gain` is derived from the two scores.
    pub fn new(
        id: impl Into<String>,
        date: DateTime<Utc>,
        discipline: impl Into<String>,
        previous_score: i32,
        new_score: i32,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            discipline: discipline.into(),
            previous_score,
            new_score,
            score_gain: new_score.saturating_sub(previous_score),
            traits: None,
        }
    }

    pub fn with_traits(mut self, traits: Vec<String>) -> Self {
        self.traits = Some(traits);
        self
    }

    pub fn discipline_name(&self) -> String {
        disciplines::display_name(&self.discipline).into_owned()
    }

    /// Trait names to list, empty when none were recorded.
    pub fn trait_names(&self) -> &[String] {
        self.traits.as_deref().unwrap_or_default()
    }

    pub fn gain_style(&self) -> GainStyle {
        GainStyle::of(self.score_gain)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Date,
    Discipline,
    ScoreGain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Active sort column and direction of a history table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Date ascending, so the first click on Date shows newest first.
impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SortField::Date,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortState {
    /// State after a header click on `field`.
    pub fn toggle(self, field: SortField) -> Self {
        if field == self.field {
            Self {
                field,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                field,
                direction: SortDirection::Ascending,
            }
        }
    }

    pub fn apply(&self, history: &[TrainingHistoryEntry]) -> Vec<TrainingHistoryEntry> {
        sort(history, self.field, self.direction)
    }
}

fn compare(a: &TrainingHistoryEntry, b: &TrainingHistoryEntry, field: SortField) -> Ordering {
    match field {
        SortField::Date => a.date.cmp(&b.date),
        SortField::Discipline => disciplines::display_name(&a.discipline)
            .cmp(&disciplines::display_name(&b.discipline)),
        SortField::ScoreGain => a.score_gain.cmp(&b.score_gain),
    }
}

/// Sorted copy of `history`. Ties keep their input order in both directions.
pub fn sort(
    history: &[TrainingHistoryEntry],
    field: SortField,
    direction: SortDirection,
) -> Vec<TrainingHistoryEntry> {
    let mut sorted = history.to_vec();
    sorted.sort_by(|a, b| {
        let ord = compare(a, b, field);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    sorted
}

pub fn filter_by_discipline<'a>(
    history: &'a [TrainingHistoryEntry],
    discipline_id: &str,
) -> Vec<&'a TrainingHistoryEntry> {
    history
        .iter()
        .filter(|e| e.discipline == discipline_id)
        .collect()
}

/// One page of rows plus the navigation state around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a, T> {
    pub rows: &'a [T],
    /// 1-based.
    pub page_number: usize,
    pub page_count: usize,
    pub total: usize,
}

impl<T> Page<'_, T> {
    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.page_count
    }

    pub fn previous_page(&self) -> Option<usize> {
        self.has_previous().then(|| self.page_number - 1)
    }

    pub fn next_page(&self) -> Option<usize> {
        self.has_next().then(|| self.page_number + 1)
    }
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    }
}

/// Slice page `page_number` (1-based) out of `items`.
///
/// An empty list has zero pages but page 1 is still valid and empty, so a
/// fresh table renders without special-casing.
pub fn paginate<T>(items: &[T], page_size: usize, page_number: usize) -> Result<Page<'_, T>> {
    if page_size == 0 {
        return Err(TrainingError::InvalidPageSize);
    }
    let count = page_count(items.len(), page_size);
    if page_number == 0 || page_number > count.max(1) {
        return Err(TrainingError::PageOutOfRange {
            requested: page_number,
            page_count: count,
        });
    }
    let start = (page_number - 1) * page_size;
    let end = (start + page_size).min(items.len());
    Ok(Page {
        rows: &items[start.min(items.len())..end],
        page_number,
        page_count: count,
        total: items.len(),
    })
}

/// Display treatment of a score gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GainStyle {
    Positive,
    Negative,
    Neutral,
}

impl GainStyle {
    pub fn of(score_gain: i32) -> Self {
        match score_gain.cmp(&0) {
            Ordering::Greater => Self::Positive,
            Ordering::Less => Self::Negative,
            Ordering::Equal => Self::Neutral,
        }
    }
}

/// `+5`, `-3`, or `0`.
pub fn format_gain(score_gain: i32) -> String {
    match GainStyle::of(score_gain) {
        GainStyle::Positive => format!("+{score_gain}"),
        GainStyle::Negative | GainStyle::Neutral => score_gain.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisciplineSummary {
    pub discipline: String,
    pub name: String,
    pub sessions: usize,
    pub total_gain: i32,
    pub best_gain: i32,
    pub average_gain: f64,
    /// `new_score` of the most recent session.
    pub latest_score: i32,
    pub last_trained: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub total_sessions: usize,
    pub total_gain: i32,
    pub last_trained: Option<DateTime<Utc>>,
    /// Ordered by discipline display name.
    pub disciplines: Vec<DisciplineSummary>,
}

impl HistorySummary {
    pub fn discipline(&self, discipline_id: &str) -> Option<&DisciplineSummary> {
        self.disciplines
            .iter()
            .find(|d| d.discipline == discipline_id)
    }
}

fn total_gain<'a>(entries: impl IntoIterator<Item = &'a TrainingHistoryEntry>) -> i32 {
    entries
        .into_iter()
        .fold(0i32, |acc, e| acc.saturating_add(e.score_gain))
}

/// Aggregate a horse's history per discipline.
pub fn summarize(history: &[TrainingHistoryEntry]) -> HistorySummary {
    let mut by_discipline: BTreeMap<&str, Vec<&TrainingHistoryEntry>> = BTreeMap::new();
    for entry in history {
        by_discipline
            .entry(entry.discipline.as_str())
            .or_default()
            .push(entry);
    }

    let mut disciplines: Vec<DisciplineSummary> = by_discipline
        .into_iter()
        .filter_map(|(id, entries)| {
            // Latest by date; on equal dates the later-recorded entry wins.
            let latest = entries
                .iter()
                .copied()
                .reduce(|acc, e| if e.date >= acc.date { e } else { acc })?;
            let total_gain = total_gain(entries.iter().copied());
            Some(DisciplineSummary {
                discipline: id.to_string(),
                name: disciplines::display_name(id).into_owned(),
                sessions: entries.len(),
                total_gain,
                best_gain: entries.iter().map(|e| e.score_gain).max().unwrap_or(0),
                average_gain: f64::from(total_gain) / entries.len() as f64,
                latest_score: latest.new_score,
                last_trained: latest.date,
            })
        })
        .collect();
    disciplines.sort_by(|a, b| a.name.cmp(&b.name));

    HistorySummary {
        total_sessions: history.len(),
        total_gain: total_gain(history),
        last_trained: history.iter().map(|e| e.date).max(),
        disciplines,
    }
}
