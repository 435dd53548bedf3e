//! Error type for the fallible training operations.
//!
//! Most of the engine is total: lookups fall back to defaults and
//! humanized labels. Only session execution, pagination and explicit
//! cooldown validation can fail.

use thiserror::Error;

use crate::eligibility::EligibilityState;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrainingError {
    #[error("unknown discipline: {0}")]
    UnknownDiscipline(String),

    #[error("horse {horse_id} cannot train: {state}")]
    NotEligible {
        horse_id: String,
        state: EligibilityState,
    },

    #[error("invalid cooldown timestamp: {0:?}")]
    InvalidCooldown(String),

    #[error("a {days}-day cooldown ends outside the supported date range")]
    CooldownOutOfRange { days: u32 },

    #[error("page size must be at least 1")]
    InvalidPageSize,

    #[error("page {requested} is out of range (1..={page_count})")]
    PageOutOfRange { requested: usize, page_count: usize },
}

pub type Result<T> = std::result::Result<T, TrainingError>;
