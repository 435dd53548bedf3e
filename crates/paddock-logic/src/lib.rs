//! Pure training logic for Paddock.
//!
//! This crate holds the rules behind horse training that are independent
//! of any screen, database or network layer. Functions take plain data
//! plus an explicit `now` and return results, so every rule is
//! unit-testable and gives the same answer for the same inputs.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Training rules: age window, cooldown, base gain, page size, caps |
//! | [`cooldown`] | Countdown text for a cooldown (minutes / hours / days / date) |
//! | [`disciplines`] | Catalog of the 23 disciplines in 4 categories |
//! | [`eligibility`] | Ready / Cooldown / TooYoung / TooOld classification |
//! | [`error`] | Error type for the fallible operations |
//! | [`history`] | Sorting, paging and summaries of training history |
//! | [`labels`] | Display labels with humanized fallback for unknown ids |
//! | [`modifiers`] | Trait modifiers: grouping, scoping and net effect |
//! | [`progression`] | Score arithmetic for one session |
//! | [`session`] | Eligibility verdicts and the training step |
//! | [`timestamp`] | Date-or-ISO-string cooldown values |

pub mod config;
pub mod cooldown;
pub mod disciplines;
pub mod eligibility;
pub mod error;
pub mod history;
pub mod labels;
pub mod modifiers;
pub mod progression;
pub mod session;
pub mod timestamp;

pub use error::{Result, TrainingError};
