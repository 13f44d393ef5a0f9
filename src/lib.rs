//! # Team Quest Library
//!
//! This library provides the core logic of a team-building quiz: players
//! pick their team, answer ten arithmetic questions whose operators have
//! swapped meanings, and unlock a riddle and a task once every answer is
//! right. It holds the static catalog of teams, the per-player session
//! state machine, and the view snapshot a front-end renders.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::wildcard_imports)]
#![allow(clippy::module_name_repetitions)]

pub mod answer;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod rules;
pub mod session;
pub mod view;

pub use catalog::Catalog;
pub use session::{Phase, SessionController, Verdict};
pub use view::View;
