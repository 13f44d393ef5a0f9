//! Teams, their questions and their rewards
//!
//! A team is pure authoring data: who they are, how their buttons look,
//! the questions they must answer and what they unlock once every answer
//! is right. Nothing here changes while a quest is running.

use std::borrow::Borrow;

use garde::Validate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::constants::{question, team::*};

use super::color::Color;

/// Identifier of a team, unique within a catalog
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct TeamId(u32);

/// Identifier of a question, unique within its team
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Validate,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
#[garde(transparent)]
pub struct QuestionId(
    #[garde(length(chars, min = question::MIN_ID_LENGTH, max = question::MAX_ID_LENGTH))] String,
);

impl From<&str> for QuestionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for QuestionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for QuestionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A single arithmetic prompt with its pre-computed answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Question {
    /// Stable key used to bind the answer field
    #[garde(dive)]
    pub id: QuestionId,
    /// The prompt as shown to players, e.g. `8 + 2`
    #[garde(length(chars, min = question::MIN_LABEL_LENGTH, max = question::MAX_LABEL_LENGTH))]
    pub label: String,
    /// The correct result under the remapped operator rules
    #[garde(skip)]
    pub answer: i64,
}

impl Question {
    /// Creates a question
    pub fn new(id: impl Into<QuestionId>, label: impl Into<String>, answer: i64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            answer,
        }
    }
}

/// What a team unlocks by answering every question correctly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Reward {
    /// Congratulation banner
    #[garde(length(chars, max = MAX_REWARD_TEXT_LENGTH))]
    pub success_message: String,
    /// The clue leading to the next location
    #[garde(length(chars, max = MAX_REWARD_TEXT_LENGTH))]
    pub riddle: String,
    /// Title of the task to perform there
    #[garde(length(chars, max = MAX_REWARD_TEXT_LENGTH))]
    pub task_title: String,
    /// Instructions for the task
    #[garde(length(chars, max = MAX_REWARD_TEXT_LENGTH))]
    pub task_description: String,
}

/// A team taking part in the quest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Team {
    /// Unique identifier
    #[garde(skip)]
    pub id: TeamId,
    /// Display name, e.g. `Team 1 – Blue`
    #[garde(length(chars, min = MIN_NAME_LENGTH, max = MAX_NAME_LENGTH))]
    pub name: String,
    /// Background colour of the team's controls
    #[garde(skip)]
    pub color: Color,
    /// Text colour readable on top of `color`
    #[garde(skip)]
    pub contrast_text: Color,
    /// Questions in display order
    #[garde(
        length(min = MIN_QUESTIONS_COUNT, max = MAX_QUESTIONS_COUNT),
        dive,
        custom(unique_question_ids)
    )]
    pub questions: Vec<Question>,
    /// Content revealed after a fully correct submission
    #[garde(dive)]
    pub reward: Reward,
}

impl Team {
    /// Finds one of this team's questions by id
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id.as_ref() == id)
    }

    /// Whether the given id belongs to one of this team's questions
    pub fn has_question(&self, id: &str) -> bool {
        self.question(id).is_some()
    }
}

/// Rejects a question list that reuses an id
#[allow(clippy::ptr_arg)]
fn unique_question_ids(questions: &Vec<Question>, _ctx: &()) -> garde::Result {
    let duplicates = questions.iter().map(|q| &q.id).duplicates().collect_vec();
    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "duplicate question ids: {}",
            duplicates.iter().join(", ")
        )))
    }
}
