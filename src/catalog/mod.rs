//! Catalog of teams and questions
//!
//! The catalog is the read-only input of every quest session: the teams in
//! authoring order, the shared instructions text and the rule book that
//! explains what each operator symbol means. It is either the built-in event
//! catalog or one loaded from a TOML file.

use std::path::{Path, PathBuf};

use garde::Validate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    constants::catalog::*,
    rules::{self, Expression, RuleBook},
};

pub mod builtin;
pub mod color;
pub mod team;

use team::{QuestionId, Team, TeamId};

/// Errors that can occur while loading or querying a catalog
#[derive(Error, Debug)]
pub enum Error {
    /// No team has the requested identifier
    #[error("no team with id {0}")]
    TeamNotFound(TeamId),
    /// The catalog file could not be read
    #[error("failed to read catalog file {}", path.display())]
    Io {
        /// Path of the catalog file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
    /// The catalog file is not well-formed TOML or does not match the schema
    #[error("failed to parse catalog")]
    Parse(#[from] toml::de::Error),
    /// The catalog breaks one of the content limits
    #[error("invalid catalog: {0}")]
    Invalid(#[from] garde::Report),
    /// A question label is not a `<number> <operator> <number>` expression
    #[error("team {team}, question {question}: cannot read `{label}`")]
    UnreadableLabel {
        /// Team owning the question
        team: TeamId,
        /// The offending question
        question: QuestionId,
        /// The label as authored
        label: String,
        /// Why the label could not be read
        #[source]
        source: rules::Error,
    },
    /// A question's stored answer disagrees with its label under the rule book
    #[error(
        "team {team}, question {question}: `{label}` gives {computed:?} under the rules, but the answer is {expected}"
    )]
    AnswerMismatch {
        /// Team owning the question
        team: TeamId,
        /// The offending question
        question: QuestionId,
        /// The label as authored
        label: String,
        /// The answer stored in the catalog
        expected: i64,
        /// The answer obtained by evaluating the label, if any
        computed: Option<i64>,
    },
}

/// Serialization helper for [`Catalog`]
///
/// The instructions default to the text generated from the rule book, so
/// they can only be filled in once the rules are known.
#[derive(Deserialize)]
struct CatalogSerde {
    instructions: Option<String>,
    #[serde(default)]
    rules: RuleBook,
    teams: Vec<Team>,
}

/// The full set of teams available to a quest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(from = "CatalogSerde")]
pub struct Catalog {
    /// Text explaining the remapped operators, shown with every question set
    #[garde(length(chars, max = MAX_INSTRUCTIONS_LENGTH))]
    instructions: String,
    /// Meaning of each operator symbol
    #[garde(skip)]
    rules: RuleBook,
    /// Teams in authoring order
    #[garde(length(min = 1, max = MAX_TEAMS_COUNT), dive, custom(unique_team_ids))]
    teams: Vec<Team>,
}

impl From<CatalogSerde> for Catalog {
    fn from(serde: CatalogSerde) -> Self {
        let CatalogSerde {
            instructions,
            rules,
            teams,
        } = serde;
        Self {
            instructions: instructions.unwrap_or_else(|| builtin::instructions(&rules)),
            rules,
            teams,
        }
    }
}

/// Rejects a team list that reuses an id
#[allow(clippy::ptr_arg)]
fn unique_team_ids(teams: &Vec<Team>, _ctx: &()) -> garde::Result {
    let duplicates = teams.iter().map(|t| t.id).duplicates().collect_vec();
    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "duplicate team ids: {}",
            duplicates.iter().join(", ")
        )))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The catalog authored for the event
    pub fn builtin() -> Self {
        builtin::catalog()
    }

    /// Parses and validates a catalog written in TOML
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the text does not match the schema and
    /// [`Error::Invalid`] if the content breaks a limit.
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        let catalog: Self = toml::from_str(text)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reads, parses and validates a TOML catalog file
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, otherwise the same
    /// errors as [`Catalog::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml_str(&text)?;
        info!(path = %path.display(), teams = catalog.teams.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// Checks every stored answer against its label under the rule book
    ///
    /// Answers are authored by hand; this catches a slip before anyone is
    /// told their correct arithmetic is wrong.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::UnreadableLabel`] or [`Error::AnswerMismatch`]
    /// found, in authoring order.
    pub fn verify_arithmetic(&self) -> Result<(), Error> {
        for team in &self.teams {
            for question in &team.questions {
                let expression: Expression =
                    question
                        .label
                        .parse()
                        .map_err(|source| Error::UnreadableLabel {
                            team: team.id,
                            question: question.id.clone(),
                            label: question.label.clone(),
                            source,
                        })?;
                let computed = self.rules.evaluate(&expression);
                if computed != Some(question.answer) {
                    return Err(Error::AnswerMismatch {
                        team: team.id,
                        question: question.id.clone(),
                        label: question.label.clone(),
                        expected: question.answer,
                        computed,
                    });
                }
            }
        }
        debug!(teams = self.teams.len(), "Catalog arithmetic verified");
        Ok(())
    }

    /// All teams in authoring order; never empty for a validated catalog
    pub fn list_teams(&self) -> &[Team] {
        &self.teams
    }

    /// Looks up a team by identifier
    ///
    /// # Errors
    ///
    /// Returns [`Error::TeamNotFound`] if no team has this id.
    pub fn get_team(&self, id: TeamId) -> Result<&Team, Error> {
        self.teams
            .iter()
            .find(|t| t.id == id)
            .ok_or(Error::TeamNotFound(id))
    }

    /// The shared instructions text
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// The operator rule book
    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }
}
