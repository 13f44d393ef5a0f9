//! Configuration constants for the Team Quest system
//!
//! This module contains the limits used when validating a catalog, so that
//! a hand-authored TOML file cannot smuggle in absurd content, plus the
//! fixed strings every presentation layer shares.

/// Catalog-wide limits
pub mod catalog {
    /// Maximum number of teams in a single catalog
    pub const MAX_TEAMS_COUNT: usize = 32;
    /// Maximum length of the shared instructions text in characters
    pub const MAX_INSTRUCTIONS_LENGTH: usize = 2000;
}

/// Team configuration limits
pub mod team {
    /// Minimum length of a team's display name
    pub const MIN_NAME_LENGTH: usize = 1;
    /// Maximum length of a team's display name
    pub const MAX_NAME_LENGTH: usize = 100;
    /// Minimum number of questions a team must answer
    pub const MIN_QUESTIONS_COUNT: usize = 1;
    /// Maximum number of questions a team may be given
    pub const MAX_QUESTIONS_COUNT: usize = 50;
    /// Maximum length of any reward text (message, riddle, task)
    pub const MAX_REWARD_TEXT_LENGTH: usize = 2000;
}

/// Question configuration limits
pub mod question {
    /// Minimum length of a question identifier
    pub const MIN_ID_LENGTH: usize = 1;
    /// Maximum length of a question identifier
    pub const MAX_ID_LENGTH: usize = 32;
    /// Minimum length of a question label
    pub const MIN_LABEL_LENGTH: usize = 1;
    /// Maximum length of a question label
    pub const MAX_LABEL_LENGTH: usize = 100;
}

/// Fixed presentation strings
pub mod text {
    /// Header title shown before a team is chosen
    pub const APP_TITLE: &str = "Team Adventure Quest";
    /// Heading of the team selection screen
    pub const SELECT_TEAM_HEADING: &str = "Select Your Team";
    /// Heading of the answering screen
    pub const ANSWERING_HEADING: &str = "Math Test";
    /// Heading above the riddle on the success screen
    pub const CLUE_HEADING: &str = "Your First Clue:";
    /// The single message shown after any failed submission
    pub const INCORRECT_ANSWERS: &str =
        "Incorrect answers found. Please check your math rules and try again!";
}
