//! Quest session state machine
//!
//! A [`SessionController`] holds one player's progress through the quest:
//! picking a team, filling in answers, and unlocking the reward. Every
//! operation runs to completion synchronously and only touches the state
//! owned by its own controller; the catalog is shared read-only.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    answer::{self, AnswerParsing, Report},
    catalog::{
        self, Catalog,
        team::{QuestionId, Team, TeamId},
    },
    constants::text::INCORRECT_ANSWERS,
    view::View,
};

/// A unique identifier for a session, recorded on its log events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new random session id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// The screen a session is currently on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// No team chosen yet
    TeamSelection,
    /// A team is chosen and its questions are being answered
    Answering,
    /// Every answer was correct and the reward is shown
    Success,
}

/// Result of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    /// Every answer was correct
    Passed,
    /// At least one answer was missing, unreadable or wrong
    Failed,
}

/// One team's attempt at its questions
#[derive(Debug, Clone)]
pub struct Attempt<'c> {
    /// The team whose questions are being answered
    team: &'c Team,
    /// Raw field contents keyed by question id, exactly as typed
    answers: HashMap<QuestionId, String>,
    /// Set by a failed submission, cleared by the next successful one
    error: Option<&'static str>,
}

impl<'c> Attempt<'c> {
    fn new(team: &'c Team) -> Self {
        Self {
            team,
            answers: HashMap::default(),
            error: None,
        }
    }

    /// The team of this attempt
    pub fn team(&self) -> &'c Team {
        self.team
    }

    /// Raw answers typed so far
    pub fn answers(&self) -> &HashMap<QuestionId, String> {
        &self.answers
    }

    /// The message left by the last failed submission
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }
}

/// State of a session, one variant per screen
#[derive(Debug, Clone, Default)]
pub enum SessionState<'c> {
    /// Initial state: no team chosen
    #[default]
    TeamSelection,
    /// Answering the chosen team's questions
    Answering(Attempt<'c>),
    /// The chosen team answered everything correctly
    Success(Attempt<'c>),
}

impl<'c> SessionState<'c> {
    /// The phase this state corresponds to
    pub fn phase(&self) -> Phase {
        match self {
            Self::TeamSelection => Phase::TeamSelection,
            Self::Answering(_) => Phase::Answering,
            Self::Success(_) => Phase::Success,
        }
    }

    /// The current attempt, if a team has been chosen
    pub fn attempt(&self) -> Option<&Attempt<'c>> {
        match self {
            Self::TeamSelection => None,
            Self::Answering(attempt) | Self::Success(attempt) => Some(attempt),
        }
    }
}

/// Owns a single player's session and applies their actions to it
#[derive(Debug)]
pub struct SessionController<'c> {
    id: SessionId,
    catalog: &'c Catalog,
    parsing: AnswerParsing,
    state: SessionState<'c>,
}

impl<'c> SessionController<'c> {
    /// Starts a session on the team selection screen
    pub fn new(catalog: &'c Catalog) -> Self {
        let id = SessionId::new();
        debug!(session = %id, "Session created");
        Self {
            id,
            catalog,
            parsing: AnswerParsing::default(),
            state: SessionState::default(),
        }
    }

    /// Changes how raw answers are read on submission
    pub fn with_parsing(mut self, parsing: AnswerParsing) -> Self {
        self.parsing = parsing;
        self
    }

    /// This session's identifier
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The catalog this session draws its teams from
    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// How raw answers are read on submission
    pub fn parsing(&self) -> AnswerParsing {
        self.parsing
    }

    /// The full current state
    pub fn state(&self) -> &SessionState<'c> {
        &self.state
    }

    /// The current phase
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// The chosen team, if any
    pub fn selected_team(&self) -> Option<&'c Team> {
        self.state.attempt().map(Attempt::team)
    }

    /// Raw answers of the current attempt; empty when no team is chosen
    pub fn answers(&self) -> impl Iterator<Item = (&QuestionId, &str)> {
        self.state
            .attempt()
            .into_iter()
            .flat_map(|attempt| attempt.answers.iter())
            .map(|(id, raw)| (id, raw.as_str()))
    }

    /// The raw answer typed for one question
    pub fn answer(&self, question_id: &str) -> Option<&str> {
        self.state
            .attempt()
            .and_then(|attempt| attempt.answers.get(question_id))
            .map(String::as_str)
    }

    /// The message left by the last failed submission, if still current
    pub fn error_message(&self) -> Option<&'static str> {
        self.state.attempt().and_then(Attempt::error)
    }

    /// Derives what the presentation layer should show right now
    pub fn view(&self) -> View {
        View::new(self)
    }

    /// Chooses a team and starts a fresh attempt at its questions
    ///
    /// Any previous answers and error are discarded, whatever the phase.
    pub fn select_team(&mut self, team: &'c Team) {
        info!(session = %self.id, team = %team.id, from = ?self.phase(), "Team selected");
        self.state = SessionState::Answering(Attempt::new(team));
    }

    /// Chooses a team by identifier
    ///
    /// # Errors
    ///
    /// Returns [`catalog::Error::TeamNotFound`] if the catalog has no such
    /// team; the session is left unchanged.
    pub fn select_team_by_id(&mut self, id: TeamId) -> Result<(), catalog::Error> {
        let team = self.catalog.get_team(id)?;
        self.select_team(team);
        Ok(())
    }

    /// Stores the raw contents of an answer field
    ///
    /// The value is not checked until submission. Ignored outside the
    /// answering phase and for ids that are not one of the team's questions.
    ///
    /// # Returns
    ///
    /// `true` if the answer was stored
    pub fn record_answer(&mut self, question_id: &str, raw: impl Into<String>) -> bool {
        let SessionState::Answering(attempt) = &mut self.state else {
            debug!(session = %self.id, question = question_id, "Answer ignored outside answering phase");
            return false;
        };
        let Some(question) = attempt.team.question(question_id) else {
            debug!(session = %self.id, question = question_id, "Answer ignored for unknown question");
            return false;
        };

        attempt.answers.insert(question.id.clone(), raw.into());
        true
    }

    /// Checks the current answers
    ///
    /// On failure the generic error message is set and the session stays
    /// on the answering screen; on success the reward is unlocked.
    ///
    /// # Returns
    ///
    /// `None` if the session is not answering questions, otherwise the verdict
    pub fn submit(&mut self) -> Option<Verdict> {
        match std::mem::take(&mut self.state) {
            SessionState::Answering(mut attempt) => {
                if answer::all_correct(attempt.team, &attempt.answers, self.parsing) {
                    info!(session = %self.id, team = %attempt.team.id, "All answers correct");
                    attempt.error = None;
                    self.state = SessionState::Success(attempt);
                    Some(Verdict::Passed)
                } else {
                    debug!(session = %self.id, team = %attempt.team.id, "Submission rejected");
                    attempt.error = Some(INCORRECT_ANSWERS);
                    self.state = SessionState::Answering(attempt);
                    Some(Verdict::Failed)
                }
            }
            other => {
                debug!(session = %self.id, phase = ?other.phase(), "Submit ignored");
                self.state = other;
                None
            }
        }
    }

    /// Returns to the team selection screen, forgetting the team and answers
    pub fn go_back(&mut self) {
        if self.phase() != Phase::TeamSelection {
            info!(session = %self.id, from = ?self.phase(), "Back to team selection");
        }
        self.state = SessionState::TeamSelection;
    }

    /// Marks every question of the current attempt without changing state
    ///
    /// Intended for facilitators; players only ever see the single
    /// pass/fail outcome of [`SessionController::submit`].
    pub fn diagnose(&self) -> Option<Report> {
        self.state
            .attempt()
            .map(|attempt| Report::new(attempt.team, &attempt.answers, self.parsing))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    const BLUE_ANSWERS: [(&str, &str); 10] = [
        ("q1", "16"),
        ("q2", "99"),
        ("q3", "1"),
        ("q4", "8"),
        ("q5", "3"),
        ("q6", "3"),
        ("q7", "16"),
        ("q8", "2"),
        ("q9", "10"),
        ("q10", "2"),
    ];

    fn answer_all<'c>(session: &mut SessionController<'c>, answers: &[(&str, &str)]) {
        for (id, value) in answers {
            assert!(session.record_answer(id, *value));
        }
    }

    fn blue(catalog: &Catalog) -> &Team {
        catalog.get_team(TeamId::from(1)).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let catalog = Catalog::builtin();
        let session = SessionController::new(&catalog);
        assert_eq!(session.phase(), Phase::TeamSelection);
        assert!(session.selected_team().is_none());
        assert_eq!(session.answers().count(), 0);
        assert!(session.error_message().is_none());
        assert_eq!(session.parsing(), AnswerParsing::Lenient);
    }

    #[test]
    fn test_blue_team_scenario_passes() {
        let catalog = Catalog::builtin();
        let mut session = SessionController::new(&catalog);
        session.select_team(blue(&catalog));
        assert_eq!(session.phase(), Phase::Answering);

        answer_all(&mut session, &BLUE_ANSWERS);
        assert_eq!(session.submit(), Some(Verdict::Passed));
        assert_eq!(session.phase(), Phase::Success);
        assert!(session.error_message().is_none());
    }

    #[test]
    fn test_blue_team_scenario_wrong_first_answer() {
        let catalog = Catalog::builtin();
        let mut session = SessionController::new(&catalog);
        session.select_team(blue(&catalog));
        answer_all(&mut session, &BLUE_ANSWERS);
        session.record_answer("q1", "15");

        assert_eq!(session.submit(), Some(Verdict::Failed));
        assert_eq!(session.phase(), Phase::Answering);
        assert_eq!(
            session.error_message(),
            Some("Incorrect answers found. Please check your math rules and try again!")
        );
        // answers survive a failed submission
        assert_eq!(session.answer("q2"), Some("99"));
    }

    #[test]
    fn test_every_team_passes_with_its_own_answers() {
        let catalog = Catalog::builtin();
        for team in catalog.list_teams() {
            let mut session = SessionController::new(&catalog);
            session.select_team(team);
            for question in &team.questions {
                assert!(session.record_answer(question.id.as_ref(), question.answer.to_string()));
            }
            assert_eq!(session.submit(), Some(Verdict::Passed), "{}", team.name);
        }
    }

    #[test]
    fn test_every_team_fails_with_one_wrong_answer() {
        let catalog = Catalog::builtin();
        for team in catalog.list_teams() {
            for wrong in &team.questions {
                let mut session = SessionController::new(&catalog);
                session.select_team(team);
                for question in &team.questions {
                    let value = if question.id == wrong.id {
                        question.answer - 1
                    } else {
                        question.answer
                    };
                    session.record_answer(question.id.as_ref(), value.to_string());
                }
                assert_eq!(session.submit(), Some(Verdict::Failed));
                assert_eq!(session.error_message(), Some(INCORRECT_ANSWERS));
                assert_eq!(session.phase(), Phase::Answering);
            }
        }
    }

    #[test]
    fn test_lenient_answers_are_accepted() {
        let catalog = Catalog::builtin();
        let mut session = SessionController::new(&catalog);
        session.select_team(blue(&catalog));
        answer_all(&mut session, &BLUE_ANSWERS);
        session.record_answer("q1", "16 ");
        session.record_answer("q7", "016");
        session.record_answer("q2", "99abc");
        assert_eq!(session.submit(), Some(Verdict::Passed));
    }

    #[test]
    fn test_unreadable_answers_are_rejected() {
        let catalog = Catalog::builtin();
        for bad in ["abc", ""] {
            let mut session = SessionController::new(&catalog);
            session.select_team(blue(&catalog));
            answer_all(&mut session, &BLUE_ANSWERS);
            session.record_answer("q1", bad);
            assert_eq!(session.submit(), Some(Verdict::Failed));
        }
    }

    #[test]
    fn test_strict_parsing_rejects_trailing_garbage() {
        let catalog = Catalog::builtin();
        let mut session = SessionController::new(&catalog).with_parsing(AnswerParsing::Strict);
        session.select_team(blue(&catalog));
        answer_all(&mut session, &BLUE_ANSWERS);
        session.record_answer("q2", "99abc");
        assert_eq!(session.submit(), Some(Verdict::Failed));
        session.record_answer("q2", " 99 ");
        assert_eq!(session.submit(), Some(Verdict::Passed));
    }

    #[test]
    fn test_submit_without_answers_fails() {
        let catalog = Catalog::builtin();
        let mut session = SessionController::new(&catalog);
        session.select_team(blue(&catalog));
        assert_eq!(session.submit(), Some(Verdict::Failed));
        assert_eq!(session.error_message(), Some(INCORRECT_ANSWERS));
    }

    #[test]
    fn test_retry_after_failure_clears_error() {
        let catalog = Catalog::builtin();
        let mut session = SessionController::new(&catalog);
        session.select_team(blue(&catalog));
        assert_eq!(session.submit(), Some(Verdict::Failed));
        answer_all(&mut session, &BLUE_ANSWERS);
        // typing alone leaves the error in place
        assert!(session.error_message().is_some());
        assert_eq!(session.submit(), Some(Verdict::Passed));
        assert!(session.error_message().is_none());
    }

    #[test]
    fn test_submit_without_team_is_noop() {
        let catalog = Catalog::builtin();
        let mut session = SessionController::new(&catalog);
        assert_eq!(session.submit(), None);
        assert_eq!(session.phase(), Phase::TeamSelection);
    }

    #[test]
    fn test_submit_after_success_is_noop() {
        let catalog = Catalog::builtin();
        let mut session = SessionController::new(&catalog);
        session.select_team(blue(&catalog));
        answer_all(&mut session, &BLUE_ANSWERS);
        session.submit();
        assert_eq!(session.submit(), None);
        assert_eq!(session.phase(), Phase::Success);
    }

    #[test]
    fn test_record_answer_outside_answering_is_noop() {
        let catalog = Catalog::builtin();
        let mut session = SessionController::new(&catalog);
        assert!(!session.record_answer("q1", "16"));
        assert_eq!(session.answers().count(), 0);

        session.select_team(blue(&catalog));
        answer_all(&mut session, &BLUE_ANSWERS);
        session.submit();
        assert!(!session.record_answer("q1", "0"));
        assert_eq!(session.answer("q1"), Some("16"));
    }

    #[test]
    fn test_record_answer_unknown_question_is_noop() {
        let catalog = Catalog::builtin();
        let mut session = SessionController::new(&catalog);
        session.select_team(blue(&catalog));
        // q11 belongs to the yellow team
        assert!(!session.record_answer("q11", "9"));
        assert!(session.answer("q11").is_none());
    }

    #[test]
    fn test_record_answer_overwrites() {
        let catalog = Catalog::builtin();
        let mut session = SessionController::new(&catalog);
        session.select_team(blue(&catalog));
        session.record_answer("q1", "1");
        session.record_answer("q1", "16");
        assert_eq!(session.answer("q1"), Some("16"));
        assert_eq!(session.answers().count(), 1);
    }

    #[test]
    fn test_select_team_resets_answers_and_error() {
        let catalog = Catalog::builtin();
        let mut session = SessionController::new(&catalog);
        session.select_team(blue(&catalog));
        session.record_answer("q1", "16");
        session.submit();
        assert!(session.error_message().is_some());

        let yellow = catalog.get_team(TeamId::from(2)).unwrap();
        session.select_team(yellow);
        assert_eq!(session.selected_team().map(|t| t.id), Some(TeamId::from(2)));
        assert_eq!(session.answers().count(), 0);
        assert!(session.error_message().is_none());
        assert_eq!(session.phase(), Phase::Answering);
    }

    #[test]
    fn test_select_team_by_id() {
        let catalog = Catalog::builtin();
        let mut session = SessionController::new(&catalog);
        assert!(session.select_team_by_id(TeamId::from(4)).is_ok());
        assert_eq!(
            session.selected_team().map(|t| t.name.as_str()),
            Some("Team 4 – Red")
        );
        assert!(matches!(
            session.select_team_by_id(TeamId::from(5)),
            Err(catalog::Error::TeamNotFound(_))
        ));
        assert_eq!(session.selected_team().map(|t| t.id), Some(TeamId::from(4)));
    }

    #[test]
    fn test_go_back_from_every_phase() {
        let catalog = Catalog::builtin();
        let mut session = SessionController::new(&catalog);

        session.go_back();
        assert_eq!(session.phase(), Phase::TeamSelection);
        session.go_back();
        assert_eq!(session.phase(), Phase::TeamSelection);

        session.select_team(blue(&catalog));
        session.record_answer("q1", "16");
        session.go_back();
        assert_eq!(session.phase(), Phase::TeamSelection);
        assert!(session.selected_team().is_none());
        assert_eq!(session.answers().count(), 0);

        session.select_team(blue(&catalog));
        answer_all(&mut session, &BLUE_ANSWERS);
        session.submit();
        assert_eq!(session.phase(), Phase::Success);
        session.go_back();
        assert_eq!(session.phase(), Phase::TeamSelection);
        assert!(session.error_message().is_none());
    }

    #[test]
    fn test_diagnose() {
        let catalog = Catalog::builtin();
        let mut session = SessionController::new(&catalog);
        assert!(session.diagnose().is_none());

        session.select_team(blue(&catalog));
        answer_all(&mut session, &BLUE_ANSWERS);
        session.record_answer("q4", "7");
        let report = session.diagnose().unwrap();
        assert_eq!(report.correct_count(), 9);
        assert_eq!(report.first_failure(), Some(&QuestionId::from("q4")));
        // diagnosing never sets the player-facing error
        assert!(session.error_message().is_none());
    }

    #[test]
    fn test_sessions_are_independent() {
        let catalog = Catalog::builtin();
        let mut first = SessionController::new(&catalog);
        let second = SessionController::new(&catalog);
        first.select_team(blue(&catalog));
        assert_ne!(first.id(), second.id());
        assert_eq!(second.phase(), Phase::TeamSelection);
    }
}
