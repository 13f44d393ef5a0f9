//! Presentation snapshot of a session
//!
//! A [`View`] is everything a front-end needs to draw the current screen:
//! the header, the theme colour and the contents of one of the three
//! screens. It is derived from a [`SessionController`] on demand and never
//! fed back into it.

use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::{
    catalog::{
        color::Color,
        team::{QuestionId, TeamId},
    },
    constants::text,
    session::{SessionController, SessionState},
};

/// Colours applied to the whole page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    /// Primary colour: the chosen team's colour, or the brand colour
    pub primary: Color,
}

/// Top bar of the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    /// The chosen team's name, or the quest title
    pub title: String,
    /// Whether the "Change Team" control is offered
    pub change_team: bool,
}

/// One button on the team selection screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamButton {
    /// Team to select when pressed
    pub id: TeamId,
    /// Button text
    pub name: String,
    /// Button background
    pub color: Color,
    /// Button text colour
    pub contrast_text: Color,
}

/// One answer field on the answering screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Question the field is bound to
    pub id: QuestionId,
    /// 1-based position in the list
    pub number: usize,
    /// Field caption, e.g. `1. 8 + 2 = ?`
    pub prompt: String,
    /// What has been typed so far
    pub value: String,
}

/// Contents of the screen below the header
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Screen {
    /// Team picker
    TeamSelection {
        /// Screen heading
        heading: &'static str,
        /// One button per team, in catalog order
        teams: Vec<TeamButton>,
    },
    /// Question form
    Answering {
        /// Screen heading
        heading: &'static str,
        /// Shared explanation of the remapped operators
        instructions: String,
        /// One field per question, in display order
        fields: Vec<Field>,
        /// Message left by the last failed submission
        error: Option<&'static str>,
    },
    /// Reward reveal
    Success {
        /// Congratulation banner
        message: String,
        /// Heading above the riddle
        clue_heading: &'static str,
        /// The clue to the next location
        riddle: String,
        /// Title of the task
        task_title: String,
        /// Task instructions
        task_description: String,
    },
}

/// Everything needed to render a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    /// Page colours
    pub theme: Theme,
    /// Top bar
    pub header: Header,
    /// Main screen
    pub screen: Screen,
}

impl View {
    /// Derives the view for the session's current state
    pub fn new(session: &SessionController<'_>) -> Self {
        let catalog = session.catalog();

        let Some(team) = session.selected_team() else {
            return Self {
                theme: Theme {
                    primary: Color::BRAND,
                },
                header: Header {
                    title: text::APP_TITLE.to_string(),
                    change_team: false,
                },
                screen: Screen::TeamSelection {
                    heading: text::SELECT_TEAM_HEADING,
                    teams: catalog
                        .list_teams()
                        .iter()
                        .map(|team| TeamButton {
                            id: team.id,
                            name: team.name.clone(),
                            color: team.color,
                            contrast_text: team.contrast_text,
                        })
                        .collect(),
                },
            };
        };

        let screen = match session.state() {
            SessionState::Success(_) => Screen::Success {
                message: team.reward.success_message.clone(),
                clue_heading: text::CLUE_HEADING,
                riddle: team.reward.riddle.clone(),
                task_title: team.reward.task_title.clone(),
                task_description: team.reward.task_description.clone(),
            },
            _ => Screen::Answering {
                heading: text::ANSWERING_HEADING,
                instructions: catalog.instructions().to_string(),
                fields: team
                    .questions
                    .iter()
                    .enumerate()
                    .map(|(index, question)| Field {
                        id: question.id.clone(),
                        number: index + 1,
                        prompt: format!("{}. {} = ?", index + 1, question.label),
                        value: session
                            .answer(question.id.as_ref())
                            .unwrap_or_default()
                            .to_string(),
                    })
                    .collect(),
                error: session.error_message(),
            },
        };

        Self {
            theme: Theme {
                primary: team.color,
            },
            header: Header {
                title: team.name.clone(),
                change_team: true,
            },
            screen,
        }
    }

    /// Converts the view to a JSON string for a front-end
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}
