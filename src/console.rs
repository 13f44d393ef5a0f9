//! Line-based terminal rendering of a quest session.
//!
//! Each input line is one command; after every command the current view is
//! drawn again.

use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};

use team_quest::{
    Phase, SessionController, Verdict, View,
    view::{Field, Screen},
};
use tracing::debug;

const HELP: &str = "\
Commands:
  <n>            pick team n (team selection screen)
  <n> <value>    type <value> into answer n
  submit         check your answers
  back           change team
  json           print the current view as JSON
  help           show this text
  quit           leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Pick(usize),
    Answer { number: usize, value: String },
    Submit,
    Back,
    Json,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (head, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(head, rest)| (head, rest.trim_start()));

        if let Ok(number) = head.parse::<usize>() {
            return Ok(if rest.is_empty() {
                Self::Pick(number)
            } else {
                Self::Answer {
                    number,
                    value: rest.to_string(),
                }
            });
        }

        match head.to_lowercase().as_str() {
            "submit" | "s" => Ok(Self::Submit),
            "back" | "b" => Ok(Self::Back),
            "json" => Ok(Self::Json),
            "help" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(format!("Unknown command `{other}`. Type `help` for a list.")),
        }
    }
}

/// Applies a command, returning a note to print above the next screen
fn apply(session: &mut SessionController<'_>, command: Command) -> Option<String> {
    match command {
        Command::Pick(number) => {
            if session.phase() != Phase::TeamSelection {
                return Some("Use `back` to change team first.".to_string());
            }
            let Some(team) = number
                .checked_sub(1)
                .and_then(|index| session.catalog().list_teams().get(index))
            else {
                return Some(format!("There is no team {number}."));
            };
            session.select_team(team);
            None
        }
        Command::Answer { number, value } => {
            let question = session.selected_team().and_then(|team| {
                number
                    .checked_sub(1)
                    .and_then(|index| team.questions.get(index))
            });
            let Some(question) = question else {
                return Some(if session.phase() == Phase::TeamSelection {
                    "Pick a team first.".to_string()
                } else {
                    format!("There is no question {number}.")
                });
            };
            if session.record_answer(question.id.as_ref(), value) {
                None
            } else {
                Some("Answers can no longer be changed.".to_string())
            }
        }
        Command::Submit => match session.submit() {
            Some(Verdict::Passed | Verdict::Failed) => None,
            None => Some("Nothing to submit here.".to_string()),
        },
        Command::Back => {
            if session.view().header.change_team {
                session.go_back();
                None
            } else {
                Some("You are already choosing a team.".to_string())
            }
        }
        Command::Json => Some(session.view().to_message()),
        Command::Help => Some(HELP.to_string()),
        Command::Quit => None,
    }
}

fn render(view: &View, out: &mut impl Write) -> io::Result<()> {
    let rule = "=".repeat(60);
    writeln!(out, "{rule}")?;
    write!(out, "{}", view.header.title)?;
    if view.header.change_team {
        write!(out, "    [back: Change Team]")?;
    }
    writeln!(out, "\n{rule}")?;

    match &view.screen {
        Screen::TeamSelection { heading, teams } => {
            writeln!(out, "{heading}\n")?;
            for (index, team) in teams.iter().enumerate() {
                writeln!(out, "  {}) {}", index + 1, team.name)?;
            }
        }
        Screen::Answering {
            heading,
            instructions,
            fields,
            error,
        } => {
            writeln!(out, "{heading}\n\n{instructions}\n")?;
            for Field { prompt, value, .. } in fields {
                writeln!(out, "  {prompt:<24} {value}")?;
            }
            if let Some(error) = error {
                writeln!(out, "\n! {error}")?;
            }
            writeln!(out, "\nType `<n> <answer>` to fill a field, then `submit`.")?;
        }
        Screen::Success {
            message,
            clue_heading,
            riddle,
            task_title,
            task_description,
        } => {
            writeln!(out, "{message}\n\n{clue_heading}\n{riddle}\n")?;
            writeln!(out, "{task_title}\n{task_description}")?;
        }
    }
    writeln!(out)
}

/// Runs commands from `input` until it ends or the player quits
pub fn run(
    session: &mut SessionController<'_>,
    input: impl BufRead,
    mut output: impl Write,
) -> io::Result<()> {
    render(&session.view(), &mut output)?;
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            write!(output, "> ")?;
            output.flush()?;
            continue;
        }

        let note = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => {
                debug!(session = %session.id(), ?command, "Console command");
                apply(session, command)
            }
            Err(message) => Some(message),
        };

        if let Some(note) = note {
            writeln!(output, "{note}\n")?;
        }
        render(&session.view(), &mut output)?;
        write!(output, "> ")?;
        output.flush()?;
    }
    Ok(())
}
