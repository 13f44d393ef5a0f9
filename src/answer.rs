//! Answer parsing and checking
//!
//! Players type whatever they like into the answer fields. Nothing is
//! checked while they type; on submission each raw string is read as an
//! integer and compared with the question's stored answer. The check stops
//! at the first wrong answer and never says which one it was.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::team::{QuestionId, Team};

/// How raw answer strings are turned into integers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerParsing {
    /// Reads the leading integer and ignores whatever follows it, so
    /// `"16 "`, `"016"` and `"16abc"` all read as 16
    #[default]
    Lenient,
    /// Accepts only an optionally signed decimal integer, surrounded by
    /// optional whitespace
    Strict,
}

impl AnswerParsing {
    /// Reads a raw answer string
    ///
    /// # Returns
    ///
    /// `None` if no integer can be read, or if it does not fit in an `i64`
    pub fn parse(self, raw: &str) -> Option<i64> {
        match self {
            Self::Lenient => parse_leading_integer(raw),
            Self::Strict => raw.trim().parse().ok(),
        }
    }
}

/// Reads the integer at the start of `raw`
///
/// Leading whitespace is skipped, one `+` or `-` sign is allowed, and a
/// `0x`/`0X` prefix switches to hexadecimal. Parsing stops at the first
/// character that is not a digit.
pub fn parse_leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, s) = match s.get(..2) {
        Some("0x" | "0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let digits = s
        .char_indices()
        .find(|(_, c)| !c.is_digit(radix))
        .map_or(s, |(end, _)| &s[..end]);
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.chars().try_fold(0i64, |acc, c| {
        acc.checked_mul(i64::from(radix))?
            .checked_add(i64::from(c.to_digit(radix)?))
    });
    if negative {
        magnitude?.checked_neg()
    } else {
        magnitude
    }
}

/// Outcome of checking one question's answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    /// The answer reads as the expected integer
    Correct,
    /// The answer reads as an integer, but the wrong one
    Incorrect,
    /// The field is empty or does not start with an integer
    Unreadable,
}

impl Mark {
    /// Marks a single raw answer against the expected value
    pub fn of(raw: Option<&str>, expected: i64, parsing: AnswerParsing) -> Self {
        match raw.and_then(|raw| parsing.parse(raw)) {
            Some(value) if value == expected => Self::Correct,
            Some(_) => Self::Incorrect,
            None => Self::Unreadable,
        }
    }
}

/// Whether every question of a team is answered correctly
///
/// Questions are checked in display order and the check stops at the first
/// one that fails; the failing question is not reported.
pub fn all_correct(
    team: &Team,
    answers: &HashMap<QuestionId, String>,
    parsing: AnswerParsing,
) -> bool {
    team.questions.iter().all(|question| {
        Mark::of(
            answers.get(&question.id).map(String::as_str),
            question.answer,
            parsing,
        ) == Mark::Correct
    })
}

/// Per-question marks for a whole attempt
///
/// Unlike [`all_correct`] this looks at every question. It is meant for
/// facilitators and diagnostics, never for players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    marks: Vec<(QuestionId, Mark)>,
}

impl Report {
    /// Marks every question of `team`
    pub fn new(team: &Team, answers: &HashMap<QuestionId, String>, parsing: AnswerParsing) -> Self {
        let marks = team
            .questions
            .iter()
            .map(|question| {
                let raw = answers.get(&question.id).map(String::as_str);
                (question.id.clone(), Mark::of(raw, question.answer, parsing))
            })
            .collect();
        Self { marks }
    }

    /// Marks in display order
    pub fn marks(&self) -> &[(QuestionId, Mark)] {
        &self.marks
    }

    /// Number of correctly answered questions
    pub fn correct_count(&self) -> usize {
        self.marks
            .iter()
            .filter(|(_, mark)| *mark == Mark::Correct)
            .count()
    }

    /// The first question that is not correct, if any
    pub fn first_failure(&self) -> Option<&QuestionId> {
        self.marks
            .iter()
            .find(|(_, mark)| *mark != Mark::Correct)
            .map(|(id, _)| id)
    }

    /// Whether every question is correct
    pub fn passed(&self) -> bool {
        self.first_failure().is_none()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, team::TeamId};

    fn blue_answers() -> HashMap<QuestionId, String> {
        [
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
        ]
        .into_iter()
        .map(|(id, value)| (QuestionId::from(id), value.to_string()))
        .collect()
    }

    #[test]
    fn test_lenient_parsing() {
        let parse = |s| AnswerParsing::Lenient.parse(s);
        assert_eq!(parse("16"), Some(16));
        assert_eq!(parse("16 "), Some(16));
        assert_eq!(parse("  16"), Some(16));
        assert_eq!(parse("016"), Some(16));
        assert_eq!(parse("8abc"), Some(8));
        assert_eq!(parse("16.9"), Some(16));
        assert_eq!(parse("-3"), Some(-3));
        assert_eq!(parse("+3"), Some(3));
        assert_eq!(parse("0x10"), Some(16));
        assert_eq!(parse("0"), Some(0));
    }

    #[test]
    fn test_lenient_parsing_rejects() {
        let parse = |s| AnswerParsing::Lenient.parse(s);
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("abc"), None);
        assert_eq!(parse("-"), None);
        assert_eq!(parse("+-1"), None);
        assert_eq!(parse("0x"), None);
        assert_eq!(parse(".5"), None);
        assert_eq!(parse("99999999999999999999"), None);
    }

    #[test]
    fn test_lenient_parsing_extremes() {
        assert_eq!(parse_leading_integer(&i64::MAX.to_string()), Some(i64::MAX));
        assert_eq!(parse_leading_integer("-9223372036854775807"), Some(-i64::MAX));
    }

    #[test]
    fn test_strict_parsing() {
        let parse = |s| AnswerParsing::Strict.parse(s);
        assert_eq!(parse("16"), Some(16));
        assert_eq!(parse(" 16 "), Some(16));
        assert_eq!(parse("016"), Some(16));
        assert_eq!(parse("-3"), Some(-3));
        assert_eq!(parse("8abc"), None);
        assert_eq!(parse("16.0"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn test_mark() {
        let parsing = AnswerParsing::Lenient;
        assert_eq!(Mark::of(Some("16"), 16, parsing), Mark::Correct);
        assert_eq!(Mark::of(Some("15"), 16, parsing), Mark::Incorrect);
        assert_eq!(Mark::of(Some("abc"), 16, parsing), Mark::Unreadable);
        assert_eq!(Mark::of(None, 16, parsing), Mark::Unreadable);
    }

    #[test]
    fn test_all_correct_blue_team() {
        let catalog = Catalog::builtin();
        let blue = catalog.get_team(TeamId::from(1)).unwrap();
        assert!(all_correct(blue, &blue_answers(), AnswerParsing::Lenient));
    }

    #[test]
    fn test_any_single_wrong_answer_fails() {
        let catalog = Catalog::builtin();
        let blue = catalog.get_team(TeamId::from(1)).unwrap();
        for question in &blue.questions {
            let mut answers = blue_answers();
            answers.insert(question.id.clone(), (question.answer + 1).to_string());
            assert!(!all_correct(blue, &answers, AnswerParsing::Lenient));
        }
    }

    #[test]
    fn test_missing_answer_fails() {
        let catalog = Catalog::builtin();
        let blue = catalog.get_team(TeamId::from(1)).unwrap();
        let mut answers = blue_answers();
        answers.remove("q10");
        assert!(!all_correct(blue, &answers, AnswerParsing::Lenient));
    }

    #[test]
    fn test_report() {
        let catalog = Catalog::builtin();
        let blue = catalog.get_team(TeamId::from(1)).unwrap();
        let mut answers = blue_answers();
        answers.insert(QuestionId::from("q3"), "2".to_string());
        answers.insert(QuestionId::from("q7"), "sixteen".to_string());

        let report = Report::new(blue, &answers, AnswerParsing::Lenient);
        assert_eq!(report.marks().len(), 10);
        assert_eq!(report.correct_count(), 8);
        assert_eq!(report.first_failure(), Some(&QuestionId::from("q3")));
        assert_eq!(report.marks()[6].1, Mark::Unreadable);
        assert!(!report.passed());

        let report = Report::new(blue, &blue_answers(), AnswerParsing::Lenient);
        assert!(report.passed());
    }
}
