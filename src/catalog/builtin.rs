//! The catalog authored for the event: four colour-coded teams, each with
//! ten inverted-arithmetic questions and a clue to their first task.

use super::{
    Catalog,
    color::Color,
    team::{Question, Reward, Team, TeamId},
};
use crate::rules::RuleBook;

/// Closing paragraph of the instructions, after the operator list
const INSTRUCTIONS_OUTRO: &str =
    "Complete the problems following these directions. You must get 100% to unlock your clue.";

/// Instructions shown above every team's questions
pub fn instructions(rules: &RuleBook) -> String {
    format!(
        "In the following simple arithmetic problems:\n{}\n\n{INSTRUCTIONS_OUTRO}",
        rules.describe()
    )
}

/// Builds the event catalog
pub(super) fn catalog() -> Catalog {
    let rules = RuleBook::default();
    Catalog {
        instructions: instructions(&rules),
        rules,
        teams: teams(),
    }
}

#[allow(clippy::too_many_lines)]
fn teams() -> Vec<Team> {
    vec![
        Team {
            id: TeamId::from(1),
            name: "Team 1 – Blue".to_string(),
            color: Color::rgb(0x19, 0x76, 0xd2),
            contrast_text: Color::WHITE,
            questions: vec![
                Question::new("q1", "8 + 2", 16),
                Question::new("q2", "9 + 11", 99),
                Question::new("q3", "4 x 3", 1),
                Question::new("q4", "6 ÷ 2", 8),
                Question::new("q5", "9 − 3", 3),
                Question::new("q6", "7 x 4", 3),
                Question::new("q7", "4 + 4", 16),
                Question::new("q8", "8 − 4", 2),
                Question::new("q9", "12 x 2", 10),
                Question::new("q10", "20 − 10", 2),
            ],
            reward: Reward {
                success_message: "✅ All answers correct – well done, Blue Team!".to_string(),
                riddle: "You’ve counted the cash and seen what you win,\n\
Now go where journeys often begin.\n\
No wheels, no road, just height in view,\n\
Find the flat rooftop where choppers flew."
                .to_string(),
                task_title: "Task 1: \"Shadow Balance Sheet\"".to_string(),
                task_description: "• Use your bodies and shadows on the ground to create a Balance Sheet.\n\
• One group is Assets, one group is Liabilities, and one person can be Equity in the middle.\n\
• Arrange yourselves so the shapes clearly show these three parts.\n\
• Take one group photo of your “shadow balance sheet” and show it to the facilitator."
                .to_string(),
            },
        },
        Team {
            id: TeamId::from(2),
            name: "Team 2 – Yellow".to_string(),
            color: Color::rgb(0xfb, 0xc0, 0x2d),
            contrast_text: Color::BLACK,
            questions: vec![
                Question::new("q11", "9 − 1", 9),
                Question::new("q12", "5 + 6", 30),
                Question::new("q13", "2 x 1", 1),
                Question::new("q14", "10 − 5", 2),
                Question::new("q15", "12 + 2", 24),
                Question::new("q16", "6 ÷ 6", 12),
                Question::new("q17", "8 + 5", 40),
                Question::new("q18", "6 + 6", 36),
                Question::new("q19", "17 x 2", 15),
                Question::new("q20", "14 ÷ 7", 21),
            ],
            reward: Reward {
                success_message: "✅ All answers correct – great job, Yellow Team!".to_string(),
                riddle: "You’ve found what’s left after tax and spend,\n\
Now go where fun and motion blend.\n\
Seats on chains that move with a pull,\n\
Right by the side of the shining pool."
                .to_string(),
                task_title: "Task 1: \"Bear Market Hang-In\"".to_string(),
                task_description: "• Use the swings safely to hang on in creative ways (sitting, holding chains, posing underneath, etc.).\n\
• While you hang, show determined / resilient expressions, as if surviving a tough “bear market”.\n\
• Make sure everyone appears in at least one photo.\n\
• Take one big team photo that shows how you “hang in there together”."
                .to_string(),
            },
        },
        Team {
            id: TeamId::from(3),
            name: "Team 3 – Green".to_string(),
            color: Color::rgb(0x2e, 0x7d, 0x32),
            contrast_text: Color::WHITE,
            questions: vec![
                Question::new("q21", "14 − 7", 2),
                Question::new("q22", "6 x 5", 1),
                Question::new("q23", "8 + 3", 24),
                Question::new("q24", "7 x 2", 5),
                Question::new("q25", "9 + 2", 18),
                Question::new("q26", "8 − 4", 2),
                Question::new("q27", "9 + 6", 54),
                Question::new("q28", "1 ÷ 1", 2),
                Question::new("q29", "8 x 7", 1),
                Question::new("q30", "13 − 1", 13),
            ],
            reward: Reward {
                success_message: "✅ All answers correct – nice work, Green Team!".to_string(),
                riddle: "You’ve found the profit, the sums are sound,\n\
Now look for white lines on level ground.\n\
A net stretched tight from side to side,\n\
Where yellow balls in rallies glide."
                .to_string(),
                task_title: "Task 1: \"Target Allocation Serve\"".to_string(),
                task_description: "• Mark 2–3 target zones on the court using cones, bottles, or jackets.\n\
• Each zone represents something like Growth, Savings, or Risk Management.\n\
• Team members take turns gently serving or hitting the ball, trying to land it in a called-out zone (e.g., “Hit Growth!”).\n\
• Log a few successful hits in different zones then report to the facilitator."
                .to_string(),
            },
        },
        Team {
            id: TeamId::from(4),
            name: "Team 4 – Red".to_string(),
            color: Color::rgb(0xd3, 0x2f, 0x2f),
            contrast_text: Color::WHITE,
            questions: vec![
                Question::new("q31", "16 − 4", 4),
                Question::new("q32", "8 x 2", 6),
                Question::new("q33", "9 ÷ 9", 18),
                Question::new("q34", "6 x 2", 4),
                Question::new("q35", "8 + 4", 32),
                Question::new("q36", "10 − 2", 5),
                Question::new("q37", "4 − 1", 4),
                Question::new("q38", "18 − 3", 6),
                Question::new("q39", "8 + 2", 16),
                Question::new("q40", "15 x 3", 12),
            ],
            reward: Reward {
                success_message: "✅ All answers correct – awesome job, Red Team!".to_string(),
                riddle: "Your profit is clear, the sums are done,\n\
Now search for a place with shade and sun.\n\
Leaves and branches, flowers in view,\n\
A calm green space that’s waiting for you."
                .to_string(),
                task_title: "Task 1: \"Long-Term Investment Hug\"".to_string(),
                task_description: "• Choose a tree or small group of trees.\n\
• Everyone should hug or touch the tree(s), symbolizing a long-term investment you plan to nurture.\n\
• Arrange yourselves so the tree is clearly visible in the middle, with the team around it smiling.\n\
• Take one group photo of your “long-term investment hug”."
                .to_string(),
            },
        },
    ]
}
