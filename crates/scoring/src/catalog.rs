//! Reference Catalog
//!
//! The shipped scenario questions: twelve base questions and one calibration
//! question per trait dimension.

use trait_assessment_core::{TraitDimension, TraitVector};

use crate::bank::CalibrationQuestion;
use crate::models::{Question, QuestionKind, QuestionOption};

use TraitDimension::{
    Affinity, Conscientiousness, EmotionalStability, Extraversion, Openness, Positivity,
};

fn traits(pairs: &[(TraitDimension, i32)]) -> TraitVector {
    pairs
        .iter()
        .fold(TraitVector::empty(), |v, (d, w)| v.with(*d, *w))
}

fn opt(value: &str, text: &str, pairs: &[(TraitDimension, i32)]) -> QuestionOption {
    QuestionOption::new(value, text, traits(pairs))
}

/// Base questions 1..=12. Question 12 is dual and receives calibration evidence.
pub fn base_questions() -> Vec<Question> {
    vec![
        Question::new(
            1,
            QuestionKind::Single,
            "Arrival",
            "You arrive at a dinner event where you don't know anyone yet. What do you do first?",
            vec![
                opt("A", "Introduce yourself to the nearest table", &[(Extraversion, 3), (Affinity, 1)])
                    .with_tag("icebreaker"),
                opt("B", "Find the host and ask how the evening will run", &[(Conscientiousness, 2), (EmotionalStability, 1)]),
                opt("C", "Head for the liveliest-looking conversation", &[(Openness, 2), (Extraversion, 1)]),
                opt("D", "Grab a drink and settle in at your own pace", &[(EmotionalStability, 2)]),
            ],
        ),
        Question::new(
            2,
            QuestionKind::Dual,
            "Icebreaker",
            "The host announces an icebreaker game. Which reactions are most like you?",
            vec![
                opt("A", "Volunteer to go first", &[(Extraversion, 4)]).with_tag("spotlight"),
                opt("B", "Play along and cheer everyone on", &[(Positivity, 3), (Affinity, 1)]),
                opt("C", "Suggest a twist to make it more fun", &[(Openness, 3)]),
                opt("D", "Watch a round before joining in", &[(EmotionalStability, 1), (Conscientiousness, 1)]),
            ],
        ),
        Question::new(
            3,
            QuestionKind::Single,
            "Plans Change",
            "The restaurant your group booked cancels an hour before dinner. You...",
            vec![
                opt("A", "Already have a backup list ready", &[(Conscientiousness, 4)]).with_tag("planner"),
                opt("B", "See it as a chance to try somewhere new", &[(Openness, 3), (Positivity, 1)]),
                opt("C", "Stay relaxed and let the group decide", &[(EmotionalStability, 3), (Affinity, 1)]),
                opt("D", "Start a quick poll in the group chat", &[(Extraversion, 2), (Affinity, 2)]),
            ],
        ),
        Question::new(
            4,
            QuestionKind::Dual,
            "Disagreement",
            "Someone at your table shares an opinion you strongly disagree with. How do you respond?",
            vec![
                opt("A", "Ask questions to understand their view", &[(Affinity, 3), (Openness, 1)]),
                opt("B", "State your view calmly and move on", &[(EmotionalStability, 3)]),
                opt("C", "Steer the conversation somewhere lighter", &[(Positivity, 2), (Affinity, 1)]),
                opt("D", "Debate it with enthusiasm", &[(Extraversion, 3)]).with_tag("debater"),
            ],
        ),
        Question::new(
            5,
            QuestionKind::Single,
            "Group Trip",
            "Your group is planning a weekend away. Which role do you usually end up in?",
            vec![
                opt("A", "The one building the itinerary spreadsheet", &[(Conscientiousness, 4)]),
                opt("B", "The one pitching unusual destinations", &[(Openness, 4)]).with_tag("explorer"),
                opt("C", "The one keeping everyone's spirits up", &[(Positivity, 3), (Extraversion, 1)]),
                opt("D", "The one checking everyone is happy with the plan", &[(Affinity, 3)]),
            ],
        ),
        Question::new(
            6,
            QuestionKind::Single,
            "Rough Day",
            "You've had a rough day and a friend texts to ask if you want to hang out.",
            vec![
                opt("A", "Go anyway; being around people helps", &[(Extraversion, 2), (Positivity, 2)]),
                opt("B", "Decline kindly and rest", &[(EmotionalStability, 2), (Conscientiousness, 1)]),
                opt("C", "Invite them over for a quiet night in", &[(Affinity, 2), (EmotionalStability, 1)]),
                opt("D", "Suggest somewhere new to shake off the mood", &[(Openness, 1), (Positivity, 1)]),
            ],
        ),
        Question::new(
            7,
            QuestionKind::Single,
            "Last Minute",
            "A friend has a spare ticket to a concert tonight.",
            vec![
                opt("A", "Say yes straight away", &[(Extraversion, 2), (Openness, 2)]),
                opt("B", "Check tomorrow's schedule first", &[(Conscientiousness, 3)]),
                opt("C", "Go if another close friend comes too", &[(Affinity, 2), (EmotionalStability, 1)]),
                opt("D", "Pass, but ask them to send photos", &[(Positivity, 2)]),
            ],
        ),
        Question::new(
            8,
            QuestionKind::Dual,
            "Shared Project",
            "A teammate's part of a shared project is running late. What are you most likely to do?",
            vec![
                opt("A", "Offer to help them finish", &[(Affinity, 4)]).with_tag("supporter"),
                opt("B", "Reset the timeline and priorities", &[(Conscientiousness, 3)]),
                opt("C", "Stay patient; delays happen", &[(EmotionalStability, 3)]),
                opt("D", "Crack a joke to ease the tension", &[(Positivity, 2), (Extraversion, 1)]),
            ],
        ),
        Question::new(
            9,
            QuestionKind::Single,
            "Free Afternoon",
            "You have a completely free Saturday afternoon.",
            vec![
                opt("A", "Try a workshop you've never done before", &[(Openness, 4)]),
                opt("B", "Finish the chores you planned", &[(Conscientiousness, 3)]),
                opt("C", "Host friends for board games", &[(Extraversion, 2), (Affinity, 2)]),
                opt("D", "Take a long walk to recharge", &[(EmotionalStability, 2), (Positivity, 1)]),
            ],
        ),
        Question::new(
            10,
            QuestionKind::Single,
            "Missed Match",
            "You weren't placed in the event group you were hoping for.",
            vec![
                opt("A", "Assume the next one will be even better", &[(Positivity, 4)]).with_tag("optimist"),
                opt("B", "Shrug it off", &[(EmotionalStability, 3)]),
                opt("C", "Ask the organiser how to get in next time", &[(Conscientiousness, 2), (Extraversion, 1)]),
                opt("D", "Find something else happening that night", &[(Openness, 2), (Extraversion, 1)]),
            ],
        ),
        Question::new(
            11,
            QuestionKind::Dual,
            "Hosting",
            "You're hosting the group at your place for the first time.",
            vec![
                opt("A", "Plan a themed menu nobody has tried", &[(Openness, 3)]),
                opt("B", "Prepare a timed plan for the evening", &[(Conscientiousness, 3)]),
                opt("C", "Make sure everyone gets introduced", &[(Affinity, 3), (Extraversion, 1)]),
                opt("D", "Keep the mood relaxed and upbeat", &[(Positivity, 3)]),
            ],
        ),
        Question::new(
            12,
            QuestionKind::Dual,
            "Reflection",
            "Looking back on a great evening out, what stays with you most?",
            vec![
                opt("A", "The new people you met", &[(Extraversion, 3)]),
                opt("B", "One long, deep conversation", &[(Affinity, 2), (Openness, 1)]),
                opt("C", "How smoothly everything ran", &[(Conscientiousness, 2), (EmotionalStability, 1)]),
                opt("D", "How much you laughed", &[(Positivity, 3)]),
            ],
        ),
    ]
}

/// One single-choice calibration question per dimension, ids 101..=106.
pub fn calibration_questions() -> Vec<CalibrationQuestion> {
    vec![
        CalibrationQuestion::new(
            Affinity,
            Question::new(
                101,
                QuestionKind::Single,
                "Calibration",
                "A newcomer in your group seems left out of the conversation.",
                vec![
                    opt("A", "Pull them into the conversation right away", &[(Affinity, 4)]),
                    opt("B", "Introduce them to someone with shared interests", &[(Affinity, 3), (Extraversion, 1)]),
                    opt("C", "Smile and make room for them at the table", &[(Affinity, 2)]),
                    opt("D", "Assume they'll join in when they're ready", &[(Affinity, 1), (EmotionalStability, 1)]),
                ],
            ),
        ),
        CalibrationQuestion::new(
            Openness,
            Question::new(
                102,
                QuestionKind::Single,
                "Calibration",
                "The group is choosing between a familiar favourite and a cuisine nobody has tried.",
                vec![
                    opt("A", "Push for the new one and get everyone excited", &[(Openness, 4), (Extraversion, 1)]),
                    opt("B", "Vote for the new one", &[(Openness, 3)]),
                    opt("C", "Happy either way", &[(Openness, 2), (EmotionalStability, 1)]),
                    opt("D", "Stick with the favourite", &[(Openness, 1), (Conscientiousness, 1)]),
                ],
            ),
        ),
        CalibrationQuestion::new(
            Conscientiousness,
            Question::new(
                103,
                QuestionKind::Single,
                "Calibration",
                "You signed up to bring a dish to a potluck this weekend.",
                vec![
                    opt("A", "Shop and prep the day before", &[(Conscientiousness, 4)]),
                    opt("B", "Pick a recipe now and shop on the day", &[(Conscientiousness, 3)]),
                    opt("C", "Grab something on the way", &[(Conscientiousness, 2), (EmotionalStability, 1)]),
                    opt("D", "Decide when you get there", &[(Conscientiousness, 1), (Openness, 1)]),
                ],
            ),
        ),
        CalibrationQuestion::new(
            EmotionalStability,
            Question::new(
                104,
                QuestionKind::Single,
                "Calibration",
                "Your message in the group chat has gone unanswered for a whole day.",
                vec![
                    opt("A", "Don't think twice about it", &[(EmotionalStability, 4)]),
                    opt("B", "Assume everyone is busy", &[(EmotionalStability, 3), (Positivity, 1)]),
                    opt("C", "Send a light follow-up", &[(EmotionalStability, 2), (Extraversion, 1)]),
                    opt("D", "Wonder if you said something wrong", &[(EmotionalStability, 1)]),
                ],
            ),
        ),
        CalibrationQuestion::new(
            Extraversion,
            Question::new(
                105,
                QuestionKind::Single,
                "Calibration",
                "At a party the music stops and the room goes quiet.",
                vec![
                    opt("A", "Start a group conversation", &[(Extraversion, 4)]),
                    opt("B", "Chat with the people next to you", &[(Extraversion, 3), (Affinity, 1)]),
                    opt("C", "Offer to fix the playlist", &[(Extraversion, 2), (Conscientiousness, 1)]),
                    opt("D", "Enjoy the quiet for a moment", &[(Extraversion, 1), (EmotionalStability, 1)]),
                ],
            ),
        ),
        CalibrationQuestion::new(
            Positivity,
            Question::new(
                106,
                QuestionKind::Single,
                "Calibration",
                "It starts raining on the day of your outdoor picnic.",
                vec![
                    opt("A", "Turn it into an indoor picnic party", &[(Positivity, 4), (Openness, 1)]),
                    opt("B", "Wait it out; it'll clear up", &[(Positivity, 3)]),
                    opt("C", "Reschedule for next weekend", &[(Positivity, 2), (Conscientiousness, 1)]),
                    opt("D", "Call it off for today", &[(Positivity, 1)]),
                ],
            ),
        ),
    ]
}
