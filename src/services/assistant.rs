//! Mock study assistant replies
//!
//! Keyword matching only; the first rule whose keyword appears in the
//! message wins. When the message matches nothing, the optional
//! conversation context is tried before falling back to the introduction.

const STUDY_REPLY: &str = "i'm happy to help you study. what subject?";
const SCHEDULE_REPLY: &str = "lets make a schedule. how many hours a week u tryna study?";
const BREAK_REPLY: &str = "Taking breaks is important! Consider using the Pomodoro technique: \
    25 minutes of focused study followed by a 5-minute break.";
const MOTIVATION_REPLY: &str = "remember to take breaks. try 25 min of studying with 5 min breaks in between.";
const DEFAULT_REPLY: &str = "i'm studybudy. you can ask me about things like creating study plans, \
    finding resources, or managing your study time.";

const RULES: &[(&[&str], &str)] = &[
    (&["study"], STUDY_REPLY),
    (&["schedule"], SCHEDULE_REPLY),
    (&["tired", "break"], BREAK_REPLY),
    (&["motivation"], MOTIVATION_REPLY),
];

fn match_rule(text: &str) -> Option<&'static str> {
    let text = text.to_lowercase();

    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
        .map(|(_, reply)| *reply)
}

/// Pick a canned reply for a user message
pub fn reply(message: &str, context: Option<&str>) -> &'static str {
    match_rule(message)
        .or_else(|| context.and_then(match_rule))
        .unwrap_or(DEFAULT_REPLY)
}
