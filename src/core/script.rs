//! Interview script as a data-driven state machine
//!
//! A [`Script`] is an ordered table of prompts. The interview's position in
//! it is a [`ScriptState`] cursor, and [`Script::advance`] is the pure
//! transition `(state, input) -> (state', turn)` used by the agent. The
//! candidate's input is accepted but never inspected.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::config::scripts_builtin;
use crate::conversation::INITIAL_MESSAGE_ID;

/// One scripted interviewer turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub text: String,
    pub category: Category,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "dsa")]
    DataStructuresAndAlgorithms,
    #[serde(rename = "system_design")]
    SystemDesign,
    #[serde(rename = "feedback")]
    Feedback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    #[serde(rename = "n/a")]
    NotApplicable,
}

/// Cursor into a script. Starts at 0 and grows by one per candidate turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptState {
    step: usize,
}

impl ScriptState {
    pub fn start() -> Self {
        Self::default()
    }

    pub fn step(&self) -> usize {
        self.step
    }
}

/// Coarse position of a cursor within a particular script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Started,
    InProgress,
    Terminal,
}

/// What the interviewer says after a candidate turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn<'a> {
    Prompt(&'a Prompt),
    /// The feedback prompt has already been delivered
    Complete(&'a str),
}

impl<'a> Turn<'a> {
    pub fn text(&self) -> &'a str {
        match *self {
            Turn::Prompt(prompt) => &prompt.text,
            Turn::Complete(notice) => notice,
        }
    }
}

/// Number of prompts in every script, the feedback prompt included
pub const SCRIPT_LENGTH: usize = 4;

/// Errors from building a script
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("Script must have exactly {SCRIPT_LENGTH} prompts, found {0}")]
    WrongLength(usize),

    #[error("Prompt id must not be empty")]
    EmptyId,

    #[error("Prompt id '{0}' is reserved")]
    ReservedId(String),

    #[error("Duplicate prompt id: {0}")]
    DuplicateId(String),

    #[error("Last prompt '{0}' must be in the feedback category")]
    MissingFeedback(String),
}

/// Ordered, immutable interview script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    prompts: Vec<Prompt>,
    completion_notice: String,
}

impl Script {
    /// Build a validated script of [`SCRIPT_LENGTH`] prompts. The final
    /// prompt must be the feedback turn.
    pub fn new(
        prompts: Vec<Prompt>,
        completion_notice: impl Into<String>,
    ) -> Result<Self, ScriptError> {
        if prompts.len() != SCRIPT_LENGTH {
            return Err(ScriptError::WrongLength(prompts.len()));
        }

        let last = &prompts[SCRIPT_LENGTH - 1];
        if last.category != Category::Feedback {
            return Err(ScriptError::MissingFeedback(last.id.clone()));
        }

        let mut seen = HashSet::new();
        for prompt in &prompts {
            if prompt.id.trim().is_empty() {
                return Err(ScriptError::EmptyId);
            }
            if prompt.id == INITIAL_MESSAGE_ID {
                return Err(ScriptError::ReservedId(prompt.id.clone()));
            }
            if !seen.insert(prompt.id.as_str()) {
                return Err(ScriptError::DuplicateId(prompt.id.clone()));
            }
        }

        Ok(Self {
            prompts,
            completion_notice: completion_notice.into(),
        })
    }

    /// The four-step technical interview shipped with the service
    pub fn builtin() -> Self {
        let prompt = |id: &str, text: &str, category, difficulty| Prompt {
            id: id.to_string(),
            text: text.to_string(),
            category,
            difficulty,
        };

        Self {
            prompts: vec![
                prompt(
                    "q1",
                    scripts_builtin::TWO_SUM,
                    Category::DataStructuresAndAlgorithms,
                    Difficulty::Easy,
                ),
                prompt(
                    "q2",
                    scripts_builtin::HASH_MAP_FOLLOW_UP,
                    Category::DataStructuresAndAlgorithms,
                    Difficulty::Medium,
                ),
                prompt(
                    "q3",
                    scripts_builtin::URL_SHORTENER,
                    Category::SystemDesign,
                    Difficulty::Hard,
                ),
                prompt(
                    "end",
                    scripts_builtin::FEEDBACK,
                    Category::Feedback,
                    Difficulty::NotApplicable,
                ),
            ],
            completion_notice: scripts_builtin::COMPLETION_NOTICE.to_string(),
        }
    }

    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn last_index(&self) -> usize {
        self.prompts.len() - 1
    }

    pub fn completion_notice(&self) -> &str {
        &self.completion_notice
    }

    /// Opening prompt, returned on every (re)start
    pub fn first(&self) -> &Prompt {
        &self.prompts[0]
    }

    pub fn stage(&self, state: ScriptState) -> Stage {
        match state.step {
            0 => Stage::Started,
            step if step >= self.last_index() => Stage::Terminal,
            _ => Stage::InProgress,
        }
    }

    /// Advance the cursor by one candidate turn.
    ///
    /// The feedback prompt is produced exactly once, on the turn that first
    /// lands on the last index. Every later turn yields the completion notice.
    pub fn advance(&self, state: ScriptState, _input: &str) -> (ScriptState, Turn<'_>) {
        let next = ScriptState {
            step: state.step.saturating_add(1),
        };

        let turn = match self.prompts.get(next.step) {
            Some(prompt) => Turn::Prompt(prompt),
            None => Turn::Complete(&self.completion_notice),
        };

        (next, turn)
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(script: &Script, turns: usize) -> Vec<String> {
        let mut state = ScriptState::start();
        let mut out = Vec::new();
        for _ in 0..turns {
            let (next, turn) = script.advance(state, "anything");
            out.push(turn.text().to_string());
            state = next;
        }
        out
    }

    #[test]
    fn test_builtin_shape() {
        let script = Script::builtin();
        assert_eq!(script.len(), 4);

        let ids: Vec<_> = script.prompts().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2", "q3", "end"]);

        assert_eq!(script.first().category, Category::DataStructuresAndAlgorithms);
        assert_eq!(script.first().difficulty, Difficulty::Easy);
        assert_eq!(script.prompts()[2].category, Category::SystemDesign);
        assert_eq!(script.prompts()[3].difficulty, Difficulty::NotApplicable);

        // builtin must satisfy the same rules as loaded scripts
        let rebuilt = Script::new(script.prompts().to_vec(), script.completion_notice());
        assert_eq!(rebuilt, Ok(script));
    }

    #[test]
    fn test_advance_walks_script_then_completes() {
        let script = Script::builtin();
        let texts = run(&script, 6);

        assert_eq!(texts[0], script.prompts()[1].text);
        assert_eq!(texts[1], script.prompts()[2].text);
        assert_eq!(texts[2], script.prompts()[3].text);
        assert!(texts[2].contains("Strong Hire"));
        assert_eq!(texts[3], script.completion_notice());
        assert_eq!(texts[4], script.completion_notice());
        assert_eq!(texts[5], script.completion_notice());

        let feedback_count = texts.iter().filter(|t| t.contains("Strong Hire")).count();
        assert_eq!(feedback_count, 1);
    }

    #[test]
    fn test_advance_ignores_input() {
        let script = Script::builtin();
        let state = ScriptState::start();
        let (a, turn_a) = script.advance(state, "");
        let (b, turn_b) = script.advance(state, "a very different answer");
        assert_eq!(a, b);
        assert_eq!(turn_a, turn_b);
    }

    #[test]
    fn test_stage_progression() {
        let script = Script::builtin();
        let mut state = ScriptState::start();
        assert_eq!(script.stage(state), Stage::Started);

        for expected in [Stage::InProgress, Stage::InProgress, Stage::Terminal, Stage::Terminal] {
            state = script.advance(state, "").0;
            assert_eq!(script.stage(state), expected);
        }

        assert_eq!(state.step(), 4);
    }

    fn question(id: &str) -> Prompt {
        Prompt {
            id: id.into(),
            text: format!("question {id}"),
            category: Category::SystemDesign,
            difficulty: Difficulty::Hard,
        }
    }

    fn feedback() -> Prompt {
        Prompt {
            id: "end".into(),
            text: "done".into(),
            category: Category::Feedback,
            difficulty: Difficulty::NotApplicable,
        }
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            Script::new(vec![question("q1"), question("q2"), question("q3"), question("q4")], "x"),
            Err(ScriptError::MissingFeedback("q4".into()))
        );
        assert_eq!(
            Script::new(vec![question("q1"), question("q1"), question("q3"), feedback()], "x"),
            Err(ScriptError::DuplicateId("q1".into()))
        );
        assert_eq!(
            Script::new(vec![question("init"), question("q2"), question("q3"), feedback()], "x"),
            Err(ScriptError::ReservedId("init".into()))
        );
        assert_eq!(
            Script::new(vec![question("  "), question("q2"), question("q3"), feedback()], "x"),
            Err(ScriptError::EmptyId)
        );

        let script =
            Script::new(vec![question("q1"), question("q2"), question("q3"), feedback()], "x")
                .unwrap();
        assert_eq!(run(&script, 4), vec!["question q2", "question q3", "done", "x"]);
    }

    #[test]
    fn test_script_length_is_fixed() {
        assert_eq!(Script::new(vec![], "x"), Err(ScriptError::WrongLength(0)));
        assert_eq!(
            Script::new(vec![feedback()], "x"),
            Err(ScriptError::WrongLength(1))
        );
        assert_eq!(
            Script::new(
                vec![question("q1"), question("q2"), question("q3"), question("q4"), feedback()],
                "x"
            ),
            Err(ScriptError::WrongLength(5))
        );
    }
}
