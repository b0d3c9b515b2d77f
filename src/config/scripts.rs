//! Interview scripts loaded from TOML files
//!
//! # Example Script File
//!
//! ```toml
//! completion_notice = "That's all for today."
//!
//! [[prompts]]
//! id = "q1"
//! text = "Walk me through reversing a linked list."
//! category = "dsa"
//! difficulty = "easy"
//!
//! [[prompts]]
//! id = "q2"
//! text = "Now do it in place."
//! category = "dsa"
//! difficulty = "medium"
//!
//! [[prompts]]
//! id = "q3"
//! text = "Design a feature flag service."
//! category = "system_design"
//! difficulty = "hard"
//!
//! [[prompts]]
//! id = "end"
//! text = "Thanks, we'll be in touch."
//! category = "feedback"
//! difficulty = "n/a"
//! ```

use serde::Deserialize;
use std::path::Path;
use tokio::fs;

use crate::core::{Prompt, Script, ScriptError};

/// On-disk shape of a script
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptFile {
    /// Shown for every turn after the feedback prompt
    #[serde(default = "default_completion_notice")]
    pub completion_notice: String,

    #[serde(default)]
    pub prompts: Vec<Prompt>,
}

fn default_completion_notice() -> String {
    builtin::COMPLETION_NOTICE.to_string()
}

impl ScriptFile {
    pub fn parse(content: &str) -> Result<Self, ScriptFileError> {
        toml::from_str(content).map_err(|e| ScriptFileError::ParseError(e.to_string()))
    }

    pub async fn load(path: &Path) -> Result<Self, ScriptFileError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| ScriptFileError::IoError(format!("{}: {}", path.display(), e)))?;

        Self::parse(&content)
    }

    pub fn into_script(self) -> Result<Script, ScriptFileError> {
        Ok(Script::new(self.prompts, self.completion_notice)?)
    }
}

/// Errors from script loading
#[derive(Debug, thiserror::Error)]
pub enum ScriptFileError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid script: {0}")]
    Invalid(#[from] ScriptError),
}

/// Built-in script text
pub mod builtin {
    pub const TWO_SUM: &str = "Welcome to the technical interview. I'm your AI interviewer. Let's start with a classic Data Structures question. \n\nGiven an array of integers `nums` and an integer `target`, return indices of the two numbers such that they add up to `target`. \n\nCan you explain your approach first?";

    pub const HASH_MAP_FOLLOW_UP: &str = "That's a solid brute force approach. However, for a large dataset, O(N^2) might be too slow. Can you optimize this using a Hash Map to achieve O(N) time complexity?";

    pub const URL_SHORTENER: &str = "Great implementation. Now, let's shift gears to System Design. \n\nDesign a URL shortener service like Bit.ly. What are the key requirements you would consider?";

    pub const FEEDBACK: &str = "Thank you for your time. I've gathered enough data to generate your feedback report. You demonstrated strong problem-solving skills in DSA but could improve on defining non-functional requirements in system design earlier. \n\n**Final Result: Strong Hire.**";

    pub const COMPLETION_NOTICE: &str = "The interview is complete. Refresh to start over.";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Category, Difficulty};

    const SAMPLE_SCRIPT: &str = r#"
completion_notice = "All done."

[[prompts]]
id = "intro"
text = "Tell me about a hard bug you fixed."
category = "dsa"
difficulty = "medium"

[[prompts]]
id = "lru"
text = "Implement an LRU cache."
category = "dsa"
difficulty = "hard"

[[prompts]]
id = "design"
text = "Design a rate limiter."
category = "system_design"
difficulty = "hard"

[[prompts]]
id = "wrap"
text = """
Thanks!

**Final Result: Hire.**
"""
category = "feedback"
difficulty = "n/a"
"#;

    #[test]
    fn test_parse_script() {
        let file = ScriptFile::parse(SAMPLE_SCRIPT).unwrap();
        assert_eq!(file.completion_notice, "All done.");
        assert_eq!(file.prompts.len(), 4);
        assert_eq!(file.prompts[2].category, Category::SystemDesign);
        assert_eq!(file.prompts[3].difficulty, Difficulty::NotApplicable);

        let script = file.into_script().unwrap();
        assert_eq!(script.first().id, "intro");
        assert!(script.prompts()[3].text.contains("Final Result"));
    }

    #[test]
    fn test_default_completion_notice() {
        let minimal = r#"
[[prompts]]
id = "q1"
text = "One"
category = "dsa"
difficulty = "easy"

[[prompts]]
id = "q2"
text = "Two"
category = "dsa"
difficulty = "medium"

[[prompts]]
id = "q3"
text = "Three"
category = "system_design"
difficulty = "hard"

[[prompts]]
id = "end"
text = "Bye"
category = "feedback"
difficulty = "n/a"
"#;

        let script = ScriptFile::parse(minimal).unwrap().into_script().unwrap();
        assert_eq!(script.completion_notice(), builtin::COMPLETION_NOTICE);
    }

    #[test]
    fn test_rejects_short_script() {
        let bad = r#"
[[prompts]]
id = "q1"
text = "Question"
category = "dsa"
difficulty = "easy"
"#;

        let err = ScriptFile::parse(bad).unwrap().into_script().unwrap_err();
        assert!(matches!(err, ScriptFileError::Invalid(ScriptError::WrongLength(1))));
    }

    #[test]
    fn test_rejects_unknown_category() {
        let bad = r#"
[[prompts]]
id = "q1"
text = "Question"
category = "trivia"
difficulty = "easy"
"#;

        assert!(matches!(ScriptFile::parse(bad), Err(ScriptFileError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = ScriptFile::load(Path::new("/nonexistent/script.toml")).await.unwrap_err();
        assert!(matches!(err, ScriptFileError::IoError(_)));
    }
}
