//! Interview agents
//!
//! [`InterviewAgent`] is the seam between the session controller and whatever
//! produces interviewer turns. [`ScriptedAgent`] runs a fixed [`Script`] and
//! never looks at what the candidate wrote.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::conversation::Message;

use super::script::{Script, ScriptState, Stage, Turn};

/// Simulated "thinking" latency before each reply
pub const DEFAULT_THINKING_DELAY: Duration = Duration::from_millis(1500);

/// Errors from an agent turn
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("Agent unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait InterviewAgent: Send + Sync {
    /// Reset to the opening prompt and return it
    async fn start(&mut self) -> Message;

    /// Produce the interviewer's reply to one candidate turn.
    ///
    /// Once called the turn always runs to completion; there is no
    /// cancellation path.
    async fn respond(&mut self, candidate_text: &str) -> Result<Message, AgentError>;
}

/// Agent that walks a script one prompt per candidate turn
#[derive(Debug, Clone)]
pub struct ScriptedAgent {
    script: Arc<Script>,
    state: ScriptState,
    thinking_delay: Duration,
}

impl ScriptedAgent {
    pub fn new(script: Arc<Script>) -> Self {
        Self {
            script,
            state: ScriptState::start(),
            thinking_delay: DEFAULT_THINKING_DELAY,
        }
    }

    /// Override the thinking delay (zero disables it)
    pub fn with_thinking_delay(mut self, delay: Duration) -> Self {
        self.thinking_delay = delay;
        self
    }

    /// Current cursor (`currentStep`)
    pub fn state(&self) -> ScriptState {
        self.state
    }

    pub fn stage(&self) -> Stage {
        self.script.stage(self.state)
    }
}

impl Default for ScriptedAgent {
    fn default() -> Self {
        Self::new(Arc::new(Script::builtin()))
    }
}

#[async_trait]
impl InterviewAgent for ScriptedAgent {
    async fn start(&mut self) -> Message {
        self.state = ScriptState::start();
        tracing::debug!("Interview script reset to '{}'", self.script.first().id);
        Message::opening(self.script.first().text.clone())
    }

    async fn respond(&mut self, candidate_text: &str) -> Result<Message, AgentError> {
        if !self.thinking_delay.is_zero() {
            tokio::time::sleep(self.thinking_delay).await;
        }

        let (next, turn) = self.script.advance(self.state(), candidate_text);
        self.state = next;

        match turn {
            Turn::Prompt(prompt) => tracing::debug!(
                step = next.step(),
                stage = ?self.stage(),
                prompt = %prompt.id,
                "Advanced interview script"
            ),
            Turn::Complete(_) => {
                tracing::debug!(step = next.step(), "Interview script already complete")
            }
        }

        Ok(Message::interviewer(turn.text()))
    }
}
