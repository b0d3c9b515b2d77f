//! Core interview engine
//!
//! The script state machine, the agents that run it, and the session
//! controller that turns agent output into a transcript.

mod agent;
mod script;
mod session;

pub use agent::{AgentError, InterviewAgent, ScriptedAgent, DEFAULT_THINKING_DELAY};
pub use script::{Category, Difficulty, Prompt, Script, ScriptError, ScriptState, Stage, Turn};
pub use session::{
    Exchange, Phase, ResumeArtifact, SessionController, SessionError, SessionSnapshot, StartMode,
    Workspace, DEFAULT_POSITION,
};
