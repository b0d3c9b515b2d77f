//! Interview session controller
//!
//! Owns the visible transcript for one interview and relays candidate turns
//! to an [`InterviewAgent`]. Only one reply can be in flight at a time: while
//! the agent is thinking, further submissions are rejected rather than queued.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::conversation::{Message, Transcript};

use super::agent::{AgentError, InterviewAgent};

/// Resume file types the setup screen accepts
const RESUME_EXTENSIONS: &[&str] = &["pdf", "docx", "txt"];

pub const DEFAULT_POSITION: &str = "Senior Frontend Engineer";
const DEFAULT_LANGUAGE: &str = "javascript";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Setup,
    Interview,
}

/// How the candidate leaves the setup screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartMode {
    #[serde(rename = "resume")]
    WithResume,
    Demo,
}

/// Uploaded resume. Only the metadata is kept; the contents are never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeArtifact {
    pub file_name: String,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub size: u64,
}

impl ResumeArtifact {
    pub fn new(
        file_name: impl Into<String>,
        media_type: Option<String>,
        size: u64,
    ) -> Result<Self, SessionError> {
        let file_name = file_name.into();

        let supported = Path::new(&file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| RESUME_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);

        if !supported {
            return Err(SessionError::UnsupportedResume(file_name));
        }

        Ok(Self {
            file_name,
            media_type,
            size,
        })
    }
}

/// Scratch code buffer shown beside the chat. Never executed or sent to the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub code: String,
    pub language: String,
}

impl Default for Workspace {
    fn default() -> Self {
        Self {
            code: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Everything the presentation layer may observe
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub awaiting_reply: bool,
    pub position: String,
    pub resume_file_name: Option<String>,
    pub transcript: Vec<Message>,
}

/// Result of one candidate submission
#[derive(Debug, Clone, Serialize)]
pub struct Exchange {
    pub candidate: Message,

    /// `None` when the agent failed; the failure is logged only
    pub reply: Option<Message>,
}

/// Errors from the session controller
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Interview has not started")]
    NotStarted,

    #[error("Interview already started")]
    AlreadyStarted,

    #[error("Attach a resume before starting, or start in demo mode")]
    ResumeRequired,

    #[error("Unsupported resume file: {0}")]
    UnsupportedResume(String),

    #[error("Message is empty")]
    EmptyMessage,

    #[error("Still waiting for the interviewer's reply")]
    Busy,
}

#[derive(Debug)]
struct SessionState {
    phase: Phase,
    resume: Option<ResumeArtifact>,
    transcript: Transcript,
    workspace: Workspace,
}

/// Releases the awaiting-reply latch when dropped, on every exit path
struct BusyGuard(Arc<AtomicBool>);

impl BusyGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Coordinates one interview: setup, seeding, and the turn cycle
pub struct SessionController {
    agent: Mutex<Box<dyn InterviewAgent>>,
    state: RwLock<SessionState>,
    busy: Arc<AtomicBool>,
    position: String,
}

impl SessionController {
    pub fn new(agent: impl InterviewAgent + 'static) -> Self {
        Self {
            agent: Mutex::new(Box::new(agent)),
            state: RwLock::new(SessionState {
                phase: Phase::Setup,
                resume: None,
                transcript: Transcript::new(),
                workspace: Workspace::default(),
            }),
            busy: Arc::new(AtomicBool::new(false)),
            position: DEFAULT_POSITION.to_string(),
        }
    }

    /// Set the position title shown alongside the interview
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
        self
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Attach (or replace) the resume while still in setup
    pub async fn attach_resume(&self, resume: ResumeArtifact) -> Result<(), SessionError> {
        let mut state = self.state.write().await;
        if state.phase != Phase::Setup {
            return Err(SessionError::AlreadyStarted);
        }

        tracing::info!("📄 Resume attached: {}", resume.file_name);
        state.resume = Some(resume);
        Ok(())
    }

    /// Leave setup and seed the transcript with the opening prompt.
    ///
    /// Seeding happens once per session; calling this again after the
    /// interview has started leaves everything untouched.
    pub async fn begin(&self, mode: StartMode) -> Result<(), SessionError> {
        let _busy = {
            let mut state = self.state.write().await;
            if state.phase == Phase::Interview {
                return Ok(());
            }
            if mode == StartMode::WithResume && state.resume.is_none() {
                return Err(SessionError::ResumeRequired);
            }

            let guard = BusyGuard::acquire(&self.busy).ok_or(SessionError::Busy)?;
            state.phase = Phase::Interview;
            guard
        };

        tracing::info!(?mode, "🎤 Interview started");

        let opening = self.agent.lock().await.start().await;
        self.state.write().await.transcript.push(opening);
        Ok(())
    }

    /// Record a candidate turn and wait for the interviewer's reply.
    ///
    /// The candidate message is appended before the agent is consulted, so it
    /// always precedes its reply in the transcript. Agent failures are logged
    /// and leave the turn without a reply.
    ///
    /// The agent turn runs on its own task: dropping the returned future does
    /// not abort it, and the reply still lands in the transcript.
    pub async fn submit(self: &Arc<Self>, text: &str) -> Result<Exchange, SessionError> {
        let candidate = Message::candidate(text);

        let busy = {
            let mut state = self.state.write().await;
            if state.phase != Phase::Interview {
                return Err(SessionError::NotStarted);
            }
            if text.trim().is_empty() {
                return Err(SessionError::EmptyMessage);
            }

            let guard = BusyGuard::acquire(&self.busy).ok_or(SessionError::Busy)?;
            state.transcript.push(candidate.clone());
            guard
        };

        let session = Arc::clone(self);
        let text = text.to_string();
        let turn = tokio::spawn(async move {
            let _busy = busy;
            session.relay(&text).await
        });

        let reply = turn.await.unwrap_or_else(|e| {
            let e = AgentError::Unavailable(e.to_string());
            tracing::error!("Interview turn lost: {}", e);
            None
        });

        Ok(Exchange { candidate, reply })
    }

    async fn relay(&self, text: &str) -> Option<Message> {
        let result = self.agent.lock().await.respond(text).await;

        match result {
            Ok(reply) => {
                self.state.write().await.transcript.push(reply.clone());
                Some(reply)
            }
            Err(e) => {
                tracing::error!("Agent error: {}", e);
                None
            }
        }
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().await;
        SessionSnapshot {
            phase: state.phase,
            awaiting_reply: self.is_awaiting_reply(),
            position: self.position.clone(),
            resume_file_name: state.resume.as_ref().map(|r| r.file_name.clone()),
            transcript: state.transcript.messages().to_vec(),
        }
    }

    pub async fn workspace(&self) -> Workspace {
        self.state.read().await.workspace.clone()
    }

    pub async fn set_code(&self, code: impl Into<String>) -> Workspace {
        let mut state = self.state.write().await;
        state.workspace.code = code.into();
        state.workspace.clone()
    }

    pub async fn reset_code(&self) -> Workspace {
        let mut state = self.state.write().await;
        state.workspace.code.clear();
        state.workspace.clone()
    }
}
