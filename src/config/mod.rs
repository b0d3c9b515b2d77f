//! Application configuration

pub mod scripts;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{Script, DEFAULT_POSITION, DEFAULT_THINKING_DELAY};

pub use scripts::{builtin as scripts_builtin, ScriptFile, ScriptFileError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub thinking_delay_ms: u64,
    pub script_path: Option<PathBuf>,
    pub position: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".into()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            thinking_delay_ms: lookup("INTERVIEW_THINKING_DELAY_MS")
                .and_then(|d| d.parse().ok())
                .unwrap_or(DEFAULT_THINKING_DELAY.as_millis() as u64),
            script_path: lookup("INTERVIEW_SCRIPT")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            position: lookup("INTERVIEW_POSITION")
                .unwrap_or_else(|| DEFAULT_POSITION.into()),
        }
    }

    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }

    /// Load the configured script, falling back to the built-in one
    pub async fn load_script(&self) -> Result<Script, ScriptFileError> {
        match &self.script_path {
            Some(path) => {
                let script = ScriptFile::load(path).await?.into_script()?;
                tracing::info!(
                    "📜 Loaded interview script from {} ({} prompts)",
                    path.display(),
                    script.len()
                );
                Ok(script)
            }
            None => Ok(Script::builtin()),
        }
    }
}
