//! Data models and structures
//!
//! Defines the personas, the display events handed to the conversation view,
//! and the runtime configuration.

use crate::{prompts, Error, Result};
use chrono::{DateTime, Local};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Assistant persona a conversation is bound to for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persona {
    CoachNova,
    MoodMentor,
}

impl Persona {
    pub const ALL: [Persona; 2] = [Persona::CoachNova, Persona::MoodMentor];

    pub fn display_name(self) -> &'static str {
        match self {
            Persona::CoachNova => "Coach Nova",
            Persona::MoodMentor => "Mood Mentor",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Persona::CoachNova => "coach-nova",
            Persona::MoodMentor => "mood-mentor",
        }
    }

    /// Canned line the model is told to use for off-topic requests.
    pub fn deflection(self) -> &'static str {
        match self {
            Persona::CoachNova => prompts::COACH_NOVA_DEFLECTION,
            Persona::MoodMentor => prompts::MOOD_MENTOR_DEFLECTION,
        }
    }

    pub fn system_prompt(self) -> String {
        let template = match self {
            Persona::CoachNova => prompts::COACH_NOVA_SYSTEM,
            Persona::MoodMentor => prompts::MOOD_MENTOR_SYSTEM,
        };
        prompts::render(template, &[("deflection", self.deflection())])
    }

    pub fn greeting(self) -> &'static str {
        match self {
            Persona::CoachNova => prompts::COACH_NOVA_GREETING,
            Persona::MoodMentor => prompts::MOOD_MENTOR_GREETING,
        }
    }

    /// Whether transcript lines for this persona carry a timestamp.
    pub fn stamps_transcript(self) -> bool {
        matches!(self, Persona::MoodMentor)
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Persona {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coach-nova" | "coach_nova" | "coachnova" | "nova" | "coach nova" => {
                Ok(Persona::CoachNova)
            }
            "mood-mentor" | "mood_mentor" | "moodmentor" | "mood" | "mood mentor" => {
                Ok(Persona::MoodMentor)
            }
            _ => Err(Error::UnknownPersona(s.to_string())),
        }
    }
}

/// Whether the persona's system prompt rides along with every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptMode {
    #[default]
    Inline,
    Omit,
}

impl FromStr for PromptMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inline" => Ok(PromptMode::Inline),
            "omit" | "none" => Ok(PromptMode::Omit),
            other => Err(Error::Config(format!(
                "VITASYNC_PROMPT_MODE must be 'inline' or 'omit', got '{}'",
                other
            ))),
        }
    }
}

/// One rendering instruction for the conversation view.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayEvent {
    UserEcho(String, Option<DateTime<Local>>),
    AssistantReply(String, Option<DateTime<Local>>),
    Warning(String),
    Error(String),
}

impl DisplayEvent {
    /// Attach a timestamp to echo and reply lines. Warnings and errors are left alone.
    pub fn stamped(self, at: DateTime<Local>) -> Self {
        match self {
            DisplayEvent::UserEcho(text, _) => DisplayEvent::UserEcho(text, Some(at)),
            DisplayEvent::AssistantReply(text, _) => DisplayEvent::AssistantReply(text, Some(at)),
            other => other,
        }
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub prompt_mode: PromptMode,
    pub timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(e.into());
            }
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("GEMINI_API_KEY")
            .ok_or_else(|| Error::Config("GEMINI_API_KEY not set".to_string()))?;

        let prompt_mode = match non_empty("VITASYNC_PROMPT_MODE") {
            Some(raw) => raw.parse()?,
            None => PromptMode::default(),
        };

        let timeout = match non_empty("VITASYNC_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(Error::Config(format!(
                        "VITASYNC_TIMEOUT_SECS must be a positive integer, got '{}'",
                        raw
                    )))
                }
            },
            None => None,
        };

        Ok(Self {
            api_key: api_key.trim().to_string(),
            model: non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: non_empty("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            prompt_mode,
            timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_persona_parsing() {
        assert_eq!("coach-nova".parse::<Persona>().unwrap(), Persona::CoachNova);
        assert_eq!("Mood Mentor".parse::<Persona>().unwrap(), Persona::MoodMentor);
        assert_eq!("nova".parse::<Persona>().unwrap(), Persona::CoachNova);
        assert!(matches!(
            "doctor".parse::<Persona>(),
            Err(Error::UnknownPersona(_))
        ));
    }

    #[test]
    fn test_system_prompt_embeds_deflection() {
        for persona in Persona::ALL {
            let prompt = persona.system_prompt();
            assert!(prompt.contains(persona.deflection()));
            assert!(!prompt.contains("{{"));
        }
        assert!(Persona::CoachNova
            .system_prompt()
            .starts_with("You are Coach Nova"));
        assert!(Persona::MoodMentor
            .system_prompt()
            .contains("Dr Driva (Mood Mentor)"));
    }

    #[test]
    fn test_stamped_only_touches_transcript_lines() {
        let now = Local::now();
        assert_eq!(
            DisplayEvent::AssistantReply("hi".to_string(), None).stamped(now),
            DisplayEvent::AssistantReply("hi".to_string(), Some(now))
        );
        assert_eq!(
            DisplayEvent::Warning("w".to_string()).stamped(now),
            DisplayEvent::Warning("w".to_string())
        );
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "abc")])).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.prompt_mode, PromptMode::Inline);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_config_requires_api_key() {
        let err = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "abc"),
            ("GEMINI_MODEL", "gemini-1.5-pro"),
            ("GEMINI_BASE_URL", "http://localhost:9999"),
            ("VITASYNC_PROMPT_MODE", "omit"),
            ("VITASYNC_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!(config.prompt_mode, PromptMode::Omit);
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_config_rejects_bad_timeout() {
        let err = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "abc"),
            ("VITASYNC_TIMEOUT_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
