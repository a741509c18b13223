//! Launcher: picks a persona and opens a conversation bound to it.

use crate::ai::{ChatService, GeminiHttpClient};
use crate::exchange::Exchange;
use crate::models::{Config, DisplayEvent, Persona, PromptMode};
use crate::{view, Result};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

pub struct App {
    chat: Arc<dyn ChatService>,
    prompt_mode: PromptMode,
}

impl App {
    /// Build an app from a concrete chat service.
    ///
    /// Useful for tests and harnesses that need to inject mocks.
    pub fn with_service(chat: Arc<dyn ChatService>, prompt_mode: PromptMode) -> Self {
        Self { chat, prompt_mode }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let client = GeminiHttpClient::from_config(config)?;
        info!(
            "Chat provider: Gemini (model: {}, system prompt: {:?})",
            client.model(),
            config.prompt_mode
        );
        Ok(Self::with_service(Arc::new(client), config.prompt_mode))
    }

    /// Open an independent conversation for `persona`.
    pub fn open(&self, persona: Persona) -> (Exchange, UnboundedReceiver<DisplayEvent>) {
        Exchange::new(persona, self.prompt_mode, Arc::clone(&self.chat))
    }

    /// Run the launcher then the chosen conversation over the given streams.
    ///
    /// `persona` skips the menu. Returns without opening a conversation if
    /// input ends before a choice is made.
    pub async fn run<R, W>(&self, persona: Option<Persona>, mut input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let persona = match persona {
            Some(persona) => persona,
            None => match choose_persona(&mut input, out).await? {
                Some(persona) => persona,
                None => return Ok(()),
            },
        };

        info!("Opening conversation with {}", persona);
        let (exchange, events) = self.open(persona);
        view::run(exchange, events, input, out).await
    }
}

/// Numbered launcher menu. Accepts the number or the persona name.
pub async fn choose_persona<R, W>(input: &mut R, out: &mut W) -> Result<Option<Persona>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "Welcome to VitaSync")?;
    for (i, persona) in Persona::ALL.iter().enumerate() {
        writeln!(out, "  {}) {}", i + 1, persona)?;
    }

    let mut line = String::new();
    loop {
        write!(out, "Choose a companion: ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }

        let choice = line.trim();
        let picked = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Persona::ALL.get(i).copied())
            .or_else(|| choice.parse().ok());

        match picked {
            Some(persona) => return Ok(Some(persona)),
            None => writeln!(out, "Please enter 1 or 2.")?,
        }
    }
}
