//! Persona-bound conversation exchange.
//!
//! Each submission builds one request, sends it on its own task, and delivers
//! exactly one [`DisplayEvent`] for the reply. Overlapping submissions are not
//! serialized: replies arrive in whatever order their calls complete.

use crate::ai::{build_request, parse_reply, ChatService};
use crate::models::{DisplayEvent, Persona, PromptMode};
use chrono::Local;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, Instrument};
use uuid::Uuid;

pub struct Exchange {
    persona: Persona,
    prompt_mode: PromptMode,
    chat: Arc<dyn ChatService>,
    events: UnboundedSender<DisplayEvent>,
}

impl Exchange {
    /// Create an exchange and the receiving end of its event stream.
    pub fn new(
        persona: Persona,
        prompt_mode: PromptMode,
        chat: Arc<dyn ChatService>,
    ) -> (Self, UnboundedReceiver<DisplayEvent>) {
        let (events, receiver) = tokio::sync::mpsc::unbounded_channel();
        (
            Self {
                persona,
                prompt_mode,
                chat,
                events,
            },
            receiver,
        )
    }

    pub fn persona(&self) -> Persona {
        self.persona
    }

    /// Submit raw user input.
    ///
    /// Blank input is ignored and returns `None`. Otherwise the user line is
    /// echoed immediately and the reply is delivered later by the returned task.
    pub fn submit(&self, raw: &str) -> Option<JoinHandle<()>> {
        let request = build_request(self.persona, self.prompt_mode, raw)?;
        let message = request.user_message().unwrap_or_default().to_string();

        deliver(
            &self.events,
            stamp(self.persona, DisplayEvent::UserEcho(message, None)),
        );

        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("exchange", persona = self.persona.slug(), %request_id);
        let chat = Arc::clone(&self.chat);
        let events = self.events.clone();
        let persona = self.persona;

        Some(tokio::spawn(
            async move {
                info!("Sending message");
                let outcome = chat.generate_content(&request).await;
                let event = parse_reply(outcome);
                info!(outcome = event_kind(&event), "Reply received");

                deliver(&events, stamp(persona, event));
            }
            .instrument(span),
        ))
    }
}

fn stamp(persona: Persona, event: DisplayEvent) -> DisplayEvent {
    if persona.stamps_transcript() {
        event.stamped(Local::now())
    } else {
        event
    }
}

fn deliver(events: &UnboundedSender<DisplayEvent>, event: DisplayEvent) {
    if events.send(event).is_err() {
        debug!("Conversation view closed; dropping event");
    }
}

fn event_kind(event: &DisplayEvent) -> &'static str {
    match event {
        DisplayEvent::UserEcho(..) => "echo",
        DisplayEvent::AssistantReply(..) => "reply",
        DisplayEvent::Warning(_) => "warning",
        DisplayEvent::Error(_) => "error",
    }
}
