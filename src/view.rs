//! Line-oriented conversation view.
//!
//! Reads user lines from any async reader, submits them to an [`Exchange`],
//! and appends rendered [`DisplayEvent`]s to a writer as they arrive.

use crate::exchange::Exchange;
use crate::models::{DisplayEvent, Persona};
use crate::Result;
use chrono::{DateTime, Local};
use std::borrow::Cow;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};

const QUIT_COMMANDS: [&str; 2] = ["/quit", "/exit"];

pub fn render_header(persona: Persona) -> String {
    format!("Chat with {}\n{}", persona.display_name(), persona.greeting())
}

pub fn render(persona: Persona, event: &DisplayEvent) -> String {
    match event {
        DisplayEvent::UserEcho(text, at) => format!("{}You: {}", prefix(at), text),
        DisplayEvent::AssistantReply(text, at) => {
            format!("{}{}: {}", prefix(at), persona.display_name(), text)
        }
        DisplayEvent::Warning(message) => format!("Warning: {}", message),
        DisplayEvent::Error(message) => format!("Error: {}", message),
    }
}

fn prefix(at: &Option<DateTime<Local>>) -> String {
    at.map(|t| format!("[{}] ", t.format("%H:%M")))
        .unwrap_or_default()
}

/// Drive one conversation until input ends or the user quits.
///
/// At end of input, replies still in flight are awaited and rendered. An
/// explicit quit returns immediately and any late replies are discarded.
pub async fn run<R, W>(
    exchange: Exchange,
    mut events: UnboundedReceiver<DisplayEvent>,
    mut input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let persona = exchange.persona();
    writeln!(out, "{}", render_header(persona))?;
    out.flush()?;

    // Raw bytes so a line that is not valid UTF-8 is decoded lossily instead of ending input.
    let mut buf = Vec::new();
    let mut exchange = Some(exchange);

    loop {
        tokio::select! {
            read = input.read_until(b'\n', &mut buf), if exchange.is_some() => {
                if read? == 0 {
                    // Dropping the exchange closes the channel once in-flight replies land.
                    exchange = None;
                    continue;
                }

                let line = decode_line(&buf);
                buf.clear();

                if QUIT_COMMANDS.contains(&line.trim()) {
                    info!("Leaving conversation with {}", persona);
                    return Ok(());
                }
                if let Some(exchange) = &exchange {
                    exchange.submit(&line);
                }
            }
            event = events.recv() => {
                match event {
                    Some(event) => {
                        writeln!(out, "{}", render(persona, &event))?;
                        out.flush()?;
                    }
                    None => return Ok(()),
                }
            }
        }
    }
}

fn decode_line(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    if matches!(text, Cow::Owned(_)) {
        warn!("Input line was not valid UTF-8; replaced invalid bytes");
    }
    text.trim_end_matches(['\n', '\r']).to_string()
}
