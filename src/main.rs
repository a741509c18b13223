use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vitasync::app::App;
use vitasync::models::{Config, Persona, PromptMode};

#[derive(Debug, Parser)]
#[command(name = "vitasync")]
#[command(about = "Chat with the Coach Nova or Mood Mentor wellness personas")]
struct CliArgs {
    /// Persona to open directly (coach-nova or mood-mentor). Shows a menu when omitted.
    #[arg(short, long, value_parser = parse_persona_arg)]
    persona: Option<Persona>,

    /// Send only the user message, without the persona's system prompt.
    #[arg(long)]
    no_system_prompt: bool,

    /// Gemini model ID, overriding GEMINI_MODEL.
    #[arg(long, value_name = "MODEL")]
    model: Option<String>,
}

fn parse_persona_arg(input: &str) -> std::result::Result<Persona, String> {
    input.parse().map_err(|e: vitasync::Error| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitasync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(model) = args.model {
        config.model = model;
    }
    if args.no_system_prompt {
        config.prompt_mode = PromptMode::Omit;
    }

    let app = App::from_config(&config)?;
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    match app.run(args.persona, stdin, &mut stdout).await {
        Ok(()) => {
            info!("Goodbye");
            Ok(())
        }
        Err(e) => {
            error!("Conversation ended with an error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_persona_arg_valid() {
        assert_eq!(parse_persona_arg("mood-mentor").unwrap(), Persona::MoodMentor);
    }

    #[test]
    fn test_parse_persona_arg_invalid() {
        let err = parse_persona_arg("therapist").unwrap_err();
        assert!(err.contains("coach-nova"));
    }

    #[test]
    fn test_cli_flags() {
        let args = CliArgs::parse_from(["vitasync", "-p", "nova", "--no-system-prompt"]);
        assert_eq!(args.persona, Some(Persona::CoachNova));
        assert!(args.no_system_prompt);
        assert!(args.model.is_none());
    }
}
