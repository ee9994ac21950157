use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use clima_core::{Config, ServiceId, Session, session_from_config};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};

use crate::view::{JsonView, TerminalView};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "clima",
    version,
    about = "Current weather plus a short AI-generated tip"
)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key of a service, e.g. "openweather" or "gemini".
    Configure { service: String },

    /// Show weather and advice for one city.
    Show {
        /// City name as understood by OpenWeather.
        city: String,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for cities until cancelled (the default).
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure { service } => configure(&service),
            Command::Show { city, json } => show(&city, json).await,
            Command::Interactive => interactive().await,
        }
    }
}

fn configure(service: &str) -> anyhow::Result<ExitCode> {
    let id = ServiceId::try_from(service)?;

    // Read the file alone so environment overrides are never persisted.
    let path = Config::config_file_path()?;
    let mut config = Config::load_from(&path)?;

    let api_key = Password::new(&format!("API key for {id}:"))
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("API key prompt aborted")?;

    config.upsert_provider_api_key(id, api_key.trim().to_string());
    config.save_to(&path)?;

    println!("Saved {id} API key to {}", path.display());
    Ok(ExitCode::SUCCESS)
}

async fn show(city: &str, json: bool) -> anyhow::Result<ExitCode> {
    let mut session = load_session()?;

    let outcome = if json {
        let mut view = JsonView::default();
        let outcome = session.search(city, &mut view).await;
        if outcome.is_ok() {
            println!("{}", serde_json::to_string_pretty(&view.to_json())?);
        }
        outcome
    } else {
        let mut view = TerminalView;
        session.search(city, &mut view).await
    };

    if outcome.is_ok() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

async fn interactive() -> anyhow::Result<ExitCode> {
    let mut session = load_session()?;
    let mut view = TerminalView;

    println!("Consulta del clima por ciudad (Esc para salir)");

    loop {
        let prompt = Text::new("Busque una ciudad:")
            .with_placeholder("Ingresar ciudad");
        let city = match prompt.prompt() {
            Ok(city) => city,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city"),
        };

        // Errors were already shown through the view; keep prompting.
        let _ = session.search(&city, &mut view).await;
    }

    Ok(ExitCode::SUCCESS)
}

fn load_session() -> anyhow::Result<Session> {
    let config = Config::load()?;
    Ok(session_from_config(&config))
}
