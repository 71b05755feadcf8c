//! Archon CLI - Interactive system architect advisor
//!
//! Terminal chat client for the Archon server. Model credentials are
//! prompted per session through a masked input and kept in memory only.

mod api;
mod config;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{Input, Password};
use std::fs;

use api::ArchonClient;
use config::Config;

#[derive(Parser)]
#[command(name = "archon")]
#[command(about = "Archon CLI - AI system architect advisor", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive advisor session
    Chat {
        /// Server base URL (overrides config)
        #[arg(long)]
        server: Option<String>,
    },

    /// Store the server API key
    Login {
        /// Server API key (will prompt if not provided)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Check server health
    Health,

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Chat { server } => run_chat(server).await,
        Commands::Login { key } => run_login(key),
        Commands::Health => run_health().await,
        Commands::Config => run_config(),
    }
}

fn client_from_config(config: &Config, server_override: Option<String>) -> ArchonClient {
    let base_url = server_override.unwrap_or_else(|| config.base_url.clone());
    ArchonClient::new(&base_url, config.api_key.clone())
}

fn run_login(key: Option<String>) -> Result<()> {
    let key = match key {
        Some(k) => k,
        None => Password::new()
            .with_prompt("Server API key")
            .interact()?,
    };

    let mut config = Config::load()?;
    config.api_key = Some(key);
    config.save()?;

    println!("{}", "✅ Server API key saved".green());
    Ok(())
}

async fn run_health() -> Result<()> {
    let config = Config::load()?;
    let client = client_from_config(&config, None);

    if client.health().await.unwrap_or(false) {
        println!("{} {}", "✅".green(), config.base_url);
    } else {
        bail!("Server unreachable: {}", config.base_url);
    }
    Ok(())
}

fn run_config() -> Result<()> {
    let config = Config::load()?;
    println!("{}", "Archon CLI configuration".bold());
    println!("  config file : {}", Config::config_path()?.display());
    println!("  server      : {}", config.base_url);
    println!(
        "  server key  : {}",
        if config.api_key.is_some() { "set" } else { "not set" }
    );
    Ok(())
}

async fn run_chat(server: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let base_url = server.unwrap_or_else(|| config.base_url.clone());
    let client = ArchonClient::new(&base_url, config.api_key.clone());

    if !client.health().await.unwrap_or(false) {
        bail!("Server unreachable: {}", base_url);
    }

    println!("{}", "🏛️  Archon - AI System Architect Advisor".bold());
    println!("Model keys are held in memory for this session only.\n");

    // Masked credential entry; empty input leaves a key unset, the server
    // will refuse to run the chain until both are present
    let reasoning_key = Password::new()
        .with_prompt("🔑 Reasoning model API key")
        .allow_empty_password(true)
        .interact()?;
    let explainer_key = Password::new()
        .with_prompt("🔐 Explainer model API key")
        .allow_empty_password(true)
        .interact()?;

    let non_empty = |s: String| if s.trim().is_empty() { None } else { Some(s) };
    let session = client
        .create_session(non_empty(reasoning_key), non_empty(explainer_key))
        .await?;

    if !session.credentials_complete {
        println!(
            "{}",
            "⚠️  One or both model keys are missing - queries will be rejected until both are set"
                .yellow()
        );
    }

    println!(
        "Session {}. Commands: {}\n",
        session.id.to_string().dimmed(),
        "/clear /save [file] /transcript /quit".dimmed()
    );

    loop {
        let line: String = Input::new()
            .with_prompt("you".cyan().to_string())
            .allow_empty(true)
            .interact_text()?;
        let line = line.trim().to_string();

        if line.is_empty() {
            continue;
        }

        match line.split_whitespace().next() {
            Some("/quit") | Some("/exit") => break,
            Some("/clear") => {
                client.clear_transcript(session.id).await?;
                println!("{}\n", "🗑️  Transcript cleared".yellow());
            }
            Some("/transcript") => {
                let transcript = client.transcript(session.id).await?;
                if transcript.entries.is_empty() {
                    println!("{}\n", "(empty)".dimmed());
                }
                for entry in transcript.entries {
                    let role = if entry.role == "user" {
                        entry.role.cyan()
                    } else {
                        entry.role.green()
                    };
                    println!("{}: {}\n", role, entry.text);
                }
            }
            Some("/save") => {
                let filename = line
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or("architecture_explanation.md")
                    .to_string();
                match client.export(session.id).await {
                    Ok(markdown) => {
                        fs::write(&filename, markdown)?;
                        println!("{} {}\n", "📥 Saved to".green(), filename);
                    }
                    Err(e) => println!("{} {}\n", "❌".red(), e),
                }
            }
            _ => {
                println!("{}", "🛠️  Consulting the chain...".dimmed());
                match client.chat(session.id, &line).await {
                    Ok(response) => {
                        println!("\n{}", "📦 Analysis (JSON)".bold());
                        println!("{}\n", response.analysis_raw.dimmed());
                        println!("{}", "💡 Explanation".bold());
                        println!("{}\n", response.explanation.green());
                    }
                    Err(e) => println!("{} {}\n", "❌".red(), e),
                }
            }
        }
    }

    println!("{}", "👋 Session ended".dimmed());
    Ok(())
}
