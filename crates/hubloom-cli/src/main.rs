//! hubloom CLI - human-in-the-loop content hub generation
//!
//! Usage:
//!   hubloom init                 Initialize a workspace in the current directory
//!   hubloom generate <topic>     Generate a hub interactively
//!   hubloom check <file>         Check a hub file's integrity
//!   hubloom agents               List available assemblers and personas
//!   hubloom describe <file>      Infer an agent description from its truth log

mod console;
mod workspace;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use hubloom_agents::TruthLog;
use hubloom_core::{parse_artifact, HubRequest, HubloomError};
use hubloom_orchestrator::{Pipeline, RunConfig};
use hubloom_provider::{AnthropicProvider, CompletionOptions, CompletionProvider};
use hubloom_registry::{id_from_filename, Registry};
use hubloom_validation::{check_integrity, ValidationReport};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::console::ConsoleChannel;
use crate::workspace::Workspace;

#[derive(Parser)]
#[command(name = "hubloom")]
#[command(author, version, about = "Human-in-the-loop content hub generation")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Workspace root (defaults to current directory)
    #[arg(long, default_value = ".")]
    path: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a hubloom workspace
    Init,

    /// Generate a content hub interactively
    Generate {
        /// Topic the hub covers
        topic: String,

        /// What the hub should achieve
        #[arg(long, default_value = "")]
        goal: String,

        /// Who the hub is written for
        #[arg(long, default_value = "")]
        audience: String,

        /// Target language (defaults to workspace config)
        #[arg(long)]
        language: Option<String>,

        /// Hub id (defaults to a slug of the topic)
        #[arg(long)]
        id: Option<String>,

        /// Override the configured model
        #[arg(long)]
        model: Option<String>,

        /// Override the configured attempt budget
        #[arg(long)]
        max_attempts: Option<usize>,
    },

    /// Check a hub file's structural and referential integrity
    Check {
        /// Path to the hub document
        file: PathBuf,

        /// Expected persona id
        #[arg(long)]
        persona: String,

        /// Expected language
        #[arg(long, default_value = "English")]
        language: String,
    },

    /// List available assemblers and personas
    Agents,

    /// Infer an agent description from its recorded truths
    Describe {
        /// Path to the agent artifact
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let workspace = Workspace::new(&cli.path);

    match cli.command {
        Commands::Init => {
            workspace.init()?;
            println!("Initialized hubloom workspace at {}", cli.path.display());
        }

        Commands::Generate {
            topic,
            goal,
            audience,
            language,
            id,
            model,
            max_attempts,
        } => {
            let config = workspace.config()?;
            let api_key = std::env::var(&config.models.api_key_env).with_context(|| {
                format!("API key environment variable {} not set", config.models.api_key_env)
            })?;

            let mut run_config = RunConfig::from_config(&config, api_key);
            if let Some(model) = model {
                run_config.model = model;
            }
            if let Some(max_attempts) = max_attempts {
                run_config.max_attempts = max_attempts;
            }

            let request = HubRequest::new(id.unwrap_or_else(|| slug(&topic)), topic)
                .with_goal(goal)
                .with_audience(audience)
                .with_language(language.unwrap_or(config.pipeline.language));

            let registry = Registry::new(workspace.store());
            let provider = AnthropicProvider::new();
            let channel = ConsoleChannel::new();
            let mut pipeline = Pipeline::new(&registry, &provider, &channel, run_config);

            let result = pipeline.run(&request).await?;
            let path = workspace.save_hub(&result.artifact)?;
            info!("Hub saved to {}", path.display());

            for failure in &result.failed_sections {
                println!("Section failed: {} ({})", failure.heading, failure.reason);
            }

            // Re-check the persisted file, not just the in-memory artifact
            let report = check_integrity(
                &path,
                &result.artifact.frontmatter.persona_id,
                &result.artifact.frontmatter.language,
            )?;
            print_report(&report);
            println!("Hub written to {}", path.display());
        }

        Commands::Check {
            file,
            persona,
            language,
        } => {
            let report = check_integrity(&file, &persona, &language)?;
            print_report(&report);
            if !report.is_valid {
                std::process::exit(1);
            }
        }

        Commands::Agents => {
            let registry = Registry::new(workspace.store());
            let manifest = registry.manifest();
            println!("Assemblers:");
            for entry in &manifest.assemblers {
                println!("  {} - {}", entry.id, entry.description);
            }
            println!("Personas:");
            for entry in &manifest.personas {
                println!("  {} - {}", entry.id, entry.description);
            }
        }

        Commands::Describe { file } => {
            let config = workspace.config()?;
            let api_key = std::env::var(&config.models.api_key_env).with_context(|| {
                format!("API key environment variable {} not set", config.models.api_key_env)
            })?;

            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let parsed = parse_artifact(&raw);
            let log = TruthLog::parse(&parsed.body);
            if log.is_empty() {
                bail!("{} contains no recorded truths", file.display());
            }

            let name = file
                .file_name()
                .map(|n| id_from_filename(&n.to_string_lossy()).to_string())
                .unwrap_or_default();
            let prompt = log.inferred_description_prompt(&name);

            let provider = AnthropicProvider::new();
            let options = CompletionOptions::new(api_key, config.models.default);
            let description = provider
                .execute(&prompt, &options)
                .await
                .map_err(HubloomError::from)?;
            println!("{}", description.trim());
        }
    }

    Ok(())
}

fn print_report(report: &ValidationReport) {
    if report.is_valid {
        println!("Integrity check: OK");
    } else {
        println!("Integrity check: {} issue(s)", report.issues.len());
        for issue in &report.issues {
            println!("  - {}", issue);
        }
    }
}

/// Derive a filesystem-safe hub id from a topic
fn slug(topic: &str) -> String {
    let mut slug = String::new();
    for c in topic.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug() {
        assert_eq!(slug("Sourdough at Home"), "sourdough-at-home");
        assert_eq!(slug("  Baking 101! "), "baking-101");
        assert_eq!(slug("---"), "");
    }
}
