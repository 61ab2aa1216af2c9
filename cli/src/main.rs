mod input;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use input::InstructionFile;
use mealplan_core::llm::{create_provider_from_env, LlmError};
use mealplan_core::{
    InstructionQualityValidator, LlmInstructionGenerator, QualityConfig, QualityGate,
    QualityPolicy, DEFAULT_MAX_ATTEMPTS,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mealplan")]
#[command(about = "Meal planner recipe-instruction quality tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate recipe instructions and print the verdict as JSON
    Validate {
        /// JSON file: an array of steps, or {"instructions": [...], "context": {...}}
        #[arg(long)]
        file: PathBuf,
        /// Quality policy (default: MEALPLAN_QUALITY_POLICY, then "strict")
        #[arg(long)]
        policy: Option<QualityPolicy>,
    },
    /// Validate, then request rewrites from the configured generation provider
    Enhance {
        /// JSON file: an array of steps, or {"instructions": [...], "context": {...}}
        #[arg(long)]
        file: PathBuf,
        /// Quality policy (default: MEALPLAN_QUALITY_POLICY, then "strict")
        #[arg(long)]
        policy: Option<QualityPolicy>,
        /// Maximum number of rewrite requests
        #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
        max_attempts: usize,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { file, policy } => {
            validate(&file, policy)?;
        }
        Commands::Enhance {
            file,
            policy,
            max_attempts,
        } => {
            enhance(&file, policy, max_attempts).await?;
        }
    }

    Ok(())
}

/// Environment settings, with `--policy` replacing the configured policy.
fn build_validator(policy: Option<QualityPolicy>) -> Result<InstructionQualityValidator> {
    let mut config = QualityConfig::from_env().context("Invalid quality configuration")?;
    if let Some(policy) = policy {
        config.policy = policy;
    }
    Ok(InstructionQualityValidator::from_config(&config))
}

fn validate(file: &std::path::Path, policy: Option<QualityPolicy>) -> Result<()> {
    let input = InstructionFile::load(file)?;
    let validator = build_validator(policy)?;

    let verdict = validator.validate_json(&input.instructions);
    println!("{}", serde_json::to_string_pretty(&verdict)?);

    Ok(())
}

async fn enhance(
    file: &std::path::Path,
    policy: Option<QualityPolicy>,
    max_attempts: usize,
) -> Result<()> {
    let input = InstructionFile::load(file)?;
    let validator = build_validator(policy)?;

    let Some(steps) = input.steps() else {
        let verdict = validator.validate_json(&input.instructions);
        println!("{}", serde_json::to_string_pretty(&verdict)?);
        anyhow::bail!("{} has no instruction list to enhance", file.display());
    };

    let criteria = validator.criteria().clone();
    let gate = QualityGate::new(validator).with_max_attempts(max_attempts);

    let outcome = match create_provider_from_env() {
        Ok(provider) => {
            let generator = LlmInstructionGenerator::new(provider).with_criteria(criteria);
            gate.run(&generator, steps, input.context.as_ref()).await
        }
        Err(LlmError::NotConfigured(reason)) => {
            tracing::warn!(
                %reason,
                "No generation provider configured, instructions left unchanged"
            );
            gate.pass_through(steps, input.context.as_ref())
        }
        Err(e) => return Err(e).context("Failed to configure generation provider"),
    };

    tracing::info!(
        attempts = outcome.attempts,
        accepted = outcome.accepted,
        issue_count = outcome.verdict.issue_count(),
        "Enhancement finished"
    );
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
