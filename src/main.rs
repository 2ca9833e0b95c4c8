use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tandem::agent::executor::ExecutorConfig;
use tandem::agent::retry::RetryConfig;
use tandem::cli::{Cli, Commands};
use tandem::config::Config;
use tandem::cycle::{Coordinator, CoordinatorConfig, CycleResult};
use tandem::git::{DiffProvider, GitRepo};
use tandem::github::GitHubClient;
use tandem::llm::{AnthropicClient, AnthropicConfig};

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tandem")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("tandem.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn coordinator_config(
    config: &Config,
    max_iterations: Option<usize>,
    base: Option<String>,
    scope: Option<String>,
) -> CoordinatorConfig {
    CoordinatorConfig {
        max_iterations: max_iterations.unwrap_or(config.cycle.max_iterations),
        base_branch: base.unwrap_or_else(|| config.git.base_branch.clone()),
        scope_path: scope.or_else(|| config.cycle.scope_path.clone()),
        commit_message: config.git.commit_message.clone(),
        retry: RetryConfig {
            max_retries: config.retry.max_retries,
            backoff: std::time::Duration::from_secs(config.retry.backoff_secs),
        },
        executor: ExecutorConfig {
            max_iterations: config.cycle.max_agent_iterations,
            max_tokens: config.llm.max_tokens,
        },
    }
}

async fn run_cycle_command(
    config: &Config,
    instruction: &str,
    max_iterations: Option<usize>,
    branch: Option<String>,
    base: Option<String>,
    repo_name: Option<String>,
    scope: Option<String>,
) -> Result<CycleResult> {
    let repository = repo_name
        .or_else(|| {
            let configured = config.github.repository.clone();
            if configured.is_empty() { None } else { Some(configured) }
        })
        .ok_or_else(|| eyre!("No repository configured; pass --repo or set github.repository"))?;

    let repo_root = std::env::current_dir().context("Failed to resolve current directory")?;
    let repo = GitRepo::new(&repo_root);

    let mut llm_config = AnthropicConfig::with_model(&config.llm.model);
    llm_config.max_tokens = config.llm.max_tokens;
    llm_config.timeout = std::time::Duration::from_millis(config.llm.timeout_ms);
    let llm = Arc::new(AnthropicClient::new(llm_config)?);

    let host = Arc::new(GitHubClient::new(&repository, repo.clone())?);

    let coordinator = Coordinator::new(
        llm,
        host,
        repo,
        coordinator_config(config, max_iterations, base, scope),
    );

    info!("Starting development cycle for repository {}", repository);
    Ok(coordinator.run_cycle(instruction, branch.as_deref()).await?)
}

fn print_result(result: &CycleResult) {
    println!("{}", "Development cycle complete".green().bold());
    println!("  branch:   {}", result.branch_name.cyan());
    println!("  rounds:   {}", result.rounds);
    println!(
        "  review:   {}",
        if result.approved {
            "approved (LGTM)".green().to_string()
        } else {
            "iteration budget exhausted without approval".yellow().to_string()
        }
    );
    if let (Some(number), Some(url)) = (result.pr_number, result.pr_url.as_deref()) {
        println!("  pull req: {} {}", format!("#{}", number).cyan(), url);
    }
    if !result.reviewer_summary.is_empty() {
        println!("\n{}\n{}", "Reviewer summary:".bold(), result.reviewer_summary);
    }
}

fn run_diff_command(scope: Option<String>) -> Result<()> {
    let repo_root = std::env::current_dir().context("Failed to resolve current directory")?;
    let provider = DiffProvider::new(GitRepo::new(&repo_root));

    let diff = provider.snapshot(scope.as_deref())?;
    if diff.is_empty() {
        println!("{}", "No pending changes".yellow());
    } else {
        println!("{}", diff);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;
    let cli = Cli::parse();

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            instruction,
            max_iterations,
            branch,
            base,
            repo,
            scope,
        } => {
            println!("{} {}", "Running development cycle:".cyan(), instruction);
            let result =
                run_cycle_command(&config, &instruction, max_iterations, branch, base, repo, scope).await?;
            print_result(&result);
        }
        Commands::Diff { scope } => run_diff_command(scope)?,
    }

    Ok(())
}
